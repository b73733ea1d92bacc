//! View/world coordinate mapping.

use serde::{Deserialize, Serialize};

use crate::error::GestureError;

/// Radius of the contact indicator circle, in view pixels.
pub const CONTACT_RADIUS_PX: f64 = 40.0;

/// A point on the rendering surface, before pan/zoom is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewPoint {
    pub x: f64,
    pub y: f64,
}

impl ViewPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in content coordinates, independent of the current pan/zoom.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: WorldPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Direction from `self` to `other`, in degrees.
    pub fn angle_to_degrees(self, other: WorldPoint) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}

/// Snapshot of the view's pan offset and zoom factor.
///
/// Owned by whatever handles panning and zooming; the gesture core only reads
/// copies of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub zoom: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl ViewTransform {
    pub const fn new(offset_x: f64, offset_y: f64, zoom: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            zoom,
        }
    }

    /// Checks that the zoom factor can be divided by.
    pub fn validate(&self) -> Result<(), GestureError> {
        if self.zoom.is_finite() && self.zoom > 0.0 {
            Ok(())
        } else {
            Err(GestureError::InvalidTransform { zoom: self.zoom })
        }
    }

    /// Maps a view-space point into world space.
    pub fn to_world(&self, point: ViewPoint) -> Result<WorldPoint, GestureError> {
        self.validate()?;
        Ok(WorldPoint {
            x: (point.x - self.offset_x) / self.zoom,
            y: (point.y - self.offset_y) / self.zoom,
        })
    }

    /// Maps a world-space point back into view space. Inverse of [`Self::to_world`].
    pub fn to_view(&self, point: WorldPoint) -> Result<ViewPoint, GestureError> {
        self.validate()?;
        Ok(ViewPoint {
            x: point.x * self.zoom + self.offset_x,
            y: point.y * self.zoom + self.offset_y,
        })
    }

    /// Converts a length in view pixels into world units.
    pub fn world_length(&self, pixels: f64) -> Result<f64, GestureError> {
        self.validate()?;
        Ok(pixels / self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_to_world_applies_offset_then_zoom() {
        let transform = ViewTransform::new(10.0, 10.0, 2.0);
        let world = transform.to_world(ViewPoint::new(50.0, 50.0)).unwrap();
        assert!((world.x - 20.0).abs() < TOLERANCE);
        assert!((world.y - 20.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_identity_transform() {
        let transform = ViewTransform::default();
        let world = transform.to_world(ViewPoint::new(100.0, 200.0)).unwrap();
        assert_eq!(world, WorldPoint::new(100.0, 200.0));
    }

    #[test]
    fn test_round_trip() {
        let transforms = [
            ViewTransform::new(0.0, 0.0, 1.0),
            ViewTransform::new(-250.5, 13.25, 0.1),
            ViewTransform::new(1024.0, -768.0, 7.5),
            ViewTransform::new(3.0, 4.0, 1e-4),
        ];
        let points = [
            ViewPoint::new(0.0, 0.0),
            ViewPoint::new(123.456, -78.9),
            ViewPoint::new(1920.0, 1080.0),
        ];

        for transform in &transforms {
            for &point in &points {
                let back = transform
                    .to_view(transform.to_world(point).unwrap())
                    .unwrap();
                let tolerance = 1e-9 * (1.0 + point.x.abs().max(point.y.abs()));
                assert!((back.x - point.x).abs() < tolerance, "{transform:?} {point:?}");
                assert!((back.y - point.y).abs() < tolerance, "{transform:?} {point:?}");
            }
        }
    }

    #[test]
    fn test_zero_zoom_is_rejected() {
        let transform = ViewTransform::new(0.0, 0.0, 0.0);
        assert_eq!(
            transform.to_world(ViewPoint::new(1.0, 1.0)),
            Err(GestureError::InvalidTransform { zoom: 0.0 })
        );
        assert!(transform.to_view(WorldPoint::new(1.0, 1.0)).is_err());
        assert!(transform.world_length(CONTACT_RADIUS_PX).is_err());
    }

    #[test]
    fn test_negative_and_nan_zoom_are_rejected() {
        assert!(ViewTransform::new(0.0, 0.0, -1.0).validate().is_err());
        assert!(ViewTransform::new(0.0, 0.0, f64::NAN).validate().is_err());
        assert!(ViewTransform::new(0.0, 0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_world_length_scales_with_zoom() {
        let transform = ViewTransform::new(5.0, 5.0, 4.0);
        let radius = transform.world_length(CONTACT_RADIUS_PX).unwrap();
        assert!((radius - 10.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_world_point_geometry() {
        let a = WorldPoint::new(100.0, 100.0);
        let b = WorldPoint::new(200.0, 100.0);
        assert!((a.distance_to(b) - 100.0).abs() < TOLERANCE);
        assert!(a.angle_to_degrees(b).abs() < TOLERANCE);
        assert!((b.angle_to_degrees(a) - 180.0).abs() < TOLERANCE);
    }
}
