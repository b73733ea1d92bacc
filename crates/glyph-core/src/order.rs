//! Angular ordering of contact points around their centroid.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::view::WorldPoint;

/// Orders points by their sweep angle around the centroid, ascending.
///
/// Sweep angles lie in `[-π, π)`, so a point due west of the centroid comes
/// first. Equal angles keep their input order.
pub fn order_by_angle(points: &[WorldPoint]) -> Vec<WorldPoint> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let centroid = centroid(points);
    let mut keyed: Vec<(f64, WorldPoint)> = points
        .iter()
        .map(|&point| (sweep_angle(point, centroid), point))
        .collect();
    // stable: ties stay in contact order
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, point)| point).collect()
}

#[allow(clippy::cast_precision_loss)]
fn centroid(points: &[WorldPoint]) -> WorldPoint {
    let count = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(x, y), point| (x + point.x, y + point.y));
    WorldPoint::new(sum_x / count, sum_y / count)
}

fn sweep_angle(point: WorldPoint, centroid: WorldPoint) -> f64 {
    let angle = (point.y - centroid.y).atan2(point.x - centroid.x);
    if angle >= PI { angle - TAU } else { angle }
}

/// A line between two neighbouring contacts, trimmed to the indicator circles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: WorldPoint,
    pub end: WorldPoint,
}

/// Connective lines between consecutive ordered points.
///
/// Each line is shortened by `radius` at both ends. Neighbours whose circles
/// touch or overlap (distance `<= 2 * radius`) get no line.
pub fn connector_segments(ordered: &[WorldPoint], radius: f64) -> Vec<Segment> {
    ordered
        .windows(2)
        .filter_map(|pair| {
            let (p1, p2) = (pair[0], pair[1]);
            let distance = p1.distance_to(p2);
            if distance <= 2.0 * radius {
                return None;
            }
            let ux = (p2.x - p1.x) / distance;
            let uy = (p2.y - p1.y) / distance;
            Some(Segment {
                start: WorldPoint::new(p1.x + ux * radius, p1.y + uy * radius),
                end: WorldPoint::new(p2.x - ux * radius, p2.y - uy * radius),
            })
        })
        .collect()
}
