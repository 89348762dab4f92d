use serde::{Deserialize, Serialize};

use crate::core::types::{LogicalPoint, PixelPoint};

/// Distance from `point` to the segment `a`..`b`.
///
/// The orthogonal projection of `point` onto the segment is clamped to the
/// segment extent; a degenerate segment (`a == b`) falls back to the
/// straight-line distance to `a`.
#[must_use]
pub fn distance_to_segment(point: PixelPoint, a: PixelPoint, b: PixelPoint) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_squared = dx * dx + dy * dy;

    if length_squared == 0.0 {
        return point.distance_to(a);
    }

    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / length_squared).clamp(0.0, 1.0);
    let projected = PixelPoint::new(a.x + t * dx, a.y + t * dy);
    point.distance_to(projected)
}

/// One interpolated fibonacci level between two price anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibLevel {
    pub ratio: f64,
    pub price: f64,
}

/// Interpolates a price for every ratio in `levels`.
///
/// Ratios outside `[0, 1]` are legal extension levels and are not rejected.
#[must_use]
pub fn fib_level_prices(p1: LogicalPoint, p2: LogicalPoint, levels: &[f64]) -> Vec<FibLevel> {
    let span = p2.price - p1.price;
    levels
        .iter()
        .map(|&ratio| FibLevel {
            ratio,
            price: p1.price + span * ratio,
        })
        .collect()
}

/// Derived channel geometry: base segment, offset parallel segment, and the
/// quad they enclose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelGeometry {
    pub base: [PixelPoint; 2],
    pub parallel: [PixelPoint; 2],
    pub polygon: [PixelPoint; 4],
}

/// Builds channel geometry from three anchor points.
///
/// The first two points define the base segment; the third is projected onto
/// the base's unit normal to obtain the signed offset of the parallel
/// segment. Returns `None` for fewer than three points or a zero-length base.
#[must_use]
pub fn channel_geometry(points: &[PixelPoint]) -> Option<ChannelGeometry> {
    let [a, b, c] = match points {
        [a, b, c, ..] => [*a, *b, *c],
        _ => return None,
    };

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return None;
    }

    let normal_x = -dy / length;
    let normal_y = dx / length;
    let offset = (c.x - a.x) * normal_x + (c.y - a.y) * normal_y;

    let parallel_a = PixelPoint::new(a.x + normal_x * offset, a.y + normal_y * offset);
    let parallel_b = PixelPoint::new(b.x + normal_x * offset, b.y + normal_y * offset);

    Some(ChannelGeometry {
        base: [a, b],
        parallel: [parallel_a, parallel_b],
        polygon: [a, b, parallel_b, parallel_a],
    })
}

/// Ray-casting parity test for polygon containment.
///
/// Edges with non-finite coordinates are skipped rather than poisoning the
/// whole test.
#[must_use]
pub fn point_in_polygon(point: PixelPoint, polygon: &[PixelPoint]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);

    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        j = i;

        if !pi.x.is_finite() || !pi.y.is_finite() || !pj.x.is_finite() || !pj.y.is_finite() {
            continue;
        }

        let crosses = (pi.y > point.y) != (pj.y > point.y);
        if crosses {
            let intersect_x = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < intersect_x {
                inside = !inside;
            }
        }
    }

    inside
}
