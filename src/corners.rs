use kurbo::Vec2;
use serde::Serialize;

use crate::config::BridgeConfig;
use crate::geom::{serialize_vec2_pair, wrap_angle, Point};
use crate::path::{Contour, Segment};

/// A contour vertex with its tangent directions and corner classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Endpoint {
    /// (contour, segment) of the segment leaving this vertex.
    pub index: (usize, usize),
    pub point: Point,
    /// Incoming and outgoing directions of travel.
    #[serde(serialize_with = "serialize_vec2_pair")]
    pub tangents: [Vec2; 2],
    /// Angles of `tangents`, each in `[-π, π)`.
    pub angles: [f64; 2],
    /// Sharp clockwise (concave) turn: eligible for bridging.
    pub corner: bool,
}

impl Endpoint {
    /// Classify the vertex where `prev` ends and `next` starts.
    pub fn new(
        index: (usize, usize),
        prev: &Segment,
        next: &Segment,
        config: &BridgeConfig,
    ) -> Self {
        let point = next.start;
        debug_assert_eq!(prev.end, point);
        let min_distance2 = config.min_corner_tangent_distance * config.min_corner_tangent_distance;

        let tangent_in = match prev.control {
            Some(c) if point.sub(c).hypot2() > min_distance2 => point.sub(c),
            _ => prev.end.sub(prev.start),
        };
        let tangent_out = match next.control {
            Some(c) if c.sub(point).hypot2() > min_distance2 => c.sub(point),
            _ => next.end.sub(next.start),
        };

        let angles = [direction(tangent_in), direction(tangent_out)];
        Self {
            index,
            point,
            tangents: [tangent_in, tangent_out],
            angles,
            corner: is_corner(angles[0], angles[1], config.min_corner_angle),
        }
    }

    /// Signed turning angle at this vertex. Negative = clockwise.
    pub fn turn(&self) -> f64 {
        wrap_angle(self.angles[1] - self.angles[0])
    }
}

fn direction(v: Vec2) -> f64 {
    wrap_angle(v.y.atan2(v.x))
}

/// A turn from `angle_in` to `angle_out` is a corner when it bends
/// clockwise by strictly more than `min_corner_angle`.
pub fn is_corner(angle_in: f64, angle_out: f64, min_corner_angle: f64) -> bool {
    wrap_angle(angle_out - angle_in) < -min_corner_angle
}

/// One endpoint per vertex, contour by contour, in traversal order.
///
/// The first endpoint of each contour is the start of its first segment.
pub fn extract_endpoints(contours: &[Contour], config: &BridgeConfig) -> Vec<Endpoint> {
    contours
        .iter()
        .enumerate()
        .flat_map(|(i, contour)| {
            let segments = contour.segments();
            let n = segments.len();
            (0..n).map(move |j| {
                let prev = &segments[(j + n - 1) % n];
                Endpoint::new((i, j), prev, &segments[j], config)
            })
        })
        .collect()
}
