//! Directional scoring of candidate bridges between two corners.
//!
//! A bridge from `ins` to `out` scores well when leaving `ins` along the
//! bridge continues its incoming stroke and arriving at `out` flows into
//! its outgoing stroke. Scores are never positive; zero is a perfect fit.

use std::f64::consts::PI;

use crate::config::BridgeConfig;
use crate::corners::Endpoint;
use crate::geom::wrap_angle;

/// Angle penalty divisor for corners that face each other.
const FACING_LENIENCY: f64 = 16.0;

/// `out_facing + out_alignment` below this means the two corners point
/// toward each other.
const FACING_THRESHOLD: f64 = -0.5 * PI;

/// Geometric features of a bridge from `ins` to `out`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    /// Bridge direction relative to `ins`'s incoming tangent.
    pub ins_deviation: f64,
    /// `out`'s outgoing tangent relative to the bridge direction.
    pub out_deviation: f64,
    /// Same angle as `out_deviation`, used for the facing test.
    pub out_facing: f64,
    /// Bridge direction relative to `out`'s incoming tangent.
    pub out_alignment: f64,
    /// Turning angle at `ins`.
    pub ins_turn: f64,
    /// Turning angle at `out`.
    pub out_turn: f64,
    /// Bridge length in font units.
    pub distance: f64,
}

impl Features {
    /// Features of the bridge between two corners at distinct points.
    pub fn between(ins: &Endpoint, out: &Endpoint) -> Self {
        let diff = out.point.sub(ins.point);
        let angle = diff.y.atan2(diff.x);
        Self {
            ins_deviation: wrap_angle(angle - ins.angles[0]),
            out_deviation: wrap_angle(out.angles[1] - angle),
            out_facing: wrap_angle(out.angles[1] - angle),
            out_alignment: wrap_angle(angle - out.angles[0]),
            ins_turn: wrap_angle(ins.angles[1] - ins.angles[0]),
            out_turn: wrap_angle(out.angles[1] - out.angles[0]),
            distance: diff.hypot(),
        }
    }

    fn faces_inward(&self) -> bool {
        self.ins_deviation > 0.0
            && self.out_deviation > 0.0
            && self.out_facing + self.out_alignment < FACING_THRESHOLD
    }

    /// Negated sum of the angle and distance penalties.
    pub fn score(&self, config: &BridgeConfig) -> f64 {
        let mut angle_penalty = penalty(self.ins_deviation) + penalty(self.out_deviation);
        let distance_penalty = self.distance / config.max_bridge_distance;
        if self.faces_inward() {
            angle_penalty /= FACING_LENIENCY;
        }
        -(angle_penalty + distance_penalty)
    }
}

pub fn penalty(diff: f64) -> f64 {
    diff * diff
}

/// Score bridging `ins` (as source) to `out` (as destination).
///
/// Asymmetric: swapping the arguments generally changes the score. Two
/// endpoints at the same point score by how well `ins`'s incoming
/// direction continues into `out`'s outgoing one.
pub fn score_corners(ins: &Endpoint, out: &Endpoint, config: &BridgeConfig) -> f64 {
    if ins.point == out.point {
        return -penalty(wrap_angle(out.angles[1] - ins.angles[0]));
    }
    Features::between(ins, out).score(config)
}
