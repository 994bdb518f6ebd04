use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// All corner and bridge parameters in one struct.
/// Serializable so presets can be stored as JSON; any field left out
/// of a preset falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    // -- Corner detection --
    /// Minimum clockwise turn (radians) for a vertex to count as a corner.
    /// A vertex turning by exactly this much is not a corner.
    pub min_corner_angle: f64,
    /// A curve's control point is used as the tangent direction only when it
    /// lies farther than this from the vertex (font units). Closer controls
    /// give noisy directions, so the straight chord is used instead.
    pub min_corner_tangent_distance: f64,

    // -- Bridge scoring --
    /// Distance (font units) at which a bridge costs one unit of penalty.
    pub max_bridge_distance: f64,
    /// Cost of bridging a pair using the opposite pair's orientation.
    pub reversal_penalty: f64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            min_corner_angle: 0.1 * PI,
            min_corner_tangent_distance: 4.0,
            max_bridge_distance: 64.0,
            reversal_penalty: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_preset_keeps_defaults() {
        let config: BridgeConfig = serde_json::from_str(r#"{"max_bridge_distance": 128.0}"#).unwrap();
        assert_eq!(config.max_bridge_distance, 128.0);
        assert_eq!(config.reversal_penalty, 0.5);
        assert_eq!(config.min_corner_angle, 0.1 * PI);
    }
}
