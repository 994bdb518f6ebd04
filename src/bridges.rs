use serde::{Serialize, Serializer};
use tracing::debug;

use crate::config::BridgeConfig;
use crate::corners::Endpoint;
use crate::error::BridgeError;
use crate::geom::Point;
use crate::matching::{match_corners, AssignmentSolver};

/// A straight connection between two distinct corner points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge {
    points: [Point; 2],
}

impl Bridge {
    pub fn new(a: Point, b: Point) -> Result<Self, BridgeError> {
        if a == b {
            return Err(BridgeError::DegenerateBridge(a, b));
        }
        Ok(Self { points: [a, b] })
    }

    pub fn points(&self) -> [Point; 2] {
        self.points
    }

    /// Whether this bridge joins `a` and `b`, in either order.
    pub fn connects(&self, a: Point, b: Point) -> bool {
        self.points == [a, b] || self.points == [b, a]
    }
}

impl Serialize for Bridge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.points.serialize(serializer)
    }
}

/// Turn a corner matching into bridges.
///
/// A corner matched to itself is unpaired. A mutual pair is emitted once,
/// from its lower index.
pub fn extract_bridges(corners: &[Endpoint], matching: &[usize]) -> Result<Vec<Bridge>, BridgeError> {
    let mut bridges = Vec::new();
    for (i, &j) in matching.iter().enumerate() {
        if j == i {
            continue;
        }
        if j < i && matching[j] == i {
            continue;
        }
        let (a, b) = match (corners.get(i), corners.get(j)) {
            (Some(a), Some(b)) => (a.point, b.point),
            _ => {
                return Err(BridgeError::InvalidPoint(format!(
                    "bridge {} -> {} refers to a missing corner",
                    i, j
                )))
            }
        };
        bridges.push(Bridge::new(a, b)?);
    }
    Ok(bridges)
}

/// Detect bridges between the corners among `endpoints`.
pub fn get_bridges(
    endpoints: &[Endpoint],
    config: &BridgeConfig,
    solver: &dyn AssignmentSolver,
) -> Result<Vec<Bridge>, BridgeError> {
    let corners: Vec<Endpoint> = endpoints.iter().copied().filter(|e| e.corner).collect();
    let matching = match_corners(&corners, config, solver)?;
    let bridges = extract_bridges(&corners, &matching)?;
    debug!(corners = corners.len(), bridges = bridges.len(), "bridges");
    Ok(bridges)
}
