//! Optimal pairing of corners via weighted bipartite matching.

use pathfinding::prelude::{kuhn_munkres, Matrix};
use tracing::debug;

use crate::config::BridgeConfig;
use crate::corners::Endpoint;
use crate::error::BridgeError;
use crate::score::score_corners;

/// Fixed-point scale used to hand real-valued scores to an integer solver.
const SCORE_SCALE: f64 = 1e6;

/// A maximum-weight assignment solver over a square score matrix.
///
/// Implementations return `matching` with `matching[i] = j` meaning row
/// `i` is assigned to column `j`, forming a permutation of `0..n` that
/// maximizes the sum of the chosen entries.
pub trait AssignmentSolver: Send + Sync {
    fn solve(&self, scores: &[Vec<f64>]) -> Result<Vec<usize>, BridgeError>;
}

/// Hungarian (Kuhn–Munkres) solver from the `pathfinding` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct KuhnMunkres;

impl AssignmentSolver for KuhnMunkres {
    fn solve(&self, scores: &[Vec<f64>]) -> Result<Vec<usize>, BridgeError> {
        let n = scores.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        let mut weights = Vec::with_capacity(n * n);
        for row in scores {
            if row.len() != n {
                return Err(BridgeError::InvalidMatching(format!(
                    "score matrix row has {} entries, expected {}",
                    row.len(),
                    n
                )));
            }
            for &score in row {
                if !score.is_finite() {
                    return Err(BridgeError::InvalidMatching(format!(
                        "non-finite score {}",
                        score
                    )));
                }
                weights.push((score * SCORE_SCALE).round() as i64);
            }
        }
        let weights = Matrix::from_vec(n, n, weights)
            .map_err(|e| BridgeError::InvalidMatching(format!("{:?}", e)))?;
        let (_, matching) = kuhn_munkres(&weights);
        Ok(matching)
    }
}

/// `scores[i][j]` = score of bridging `corners[i]` to `corners[j]`.
pub fn score_matrix(corners: &[Endpoint], config: &BridgeConfig) -> Vec<Vec<f64>> {
    corners
        .iter()
        .map(|ins| {
            corners
                .iter()
                .map(|out| score_corners(ins, out, config))
                .collect()
        })
        .collect()
}

/// Let each pair fall back to the reverse pair's score, less a penalty.
pub fn symmetrize(scores: &[Vec<f64>], reversal_penalty: f64) -> Vec<Vec<f64>> {
    (0..scores.len())
        .map(|i| {
            (0..scores.len())
                .map(|j| scores[i][j].max(scores[j][i] - reversal_penalty))
                .collect()
        })
        .collect()
}

/// Assign each corner a partner, returning a permutation of `0..corners.len()`.
pub fn match_corners(
    corners: &[Endpoint],
    config: &BridgeConfig,
    solver: &dyn AssignmentSolver,
) -> Result<Vec<usize>, BridgeError> {
    if corners.is_empty() {
        return Ok(Vec::new());
    }
    let scores = symmetrize(&score_matrix(corners, config), config.reversal_penalty);
    let matching = solver.solve(&scores)?;
    validate_permutation(&matching, corners.len())?;
    debug!(corners = corners.len(), "matched corners");
    Ok(matching)
}

fn validate_permutation(matching: &[usize], n: usize) -> Result<(), BridgeError> {
    if matching.len() != n {
        return Err(BridgeError::InvalidMatching(format!(
            "got {} assignments for {} corners",
            matching.len(),
            n
        )));
    }
    let mut seen = vec![false; n];
    for &j in matching {
        if j >= n || seen[j] {
            return Err(BridgeError::InvalidMatching(format!(
                "{:?} is not a permutation",
                matching
            )));
        }
        seen[j] = true;
    }
    Ok(())
}
