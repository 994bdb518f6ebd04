use thiserror::Error;

use crate::geom::Point;

/// Errors that abort bridge computation for a glyph.
///
/// Every variant points at bad upstream path data; none of them are
/// worth retrying with the same input.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("malformed path: {0}")]
    MalformedPath(String),

    #[error("invalid point: {0}")]
    InvalidPoint(String),

    #[error("degenerate bridge between {0} and {1}")]
    DegenerateBridge(Point, Point),

    #[error("assignment solver returned an invalid matching: {0}")]
    InvalidMatching(String),

    #[cfg(feature = "ufo")]
    #[error("norad error: {0}")]
    Norad(#[from] norad::error::FontLoadError),
}
