//! corner-bridges: glyph outlines → corners and bridges for single-stroke tracing.
//!
//! Finds the sharp concave corners of a quadratic glyph outline and pairs
//! them with straight "bridges", so that the outline plus its bridges can
//! be traced as one continuous stroke.
//!
//! # Example
//!
//! ```
//! use corner_bridges::{parse_commands, render_data, BridgeConfig};
//!
//! let commands = parse_commands("M 0 0 L 10 0 L 10 10 L 0 10 Z")?;
//! let data = render_data(&commands, &BridgeConfig::default())?;
//! assert!(data.bridges.is_empty());
//! assert_eq!(data.endpoints.len(), 4);
//! # Ok::<(), corner_bridges::BridgeError>(())
//! ```

#![forbid(unsafe_code)]

mod bridges;
mod config;
mod corners;
mod direction;
mod geom;
mod matching;
mod path;
mod render;
mod score;

pub mod error;

#[cfg(feature = "ufo")]
pub mod ufo;

// Re-export kurbo so downstream users get the same version
// used by Endpoint.tangents.
pub use kurbo;

pub use bridges::{extract_bridges, get_bridges, Bridge};
pub use config::BridgeConfig;
pub use corners::{extract_endpoints, is_corner, Endpoint};
pub use direction::{needs_reversal, normalize_orientation, reverse_contour, signed_area};
pub use error::BridgeError;
pub use geom::{wrap_angle, Point};
pub use matching::{match_corners, score_matrix, symmetrize, AssignmentSolver, KuhnMunkres};
pub use path::{commands_from_bezpath, parse_commands, split_paths, Command, Contour, Segment};
pub use render::{assemble, PathSerializer, RenderData, SvgPathSerializer};
pub use score::{penalty, score_corners, Features};

use tracing::debug;

/// Full pipeline with the default solver and serializer.
pub fn render_data(commands: &[Command], config: &BridgeConfig) -> Result<RenderData, BridgeError> {
    render_data_with(commands, config, &KuhnMunkres, &SvgPathSerializer)
}

/// Full pipeline: commands → contours → endpoints → bridges → render data.
///
/// Pure and deterministic; any error aborts the glyph without partial output.
pub fn render_data_with(
    commands: &[Command],
    config: &BridgeConfig,
    solver: &dyn AssignmentSolver,
    serializer: &dyn PathSerializer,
) -> Result<RenderData, BridgeError> {
    let contours = split_paths(commands)?;
    debug!(contours = contours.len(), "split path");

    let contours = normalize_orientation(contours);
    let endpoints = extract_endpoints(&contours, config);
    debug!(
        endpoints = endpoints.len(),
        corners = endpoints.iter().filter(|e| e.corner).count(),
        "extracted endpoints"
    );

    let bridges = get_bridges(&endpoints, config, solver)?;
    Ok(assemble(bridges, endpoints, serializer.serialize(commands)))
}

/// Convenience: compute render data for glyphs of a UFO's default layer.
///
/// With `names` empty every glyph with an outline is processed. Glyphs
/// are independent and processed in parallel; each carries its own
/// result. Requested names missing from the layer are skipped.
#[cfg(feature = "ufo")]
pub fn render_font(
    ufo_path: &std::path::Path,
    names: &[String],
    config: &BridgeConfig,
) -> Result<Vec<(String, Result<RenderData, BridgeError>)>, BridgeError> {
    use rayon::prelude::*;

    let font = norad::Font::load(ufo_path)?;
    let layer = font.default_layer();
    let glyphs: Vec<&norad::Glyph> = if names.is_empty() {
        layer.iter().filter(|glyph| !glyph.contours.is_empty()).collect()
    } else {
        names
            .iter()
            .filter_map(|name| {
                let glyph = layer.get_glyph(name.as_str());
                if glyph.is_none() {
                    tracing::warn!(glyph = %name, "glyph not found in default layer");
                }
                glyph
            })
            .collect()
    };

    Ok(glyphs
        .par_iter()
        .map(|glyph| {
            let result = ufo::commands_from_glyph(glyph)
                .and_then(|commands| render_data(&commands, config));
            (glyph.name().to_string(), result)
        })
        .collect())
}
