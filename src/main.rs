use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use corner_bridges::{BridgeConfig, RenderData};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "corner-bridges", about = "Glyph outline corners and bridges as JSON render data")]
struct Cli {
    /// UFO font directory; glyphs are read from its default layer
    #[arg(short, long, conflicts_with = "path", required_unless_present = "path")]
    ufo: Option<PathBuf>,

    /// Glyph name to process (repeatable; all glyphs if omitted)
    #[arg(short, long = "glyph")]
    glyphs: Vec<String>,

    /// Literal path string, e.g. "M 0 0 L 10 0 L 10 10 Z"
    #[arg(short, long)]
    path: Option<String>,

    /// JSON preset with any of the config fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Distance in font units that costs one unit of bridge penalty
    #[arg(long)]
    max_bridge_distance: Option<f64>,

    /// Minimum clockwise turn for a corner, in degrees
    #[arg(long)]
    min_corner_angle: Option<f64>,

    /// Penalty for bridging with the reverse pair's orientation
    #[arg(long)]
    reversal_penalty: Option<f64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log per-stage progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => BridgeConfig::default(),
    };
    if let Some(distance) = cli.max_bridge_distance {
        config.max_bridge_distance = distance;
    }
    if let Some(degrees) = cli.min_corner_angle {
        config.min_corner_angle = degrees.to_radians();
    }
    if let Some(penalty) = cli.reversal_penalty {
        config.reversal_penalty = penalty;
    }

    let mut output: BTreeMap<String, RenderData> = BTreeMap::new();

    if let Some(d) = &cli.path {
        let commands = corner_bridges::parse_commands(d)?;
        output.insert("path".into(), corner_bridges::render_data(&commands, &config)?);
    }

    if let Some(ufo) = &cli.ufo {
        let results = corner_bridges::render_font(ufo, &cli.glyphs, &config)?;
        let total = results.len();
        for (name, result) in results {
            match result {
                Ok(data) => {
                    output.insert(name, data);
                }
                Err(e) => warn!(glyph = %name, error = %e, "skipping glyph"),
            }
        }
        info!(processed = output.len(), skipped = total - output.len(), "done");
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(())
}
