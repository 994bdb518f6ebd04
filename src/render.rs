//! Render-data assembly and path serialization.

use serde::Serialize;

use crate::bridges::Bridge;
use crate::corners::Endpoint;
use crate::path::Command;

/// Everything a stroke renderer needs for one glyph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderData {
    pub bridges: Vec<Bridge>,
    /// All vertices, corners or not.
    pub endpoints: Vec<Endpoint>,
    /// Serialized path, as produced by the [`PathSerializer`].
    pub d: String,
}

/// Writes a command list in some textual path syntax.
pub trait PathSerializer: Send + Sync {
    fn serialize(&self, commands: &[Command]) -> String;
}

/// Space-separated SVG-style tokens: `M x y`, `L x y`, `Q cx cy x y`, `Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgPathSerializer;

impl PathSerializer for SvgPathSerializer {
    fn serialize(&self, commands: &[Command]) -> String {
        let mut tokens: Vec<String> = Vec::with_capacity(commands.len() * 3);
        for command in commands {
            match *command {
                Command::Move(p) => tokens.extend(["M".into(), p.x.to_string(), p.y.to_string()]),
                Command::Line(p) => tokens.extend(["L".into(), p.x.to_string(), p.y.to_string()]),
                Command::Curve { control, end } => tokens.extend([
                    "Q".into(),
                    control.x.to_string(),
                    control.y.to_string(),
                    end.x.to_string(),
                    end.y.to_string(),
                ]),
                Command::Close => tokens.push("Z".into()),
            }
        }
        tokens.join(" ")
    }
}

/// Bundle the computed pieces with the serialized path.
pub fn assemble(bridges: Vec<Bridge>, endpoints: Vec<Endpoint>, d: String) -> RenderData {
    RenderData {
        bridges,
        endpoints,
        d,
    }
}
