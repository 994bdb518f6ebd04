//! Read quadratic UFO glyph outlines as path commands.

use norad::{Contour, Glyph, PointType};

use crate::error::BridgeError;
use crate::geom::Point;
use crate::path::Command;

/// Convert the contours of a `norad::Glyph` to one command list.
///
/// Every contour starts with a move and draws back to its start point;
/// a single close ends the last one. Consecutive off-curve points are
/// split at their implied on-curve midpoints, rounded to whole font units.
pub fn commands_from_glyph(glyph: &Glyph) -> Result<Vec<Command>, BridgeError> {
    let mut commands = Vec::new();
    for contour in &glyph.contours {
        commands.extend(contour_commands(contour)?);
    }
    if !commands.is_empty() {
        commands.push(Command::Close);
    }
    Ok(commands)
}

fn contour_commands(contour: &Contour) -> Result<Vec<Command>, BridgeError> {
    let mut points: Vec<(Point, bool)> = Vec::with_capacity(contour.points.len());
    for p in &contour.points {
        let on_curve = match p.typ {
            PointType::OffCurve => false,
            PointType::Line | PointType::QCurve => true,
            PointType::Move => {
                return Err(BridgeError::MalformedPath(
                    "open contours are not supported".into(),
                ))
            }
            PointType::Curve => {
                return Err(BridgeError::MalformedPath(
                    "cubic segments are not supported".into(),
                ))
            }
        };
        points.push((Point::from_f64(p.x, p.y)?, on_curve));
    }
    if points.is_empty() {
        return Err(BridgeError::MalformedPath("empty contour".into()));
    }

    // All-off-curve contours start at the implied point between the last
    // and first controls.
    let (start, rest) = match points.iter().position(|&(_, on)| on) {
        Some(k) => {
            points.rotate_left(k);
            (points[0].0, points.split_off(1))
        }
        None => (midpoint(points[points.len() - 1].0, points[0].0), points),
    };

    let mut commands = vec![Command::Move(start)];
    let mut controls: Vec<Point> = Vec::new();
    for (point, on_curve) in rest.into_iter().chain(std::iter::once((start, true))) {
        if on_curve {
            push_segments(&mut commands, &controls, point);
            controls.clear();
        } else {
            controls.push(point);
        }
    }
    Ok(commands)
}

fn push_segments(commands: &mut Vec<Command>, controls: &[Point], end: Point) {
    let Some((&last, _)) = controls.split_last() else {
        commands.push(Command::Line(end));
        return;
    };
    for pair in controls.windows(2) {
        commands.push(Command::Curve {
            control: pair[0],
            end: midpoint(pair[0], pair[1]),
        });
    }
    commands.push(Command::Curve { control: last, end });
}

fn midpoint(a: Point, b: Point) -> Point {
    let mid = |u: i32, v: i32| ((u as f64 + v as f64) / 2.0).round() as i32;
    Point::new(mid(a.x, b.x), mid(a.y, b.y))
}
