//! Path commands and their decomposition into closed contours.

use kurbo::{BezPath, PathEl};

use crate::error::BridgeError;
use crate::geom::{integral, Point};

/// One drawing command of a glyph outline, in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Point),
    Line(Point),
    /// Quadratic curve to `end` through `control`.
    Curve { control: Point, end: Point },
    Close,
}

/// A line or quadratic curve between two distinct points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub control: Option<Point>,
}

impl Segment {
    /// Build a segment, or `None` if it would have zero length.
    ///
    /// A control point sitting on either endpoint is dropped and the
    /// segment becomes a line.
    pub fn new(start: Point, end: Point, control: Option<Point>) -> Option<Self> {
        if start == end {
            return None;
        }
        let control = control.filter(|&c| c != start && c != end);
        Some(Self { start, end, control })
    }

    /// Same segment traversed the other way.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            control: self.control,
        }
    }
}

/// A closed loop of segments: each segment starts where the previous
/// one ends, and the last one ends where the first one starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    segments: Vec<Segment>,
}

impl Contour {
    /// Callers guarantee a non-empty, cyclically connected sequence.
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Contour under construction while walking the command list.
struct OpenContour {
    start: Point,
    current: Point,
    segments: Vec<Segment>,
}

impl OpenContour {
    fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
            segments: Vec::new(),
        }
    }

    fn push(&mut self, end: Point, control: Option<Point>) {
        if let Some(segment) = Segment::new(self.current, end, control) {
            self.segments.push(segment);
        }
        self.current = end;
    }

    /// Finish at the final close, which implies a straight line back to
    /// the start.
    fn close(mut self, index: usize) -> Result<Contour, BridgeError> {
        self.push(self.start, None);
        self.finish(index)
    }

    fn finish(self, index: usize) -> Result<Contour, BridgeError> {
        if self.segments.is_empty() {
            return Err(BridgeError::MalformedPath(format!(
                "contour ending at command {} is empty",
                index
            )));
        }
        Ok(Contour::from_segments(self.segments))
    }
}

/// Split a command list into closed contours, in the order encountered.
///
/// Contours are separated by moves, each made once the path is back at
/// the current contour's start. A single close ends the whole path.
/// Zero-length segments are dropped silently. A contour whose segments
/// all vanish is an error.
pub fn split_paths(commands: &[Command]) -> Result<Vec<Contour>, BridgeError> {
    if commands.len() < 2 {
        return Err(BridgeError::MalformedPath(format!(
            "path has {} commands, need at least 2",
            commands.len()
        )));
    }
    if !matches!(commands[0], Command::Move(_)) {
        return Err(BridgeError::MalformedPath(
            "path must start with a move".into(),
        ));
    }
    let last = commands.len() - 1;
    if !matches!(commands[last], Command::Close) {
        return Err(BridgeError::MalformedPath("path must end with a close".into()));
    }

    let mut contours = Vec::new();
    let mut open: Option<OpenContour> = None;

    for (i, command) in commands.iter().enumerate() {
        match *command {
            Command::Move(p) => {
                if let Some(contour) = open.take() {
                    if contour.current != contour.start {
                        return Err(BridgeError::MalformedPath(format!(
                            "move at command {} before the contour from {} is closed",
                            i, contour.start
                        )));
                    }
                    contours.push(contour.finish(i)?);
                }
                open = Some(OpenContour::new(p));
            }
            Command::Line(end) => {
                open.as_mut().ok_or_else(|| outside_contour("line", i))?.push(end, None);
            }
            Command::Curve { control, end } => {
                open.as_mut()
                    .ok_or_else(|| outside_contour("curve", i))?
                    .push(end, Some(control));
            }
            Command::Close => {
                if i != last {
                    return Err(BridgeError::MalformedPath(format!(
                        "close at command {} before the end of the path",
                        i
                    )));
                }
                let contour = open.take().ok_or_else(|| outside_contour("close", i))?;
                contours.push(contour.close(i)?);
            }
        }
    }

    Ok(contours)
}

fn outside_contour(what: &str, index: usize) -> BridgeError {
    BridgeError::MalformedPath(format!(
        "{} at command {} does not follow a move",
        what, index
    ))
}

/// Parse the whitespace-separated token stream written by
/// [`SvgPathSerializer`](crate::SvgPathSerializer).
///
/// Only absolute `M`, `L`, `Q` and `Z` are understood.
pub fn parse_commands(d: &str) -> Result<Vec<Command>, BridgeError> {
    let mut tokens = d.split_whitespace();
    let mut commands = Vec::new();

    while let Some(tag) = tokens.next() {
        let command = match tag {
            "M" => Command::Move(read_point(&mut tokens, tag)?),
            "L" => Command::Line(read_point(&mut tokens, tag)?),
            "Q" => {
                let control = read_point(&mut tokens, tag)?;
                let end = read_point(&mut tokens, tag)?;
                Command::Curve { control, end }
            }
            "Z" => Command::Close,
            other => {
                return Err(BridgeError::MalformedPath(format!(
                    "unknown path command {:?}",
                    other
                )))
            }
        };
        commands.push(command);
    }

    Ok(commands)
}

fn read_point<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    tag: &str,
) -> Result<Point, BridgeError> {
    let x = read_coordinate(tokens.next(), tag)?;
    let y = read_coordinate(tokens.next(), tag)?;
    Ok(Point::new(x, y))
}

fn read_coordinate(token: Option<&str>, tag: &str) -> Result<i32, BridgeError> {
    let token = token.ok_or_else(|| {
        BridgeError::MalformedPath(format!("missing coordinate for {}", tag))
    })?;
    if let Ok(value) = token.parse::<i32>() {
        return Ok(value);
    }
    match token.parse::<f64>() {
        Ok(value) => integral(value),
        Err(_) => Err(BridgeError::MalformedPath(format!(
            "expected coordinate for {}, found {:?}",
            tag, token
        ))),
    }
}

/// Convert a kurbo path with integral coordinates to commands.
///
/// Each subpath closed before the end of the path becomes an explicit
/// line back to its start, so only the final `ClosePath` remains a close.
/// Cubic segments have no counterpart and are rejected.
pub fn commands_from_bezpath(path: &BezPath) -> Result<Vec<Command>, BridgeError> {
    let elements = path.elements();
    let mut commands = Vec::with_capacity(elements.len());
    let mut start = Point::new(0, 0);
    let mut current = start;

    for (i, el) in elements.iter().enumerate() {
        match *el {
            PathEl::MoveTo(p) => {
                start = Point::from_kurbo(p)?;
                current = start;
                commands.push(Command::Move(start));
            }
            PathEl::LineTo(p) => {
                current = Point::from_kurbo(p)?;
                commands.push(Command::Line(current));
            }
            PathEl::QuadTo(c, p) => {
                let control = Point::from_kurbo(c)?;
                current = Point::from_kurbo(p)?;
                commands.push(Command::Curve { control, end: current });
            }
            PathEl::ClosePath if i + 1 == elements.len() => commands.push(Command::Close),
            PathEl::ClosePath => {
                if current != start {
                    commands.push(Command::Line(start));
                    current = start;
                }
            }
            PathEl::CurveTo(..) => {
                return Err(BridgeError::MalformedPath(
                    "cubic segments are not supported".into(),
                ))
            }
        }
    }

    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn assert_closed(contour: &Contour) {
        let segments = contour.segments();
        assert!(!segments.is_empty());
        for k in 0..segments.len() {
            assert_eq!(segments[k].end, segments[(k + 1) % segments.len()].start);
        }
    }

    #[test]
    fn square_splits_into_one_closed_contour() {
        let commands = parse_commands("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap();
        let contours = split_paths(&commands).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].segments().len(), 4);
        assert_closed(&contours[0]);
        assert_eq!(contours[0].segments()[3], Segment::new(p(0, 10), p(0, 0), None).unwrap());
    }

    #[test]
    fn explicit_return_to_start_adds_no_segment() {
        let commands = parse_commands("M 0 0 L 10 0 L 10 10 L 0 0 Z").unwrap();
        let contours = split_paths(&commands).unwrap();
        assert_eq!(contours[0].segments().len(), 3);
        assert_closed(&contours[0]);
    }

    #[test]
    fn zero_length_line_is_dropped() {
        let commands = parse_commands("M 0 0 L 10 0 L 10 0 L 10 10 L 0 10 Z").unwrap();
        let contours = split_paths(&commands).unwrap();
        assert_eq!(contours[0].segments().len(), 4);
        assert!(contours[0].segments().iter().all(|s| s.start != s.end));
        assert_closed(&contours[0]);
    }

    #[test]
    fn coincident_control_degrades_to_line() {
        let commands = [
            Command::Move(p(0, 0)),
            Command::Curve { control: p(10, 0), end: p(10, 0) },
            Command::Curve { control: p(20, 20), end: p(0, 10) },
            Command::Close,
        ];
        let contours = split_paths(&commands).unwrap();
        let segments = contours[0].segments();
        assert_eq!(segments[0].control, None);
        assert_eq!(segments[1].control, Some(p(20, 20)));
    }

    #[test]
    fn multiple_contours_keep_their_order() {
        let commands =
            parse_commands("M 0 0 L 100 0 L 100 100 L 0 100 L 0 0 M 20 20 L 20 80 L 80 80 L 80 20 L 20 20 Z")
                .unwrap();
        let contours = split_paths(&commands).unwrap();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].segments().len(), 4);
        assert_eq!(contours[1].segments().len(), 4);
        assert_eq!(contours[1].segments()[0].start, p(20, 20));
        contours.iter().for_each(assert_closed);
    }

    #[test]
    fn structural_errors() {
        let cases = [
            "M 0 0",
            "L 10 0 L 10 10 Z",
            "M 0 0 L 10 0 L 10 10",
            "M 0 0 L 10 0 M 5 5 L 6 6 Z",
            "M 0 0 L 10 0 L 0 10 Z Z",
            "M 0 0 L 10 0 L 0 10 L 0 0 M 0 0 Z",
            "M 0 0 M 10 10 L 20 10 L 10 20 Z",
            "M 0 0 Z",
            "M 0 0 L 0 0 Z",
        ];
        for d in cases {
            let commands = parse_commands(d).unwrap();
            assert!(
                matches!(split_paths(&commands), Err(BridgeError::MalformedPath(_))),
                "expected malformed path for {:?}",
                d
            );
        }
    }

    #[test]
    fn close_only_ends_the_path() {
        let commands =
            parse_commands("M 0 0 L 100 0 L 100 100 L 0 100 Z M 20 20 L 20 80 L 80 80 L 80 20 Z").unwrap();
        assert!(matches!(split_paths(&commands), Err(BridgeError::MalformedPath(_))));
    }

    #[test]
    fn move_before_returning_to_start_is_malformed() {
        let commands = parse_commands("M 0 0 L 100 0 L 100 100 M 20 20 L 20 80 L 80 80 Z").unwrap();
        assert!(matches!(split_paths(&commands), Err(BridgeError::MalformedPath(_))));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(parse_commands("M 0"), Err(BridgeError::MalformedPath(_))));
        assert!(matches!(parse_commands("M 0 Z"), Err(BridgeError::MalformedPath(_))));
        assert!(matches!(parse_commands("C 0 0 1 1 2 2"), Err(BridgeError::MalformedPath(_))));
        assert!(matches!(parse_commands("M 0.5 0 Z"), Err(BridgeError::InvalidPoint(_))));
    }

    #[test]
    fn bezpath_conversion() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((5.0, -5.0), (10.0, 0.0));
        path.line_to((10.0, 10.0));
        path.close_path();
        let commands = commands_from_bezpath(&path).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Move(p(0, 0)),
                Command::Curve { control: p(5, -5), end: p(10, 0) },
                Command::Line(p(10, 10)),
                Command::Close,
            ]
        );

        let mut cubic = BezPath::new();
        cubic.move_to((0.0, 0.0));
        cubic.curve_to((1.0, 1.0), (2.0, 2.0), (3.0, 0.0));
        assert!(matches!(commands_from_bezpath(&cubic), Err(BridgeError::MalformedPath(_))));

        let mut two = BezPath::new();
        two.move_to((0.0, 0.0));
        two.line_to((10.0, 0.0));
        two.line_to((0.0, 10.0));
        two.close_path();
        two.move_to((20.0, 20.0));
        two.line_to((30.0, 20.0));
        two.line_to((20.0, 30.0));
        two.line_to((20.0, 20.0));
        two.close_path();
        let commands = commands_from_bezpath(&two).unwrap();
        assert_eq!(commands[3], Command::Line(p(0, 0)));
        assert_eq!(commands.iter().filter(|c| **c == Command::Close).count(), 1);
        assert_eq!(split_paths(&commands).unwrap().len(), 2);

        let mut fractional = BezPath::new();
        fractional.move_to((0.25, 0.0));
        assert!(matches!(commands_from_bezpath(&fractional), Err(BridgeError::InvalidPoint(_))));
    }
}
