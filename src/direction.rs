//! Contour winding direction normalization.
//!
//! Ensures the outermost contour winds CCW. Fonts wind counters opposite
//! to the contour that encloses them, so flipping the whole glyph as a
//! unit leaves every counter CW.

use tracing::debug;

use crate::path::Contour;

/// Twice the signed area of a contour (on-curve points only).
///
/// Positive = counter-clockwise, negative = clockwise, with y pointing up.
/// Summed in `i128`: single terms of an `i32` contour already reach 2^64.
pub fn signed_area(contour: &Contour) -> i128 {
    contour
        .segments()
        .iter()
        .map(|s| {
            let dx = i128::from(s.start.x) - i128::from(s.end.x);
            let sy = i128::from(s.start.y) + i128::from(s.end.y);
            dx * sy
        })
        .sum()
}

/// Whether the glyph must be reversed: true when the contour with the
/// largest absolute area winds clockwise.
pub fn needs_reversal(contours: &[Contour]) -> bool {
    contours
        .iter()
        .map(signed_area)
        .fold(0i128, |largest, area| {
            if area.abs() > largest.abs() {
                area
            } else {
                largest
            }
        })
        < 0
}

/// Reverse every contour if the outermost one is clockwise, otherwise
/// return the contours unchanged.
pub fn normalize_orientation(contours: Vec<Contour>) -> Vec<Contour> {
    if !needs_reversal(&contours) {
        return contours;
    }
    debug!(contours = contours.len(), "reversing glyph winding");
    contours.iter().map(reverse_contour).collect()
}

/// Traverse a contour the other way round.
pub fn reverse_contour(contour: &Contour) -> Contour {
    let segments = contour
        .segments()
        .iter()
        .rev()
        .map(|s| s.reversed())
        .collect();
    Contour::from_segments(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{parse_commands, split_paths};

    fn contours(d: &str) -> Vec<Contour> {
        split_paths(&parse_commands(d).unwrap()).unwrap()
    }

    const CCW_SQUARE: &str = "M 0 0 L 10 0 L 10 10 L 0 10 Z";
    const CW_SQUARE: &str = "M 0 0 L 0 10 L 10 10 L 10 0 Z";
    // Outer CW, counter CCW.
    const NESTED_CW: &str =
        "M 0 0 L 0 100 L 100 100 L 100 0 L 0 0 M 20 20 L 80 20 L 80 80 L 20 80 L 20 20 Z";

    #[test]
    fn ccw_square_has_positive_area() {
        assert_eq!(signed_area(&contours(CCW_SQUARE)[0]), 200);
        assert_eq!(signed_area(&contours(CW_SQUARE)[0]), -200);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let m: i32 = 2_000_000_000;
        let d = format!("M -{m} -{m} L {m} -{m} L {m} {m} L -{m} {m} Z");
        let square = contours(&d);
        let side = 2 * i128::from(m);
        assert_eq!(signed_area(&square[0]), 2 * side * side);
        assert!(normalize_orientation(square.clone()) == square);

        let cw = format!("M -{m} -{m} L -{m} {m} L {m} {m} L {m} -{m} Z");
        let cw = contours(&cw);
        assert_eq!(signed_area(&cw[0]), -2 * side * side);
        assert!(signed_area(&normalize_orientation(cw)[0]) > 0);
    }

    #[test]
    fn ccw_glyph_passes_through() {
        let input = contours(CCW_SQUARE);
        assert_eq!(normalize_orientation(input.clone()), input);
    }

    #[test]
    fn cw_glyph_is_reversed_and_stays_closed() {
        let output = normalize_orientation(contours(CW_SQUARE));
        assert!(signed_area(&output[0]) > 0);
        let segments = output[0].segments();
        for k in 0..segments.len() {
            assert_eq!(segments[k].end, segments[(k + 1) % segments.len()].start);
        }
    }

    #[test]
    fn every_contour_is_reversed_with_the_outer_one() {
        let input = contours(NESTED_CW);
        let output = normalize_orientation(input.clone());
        assert!(signed_area(&output[0]) > 0);
        assert!(signed_area(&output[1]) < 0);
        assert_eq!(output[0], reverse_contour(&input[0]));
        assert_eq!(output[1], reverse_contour(&input[1]));
    }

    #[test]
    fn normalization_is_idempotent() {
        for d in [CCW_SQUARE, CW_SQUARE, NESTED_CW] {
            let once = normalize_orientation(contours(d));
            let twice = normalize_orientation(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn reversing_twice_is_identity() {
        let contour = contours("M 0 0 Q 5 -5 10 0 L 10 10 L 0 10 Z").remove(0);
        assert_eq!(reverse_contour(&reverse_contour(&contour)), contour);
    }
}
