//! Shared geometry utilities.

use std::f64::consts::{PI, TAU};
use std::fmt;

use kurbo::Vec2;
use serde::{Serialize, Serializer};

use crate::error::BridgeError;

/// A point in font design units. Equality is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }

    /// Vector from `other` to `self`.
    pub fn sub(self, other: Point) -> Vec2 {
        self.to_vec2() - other.to_vec2()
    }

    /// Convert floating-point coordinates, rejecting anything that is not
    /// an exact integer in range.
    pub fn from_f64(x: f64, y: f64) -> Result<Self, BridgeError> {
        Ok(Self::new(integral(x)?, integral(y)?))
    }

    pub fn from_kurbo(p: kurbo::Point) -> Result<Self, BridgeError> {
        Self::from_f64(p.x, p.y)
    }
}

pub(crate) fn integral(value: f64) -> Result<i32, BridgeError> {
    if !value.is_finite() {
        return Err(BridgeError::InvalidPoint(format!("non-finite coordinate {value}")));
    }
    if value.fract() != 0.0 {
        return Err(BridgeError::InvalidPoint(format!("non-integral coordinate {value}")));
    }
    if value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(BridgeError::InvalidPoint(format!("coordinate {value} out of range")));
    }
    Ok(value as i32)
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

/// Wrap an angle into `[-π, π)`.
///
/// Angles already in range are returned untouched, so differences of
/// in-range angles compare exactly against thresholds.
pub fn wrap_angle(angle: f64) -> f64 {
    if (-PI..PI).contains(&angle) {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU itself.
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Serialize a `Vec2` as a bare `[x, y]` pair.
pub(crate) fn serialize_vec2_pair<S: Serializer>(
    vectors: &[Vec2; 2],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    [[vectors[0].x, vectors[0].y], [vectors[1].x, vectors[1].y]].serialize(serializer)
}
