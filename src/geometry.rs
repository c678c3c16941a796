//! Position algebra: polar offsets, rotation about a pivot, precision rounding.
//!
//! Label anchor offsets are polar pairs in the clockwise [`BearingAngle`]
//! convention. Rotations derived from line geometry are computed as
//! anti-clockwise [`MathAngle`]s and converted explicitly at the boundary.

use glam::DVec2;

use crate::defaults;
use crate::types::{BearingAngle, Delta, MathAngle, PlanPosition, Position, Unit};

/// Offset vector for a polar (angle, radius) pair in the clockwise convention.
///
/// In y-up plan space a positive bearing turns the offset below the x axis:
/// 90° points straight down the page.
pub fn delta_from_polar<U: Unit>(angle: BearingAngle, radius: U) -> Delta<U> {
    let theta = MathAngle::from(angle).to_radians();
    Delta::from_dvec2(DVec2::from_angle(theta) * radius.raw())
}

/// Like [`delta_from_polar`] but for optional persisted fields.
///
/// A missing angle or radius, or a non-finite radius, yields a zero delta.
pub fn polar_delta<U: Unit>(angle: Option<BearingAngle>, radius: Option<U>) -> Delta<U> {
    match (angle, radius) {
        (Some(angle), Some(radius)) if radius.raw().is_finite() => delta_from_polar(angle, radius),
        _ => Delta::zero(),
    }
}

/// Clockwise angle of a delta in [0, 360). A zero-length delta has angle 0.
pub fn angle_of_delta<U: Unit>(delta: Delta<U>) -> BearingAngle {
    if delta.is_zero() {
        return BearingAngle::ZERO;
    }
    let v = delta.to_dvec2();
    BearingAngle::from(MathAngle::from_radians(v.y.atan2(v.x)))
}

/// Anti-clockwise direction of the segment from `start` to `end`.
pub fn direction_of<U: Unit>(start: Position<U>, end: Position<U>) -> MathAngle {
    let v = (end - start).to_dvec2();
    if v == DVec2::ZERO {
        MathAngle::ZERO
    } else {
        MathAngle::from_radians(v.y.atan2(v.x))
    }
}

/// Rotate `point` anti-clockwise about `pivot`.
pub fn rotate_about_pivot<U: Unit>(
    point: Position<U>,
    pivot: Position<U>,
    angle: MathAngle,
) -> Position<U> {
    let rotated = DVec2::from_angle(angle.to_radians()).rotate((point - pivot).to_dvec2());
    pivot + Delta::from_dvec2(rotated)
}

/// Text rotation for a label that runs along a line.
///
/// The line direction is taken anti-clockwise, converted to the clockwise
/// convention used by label records, then flipped by 180° when the text
/// would otherwise read upside down.
pub fn text_rotation_along(start: PlanPosition, end: PlanPosition) -> BearingAngle {
    let bearing = BearingAngle::from(direction_of(start, end));
    let deg = bearing.as_degrees();
    if (90.0..270.0).contains(&deg) {
        BearingAngle::degrees(deg + 180.0)
    } else {
        bearing
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to the precision used for persisted coordinates, offsets and angles.
pub fn round_persisted(value: f64) -> f64 {
    round_to(value, defaults::PERSISTED_DECIMALS)
}
