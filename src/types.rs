//! Strongly-typed numeric primitives for plan layout (zero-cost newtypes).
//!
//! Design goals:
//! - No raw `f64` crossing module boundaries in domain logic
//! - Ground metres, plan centimetres, screen pixels and typographic points
//!   never mix without an explicit conversion
//! - `Position + Delta = Position`, `Position - Position = Delta`
//! - Clockwise and anti-clockwise angles are different types

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::{DVec2, dvec2};

use crate::defaults;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Validate a strictly positive, finite value (scales, page extents).
pub fn check_positive(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// A linear unit of measure backed by an `f64`.
pub trait Unit:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    fn from_raw(value: f64) -> Self;
    fn raw(self) -> f64;
}

macro_rules! linear_unit {
    ($(#[$meta:meta])* $name:ident, $suffix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        #[repr(transparent)]
        pub struct $name(pub f64);

        impl $name {
            pub const ZERO: $name = $name(0.0);

            /// Create a value with validation (rejects NaN/infinite)
            #[inline]
            pub fn try_new(val: f64) -> Result<$name, NumericError> {
                check_finite(val).map($name)
            }

            /// Create a strictly positive value with validation
            #[inline]
            pub fn try_positive(val: f64) -> Result<$name, NumericError> {
                check_positive(val).map($name)
            }

            /// Get the raw value (use sparingly, prefer typed operations)
            #[inline]
            pub fn raw(self) -> f64 {
                self.0
            }

            #[inline]
            pub fn abs(self) -> $name {
                $name(self.0.abs())
            }

            #[inline]
            pub fn min(self, other: $name) -> $name {
                $name(self.0.min(other.0))
            }

            #[inline]
            pub fn max(self, other: $name) -> $name {
                $name(self.0.max(other.0))
            }

            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl Unit for $name {
            #[inline]
            fn from_raw(value: f64) -> Self {
                $name(value)
            }

            #[inline]
            fn raw(self) -> f64 {
                self.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name { $name(self.0 + rhs.0) }
        }
        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name { $name(self.0 - rhs.0) }
        }
        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name { $name(self.0 * rhs) }
        }
        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name { $name(self.0 / rhs) }
        }
        impl Neg for $name {
            type Output = $name;
            fn neg(self) -> $name { $name(-self.0) }
        }
        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) { self.0 += rhs.0; }
        }
        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: $name) { self.0 -= rhs.0; }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", self.0, $suffix)
            }
        }
    };
}

linear_unit!(
    /// Real-world ground distance in metres
    Metres, "m"
);
linear_unit!(
    /// Distance on the printed plan in centimetres
    Cm, "cm"
);
linear_unit!(
    /// Screen distance in pixels
    Px, "px"
);
linear_unit!(
    /// Typographic points (1/72 inch), used for font sizes and label offsets
    Points, "pt"
);

impl Points {
    #[inline]
    pub fn to_cm(self) -> Cm {
        Cm(self.0 * defaults::CM_PER_POINT)
    }

    #[inline]
    pub fn from_cm(cm: Cm) -> Points {
        Points(cm.0 / defaults::CM_PER_POINT)
    }
}

/// Axis of the page, used when reporting overflow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Map any angle in degrees onto [0, 360). Non-finite input maps to 0.
pub fn normalize_degrees(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let r = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Angle in degrees measured clockwise from the positive x axis.
///
/// This is the legacy survey convention used for label anchor angles and
/// text rotation as stored in persisted records.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct BearingAngle(f64);

/// Angle in degrees measured anti-clockwise from the positive x axis
/// (standard mathematical convention).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct MathAngle(f64);

impl BearingAngle {
    pub const ZERO: BearingAngle = BearingAngle(0.0);

    pub fn degrees(deg: f64) -> Self {
        BearingAngle(normalize_degrees(deg))
    }

    pub fn as_degrees(self) -> f64 {
        self.0
    }

    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl MathAngle {
    pub const ZERO: MathAngle = MathAngle(0.0);

    pub fn degrees(deg: f64) -> Self {
        MathAngle(normalize_degrees(deg))
    }

    pub fn from_radians(rad: f64) -> Self {
        Self::degrees(rad.to_degrees())
    }

    pub fn as_degrees(self) -> f64 {
        self.0
    }

    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl From<BearingAngle> for MathAngle {
    fn from(b: BearingAngle) -> Self {
        MathAngle::degrees(-b.0)
    }
}

impl From<MathAngle> for BearingAngle {
    fn from(m: MathAngle) -> Self {
        BearingAngle::degrees(-m.0)
    }
}

impl fmt::Display for BearingAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° cw", self.0)
    }
}

impl fmt::Display for MathAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° ccw", self.0)
    }
}

/// Generic 2D position in some unit
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position<T> {
    pub x: T,
    pub y: T,
}

impl<T> Position<T> {
    pub const fn new(x: T, y: T) -> Self {
        Position { x, y }
    }
}

impl<U: Unit> Position<U> {
    pub fn from_raw(x: f64, y: f64) -> Self {
        Position { x: U::from_raw(x), y: U::from_raw(y) }
    }

    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x.raw(), self.y.raw())
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Self::from_raw(v.x, v.y)
    }

    /// Calculate the midpoint between two positions
    pub fn midpoint(self, other: Self) -> Self {
        Position {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.raw().is_finite() && self.y.raw().is_finite()
    }
}

/// A displacement vector (not an absolute position)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta<T> {
    pub dx: T,
    pub dy: T,
}

impl<T> Delta<T> {
    pub const fn new(dx: T, dy: T) -> Self {
        Delta { dx, dy }
    }
}

impl<U: Unit> Delta<U> {
    pub fn zero() -> Self {
        Self::from_raw(0.0, 0.0)
    }

    pub fn from_raw(dx: f64, dy: f64) -> Self {
        Delta { dx: U::from_raw(dx), dy: U::from_raw(dy) }
    }

    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.dx.raw(), self.dy.raw())
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Self::from_raw(v.x, v.y)
    }

    /// Euclidean length of the vector
    pub fn length(self) -> U {
        U::from_raw(self.dx.raw().hypot(self.dy.raw()))
    }

    pub fn is_zero(self) -> bool {
        self.dx.raw() == 0.0 && self.dy.raw() == 0.0
    }
}

/// Add a delta to a position to get a new position
impl<U: Unit> Add<Delta<U>> for Position<U> {
    type Output = Position<U>;
    fn add(self, rhs: Delta<U>) -> Position<U> {
        Position { x: self.x + rhs.dx, y: self.y + rhs.dy }
    }
}

impl<U: Unit> Sub<Delta<U>> for Position<U> {
    type Output = Position<U>;
    fn sub(self, rhs: Delta<U>) -> Position<U> {
        Position { x: self.x - rhs.dx, y: self.y - rhs.dy }
    }
}

/// Subtract two positions to get a delta
impl<U: Unit> Sub for Position<U> {
    type Output = Delta<U>;
    fn sub(self, rhs: Position<U>) -> Delta<U> {
        Delta { dx: self.x - rhs.x, dy: self.y - rhs.y }
    }
}

impl<U: Unit> Add for Delta<U> {
    type Output = Delta<U>;
    fn add(self, rhs: Delta<U>) -> Delta<U> {
        Delta { dx: self.dx + rhs.dx, dy: self.dy + rhs.dy }
    }
}

impl<U: Unit> Sub for Delta<U> {
    type Output = Delta<U>;
    fn sub(self, rhs: Delta<U>) -> Delta<U> {
        Delta { dx: self.dx - rhs.dx, dy: self.dy - rhs.dy }
    }
}

impl<U: Unit> Neg for Delta<U> {
    type Output = Delta<U>;
    fn neg(self) -> Delta<U> {
        Delta { dx: -self.dx, dy: -self.dy }
    }
}

impl<U: Unit> Mul<f64> for Delta<U> {
    type Output = Delta<U>;
    fn mul(self, rhs: f64) -> Delta<U> {
        Delta { dx: self.dx * rhs, dy: self.dy * rhs }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl<U: Unit> Size<U> {
    pub fn new(w: U, h: U) -> Self {
        Size { w, h }
    }

    pub fn zero() -> Self {
        Size { w: U::from_raw(0.0), h: U::from_raw(0.0) }
    }
}

/// Axis-aligned bounding box (min is the lower-left corner in y-up space)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox<T> {
    pub min: Position<T>,
    pub max: Position<T>,
}

impl<U: Unit> BBox<U> {
    /// Create an empty bounding box (will expand on first point)
    pub fn empty() -> Self {
        BBox {
            min: Position::from_raw(f64::MAX, f64::MAX),
            max: Position::from_raw(f64::MIN, f64::MIN),
        }
    }

    /// Bounding box of a rectangle defined by center and size
    pub fn around(center: Position<U>, size: Size<U>) -> Self {
        let half = Delta { dx: size.w / 2.0, dy: size.h / 2.0 };
        BBox { min: center - half, max: center + half }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Position<U>) {
        if p.x < self.min.x {
            self.min.x = p.x;
        }
        if p.y < self.min.y {
            self.min.y = p.y;
        }
        if p.x > self.max.x {
            self.max.x = p.x;
        }
        if p.y > self.max.y {
            self.max.y = p.y;
        }
    }

    pub fn width(&self) -> U {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> U {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Position<U> {
        self.min.midpoint(self.max)
    }

    pub fn translate(&self, delta: Delta<U>) -> Self {
        BBox { min: self.min + delta, max: self.max + delta }
    }
}

impl<U: Unit> FromIterator<Position<U>> for BBox<U> {
    fn from_iter<I: IntoIterator<Item = Position<U>>>(iter: I) -> Self {
        let mut bbox = BBox::empty();
        for p in iter {
            bbox.expand_point(p);
        }
        bbox
    }
}

/// Real-world coordinate (x east, y north) in metres
pub type GroundPosition = Position<Metres>;
/// Coordinate on the printed plan in centimetres (y up)
pub type PlanPosition = Position<Cm>;
/// Coordinate on screen in pixels (y down)
pub type PixelPosition = Position<Px>;
pub type PlanDelta = Delta<Cm>;
pub type PlanBox = BBox<Cm>;
