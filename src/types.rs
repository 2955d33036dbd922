//! Lengths, angles and boxes in host units.
//!
//! Host units are points and rotation is clockwise degrees. Caller input is
//! checked once when it enters the crate (`try_new`); past that point values
//! are assumed finite.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::DVec2;

/// Why a caller-supplied number was refused
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
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

/// Length in host units (points)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        check_finite(val).map(Length)
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        let val = check_finite(val)?;
        if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Length(val))
        }
    }

    /// Get the absolute value
    #[inline]
    pub fn abs(self) -> Length {
        Length(self.0.abs())
    }

    #[inline]
    pub fn min(self, other: Length) -> Length {
        Length(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Ratio of two lengths, `None` if the divisor is zero
    #[inline]
    pub fn checked_ratio(self, rhs: Length) -> Option<f64> {
        if rhs.0 == 0.0 { None } else { Some(self.0 / rhs.0) }
    }

    /// Check if this length is finite (not NaN or infinite)
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length { Length(self.0 + rhs.0) }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length { Length(self.0 - rhs.0) }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}
impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length { Length(self.0 / rhs) }
}

// No `Length / Length`: scale factors go through `checked_ratio`, which
// refuses a zero-sized divisor.

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length { Length(-self.0) }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Angle in degrees, clockwise (host convention)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Create an Angle with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(degrees: f64) -> Result<Angle, NumericError> {
        check_finite(degrees).map(Angle)
    }

    /// Fold into `[0, 360)`.
    pub fn normalized(self) -> Angle {
        let folded = self.0.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs,
        // and keeps the sign of -0.0
        if folded >= 360.0 || folded == 0.0 { Angle(0.0) } else { Angle(folded) }
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// True if both angles land on the same direction within `tolerance` degrees
    pub fn is_near(self, other: Angle, tolerance: f64) -> bool {
        let diff = (self.normalized().0 - other.normalized().0).abs();
        diff <= tolerance || (360.0 - diff) <= tolerance
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Position on the slide (y grows downwards)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self { Point { x, y } }
}

impl Point<Length> {
    /// Point from raw coordinates
    pub fn pt(x: f64, y: f64) -> Self {
        Point { x: Length(x), y: Length(y) }
    }

    /// Calculate the midpoint between two points
    pub fn midpoint(self, other: Self) -> Self {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x.0, self.y.0)
    }
}

impl From<DVec2> for Point<Length> {
    fn from(v: DVec2) -> Self {
        Point::pt(v.x, v.y)
    }
}

/// Width and height
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl<T> Size<T> {
    pub fn new(w: T, h: T) -> Self { Size { w, h } }
}

impl Size<Length> {
    /// Same size with the axes exchanged
    pub fn swapped(self) -> Self {
        Size { w: self.h, h: self.w }
    }

    pub fn is_finite(self) -> bool {
        self.w.is_finite() && self.h.is_finite()
    }
}

/// Difference between two positions
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset<T> {
    pub dx: T,
    pub dy: T,
}

impl<T> Offset<T> {
    pub fn new(dx: T, dy: T) -> Self {
        Offset { dx, dy }
    }
}

impl Add<Offset<Length>> for Point<Length> {
    type Output = Point<Length>;
    fn add(self, rhs: Offset<Length>) -> Point<Length> {
        Point {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}

impl Sub<Point<Length>> for Point<Length> {
    type Output = Offset<Length>;
    fn sub(self, rhs: Point<Length>) -> Offset<Length> {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl BBox<Length> {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point { x: Length(f64::MAX), y: Length(f64::MAX) },
            max: Point { x: Length(f64::MIN), y: Length(f64::MIN) },
        }
    }

    /// Box with the given top-left corner and size
    pub fn from_origin_size(origin: Point<Length>, size: Size<Length>) -> Self {
        BBox {
            min: origin,
            max: Point { x: origin.x + size.w, y: origin.y + size.h },
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x.0 > self.max.x.0 || self.min.y.0 > self.max.y.0
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point<Length>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Smallest box containing both boxes
    pub fn union(mut self, other: &BBox<Length>) -> Self {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
        self
    }

    pub fn width(&self) -> Length { self.max.x - self.min.x }

    pub fn height(&self) -> Length { self.max.y - self.min.y }

    pub fn size(&self) -> Size<Length> {
        Size { w: self.width(), h: self.height() }
    }

    /// Get the center point
    pub fn center(&self) -> Point<Length> {
        self.min.midpoint(self.max)
    }
}

impl Default for BBox<Length> {
    fn default() -> Self {
        Self::new()
    }
}
