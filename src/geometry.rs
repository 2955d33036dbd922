//! Rotated bounding-box math
//!
//! A shape is stored as an unrotated box plus a clockwise rotation about the
//! box center. These functions convert between that representation and the
//! axis-aligned box the rotated shape occupies on the canvas.

use crate::errors::{GeometryError, Result};
use crate::options::GeometryOptions;
use crate::types::{Angle, Length, Point, Size};

/// How a rotation acts on the extent of a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleClass {
    /// 0 or 180 degrees: extent unchanged
    Aligned,
    /// 90 or 270 degrees: width and height exchange
    Swapped,
    /// Anywhere else; `phi` is the first-quadrant equivalent in radians
    Oblique { phi: f64 },
}

/// Fold a rotation into its first-quadrant equivalent.
///
/// Within `tolerance` degrees of 0/180 the angle is [`AngleClass::Aligned`],
/// within `tolerance` of 90/270 it is [`AngleClass::Swapped`].
pub fn classify(angle: Angle, tolerance: f64) -> AngleClass {
    let theta = angle.normalized();
    let near = |target: f64| theta.is_near(Angle(target), tolerance);

    if near(0.0) || near(180.0) {
        return AngleClass::Aligned;
    }
    if near(90.0) || near(270.0) {
        return AngleClass::Swapped;
    }

    let deg = theta.degrees();
    let folded = if deg < 90.0 || (deg > 180.0 && deg < 270.0) {
        deg.rem_euclid(90.0)
    } else {
        (360.0 - deg).rem_euclid(90.0)
    };
    AngleClass::Oblique { phi: folded.to_radians() }
}

/// Width and height of the axis-aligned box enclosing `size` rotated by `angle`
pub fn rotated_extent(size: Size<Length>, angle: Angle, tolerance: f64) -> Size<Length> {
    match classify(angle, tolerance) {
        AngleClass::Aligned => size,
        AngleClass::Swapped => size.swapped(),
        AngleClass::Oblique { phi } => {
            let (sin, cos) = phi.sin_cos();
            Size {
                w: size.h * sin + size.w * cos,
                h: size.h * cos + size.w * sin,
            }
        }
    }
}

/// Top-left of the rotated box; both boxes share a center.
pub fn rotated_origin(origin: Point<Length>, size: Size<Length>, extent: Size<Length>) -> Point<Length> {
    Point {
        x: origin.x + size.w / 2.0 - extent.w / 2.0,
        y: origin.y + size.h / 2.0 - extent.h / 2.0,
    }
}

/// Inverse of [`rotated_origin`]: the unrotated top-left for a rotated top-left
pub fn unrotated_origin(rotated: Point<Length>, size: Size<Length>, extent: Size<Length>) -> Point<Length> {
    Point {
        x: rotated.x - size.w / 2.0 + extent.w / 2.0,
        y: rotated.y - size.h / 2.0 + extent.h / 2.0,
    }
}

/// Unrotated size whose rotated box at `angle` is `extent`.
///
/// Solves `aW = h·sinφ + w·cosφ`, `aH = h·cosφ + w·sinφ` for `w` and `h`.
/// The system's determinant is `cos 2φ`, so besides `cos φ ≈ 0` the solve
/// also breaks down at 45 degrees, where every rectangle has a square rotated
/// box. Both cases, and solutions with a negative side, are errors.
pub fn solve_unrotated_size(
    extent: Size<Length>,
    angle: Angle,
    options: &GeometryOptions,
) -> Result<Size<Length>> {
    let phi = match classify(angle, options.angle_tolerance) {
        AngleClass::Aligned => return Ok(extent),
        AngleClass::Swapped => return Ok(extent.swapped()),
        AngleClass::Oblique { phi } => phi,
    };

    let (sin, cos) = phi.sin_cos();
    if cos.abs() < options.degenerate_threshold {
        crate::log::warn!(angle = angle.degrees(), "inverse resize rejected: cos(phi) ~ 0");
        return Err(GeometryError::DegenerateAngle {
            angle,
            reason: "cos(phi) is zero",
        });
    }
    if (2.0 * phi).cos().abs() < options.degenerate_threshold {
        crate::log::warn!(angle = angle.degrees(), "inverse resize rejected: phi ~ 45");
        return Err(GeometryError::DegenerateAngle {
            angle,
            reason: "rotated width and height are locked together at 45 degrees",
        });
    }

    let ratio = sin / cos;
    let height = (extent.w * ratio - extent.h) / (sin * ratio - cos);
    let width = (extent.w - height * sin) / cos;
    let size = Size::new(width, height);

    if !size.is_finite() || width.raw() < 0.0 || height.raw() < 0.0 {
        return Err(GeometryError::UnreachableExtent { width, height, angle });
    }
    Ok(size)
}
