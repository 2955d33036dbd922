//! Aspect-preserving resize to a rotated-box dimension
//!
//! Used by [`RotatedShape`](crate::RotatedShape) when a shape's aspect ratio
//! is locked: the rotated box can then only be resized along one axis, the
//! other follows.

use enum_dispatch::enum_dispatch;

use crate::errors::{GeometryError, Result};
use crate::geometry::rotated_extent;
use crate::handle::ShapeHandle;
use crate::options::GeometryOptions;
use crate::types::{Length, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Width,
    Height,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }
}

/// Scales a shape uniformly so its rotated box matches a target dimension.
///
/// The rotated box is measured with `options.angle_tolerance`, the same
/// classification [`RotatedShape`](crate::RotatedShape) caches. A shape whose
/// rotated box is empty along the fitted axis cannot be scaled to a non-zero
/// target and yields [`GeometryError::ZeroExtent`]; a zero target on such a
/// shape is a no-op.
#[enum_dispatch]
pub trait FitToDimension {
    /// Make the rotated width equal `target.w`, preserving the aspect ratio
    fn fit_to_width(
        &self,
        shape: &mut dyn ShapeHandle,
        target: Size<Length>,
        options: &GeometryOptions,
    ) -> Result<()>;

    /// Make the rotated height equal `target.h`, preserving the aspect ratio
    fn fit_to_height(
        &self,
        shape: &mut dyn ShapeHandle,
        target: Size<Length>,
        options: &GeometryOptions,
    ) -> Result<()>;
}

/// Uniform scale that brings the rotated box to `target` along `axis`.
/// `None` when both the box and the target are empty on that axis.
fn scale_factor(
    shape: &dyn ShapeHandle,
    target: Size<Length>,
    axis: Axis,
    options: &GeometryOptions,
) -> Result<Option<f64>> {
    let extent = rotated_extent(shape.size()?, shape.rotation()?, options.angle_tolerance);
    let (wanted, current) = match axis {
        Axis::Width => (target.w, extent.w),
        Axis::Height => (target.h, extent.h),
    };
    match wanted.checked_ratio(current).filter(|f| f.is_finite()) {
        Some(factor) => Ok(Some(factor)),
        None if wanted == Length::ZERO => Ok(None),
        None => Err(GeometryError::ZeroExtent {
            axis: axis.name(),
            target: wanted,
        }),
    }
}

fn scale(shape: &mut dyn ShapeHandle, factor: f64) -> Result<Size<Length>> {
    let before = shape.size()?;
    let after = Size::new(before.w * factor, before.h * factor);
    shape.set_width(after.w)?;
    shape.set_height(after.h)?;
    Ok(after)
}

/// Scales about the shape's center; `left`/`top` move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CenteredFit;

impl CenteredFit {
    fn fit(
        shape: &mut dyn ShapeHandle,
        target: Size<Length>,
        axis: Axis,
        options: &GeometryOptions,
    ) -> Result<()> {
        let Some(factor) = scale_factor(shape, target, axis, options)? else {
            return Ok(());
        };
        let before = shape.size()?;
        let center_x = shape.left()? + before.w / 2.0;
        let center_y = shape.top()? + before.h / 2.0;

        let after = scale(shape, factor)?;
        shape.set_left(center_x - after.w / 2.0)?;
        shape.set_top(center_y - after.h / 2.0)?;
        Ok(())
    }
}

impl FitToDimension for CenteredFit {
    fn fit_to_width(
        &self,
        shape: &mut dyn ShapeHandle,
        target: Size<Length>,
        options: &GeometryOptions,
    ) -> Result<()> {
        Self::fit(shape, target, Axis::Width, options)
    }

    fn fit_to_height(
        &self,
        shape: &mut dyn ShapeHandle,
        target: Size<Length>,
        options: &GeometryOptions,
    ) -> Result<()> {
        Self::fit(shape, target, Axis::Height, options)
    }
}

/// Scales away from the unrotated top-left corner, which stays put
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnchoredFit;

impl AnchoredFit {
    fn fit(
        shape: &mut dyn ShapeHandle,
        target: Size<Length>,
        axis: Axis,
        options: &GeometryOptions,
    ) -> Result<()> {
        if let Some(factor) = scale_factor(shape, target, axis, options)? {
            scale(shape, factor)?;
        }
        Ok(())
    }
}

impl FitToDimension for AnchoredFit {
    fn fit_to_width(
        &self,
        shape: &mut dyn ShapeHandle,
        target: Size<Length>,
        options: &GeometryOptions,
    ) -> Result<()> {
        Self::fit(shape, target, Axis::Width, options)
    }

    fn fit_to_height(
        &self,
        shape: &mut dyn ShapeHandle,
        target: Size<Length>,
        options: &GeometryOptions,
    ) -> Result<()> {
        Self::fit(shape, target, Axis::Height, options)
    }
}

/// Fit strategy chosen per shape
#[enum_dispatch(FitToDimension)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fitter {
    CenteredFit,
    AnchoredFit,
}

impl Default for Fitter {
    fn default() -> Self {
        Fitter::CenteredFit(CenteredFit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::ShapeKind;
    use crate::host::MemorySlide;
    use crate::types::Angle;

    fn target(w: f64, h: f64) -> Size<Length> {
        Size::new(Length(w), Length(h))
    }

    fn defaults() -> GeometryOptions {
        GeometryOptions::default()
    }

    #[test]
    fn centered_fit_keeps_center() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::Picture, 10.0, 20.0, 100.0, 50.0);

        Fitter::default().fit_to_width(&mut shape, target(200.0, 0.0), &defaults()).unwrap();

        assert_eq!(shape.width().unwrap(), Length(200.0));
        assert_eq!(shape.height().unwrap(), Length(100.0));
        assert_eq!(shape.left().unwrap(), Length(-40.0));
        assert_eq!(shape.top().unwrap(), Length(-5.0));
    }

    #[test]
    fn anchored_fit_keeps_top_left() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::Picture, 10.0, 20.0, 100.0, 50.0);

        Fitter::from(AnchoredFit).fit_to_height(&mut shape, target(0.0, 25.0), &defaults()).unwrap();

        assert_eq!(shape.width().unwrap(), Length(50.0));
        assert_eq!(shape.height().unwrap(), Length(25.0));
        assert_eq!(shape.left().unwrap(), Length(10.0));
        assert_eq!(shape.top().unwrap(), Length(20.0));
    }

    #[test]
    fn fit_measures_the_rotated_box() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::Picture, 0.0, 0.0, 100.0, 50.0);
        shape.set_rotation(Angle(90.0)).unwrap();

        // Rotated width is the unrotated height here
        Fitter::default().fit_to_width(&mut shape, target(100.0, 0.0), &defaults()).unwrap();

        assert_eq!(shape.width().unwrap(), Length(200.0));
        assert_eq!(shape.height().unwrap(), Length(100.0));
    }

    #[test]
    fn fit_uses_the_configured_tolerance() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::Picture, 0.0, 0.0, 100.0, 50.0);
        shape.set_rotation(Angle(90.2)).unwrap();
        let options = GeometryOptions::default().with_angle_tolerance(0.5);

        // 90.2 counts as a quarter turn, so the rotated width is exactly 50
        Fitter::default().fit_to_width(&mut shape, target(25.0, 0.0), &options).unwrap();

        assert_eq!(shape.width().unwrap(), Length(50.0));
        assert_eq!(shape.height().unwrap(), Length(25.0));
    }

    #[test]
    fn zero_sized_shape_cannot_grow() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::Picture, 0.0, 0.0, 0.0, 0.0);

        let err = Fitter::default()
            .fit_to_width(&mut shape, target(100.0, 0.0), &defaults())
            .unwrap_err();

        assert!(matches!(err, GeometryError::ZeroExtent { axis: "width", .. }));
        assert_eq!(shape.width().unwrap(), Length::ZERO);
    }

    #[test]
    fn zero_target_on_zero_sized_shape_is_a_no_op() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::Picture, 5.0, 5.0, 0.0, 0.0);

        Fitter::from(AnchoredFit).fit_to_height(&mut shape, target(0.0, 0.0), &defaults()).unwrap();

        assert_eq!(shape.height().unwrap(), Length::ZERO);
        assert_eq!(shape.left().unwrap(), Length(5.0));
    }
}
