//! Rotated-box view of a host shape
//!
//! [`RotatedShape`] caches the axis-aligned box a shape occupies after its
//! rotation is applied and lets callers read and edit the shape in terms of
//! that box. Writes are translated back to the unrotated `left`/`top`/
//! `width`/`height` the host stores.

use crate::anchor::Anchor;
use crate::errors::{GeometryError, Result};
use crate::fit::{FitToDimension, Fitter};
use crate::geometry::{rotated_extent, rotated_origin, solve_unrotated_size, unrotated_origin};
use crate::handle::{FlipAxis, ShapeHandle};
use crate::normalize::{Normalization, bake_rotation};
use crate::options::GeometryOptions;
use crate::types::{Angle, BBox, Length, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Width,
    Height,
}

/// A shape handle plus its cached rotated bounding box.
///
/// Invariant: after every successful call, `left`/`top`/`absolute_width`/
/// `absolute_height` describe the box derived from the handle's current
/// state. If the host changes the shape behind our back, call
/// [`refresh`](Self::refresh).
#[derive(Debug)]
pub struct RotatedShape<H: ShapeHandle> {
    handle: H,
    fitter: Fitter,
    options: GeometryOptions,
    /// Width/height of the rotated box
    extent: Size<Length>,
    /// Top-left of the rotated box
    origin: Point<Length>,
    normalization: Normalization,
}

fn length(what: &'static str, value: f64) -> Result<Length> {
    Length::try_new(value).map_err(GeometryError::numeric(what))
}

fn non_negative(what: &'static str, value: f64) -> Result<Length> {
    Length::try_non_negative(value).map_err(GeometryError::numeric(what))
}

impl<H: ShapeHandle> RotatedShape<H> {
    /// Attach with the default fitter and options
    pub fn attach(handle: H) -> Result<Self> {
        Self::attach_with(handle, Fitter::default(), GeometryOptions::default())
    }

    /// Attach to a shape: bake its rotation into freeform nodes where the
    /// host needs that, then compute the rotated box.
    pub fn attach_with(mut handle: H, fitter: Fitter, options: GeometryOptions) -> Result<Self> {
        options.validate()?;
        let normalization = bake_rotation(&mut handle, &options)?;
        let mut shape = Self {
            handle,
            fitter,
            options,
            extent: Size::default(),
            origin: Point::default(),
            normalization,
        };
        shape.refresh()?;
        Ok(shape)
    }

    /// Recompute the rotated box from the handle
    pub fn refresh(&mut self) -> Result<()> {
        let size = self.handle.size()?;
        let rotation = self.handle.rotation()?;
        let unrotated = Point::new(self.handle.left()?, self.handle.top()?);

        self.extent = rotated_extent(size, rotation, self.options.angle_tolerance);
        self.origin = rotated_origin(unrotated, size, self.extent);
        Ok(())
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn into_handle(self) -> H {
        self.handle
    }

    pub fn options(&self) -> &GeometryOptions {
        &self.options
    }

    /// What the last attach or rotation did to the node list
    pub fn normalization(&self) -> &Normalization {
        &self.normalization
    }

    // ------------------------------------------------------------------
    // Host values
    // ------------------------------------------------------------------

    pub fn name(&self) -> Result<String> {
        Ok(self.handle.name()?)
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        Ok(self.handle.set_name(name)?)
    }

    /// Unrotated width
    pub fn width(&self) -> Result<Length> {
        Ok(self.handle.width()?)
    }

    /// Unrotated height
    pub fn height(&self) -> Result<Length> {
        Ok(self.handle.height()?)
    }

    pub fn rotation(&self) -> Result<Angle> {
        Ok(self.handle.rotation()?)
    }

    // ------------------------------------------------------------------
    // Rotated box
    // ------------------------------------------------------------------

    pub fn absolute_width(&self) -> Length {
        self.extent.w
    }

    pub fn absolute_height(&self) -> Length {
        self.extent.h
    }

    /// Left edge of the rotated box
    pub fn left(&self) -> Length {
        self.origin.x
    }

    /// Top edge of the rotated box
    pub fn top(&self) -> Length {
        self.origin.y
    }

    pub fn bounds(&self) -> BBox<Length> {
        BBox::from_origin_size(self.origin, self.extent)
    }

    pub fn anchor(&self, anchor: Anchor) -> Point<Length> {
        anchor.point_in(&self.bounds())
    }

    pub fn top_left(&self) -> Point<Length> {
        self.anchor(Anchor::TopLeft)
    }

    pub fn top_center(&self) -> Point<Length> {
        self.anchor(Anchor::TopCenter)
    }

    pub fn top_right(&self) -> Point<Length> {
        self.anchor(Anchor::TopRight)
    }

    pub fn middle_left(&self) -> Point<Length> {
        self.anchor(Anchor::MiddleLeft)
    }

    pub fn center(&self) -> Point<Length> {
        self.anchor(Anchor::Center)
    }

    pub fn middle_right(&self) -> Point<Length> {
        self.anchor(Anchor::MiddleRight)
    }

    pub fn bottom_left(&self) -> Point<Length> {
        self.anchor(Anchor::BottomLeft)
    }

    pub fn bottom_center(&self) -> Point<Length> {
        self.anchor(Anchor::BottomCenter)
    }

    pub fn bottom_right(&self) -> Point<Length> {
        self.anchor(Anchor::BottomRight)
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Set the unrotated width
    pub fn set_width(&mut self, width: f64) -> Result<()> {
        let width = non_negative("width", width)?;
        self.handle.set_width(width)?;
        self.refresh()
    }

    /// Set the unrotated height
    pub fn set_height(&mut self, height: f64) -> Result<()> {
        let height = non_negative("height", height)?;
        self.handle.set_height(height)?;
        self.refresh()
    }

    /// Rotate about the center; path-based shapes are re-baked
    pub fn set_rotation(&mut self, degrees: f64) -> Result<()> {
        let rotation = Angle::try_new(degrees).map_err(GeometryError::numeric("rotation"))?;
        self.handle.set_rotation(rotation)?;
        self.normalization = bake_rotation(&mut self.handle, &self.options)?;
        self.refresh()
    }

    /// Resize so the rotated box is `width` wide
    pub fn set_absolute_width(&mut self, width: f64) -> Result<()> {
        let width = non_negative("absolute width", width)?;
        self.resize_rotated(Size::new(width, self.extent.h), Axis::Width)
    }

    /// Resize so the rotated box is `height` tall
    pub fn set_absolute_height(&mut self, height: f64) -> Result<()> {
        let height = non_negative("absolute height", height)?;
        self.resize_rotated(Size::new(self.extent.w, height), Axis::Height)
    }

    fn resize_rotated(&mut self, target: Size<Length>, axis: Axis) -> Result<()> {
        if self.handle.lock_aspect_ratio()? {
            let left = self.handle.left()?;
            let top = self.handle.top()?;

            self.handle.set_lock_aspect_ratio(false)?;
            crate::log::debug!(?axis, w = target.w.raw(), h = target.h.raw(), "fitting locked shape");
            let fitted = match axis {
                Axis::Width => self.fitter.fit_to_width(&mut self.handle, target, &self.options),
                Axis::Height => self.fitter.fit_to_height(&mut self.handle, target, &self.options),
            };
            self.handle.set_lock_aspect_ratio(true)?;
            fitted?;

            // The fitter may move the shape; only the size should change
            self.handle.set_left(left)?;
            self.handle.set_top(top)?;
        } else {
            let size = solve_unrotated_size(target, self.handle.rotation()?, &self.options)?;
            self.handle.set_width(size.w)?;
            self.handle.set_height(size.h)?;
        }
        self.refresh()
    }

    /// Move so the rotated box's left edge is at `left`
    pub fn set_left(&mut self, left: f64) -> Result<()> {
        let left = length("left", left)?;
        let size = self.handle.size()?;
        let target = Point::new(left, self.origin.y);
        self.handle.set_left(unrotated_origin(target, size, self.extent).x)?;
        self.refresh()
    }

    /// Move so the rotated box's top edge is at `top`
    pub fn set_top(&mut self, top: f64) -> Result<()> {
        let top = length("top", top)?;
        let size = self.handle.size()?;
        let target = Point::new(self.origin.x, top);
        self.handle.set_top(unrotated_origin(target, size, self.extent).y)?;
        self.refresh()
    }

    /// Native relative move, then re-derive from the host
    pub fn increment_left(&mut self, dx: f64) -> Result<()> {
        let dx = length("left increment", dx)?;
        self.handle.increment_left(dx)?;
        self.refresh()
    }

    pub fn increment_top(&mut self, dy: f64) -> Result<()> {
        let dy = length("top increment", dy)?;
        self.handle.increment_top(dy)?;
        self.refresh()
    }

    pub fn flip(&mut self, axis: FlipAxis) -> Result<()> {
        self.handle.flip(axis)?;
        self.refresh()
    }

    pub fn select(&mut self) -> Result<()> {
        Ok(self.handle.select()?)
    }

    /// Remove the shape from its document
    pub fn delete(self) -> Result<()> {
        Ok(self.handle.delete()?)
    }

    /// Copy the shape; the copy is attached afresh and renamed with the
    /// configured suffix.
    pub fn duplicate(&self) -> Result<Self> {
        let name = self.handle.name()?;
        let copy = self.handle.duplicate()?;
        let mut copy = Self::attach_with(copy, self.fitter, self.options.clone())?;
        copy.set_name(&format!("{name}{}", self.options.duplicate_suffix))?;
        Ok(copy)
    }
}
