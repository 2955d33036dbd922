//! Aligning shapes by their rotated boxes

use crate::errors::Result;
use crate::handle::ShapeHandle;
use crate::shape::RotatedShape;
use crate::types::{BBox, Length};

/// Edge or center line to line shapes up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Union of the rotated boxes, `None` for no shapes
pub fn union_bounds<H: ShapeHandle>(shapes: &[RotatedShape<H>]) -> Option<BBox<Length>> {
    let bounds = shapes
        .iter()
        .fold(BBox::new(), |acc, shape| acc.union(&shape.bounds()));
    (!bounds.is_empty()).then_some(bounds)
}

/// Align every shape against the union of their rotated boxes
pub fn align<H: ShapeHandle>(shapes: &mut [RotatedShape<H>], alignment: Alignment) -> Result<()> {
    match union_bounds(shapes) {
        Some(reference) => align_to(shapes, alignment, &reference),
        None => Ok(()),
    }
}

/// Align every shape against a fixed reference box (e.g. the slide)
pub fn align_to<H: ShapeHandle>(
    shapes: &mut [RotatedShape<H>],
    alignment: Alignment,
    reference: &BBox<Length>,
) -> Result<()> {
    let center = reference.center();
    for shape in shapes.iter_mut() {
        let w = shape.absolute_width();
        let h = shape.absolute_height();
        match alignment {
            Alignment::Left => shape.set_left(reference.min.x.raw())?,
            Alignment::Center => shape.set_left((center.x - w / 2.0).raw())?,
            Alignment::Right => shape.set_left((reference.max.x - w).raw())?,
            Alignment::Top => shape.set_top(reference.min.y.raw())?,
            Alignment::Middle => shape.set_top((center.y - h / 2.0).raw())?,
            Alignment::Bottom => shape.set_top((reference.max.y - h).raw())?,
        }
    }
    crate::log::debug!(?alignment, count = shapes.len(), "aligned shapes");
    Ok(())
}
