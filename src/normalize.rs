//! Baking rotation into freeform nodes
//!
//! Hosts without native rotated bounds cannot report where the corners of a
//! rotated shape are. For path-based shapes the rotation can be moved into the
//! node list instead: read every node on the canvas, zero the rotation, and
//! write the nodes back. Afterwards the unrotated box *is* the rotated box.

use crate::errors::Result;
use crate::handle::ShapeHandle;
use crate::options::GeometryOptions;
use crate::types::{Angle, Length, Point};

/// Why [`bake_rotation`] left a shape alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Unrotated,
    NativeRotatedBounds,
    Disabled,
    NotPathBased,
    NoNodes,
}

/// Outcome of [`bake_rotation`]
#[derive(Debug, Clone, PartialEq)]
pub enum Normalization {
    /// Rotation zeroed; nodes hold these on-canvas positions
    Baked { nodes: Vec<Point<Length>> },
    Skipped(SkipReason),
}

impl Normalization {
    pub fn is_baked(&self) -> bool {
        matches!(self, Normalization::Baked { .. })
    }
}

fn skip_reason(handle: &dyn ShapeHandle, options: &GeometryOptions) -> Result<Option<SkipReason>> {
    if handle.rotation()?.is_near(Angle::ZERO, options.angle_tolerance) {
        return Ok(Some(SkipReason::Unrotated));
    }
    if handle.supports_native_rotated_bounds() {
        return Ok(Some(SkipReason::NativeRotatedBounds));
    }
    if !options.bake_rotation {
        return Ok(Some(SkipReason::Disabled));
    }
    if !handle.kind()?.is_path_based() {
        return Ok(Some(SkipReason::NotPathBased));
    }
    if handle.node_count()? < 1 {
        return Ok(Some(SkipReason::NoNodes));
    }
    Ok(None)
}

/// Move a shape's rotation into its node coordinates.
///
/// Autoshapes are first forced into freeforms by inserting and removing a
/// throwaway node at index 1.
pub fn bake_rotation(handle: &mut dyn ShapeHandle, options: &GeometryOptions) -> Result<Normalization> {
    if let Some(reason) = skip_reason(handle, options)? {
        return Ok(Normalization::Skipped(reason));
    }

    if handle.kind()? == crate::handle::ShapeKind::AutoShape {
        let anchor = handle.node_position(0)?;
        handle.insert_line_node(1, anchor)?;
        handle.delete_node(1)?;
    }

    let count = handle.node_count()?;
    let nodes = (0..count)
        .map(|index| handle.node_position(index))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    crate::log::debug!(nodes = count, "baking rotation into freeform nodes");

    handle.set_rotation(Angle::ZERO)?;
    for (index, position) in nodes.iter().enumerate() {
        handle.set_node_position(index, *position)?;
    }

    Ok(Normalization::Baked { nodes })
}
