//! The host shape contract.
//!
//! A host document (slide) owns its shapes; a [`ShapeHandle`] is a reference
//! into it. Position and size always describe the *unrotated* box, rotation is
//! applied around that box's center. Reads and writes are immediately visible.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::{Angle, Length, Point, Size};

/// Errors reported by the host for a single handle
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum HandleError {
    #[error("shape {name:?} was deleted from its slide")]
    #[diagnostic(
        code(slidegeom::handle::deleted),
        help("re-attach to a live shape; a deleted shape cannot be edited")
    )]
    Deleted { name: String },

    #[error("node index {index} out of range ({len} nodes)")]
    #[diagnostic(code(slidegeom::handle::node_out_of_range))]
    NodeOutOfRange { index: usize, len: usize },

    #[error("{kind:?} shapes do not support {operation}")]
    #[diagnostic(code(slidegeom::handle::unsupported))]
    Unsupported { kind: ShapeKind, operation: &'static str },
}

/// Host shape type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Parametric preset geometry (rectangle, oval, arrow, ...)
    AutoShape,
    /// Explicit path of nodes
    Freeform,
    Picture,
    TextBox,
    Line,
    Group,
    Other,
}

impl ShapeKind {
    /// Shapes whose outline is an editable node list
    pub fn is_path_based(self) -> bool {
        matches!(self, ShapeKind::AutoShape | ShapeKind::Freeform)
    }
}

/// Mirror axis for [`ShapeHandle::flip`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// A live reference to one shape in a host document
pub trait ShapeHandle {
    fn name(&self) -> Result<String, HandleError>;
    fn set_name(&mut self, name: &str) -> Result<(), HandleError>;

    /// Unrotated width
    fn width(&self) -> Result<Length, HandleError>;
    fn set_width(&mut self, width: Length) -> Result<(), HandleError>;

    /// Unrotated height
    fn height(&self) -> Result<Length, HandleError>;
    fn set_height(&mut self, height: Length) -> Result<(), HandleError>;

    /// Left edge of the unrotated box
    fn left(&self) -> Result<Length, HandleError>;
    fn set_left(&mut self, left: Length) -> Result<(), HandleError>;

    /// Top edge of the unrotated box
    fn top(&self) -> Result<Length, HandleError>;
    fn set_top(&mut self, top: Length) -> Result<(), HandleError>;

    /// Clockwise rotation around the box center
    fn rotation(&self) -> Result<Angle, HandleError>;
    fn set_rotation(&mut self, rotation: Angle) -> Result<(), HandleError>;

    fn lock_aspect_ratio(&self) -> Result<bool, HandleError>;
    fn set_lock_aspect_ratio(&mut self, locked: bool) -> Result<(), HandleError>;

    fn kind(&self) -> Result<ShapeKind, HandleError>;

    /// Number of path nodes (zero for shapes without a node list)
    fn node_count(&self) -> Result<usize, HandleError>;

    /// On-canvas position of a node, rotation applied
    fn node_position(&self, index: usize) -> Result<Point<Length>, HandleError>;

    /// Move a node to an on-canvas position
    fn set_node_position(&mut self, index: usize, position: Point<Length>) -> Result<(), HandleError>;

    /// Insert a straight-segment node so it ends up at `index`.
    ///
    /// Editing the nodes of an autoshape turns it into a freeform.
    fn insert_line_node(&mut self, index: usize, position: Point<Length>) -> Result<(), HandleError>;

    fn delete_node(&mut self, index: usize) -> Result<(), HandleError>;

    /// Native relative move of the unrotated box
    fn increment_left(&mut self, dx: Length) -> Result<(), HandleError>;
    fn increment_top(&mut self, dy: Length) -> Result<(), HandleError>;

    fn flip(&mut self, axis: FlipAxis) -> Result<(), HandleError>;

    /// Make this shape the document selection
    fn select(&mut self) -> Result<(), HandleError>;

    /// Remove the shape from its document; every handle to it becomes invalid
    fn delete(self) -> Result<(), HandleError>
    where
        Self: Sized;

    /// Ask the host for a copy of this shape
    fn duplicate(&self) -> Result<Self, HandleError>
    where
        Self: Sized;

    /// Hosts that report rotated bounds themselves need no node baking
    fn supports_native_rotated_bounds(&self) -> bool {
        false
    }

    fn size(&self) -> Result<Size<Length>, HandleError> {
        Ok(Size::new(self.width()?, self.height()?))
    }
}
