//! Error types with diagnostic codes using miette
//!
//! Every failure is reported to the caller; nothing in this crate aborts the
//! host process.

use miette::Diagnostic;
use thiserror::Error;

use crate::handle::HandleError;
use crate::types::{Angle, Length, NumericError};

/// Result alias used throughout the crate
pub type Result<T, E = GeometryError> = std::result::Result<T, E>;

/// Errors raised while reading or mutating a rotated shape
#[derive(Error, Diagnostic, Debug)]
pub enum GeometryError {
    #[error("rotation {angle} is degenerate for an inverse resize: {reason}")]
    #[diagnostic(
        code(slidegeom::geometry::degenerate_angle),
        help("resize the unrotated width/height instead, or rotate the shape away from this angle first")
    )]
    DegenerateAngle { angle: Angle, reason: &'static str },

    #[error("no {width} x {height} rectangle has this rotated box at {angle}")]
    #[diagnostic(
        code(slidegeom::geometry::unreachable_extent),
        help("the requested rotated width and height are too far apart for this rotation")
    )]
    UnreachableExtent { width: Length, height: Length, angle: Angle },

    #[error("cannot scale a shape with no rotated {axis} to {target}")]
    #[diagnostic(
        code(slidegeom::fit::zero_extent),
        help("give the shape a non-zero size before fitting it with a locked aspect ratio")
    )]
    ZeroExtent { axis: &'static str, target: Length },

    #[error("invalid {what}: {source}")]
    #[diagnostic(code(slidegeom::invalid_numeric))]
    InvalidNumeric {
        what: &'static str,
        #[source]
        source: NumericError,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Handle(#[from] HandleError),
}

impl GeometryError {
    pub(crate) fn numeric(what: &'static str) -> impl FnOnce(NumericError) -> GeometryError {
        move |source| GeometryError::InvalidNumeric { what, source }
    }

    /// True if the underlying shape no longer exists in its document
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, GeometryError::Handle(HandleError::Deleted { .. }))
    }
}
