//! Rotated-bounding-box geometry for presentation shapes.
//!
//! Presentation hosts report a shape's `left`/`top`/`width`/`height` for the
//! box *before* rotation. Anything that aligns, centers or resizes shapes
//! visually needs the box the rotated shape actually covers. [`RotatedShape`]
//! wraps a [`ShapeHandle`], keeps that rotated box cached, exposes its anchor
//! points, and accepts edits in rotated-box terms.
//!
//! ```
//! use slidegeom::{Angle, Length, RotatedShape, ShapeHandle, ShapeKind};
//! use slidegeom::host::MemorySlide;
//!
//! let slide = MemorySlide::new();
//! let mut picture = slide.add_shape(ShapeKind::Picture, 10.0, 20.0, 100.0, 50.0);
//! picture.set_rotation(Angle(90.0))?;
//!
//! let mut shape = RotatedShape::attach(picture)?;
//! assert_eq!(shape.absolute_width(), Length(50.0));
//! assert_eq!(shape.left(), Length(35.0));
//!
//! shape.set_left(0.0)?;
//! assert_eq!(shape.handle().left()?, Length(-25.0));
//! # Ok::<(), slidegeom::GeometryError>(())
//! ```

pub mod align;
pub mod anchor;
pub mod errors;
pub mod fit;
pub mod geometry;
pub mod handle;
pub mod host;
mod log;
pub mod normalize;
pub mod options;
pub mod shape;
pub mod types;

pub use align::{Alignment, align, align_to, union_bounds};
pub use anchor::Anchor;
pub use errors::{GeometryError, Result};
pub use fit::{AnchoredFit, CenteredFit, FitToDimension, Fitter};
pub use handle::{FlipAxis, HandleError, ShapeHandle, ShapeKind};
pub use normalize::{Normalization, SkipReason};
pub use options::GeometryOptions;
pub use shape::RotatedShape;
pub use types::{Angle, BBox, Length, NumericError, Offset, Point, Size};
