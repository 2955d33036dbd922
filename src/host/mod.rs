//! Host implementations of [`ShapeHandle`](crate::ShapeHandle)

mod memory;

pub use memory::{MemoryShape, MemorySlide, ShapeId};
