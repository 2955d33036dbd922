//! Crate-internal logging.
//!
//! `debug!` and `warn!` forward to `tracing` with the `tracing` feature.
//! Without it every call compiles away, arguments included.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

// Exported at the crate root so the names resolve as macros rather than
// clashing with the built-in `#[warn]` attribute.
#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
