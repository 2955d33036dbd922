//! Tunables for rotated-shape geometry

use crate::errors::{GeometryError, Result};
use crate::types::NumericError;

/// Angles within this many degrees of a multiple of 90 count as that multiple
pub const DEFAULT_ANGLE_TOLERANCE: f64 = 1e-6;

/// Smallest `|cos φ|` / `|cos 2φ|` the inverse resize accepts
pub const DEFAULT_DEGENERATE_THRESHOLD: f64 = 1e-6;

pub const DEFAULT_DUPLICATE_SUFFIX: &str = "Copy";

/// Configuration carried by every [`RotatedShape`](crate::RotatedShape)
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryOptions {
    /// Degrees of slack when classifying 0/90/180/270
    pub angle_tolerance: f64,
    /// Guard for the inverse 2x2 solve
    pub degenerate_threshold: f64,
    /// Appended to the name of a duplicated shape
    pub duplicate_suffix: String,
    /// Bake rotation into freeform nodes on hosts without native rotated bounds
    pub bake_rotation: bool,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            angle_tolerance: DEFAULT_ANGLE_TOLERANCE,
            degenerate_threshold: DEFAULT_DEGENERATE_THRESHOLD,
            duplicate_suffix: DEFAULT_DUPLICATE_SUFFIX.to_string(),
            bake_rotation: true,
        }
    }
}

impl GeometryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_angle_tolerance(mut self, degrees: f64) -> Self {
        self.angle_tolerance = degrees;
        self
    }

    pub fn with_degenerate_threshold(mut self, threshold: f64) -> Self {
        self.degenerate_threshold = threshold;
        self
    }

    pub fn with_duplicate_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.duplicate_suffix = suffix.into();
        self
    }

    pub fn with_bake_rotation(mut self, bake: bool) -> Self {
        self.bake_rotation = bake;
        self
    }

    /// Reject tolerances that are NaN, infinite or negative
    pub fn validate(&self) -> Result<()> {
        check_tolerance(self.angle_tolerance).map_err(GeometryError::numeric("angle tolerance"))?;
        check_tolerance(self.degenerate_threshold)
            .map_err(GeometryError::numeric("degenerate threshold"))?;
        Ok(())
    }
}

fn check_tolerance(value: f64) -> std::result::Result<(), NumericError> {
    if value.is_nan() {
        Err(NumericError::NaN)
    } else if value.is_infinite() {
        Err(NumericError::Infinite)
    } else if value < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(())
    }
}
