#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Tolerances for the approximate checks in the kernel
///
/// Values are `f64` and converted to the working scalar at the call site.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Tolerances {
    /// Allowed deviation of frame column lengths and dot products in an orthonormal check
    pub orthonormal: f64,

    /// Allowed deviation of a squared length from 1 for a "unit" quaternion or vector
    pub unit_length: f64,
}

impl Tolerances {
    /// Scales every tolerance by `factor`, e.g. to loosen checks for `f32` pipelines
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            orthonormal: self.orthonormal * factor,
            unit_length: self.unit_length * factor,
        }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            orthonormal: 1.0e-4,
            unit_length: 1.0e-4,
        }
    }
}
