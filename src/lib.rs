//! Affine geometry and rotation kernel.
//!
//! Value types for 2D/3D vectors, quaternions, 2D and 3D affine matrices,
//! rectangles, segments and convex quads, generic over a [`math::Scalar`].
//! Matrices are column-major with column vectors on the right, and their
//! storage can be handed to a graphics API as-is.

pub mod math;
pub mod config;

/// Re-export common types for easier usage
pub use crate::config::Tolerances;
pub use crate::math::{Mat3x2, Mat4x4, PosQuat, PosScale, Quat, Rect2, Scalar, Vec2, Vec3};

/// Error types for the checked operations
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MathError {
        #[error("Singular matrix: determinant is zero")]
        SingularMatrix,

        #[error("Zero scale has no inverse")]
        ZeroScale,

        #[error("Cannot normalize a zero-length or non-finite vector")]
        ZeroLength,

        #[error("Degenerate quad: offset edge {edge} does not meet its predecessor")]
        DegenerateQuad { edge: usize },
    }
}

pub use crate::error::MathError;

/// Result type for the checked `try_*` operations
pub type Result<T> = std::result::Result<T, error::MathError>;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
