pub mod basic;
mod scalar;
mod vec2;
mod vec3;
mod quat;
mod mat3x2;
mod mat4x4;
mod rect2;
mod line2;
pub mod poly2;
mod pos_scale;

pub use scalar::{FpClass, Scalar};
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use quat::{PosQuat, Quat};
pub use mat3x2::Mat3x2;
pub use mat4x4::Mat4x4;
pub use rect2::{rect2_intersects, Rect2};
pub use line2::{line_intersect, Line2};
pub use poly2::{
    convex_poly_contains_point, quad_approx_dims, quad_center, quad_expand, quad_interp,
    quad_penetration_depth, transform_points, try_quad_expand,
};
pub use pos_scale::PosScale;

/// Absolute tolerance for "effectively zero" in geometric predicates
pub const REAL_EPS: f64 = 1.0e-6;

/// When `1 - cos(angle)` drops to this, `Quat::slerp` falls back to linear interpolation
pub const SLERP_LINEAR_THRESHOLD: f64 = 1.0e-4;

/// Replacement magnitude for a near-zero determinant in `Mat4x4::invert`
pub const DEGENERATE_DETERMINANT: f64 = 1.0e-6;

pub type Vec2f = Vec2<f32>;
pub type Vec3f = Vec3<f32>;
pub type Quatf = Quat<f32>;
pub type Mat3x2f = Mat3x2<f32>;
pub type Mat4x4f = Mat4x4<f32>;
pub type Rect2f = Rect2<f32>;
pub type Line2f = Line2<f32>;
pub type PosScalef = PosScale<f32>;
