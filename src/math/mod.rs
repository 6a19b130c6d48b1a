//! Native math layer
//!
//! Fixed-size 4x4 matrix / 4-component vector algebra, backed by `glam`.
//! `glam::Mat4` and `glam::Vec4` use SIMD storage on supported targets and
//! carry a stricter alignment than bytes handed out by the Lua allocator, so
//! nothing in this module ever reads guest memory directly; see
//! [`crate::bindings::marshal`].

pub mod ops;

pub use glam::{Mat4, Vec4};
pub use ops::{MatrixOps, VectorOps};

/// Number of `f32` elements in a matrix.
pub const MATRIX_ELEMENTS: usize = 16;
/// Number of `f32` components in a vector.
pub const VECTOR_ELEMENTS: usize = 4;

/// Byte size of a native matrix.
pub const MATRIX_BYTES: usize = std::mem::size_of::<Mat4>();
/// Byte size of a native vector.
pub const VECTOR_BYTES: usize = std::mem::size_of::<Vec4>();
