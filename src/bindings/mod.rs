//! Language Binding Layer
//!
//! Exposes fixed-size linear algebra to Lua.
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Lua script:  mat.from{...} * vec.one()                     │
//! │       │                                                     │
//! │       v                                                     │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │  Dispatch Surface (__index / __mul, call adapter)   │   │
//! │  └───────────────────────┬─────────────────────────────┘   │
//! │                          │  BindingResult<T>                │
//! │                          v                                  │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │  Type Tag Protocol (GuestValue: Matrix | Vector)    │   │
//! │  └───────────────────────┬─────────────────────────────┘   │
//! │                          │                                  │
//! │                          v                                  │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │  Marshaling (unaligned bytes <-> aligned glam)      │   │
//! │  └───────────────────────┬─────────────────────────────┘   │
//! │                          │                                  │
//! │                          v                                  │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │  Native math (crate::math, glam)                    │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod dispatch;
pub mod marshal;
pub mod matrix;
pub mod protocol;
pub mod vector;
pub mod view;

#[cfg(test)]
mod property_tests;

pub use marshal::{from_matrix, from_vector, to_matrix, to_vector, NativeValue};
pub use matrix::MatrixBindings;
pub use protocol::{is_matrix, is_vector, GuestValue, ValueKind};
pub use vector::VectorBindings;
pub use view::{SharedDisplay, ViewBindings};
