//! # linalg_script
//!
//! Lua bindings for fixed-size linear algebra (4x4 matrices, 4-component
//! vectors), with a thin display front-end.
//!
//! ## Features
//!
//! - **Tagged guest values**: every matrix/vector handed to Lua carries a fixed
//!   `__type` tag and is validated before any native code touches it
//! - **Alignment-safe marshaling**: guest bytes are copied into aligned `glam`
//!   values for every operation, and results are copied back out
//! - **Operator dispatch**: `matrix * matrix` and `matrix * vector` via `__mul`
//! - **Silent refusal**: malformed calls return nothing to Lua, while Rust code
//!   sees a typed [`core::BindingError`]
//!
//! ### Example
//!
//! ```no_run
//! use linalg_script::config::ScriptingConfig;
//! use linalg_script::scripting::Model;
//!
//! let model = Model::new(&ScriptingConfig::default())?;
//! let tag: String = model.eval("return (mat.identity() * vec.one()).__type")?;
//! assert_eq!(tag, "vector");
//! # Ok::<(), linalg_script::core::ScriptError>(())
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Entry point, errors
//! - [`config`]: Configuration loading
//! - [`math`]: Native matrix/vector operations
//! - [`bindings`]: Lua binding layer
//! - [`scripting`]: Lua runtime container
//! - [`platform`]: Display collaborator

/// Core functionality: entry point, error types and macros
pub mod core;
/// Configuration system
pub mod config;
/// Native linear algebra
pub mod math;
/// Lua bindings for matrices and vectors
pub mod bindings;
/// Embedded Lua runtime
pub mod scripting;
/// Platform abstraction for the display surface
pub mod platform;
