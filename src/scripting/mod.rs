//! 脚本系统
//!
//! 嵌入式Lua运行时及其生命周期管理。矩阵/向量绑定见 [`crate::bindings`]。

pub mod model;

pub use model::Model;
