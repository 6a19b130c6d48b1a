//! 核心模块
//!
//! 包含crate的核心功能：
//! - `engine` - 命令行入口和运行流程
//! - `error` - 错误类型定义
//! - `macros` - 配置结构体使用的宏

pub mod engine;
pub mod error;
#[macro_use]
pub mod macros;

// 重新导出错误类型
pub use error::{
    BindingError, BindingResult, DisplayError, DisplayResult, EngineError, EngineResult,
    ScriptError, ScriptResult,
};

// 重新导出主要类型
pub use engine::Engine;
