//! 统一错误处理模块
//!
//! 提供整个crate的错误类型定义
//!
//! ## 错误类型分层
//!
//! - **基础设施层错误**: `EngineError`, `ScriptError`, `DisplayError`（初始化、脚本运行时、显示等）
//! - **绑定层拒绝**: `BindingError`，描述一次矩阵/向量操作为何没有产生结果。
//!   脚本侧只会看到"没有返回值"，而Rust侧保留结构化的原因。

use crate::bindings::protocol::ValueKind;
use crate::config::ConfigError;
use thiserror::Error;

/// 引擎核心错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Initialization error: {0}")]
    Init(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 脚本系统错误
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Lua error: {0}")]
    Lua(#[from] mlua::Error),

    #[error("Script not found: {0}")]
    NotFound(String),

    #[error("Script runtime error: {0}")]
    Runtime(String),
}

/// 显示层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DisplayError {
    #[error("Invalid display size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Display has been closed")]
    Closed,
}

/// Why a matrix/vector operation declined to produce a result.
///
/// The guest never sees these: the call adapter turns every `Err` into zero
/// return values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    #[error("expected {expected} argument(s), got {found}")]
    Arity { expected: usize, found: usize },

    #[error("argument #{position} is not a {expected}, found {found}")]
    WrongKind {
        position: usize,
        expected: ValueKind,
        found: &'static str,
    },

    #[error("expected a sequence table, found {found}")]
    NotASequence { found: &'static str },

    #[error("sequence has {found} elements, expected {expected}")]
    SequenceLength { expected: usize, found: usize },

    #[error("sequence element #{index} is not a number")]
    NonNumeric { index: usize },

    #[error("argument #{position} has an unsupported kind: {found}")]
    UnsupportedOperand { position: usize, found: &'static str },
}

/// 引擎结果类型别名
pub type EngineResult<T> = Result<T, EngineError>;
pub type ScriptResult<T> = Result<T, ScriptError>;
pub type DisplayResult<T> = Result<T, DisplayError>;
pub type BindingResult<T> = Result<T, BindingError>;
