//! 统一配置系统
//!
//! 提供TOML/JSON配置文件、环境变量覆盖和配置验证

use crate::impl_default;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod display;
pub mod scripting;

pub use display::DisplayConfig;
pub use scripting::ScriptingConfig;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "LINALG_SCRIPT_";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 主配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 显示配置
    #[serde(default)]
    pub display: DisplayConfig,

    /// 脚本配置
    #[serde(default)]
    pub scripting: ScriptingConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(format!("{}{}", ENV_PREFIX, key)).ok());
    }

    /// 使用任意查找函数覆盖配置，`key` 不含前缀
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // 显示配置
        if let Some(width) = lookup("DISPLAY_WIDTH").and_then(|v| v.parse().ok()) {
            self.display.width = width;
        }
        if let Some(height) = lookup("DISPLAY_HEIGHT").and_then(|v| v.parse().ok()) {
            self.display.height = height;
        }
        if let Some(vsync) = lookup("DISPLAY_VSYNC").and_then(|v| v.parse().ok()) {
            self.display.vsync = vsync;
        }

        // 脚本配置
        if let Some(entry) = lookup("ENTRY_SCRIPT") {
            self.scripting.entry_script = PathBuf::from(entry);
        }
        if let Some(limit) = lookup("MEMORY_LIMIT").and_then(|v| v.parse().ok()) {
            self.scripting.memory_limit = Some(limit);
        }

        // 日志配置
        if let Some(level) = lookup("LOG_LEVEL").and_then(|v| LogLevel::parse(&v)) {
            self.logging.level = level;
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.display.validate()?;
        self.scripting.validate()?;
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./config.toml
    /// 2. ./config.json
    /// 3. <用户配置目录>/linalg_script/config.toml
    /// 4. 使用默认配置
    ///
    /// 返回配置及其来源路径（默认配置时为 `None`）。此时日志系统通常尚未初始化，
    /// 由调用方在安装订阅者之后记录来源。
    pub fn load_or_default() -> (Self, Option<PathBuf>) {
        let mut candidates = vec![PathBuf::from("config.toml"), PathBuf::from("config.json")];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("linalg_script").join("config.toml"));
        }
        Self::load_first(&candidates)
    }

    /// 依次尝试候选路径，按扩展名选择JSON或TOML解析
    pub fn load_first(candidates: &[PathBuf]) -> (Self, Option<PathBuf>) {
        for path in candidates {
            let loaded = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => Self::from_json_file(path),
                _ => Self::from_toml_file(path),
            };
            if let Ok(config) = loaded {
                return (config, Some(path.clone()));
            }
        }
        (Self::default(), None)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,

    /// 是否输出到文件
    pub log_to_file: bool,

    /// 日志文件路径
    pub log_file_path: String,

    /// 是否输出到控制台
    pub log_to_console: bool,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    log_to_file: false,
    log_file_path: "linalg_script.log".to_string(),
    log_to_console: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    /// `EnvFilter` 指令字符串
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// 大小写不敏感地解析级别名
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}
