//! 脚本配置

use super::{ConfigError, ConfigResult};
use crate::impl_default_and_new;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Lua运行时允许的最小内存上限（字节）
pub const MIN_MEMORY_LIMIT: usize = 64 * 1024;

/// 脚本配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptingConfig {
    /// 未在命令行指定脚本时执行的入口脚本
    pub entry_script: PathBuf,

    /// Lua堆内存上限（字节），`None` 表示不限制
    pub memory_limit: Option<usize>,

    /// 是否向脚本暴露 `view` 命名空间
    pub expose_view: bool,

    /// 是否向脚本暴露 `log` 命名空间
    pub expose_log: bool,
}

impl_default_and_new!(ScriptingConfig {
    entry_script: PathBuf::from("main.lua"),
    memory_limit: None,
    expose_view: true,
    expose_log: true,
});

impl ScriptingConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.entry_script.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Entry script path is empty".to_string(),
            ));
        }
        if let Some(limit) = self.memory_limit {
            if limit < MIN_MEMORY_LIMIT {
                return Err(ConfigError::ValidationError(format!(
                    "Memory limit must be at least {} bytes",
                    MIN_MEMORY_LIMIT
                )));
            }
        }
        Ok(())
    }
}
