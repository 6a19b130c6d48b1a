//! 显示配置

use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 显示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 宽度（像素）
    pub width: u32,

    /// 高度（像素）
    pub height: u32,

    /// 窗口标题
    pub title: String,

    /// `view.clear()` 不带参数时使用的颜色 (RGBA, 0.0 - 1.0)
    pub clear_color: [f32; 4],

    /// 垂直同步
    pub vsync: bool,
}

impl_default!(DisplayConfig {
    width: 800,
    height: 600,
    title: "linalg_script".to_string(),
    clear_color: [0.0, 0.0, 0.0, 1.0],
    vsync: true,
});

impl DisplayConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ValidationError(
                "Invalid resolution".to_string(),
            ));
        }
        if self
            .clear_color
            .iter()
            .any(|c| !(0.0..=1.0).contains(c))
        {
            return Err(ConfigError::ValidationError(
                "Clear color components must be within 0.0 - 1.0".to_string(),
            ));
        }
        Ok(())
    }
}
