pub mod headless;

pub use headless::HeadlessDisplay;

use crate::core::error::DisplayResult;

/// RGBA颜色，分量范围 0.0 - 1.0
pub type Color = [f32; 4];

// ============================================================================
// Platform Display Abstraction
// ============================================================================

/// 平台显示抽象 - 脚本通过 `view.clear` / `view.present` 使用
pub trait Display {
    /// 当前尺寸（像素）
    fn size(&self) -> (u32, u32);

    /// 以指定颜色清除后台缓冲区
    fn clear(&mut self, color: Color);

    /// 呈现后台缓冲区
    fn present(&mut self) -> DisplayResult<()>;

    /// 已呈现的帧数
    fn frames_presented(&self) -> u64;
}
