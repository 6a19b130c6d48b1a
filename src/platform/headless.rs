//! 无窗口显示实现
//!
//! 在内存中维护一块RGBA8帧缓冲区，`present` 时把后台缓冲区交换到前台。

use super::{Color, Display};
use crate::config::DisplayConfig;
use crate::core::error::{DisplayError, DisplayResult};

/// 软件帧缓冲区显示
pub struct HeadlessDisplay {
    width: u32,
    height: u32,
    title: String,
    back: Vec<[u8; 4]>,
    front: Vec<[u8; 4]>,
    frames: u64,
    closed: bool,
}

impl HeadlessDisplay {
    pub fn new(width: u32, height: u32) -> DisplayResult<Self> {
        if width == 0 || height == 0 {
            return Err(DisplayError::InvalidSize { width, height });
        }
        let pixels = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            title: String::new(),
            back: vec![[0; 4]; pixels],
            front: vec![[0; 4]; pixels],
            frames: 0,
            closed: false,
        })
    }

    pub fn from_config(config: &DisplayConfig) -> DisplayResult<Self> {
        let mut headless = Self::new(config.width, config.height)?;
        headless.title = config.title.clone();
        tracing::info!(
            target: "display",
            title = %headless.title,
            "Headless display created ({}x{})",
            config.width,
            config.height
        );
        Ok(headless)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// 最近一次呈现的帧
    pub fn front_buffer(&self) -> &[[u8; 4]] {
        &self.front
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    fn quantize(color: Color) -> [u8; 4] {
        color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl Display for HeadlessDisplay {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        let pixel = Self::quantize(color);
        self.back.fill(pixel);
    }

    fn present(&mut self) -> DisplayResult<()> {
        if self.closed {
            return Err(DisplayError::Closed);
        }
        std::mem::swap(&mut self.front, &mut self.back);
        self.frames += 1;
        tracing::trace!(target: "display", frame = self.frames, "Frame presented");
        Ok(())
    }

    fn frames_presented(&self) -> u64 {
        self.frames
    }
}
