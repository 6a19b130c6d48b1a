//! 引擎主入口
//!
//! 定义Engine结构：初始化日志、加载配置、创建显示与脚本模型并执行入口脚本

use crate::config::{EngineConfig, LoggingConfig};
use crate::platform::{Display, HeadlessDisplay};
use crate::scripting::Model;
use std::cell::RefCell;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use super::error::EngineResult;

/// 引擎主结构
///
/// `Engine` 是命令行程序的入口点，负责：
/// - 初始化日志系统
/// - 加载并验证配置
/// - 创建显示和Lua模型
/// - 执行入口脚本
///
/// # 示例
///
/// ```no_run
/// use linalg_script::core::Engine;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     Engine::run()?;
///     Ok(())
/// }
/// ```
pub struct Engine;

impl Engine {
    /// 运行引擎
    ///
    /// 脚本路径取第一个命令行参数，缺省时使用 `scripting.entry_script`。
    pub fn run() -> EngineResult<()> {
        let (mut config, source) = EngineConfig::load_or_default();
        config.apply_env_overrides();
        config.validate()?;

        Self::initialize_logging(&config.logging)?;
        match &source {
            Some(path) => tracing::info!(target: "config", "Loaded config from {:?}", path),
            None => tracing::info!(target: "config", "Using default configuration"),
        }

        let script = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| config.scripting.entry_script.clone());

        Self::run_script(&config, &script)?;

        tracing::info!(target: "engine", "Engine shutting down");
        Ok(())
    }

    /// 使用给定配置执行一个脚本文件
    pub fn run_script(config: &EngineConfig, script: &Path) -> EngineResult<()> {
        let model = Model::new(&config.scripting)?;

        let display = Rc::new(RefCell::new(HeadlessDisplay::from_config(&config.display)?));
        if config.scripting.expose_view {
            model.attach_display(display.clone(), config.display.clear_color)?;
        }

        tracing::info!(target: "engine", script = %script.display(), "Running script");
        model.exec_file(script)?;

        let frames = display.borrow().frames_presented();
        tracing::info!(target: "engine", frames, "Script finished");
        Ok(())
    }

    /// 初始化日志系统
    ///
    /// 配置tracing日志框架。`RUST_LOG` 环境变量优先，否则使用配置中的级别。
    /// 重复调用是安全的：已安装的订阅者保持不变。
    pub fn initialize_logging(config: &LoggingConfig) -> EngineResult<()> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

        if config.log_to_file {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file_path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        } else if config.log_to_console {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }

        tracing::info!(target: "engine", "Engine starting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EngineError;
    use std::io::Write;

    #[test]
    fn test_run_script_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "local m = mat.identity() * mat.zero()\n\
             assert(m.__type == 'matrix')\n\
             view.clear(0.2, 0.4, 0.6)\n\
             view.present()"
        )
        .unwrap();

        let config = EngineConfig::default();
        Engine::run_script(&config, file.path()).unwrap();
    }

    #[test]
    fn test_view_hidden_by_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "assert(view == nil)").unwrap();

        let mut config = EngineConfig::default();
        config.scripting.expose_view = false;
        Engine::run_script(&config, file.path()).unwrap();
    }

    #[test]
    fn test_frame_count_after_script() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "for _ = 1, 2 do view.present() end").unwrap();

        let config = EngineConfig::default();
        assert!(Engine::run_script(&config, file.path()).is_ok());
    }

    #[test]
    fn test_missing_script() {
        let config = EngineConfig::default();
        let result = Engine::run_script(&config, Path::new("no/such/script.lua"));
        assert!(matches!(result, Err(EngineError::Script(_))));
    }

    #[test]
    fn test_logging_init_is_idempotent() {
        let config = LoggingConfig::default();
        assert!(Engine::initialize_logging(&config).is_ok());
        assert!(Engine::initialize_logging(&config).is_ok());
    }
}
