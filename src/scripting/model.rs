//! 脚本模型 - 持有Lua运行时的顶层容器
//!
//! `Model` 负责创建和销毁Lua状态，并注册所有命名空间。
//! 除Lua堆本身以外不持有任何可变状态。

use crate::bindings::{MatrixBindings, SharedDisplay, VectorBindings, ViewBindings};
use crate::config::ScriptingConfig;
use crate::core::error::{ScriptError, ScriptResult};
use crate::platform::Color;
use mlua::{FromLuaMulti, Lua, Table};
use std::fs;
use std::path::Path;

/// Lua运行时容器
pub struct Model {
    lua: Lua,
}

impl Model {
    /// 创建运行时并注册 `mat`、`vec`（以及可选的 `log`）命名空间
    pub fn new(config: &ScriptingConfig) -> ScriptResult<Self> {
        let lua = Lua::new();

        if let Some(limit) = config.memory_limit {
            lua.set_memory_limit(limit)?;
        }

        let globals = lua.globals();
        MatrixBindings::register(&lua, &globals)?;
        VectorBindings::register(&lua, &globals)?;
        if config.expose_log {
            Self::register_log(&lua, &globals)?;
        }

        tracing::info!(
            target: "scripting",
            memory_limit = ?config.memory_limit,
            "Lua model created"
        );
        Ok(Self { lua })
    }

    /// 注册 `view` 命名空间
    pub fn attach_display(&self, display: SharedDisplay, clear_color: Color) -> ScriptResult<()> {
        ViewBindings::register(&self.lua, &self.lua.globals(), display, clear_color)?;
        Ok(())
    }

    /// 执行一段脚本
    pub fn exec(&self, name: &str, source: &str) -> ScriptResult<()> {
        tracing::debug!(target: "scripting", script = name, "Executing script");
        self.lua.load(source).set_name(name).exec()?;
        Ok(())
    }

    /// 执行脚本文件
    pub fn exec_file<P: AsRef<Path>>(&self, path: P) -> ScriptResult<()> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|_| ScriptError::NotFound(path.display().to_string()))?;
        self.exec(&format!("@{}", path.display()), &source)
    }

    /// 求值一个表达式或代码块
    pub fn eval<T: FromLuaMulti>(&self, source: &str) -> ScriptResult<T> {
        Ok(self.lua.load(source).eval()?)
    }

    /// 调用一个全局函数
    pub fn call<T: FromLuaMulti>(&self, name: &str, args: impl mlua::IntoLuaMulti) -> ScriptResult<T> {
        let function: Option<mlua::Function> = self.lua.globals().get(name)?;
        let function = function
            .ok_or_else(|| ScriptError::Runtime(format!("global function `{}` not found", name)))?;
        Ok(function.call(args)?)
    }

    /// 当前Lua堆占用（字节）
    pub fn used_memory(&self) -> usize {
        self.lua.used_memory()
    }

    /// 底层Lua状态
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// `log.trace/debug/info/warn/error(msg)`，输出到 `script` target
    fn register_log(lua: &Lua, target: &Table) -> mlua::Result<()> {
        let log = lua.create_table_with_capacity(0, 5)?;
        log.set(
            "trace",
            lua.create_function(|_, msg: String| {
                tracing::trace!(target: "script", "{}", msg);
                Ok(())
            })?,
        )?;
        log.set(
            "debug",
            lua.create_function(|_, msg: String| {
                tracing::debug!(target: "script", "{}", msg);
                Ok(())
            })?,
        )?;
        log.set(
            "info",
            lua.create_function(|_, msg: String| {
                tracing::info!(target: "script", "{}", msg);
                Ok(())
            })?,
        )?;
        log.set(
            "warn",
            lua.create_function(|_, msg: String| {
                tracing::warn!(target: "script", "{}", msg);
                Ok(())
            })?,
        )?;
        log.set(
            "error",
            lua.create_function(|_, msg: String| {
                tracing::error!(target: "script", "{}", msg);
                Ok(())
            })?,
        )?;
        target.set("log", log)
    }
}

impl Drop for Model {
    fn drop(&mut self) {
        tracing::info!(
            target: "scripting",
            used_memory = self.lua.used_memory(),
            "Lua model dropped"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_registered() {
        let model = Model::new(&ScriptingConfig::default()).unwrap();
        let kinds: (String, String, String) = model
            .eval("return type(mat), type(vec), type(log)")
            .unwrap();
        assert_eq!(
            kinds,
            ("table".to_string(), "table".to_string(), "table".to_string())
        );
    }

    #[test]
    fn test_log_can_be_hidden() {
        let config = ScriptingConfig {
            expose_log: false,
            ..Default::default()
        };
        let model = Model::new(&config).unwrap();
        let kind: String = model.eval("return type(log)").unwrap();
        assert_eq!(kind, "nil");
    }

    #[test]
    fn test_script_error_propagates() {
        let model = Model::new(&ScriptingConfig::default()).unwrap();
        let result = model.exec("broken", "this is not lua");
        assert!(matches!(result, Err(ScriptError::Lua(_))));
    }

    #[test]
    fn test_missing_file() {
        let model = Model::new(&ScriptingConfig::default()).unwrap();
        let result = model.exec_file("definitely/not/here.lua");
        assert!(matches!(result, Err(ScriptError::NotFound(_))));
    }

    #[test]
    fn test_call_global() {
        let model = Model::new(&ScriptingConfig::default()).unwrap();
        model
            .exec("defs", "function twice(x) return x * 2 end")
            .unwrap();
        let result: i64 = model.call("twice", 21).unwrap();
        assert_eq!(result, 42);
        assert!(model.call::<()>("missing", ()).is_err());
    }

    #[test]
    fn test_memory_limit_applies() {
        let config = ScriptingConfig {
            memory_limit: Some(256 * 1024),
            ..Default::default()
        };
        let model = Model::new(&config).unwrap();
        let result = model.exec("hog", "local t = {} for i = 1, 1e7 do t[i] = i end");
        assert!(result.is_err());
    }
}
