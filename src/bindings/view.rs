//! `view` namespace: the display collaborator as seen from scripts.
//!
//! Unlike the math bindings, display failures are real errors and are raised
//! into Lua.

use crate::platform::{Color, Display};
use mlua::{Lua, Table, Variadic};
use std::cell::{RefCell, RefMut};
use std::rc::Rc;

/// Display shared between the host and the Lua closures.
pub type SharedDisplay = Rc<RefCell<dyn Display>>;

/// 显示脚本绑定
pub struct ViewBindings;

impl ViewBindings {
    /// Global namespace name.
    pub const NAMESPACE: &'static str = "view";

    /// 注册 `view` 命名空间到 `target`
    pub fn register(
        lua: &Lua,
        target: &Table,
        display: SharedDisplay,
        default_color: Color,
    ) -> mlua::Result<()> {
        let namespace = lua.create_table_with_capacity(0, 3)?;

        let clear_target = display.clone();
        namespace.set(
            "clear",
            lua.create_function(move |_, components: Variadic<f32>| {
                let color = Self::parse_color(&components, default_color)?;
                Self::borrow(&clear_target)?.clear(color);
                Ok(())
            })?,
        )?;

        let present_target = display.clone();
        namespace.set(
            "present",
            lua.create_function(move |_, ()| {
                Self::borrow(&present_target)?
                    .present()
                    .map_err(mlua::Error::external)
            })?,
        )?;

        namespace.set(
            "size",
            lua.create_function(move |_, ()| Ok(Self::borrow(&display)?.size()))?,
        )?;

        target.set(Self::NAMESPACE, namespace)?;
        tracing::debug!(target: "bindings", "Registered `{}` namespace", Self::NAMESPACE);
        Ok(())
    }

    /// No components: the configured color. Three: opaque RGB. Four: RGBA.
    fn parse_color(components: &[f32], default_color: Color) -> mlua::Result<Color> {
        match *components {
            [] => Ok(default_color),
            [r, g, b] => Ok([r, g, b, 1.0]),
            [r, g, b, a] => Ok([r, g, b, a]),
            _ => Err(mlua::Error::runtime(format!(
                "view.clear expects 0, 3 or 4 color components, got {}",
                components.len()
            ))),
        }
    }

    fn borrow(display: &SharedDisplay) -> mlua::Result<RefMut<'_, dyn Display + 'static>> {
        display
            .try_borrow_mut()
            .map_err(|_| mlua::Error::runtime("display is already in use"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessDisplay;

    fn setup() -> (Lua, Rc<RefCell<HeadlessDisplay>>) {
        let lua = Lua::new();
        let display = Rc::new(RefCell::new(HeadlessDisplay::new(2, 2).unwrap()));
        ViewBindings::register(&lua, &lua.globals(), display.clone(), [0.0, 0.0, 1.0, 1.0])
            .unwrap();
        (lua, display)
    }

    #[test]
    fn test_clear_and_present() {
        let (lua, display) = setup();
        lua.load("view.clear(1, 0, 0); view.present()").exec().unwrap();
        assert_eq!(display.borrow().frames_presented(), 1);
        assert_eq!(display.borrow().front_buffer()[0], [255, 0, 0, 255]);
    }

    #[test]
    fn test_default_clear_color() {
        let (lua, display) = setup();
        lua.load("view.clear() view.present()").exec().unwrap();
        assert_eq!(display.borrow().front_buffer()[3], [0, 0, 255, 255]);
    }

    #[test]
    fn test_bad_component_count_raises() {
        let (lua, _display) = setup();
        assert!(lua.load("view.clear(1, 0)").exec().is_err());
    }

    #[test]
    fn test_present_on_closed_display_raises() {
        let (lua, display) = setup();
        display.borrow_mut().close();
        assert!(lua.load("view.present()").exec().is_err());
    }

    #[test]
    fn test_display_shared_with_host() {
        let (lua, display) = setup();
        let shared: SharedDisplay = display.clone();
        shared.borrow_mut().clear([1.0, 1.0, 1.0, 1.0]);
        lua.load("view.present()").exec().unwrap();
        assert_eq!(display.borrow().front_buffer()[0], [255, 255, 255, 255]);
    }

    #[test]
    fn test_size() {
        let (lua, _display) = setup();
        let size: (u32, u32) = lua.load("return view.size()").eval().unwrap();
        assert_eq!(size, (2, 2));
    }
}
