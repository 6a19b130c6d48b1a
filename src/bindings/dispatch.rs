//! Dispatch Surface
//!
//! Property lookup (`__index`) and operator overloading (`__mul`) for guest
//! values, plus the adapter that turns a typed operation outcome into Lua
//! return values.
//!
//! Refusals never raise. A refused call returns zero values, which Lua reads
//! as `nil`; the reason is logged at `debug` under the `bindings` target.

use super::marshal::NativeValue;
use super::matrix::MatrixBindings;
use super::protocol::{GuestValue, ValueKind, METATABLE_KEY, METATABLE_SENTINEL, TYPE_KEY};
use crate::core::error::{BindingError, BindingResult};
use mlua::{Function, IntoLua, Lua, MetaMethod, UserData, UserDataMethods, Value, Variadic};

/// Guest-visible return values of one call: empty on refusal.
pub type GuestReturn = Variadic<Value>;

/// Present a typed outcome to the guest.
pub fn respond<T: IntoLua>(
    lua: &Lua,
    op: &'static str,
    outcome: BindingResult<T>,
) -> mlua::Result<GuestReturn> {
    match outcome {
        Ok(value) => Ok(std::iter::once(value.into_lua(lua)?).collect()),
        Err(refusal) => {
            tracing::debug!(target: "bindings", op, %refusal, "Dispatch refused");
            Ok(Variadic::new())
        }
    }
}

/// Refuse unless exactly `expected` arguments were passed.
pub fn expect_arity(args: &[Value], expected: usize) -> BindingResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(BindingError::Arity {
            expected,
            found: args.len(),
        })
    }
}

/// Wrap a typed operation as a Lua function.
pub fn guest_function<F, T>(lua: &Lua, op: &'static str, body: F) -> mlua::Result<Function>
where
    F: Fn(&Lua, &[Value]) -> BindingResult<T> + 'static,
    T: Into<NativeValue>,
{
    lua.create_function(move |lua, args: Variadic<Value>| {
        respond(lua, op, body(lua, &args).map(Into::into))
    })
}

fn nothing() -> mlua::Result<GuestReturn> {
    Ok(Variadic::new())
}

fn single(lua: &Lua, value: impl IntoLua) -> mlua::Result<GuestReturn> {
    Ok(std::iter::once(value.into_lua(lua)?).collect())
}

/// `__index` for matrices. Only string keys are interpreted.
fn resolve_matrix_key(lua: &Lua, key: &Value) -> mlua::Result<GuestReturn> {
    let Value::String(key) = key else {
        return nothing();
    };
    let Ok(key) = key.to_str() else {
        return nothing();
    };

    tracing::trace!(target: "bindings", key = &*key, "Matrix property lookup");
    match &*key {
        METATABLE_KEY => single(lua, METATABLE_SENTINEL),
        TYPE_KEY => single(lua, ValueKind::Matrix.tag()),
        name => match MatrixBindings::method(lua, name)? {
            Some(method) => single(lua, method),
            None => nothing(),
        },
    }
}

/// `__index` for vectors: only the tag is exposed.
fn resolve_vector_key(lua: &Lua, key: &Value) -> mlua::Result<GuestReturn> {
    match key {
        Value::String(key) if key.to_str().is_ok_and(|k| &*k == TYPE_KEY) => {
            single(lua, ValueKind::Vector.tag())
        }
        _ => nothing(),
    }
}

impl UserData for GuestValue {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_meta_method(MetaMethod::Index, |lua, this, key: Value| {
            match this.kind() {
                ValueKind::Matrix => resolve_matrix_key(lua, &key),
                ValueKind::Vector => resolve_vector_key(lua, &key),
            }
        });

        // Lua consults the left operand first, so a vector on the left lands
        // here too and is refused.
        methods.add_meta_function(MetaMethod::Mul, |lua, args: Variadic<Value>| {
            respond(lua, "__mul", MatrixBindings::multiply(lua, &args))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::marshal::{from_matrix, from_vector};
    use crate::math::{Mat4, Vec4};

    fn setup() -> Lua {
        let lua = Lua::new();
        lua.globals()
            .set("m", from_matrix(&lua, &Mat4::IDENTITY).unwrap())
            .unwrap();
        lua.globals()
            .set("v", from_vector(&lua, &Vec4::ONE).unwrap())
            .unwrap();
        lua
    }

    #[test]
    fn test_matrix_reserved_keys() {
        let lua = setup();
        let tag: String = lua.load("return m.__type").eval().unwrap();
        assert_eq!(tag, "matrix");
        let sentinel: String = lua.load("return m.__metatable").eval().unwrap();
        assert_eq!(sentinel, METATABLE_SENTINEL);
    }

    #[test]
    fn test_matrix_methods_resolve() {
        let lua = setup();
        let kinds: (String, String) = lua
            .load("return type(m.inverse), type(m.transpose)")
            .eval()
            .unwrap();
        assert_eq!(kinds, ("function".to_string(), "function".to_string()));
    }

    #[test]
    fn test_unknown_keys_are_nil() {
        let lua = setup();
        let missing: (Value, Value, Value, Value) = lua
            .load("return m.determinant, m[1], v.inverse, v[true]")
            .eval()
            .unwrap();
        assert!(missing.0.is_nil());
        assert!(missing.1.is_nil());
        assert!(missing.2.is_nil());
        assert!(missing.3.is_nil());
    }

    #[test]
    fn test_vector_tag() {
        let lua = setup();
        let tag: String = lua.load("return v.__type").eval().unwrap();
        assert_eq!(tag, "vector");
    }

    #[test]
    fn test_refusal_returns_no_values() {
        let lua = Lua::new();
        let ret = respond::<NativeValue>(
            &lua,
            "test",
            Err(BindingError::Arity {
                expected: 1,
                found: 0,
            }),
        )
        .unwrap();
        assert!(ret.is_empty());
    }

    #[test]
    fn test_expect_arity() {
        assert!(expect_arity(&[Value::Nil], 1).is_ok());
        assert_eq!(
            expect_arity(&[], 2),
            Err(BindingError::Arity {
                expected: 2,
                found: 0
            })
        );
    }
}
