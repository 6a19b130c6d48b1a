//! Type Tag Protocol
//!
//! Every opaque value handed to Lua by this crate is a [`GuestValue`]: a
//! closed variant over the two supported kinds whose payload is a plain byte
//! buffer. The variant is the tag. It is chosen at construction and never
//! changes, and the reserved `__type` key reports it to scripts.
//!
//! Byte buffers have an alignment of 1, which is exactly the guarantee a
//! guest allocator gives us. Reading them as `glam` types always goes through
//! [`super::marshal`].

use crate::math::{MATRIX_BYTES, VECTOR_BYTES};
use mlua::{AnyUserData, Value};
use std::fmt;

/// Reserved lookup key returning the tag string.
pub const TYPE_KEY: &str = "__type";
/// Reserved lookup key returning [`METATABLE_SENTINEL`].
pub const METATABLE_KEY: &str = "__metatable";
/// Placeholder returned for `__metatable`; carries no information.
pub const METATABLE_SENTINEL: &str = "My God, what are you doing?";

/// The kinds of value the binding layer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Matrix,
    Vector,
}

impl ValueKind {
    /// Tag string visible through `__type`.
    pub fn tag(self) -> &'static str {
        match self {
            ValueKind::Matrix => "matrix",
            ValueKind::Vector => "vector",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Unaligned storage for a matrix payload.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct RawMatrix(pub(crate) [u8; MATRIX_BYTES]);

/// Unaligned storage for a vector payload.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct RawVector(pub(crate) [u8; VECTOR_BYTES]);

impl fmt::Debug for RawMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawMatrix({} bytes)", self.0.len())
    }
}

impl fmt::Debug for RawVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawVector({} bytes)", self.0.len())
    }
}

/// An opaque, guest-owned value produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestValue {
    Matrix(RawMatrix),
    Vector(RawVector),
}

impl GuestValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            GuestValue::Matrix(_) => ValueKind::Matrix,
            GuestValue::Vector(_) => ValueKind::Vector,
        }
    }
}

/// Tag of a userdata, if it is one of ours.
pub fn userdata_kind(userdata: &AnyUserData) -> Option<ValueKind> {
    userdata
        .borrow::<GuestValue>()
        .ok()
        .map(|value| value.kind())
}

/// Tag of an arbitrary Lua value. Never fails: anything that is not a
/// [`GuestValue`] simply has no kind.
pub fn kind_of(value: &Value) -> Option<ValueKind> {
    match value {
        Value::UserData(userdata) => userdata_kind(userdata),
        _ => None,
    }
}

pub fn is_matrix(value: &Value) -> bool {
    kind_of(value) == Some(ValueKind::Matrix)
}

pub fn is_vector(value: &Value) -> bool {
    kind_of(value) == Some(ValueKind::Vector)
}

/// Short description of a value for refusal messages.
pub fn describe(value: &Value) -> &'static str {
    match kind_of(value) {
        Some(kind) => kind.tag(),
        None => value.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlua::Lua;

    fn raw_matrix() -> GuestValue {
        GuestValue::Matrix(RawMatrix([0; MATRIX_BYTES]))
    }

    fn raw_vector() -> GuestValue {
        GuestValue::Vector(RawVector([0; VECTOR_BYTES]))
    }

    #[test]
    fn test_tags() {
        assert_eq!(ValueKind::Matrix.tag(), "matrix");
        assert_eq!(ValueKind::Vector.to_string(), "vector");
        assert_eq!(raw_matrix().kind(), ValueKind::Matrix);
        assert_eq!(raw_vector().kind(), ValueKind::Vector);
    }

    #[test]
    fn test_payload_sizes_match_layout() {
        assert_eq!(std::mem::size_of::<RawMatrix>(), MATRIX_BYTES);
        assert_eq!(std::mem::size_of::<RawVector>(), VECTOR_BYTES);
    }

    #[test]
    fn test_payload_is_unaligned_storage() {
        assert_eq!(std::mem::align_of::<RawMatrix>(), 1);
        assert_eq!(std::mem::align_of::<RawVector>(), 1);
    }

    #[test]
    fn test_kind_checks() {
        let lua = Lua::new();
        let matrix = Value::UserData(lua.create_userdata(raw_matrix()).unwrap());
        let vector = Value::UserData(lua.create_userdata(raw_vector()).unwrap());

        assert!(is_matrix(&matrix));
        assert!(!is_vector(&matrix));
        assert!(is_vector(&vector));
        assert!(!is_matrix(&vector));
    }

    #[test]
    fn test_foreign_values_have_no_kind() {
        let lua = Lua::new();
        let table = Value::Table(lua.create_table().unwrap());
        let string = Value::String(lua.create_string("matrix").unwrap());

        for value in [Value::Nil, Value::Number(1.0), table, string] {
            assert!(!is_matrix(&value));
            assert!(!is_vector(&value));
            assert_eq!(kind_of(&value), None);
        }
    }

    #[test]
    fn test_describe() {
        let lua = Lua::new();
        let vector = Value::UserData(lua.create_userdata(raw_vector()).unwrap());
        assert_eq!(describe(&vector), "vector");
        assert_eq!(describe(&Value::Boolean(true)), "boolean");
    }
}
