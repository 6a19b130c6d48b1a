//! Cross-heap marshaling
//!
//! Guest payloads live in byte buffers with no alignment guarantee, while
//! `glam` types may require 16-byte alignment for their SIMD paths. Every
//! operation therefore copies its operands into aligned locals, computes on
//! those, and copies the result into a freshly tagged guest value. No
//! reference into guest memory outlives a single call.
//!
//! Copies are byte-for-byte in host-native layout; there is no conversion.

use super::protocol::{describe, GuestValue, RawMatrix, RawVector, ValueKind};
use crate::core::error::{BindingError, BindingResult};
use crate::math::{Mat4, Vec4, MATRIX_BYTES, VECTOR_BYTES};
use mlua::{AnyUserData, IntoLua, Lua, Value};

impl From<&Mat4> for RawMatrix {
    fn from(matrix: &Mat4) -> Self {
        let mut bytes = [0u8; MATRIX_BYTES];
        bytes.copy_from_slice(bytemuck::bytes_of(matrix));
        RawMatrix(bytes)
    }
}

impl From<&Vec4> for RawVector {
    fn from(vector: &Vec4) -> Self {
        let mut bytes = [0u8; VECTOR_BYTES];
        bytes.copy_from_slice(bytemuck::bytes_of(vector));
        RawVector(bytes)
    }
}

impl From<&RawMatrix> for Mat4 {
    fn from(raw: &RawMatrix) -> Self {
        bytemuck::pod_read_unaligned(&raw.0)
    }
}

impl From<&RawVector> for Vec4 {
    fn from(raw: &RawVector) -> Self {
        bytemuck::pod_read_unaligned(&raw.0)
    }
}

/// A computed result waiting to be handed back to the guest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeValue {
    Matrix(Mat4),
    Vector(Vec4),
    Scalar(f32),
}

impl From<Mat4> for NativeValue {
    fn from(matrix: Mat4) -> Self {
        NativeValue::Matrix(matrix)
    }
}

impl From<Vec4> for NativeValue {
    fn from(vector: Vec4) -> Self {
        NativeValue::Vector(vector)
    }
}

impl From<f32> for NativeValue {
    fn from(scalar: f32) -> Self {
        NativeValue::Scalar(scalar)
    }
}

impl IntoLua for NativeValue {
    fn into_lua(self, lua: &Lua) -> mlua::Result<Value> {
        match self {
            NativeValue::Matrix(matrix) => from_matrix(lua, &matrix).map(Value::UserData),
            NativeValue::Vector(vector) => from_vector(lua, &vector).map(Value::UserData),
            NativeValue::Scalar(scalar) => Ok(Value::Number(f64::from(scalar))),
        }
    }
}

/// Right-hand operand of the vector arithmetic entry points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Vector(Vec4),
    Scalar(f32),
}

/// Copy a guest matrix into an aligned local. `position` is the 1-based
/// argument position, used only for the refusal reason.
pub fn to_matrix(value: &Value, position: usize) -> BindingResult<Mat4> {
    if let Value::UserData(userdata) = value {
        if let Ok(guest) = userdata.borrow::<GuestValue>() {
            if let GuestValue::Matrix(raw) = &*guest {
                return Ok(Mat4::from(raw));
            }
        }
    }
    Err(BindingError::WrongKind {
        position,
        expected: ValueKind::Matrix,
        found: describe(value),
    })
}

/// Copy a guest vector into an aligned local.
pub fn to_vector(value: &Value, position: usize) -> BindingResult<Vec4> {
    if let Value::UserData(userdata) = value {
        if let Ok(guest) = userdata.borrow::<GuestValue>() {
            if let GuestValue::Vector(raw) = &*guest {
                return Ok(Vec4::from(raw));
            }
        }
    }
    Err(BindingError::WrongKind {
        position,
        expected: ValueKind::Vector,
        found: describe(value),
    })
}

/// Read a plain number argument. Numeric strings are accepted the way Lua
/// arithmetic accepts them.
pub fn to_number(lua: &Lua, value: &Value, position: usize) -> BindingResult<f32> {
    match value {
        Value::Integer(i) => Ok(*i as f32),
        Value::Number(n) => Ok(*n as f32),
        Value::String(_) => match lua.coerce_number(value.clone()) {
            Ok(Some(n)) => Ok(n as f32),
            _ => Err(BindingError::UnsupportedOperand {
                position,
                found: "string",
            }),
        },
        other => Err(BindingError::UnsupportedOperand {
            position,
            found: describe(other),
        }),
    }
}

/// A vector or a number, whichever the guest passed.
pub fn to_operand(lua: &Lua, value: &Value, position: usize) -> BindingResult<Operand> {
    if let Ok(vector) = to_vector(value, position) {
        return Ok(Operand::Vector(vector));
    }
    to_number(lua, value, position)
        .map(Operand::Scalar)
        .map_err(|_| BindingError::UnsupportedOperand {
            position,
            found: describe(value),
        })
}

/// Read exactly `N` numbers from a sequence table, in order.
pub fn to_sequence<const N: usize>(lua: &Lua, value: &Value) -> BindingResult<[f32; N]> {
    let table = match value {
        Value::Table(table) => table,
        other => {
            return Err(BindingError::NotASequence {
                found: describe(other),
            })
        }
    };

    let len = table.raw_len();
    if len != N {
        return Err(BindingError::SequenceLength {
            expected: N,
            found: len,
        });
    }

    let mut elements = [0.0f32; N];
    for (i, slot) in elements.iter_mut().enumerate() {
        let index = i + 1;
        let element: Value = table
            .raw_get(index)
            .map_err(|_| BindingError::NonNumeric { index })?;
        *slot = to_number(lua, &element, index).map_err(|_| BindingError::NonNumeric { index })?;
    }
    Ok(elements)
}

/// Allocate a new tagged guest matrix holding a copy of `matrix`.
pub fn from_matrix(lua: &Lua, matrix: &Mat4) -> mlua::Result<AnyUserData> {
    lua.create_userdata(GuestValue::Matrix(RawMatrix::from(matrix)))
}

/// Allocate a new tagged guest vector holding a copy of `vector`.
pub fn from_vector(lua: &Lua, vector: &Vec4) -> mlua::Result<AnyUserData> {
    lua.create_userdata(GuestValue::Vector(RawVector::from(vector)))
}
