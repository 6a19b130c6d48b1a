//! Matrix operation set and the `mat` namespace.

use super::dispatch::{expect_arity, guest_function};
use super::marshal::{to_matrix, to_sequence, to_vector, NativeValue};
use super::protocol::{describe, kind_of, ValueKind};
use crate::core::error::{BindingError, BindingResult};
use crate::math::{Mat4, MatrixOps, MATRIX_ELEMENTS};
use mlua::{Function, Lua, Table, Value};

/// 矩阵脚本绑定
pub struct MatrixBindings;

impl MatrixBindings {
    /// Global namespace name.
    pub const NAMESPACE: &'static str = "mat";

    /// 注册 `mat` 命名空间到 `target`
    pub fn register(lua: &Lua, target: &Table) -> mlua::Result<()> {
        let namespace = lua.create_table_with_capacity(0, 3)?;

        namespace.set("from", guest_function(lua, "mat.from", Self::from_sequence)?)?;
        namespace.set("identity", guest_function(lua, "mat.identity", Self::identity)?)?;
        namespace.set("zero", guest_function(lua, "mat.zero", Self::zero)?)?;

        target.set(Self::NAMESPACE, namespace)?;
        tracing::debug!(target: "bindings", "Registered `{}` namespace", Self::NAMESPACE);
        Ok(())
    }

    /// Bound method for an instance property, if `name` is one.
    pub fn method(lua: &Lua, name: &str) -> mlua::Result<Option<Function>> {
        let method = match name {
            "inverse" => guest_function(lua, "mat:inverse", Self::inverse)?,
            "transpose" => guest_function(lua, "mat:transpose", Self::transpose)?,
            _ => return Ok(None),
        };
        Ok(Some(method))
    }

    /// `mat.from(seq)`: 16 numbers, written row by row.
    pub fn from_sequence(lua: &Lua, args: &[Value]) -> BindingResult<Mat4> {
        expect_arity(args, 1)?;
        let elements = to_sequence::<MATRIX_ELEMENTS>(lua, &args[0])?;
        Ok(MatrixOps::from_row_sequence(&elements))
    }

    pub fn identity(_lua: &Lua, args: &[Value]) -> BindingResult<Mat4> {
        expect_arity(args, 0)?;
        Ok(MatrixOps::identity())
    }

    pub fn zero(_lua: &Lua, args: &[Value]) -> BindingResult<Mat4> {
        expect_arity(args, 0)?;
        Ok(MatrixOps::zero())
    }

    /// `m:inverse()`. A singular matrix yields whatever `glam` computes.
    pub fn inverse(_lua: &Lua, args: &[Value]) -> BindingResult<Mat4> {
        expect_arity(args, 1)?;
        let input = to_matrix(&args[0], 1)?;
        Ok(MatrixOps::inverse(&input))
    }

    pub fn transpose(_lua: &Lua, args: &[Value]) -> BindingResult<Mat4> {
        expect_arity(args, 1)?;
        let input = to_matrix(&args[0], 1)?;
        Ok(MatrixOps::transpose(&input))
    }

    /// `a * b`. The left operand must be a matrix; the right operand's kind
    /// picks between a matrix product and a matrix-vector product.
    pub fn multiply(_lua: &Lua, args: &[Value]) -> BindingResult<NativeValue> {
        expect_arity(args, 2)?;
        let a = to_matrix(&args[0], 1)?;

        let rhs = &args[1];
        match kind_of(rhs) {
            Some(ValueKind::Matrix) => {
                let b = to_matrix(rhs, 2)?;
                Ok(MatrixOps::mul(&a, &b).into())
            }
            Some(ValueKind::Vector) => {
                let v = to_vector(rhs, 2)?;
                Ok(MatrixOps::mul_vec(&a, &v).into())
            }
            None => Err(BindingError::UnsupportedOperand {
                position: 2,
                found: describe(rhs),
            }),
        }
    }
}
