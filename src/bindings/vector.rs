//! Vector operation set and the `vec` namespace.

use super::dispatch::{expect_arity, guest_function};
use super::marshal::{to_number, to_operand, to_sequence, to_vector, Operand};
use crate::core::error::BindingResult;
use crate::math::{Vec4, VectorOps, VECTOR_ELEMENTS};
use mlua::{Lua, Table, Value};

/// Guest entry point with its namespace key.
type Entry = (&'static str, &'static str, fn(&Lua, &[Value]) -> BindingResult<Vec4>);
type ScalarEntry = (&'static str, &'static str, fn(&Lua, &[Value]) -> BindingResult<f32>);

/// 向量脚本绑定
pub struct VectorBindings;

impl VectorBindings {
    /// Global namespace name.
    pub const NAMESPACE: &'static str = "vec";

    const VECTOR_ENTRIES: &'static [Entry] = &[
        ("from", "vec.from", Self::from_sequence),
        ("zero", "vec.zero", Self::zero),
        ("one", "vec.one", Self::one),
        ("negate", "vec.negate", Self::negate),
        ("normalize", "vec.normalize", Self::normalize),
        ("add", "vec.add", Self::add),
        ("subtract", "vec.subtract", Self::subtract),
        ("multiply", "vec.multiply", Self::multiply),
        ("divide", "vec.divide", Self::divide),
        ("lerp", "vec.lerp", Self::lerp),
        ("min", "vec.min", Self::min),
        ("max", "vec.max", Self::max),
        ("clamp", "vec.clamp", Self::clamp),
        ("reflect", "vec.reflect", Self::reflect),
    ];

    const SCALAR_ENTRIES: &'static [ScalarEntry] = &[
        ("magnitude", "vec.magnitude", Self::magnitude),
        ("dot", "vec.dot", Self::dot),
        ("distance", "vec.distance", Self::distance),
    ];

    /// 注册 `vec` 命名空间到 `target`
    pub fn register(lua: &Lua, target: &Table) -> mlua::Result<()> {
        let namespace = lua.create_table_with_capacity(
            0,
            Self::VECTOR_ENTRIES.len() + Self::SCALAR_ENTRIES.len(),
        )?;

        for &(key, op, body) in Self::VECTOR_ENTRIES {
            namespace.set(key, guest_function(lua, op, body)?)?;
        }
        for &(key, op, body) in Self::SCALAR_ENTRIES {
            namespace.set(key, guest_function(lua, op, body)?)?;
        }

        target.set(Self::NAMESPACE, namespace)?;
        tracing::debug!(target: "bindings", "Registered `{}` namespace", Self::NAMESPACE);
        Ok(())
    }

    /// `vec.from(seq)`: x, y, z, w in order.
    pub fn from_sequence(lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        expect_arity(args, 1)?;
        let components = to_sequence::<VECTOR_ELEMENTS>(lua, &args[0])?;
        Ok(VectorOps::from_array(&components))
    }

    pub fn zero(_lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        expect_arity(args, 0)?;
        Ok(VectorOps::zero())
    }

    pub fn one(_lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        expect_arity(args, 0)?;
        Ok(VectorOps::one())
    }

    pub fn negate(_lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        expect_arity(args, 1)?;
        let v = to_vector(&args[0], 1)?;
        Ok(VectorOps::negate(&v))
    }

    pub fn normalize(_lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        expect_arity(args, 1)?;
        let v = to_vector(&args[0], 1)?;
        Ok(VectorOps::normalize(&v))
    }

    pub fn magnitude(_lua: &Lua, args: &[Value]) -> BindingResult<f32> {
        expect_arity(args, 1)?;
        let v = to_vector(&args[0], 1)?;
        Ok(VectorOps::magnitude(&v))
    }

    pub fn dot(_lua: &Lua, args: &[Value]) -> BindingResult<f32> {
        let (a, b) = Self::vector_pair(args)?;
        Ok(VectorOps::dot(&a, &b))
    }

    pub fn distance(_lua: &Lua, args: &[Value]) -> BindingResult<f32> {
        let (a, b) = Self::vector_pair(args)?;
        Ok(VectorOps::distance(&a, &b))
    }

    pub fn add(lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        Ok(match Self::vector_and_operand(lua, args)? {
            (a, Operand::Vector(b)) => VectorOps::add(&a, &b),
            (a, Operand::Scalar(s)) => VectorOps::add_scalar(&a, s),
        })
    }

    pub fn subtract(lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        Ok(match Self::vector_and_operand(lua, args)? {
            (a, Operand::Vector(b)) => VectorOps::sub(&a, &b),
            (a, Operand::Scalar(s)) => VectorOps::sub_scalar(&a, s),
        })
    }

    /// Component-wise product, or scaling when the right operand is a number.
    pub fn multiply(lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        Ok(match Self::vector_and_operand(lua, args)? {
            (a, Operand::Vector(b)) => VectorOps::mul(&a, &b),
            (a, Operand::Scalar(s)) => VectorOps::scale(&a, s),
        })
    }

    pub fn divide(lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        Ok(match Self::vector_and_operand(lua, args)? {
            (a, Operand::Vector(b)) => VectorOps::div(&a, &b),
            (a, Operand::Scalar(s)) => VectorOps::div_scalar(&a, s),
        })
    }

    pub fn lerp(lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        expect_arity(args, 3)?;
        let a = to_vector(&args[0], 1)?;
        let b = to_vector(&args[1], 2)?;
        let t = to_number(lua, &args[2], 3)?;
        Ok(VectorOps::lerp(&a, &b, t))
    }

    pub fn min(_lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        let (a, b) = Self::vector_pair(args)?;
        Ok(VectorOps::min(&a, &b))
    }

    pub fn max(_lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        let (a, b) = Self::vector_pair(args)?;
        Ok(VectorOps::max(&a, &b))
    }

    pub fn clamp(lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        expect_arity(args, 3)?;
        let v = to_vector(&args[0], 1)?;
        let lo = to_number(lua, &args[1], 2)?;
        let hi = to_number(lua, &args[2], 3)?;
        Ok(VectorOps::clamp(&v, lo, hi))
    }

    pub fn reflect(_lua: &Lua, args: &[Value]) -> BindingResult<Vec4> {
        let (v, n) = Self::vector_pair(args)?;
        Ok(VectorOps::reflect(&v, &n))
    }

    fn vector_pair(args: &[Value]) -> BindingResult<(Vec4, Vec4)> {
        expect_arity(args, 2)?;
        Ok((to_vector(&args[0], 1)?, to_vector(&args[1], 2)?))
    }

    fn vector_and_operand(lua: &Lua, args: &[Value]) -> BindingResult<(Vec4, Operand)> {
        expect_arity(args, 2)?;
        Ok((to_vector(&args[0], 1)?, to_operand(lua, &args[1], 2)?))
    }
}
