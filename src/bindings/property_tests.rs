//! 绑定层属性测试
//!
//! 使用proptest验证封送、标签与运算的代数性质

#[cfg(test)]
mod tests {
    use crate::bindings::marshal::{from_matrix, from_vector, to_matrix, to_vector, NativeValue};
    use crate::bindings::protocol::{is_matrix, is_vector};
    use crate::bindings::{MatrixBindings, VectorBindings};
    use crate::math::{MatrixOps, VectorOps};
    use glam::{Mat4, Quat, Vec3, Vec4};
    use mlua::{Lua, Value};
    use proptest::prelude::*;

    fn finite_f32() -> impl Strategy<Value = f32> {
        -1000.0f32..1000.0
    }

    fn any_matrix() -> impl Strategy<Value = Mat4> {
        prop::array::uniform16(finite_f32()).prop_map(|cols| Mat4::from_cols_array(&cols))
    }

    fn any_vector() -> impl Strategy<Value = Vec4> {
        prop::array::uniform4(finite_f32()).prop_map(Vec4::from_array)
    }

    fn nonzero_vector() -> impl Strategy<Value = Vec4> {
        any_vector().prop_filter("must not be near zero", |v| v.length() > 1.0e-3)
    }

    // 缩放-旋转-平移组合总是可逆的
    fn invertible_matrix() -> impl Strategy<Value = Mat4> {
        (
            prop::array::uniform3(0.5f32..4.0),
            prop::array::uniform3(-3.0f32..3.0),
            prop::array::uniform3(-10.0f32..10.0),
        )
            .prop_map(|(scale, euler, translation)| {
                Mat4::from_scale_rotation_translation(
                    Vec3::from_array(scale),
                    Quat::from_euler(glam::EulerRot::XYZ, euler[0], euler[1], euler[2]),
                    Vec3::from_array(translation),
                )
            })
    }

    fn guest_matrix(lua: &Lua, m: &Mat4) -> Value {
        Value::UserData(from_matrix(lua, m).unwrap())
    }

    fn guest_vector(lua: &Lua, v: &Vec4) -> Value {
        Value::UserData(from_vector(lua, v).unwrap())
    }

    proptest! {
        #[test]
        fn matrix_round_trip_is_bit_exact(bits in prop::array::uniform16(any::<u32>())) {
            let lua = Lua::new();
            let m = Mat4::from_cols_array(&bits.map(f32::from_bits));
            let back = to_matrix(&guest_matrix(&lua, &m), 1).unwrap();
            prop_assert_eq!(bytemuck::bytes_of(&back), bytemuck::bytes_of(&m));
        }

        #[test]
        fn vector_round_trip_is_bit_exact(bits in prop::array::uniform4(any::<u32>())) {
            let lua = Lua::new();
            let v = Vec4::from_array(bits.map(f32::from_bits));
            let back = to_vector(&guest_vector(&lua, &v), 1).unwrap();
            prop_assert_eq!(bytemuck::bytes_of(&back), bytemuck::bytes_of(&v));
        }

        #[test]
        fn tags_are_exclusive(m in any_matrix(), v in any_vector()) {
            let lua = Lua::new();
            let gm = guest_matrix(&lua, &m);
            let gv = guest_vector(&lua, &v);
            prop_assert!(is_matrix(&gm) && !is_vector(&gm));
            prop_assert!(is_vector(&gv) && !is_matrix(&gv));
        }

        #[test]
        fn from_sequence_is_row_major_text(elements in prop::array::uniform16(finite_f32())) {
            let lua = Lua::new();
            let seq = Value::Table(lua.create_sequence_from(elements).unwrap());
            let m = MatrixBindings::from_sequence(&lua, &[seq]).unwrap();
            let cols = m.to_cols_array_2d();
            for c in 0..4 {
                for r in 0..4 {
                    prop_assert_eq!(cols[c][r], elements[4 * r + c]);
                }
            }
        }

        #[test]
        fn identity_is_neutral(m in any_matrix(), v in any_vector()) {
            let lua = Lua::new();
            let identity = guest_matrix(&lua, &MatrixOps::identity());

            let product = MatrixBindings::multiply(&lua, &[identity.clone(), guest_matrix(&lua, &m)]);
            prop_assert_eq!(product, Ok(NativeValue::Matrix(m)));

            let product = MatrixBindings::multiply(&lua, &[identity, guest_vector(&lua, &v)]);
            prop_assert_eq!(product, Ok(NativeValue::Vector(v)));
        }

        #[test]
        fn transpose_is_an_involution(m in any_matrix()) {
            let lua = Lua::new();
            let once = MatrixBindings::transpose(&lua, &[guest_matrix(&lua, &m)]).unwrap();
            let twice = MatrixBindings::transpose(&lua, &[guest_matrix(&lua, &once)]).unwrap();
            prop_assert_eq!(twice, m);
        }

        #[test]
        fn inverse_composes_to_identity(m in invertible_matrix()) {
            let lua = Lua::new();
            let inv = MatrixBindings::inverse(&lua, &[guest_matrix(&lua, &m)]).unwrap();
            let product = MatrixOps::mul(&m, &inv);
            prop_assert!(product.abs_diff_eq(Mat4::IDENTITY, 1.0e-3));
        }

        #[test]
        fn negate_commutes_with_normalize(v in nonzero_vector()) {
            let lua = Lua::new();
            let negated = VectorBindings::negate(&lua, &[guest_vector(&lua, &v)]).unwrap();
            let a = VectorBindings::normalize(&lua, &[guest_vector(&lua, &negated)]).unwrap();

            let normalized = VectorBindings::normalize(&lua, &[guest_vector(&lua, &v)]).unwrap();
            let b = VectorBindings::negate(&lua, &[guest_vector(&lua, &normalized)]).unwrap();

            prop_assert!((VectorOps::magnitude(&a) - 1.0).abs() < 1.0e-4);
            prop_assert!(a.abs_diff_eq(b, 1.0e-5));
            prop_assert!(VectorOps::dot(&a, &v) < 0.0);
        }
    }
}
