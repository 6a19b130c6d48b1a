//! 矩阵/向量运算
//!
//! 绑定层调用的原生运算集合。所有函数都是纯函数，只操作对齐的本地副本。
//! 奇异矩阵求逆等边界情况不做校验，结果（包括非有限值）原样返回。

use glam::{Mat4, Vec4};

/// 4x4矩阵运算
pub struct MatrixOps;

impl MatrixOps {
    /// 单位矩阵
    #[inline]
    pub fn identity() -> Mat4 {
        Mat4::IDENTITY
    }

    /// 零矩阵
    #[inline]
    pub fn zero() -> Mat4 {
        Mat4::ZERO
    }

    /// 按列主序从16个元素构建矩阵
    ///
    /// 第 `i` 个元素（从0开始）写入第 `i % 4` 列、第 `i / 4` 行，
    /// 即序列按"行"书写，与数学书写习惯一致。
    ///
    /// ```rust
    /// use linalg_script::math::MatrixOps;
    ///
    /// let elements: Vec<f32> = (0..16).map(|i| i as f32).collect();
    /// let m = MatrixOps::from_row_sequence(elements.as_slice().try_into().unwrap());
    /// assert_eq!(m.col(1).x, 1.0);
    /// assert_eq!(m.col(0).y, 4.0);
    /// ```
    pub fn from_row_sequence(elements: &[f32; 16]) -> Mat4 {
        let mut cols = [[0.0f32; 4]; 4];
        for (i, value) in elements.iter().enumerate() {
            cols[i % 4][i / 4] = *value;
        }
        Mat4::from_cols_array_2d(&cols)
    }

    /// 逆矩阵
    #[inline]
    pub fn inverse(m: &Mat4) -> Mat4 {
        m.inverse()
    }

    /// 转置矩阵
    #[inline]
    pub fn transpose(m: &Mat4) -> Mat4 {
        m.transpose()
    }

    /// 矩阵乘法 `a * b`
    #[inline]
    pub fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
        *a * *b
    }

    /// 矩阵-向量乘法 `m * v`
    #[inline]
    pub fn mul_vec(m: &Mat4, v: &Vec4) -> Vec4 {
        *m * *v
    }
}

/// 4分量向量运算
pub struct VectorOps;

impl VectorOps {
    #[inline]
    pub fn zero() -> Vec4 {
        Vec4::ZERO
    }

    #[inline]
    pub fn one() -> Vec4 {
        Vec4::ONE
    }

    #[inline]
    pub fn from_array(components: &[f32; 4]) -> Vec4 {
        Vec4::from_array(*components)
    }

    #[inline]
    pub fn negate(v: &Vec4) -> Vec4 {
        -*v
    }

    /// 归一化，零向量保持为零向量
    #[inline]
    pub fn normalize(v: &Vec4) -> Vec4 {
        v.normalize_or_zero()
    }

    #[inline]
    pub fn magnitude(v: &Vec4) -> f32 {
        v.length()
    }

    #[inline]
    pub fn dot(a: &Vec4, b: &Vec4) -> f32 {
        a.dot(*b)
    }

    #[inline]
    pub fn distance(a: &Vec4, b: &Vec4) -> f32 {
        a.distance(*b)
    }

    #[inline]
    pub fn add(a: &Vec4, b: &Vec4) -> Vec4 {
        *a + *b
    }

    #[inline]
    pub fn add_scalar(a: &Vec4, s: f32) -> Vec4 {
        *a + Vec4::splat(s)
    }

    #[inline]
    pub fn sub(a: &Vec4, b: &Vec4) -> Vec4 {
        *a - *b
    }

    #[inline]
    pub fn sub_scalar(a: &Vec4, s: f32) -> Vec4 {
        *a - Vec4::splat(s)
    }

    /// 逐分量乘法
    #[inline]
    pub fn mul(a: &Vec4, b: &Vec4) -> Vec4 {
        *a * *b
    }

    #[inline]
    pub fn scale(a: &Vec4, s: f32) -> Vec4 {
        *a * s
    }

    /// 逐分量除法
    #[inline]
    pub fn div(a: &Vec4, b: &Vec4) -> Vec4 {
        *a / *b
    }

    #[inline]
    pub fn div_scalar(a: &Vec4, s: f32) -> Vec4 {
        *a / s
    }

    /// 线性插值，`t` 先被限制在 `[0, 1]`
    #[inline]
    pub fn lerp(a: &Vec4, b: &Vec4, t: f32) -> Vec4 {
        a.lerp(*b, t.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn min(a: &Vec4, b: &Vec4) -> Vec4 {
        a.min(*b)
    }

    #[inline]
    pub fn max(a: &Vec4, b: &Vec4) -> Vec4 {
        a.max(*b)
    }

    /// 每个分量限制在 `[lo, hi]`
    #[inline]
    pub fn clamp(v: &Vec4, lo: f32, hi: f32) -> Vec4 {
        v.max(Vec4::splat(lo)).min(Vec4::splat(hi))
    }

    /// 以法线 `n` 反射 `v`
    #[inline]
    pub fn reflect(v: &Vec4, n: &Vec4) -> Vec4 {
        *v - 2.0 * v.dot(*n) * *n
    }
}
