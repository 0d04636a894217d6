// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The 3x3 matrix, used for normal transforms and 2D affine transforms.

use serde::{Deserialize, Serialize};
use std::ops;

use crate::math::{Mat4, Quaternion, Vec2, Vec3};

/// A 3x3 column-major matrix.
///
/// Element `i` of [`Mat3::elements`] is row `i % 3`, column `i / 3`.
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Mat3 {
    /// The nine elements in column-major order.
    pub elements: [f32; 9],
}

impl Mat3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// A matrix with all elements set to `0.0`.
    pub const ZERO: Self = Self { elements: [0.0; 9] };

    /// Creates a matrix from nine elements already in column-major order.
    #[inline]
    pub const fn from_cols_array(elements: [f32; 9]) -> Self {
        Self { elements }
    }

    /// Overwrites every element. Arguments are given in **row-major** order.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub fn set(
        &mut self,
        m11: f32, m12: f32, m13: f32,
        m21: f32, m22: f32, m23: f32,
        m31: f32, m32: f32, m33: f32,
    ) -> &mut Self {
        self.elements = [m11, m21, m31, m12, m22, m32, m13, m23, m33];
        self
    }

    /// Resets the matrix to the identity.
    #[inline]
    pub fn identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Copies every element of `m` into `self`.
    #[inline]
    pub fn copy_from(&mut self, m: &Mat3) -> &mut Self {
        self.elements = m.elements;
        self
    }

    /// The upper-left 3x3 of a 4x4 matrix.
    #[rustfmt::skip]
    pub fn from_mat4(m: &Mat4) -> Self {
        let e = &m.elements;
        Self::from_cols_array([
            e[0], e[1], e[2],
            e[4], e[5], e[6],
            e[8], e[9], e[10],
        ])
    }

    /// A rotation matrix from a (unit) quaternion.
    #[inline]
    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::from_mat4(&Mat4::from_quaternion(q))
    }

    /// A matrix whose columns are `a`, `b` and `c`.
    pub fn from_basis(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let mut m = Self::ZERO;
        m.set_column(0, a).set_column(1, b).set_column(2, c);
        m
    }

    /// The normal matrix of `m`: the inverse-transpose of its upper-left 3x3.
    ///
    /// Transforming normals with it keeps them perpendicular to surfaces under
    /// non-uniform scale. A singular input yields [`Mat3::ZERO`].
    pub fn normal_matrix(m: &Mat4) -> Self {
        let mut n = Self::from_mat4(m);
        n.inverse().transpose();
        n
    }

    /// Overwrites column `index` (0..=2) with `v`.
    ///
    /// # Panics
    /// Panics if `index > 2`.
    #[inline]
    pub fn set_column(&mut self, index: usize, v: Vec3) -> &mut Self {
        v.write_to_slice(&mut self.elements, index * 3);
        self
    }

    /// Returns column `index` (0..=2).
    ///
    /// # Panics
    /// Panics if `index > 2`.
    #[inline]
    pub fn column(&self, index: usize) -> Vec3 {
        let mut c = Vec3::ZERO;
        c.set_from_slice(&self.elements, index * 3);
        c
    }

    // --- 2D affine transforms (pre-multiplied) ---

    /// `self = T(v) * self`.
    #[inline]
    pub fn translate(&mut self, v: Vec2) -> &mut Self {
        let t = &mut self.elements;
        for col in 0..3 {
            let w = t[col * 3 + 2];
            t[col * 3] += v.x * w;
            t[col * 3 + 1] += v.y * w;
        }
        self
    }

    /// `self = R(rad) * self`, a counter-clockwise rotation in the plane.
    #[inline]
    pub fn rotate(&mut self, rad: f32) -> &mut Self {
        let (s, c) = rad.sin_cos();
        let t = &mut self.elements;
        for col in 0..3 {
            let a = t[col * 3];
            let b = t[col * 3 + 1];
            t[col * 3] = c * a - s * b;
            t[col * 3 + 1] = s * a + c * b;
        }
        self
    }

    /// `self = S(v) * self`.
    #[inline]
    pub fn scale(&mut self, v: Vec2) -> &mut Self {
        let t = &mut self.elements;
        for col in 0..3 {
            t[col * 3] *= v.x;
            t[col * 3 + 1] *= v.y;
        }
        self
    }

    // --- Products ---

    /// `self = a * b`. Both operands are read before `self` is written.
    pub fn multiply_matrices(&mut self, a: &Mat3, b: &Mat3) -> &mut Self {
        let a = a.elements;
        let b = b.elements;
        for col in 0..3 {
            for row in 0..3 {
                self.elements[col * 3 + row] = a[row] * b[col * 3]
                    + a[3 + row] * b[col * 3 + 1]
                    + a[6 + row] * b[col * 3 + 2];
            }
        }
        self
    }

    /// `self = self * m`.
    #[inline]
    pub fn multiply(&mut self, m: &Mat3) -> &mut Self {
        let a = *self;
        self.multiply_matrices(&a, m)
    }

    /// `self = m * self`.
    #[inline]
    pub fn premultiply(&mut self, m: &Mat3) -> &mut Self {
        let b = *self;
        self.multiply_matrices(m, &b)
    }

    /// Transposes the matrix in place.
    #[inline]
    pub fn transpose(&mut self) -> &mut Self {
        let t = &mut self.elements;
        t.swap(1, 3);
        t.swap(2, 6);
        t.swap(5, 7);
        self
    }

    /// The determinant.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let t = &self.elements;
        t[0] * (t[8] * t[4] - t[5] * t[7])
            + t[1] * (t[5] * t[6] - t[8] * t[3])
            + t[2] * (t[7] * t[3] - t[4] * t[6])
    }

    /// Inverts the matrix in place. A singular matrix becomes [`Mat3::ZERO`].
    pub fn inverse(&mut self) -> &mut Self {
        let [n11, n21, n31, n12, n22, n32, n13, n23, n33] = self.elements;

        let t11 = n33 * n22 - n32 * n23;
        let t12 = n32 * n13 - n33 * n12;
        let t13 = n23 * n12 - n22 * n13;

        let det = n11 * t11 + n21 * t12 + n31 * t13;
        if det == 0.0 {
            *self = Self::ZERO;
            return self;
        }
        let inv = 1.0 / det;

        self.elements = [
            t11 * inv,
            (n31 * n23 - n33 * n21) * inv,
            (n32 * n21 - n31 * n22) * inv,
            t12 * inv,
            (n33 * n11 - n31 * n13) * inv,
            (n31 * n12 - n32 * n11) * inv,
            t13 * inv,
            (n21 * n13 - n23 * n11) * inv,
            (n22 * n11 - n21 * n12) * inv,
        ];
        self
    }

    /// Returns the elements in column-major order.
    #[inline]
    pub fn to_array(&self) -> [f32; 9] {
        self.elements
    }

    /// Reads nine column-major elements from `a` starting at `offset`.
    ///
    /// # Panics
    /// Panics if `a` is shorter than `offset + 9`.
    #[inline]
    pub fn set_from_slice(&mut self, a: &[f32], offset: usize) -> &mut Self {
        self.elements.copy_from_slice(&a[offset..offset + 9]);
        self
    }
}

impl Default for Mat3 {
    /// Returns the identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ops::Mul<Mat3> for Mat3 {
    type Output = Mat3;
    #[inline]
    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut out = Mat3::ZERO;
        out.multiply_matrices(&self, &rhs);
        out
    }
}

impl ops::Mul<Vec3> for Mat3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        let mut v = rhs;
        v.apply_matrix3(&self);
        v
    }
}

impl ops::Index<usize> for Mat3 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl ops::IndexMut<usize> for Mat3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.elements[index]
    }
}

impl_approx_eq!(Mat3[elements]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EPSILON, FRAC_PI_2};
    use approx::assert_relative_eq;

    #[test]
    fn test_set_transposes_into_storage() {
        let mut m = Mat3::IDENTITY;
        m.set(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(m.elements, [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
        assert_eq!(m.column(1), Vec3::new(2.0, 5.0, 8.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let mut m = Mat3::IDENTITY;
        m.set(2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 4.0);
        let mut inv = m;
        inv.inverse();
        assert_relative_eq!(m * inv, Mat3::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(m.determinant(), 25.0, epsilon = EPSILON);
    }

    #[test]
    fn test_inverse_of_singular_matrix_is_zero() {
        let mut m = Mat3::from_basis(Vec3::X, Vec3::X, Vec3::Z);
        assert_eq!(m.determinant(), 0.0);
        m.inverse();
        assert_eq!(m, Mat3::ZERO);
    }

    #[test]
    fn test_from_basis_places_columns() {
        let m = Mat3::from_basis(Vec3::Y, Vec3::Z, Vec3::X);
        assert_eq!(m.column(0), Vec3::Y);
        assert_eq!(m.column(1), Vec3::Z);
        assert_eq!(m.column(2), Vec3::X);
        assert_eq!(m * Vec3::X, Vec3::Y);
    }

    #[test]
    fn test_2d_transforms_are_pre_multiplied() {
        // Scale first, then rotate, then translate: each call applies after
        // the transforms already in the matrix.
        let mut m = Mat3::IDENTITY;
        m.scale(Vec2::new(2.0, 2.0))
            .rotate(FRAC_PI_2)
            .translate(Vec2::new(10.0, 0.0));
        let mut p = Vec2::new(1.0, 0.0);
        p.apply_matrix3(&m);
        assert_relative_eq!(p, Vec2::new(10.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_normal_matrix_under_non_uniform_scale() {
        let mut m = Mat4::IDENTITY;
        m.scale(Vec3::new(2.0, 1.0, 1.0));
        let n = Mat3::normal_matrix(&m);
        assert_relative_eq!(n.column(0), Vec3::new(0.5, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(n.column(1), Vec3::Y, epsilon = EPSILON);
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, 0.5), 0.8);
        let m = Mat4::from_quaternion(&q);
        assert_relative_eq!(Mat3::normal_matrix(&m), Mat3::from_quaternion(&q), epsilon = 1e-5);
    }

    #[test]
    fn test_multiply_and_premultiply() {
        let a = Mat3::from_basis(Vec3::new(1.0, 2.0, 0.0), Vec3::Y, Vec3::Z);
        let b = Mat3::from_basis(Vec3::X, Vec3::new(0.0, 3.0, 1.0), Vec3::Z);
        let mut post = a;
        post.multiply(&b);
        let mut pre = a;
        pre.premultiply(&b);
        assert_eq!(post, a * b);
        assert_eq!(pre, b * a);
    }
}
