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

//! The 4x4 matrix, the numerical core of the transform pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops;

use crate::math::{Quaternion, Vec3, Vec4};

/// A 4x4 column-major matrix.
///
/// Element `i` of [`Mat4::elements`] is row `i % 4`, column `i / 4`, so the
/// translation of an affine transform lives at indices 12, 13 and 14.
///
/// The matrix may hold any projective transform. Only [`Mat4::get_translation`],
/// [`Mat4::get_scaling`], [`Mat4::get_rotation`] and [`Mat4::decompose`] assume
/// an affine matrix whose upper-left 3x3 is a rotation times a scale, without
/// shear.
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Mat4 {
    /// The sixteen elements in column-major order.
    pub elements: [f32; 16],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// A matrix with all elements set to `0.0`. This is also the result of
    /// inverting a singular matrix.
    pub const ZERO: Self = Self { elements: [0.0; 16] };

    /// Creates a matrix from sixteen elements already in column-major order.
    #[inline]
    pub const fn from_cols_array(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Creates a matrix from four column vectors.
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        let mut m = Self::ZERO;
        for (i, c) in [c0, c1, c2, c3].iter().enumerate() {
            c.write_to_slice(&mut m.elements, i * 4);
        }
        m
    }

    /// Overwrites every element. Arguments are given in **row-major** order
    /// (`mRC` is row `R`, column `C`) and stored column-major.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub fn set(
        &mut self,
        m11: f32, m12: f32, m13: f32, m14: f32,
        m21: f32, m22: f32, m23: f32, m24: f32,
        m31: f32, m32: f32, m33: f32, m34: f32,
        m41: f32, m42: f32, m43: f32, m44: f32,
    ) -> &mut Self {
        let t = &mut self.elements;
        t[0] = m11; t[4] = m12; t[8] = m13; t[12] = m14;
        t[1] = m21; t[5] = m22; t[9] = m23; t[13] = m24;
        t[2] = m31; t[6] = m32; t[10] = m33; t[14] = m34;
        t[3] = m41; t[7] = m42; t[11] = m43; t[15] = m44;
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
    pub fn copy_from(&mut self, m: &Mat4) -> &mut Self {
        self.elements = m.elements;
        self
    }

    // --- Accessors ---

    /// The x translation (element 12).
    #[inline]
    pub fn x(&self) -> f32 {
        self.elements[12]
    }

    /// The y translation (element 13).
    #[inline]
    pub fn y(&self) -> f32 {
        self.elements[13]
    }

    /// The z translation (element 14).
    #[inline]
    pub fn z(&self) -> f32 {
        self.elements[14]
    }

    /// The homogeneous scale (element 15).
    #[inline]
    pub fn w(&self) -> f32 {
        self.elements[15]
    }

    /// Returns column `index` (0..=3).
    ///
    /// # Panics
    /// Panics if `index > 3`.
    #[inline]
    pub fn column(&self, index: usize) -> Vec4 {
        let mut c = Vec4::ZERO;
        c.set_from_slice(&self.elements, index * 4);
        c
    }

    /// Returns row `index` (0..=3).
    ///
    /// # Panics
    /// Panics if `index > 3`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec4 {
        let e = &self.elements;
        Vec4::new(e[index], e[index + 4], e[index + 8], e[index + 12])
    }

    /// Writes the translation components (elements 12, 13, 14).
    #[inline]
    pub fn set_position(&mut self, v: Vec3) -> &mut Self {
        self.elements[12] = v.x;
        self.elements[13] = v.y;
        self.elements[14] = v.z;
        self
    }

    /// Reads the translation components (elements 12, 13, 14).
    #[inline]
    pub fn get_translation(&self) -> Vec3 {
        Vec3::new(self.elements[12], self.elements[13], self.elements[14])
    }

    /// The per-axis scale, measured as the length of each of the first three
    /// columns. Only meaningful when the upper-left 3x3 has no shear.
    #[inline]
    pub fn get_scaling(&self) -> Vec3 {
        Vec3::new(
            self.column(0).truncate().len(),
            self.column(1).truncate().len(),
            self.column(2).truncate().len(),
        )
    }

    /// The largest column length of the upper-left 3x3.
    ///
    /// Scaling a bounding sphere radius by this value yields a sphere that
    /// encloses the transformed one even under non-uniform scale.
    #[inline]
    pub fn get_max_scale_on_axis(&self) -> f32 {
        let x = self.column(0).truncate().squared_len();
        let y = self.column(1).truncate().squared_len();
        let z = self.column(2).truncate().squared_len();
        x.max(y).max(z).sqrt()
    }

    /// The rotation of an affine matrix, with the per-axis scale divided out.
    ///
    /// A mirrored matrix (negative determinant) has its x scale negated first,
    /// matching [`Mat4::decompose`], so the result is always a proper rotation.
    /// A zero-length column is left as is, so a degenerate matrix yields a
    /// degenerate (but finite) quaternion.
    pub fn get_rotation(&self) -> Quaternion {
        Quaternion::from_rotation_matrix(&self.unscaled(self.signed_scaling()))
    }

    /// [`Mat4::get_scaling`] with the x scale negated when the determinant is
    /// negative.
    fn signed_scaling(&self) -> Vec3 {
        let mut scaling = self.get_scaling();
        if self.determinant() < 0.0 {
            scaling.x = -scaling.x;
        }
        scaling
    }

    /// Returns a copy whose first three columns are divided by `scaling`.
    fn unscaled(&self, scaling: Vec3) -> Mat4 {
        let mut m = *self;
        for (col, s) in scaling.to_array().into_iter().enumerate() {
            if s == 0.0 {
                continue;
            }
            let inv = 1.0 / s;
            for row in 0..3 {
                m.elements[col * 4 + row] *= inv;
            }
        }
        m
    }

    // --- Post/pre multiplied transforms ---

    /// `self = self * T(v)`: translates in the matrix's local frame.
    #[inline]
    pub fn translate(&mut self, v: Vec3) -> &mut Self {
        let t = &mut self.elements;
        let (x, y, z) = (v.x, v.y, v.z);
        t[12] = t[0] * x + t[4] * y + t[8] * z + t[12];
        t[13] = t[1] * x + t[5] * y + t[9] * z + t[13];
        t[14] = t[2] * x + t[6] * y + t[10] * z + t[14];
        t[15] = t[3] * x + t[7] * y + t[11] * z + t[15];
        self
    }

    /// `self = T(v) * self`: translates in the parent frame.
    #[inline]
    #[rustfmt::skip]
    pub fn pre_translate(&mut self, v: Vec3) -> &mut Self {
        let t = &mut self.elements;
        let (x, y, z) = (v.x, v.y, v.z);
        t[0] += x * t[3]; t[4] += x * t[7]; t[8] += x * t[11]; t[12] += x * t[15];
        t[1] += y * t[3]; t[5] += y * t[7]; t[9] += y * t[11]; t[13] += y * t[15];
        t[2] += z * t[3]; t[6] += z * t[7]; t[10] += z * t[11]; t[14] += z * t[15];
        self
    }

    /// `self = self * Rx(rad)`.
    pub fn rotate_x(&mut self, rad: f32) -> &mut Self {
        let (s, c) = rad.sin_cos();
        let t = &mut self.elements;
        for row in 0..4 {
            let a = t[4 + row];
            let b = t[8 + row];
            t[4 + row] = a * c + b * s;
            t[8 + row] = b * c - a * s;
        }
        self
    }

    /// `self = Rx(rad) * self`.
    pub fn pre_rotate_x(&mut self, rad: f32) -> &mut Self {
        let (s, c) = rad.sin_cos();
        let t = &mut self.elements;
        for col in 0..4 {
            let a = t[col * 4 + 1];
            let b = t[col * 4 + 2];
            t[col * 4 + 1] = c * a - s * b;
            t[col * 4 + 2] = s * a + c * b;
        }
        self
    }

    /// `self = self * Ry(rad)`.
    pub fn rotate_y(&mut self, rad: f32) -> &mut Self {
        let (s, c) = rad.sin_cos();
        let t = &mut self.elements;
        for row in 0..4 {
            let a = t[row];
            let b = t[8 + row];
            t[row] = a * c - b * s;
            t[8 + row] = a * s + b * c;
        }
        self
    }

    /// `self = Ry(rad) * self`.
    pub fn pre_rotate_y(&mut self, rad: f32) -> &mut Self {
        let (s, c) = rad.sin_cos();
        let t = &mut self.elements;
        for col in 0..4 {
            let a = t[col * 4];
            let b = t[col * 4 + 2];
            t[col * 4] = c * a + s * b;
            t[col * 4 + 2] = -s * a + c * b;
        }
        self
    }

    /// `self = self * Rz(rad)`.
    pub fn rotate_z(&mut self, rad: f32) -> &mut Self {
        let (s, c) = rad.sin_cos();
        let t = &mut self.elements;
        for row in 0..4 {
            let a = t[row];
            let b = t[4 + row];
            t[row] = a * c + b * s;
            t[4 + row] = b * c - a * s;
        }
        self
    }

    /// `self = Rz(rad) * self`.
    pub fn pre_rotate_z(&mut self, rad: f32) -> &mut Self {
        let (s, c) = rad.sin_cos();
        let t = &mut self.elements;
        for col in 0..4 {
            let a = t[col * 4];
            let b = t[col * 4 + 1];
            t[col * 4] = c * a - s * b;
            t[col * 4 + 1] = s * a + c * b;
        }
        self
    }

    /// `self = self * R(axis, rad)`.
    #[inline]
    pub fn rotate(&mut self, rad: f32, axis: Vec3) -> &mut Self {
        self.multiply(&Self::from_rotation_axis(axis, rad))
    }

    /// `self = R(axis, rad) * self`.
    #[inline]
    pub fn pre_rotate(&mut self, rad: f32, axis: Vec3) -> &mut Self {
        self.premultiply(&Self::from_rotation_axis(axis, rad))
    }

    /// `self = self * S(v)`: scales the first three columns.
    #[inline]
    pub fn scale(&mut self, v: Vec3) -> &mut Self {
        let t = &mut self.elements;
        for (col, s) in v.to_array().into_iter().enumerate() {
            for row in 0..4 {
                t[col * 4 + row] *= s;
            }
        }
        self
    }

    /// `self = S(v) * self`: scales the first three rows.
    #[inline]
    pub fn pre_scale(&mut self, v: Vec3) -> &mut Self {
        let t = &mut self.elements;
        for (row, s) in v.to_array().into_iter().enumerate() {
            for col in 0..4 {
                t[col * 4 + row] *= s;
            }
        }
        self
    }

    // --- Products ---

    /// `self = a * b`.
    ///
    /// Both operands are read in full before `self` is written, so passing
    /// copies of `self` is always correct.
    pub fn multiply_matrices(&mut self, a: &Mat4, b: &Mat4) -> &mut Self {
        let a = a.elements;
        let b = b.elements;
        let t = &mut self.elements;
        for col in 0..4 {
            let (b1, b2, b3, b4) = (b[col * 4], b[col * 4 + 1], b[col * 4 + 2], b[col * 4 + 3]);
            for row in 0..4 {
                t[col * 4 + row] = a[row] * b1 + a[4 + row] * b2 + a[8 + row] * b3 + a[12 + row] * b4;
            }
        }
        self
    }

    /// `self = self * m`.
    #[inline]
    pub fn multiply(&mut self, m: &Mat4) -> &mut Self {
        let a = *self;
        self.multiply_matrices(&a, m)
    }

    /// `self = m * self`.
    #[inline]
    pub fn premultiply(&mut self, m: &Mat4) -> &mut Self {
        let b = *self;
        self.multiply_matrices(m, &b)
    }

    /// Transposes the matrix in place.
    pub fn transpose(&mut self) -> &mut Self {
        let t = &mut self.elements;
        t.swap(1, 4);
        t.swap(2, 8);
        t.swap(3, 12);
        t.swap(6, 9);
        t.swap(7, 13);
        t.swap(11, 14);
        self
    }

    /// The cofactors of the first column, shared by `determinant` and
    /// `inverse`.
    #[inline]
    fn first_column_cofactors(&self) -> [f32; 4] {
        let t = &self.elements;
        let (n12, n22, n32, n42) = (t[4], t[5], t[6], t[7]);
        let (n13, n23, n33, n43) = (t[8], t[9], t[10], t[11]);
        let (n14, n24, n34, n44) = (t[12], t[13], t[14], t[15]);
        [
            n23 * n34 * n42 - n24 * n33 * n42 + n24 * n32 * n43 - n22 * n34 * n43
                - n23 * n32 * n44
                + n22 * n33 * n44,
            n14 * n33 * n42 - n13 * n34 * n42 - n14 * n32 * n43 + n12 * n34 * n43
                + n13 * n32 * n44
                - n12 * n33 * n44,
            n13 * n24 * n42 - n14 * n23 * n42 + n14 * n22 * n43 - n12 * n24 * n43
                - n13 * n22 * n44
                + n12 * n23 * n44,
            n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33 + n12 * n24 * n33
                + n13 * n22 * n34
                - n12 * n23 * n34,
        ]
    }

    /// The full 4x4 determinant, by cofactor expansion along the first column.
    /// No affine structure is assumed.
    pub fn determinant(&self) -> f32 {
        let t = &self.elements;
        let [t11, t12, t13, t14] = self.first_column_cofactors();
        t[0] * t11 + t[1] * t12 + t[2] * t13 + t[3] * t14
    }

    /// Inverts the matrix in place using the adjugate.
    ///
    /// If the determinant is exactly zero the matrix is set to
    /// [`Mat4::ZERO`]. Callers that must distinguish this case check
    /// [`Mat4::determinant`] first.
    pub fn inverse(&mut self) -> &mut Self {
        let [t11, t12, t13, t14] = self.first_column_cofactors();
        let n = self.elements;
        let (n11, n21, n31, n41) = (n[0], n[1], n[2], n[3]);
        let (n12, n22, n32, n42) = (n[4], n[5], n[6], n[7]);
        let (n13, n23, n33, n43) = (n[8], n[9], n[10], n[11]);
        let (n14, n24, n34, n44) = (n[12], n[13], n[14], n[15]);

        let det = n11 * t11 + n21 * t12 + n31 * t13 + n41 * t14;
        if det == 0.0 {
            *self = Self::ZERO;
            return self;
        }
        let inv = 1.0 / det;

        let t = &mut self.elements;
        t[0] = t11 * inv;
        t[1] = (n24 * n33 * n41 - n23 * n34 * n41 - n24 * n31 * n43 + n21 * n34 * n43
            + n23 * n31 * n44
            - n21 * n33 * n44)
            * inv;
        t[2] = (n22 * n34 * n41 - n24 * n32 * n41 + n24 * n31 * n42 - n21 * n34 * n42
            - n22 * n31 * n44
            + n21 * n32 * n44)
            * inv;
        t[3] = (n23 * n32 * n41 - n22 * n33 * n41 - n23 * n31 * n42 + n21 * n33 * n42
            + n22 * n31 * n43
            - n21 * n32 * n43)
            * inv;

        t[4] = t12 * inv;
        t[5] = (n13 * n34 * n41 - n14 * n33 * n41 + n14 * n31 * n43 - n11 * n34 * n43
            - n13 * n31 * n44
            + n11 * n33 * n44)
            * inv;
        t[6] = (n14 * n32 * n41 - n12 * n34 * n41 - n14 * n31 * n42 + n11 * n34 * n42
            + n12 * n31 * n44
            - n11 * n32 * n44)
            * inv;
        t[7] = (n12 * n33 * n41 - n13 * n32 * n41 + n13 * n31 * n42 - n11 * n33 * n42
            - n12 * n31 * n43
            + n11 * n32 * n43)
            * inv;

        t[8] = t13 * inv;
        t[9] = (n14 * n23 * n41 - n13 * n24 * n41 - n14 * n21 * n43 + n11 * n24 * n43
            + n13 * n21 * n44
            - n11 * n23 * n44)
            * inv;
        t[10] = (n12 * n24 * n41 - n14 * n22 * n41 + n14 * n21 * n42 - n11 * n24 * n42
            - n12 * n21 * n44
            + n11 * n22 * n44)
            * inv;
        t[11] = (n13 * n22 * n41 - n12 * n23 * n41 - n13 * n21 * n42 + n11 * n23 * n42
            + n12 * n21 * n43
            - n11 * n22 * n43)
            * inv;

        t[12] = t14 * inv;
        t[13] = (n13 * n24 * n31 - n14 * n23 * n31 + n14 * n21 * n33 - n11 * n24 * n33
            - n13 * n21 * n34
            + n11 * n23 * n34)
            * inv;
        t[14] = (n14 * n22 * n31 - n12 * n24 * n31 - n14 * n21 * n32 + n11 * n24 * n32
            + n12 * n21 * n34
            - n11 * n22 * n34)
            * inv;
        t[15] = (n12 * n23 * n31 - n13 * n22 * n31 + n13 * n21 * n32 - n11 * n23 * n32
            - n12 * n21 * n33
            + n11 * n22 * n33)
            * inv;

        self
    }

    // --- Constructors ---

    /// A rotation of `rad` radians about `axis` (Rodrigues' formula).
    /// The axis is normalized first.
    #[rustfmt::skip]
    pub fn from_rotation_axis(axis: Vec3, rad: f32) -> Self {
        let mut axis = axis;
        axis.normalize();
        let (s, c) = rad.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let (tx, ty) = (t * x, t * y);

        let mut m = Self::IDENTITY;
        m.set(
            tx * x + c,     tx * y - s * z, tx * z + s * y, 0.0,
            tx * y + s * z, ty * y + c,     ty * z - s * x, 0.0,
            tx * z - s * y, ty * z + s * x, t * z * z + c,  0.0,
            0.0,            0.0,            0.0,            1.0,
        );
        m
    }

    /// A right-handed perspective projection mapping depth to `[-1, 1]`.
    ///
    /// `fov` is the vertical field of view in radians. `far` may be
    /// `f32::INFINITY`, which yields the infinite far plane form.
    #[rustfmt::skip]
    pub fn from_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let y_scale = 1.0 / (fov / 2.0).tan();
        let x_scale = y_scale / aspect;
        let (depth, bias) = if far.is_infinite() {
            (-1.0, -2.0 * near)
        } else {
            let nf = 1.0 / (near - far);
            ((far + near) * nf, 2.0 * far * near * nf)
        };
        Self::from_cols_array([
            x_scale, 0.0,     0.0,   0.0,
            0.0,     y_scale, 0.0,   0.0,
            0.0,     0.0,     depth, -1.0,
            0.0,     0.0,     bias,  0.0,
        ])
    }

    /// A right-handed orthographic projection mapping depth to `[-1, 1]`.
    #[rustfmt::skip]
    pub fn from_orthogonal(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);
        Self::from_cols_array([
            -2.0 * lr,            0.0,                  0.0,                0.0,
            0.0,                  -2.0 * bt,            0.0,                0.0,
            0.0,                  0.0,                  2.0 * nf,           0.0,
            (left + right) * lr,  (top + bottom) * bt,  (far + near) * nf,  1.0,
        ])
    }

    /// A pure rotation from a (unit) quaternion.
    #[inline]
    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::compose(q, Vec3::ZERO, Vec3::ONE)
    }

    /// Builds `T(position) * R(q) * S(scale)` directly.
    pub fn compose(q: &Quaternion, position: Vec3, scale: Vec3) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, yx, yy) = (x * x2, y * x2, y * y2);
        let (zx, zy, zz) = (z * x2, z * y2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        let (sx, sy, sz) = (scale.x, scale.y, scale.z);

        Self::from_cols_array([
            (1.0 - (yy + zz)) * sx,
            (yx + wz) * sx,
            (zx - wy) * sx,
            0.0,
            (yx - wz) * sy,
            (1.0 - (xx + zz)) * sy,
            (zy + wx) * sy,
            0.0,
            (zx + wy) * sz,
            (zy - wx) * sz,
            (1.0 - (xx + yy)) * sz,
            0.0,
            position.x,
            position.y,
            position.z,
            1.0,
        ])
    }

    /// Splits an affine matrix into `(rotation, translation, scale)`.
    ///
    /// A negative determinant (a mirrored transform) is attributed to the x
    /// scale, so `compose(decompose(m))` reproduces `m` for shear-free
    /// matrices. The returned quaternion may be the negation of the one that
    /// built the matrix; both encode the same rotation.
    pub fn decompose(&self) -> (Quaternion, Vec3, Vec3) {
        let scaling = self.signed_scaling();
        let rotation = Quaternion::from_rotation_matrix(&self.unscaled(scaling));
        (rotation, self.get_translation(), scaling)
    }

    /// A transform placed at `eye` whose +z axis points from `target` toward
    /// `eye`, with its y axis as close to `up` as possible.
    ///
    /// Every normalization is guarded: if `eye == target` the forward axis
    /// stays zero instead of becoming NaN. When `up` is parallel to the forward
    /// axis it is nudged slightly so a right axis still exists.
    #[rustfmt::skip]
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut z = Vec3::ZERO;
        z.sub_vectors(eye, target).normalize();

        let mut x = Vec3::ZERO;
        x.cross_vectors(up, z);
        if x.squared_len() == 0.0 && z.squared_len() > 0.0 {
            let mut nudged = up;
            if up.z != 0.0 {
                nudged.x += 1e-6;
            } else if up.y != 0.0 {
                nudged.z += 1e-6;
            } else {
                nudged.y += 1e-6;
            }
            x.cross_vectors(nudged, z);
        }
        x.normalize();

        let mut y = Vec3::ZERO;
        y.cross_vectors(z, x);

        Self::from_cols_array([
            x.x,   x.y,   x.z,   0.0,
            y.x,   y.y,   y.z,   0.0,
            z.x,   z.y,   z.z,   0.0,
            eye.x, eye.y, eye.z, 1.0,
        ])
    }

    // --- Serialization helpers ---

    /// Returns the elements in column-major order.
    #[inline]
    pub fn to_array(&self) -> [f32; 16] {
        self.elements
    }

    /// Reads sixteen column-major elements from `a` starting at `offset`.
    ///
    /// # Panics
    /// Panics if `a` is shorter than `offset + 16`.
    #[inline]
    pub fn set_from_slice(&mut self, a: &[f32], offset: usize) -> &mut Self {
        self.elements.copy_from_slice(&a[offset..offset + 16]);
        self
    }

    /// Writes sixteen column-major elements into `out` starting at `offset`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than `offset + 16`.
    #[inline]
    pub fn write_to_slice(&self, out: &mut [f32], offset: usize) {
        out[offset..offset + 16].copy_from_slice(&self.elements);
    }
}

impl Default for Mat4 {
    /// Returns the identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ops::Mul<Mat4> for Mat4 {
    type Output = Mat4;
    /// Matrix product `self * rhs`.
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut out = Mat4::ZERO;
        out.multiply_matrices(&self, &rhs);
        out
    }
}

impl ops::Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        let mut v = rhs;
        v.apply_matrix4(&self);
        v
    }
}

impl ops::Index<usize> for Mat4 {
    type Output = f32;
    /// Element access in column-major order.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl ops::IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.elements[index]
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            let r = self.row(row);
            writeln!(f, "|  {}, {}, {}, {}", r.x, r.y, r.z, r.w)?;
        }
        Ok(())
    }
}

impl_approx_eq!(Mat4[elements]);
