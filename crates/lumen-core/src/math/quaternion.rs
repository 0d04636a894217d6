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

//! Provides a Quaternion type for representing 3D rotations.

use serde::{Deserialize, Serialize};
use std::ops;

use super::{Euler, EulerOrder, Mat3, Mat4, Vec3};

/// Below this distance from `cos = 1` slerp falls back to a normalized lerp.
const SLERP_LINEAR_THRESHOLD: f32 = 1e-6;

/// Represents a quaternion for efficient 3D rotations.
///
/// A quaternion is stored as `(x, y, z, w)`, where `[x, y, z]` is the "vector" part
/// and `w` is the "scalar" part. For representing rotations, it should be a "unit
/// quaternion" where `x² + y² + z² + w² = 1`. This is assumed, not enforced;
/// [`Quaternion::normalize`] restores it.
///
/// Mutating methods write into `self` and return `&mut Self`. The `*` operator
/// composes rotations by value (`a * b` applies `b` first, then `a`).
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion. For creating rotations,
    /// prefer using `from_axis_angle` or other rotation-specific constructors.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion representing a rotation around a given axis by a given angle.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation. It is normalized first.
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let mut axis = axis;
        axis.normalize();
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Creates a quaternion from the upper 3x3 of a 4x4 rotation matrix.
    ///
    /// The matrix must be a pure rotation; remove any scale first.
    #[inline]
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        let e = &m.elements;
        Self::from_rotation_elements([e[0], e[1], e[2], e[4], e[5], e[6], e[8], e[9], e[10]])
    }

    /// Creates a quaternion from a 3x3 rotation matrix.
    #[inline]
    pub fn from_mat3(m: &Mat3) -> Self {
        Self::from_rotation_elements(m.elements)
    }

    /// Converts a column-major 3x3 rotation.
    ///
    /// The branch is chosen by the largest of `w², x², y², z²` so the square
    /// root is never taken of a small, noisy value.
    fn from_rotation_elements(e: [f32; 9]) -> Self {
        let [m00, m10, m20, m01, m11, m21, m02, m12, m22] = e;

        // Algorithm from http://www.euclideanspace.com/maths/geometry/rotations/conversions/matrixToQuaternion/index.htm
        let trace = m00 + m11 + m22;
        let mut q = if trace > 0.0 {
            let s = 2.0 * (trace + 1.0).sqrt();
            Self::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };
        q.normalize();
        q
    }

    /// Creates a quaternion from Euler angles, honouring the Euler's order.
    pub fn from_euler(euler: &Euler) -> Self {
        let (sx, cx) = (euler.x * 0.5).sin_cos();
        let (sy, cy) = (euler.y * 0.5).sin_cos();
        let (sz, cz) = (euler.z * 0.5).sin_cos();

        match euler.order {
            EulerOrder::XYZ => Self::new(
                sx * cy * cz + cx * sy * sz,
                cx * sy * cz - sx * cy * sz,
                cx * cy * sz + sx * sy * cz,
                cx * cy * cz - sx * sy * sz,
            ),
            EulerOrder::YXZ => Self::new(
                sx * cy * cz + cx * sy * sz,
                cx * sy * cz - sx * cy * sz,
                cx * cy * sz - sx * sy * cz,
                cx * cy * cz + sx * sy * sz,
            ),
            EulerOrder::ZXY => Self::new(
                sx * cy * cz - cx * sy * sz,
                cx * sy * cz + sx * cy * sz,
                cx * cy * sz + sx * sy * cz,
                cx * cy * cz - sx * sy * sz,
            ),
            EulerOrder::ZYX => Self::new(
                sx * cy * cz - cx * sy * sz,
                cx * sy * cz + sx * cy * sz,
                cx * cy * sz - sx * sy * cz,
                cx * cy * cz + sx * sy * sz,
            ),
            EulerOrder::YZX => Self::new(
                sx * cy * cz + cx * sy * sz,
                cx * sy * cz + sx * cy * sz,
                cx * cy * sz - sx * sy * cz,
                cx * cy * cz - sx * sy * sz,
            ),
            EulerOrder::XZY => Self::new(
                sx * cy * cz - cx * sy * sz,
                cx * sy * cz - sx * cy * sz,
                cx * cy * sz + sx * sy * cz,
                cx * cy * cz + sx * sy * sz,
            ),
        }
    }

    /// Resets to the identity rotation.
    #[inline]
    pub fn identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Sets all four components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) -> &mut Self {
        *self = Self::new(x, y, z, w);
        self
    }

    /// Copies the components of `q` into `self`.
    #[inline]
    pub fn copy_from(&mut self, q: &Quaternion) -> &mut Self {
        *self = *q;
        self
    }

    /// Rotates by `rad` about the local X axis (`self = self * Rx`).
    pub fn rotate_x(&mut self, rad: f32) -> &mut Self {
        let (bx, bw) = (rad * 0.5).sin_cos();
        let Self { x, y, z, w } = *self;
        self.set(x * bw + w * bx, y * bw + z * bx, z * bw - y * bx, w * bw - x * bx)
    }

    /// Rotates by `rad` about the local Y axis (`self = self * Ry`).
    pub fn rotate_y(&mut self, rad: f32) -> &mut Self {
        let (by, bw) = (rad * 0.5).sin_cos();
        let Self { x, y, z, w } = *self;
        self.set(x * bw - z * by, y * bw + w * by, z * bw + x * by, w * bw - y * by)
    }

    /// Rotates by `rad` about the local Z axis (`self = self * Rz`).
    pub fn rotate_z(&mut self, rad: f32) -> &mut Self {
        let (bz, bw) = (rad * 0.5).sin_cos();
        let Self { x, y, z, w } = *self;
        self.set(x * bw + y * bz, y * bw - x * bz, z * bw + w * bz, w * bw - z * bz)
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn squared_len(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn len(&self) -> f32 {
        self.squared_len().sqrt()
    }

    /// Scales to unit length. A zero quaternion is left unchanged.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len_sq = self.squared_len();
        if len_sq > 0.0 {
            *self = *self * (1.0 / len_sq.sqrt());
        }
        self
    }

    /// Negates the vector part.
    #[inline]
    pub fn conjugate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self
    }

    /// Replaces `self` with its multiplicative inverse (the conjugate divided
    /// by the squared length). A zero quaternion stays zero.
    #[inline]
    pub fn inverse(&mut self) -> &mut Self {
        let dot = self.squared_len();
        let inv = if dot == 0.0 { 0.0 } else { 1.0 / dot };
        self.conjugate();
        *self = *self * inv;
        self
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Quaternion) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// `self = self * q`.
    #[inline]
    pub fn multiply(&mut self, q: &Quaternion) -> &mut Self {
        *self = *self * *q;
        self
    }

    /// `self = q * self`.
    #[inline]
    pub fn premultiply(&mut self, q: &Quaternion) -> &mut Self {
        *self = *q * *self;
        self
    }

    /// `self = a * b`.
    #[inline]
    pub fn multiply_quaternions(&mut self, a: &Quaternion, b: &Quaternion) -> &mut Self {
        *self = *a * *b;
        self
    }

    /// Spherical linear interpolation from `self` toward `q`.
    ///
    /// Follows the shorter arc: when the dot product is negative `q` is negated
    /// first. When the two rotations are within `1e-6` of `cos = 1`, the sine
    /// denominator is unusable and a normalized linear interpolation is used
    /// instead. `t` is not clamped.
    pub fn slerp(&mut self, q: &Quaternion, t: f32) -> &mut Self {
        let mut end = *q;
        let mut cos_theta = self.dot(end);
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            end = -end;
        }

        if 1.0 - cos_theta > SLERP_LINEAR_THRESHOLD {
            let omega = cos_theta.acos();
            let sin_omega = omega.sin();
            let scale_start = ((1.0 - t) * omega).sin() / sin_omega;
            let scale_end = (t * omega).sin() / sin_omega;
            *self = (*self * scale_start) + (end * scale_end);
            self
        } else {
            *self = (*self * (1.0 - t)) + (end * t);
            self.normalize()
        }
    }

    /// Returns the components as `[x, y, z, w]`.
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Reads four components from `a` starting at `offset`.
    ///
    /// # Panics
    /// Panics if `a` is shorter than `offset + 4`.
    #[inline]
    pub fn set_from_slice(&mut self, a: &[f32], offset: usize) -> &mut Self {
        self.set(a[offset], a[offset + 1], a[offset + 2], a[offset + 3])
    }
}

// --- Operator Overloads ---

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ops::Mul<Quaternion> for Quaternion {
    type Output = Self;

    /// Hamilton product: the rotation `rhs` followed by `self`.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl ops::MulAssign<Quaternion> for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl ops::Mul<Vec3> for Quaternion {
    type Output = Vec3;

    /// Rotates a vector.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        let mut v = rhs;
        v.apply_quaternion(&self);
        v
    }
}

impl ops::Add<Quaternion> for Quaternion {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl ops::Mul<f32> for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar, self.w * scalar)
    }
}

impl ops::Neg for Quaternion {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl ops::Index<usize> for Quaternion {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Index out of bounds for Quaternion"),
        }
    }
}

impl_approx_eq!(Quaternion { x, y, z, w });
