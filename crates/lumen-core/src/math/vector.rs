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

//! Provides 2D, 3D, and 4D vector types and their associated operations.
//!
//! Mutating methods (`add`, `sub`, `scale`, `normalize`, ...) write into `self`
//! and return `&mut Self` for chaining. The `*_vectors` variants write the
//! combination of two other operands into `self` and leave those operands
//! untouched. Operator overloads (`a + b`, `v * 2.0`, ...) are available for
//! purely value-based arithmetic.
//!
//! Normalizing a zero-length vector leaves it unchanged for every type here.

use serde::{Deserialize, Serialize};
use std::ops;

use super::{clamp, Mat3, Mat4, Quaternion, FRAC_PI_2};

// --- Vec2 ---

/// A 2-dimensional vector with `f32` components.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Vec2 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
}

impl Vec2 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    /// Creates a new `Vec2` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Sets both components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Copies the components of `v` into `self`.
    #[inline]
    pub fn copy_from(&mut self, v: Vec2) -> &mut Self {
        *self = v;
        self
    }

    /// `self += v`.
    #[inline]
    pub fn add(&mut self, v: Vec2) -> &mut Self {
        self.add_vectors(*self, v)
    }

    /// `self = a + b`.
    #[inline]
    pub fn add_vectors(&mut self, a: Vec2, b: Vec2) -> &mut Self {
        self.x = a.x + b.x;
        self.y = a.y + b.y;
        self
    }

    /// `self -= v`.
    #[inline]
    pub fn sub(&mut self, v: Vec2) -> &mut Self {
        self.sub_vectors(*self, v)
    }

    /// `self = a - b`.
    #[inline]
    pub fn sub_vectors(&mut self, a: Vec2, b: Vec2) -> &mut Self {
        self.x = a.x - b.x;
        self.y = a.y - b.y;
        self
    }

    /// Component-wise multiplication.
    #[inline]
    pub fn multiply(&mut self, v: Vec2) -> &mut Self {
        self.x *= v.x;
        self.y *= v.y;
        self
    }

    /// Component-wise division.
    #[inline]
    pub fn divide(&mut self, v: Vec2) -> &mut Self {
        self.x /= v.x;
        self.y /= v.y;
        self
    }

    /// Multiplies both components by `s`.
    #[inline]
    pub fn scale(&mut self, s: f32) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self
    }

    /// Divides both components by `s`.
    #[inline]
    pub fn divide_scalar(&mut self, s: f32) -> &mut Self {
        self.scale(1.0 / s)
    }

    /// Replaces each component with its reciprocal.
    #[inline]
    pub fn inverse(&mut self) -> &mut Self {
        self.x = 1.0 / self.x;
        self.y = 1.0 / self.y;
        self
    }

    /// Flips the sign of both components.
    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }

    /// Scales the vector to unit length. A zero vector is left unchanged.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len_sq = self.squared_len();
        if len_sq > 0.0 {
            self.scale(1.0 / len_sq.sqrt());
        }
        self
    }

    /// Moves `self` toward `v` by the factor `t` (unclamped).
    #[inline]
    pub fn lerp(&mut self, v: Vec2, t: f32) -> &mut Self {
        self.x += t * (v.x - self.x);
        self.y += t * (v.y - self.y);
        self
    }

    /// Transforms the point by a 3x3 matrix, treating it as `(x, y, 1)`.
    #[inline]
    pub fn apply_matrix3(&mut self, m: &Mat3) -> &mut Self {
        let e = &m.elements;
        let (x, y) = (self.x, self.y);
        self.x = e[0] * x + e[3] * y + e[6];
        self.y = e[1] * x + e[4] * y + e[7];
        self
    }

    /// Transforms the point by a 4x4 matrix, treating it as `(x, y, 0, 1)`
    /// and dividing by the resulting `w` when it is non-zero.
    #[inline]
    pub fn apply_matrix4(&mut self, m: &Mat4) -> &mut Self {
        let e = &m.elements;
        let (x, y) = (self.x, self.y);
        let w = e[3] * x + e[7] * y + e[15];
        let w = if w == 0.0 { 1.0 } else { w };
        self.x = (e[0] * x + e[4] * y + e[12]) / w;
        self.y = (e[1] * x + e[5] * y + e[13]) / w;
        self
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, v: Vec2) -> f32 {
        self.x * v.x + self.y * v.y
    }

    /// The scalar 2D cross product, i.e. the z component of the 3D cross
    /// product of `(self, 0)` and `(v, 0)`.
    #[inline]
    pub fn cross(&self, v: Vec2) -> f32 {
        self.x * v.y - self.y * v.x
    }

    /// Calculates the squared length (magnitude) of the vector.
    #[inline]
    pub fn squared_len(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the vector.
    #[inline]
    pub fn len(&self) -> f32 {
        self.squared_len().sqrt()
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(&self, v: Vec2) -> f32 {
        self.squared_distance(v).sqrt()
    }

    /// Squared distance between two points.
    #[inline]
    pub fn squared_distance(&self, v: Vec2) -> f32 {
        let dx = v.x - self.x;
        let dy = v.y - self.y;
        dx * dx + dy * dy
    }

    /// Exact component-wise equality.
    #[inline]
    pub fn equals(&self, v: Vec2) -> bool {
        self.x == v.x && self.y == v.y
    }

    /// Returns the components as an array.
    #[inline]
    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Reads two components from `a` starting at `offset`.
    ///
    /// # Panics
    /// Panics if `a` is shorter than `offset + 2`.
    #[inline]
    pub fn set_from_slice(&mut self, a: &[f32], offset: usize) -> &mut Self {
        self.set(a[offset], a[offset + 1])
    }

    /// Writes two components into `out` starting at `offset`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than `offset + 2`.
    #[inline]
    pub fn write_to_slice(&self, out: &mut [f32], offset: usize) {
        out[offset..offset + 2].copy_from_slice(&self.to_array());
    }
}

impl ops::Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl ops::Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl ops::Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl ops::Index<usize> for Vec2 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Index out of bounds for Vec2"),
        }
    }
}

impl ops::IndexMut<usize> for Vec2 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Index out of bounds for Vec2"),
        }
    }
}

impl From<[f32; 2]> for Vec2 {
    #[inline]
    fn from(a: [f32; 2]) -> Self {
        Self::new(a[0], a[1])
    }
}

impl_approx_eq!(Vec2 { x, y });

// --- Vec3 ---

/// A 3-dimensional vector with `f32` components.
///
/// Used for positions, directions, scales and plane normals. Besides the named
/// fields, the components are reachable by index (`v[0]`, `v[1]`, `v[2]`).
#[derive(
    Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Vec3 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl Vec3 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new `Vec3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Sets all three components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Copies the components of `v` into `self`.
    #[inline]
    pub fn copy_from(&mut self, v: Vec3) -> &mut Self {
        *self = v;
        self
    }

    /// `self += v`.
    #[inline]
    pub fn add(&mut self, v: Vec3) -> &mut Self {
        self.add_vectors(*self, v)
    }

    /// `self = a + b`. Neither operand is modified.
    #[inline]
    pub fn add_vectors(&mut self, a: Vec3, b: Vec3) -> &mut Self {
        self.x = a.x + b.x;
        self.y = a.y + b.y;
        self.z = a.z + b.z;
        self
    }

    /// `self -= v`.
    #[inline]
    pub fn sub(&mut self, v: Vec3) -> &mut Self {
        self.sub_vectors(*self, v)
    }

    /// `self = a - b`. Neither operand is modified.
    #[inline]
    pub fn sub_vectors(&mut self, a: Vec3, b: Vec3) -> &mut Self {
        self.x = a.x - b.x;
        self.y = a.y - b.y;
        self.z = a.z - b.z;
        self
    }

    /// Component-wise multiplication.
    #[inline]
    pub fn multiply(&mut self, v: Vec3) -> &mut Self {
        self.x *= v.x;
        self.y *= v.y;
        self.z *= v.z;
        self
    }

    /// Component-wise division.
    #[inline]
    pub fn divide(&mut self, v: Vec3) -> &mut Self {
        self.x /= v.x;
        self.y /= v.y;
        self.z /= v.z;
        self
    }

    /// Multiplies every component by `s`.
    #[inline]
    pub fn scale(&mut self, s: f32) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self.z *= s;
        self
    }

    /// Divides every component by `s`.
    #[inline]
    pub fn divide_scalar(&mut self, s: f32) -> &mut Self {
        self.scale(1.0 / s)
    }

    /// Replaces each component with its reciprocal.
    #[inline]
    pub fn inverse(&mut self) -> &mut Self {
        self.x = 1.0 / self.x;
        self.y = 1.0 / self.y;
        self.z = 1.0 / self.z;
        self
    }

    /// Flips the sign of every component.
    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self
    }

    /// Scales the vector to unit length.
    ///
    /// A zero-length vector is left unchanged rather than turned into NaNs.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len_sq = self.squared_len();
        if len_sq > 0.0 {
            self.scale(1.0 / len_sq.sqrt());
        }
        self
    }

    /// `self = self × v`.
    #[inline]
    pub fn cross(&mut self, v: Vec3) -> &mut Self {
        self.cross_vectors(*self, v)
    }

    /// `self = a × b`. Neither operand is modified.
    #[inline]
    pub fn cross_vectors(&mut self, a: Vec3, b: Vec3) -> &mut Self {
        self.x = a.y * b.z - a.z * b.y;
        self.y = a.z * b.x - a.x * b.z;
        self.z = a.x * b.y - a.y * b.x;
        self
    }

    /// Moves `self` toward `v` by the factor `t` (unclamped).
    #[inline]
    pub fn lerp(&mut self, v: Vec3, t: f32) -> &mut Self {
        self.x += t * (v.x - self.x);
        self.y += t * (v.y - self.y);
        self.z += t * (v.z - self.z);
        self
    }

    /// Multiplies the vector by a 3x3 matrix.
    #[inline]
    pub fn apply_matrix3(&mut self, m: &Mat3) -> &mut Self {
        let e = &m.elements;
        let (x, y, z) = (self.x, self.y, self.z);
        self.x = e[0] * x + e[3] * y + e[6] * z;
        self.y = e[1] * x + e[4] * y + e[7] * z;
        self.z = e[2] * x + e[5] * y + e[8] * z;
        self
    }

    /// Transforms the point by a 4x4 matrix.
    ///
    /// The point is treated as `(x, y, z, 1)`. The result is divided by the
    /// homogeneous `w` so projection matrices yield normalized device
    /// coordinates; a `w` of exactly zero is treated as `1`. For affine
    /// matrices `w` is always `1` and the divide is a no-op.
    #[inline]
    pub fn apply_matrix4(&mut self, m: &Mat4) -> &mut Self {
        let e = &m.elements;
        let (x, y, z) = (self.x, self.y, self.z);
        let w = e[3] * x + e[7] * y + e[11] * z + e[15];
        let w = if w == 0.0 { 1.0 } else { w };
        self.x = (e[0] * x + e[4] * y + e[8] * z + e[12]) / w;
        self.y = (e[1] * x + e[5] * y + e[9] * z + e[13]) / w;
        self.z = (e[2] * x + e[6] * y + e[10] * z + e[14]) / w;
        self
    }

    /// Rotates the vector by a quaternion.
    #[inline]
    pub fn apply_quaternion(&mut self, q: &Quaternion) -> &mut Self {
        let (x, y, z) = (self.x, self.y, self.z);
        let (qx, qy, qz, qw) = (q.x, q.y, q.z, q.w);

        let mut uvx = qy * z - qz * y;
        let mut uvy = qz * x - qx * z;
        let mut uvz = qx * y - qy * x;

        let mut uuvx = qy * uvz - qz * uvy;
        let mut uuvy = qz * uvx - qx * uvz;
        let mut uuvz = qx * uvy - qy * uvx;

        let w2 = qw * 2.0;
        uvx *= w2;
        uvy *= w2;
        uvz *= w2;

        uuvx *= 2.0;
        uuvy *= 2.0;
        uuvz *= 2.0;

        self.x = x + uvx + uuvx;
        self.y = y + uvy + uuvy;
        self.z = z + uvz + uuvz;
        self
    }

    /// Transforms a direction by the upper 3x3 of `m` and normalizes it.
    /// Translation is ignored.
    #[inline]
    pub fn transform_direction(&mut self, m: &Mat4) -> &mut Self {
        let e = &m.elements;
        let (x, y, z) = (self.x, self.y, self.z);
        self.x = e[0] * x + e[4] * y + e[8] * z;
        self.y = e[1] * x + e[5] * y + e[9] * z;
        self.z = e[2] * x + e[6] * y + e[10] * z;
        self.normalize()
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, v: Vec3) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Calculates the squared length (magnitude) of the vector.
    /// This is faster than `len()` as it avoids a square root.
    #[inline]
    pub fn squared_len(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the vector.
    #[inline]
    pub fn len(&self) -> f32 {
        self.squared_len().sqrt()
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(&self, v: Vec3) -> f32 {
        self.squared_distance(v).sqrt()
    }

    /// Squared distance between two points.
    #[inline]
    pub fn squared_distance(&self, v: Vec3) -> f32 {
        let dx = v.x - self.x;
        let dy = v.y - self.y;
        let dz = v.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    /// The unsigned angle between `self` and `v`, in radians.
    ///
    /// The cosine is clamped to `[-1, 1]` before `acos`. If either vector has
    /// zero length the angle is reported as a right angle (`π/2`).
    #[inline]
    pub fn angle(&self, v: Vec3) -> f32 {
        let denominator = (self.squared_len() * v.squared_len()).sqrt();
        if denominator == 0.0 {
            return FRAC_PI_2;
        }
        clamp(self.dot(v) / denominator, -1.0, 1.0).acos()
    }

    /// Exact component-wise equality.
    #[inline]
    pub fn equals(&self, v: Vec3) -> bool {
        self.x == v.x && self.y == v.y && self.z == v.z
    }

    /// Returns the components as an array.
    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Reads three components from `a` starting at `offset`.
    ///
    /// # Panics
    /// Panics if `a` is shorter than `offset + 3`.
    #[inline]
    pub fn set_from_slice(&mut self, a: &[f32], offset: usize) -> &mut Self {
        self.set(a[offset], a[offset + 1], a[offset + 2])
    }

    /// Writes three components into `out` starting at `offset`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than `offset + 3`.
    #[inline]
    pub fn write_to_slice(&self, out: &mut [f32], offset: usize) {
        out[offset..offset + 3].copy_from_slice(&self.to_array());
    }
}

// --- Operator Overloads ---

impl ops::Add for Vec3 {
    type Output = Self;
    /// Adds two vectors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl ops::AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.add_vectors(*self, rhs);
    }
}

impl ops::Sub for Vec3 {
    type Output = Self;
    /// Subtracts two vectors component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl ops::SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_vectors(*self, rhs);
    }
}

impl ops::Mul<f32> for Vec3 {
    type Output = Self;
    /// Multiplies the vector by a scalar.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl ops::Mul<Vec3> for f32 {
    type Output = Vec3;
    /// Multiplies a scalar by a vector.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

impl ops::Div<f32> for Vec3 {
    type Output = Self;
    /// Divides the vector by a scalar.
    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl ops::Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl ops::Index<usize> for Vec3 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index out of bounds for Vec3"),
        }
    }
}

impl ops::IndexMut<usize> for Vec3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Index out of bounds for Vec3"),
        }
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl_approx_eq!(Vec3 { x, y, z });

// --- Vec4 ---

/// A 4-dimensional vector with `f32` components.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Vec4 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
    /// The w component of the vector.
    pub w: f32,
}

impl Vec4 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// The unit x axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// The unit y axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// The unit z axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// The unit w axis.
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new `Vec4` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a `Vec4` from a `Vec3` and a `w` component.
    #[inline]
    pub fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Returns the `x`, `y` and `z` components, dropping `w`.
    #[inline]
    pub fn truncate(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Sets all four components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) -> &mut Self {
        *self = Self::new(x, y, z, w);
        self
    }

    /// Copies the components of `v` into `self`.
    #[inline]
    pub fn copy_from(&mut self, v: Vec4) -> &mut Self {
        *self = v;
        self
    }

    /// Scales the vector to unit length. A zero vector is left unchanged.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len_sq = self.squared_len();
        if len_sq > 0.0 {
            let inv = 1.0 / len_sq.sqrt();
            self.x *= inv;
            self.y *= inv;
            self.z *= inv;
            self.w *= inv;
        }
        self
    }

    /// Multiplies the vector by a 4x4 matrix (`self = m * self`).
    #[inline]
    pub fn apply_matrix4(&mut self, m: &Mat4) -> &mut Self {
        let e = &m.elements;
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        self.x = e[0] * x + e[4] * y + e[8] * z + e[12] * w;
        self.y = e[1] * x + e[5] * y + e[9] * z + e[13] * w;
        self.z = e[2] * x + e[6] * y + e[10] * z + e[14] * w;
        self.w = e[3] * x + e[7] * y + e[11] * z + e[15] * w;
        self
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, v: Vec4) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z + self.w * v.w
    }

    /// Calculates the squared length (magnitude) of the vector.
    #[inline]
    pub fn squared_len(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the vector.
    #[inline]
    pub fn len(&self) -> f32 {
        self.squared_len().sqrt()
    }

    /// Returns the components as an array.
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

    /// Writes four components into `out` starting at `offset`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than `offset + 4`.
    #[inline]
    pub fn write_to_slice(&self, out: &mut [f32], offset: usize) {
        out[offset..offset + 4].copy_from_slice(&self.to_array());
    }
}

impl ops::Mul<f32> for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl ops::Index<usize> for Vec4 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Index out of bounds for Vec4"),
        }
    }
}

impl ops::IndexMut<usize> for Vec4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Index out of bounds for Vec4"),
        }
    }
}

impl From<[f32; 4]> for Vec4 {
    #[inline]
    fn from(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

impl_approx_eq!(Vec4 { x, y, z, w });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EPSILON, PI};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // --- Vec2 ---

    #[test]
    fn test_vec2_chaining_mutates_receiver() {
        let mut v = Vec2::new(1.0, 2.0);
        v.add(Vec2::new(1.0, 1.0)).scale(2.0).sub(Vec2::ONE);
        assert_eq!(v, Vec2::new(3.0, 5.0));
    }

    #[test]
    fn test_vec2_cross_is_scalar() {
        let a = Vec2::X;
        let b = Vec2::Y;
        assert_eq!(a.cross(b), 1.0);
        assert_eq!(b.cross(a), -1.0);
    }

    #[test]
    fn test_vec2_normalize_zero_is_noop() {
        let mut v = Vec2::ZERO;
        v.normalize();
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn test_vec2_apply_matrix3_translates() {
        let mut m = Mat3::IDENTITY;
        m.translate(Vec2::new(3.0, -1.0));
        let mut p = Vec2::new(1.0, 1.0);
        p.apply_matrix3(&m);
        assert_relative_eq!(p, Vec2::new(4.0, 0.0));
    }

    // --- Vec3 ---

    #[test]
    fn test_vec3_add_vectors_leaves_operands_untouched() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        let mut out = Vec3::ZERO;
        out.add_vectors(a, b);
        assert_eq!(out, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b, Vec3::new(4.0, 5.0, 6.0));

        out.sub_vectors(b, a);
        assert_eq!(out, Vec3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_vec3_cross_follows_right_hand_rule() {
        let mut v = Vec3::X;
        v.cross(Vec3::Y);
        assert_eq!(v, Vec3::Z);

        let mut w = Vec3::ZERO;
        w.cross_vectors(Vec3::Y, Vec3::Z);
        assert_eq!(w, Vec3::X);
    }

    #[test]
    fn test_vec3_normalize() {
        let mut v = Vec3::new(3.0, 0.0, 4.0);
        v.normalize();
        assert_relative_eq!(v, Vec3::new(0.6, 0.0, 0.8), epsilon = EPSILON);
        assert_relative_eq!(v.len(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_vec3_normalize_zero_is_noop() {
        let mut v = Vec3::ZERO;
        v.normalize();
        assert_eq!(v, Vec3::ZERO);
        assert!(!v.x.is_nan());
    }

    #[test]
    fn test_vec3_lengths_and_distances() {
        let a = Vec3::new(1.0, 2.0, 2.0);
        assert_eq!(a.squared_len(), 9.0);
        assert_eq!(a.len(), 3.0);
        let b = Vec3::new(1.0, 2.0, -2.0);
        assert_eq!(a.squared_distance(b), 16.0);
        assert_eq!(a.distance(b), 4.0);
    }

    #[test]
    fn test_vec3_angle() {
        assert_relative_eq!(Vec3::X.angle(Vec3::Y), PI / 2.0, epsilon = EPSILON);
        assert_relative_eq!(Vec3::X.angle(-Vec3::X), PI, epsilon = EPSILON);
        assert_relative_eq!(Vec3::X.angle(Vec3::X * 5.0), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_vec3_angle_with_zero_vector_is_right_angle() {
        assert_eq!(Vec3::ZERO.angle(Vec3::X), FRAC_PI_2);
        assert_eq!(Vec3::X.angle(Vec3::ZERO), FRAC_PI_2);
    }

    #[test]
    fn test_vec3_apply_matrix4_affine() {
        let mut m = Mat4::IDENTITY;
        m.translate(Vec3::new(1.0, 2.0, 3.0)).scale(Vec3::new(2.0, 2.0, 2.0));
        let mut p = Vec3::ONE;
        p.apply_matrix4(&m);
        assert_relative_eq!(p, Vec3::new(3.0, 4.0, 5.0), epsilon = EPSILON);
    }

    #[test]
    fn test_vec3_apply_matrix4_performs_perspective_divide() {
        let proj = Mat4::from_perspective(PI / 2.0, 1.0, 1.0, 100.0);

        // A point on the near plane maps to NDC depth -1.
        let mut near = Vec3::new(0.0, 0.0, -1.0);
        near.apply_matrix4(&proj);
        assert_abs_diff_eq!(near.z, -1.0, epsilon = 1e-4);

        // A point on the far plane maps to NDC depth +1.
        let mut far = Vec3::new(0.0, 0.0, -100.0);
        far.apply_matrix4(&proj);
        assert_abs_diff_eq!(far.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_vec3_apply_quaternion_matches_matrix() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7);
        let m = Mat4::from_quaternion(&q);

        let mut a = Vec3::new(0.3, -2.0, 1.5);
        let mut b = a;
        a.apply_quaternion(&q);
        b.apply_matrix4(&m);
        assert_relative_eq!(a, b, epsilon = 1e-5);
    }

    #[test]
    fn test_vec3_transform_direction_ignores_translation() {
        let mut m = Mat4::IDENTITY;
        m.translate(Vec3::new(10.0, 0.0, 0.0)).scale(Vec3::new(3.0, 3.0, 3.0));
        let mut d = Vec3::Z;
        d.transform_direction(&m);
        assert_relative_eq!(d, Vec3::Z, epsilon = EPSILON);
    }

    #[test]
    fn test_vec3_lerp() {
        let mut v = Vec3::ZERO;
        v.lerp(Vec3::new(10.0, -10.0, 4.0), 0.25);
        assert_eq!(v, Vec3::new(2.5, -2.5, 1.0));
    }

    #[test]
    fn test_vec3_index_and_named_access_share_storage() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v[1] = 7.0;
        assert_eq!(v.y, 7.0);
        v.z = 9.0;
        assert_eq!(v[2], 9.0);
    }

    #[test]
    #[should_panic(expected = "Index out of bounds for Vec3")]
    fn test_vec3_index_out_of_bounds() {
        let v = Vec3::ZERO;
        let _ = v[3];
    }

    #[test]
    fn test_vec3_slice_round_trip_with_offset() {
        let mut buffer = [0.0_f32; 5];
        Vec3::new(1.0, 2.0, 3.0).write_to_slice(&mut buffer, 2);
        assert_eq!(buffer, [0.0, 0.0, 1.0, 2.0, 3.0]);

        let mut v = Vec3::ZERO;
        v.set_from_slice(&buffer, 2);
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_vec3_divide_and_inverse() {
        let mut v = Vec3::new(2.0, 4.0, 8.0);
        v.divide(Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(v, Vec3::new(1.0, 2.0, 4.0));
        v.inverse();
        assert_eq!(v, Vec3::new(1.0, 0.5, 0.25));
    }

    // --- Vec4 ---

    #[test]
    fn test_vec4_normalize_and_zero() {
        let mut v = Vec4::new(2.0, 0.0, 0.0, 0.0);
        v.normalize();
        assert_eq!(v, Vec4::new(1.0, 0.0, 0.0, 0.0));

        let mut z = Vec4::ZERO;
        z.normalize();
        assert_eq!(z, Vec4::ZERO);
    }

    #[test]
    fn test_vec4_apply_matrix4_keeps_w() {
        let mut m = Mat4::IDENTITY;
        m.translate(Vec3::new(1.0, 2.0, 3.0));
        let mut point = Vec4::new(0.0, 0.0, 0.0, 1.0);
        point.apply_matrix4(&m);
        assert_eq!(point, Vec4::new(1.0, 2.0, 3.0, 1.0));

        let mut direction = Vec4::new(0.0, 0.0, 1.0, 0.0);
        direction.apply_matrix4(&m);
        assert_eq!(direction, Vec4::new(0.0, 0.0, 1.0, 0.0));
    }
}
