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

//! Euler angle rotations with an explicit axis order.

use serde::{Deserialize, Serialize};

use super::{clamp, Mat4, Quaternion};

/// Beyond this `|sin|` the middle axis is treated as gimbal locked.
const GIMBAL_LOCK_THRESHOLD: f32 = 0.99999;

/// The order in which the three axis rotations are applied.
///
/// `XYZ` means the rotation matrix is `Rx * Ry * Rz`, so a vector is rotated
/// about Z first and X last.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EulerOrder {
    /// `Rx * Ry * Rz`.
    XYZ,
    /// `Ry * Rx * Rz`. Used for object transforms.
    #[default]
    YXZ,
    /// `Rz * Rx * Ry`.
    ZXY,
    /// `Rz * Ry * Rx`.
    ZYX,
    /// `Ry * Rz * Rx`.
    YZX,
    /// `Rx * Rz * Ry`.
    XZY,
}

/// Three rotation angles in radians, interpreted in a given [`EulerOrder`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    /// Rotation about the X axis.
    pub x: f32,
    /// Rotation about the Y axis.
    pub y: f32,
    /// Rotation about the Z axis.
    pub z: f32,
    /// The order the angles are applied in.
    pub order: EulerOrder,
}

impl Euler {
    /// Creates a new set of angles.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, order: EulerOrder) -> Self {
        Self { x, y, z, order }
    }

    /// Sets the three angles, keeping the order.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Copies angles and order from `e`.
    #[inline]
    pub fn copy_from(&mut self, e: &Euler) -> &mut Self {
        *self = *e;
        self
    }

    /// Extracts angles from the upper 3x3 of a pure rotation matrix.
    ///
    /// The middle angle comes from an `asin` of a clamped element. Near
    /// `±90°` on that axis (gimbal lock) the last angle is pinned to zero and
    /// the remaining one absorbs the whole rotation.
    pub fn from_rotation_matrix(m: &Mat4, order: EulerOrder) -> Self {
        let e = &m.elements;
        let (m11, m12, m13) = (e[0], e[4], e[8]);
        let (m21, m22, m23) = (e[1], e[5], e[9]);
        let (m31, m32, m33) = (e[2], e[6], e[10]);

        let (x, y, z) = match order {
            EulerOrder::XYZ => {
                let y = clamp(m13, -1.0, 1.0).asin();
                if m13.abs() < GIMBAL_LOCK_THRESHOLD {
                    ((-m23).atan2(m33), y, (-m12).atan2(m11))
                } else {
                    (m32.atan2(m22), y, 0.0)
                }
            }
            EulerOrder::YXZ => {
                let x = (-clamp(m23, -1.0, 1.0)).asin();
                if m23.abs() < GIMBAL_LOCK_THRESHOLD {
                    (x, m13.atan2(m33), m21.atan2(m22))
                } else {
                    (x, (-m31).atan2(m11), 0.0)
                }
            }
            EulerOrder::ZXY => {
                let x = clamp(m32, -1.0, 1.0).asin();
                if m32.abs() < GIMBAL_LOCK_THRESHOLD {
                    (x, (-m31).atan2(m33), (-m12).atan2(m22))
                } else {
                    (x, 0.0, m21.atan2(m11))
                }
            }
            EulerOrder::ZYX => {
                let y = (-clamp(m31, -1.0, 1.0)).asin();
                if m31.abs() < GIMBAL_LOCK_THRESHOLD {
                    (m32.atan2(m33), y, m21.atan2(m11))
                } else {
                    (0.0, y, (-m12).atan2(m22))
                }
            }
            EulerOrder::YZX => {
                let z = clamp(m21, -1.0, 1.0).asin();
                if m21.abs() < GIMBAL_LOCK_THRESHOLD {
                    ((-m23).atan2(m22), (-m31).atan2(m11), z)
                } else {
                    (0.0, m13.atan2(m33), z)
                }
            }
            EulerOrder::XZY => {
                let z = (-clamp(m12, -1.0, 1.0)).asin();
                if m12.abs() < GIMBAL_LOCK_THRESHOLD {
                    (m32.atan2(m22), m13.atan2(m11), z)
                } else {
                    ((-m23).atan2(m33), 0.0, z)
                }
            }
        };

        Self::new(x, y, z, order)
    }

    /// Extracts angles in `order` from a unit quaternion.
    #[inline]
    pub fn from_quaternion(q: &Quaternion, order: EulerOrder) -> Self {
        Self::from_rotation_matrix(&Mat4::from_quaternion(q), order)
    }

    /// Re-expresses the same rotation in another order.
    pub fn reorder(&mut self, order: EulerOrder) -> &mut Self {
        let q = Quaternion::from_euler(self);
        *self = Self::from_quaternion(&q, order);
        self
    }

    /// Returns the angles as `[x, y, z]`.
    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Reads three angles from `a` starting at `offset`, keeping the order.
    ///
    /// # Panics
    /// Panics if `a` is shorter than `offset + 3`.
    #[inline]
    pub fn set_from_slice(&mut self, a: &[f32], offset: usize) -> &mut Self {
        self.set(a[offset], a[offset + 1], a[offset + 2])
    }
}
