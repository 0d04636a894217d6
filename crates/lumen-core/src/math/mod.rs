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

//! Provides the mathematics primitives used by the scene graph and the renderer.
//!
//! Every type in this module is a small `Copy` value with a fixed `#[repr(C)]`
//! layout, so it can be handed to a graphics API without conversion. Mutating
//! methods write into `self` and return `&mut Self`, which makes chains such as
//! `m.identity().translate(v).rotate_x(a)` read like the transform they build.
//!
//! Matrices are stored **column-major**. All angular functions operate in
//! **radians** unless explicitly specified otherwise (e.g. `degrees_to_radians`).

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

// Re-export standard mathematical constants for convenience.
pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f32 = 180.0 / PI;

/// Implements `approx::AbsDiffEq` and `approx::RelativeEq` for a math type.
///
/// The first form compares named `f32` fields, the second compares every
/// element of an `f32` array field.
macro_rules! impl_approx_eq {
    ($ty:ty { $($field:ident),+ }) => {
        impl approx::AbsDiffEq for $ty {
            type Epsilon = f32;

            #[inline]
            fn default_epsilon() -> f32 {
                f32::EPSILON
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                true $(&& approx::AbsDiffEq::abs_diff_eq(&self.$field, &other.$field, epsilon))+
            }
        }

        impl approx::RelativeEq for $ty {
            #[inline]
            fn default_max_relative() -> f32 {
                f32::EPSILON
            }

            #[inline]
            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                true $(&& approx::RelativeEq::relative_eq(
                    &self.$field,
                    &other.$field,
                    epsilon,
                    max_relative,
                ))+
            }
        }
    };
    ($ty:ty [ $field:ident ]) => {
        impl approx::AbsDiffEq for $ty {
            type Epsilon = f32;

            #[inline]
            fn default_epsilon() -> f32 {
                f32::EPSILON
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                self.$field
                    .iter()
                    .zip(other.$field.iter())
                    .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
            }
        }

        impl approx::RelativeEq for $ty {
            #[inline]
            fn default_max_relative() -> f32 {
                f32::EPSILON
            }

            #[inline]
            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                self.$field
                    .iter()
                    .zip(other.$field.iter())
                    .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
            }
        }
    };
}

// --- Declare Sub-Modules ---

pub mod color;
pub mod euler;
pub mod geometry;
pub mod matrix;
pub mod quaternion;
pub mod ray;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::color::{Color, ColorParseError};
pub use self::euler::{Euler, EulerOrder};
pub use self::geometry::{Bounds, Frustum, Plane};
pub use self::matrix::{Mat3, Mat4};
pub use self::quaternion::Quaternion;
pub use self::ray::Ray;
pub use self::vector::{Vec2, Vec3, Vec4};

// --- Utility Functions ---

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use lumen_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Converts an angle from radians to degrees.
///
/// # Examples
///
/// ```
/// use lumen_core::math::{radians_to_degrees, PI};
/// assert_eq!(radians_to_degrees(PI), 180.0);
/// ```
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

/// Clamps a value to a specified minimum and maximum range.
///
/// # Examples
///
/// ```
/// use lumen_core::math::clamp;
/// assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
/// assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
/// assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
/// ```
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min_val: T, max_val: T) -> T {
    if value < min_val {
        min_val
    } else if value > max_val {
        max_val
    } else {
        value
    }
}
