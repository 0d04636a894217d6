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

//! Bounding volumes and clip-space frustum planes.

use serde::{Deserialize, Serialize};

use super::{Mat4, Vec3};

/// A plane `normal · p + constant = 0`.
///
/// Points with a positive signed distance lie on the side the normal points to.
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Plane {
    /// The plane normal. Unit length after [`Plane::normalize`].
    pub normal: Vec3,
    /// The signed offset along the normal.
    pub constant: f32,
}

impl Plane {
    /// Creates a plane from its four coefficients.
    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self {
            normal: Vec3::new(a, b, c),
            constant: d,
        }
    }

    /// Scales all four coefficients so the normal has unit length.
    /// A plane with a zero normal is left unchanged.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.normal.len();
        if len > 0.0 {
            let inv = 1.0 / len;
            self.normal.scale(inv);
            self.constant *= inv;
        }
        self
    }

    /// The signed distance from the plane to `point`.
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}

/// Six planes bounding a view volume, with normals pointing inward.
///
/// Plane order: `-x`, `+x`, `+y`, `-y`, far, near.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// The six normalized planes.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extracts the planes of a projection (or projection-view) matrix using
    /// the Gribb/Hartmann method. Every plane is normalized.
    pub fn from_matrix(m: &Mat4) -> Self {
        let e = &m.elements;
        let mut planes = [
            Plane::new(e[3] - e[0], e[7] - e[4], e[11] - e[8], e[15] - e[12]),
            Plane::new(e[3] + e[0], e[7] + e[4], e[11] + e[8], e[15] + e[12]),
            Plane::new(e[3] + e[1], e[7] + e[5], e[11] + e[9], e[15] + e[13]),
            Plane::new(e[3] - e[1], e[7] - e[5], e[11] - e[9], e[15] - e[13]),
            Plane::new(e[3] - e[2], e[7] - e[6], e[11] - e[10], e[15] - e[14]),
            Plane::new(e[3] + e[2], e[7] + e[6], e[11] + e[10], e[15] + e[14]),
        ];
        for plane in &mut planes {
            plane.normalize();
        }
        Self { planes }
    }

    /// Returns `false` only when the sphere lies entirely behind one of the
    /// planes.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= -radius)
    }
}

/// An axis-aligned box plus the sphere that encloses the source points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Component-wise minimum.
    pub min: Vec3,
    /// Component-wise maximum.
    pub max: Vec3,
    /// `(min + max) / 2`.
    pub center: Vec3,
    /// `max - min`.
    pub scale: Vec3,
    /// Distance from `center` to the farthest point. Infinite until computed.
    pub radius: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
            center: Vec3::ZERO,
            scale: Vec3::ZERO,
            radius: f32::INFINITY,
        }
    }
}

impl Bounds {
    /// Bounds of a single box with a precomputed radius.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let center = (min + max) * 0.5;
        let scale = max - min;
        Self {
            min,
            max,
            center,
            scale,
            radius: (max - center).len(),
        }
    }

    /// `true` once the enclosing sphere has been computed.
    #[inline]
    pub fn has_radius(&self) -> bool {
        self.radius.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EPSILON, FRAC_PI_2};
    use approx::assert_relative_eq;

    fn perspective_frustum() -> Frustum {
        Frustum::from_matrix(&Mat4::from_perspective(FRAC_PI_2, 1.0, 1.0, 100.0))
    }

    // --- Plane ---

    #[test]
    fn test_plane_normalize_scales_constant() {
        let mut p = Plane::new(0.0, 2.0, 0.0, -4.0);
        p.normalize();
        assert_relative_eq!(p.normal, Vec3::Y);
        assert_relative_eq!(p.constant, -2.0);
        assert_relative_eq!(p.distance_to_point(Vec3::new(0.0, 5.0, 0.0)), 3.0);
    }

    #[test]
    fn test_plane_normalize_zero_is_noop() {
        let mut p = Plane::new(0.0, 0.0, 0.0, 3.0);
        p.normalize();
        assert_eq!(p, Plane::new(0.0, 0.0, 0.0, 3.0));
    }

    // --- Frustum ---

    #[test]
    fn test_frustum_plane_order_and_normalization() {
        let f = perspective_frustum();
        for plane in &f.planes {
            assert_relative_eq!(plane.normal.len(), 1.0, epsilon = EPSILON);
        }

        // Camera looks down -z. The -x plane keeps points left of the right
        // edge, so its normal points toward -x.
        assert!(f.planes[0].normal.x < 0.0);
        assert!(f.planes[1].normal.x > 0.0);
        assert!(f.planes[2].normal.y > 0.0);
        assert!(f.planes[3].normal.y < 0.0);
        // Far plane faces the camera, near plane faces away from it.
        assert_relative_eq!(f.planes[4].normal, Vec3::Z, epsilon = EPSILON);
        assert_relative_eq!(f.planes[4].constant, 100.0, epsilon = 1e-3);
        assert_relative_eq!(f.planes[5].normal, -Vec3::Z, epsilon = EPSILON);
        assert_relative_eq!(f.planes[5].constant, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_frustum_sphere_inside_outside_and_straddling() {
        let f = perspective_frustum();
        assert!(f.intersects_sphere(Vec3::new(0.0, 0.0, -10.0), 1.0));
        assert!(!f.intersects_sphere(Vec3::new(-1000.0, 0.0, -10.0), 1.0));
        assert!(!f.intersects_sphere(Vec3::new(0.0, 0.0, 10.0), 1.0));
        assert!(!f.intersects_sphere(Vec3::new(0.0, 0.0, -200.0), 1.0));
        // Center outside the near plane but the sphere reaches into the volume.
        assert!(f.intersects_sphere(Vec3::new(0.0, 0.0, -0.5), 1.0));
    }

    // --- Bounds ---

    #[test]
    fn test_bounds_from_min_max() {
        let b = Bounds::from_min_max(Vec3::new(-1.0, -2.0, -2.0), Vec3::new(1.0, 2.0, 2.0));
        assert_eq!(b.center, Vec3::ZERO);
        assert_eq!(b.scale, Vec3::new(2.0, 4.0, 4.0));
        assert_relative_eq!(b.radius, 3.0);
        assert!(b.has_radius());
        assert!(!Bounds::default().has_radius());
    }
}
