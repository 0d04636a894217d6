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

//! Rays and their intersection with bounding volumes.

use super::{Mat4, Vec3};

/// A half-line from `origin` along a unit `direction`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The start point.
    pub origin: Vec3,
    /// The direction, unit length unless zero.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let mut direction = direction;
        direction.normalize();
        Self { origin, direction }
    }

    /// The point at distance `t` along the ray.
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Moves the ray into the space `m` maps to.
    ///
    /// The origin is transformed as a point and the direction as a direction,
    /// then renormalized. Distances along the result are measured in the new
    /// space.
    pub fn apply_matrix4(&mut self, m: &Mat4) -> &mut Self {
        self.origin.apply_matrix4(m);
        self.direction.transform_direction(m);
        self
    }

    /// Distance to the first crossing of a sphere surface.
    ///
    /// From inside the sphere this is the exit point. `None` when the sphere
    /// is missed or lies behind the origin.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_center = center - self.origin;
        let tca = to_center.dot(self.direction);
        let d2 = to_center.dot(to_center) - tca * tca;
        let radius2 = radius * radius;
        if d2 > radius2 {
            return None;
        }
        let thc = (radius2 - d2).sqrt();
        let (t0, t1) = (tca - thc, tca + thc);
        if t1 < 0.0 {
            return None;
        }
        Some(if t0 < 0.0 { t1 } else { t0 })
    }

    /// Distance to the first crossing of an axis-aligned box (slab test).
    ///
    /// From inside the box this is the exit point. `None` when the box is
    /// missed or lies behind the origin.
    pub fn intersect_box(&self, min: Vec3, max: Vec3) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];
            if direction == 0.0 {
                // Parallel to this slab.
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / direction;
            let (mut t1, mut t2) = ((min[axis] - origin) * inv, (max[axis] - origin) * inv);
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }
        Some(if t_min >= 0.0 { t_min } else { t_max })
    }
}
