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

//! Vertex attribute storage and lazily computed bounds.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::math::{Bounds, Vec3};

/// The attribute name holding vertex positions.
pub const POSITION_ATTRIBUTE: &str = "position";

/// A flat array of `f32` values read `size` components at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Components per vertex (1 to 4).
    pub size: usize,
    /// The interleaved component data.
    pub data: Vec<f32>,
}

impl Attribute {
    /// Creates an attribute from its component size and data.
    pub fn new(size: usize, data: Vec<f32>) -> Self {
        Self { size, data }
    }

    /// The number of complete vertices in `data`.
    pub fn count(&self) -> usize {
        if self.size == 0 {
            0
        } else {
            self.data.len() / self.size
        }
    }

    /// Iterates vertices as `Vec3`, filling missing components with zero.
    pub fn iter_vec3(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.data
            .chunks_exact(self.size.max(1))
            .map(|chunk| {
                let mut v = Vec3::ZERO;
                for (i, c) in chunk.iter().take(3).enumerate() {
                    v[i] = *c;
                }
                v
            })
    }
}

/// The bounding volume ray queries test against.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RaycastShape {
    /// The axis-aligned bounding box.
    #[default]
    Box,
    /// The bounding sphere.
    Sphere,
}

/// A set of named vertex attributes.
///
/// Bounds are computed from the `position` attribute the first time
/// [`Geometry::bounds`] is called and cached. The cache is safe to share, so
/// a `Geometry` behind an `Arc` is `Send + Sync`.
#[derive(Debug, Default)]
pub struct Geometry {
    attributes: HashMap<String, Attribute>,
    preset_bounds: Option<Bounds>,
    bounds: OnceLock<Bounds>,
    raycast: RaycastShape,
}

impl Geometry {
    /// Creates a geometry without attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, consuming and returning the geometry.
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.add_attribute(name, attribute);
        self
    }

    /// Supplies bounds instead of computing them. If `bounds.radius` is
    /// infinite, the sphere is still computed from positions on first use.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.preset_bounds = Some(bounds);
        self.bounds = OnceLock::new();
        self
    }

    /// Selects the volume ray queries hit.
    pub fn with_raycast(mut self, shape: RaycastShape) -> Self {
        self.raycast = shape;
        self
    }

    /// The volume ray queries hit.
    pub fn raycast(&self) -> RaycastShape {
        self.raycast
    }

    /// Inserts or replaces an attribute. Cached bounds are discarded.
    pub fn add_attribute(&mut self, name: impl Into<String>, attribute: Attribute) {
        self.attributes.insert(name.into(), attribute);
        self.bounds = OnceLock::new();
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// The `position` attribute, if present.
    pub fn position(&self) -> Option<&Attribute> {
        self.attribute(POSITION_ATTRIBUTE)
    }

    /// Computes the axis-aligned box of the positions.
    ///
    /// The returned radius is infinite; see [`Geometry::compute_bounding_sphere`].
    /// Returns `None` without positions.
    pub fn compute_bounding_box(&self) -> Option<Bounds> {
        let mut points = self.position()?.iter_vec3();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        });
        Some(Bounds {
            min,
            max,
            center: (min + max) * 0.5,
            scale: max - min,
            radius: f32::INFINITY,
        })
    }

    /// The distance from `center` to the farthest position.
    pub fn compute_bounding_sphere(&self, center: Vec3) -> Option<f32> {
        let max_sq = self
            .position()?
            .iter_vec3()
            .map(|p| p.squared_distance(center))
            .fold(0.0f32, f32::max);
        Some(max_sq.sqrt())
    }

    /// Returns the cached bounds, computing them on first use.
    ///
    /// `None` means the bounds cannot be known; callers should treat the
    /// geometry as visible.
    pub fn bounds(&self) -> Option<&Bounds> {
        if let Some(bounds) = self.bounds.get() {
            return Some(bounds);
        }

        let mut bounds = match self.preset_bounds {
            Some(preset) => preset,
            None => self.compute_bounding_box()?,
        };
        if !bounds.has_radius() {
            bounds.radius = self.compute_bounding_sphere(bounds.center)?;
        }
        Some(self.bounds.get_or_init(|| bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_cube_corners() -> Geometry {
        let mut data = Vec::new();
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    data.extend_from_slice(&[x, y, z]);
                }
            }
        }
        Geometry::new().with_attribute(POSITION_ATTRIBUTE, Attribute::new(3, data))
    }

    #[test]
    fn test_bounds_box_and_sphere() {
        let geometry = unit_cube_corners();
        let bounds = geometry.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vec3::ONE);
        assert_eq!(bounds.center, Vec3::ZERO);
        assert_eq!(bounds.scale, Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(bounds.radius, 3.0f32.sqrt());
    }

    #[test]
    fn test_raycast_shape_defaults_to_box() {
        assert_eq!(unit_cube_corners().raycast(), RaycastShape::Box);
        let sphere = unit_cube_corners().with_raycast(RaycastShape::Sphere);
        assert_eq!(sphere.raycast(), RaycastShape::Sphere);
    }

    #[test]
    fn test_bounds_none_without_position() {
        let geometry = Geometry::new().with_attribute("uv", Attribute::new(2, vec![0.0, 1.0]));
        assert!(geometry.position().is_none());
        assert!(geometry.bounds().is_none());
    }

    #[test]
    fn test_preset_bounds_with_infinite_radius_are_completed() {
        let preset = Bounds {
            center: Vec3::new(1.0, 0.0, 0.0),
            ..Bounds::default()
        };
        let geometry = unit_cube_corners().with_bounds(preset);
        let bounds = geometry.bounds().unwrap();
        assert_eq!(bounds.center, Vec3::new(1.0, 0.0, 0.0));
        // Farthest corner from (1, 0, 0) is (-1, ±1, ±1).
        assert_relative_eq!(bounds.radius, 6.0f32.sqrt());
    }

    #[test]
    fn test_preset_bounds_with_radius_need_no_positions() {
        let preset = Bounds::from_min_max(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        let geometry = Geometry::new().with_bounds(preset);
        assert_eq!(geometry.bounds(), Some(&preset));
    }

    #[test]
    fn test_two_component_positions_pad_with_zero() {
        let geometry = Geometry::new()
            .with_attribute(POSITION_ATTRIBUTE, Attribute::new(2, vec![0.0, 0.0, 4.0, 2.0]));
        let b = geometry.compute_bounding_box().unwrap();
        assert_eq!(b.max, Vec3::new(4.0, 2.0, 0.0));
        assert!(!b.has_radius());
        assert_eq!(geometry.position().unwrap().count(), 2);
    }

    #[test]
    fn test_adding_attribute_discards_cache() {
        let mut geometry = unit_cube_corners();
        assert!(geometry.bounds().is_some());
        geometry.add_attribute(POSITION_ATTRIBUTE, Attribute::new(3, vec![0.0, 0.0, 5.0]));
        assert_eq!(geometry.bounds().unwrap().center, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(geometry.bounds().unwrap().radius, 0.0);
    }
}
