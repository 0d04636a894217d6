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

//! Ray queries against mesh bounding volumes.

use lumen_core::math::{Ray, Vec3};
use lumen_core::renderer::RaycastShape;
use lumen_core::scene::NodeId;

use crate::graph::SceneGraph;

/// A mesh crossed by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The node holding the mesh.
    pub node: NodeId,
    /// World-space distance from the ray origin to `point`.
    pub distance: f32,
    /// The world-space crossing point.
    pub point: Vec3,
    /// The crossing point in the mesh's local space.
    pub local_point: Vec3,
}

/// Intersects a world-space ray with the bounds of each listed mesh.
///
/// The ray is moved into each node's local space with the inverse of its
/// last computed world matrix and tested against the box or sphere the
/// geometry selects. Nodes without a mesh, positions, bounds or an
/// invertible world matrix are skipped. Hits farther than `max_distance`
/// are dropped. The result is sorted nearest first.
pub fn intersect_meshes<I>(
    graph: &SceneGraph,
    ray: &Ray,
    nodes: I,
    max_distance: Option<f32>,
) -> Vec<RayHit>
where
    I: IntoIterator<Item = NodeId>,
{
    let mut hits = Vec::new();

    for id in nodes {
        let Some(node) = graph.get(id) else {
            continue;
        };
        let Some(mesh) = &node.mesh else {
            continue;
        };
        let geometry = &mesh.geometry;
        if geometry.position().is_none() {
            continue;
        }
        let Some(bounds) = geometry.bounds() else {
            continue;
        };

        let world = &node.transform.world_matrix;
        if world.determinant() == 0.0 {
            continue;
        }
        let mut inverse_world = *world;
        inverse_world.inverse();
        let mut local_ray = *ray;
        local_ray.apply_matrix4(&inverse_world);

        let t = match geometry.raycast() {
            RaycastShape::Sphere => local_ray.intersect_sphere(bounds.center, bounds.radius),
            RaycastShape::Box => local_ray.intersect_box(bounds.min, bounds.max),
        };
        let Some(t) = t else {
            continue;
        };

        let local_point = local_ray.point_at(t);
        let mut point = local_point;
        point.apply_matrix4(world);
        let distance = point.distance(ray.origin);
        if max_distance.is_some_and(|max| distance > max) {
            continue;
        }

        hits.push(RayHit {
            node: id,
            distance,
            point,
            local_point,
        });
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    log::trace!("Ray crossed {} mesh(es)", hits.len());
    hits
}
