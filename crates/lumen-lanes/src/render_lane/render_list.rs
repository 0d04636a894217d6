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

//! Defines the lane that builds the ordered list of drawables for a frame.

use std::cmp::Ordering;

use lumen_core::renderer::{MeshId, ProgramId, RenderSettings};
use lumen_scene::{Camera, Mesh, NodeId, SceneError, SceneGraph, Visit};

/// Switches for a single list build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderListOptions {
    /// Skip meshes outside the camera frustum. Needs a camera.
    pub frustum_cull: bool,
    /// Bucket and sort the list. Otherwise it stays in traversal order.
    pub sort: bool,
}

impl Default for RenderListOptions {
    fn default() -> Self {
        Self {
            frustum_cull: true,
            sort: true,
        }
    }
}

impl From<&RenderSettings> for RenderListOptions {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            frustum_cull: settings.frustum_cull,
            sort: settings.sort,
        }
    }
}

/// The values the render list orders meshes by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    /// Explicit draw order, compared first.
    pub render_order: i32,
    /// Groups draws sharing a program.
    pub program: ProgramId,
    /// Normalized device depth of the mesh origin.
    pub z_depth: f32,
    /// Final tie-breaker: newer meshes first.
    pub mesh: MeshId,
}

impl SortKey {
    /// Reads the key of a mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            render_order: mesh.render_order,
            program: mesh.program.id,
            z_depth: mesh.z_depth,
            mesh: mesh.id,
        }
    }
}

/// Opaque bucket order: render order, then program, then front to back,
/// then newest mesh first.
pub fn opaque_order(a: &SortKey, b: &SortKey) -> Ordering {
    a.render_order
        .cmp(&b.render_order)
        .then_with(|| a.program.cmp(&b.program))
        .then_with(|| a.z_depth.total_cmp(&b.z_depth))
        .then_with(|| b.mesh.cmp(&a.mesh))
}

/// Transparent bucket order: render order, then back to front, then newest
/// mesh first.
pub fn transparent_order(a: &SortKey, b: &SortKey) -> Ordering {
    a.render_order
        .cmp(&b.render_order)
        .then_with(|| b.z_depth.total_cmp(&a.z_depth))
        .then_with(|| b.mesh.cmp(&a.mesh))
}

/// UI bucket order: render order, then program, then newest mesh first.
pub fn ui_order(a: &SortKey, b: &SortKey) -> Ordering {
    a.render_order
        .cmp(&b.render_order)
        .then_with(|| a.program.cmp(&b.program))
        .then_with(|| b.mesh.cmp(&a.mesh))
}

/// The result of a list build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderList {
    /// Drawable nodes in draw order.
    pub nodes: Vec<NodeId>,
    /// How many leading entries are opaque. Zero when unsorted.
    pub opaque: usize,
    /// How many entries follow in the transparent bucket. Zero when unsorted.
    pub transparent: usize,
    /// How many trailing entries are UI. Zero when unsorted.
    pub ui: usize,
    /// Drawables rejected by the frustum test.
    pub culled: usize,
}

impl RenderList {
    /// The number of nodes to draw.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Which bucket a program state routes a mesh to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Opaque,
    Transparent,
    Ui,
}

impl Bucket {
    fn of(mesh: &Mesh) -> Self {
        match (mesh.program.transparent, mesh.program.depth_test) {
            (false, _) => Bucket::Opaque,
            (true, true) => Bucket::Transparent,
            (true, false) => Bucket::Ui,
        }
    }
}

/// A lane that walks a scene and produces the frame's draw order.
///
/// Visible drawables are collected in pre-order, skipping invisible
/// subtrees and, when enabled, meshes outside the camera frustum. When
/// sorting, they are split into opaque, transparent and UI buckets, each
/// sorted with its comparator, and concatenated in that order.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderListLane;

impl RenderListLane {
    /// Creates a new `RenderListLane`.
    pub fn new() -> Self {
        Self
    }

    /// Builds the render list for the subtree under `root`.
    ///
    /// When sorting, the `z_depth` of every listed mesh is rewritten: zero,
    /// unless the mesh has render order 0, a depth tested program and a
    /// camera is given, in which case it is the clip-space depth of the
    /// node's world position.
    pub fn build(
        &self,
        graph: &mut SceneGraph,
        root: NodeId,
        camera: Option<&mut Camera>,
        options: &RenderListOptions,
    ) -> Result<RenderList, SceneError> {
        let camera: Option<&Camera> = match camera {
            Some(camera) => {
                if options.frustum_cull {
                    camera.update_frustum();
                }
                Some(&*camera)
            }
            None => None,
        };

        let mut nodes = Vec::new();
        let mut culled = 0;
        graph.traverse(root, |id, node| {
            if !node.transform.visible {
                log::trace!("Skipping invisible subtree at {id}");
                return Visit::SkipChildren;
            }
            let Some(mesh) = &node.mesh else {
                return Visit::Continue;
            };
            if let Some(camera) = camera {
                if options.frustum_cull
                    && mesh.frustum_culled
                    && !camera.frustum_intersects_mesh(mesh, &node.transform.world_matrix)
                {
                    log::trace!("Culled mesh {:?} at {id}", mesh.id);
                    culled += 1;
                    return Visit::Continue;
                }
            }
            nodes.push(id);
            Visit::Continue
        })?;

        if !options.sort {
            log::debug!("Render list: {} unsorted, {culled} culled", nodes.len());
            return Ok(RenderList {
                nodes,
                culled,
                ..RenderList::default()
            });
        }

        let mut opaque = Vec::new();
        let mut transparent = Vec::new();
        let mut ui = Vec::new();
        for id in nodes {
            let Some((mesh, world)) = graph.get_mut(id).and_then(|node| {
                let world = node.transform.world_matrix;
                node.mesh.as_mut().map(|mesh| (mesh, world))
            }) else {
                continue;
            };

            mesh.z_depth = 0.0;
            if let Some(camera) = camera {
                if mesh.render_order == 0 && mesh.program.depth_test {
                    let mut position = world.get_translation();
                    position.apply_matrix4(&camera.projection_view_matrix);
                    mesh.z_depth = position.z;
                }
            }

            let entry = (id, SortKey::from_mesh(mesh));
            match Bucket::of(mesh) {
                Bucket::Opaque => opaque.push(entry),
                Bucket::Transparent => transparent.push(entry),
                Bucket::Ui => ui.push(entry),
            }
        }

        opaque.sort_by(|a, b| opaque_order(&a.1, &b.1));
        transparent.sort_by(|a, b| transparent_order(&a.1, &b.1));
        ui.sort_by(|a, b| ui_order(&a.1, &b.1));

        log::debug!(
            "Render list: {} opaque, {} transparent, {} ui, {culled} culled",
            opaque.len(),
            transparent.len(),
            ui.len()
        );

        let (opaque_len, transparent_len, ui_len) = (opaque.len(), transparent.len(), ui.len());
        let nodes = opaque
            .into_iter()
            .chain(transparent)
            .chain(ui)
            .map(|(id, _)| id)
            .collect();

        Ok(RenderList {
            nodes,
            opaque: opaque_len,
            transparent: transparent_len,
            ui: ui_len,
            culled,
        })
    }
}
