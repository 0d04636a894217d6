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

//! Defines the renderer that turns a scene into an ordered stream of draw calls.

use super::{RenderError, RenderList, RenderListLane, RenderListOptions};
use lumen_core::{
    math::{Mat3, Mat4},
    renderer::{DrawBackend, DrawItem, RenderSettings},
};
use lumen_scene::{Camera, NodeId, SceneError, SceneGraph};

/// Counters describing the last rendered frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Draw calls issued.
    pub drawn: usize,
    /// Draws from the opaque bucket.
    pub opaque: usize,
    /// Draws from the transparent bucket.
    pub transparent: usize,
    /// Draws from the UI bucket.
    pub ui: usize,
    /// Drawables skipped by frustum culling.
    pub culled: usize,
}

impl From<&RenderList> for FrameStats {
    fn from(list: &RenderList) -> Self {
        Self {
            drawn: list.len(),
            opaque: list.opaque,
            transparent: list.transparent,
            ui: list.ui,
            culled: list.culled,
        }
    }
}

/// Drives a [`DrawBackend`] from a scene graph.
///
/// Each frame it propagates world matrices, refreshes the camera, builds the
/// render list and hands the backend one [`DrawItem`] per listed node.
#[derive(Debug, Default, Clone)]
pub struct Renderer {
    settings: RenderSettings,
    lane: RenderListLane,
    last_stats: FrameStats,
}

impl Renderer {
    /// Creates a renderer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with the given settings.
    pub fn with_settings(settings: RenderSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// The current frame settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Mutable access to the frame settings.
    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    /// Statistics of the last successful frame.
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Renders the subtree under `root`.
    ///
    /// Each listed mesh runs its before-render hooks, is drawn, then runs its
    /// after-render hooks. Culled and hidden meshes run none.
    ///
    /// Without a camera nothing is culled or depth sorted and every draw
    /// item carries identity view matrices.
    pub fn render<B>(
        &mut self,
        graph: &mut SceneGraph,
        root: NodeId,
        mut camera: Option<&mut Camera>,
        backend: &mut B,
    ) -> Result<FrameStats, RenderError>
    where
        B: DrawBackend + ?Sized,
    {
        // 1. Bring world matrices up to date.
        if self.settings.update {
            graph.update_matrix_world(root, false)?;
        }

        // 2. The camera lives outside the graph, follow its parent if it has one.
        if let Some(camera) = camera.as_deref_mut() {
            let parent_world = match camera.parent {
                Some(parent) => Some(
                    *graph
                        .world_matrix(parent)
                        .ok_or(SceneError::InvalidNode(parent))?,
                ),
                None => None,
            };
            camera.update_matrix_world(parent_world.as_ref());
        }

        // 3. Collect and order the drawables.
        let options = RenderListOptions::from(&self.settings);
        let list = self
            .lane
            .build(graph, root, camera.as_deref_mut(), &options)?;

        // 4. Issue the draws.
        let view = camera.as_deref().map(Camera::view_info);
        backend.begin_frame(&self.settings, view.as_ref())?;
        for &id in &list.nodes {
            let Some(node) = graph.get_mut(id) else {
                continue;
            };
            let world_matrix = node.transform.world_matrix;
            let Some(mesh) = node.mesh.as_mut() else {
                continue;
            };

            let (model_view_matrix, normal_matrix) = match camera.as_deref() {
                Some(camera) => {
                    mesh.update_draw_matrices(&world_matrix, camera);
                    (mesh.model_view_matrix, mesh.normal_matrix)
                }
                None => (Mat4::IDENTITY, Mat3::IDENTITY),
            };
            let mesh = &*mesh;
            mesh.run_before_render(camera.as_deref());

            let item = DrawItem {
                node: id,
                mesh: mesh.id,
                geometry: &mesh.geometry,
                program: &mesh.program,
                mode: mesh.mode,
                world_matrix,
                model_view_matrix,
                normal_matrix,
            };
            backend.draw(&item)?;
            mesh.run_after_render(camera.as_deref());
        }
        backend.end_frame()?;

        let stats = FrameStats::from(&list);
        log::debug!(
            "Frame drawn: {} draws ({} opaque, {} transparent, {} ui), {} culled",
            stats.drawn,
            stats.opaque,
            stats.transparent,
            stats.ui,
            stats.culled
        );
        self.last_stats = stats;
        Ok(stats)
    }
}
