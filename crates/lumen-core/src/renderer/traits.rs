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

//! The trait a drawing backend implements, and the data it receives.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

use super::{DrawError, DrawMode, Geometry, Program, RenderSettings};
use crate::math::{Mat3, Mat4, Vec3};
use crate::scene::NodeId;

static NEXT_MESH_ID: AtomicU32 = AtomicU32::new(1);

/// Identifies a mesh. Ids grow in creation order, which the render list uses
/// as its final tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshId(pub u32);

impl MeshId {
    /// Allocates the next id from the global counter.
    pub fn next() -> Self {
        Self(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Camera data for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewInfo {
    /// The camera's view matrix (world to view space).
    pub view_matrix: Mat4,
    /// The camera's projection matrix (view to clip space).
    pub projection_matrix: Mat4,
    /// The camera's position in world space.
    pub camera_position: Vec3,
}

impl ViewInfo {
    /// Creates a new `ViewInfo` from individual components.
    pub fn new(view_matrix: Mat4, projection_matrix: Mat4, camera_position: Vec3) -> Self {
        Self {
            view_matrix,
            projection_matrix,
            camera_position,
        }
    }

    /// The product `projection * view`.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }
}

/// Everything a backend needs to issue one draw call.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    /// The scene node carrying the mesh.
    pub node: NodeId,
    /// The mesh being drawn.
    pub mesh: MeshId,
    /// The vertex data.
    pub geometry: &'a Geometry,
    /// The program state.
    pub program: &'a Program,
    /// Primitive topology.
    pub mode: DrawMode,
    /// Node to world.
    pub world_matrix: Mat4,
    /// Node to view. Identity when there is no camera.
    pub model_view_matrix: Mat4,
    /// Inverse-transpose of the model-view 3x3.
    pub normal_matrix: Mat3,
}

/// A sink for ordered draw calls.
///
/// `begin_frame` and `end_frame` bracket every frame, even an empty one.
pub trait DrawBackend {
    /// Starts a frame. `view` is `None` when rendering without a camera.
    fn begin_frame(
        &mut self,
        settings: &RenderSettings,
        view: Option<&ViewInfo>,
    ) -> Result<(), DrawError>;

    /// Draws one item. Items arrive in render-list order.
    fn draw(&mut self, item: &DrawItem<'_>) -> Result<(), DrawError>;

    /// Finishes the frame.
    fn end_frame(&mut self) -> Result<(), DrawError> {
        Ok(())
    }
}
