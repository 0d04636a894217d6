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

//! The drawable payload a scene node can carry.

use std::fmt;
use std::sync::Arc;

use lumen_core::math::{Mat3, Mat4};
use lumen_core::renderer::{DrawMode, Geometry, MeshId, Program};

use crate::camera::Camera;

/// A callback run by the renderer around the draw call of a mesh.
///
/// It sees the mesh after its draw matrices are written, and the frame's
/// camera if there is one.
pub type RenderHook = Arc<dyn Fn(&Mesh, Option<&Camera>) + Send + Sync>;

/// Geometry drawn with a program, plus the per-frame state the render list
/// and backend need.
///
/// Geometry and program are shared: many meshes may point at the same ones.
#[derive(Clone)]
pub struct Mesh {
    /// Unique id. Later meshes get larger ids.
    pub id: MeshId,
    /// Vertex data.
    pub geometry: Arc<Geometry>,
    /// Shader program state.
    pub program: Arc<Program>,
    /// Primitive topology.
    pub mode: DrawMode,
    /// Whether the mesh may be skipped when outside the camera frustum.
    pub frustum_culled: bool,
    /// Explicit draw order. A non-zero value disables depth sorting.
    pub render_order: i32,
    /// Normalized device depth of the mesh origin, written by the render list.
    pub z_depth: f32,
    /// `view * world`, written before drawing.
    pub model_view_matrix: Mat4,
    /// Normal matrix of `model_view_matrix`, written before drawing.
    pub normal_matrix: Mat3,
    /// Run in order right before the mesh is drawn.
    pub before_render: Vec<RenderHook>,
    /// Run in order right after the mesh is drawn.
    pub after_render: Vec<RenderHook>,
}

impl Mesh {
    /// Creates a mesh with a fresh id, drawn as triangles.
    pub fn new(geometry: Arc<Geometry>, program: Arc<Program>) -> Self {
        Self {
            id: MeshId::next(),
            geometry,
            program,
            mode: DrawMode::Triangles,
            frustum_culled: true,
            render_order: 0,
            z_depth: 0.0,
            model_view_matrix: Mat4::IDENTITY,
            normal_matrix: Mat3::IDENTITY,
            before_render: Vec::new(),
            after_render: Vec::new(),
        }
    }

    /// Sets the draw mode.
    pub fn with_mode(mut self, mode: DrawMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the explicit render order.
    pub fn with_render_order(mut self, render_order: i32) -> Self {
        self.render_order = render_order;
        self
    }

    /// Opts the mesh in or out of frustum culling.
    pub fn with_frustum_culled(mut self, frustum_culled: bool) -> Self {
        self.frustum_culled = frustum_culled;
        self
    }

    /// Overrides the generated id.
    pub fn with_id(mut self, id: MeshId) -> Self {
        self.id = id;
        self
    }

    /// Registers a hook to run before every draw of this mesh.
    pub fn on_before_render<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Mesh, Option<&Camera>) + Send + Sync + 'static,
    {
        self.before_render.push(Arc::new(hook));
        self
    }

    /// Registers a hook to run after every draw of this mesh.
    pub fn on_after_render<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Mesh, Option<&Camera>) + Send + Sync + 'static,
    {
        self.after_render.push(Arc::new(hook));
        self
    }

    /// Runs the before-render hooks in registration order.
    pub fn run_before_render(&self, camera: Option<&Camera>) {
        for hook in &self.before_render {
            hook(self, camera);
        }
    }

    /// Runs the after-render hooks in registration order.
    pub fn run_after_render(&self, camera: Option<&Camera>) {
        for hook in &self.after_render {
            hook(self, camera);
        }
    }

    /// Computes the model-view and normal matrices for `world` seen from `camera`.
    pub fn update_draw_matrices(&mut self, world: &Mat4, camera: &Camera) -> &mut Self {
        self.model_view_matrix
            .multiply_matrices(&camera.view_matrix, world);
        self.normal_matrix = Mat3::normal_matrix(&self.model_view_matrix);
        self
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("id", &self.id)
            .field("geometry", &self.geometry)
            .field("program", &self.program)
            .field("mode", &self.mode)
            .field("frustum_culled", &self.frustum_culled)
            .field("render_order", &self.render_order)
            .field("z_depth", &self.z_depth)
            .field("model_view_matrix", &self.model_view_matrix)
            .field("normal_matrix", &self.normal_matrix)
            .field("before_render", &self.before_render.len())
            .field("after_render", &self.after_render.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lumen_core::math::{Quaternion, Vec3, EPSILON};
    use std::sync::Mutex;

    fn mesh() -> Mesh {
        Mesh::new(Arc::new(Geometry::new()), Arc::new(Program::new()))
    }

    #[test]
    fn test_defaults_and_ids() {
        let a = mesh();
        let b = mesh();
        assert!(b.id > a.id);
        assert_eq!(a.mode, DrawMode::Triangles);
        assert!(a.frustum_culled);
        assert_eq!(a.render_order, 0);
        assert_eq!(a.z_depth, 0.0);
    }

    #[test]
    fn test_update_draw_matrices() {
        // --- Arrange ---
        let mut camera = Camera::default();
        camera.transform.position = Vec3::new(0.0, 0.0, 5.0);
        camera.update_matrix_world(None);
        let world = Mat4::compose(
            &Quaternion::IDENTITY,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, 1.0),
        );
        let mut m = mesh();

        // --- Act ---
        m.update_draw_matrices(&world, &camera);

        // --- Assert ---
        assert_relative_eq!(
            m.model_view_matrix.get_translation(),
            Vec3::new(1.0, 0.0, -5.0),
            epsilon = EPSILON
        );
        // Non-uniform scale: the normal matrix divides by it instead.
        assert_relative_eq!(m.normal_matrix.elements[0], 0.5, epsilon = EPSILON);
        assert_relative_eq!(m.normal_matrix.elements[4], 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_hooks_run_in_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let (first, second, after) = (calls.clone(), calls.clone(), calls.clone());
        let m = mesh()
            .on_before_render(move |_, _| first.lock().unwrap().push("before-1"))
            .on_before_render(move |_, _| second.lock().unwrap().push("before-2"))
            .on_after_render(move |_, camera| {
                assert!(camera.is_none());
                after.lock().unwrap().push("after")
            });

        m.run_before_render(None);
        m.run_after_render(None);

        assert_eq!(*calls.lock().unwrap(), vec!["before-1", "before-2", "after"]);
        // Clones share the same hooks.
        assert_eq!(m.clone().before_render.len(), 2);
    }

    #[test]
    fn test_hooks_see_the_mesh() {
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let m = mesh()
            .with_render_order(4)
            .on_before_render(move |mesh, _| *sink.lock().unwrap() = Some(mesh.render_order));
        m.run_before_render(None);
        assert_eq!(*seen.lock().unwrap(), Some(4));
        assert!(format!("{m:?}").contains("before_render: 1"));
    }
}
