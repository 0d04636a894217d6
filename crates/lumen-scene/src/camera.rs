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

//! Perspective and orthographic cameras.

use serde::{Deserialize, Serialize};

use lumen_core::math::{degrees_to_radians, Frustum, Mat4, Ray, Vec2, Vec3};
use lumen_core::renderer::ViewInfo;
use lumen_core::scene::NodeId;

use crate::mesh::Mesh;
use crate::transform::Transform;

/// Defines the type of camera projection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionKind {
    /// Perspective projection from a vertical field of view.
    #[default]
    Perspective,
    /// Orthographic projection from view bounds.
    Orthographic,
}

/// Construction parameters for a [`Camera`].
///
/// Supplying `left` or `right` makes the camera orthographic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Near clipping distance.
    pub near: f32,
    /// Far clipping distance. May be infinite for perspective cameras.
    pub far: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Viewport width over height.
    pub aspect: f32,
    /// Left bound of an orthographic view.
    pub left: Option<f32>,
    /// Right bound of an orthographic view.
    pub right: Option<f32>,
    /// Bottom bound of an orthographic view.
    pub bottom: Option<f32>,
    /// Top bound of an orthographic view.
    pub top: Option<f32>,
    /// Divides the orthographic bounds.
    pub zoom: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 100.0,
            fov: 45.0,
            aspect: 1.0,
            left: None,
            right: None,
            bottom: None,
            top: None,
            zoom: 1.0,
        }
    }
}

/// Perspective parameters to override. `None` keeps the camera's value.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Perspective {
    /// Near clipping distance.
    pub near: Option<f32>,
    /// Far clipping distance.
    pub far: Option<f32>,
    /// Vertical field of view in degrees.
    pub fov: Option<f32>,
    /// Viewport width over height.
    pub aspect: Option<f32>,
}

/// Orthographic parameters to override. `None` keeps the camera's value.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Orthographic {
    /// Near clipping distance.
    pub near: Option<f32>,
    /// Far clipping distance.
    pub far: Option<f32>,
    /// Left bound.
    pub left: Option<f32>,
    /// Right bound.
    pub right: Option<f32>,
    /// Bottom bound.
    pub bottom: Option<f32>,
    /// Top bound.
    pub top: Option<f32>,
    /// Divides the bounds.
    pub zoom: Option<f32>,
}

/// A camera: a transform plus projection state.
///
/// The camera lives outside the [`SceneGraph`](crate::SceneGraph). Set
/// `parent` to make it follow a scene node; the renderer then feeds that
/// node's world matrix into [`Camera::update_matrix_world`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// The camera's local transform.
    pub transform: Transform,
    /// Optional scene node the camera is attached to.
    pub parent: Option<NodeId>,
    /// View to clip space.
    pub projection_matrix: Mat4,
    /// World to view space, the inverse of the world matrix.
    pub view_matrix: Mat4,
    /// `projection * view`.
    pub projection_view_matrix: Mat4,
    /// Translation of the world matrix.
    pub world_position: Vec3,
    /// Current projection kind.
    pub projection: ProjectionKind,
    /// Near clipping distance.
    pub near: f32,
    /// Far clipping distance.
    pub far: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Viewport width over height.
    pub aspect: f32,
    /// Orthographic left bound, before zoom.
    pub left: f32,
    /// Orthographic right bound, before zoom.
    pub right: f32,
    /// Orthographic bottom bound, before zoom.
    pub bottom: f32,
    /// Orthographic top bound, before zoom.
    pub top: f32,
    /// Orthographic zoom factor.
    pub zoom: f32,
    frustum: Option<Frustum>,
}

impl Camera {
    /// Creates a camera and builds its projection.
    pub fn new(options: CameraOptions) -> Self {
        let orthographic = options.left.is_some() || options.right.is_some();
        let mut camera = Self {
            transform: Transform::new(),
            parent: None,
            projection_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_view_matrix: Mat4::IDENTITY,
            world_position: Vec3::ZERO,
            projection: ProjectionKind::Perspective,
            near: options.near,
            far: options.far,
            fov: options.fov,
            aspect: options.aspect,
            left: options.left.unwrap_or(-1.0),
            right: options.right.unwrap_or(1.0),
            bottom: options.bottom.unwrap_or(-1.0),
            top: options.top.unwrap_or(1.0),
            zoom: options.zoom,
            frustum: None,
        };
        if orthographic {
            camera.orthographic(Orthographic::default());
        } else {
            camera.perspective(Perspective::default());
        }
        camera
    }

    /// Switches to a perspective projection, applying any overrides.
    pub fn perspective(&mut self, params: Perspective) -> &mut Self {
        self.near = params.near.unwrap_or(self.near);
        self.far = params.far.unwrap_or(self.far);
        self.fov = params.fov.unwrap_or(self.fov);
        self.aspect = params.aspect.unwrap_or(self.aspect);
        self.projection_matrix = Mat4::from_perspective(
            degrees_to_radians(self.fov),
            self.aspect,
            self.near,
            self.far,
        );
        self.projection = ProjectionKind::Perspective;
        self
    }

    /// Switches to an orthographic projection, applying any overrides.
    ///
    /// The stored bounds are kept as given; the projection uses them
    /// divided by `zoom`.
    pub fn orthographic(&mut self, params: Orthographic) -> &mut Self {
        self.near = params.near.unwrap_or(self.near);
        self.far = params.far.unwrap_or(self.far);
        self.left = params.left.unwrap_or(self.left);
        self.right = params.right.unwrap_or(self.right);
        self.bottom = params.bottom.unwrap_or(self.bottom);
        self.top = params.top.unwrap_or(self.top);
        self.zoom = params.zoom.unwrap_or(self.zoom);
        self.projection_matrix = Mat4::from_orthogonal(
            self.left / self.zoom,
            self.right / self.zoom,
            self.bottom / self.zoom,
            self.top / self.zoom,
            self.near,
            self.far,
        );
        self.projection = ProjectionKind::Orthographic;
        self
    }

    /// Updates the aspect ratio from a viewport size and rebuilds a
    /// perspective projection. A zero height is ignored.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) -> &mut Self {
        if height == 0 {
            return self;
        }
        self.aspect = width as f32 / height as f32;
        if self.projection == ProjectionKind::Perspective {
            self.perspective(Perspective::default());
        }
        self
    }

    /// Updates the world matrix, then the view, world position and
    /// projection-view matrices derived from it.
    pub fn update_matrix_world(&mut self, parent_world: Option<&Mat4>) -> &mut Self {
        self.transform.update_world_matrix(parent_world, false);
        self.view_matrix = self.transform.world_matrix;
        self.view_matrix.inverse();
        self.world_position = self.transform.world_matrix.get_translation();
        self.projection_view_matrix
            .multiply_matrices(&self.projection_matrix, &self.view_matrix);
        self
    }

    /// Points the camera's -z axis at `target`.
    pub fn look_at(&mut self, target: Vec3) -> &mut Self {
        self.transform.look_at(target, true);
        self
    }

    /// Transforms a world-space point into normalized device coordinates.
    pub fn project(&self, v: &mut Vec3) {
        v.apply_matrix4(&self.view_matrix)
            .apply_matrix4(&self.projection_matrix);
    }

    /// Transforms a point in normalized device coordinates back to world space.
    pub fn unproject(&self, v: &mut Vec3) {
        let mut inverse_projection = self.projection_matrix;
        inverse_projection.inverse();
        v.apply_matrix4(&inverse_projection)
            .apply_matrix4(&self.transform.world_matrix);
    }

    /// A world-space ray through a point in normalized device coordinates.
    ///
    /// Perspective rays start at the camera position. Orthographic rays start
    /// on the view plane under `ndc` and run along the camera's -z axis. Call
    /// [`Camera::update_matrix_world`] first.
    pub fn cast_ray(&self, ndc: Vec2) -> Ray {
        match self.projection {
            ProjectionKind::Orthographic => {
                let mut origin = Vec3::new(ndc.x, ndc.y, 0.0);
                self.unproject(&mut origin);
                let mut direction = -Vec3::Z;
                direction.transform_direction(&self.transform.world_matrix);
                Ray::new(origin, direction)
            }
            ProjectionKind::Perspective => {
                let origin = self.transform.world_matrix.get_translation();
                let mut target = Vec3::new(ndc.x, ndc.y, 0.5);
                self.unproject(&mut target);
                Ray::new(origin, target - origin)
            }
        }
    }

    /// Rebuilds the frustum planes from the projection-view matrix.
    pub fn update_frustum(&mut self) -> &mut Self {
        self.frustum = Some(Frustum::from_matrix(&self.projection_view_matrix));
        log::debug!("Camera frustum rebuilt");
        self
    }

    /// The frustum, once [`Camera::update_frustum`] has been called.
    pub fn frustum(&self) -> Option<&Frustum> {
        self.frustum.as_ref()
    }

    /// `false` only when the sphere is entirely outside the frustum. Without a
    /// frustum every sphere is considered visible.
    pub fn frustum_intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.frustum
            .as_ref()
            .is_none_or(|frustum| frustum.intersects_sphere(center, radius))
    }

    /// Tests the bounding sphere of `mesh` placed with `world`.
    ///
    /// Meshes without positions or without computable bounds are considered
    /// visible.
    pub fn frustum_intersects_mesh(&self, mesh: &Mesh, world: &Mat4) -> bool {
        let geometry = &mesh.geometry;
        if geometry.position().is_none() {
            return true;
        }
        let Some(bounds) = geometry.bounds() else {
            return true;
        };
        let mut center = bounds.center;
        center.apply_matrix4(world);
        let radius = bounds.radius * world.get_max_scale_on_axis();
        self.frustum_intersects_sphere(center, radius)
    }

    /// Camera data in the form backends receive it.
    pub fn view_info(&self) -> ViewInfo {
        ViewInfo::new(self.view_matrix, self.projection_matrix, self.world_position)
    }
}

impl Default for Camera {
    /// A 45 degree perspective camera with the default options.
    fn default() -> Self {
        Self::new(CameraOptions::default())
    }
}
