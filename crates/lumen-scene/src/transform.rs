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

//! Local and world transforms of a scene node.

use lumen_core::math::{Euler, EulerOrder, Mat4, Quaternion, Vec3};

/// Position, rotation and scale of a node relative to its parent, plus the
/// cached local and world matrices derived from them.
///
/// The parent/child edges are not stored here; the [`SceneGraph`](crate::SceneGraph)
/// owns them and feeds the parent's world matrix into
/// [`Transform::update_world_matrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub position: Vec3,
    /// Rotation relative to the parent.
    pub quaternion: Quaternion,
    /// Scale relative to the parent.
    pub scale: Vec3,
    /// The up direction used by [`Transform::look_at`].
    pub up: Vec3,
    /// The local matrix, `T * R * S`.
    pub matrix: Mat4,
    /// The parent's world matrix times `matrix`.
    pub world_matrix: Mat4,
    /// Recompose `matrix` from position, rotation and scale on every update.
    pub matrix_auto_update: bool,
    /// Set when `matrix` changed and `world_matrix` is stale.
    pub world_matrix_needs_update: bool,
    /// An invisible node hides its whole subtree from the render list.
    pub visible: bool,
}

impl Transform {
    /// Creates an identity transform.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            quaternion: Quaternion::IDENTITY,
            scale: Vec3::ONE,
            up: Vec3::Y,
            matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            matrix_auto_update: true,
            world_matrix_needs_update: true,
            visible: true,
        }
    }

    /// Creates an identity transform translated to `position`.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    /// Recomposes `matrix` and marks the world matrix stale.
    pub fn update_matrix(&mut self) -> &mut Self {
        self.matrix = Mat4::compose(&self.quaternion, self.position, self.scale);
        self.world_matrix_needs_update = true;
        self
    }

    /// One step of world matrix propagation.
    ///
    /// Recomposes the local matrix when `matrix_auto_update` is set. The world
    /// matrix is recomputed when it is stale or `force` is set, in which case
    /// `true` is returned so the caller forces every descendant as well.
    pub fn update_world_matrix(&mut self, parent_world: Option<&Mat4>, force: bool) -> bool {
        if self.matrix_auto_update {
            self.update_matrix();
        }
        if !(self.world_matrix_needs_update || force) {
            return false;
        }
        match parent_world {
            Some(parent) => {
                self.world_matrix.multiply_matrices(parent, &self.matrix);
            }
            None => self.world_matrix = self.matrix,
        }
        self.world_matrix_needs_update = false;
        true
    }

    /// Overwrites position, rotation and scale from `matrix`.
    pub fn decompose(&mut self) -> &mut Self {
        let (quaternion, position, scale) = self.matrix.decompose();
        self.quaternion = quaternion;
        self.position = position;
        self.scale = scale;
        self
    }

    /// Assigns the local matrix and decomposes it.
    pub fn set_matrix(&mut self, matrix: Mat4) -> &mut Self {
        self.matrix = matrix;
        self.decompose()
    }

    /// The rotation as Euler angles in the default `YXZ` order.
    pub fn rotation(&self) -> Euler {
        Euler::from_quaternion(&self.quaternion, EulerOrder::default())
    }

    /// Sets the rotation from Euler angles in any order.
    pub fn set_rotation(&mut self, euler: &Euler) -> &mut Self {
        self.quaternion = Quaternion::from_euler(euler);
        self
    }

    /// Rotates the node to face `target`, given in the parent's space.
    ///
    /// With `invert == false` the local +z axis points at the target. With
    /// `invert == true` the local -z axis does, which is the camera
    /// convention. Looking at the node's own position leaves it unchanged.
    pub fn look_at(&mut self, target: Vec3, invert: bool) -> &mut Self {
        if target == self.position {
            log::warn!("look_at target equals the node position {:?}, ignoring", target);
            return self;
        }
        let m = if invert {
            Mat4::look_at(self.position, target, self.up)
        } else {
            Mat4::look_at(target, self.position, self.up)
        };
        self.quaternion = m.get_rotation();
        self
    }
}

impl Default for Transform {
    /// Returns the identity `Transform`.
    fn default() -> Self {
        Self::new()
    }
}
