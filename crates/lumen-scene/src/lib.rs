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

//! # Lumen Scene
//!
//! Scene data for the Lumen engine: local/world [`Transform`]s, the arena
//! [`SceneGraph`] that owns every parent/child edge, drawable [`Mesh`]
//! payloads, the [`Camera`] and ray queries against mesh bounds.

#![warn(missing_docs)]

pub mod camera;
pub mod error;
pub mod graph;
pub mod mesh;
pub mod raycast;
pub mod transform;

pub use self::camera::{Camera, CameraOptions, Orthographic, Perspective, ProjectionKind};
pub use self::error::SceneError;
pub use self::graph::{Node, SceneGraph, Visit};
pub use self::mesh::{Mesh, RenderHook};
pub use self::raycast::{intersect_meshes, RayHit};
pub use self::transform::Transform;
pub use lumen_core::scene::NodeId;
