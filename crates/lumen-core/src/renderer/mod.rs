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

//! Provides the backend-agnostic contracts between the scene and a drawing backend.
//!
//! Lumen does not talk to a GPU itself. The lanes crate turns a scene into an
//! ordered list of [`DrawItem`]s and hands them to something implementing
//! [`DrawBackend`]. Geometry and programs are described here only as far as
//! sorting and culling need them.

pub mod error;
pub mod geometry;
pub mod program;
pub mod settings;
pub mod traits;

pub use self::error::DrawError;
pub use self::geometry::{Attribute, Geometry, RaycastShape, POSITION_ATTRIBUTE};
pub use self::program::{CullFace, DrawMode, Program, ProgramId};
pub use self::settings::RenderSettings;
pub use self::traits::{DrawBackend, DrawItem, MeshId, ViewInfo};
