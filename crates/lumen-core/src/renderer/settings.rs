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

//! Global settings for the rendering process.

use serde::{Deserialize, Serialize};

/// A collection of global settings that drive one frame.
///
/// Missing fields in a serialized document take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Propagate world matrices through the scene before building the list.
    pub update: bool,
    /// Sort the render list buckets.
    pub sort: bool,
    /// Skip meshes outside the camera frustum.
    pub frustum_cull: bool,
    /// Ask the backend to clear its target at the start of the frame.
    pub clear: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            update: true,
            sort: true,
            frustum_cull: true,
            clear: true,
        }
    }
}
