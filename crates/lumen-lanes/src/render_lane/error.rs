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

//! Defines the error type of a rendered frame.

use lumen_core::renderer::DrawError;
use lumen_scene::SceneError;
use thiserror::Error;

/// An error that aborted a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A node handle passed to the renderer did not resolve.
    #[error(transparent)]
    Scene(#[from] SceneError),
    /// The drawing backend reported a failure.
    #[error("Backend failure: {0}")]
    Backend(#[from] DrawError),
}
