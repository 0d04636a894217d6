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

//! Defines the error type reported by drawing backends.

use std::fmt;

/// An error raised by a [`DrawBackend`](super::DrawBackend) while drawing a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawError {
    /// The backend could not start or finish a frame.
    Frame(String),
    /// Drawing a single item failed.
    Draw {
        /// Identifier of the mesh that failed.
        mesh: u32,
        /// Backend specific details.
        details: String,
    },
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::Frame(details) => write!(f, "Frame error: {details}"),
            DrawError::Draw { mesh, details } => {
                write!(f, "Failed to draw mesh {mesh}: {details}")
            }
        }
    }
}

impl std::error::Error for DrawError {}
