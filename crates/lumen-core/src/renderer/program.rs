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

//! Describes shader programs as far as the render list needs them.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_PROGRAM_ID: AtomicU32 = AtomicU32::new(1);

/// An opaque handle identifying a program. Ids grow in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramId(pub u32);

impl ProgramId {
    /// Allocates the next id from the global counter.
    pub fn next() -> Self {
        Self(NEXT_PROGRAM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Which triangle faces are discarded by the rasterizer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CullFace {
    /// Both faces are drawn.
    None,
    /// Front faces are discarded.
    Front,
    /// Back faces are discarded.
    #[default]
    Back,
}

/// The primitive topology a mesh is drawn with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawMode {
    /// Individual points.
    Points,
    /// Separate line segments.
    Lines,
    /// A closed polyline.
    LineLoop,
    /// An open polyline.
    LineStrip,
    /// Separate triangles.
    #[default]
    Triangles,
    /// A strip of triangles sharing edges.
    TriangleStrip,
    /// A fan of triangles sharing the first vertex.
    TriangleFan,
}

/// The state of a shader program that influences draw ordering.
///
/// A transparent program with depth testing is drawn back to front after
/// every opaque mesh. Without depth testing it is treated as overlay UI and
/// drawn last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Unique id, also used to group draws by program.
    pub id: ProgramId,
    /// Whether the program blends with what is behind it.
    pub transparent: bool,
    /// Whether fragments are depth tested.
    pub depth_test: bool,
    /// Whether fragments write depth.
    pub depth_write: bool,
    /// Face culling mode.
    pub cull_face: CullFace,
}

impl Program {
    /// Creates an opaque, depth tested program with a fresh id.
    pub fn new() -> Self {
        Self {
            id: ProgramId::next(),
            transparent: false,
            depth_test: true,
            depth_write: true,
            cull_face: CullFace::Back,
        }
    }

    /// Sets the transparency flag.
    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Sets the depth test flag.
    pub fn with_depth_test(mut self, depth_test: bool) -> Self {
        self.depth_test = depth_test;
        self
    }

    /// Sets the depth write flag.
    pub fn with_depth_write(mut self, depth_write: bool) -> Self {
        self.depth_write = depth_write;
        self
    }

    /// Sets the face culling mode.
    pub fn with_cull_face(mut self, cull_face: CullFace) -> Self {
        self.cull_face = cull_face;
        self
    }

    /// Overrides the generated id.
    pub fn with_id(mut self, id: ProgramId) -> Self {
        self.id = id;
        self
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}
