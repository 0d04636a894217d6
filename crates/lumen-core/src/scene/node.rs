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

//! Defines the handle used to address nodes in a scene graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a node in a scene graph arena.
///
/// It combines a slot index with a generation count. When a node is removed
/// its slot can be recycled, but the generation is incremented, so stale
/// handles to the old node no longer resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    /// The slot of the node in the arena.
    pub index: u32,
    /// Incremented each time the slot is recycled.
    pub generation: u32,
}

impl NodeId {
    /// Creates a handle from its parts.
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_distinguishes_recycled_slots() {
        let old = NodeId::new(3, 0);
        let recycled = NodeId::new(3, 1);
        assert_ne!(old, recycled);
        assert_eq!(recycled.to_string(), "3v1");
    }
}
