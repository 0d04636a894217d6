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

//! Defines the error type for scene graph mutations.

use lumen_core::scene::NodeId;
use std::fmt;

/// An error raised when a scene graph operation cannot be applied.
///
/// The graph is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not resolve to a live node (never inserted, removed,
    /// or its slot was recycled).
    InvalidNode(NodeId),
    /// Attaching `node` under `parent` would make `node` its own ancestor.
    Cycle {
        /// The node being reparented.
        node: NodeId,
        /// The requested parent, which is a descendant of `node`.
        parent: NodeId,
    },
    /// A node was asked to become its own parent.
    SelfParent(NodeId),
    /// `child` is not attached to `parent`.
    NotAChild {
        /// The supposed parent.
        parent: NodeId,
        /// The node that is not one of its children.
        child: NodeId,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::InvalidNode(id) => write!(f, "Node {id} does not exist"),
            SceneError::Cycle { node, parent } => {
                write!(
                    f,
                    "Cannot attach node {node} to {parent}: {parent} is one of its descendants"
                )
            }
            SceneError::SelfParent(id) => write!(f, "Node {id} cannot be its own parent"),
            SceneError::NotAChild { parent, child } => {
                write!(f, "Node {child} is not a child of {parent}")
            }
        }
    }
}

impl std::error::Error for SceneError {}
