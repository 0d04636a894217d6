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

//! Provides the 3x3 and 4x4 matrix types.
//!
//! Both types store their elements **column-major** in a flat array, the layout
//! graphics APIs expect for uniform uploads. The `set` methods take their
//! arguments in **row-major** order so literal matrices read the way they are
//! written on paper; they are transposed into storage.

mod mat3;
mod mat4;

pub use self::mat3::Mat3;
pub use self::mat4::Mat4;
