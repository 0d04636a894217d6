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

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use lumen_core::math::Vec3;
use lumen_core::renderer::{Attribute, Geometry, Program, POSITION_ATTRIBUTE};
use lumen_lanes::{RenderListLane, RenderListOptions};
use lumen_scene::{Camera, Mesh, Node, SceneGraph};

fn bench_render_list(c: &mut Criterion) {
    let geometry = Arc::new(Geometry::new().with_attribute(
        POSITION_ATTRIBUTE,
        Attribute::new(3, vec![-0.5, -0.5, -0.5, 0.5, 0.5, 0.5]),
    ));
    let programs = [
        Arc::new(Program::new()),
        Arc::new(Program::new()),
        Arc::new(Program::new().with_transparent(true)),
        Arc::new(Program::new().with_transparent(true).with_depth_test(false)),
    ];

    // Setup a 100 x 100 grid of meshes in front of the camera, half of it out of view.
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    for i in 0..10_000 {
        let x = (i % 100) as f32 - 50.0;
        let z = -((i / 100) as f32) - 1.0;
        let mesh = Mesh::new(geometry.clone(), programs[i % programs.len()].clone());
        let node = graph.insert(Node::new().with_position(Vec3::new(x, 0.0, z)).with_mesh(mesh));
        let _ = graph.add_child(root, node);
    }
    let _ = graph.update_matrix_world(root, true);

    let mut camera = Camera::default();
    camera.update_matrix_world(None);
    let lane = RenderListLane::new();

    let mut group = c.benchmark_group("Render List");

    group.bench_function("Cull + Sort", |b| {
        let options = RenderListOptions::default();
        b.iter(|| {
            let list = lane.build(&mut graph, root, Some(&mut camera), &options);
            black_box(list.map(|list| list.len()).unwrap_or_default());
        });
    });

    group.bench_function("Traversal only", |b| {
        let options = RenderListOptions {
            frustum_cull: false,
            sort: false,
        };
        b.iter(|| {
            let list = lane.build(&mut graph, root, None, &options);
            black_box(list.map(|list| list.len()).unwrap_or_default());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_render_list);
criterion_main!(benches);
