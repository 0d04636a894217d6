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

//! Integration tests for render list ordering, culling and frame submission.

use std::sync::{Arc, Mutex};

use lumen_core::math::{Mat4, Vec3};
use lumen_core::renderer::{
    Attribute, DrawBackend, DrawError, DrawItem, Geometry, Program, RenderSettings, ViewInfo,
    POSITION_ATTRIBUTE,
};
use lumen_lanes::{RenderError, RenderListLane, RenderListOptions, Renderer};
use lumen_scene::{Camera, Mesh, Node, NodeId, SceneGraph};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cube() -> Arc<Geometry> {
    Arc::new(Geometry::new().with_attribute(
        POSITION_ATTRIBUTE,
        Attribute::new(3, vec![-1.0, -1.0, -1.0, 1.0, 1.0, 1.0]),
    ))
}

fn opaque() -> Arc<Program> {
    Arc::new(Program::new())
}

fn transparent() -> Arc<Program> {
    Arc::new(Program::new().with_transparent(true))
}

fn ui() -> Arc<Program> {
    Arc::new(Program::new().with_transparent(true).with_depth_test(false))
}

/// Adds a mesh node at `position` under `parent`.
fn add_mesh(graph: &mut SceneGraph, parent: NodeId, mesh: Mesh, position: Vec3) -> NodeId {
    let id = graph.insert(Node::new().with_position(position).with_mesh(mesh));
    graph.add_child(parent, id).unwrap();
    id
}

/// A camera at the origin looking down -z with fresh matrices.
fn camera() -> Camera {
    let mut camera = Camera::default();
    camera.update_matrix_world(None);
    camera
}

fn z_depth(graph: &SceneGraph, id: NodeId) -> f32 {
    graph
        .get(id)
        .and_then(|node| node.mesh.as_ref())
        .map(|mesh| mesh.z_depth)
        .unwrap()
}

// --- Buckets ---

#[test]
fn buckets_are_concatenated_opaque_transparent_ui() {
    init_logger();
    // --- 1. ARRANGE ---
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let hud = add_mesh(&mut graph, root, Mesh::new(cube(), ui()), Vec3::ZERO);
    let glass = add_mesh(&mut graph, root, Mesh::new(cube(), transparent()), Vec3::ZERO);
    let wall = add_mesh(&mut graph, root, Mesh::new(cube(), opaque()), Vec3::ZERO);
    graph.update_matrix_world(root, false).unwrap();

    // --- 2. ACT ---
    let list = RenderListLane::new()
        .build(&mut graph, root, None, &RenderListOptions::default())
        .unwrap();

    // --- 3. ASSERT ---
    assert_eq!(list.nodes, vec![wall, glass, hud]);
    assert_eq!((list.opaque, list.transparent, list.ui), (1, 1, 1));
    assert_eq!(list.culled, 0);
}

#[test]
fn render_order_wins_inside_a_bucket() {
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let program = opaque();
    let late = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), program.clone()).with_render_order(2),
        Vec3::ZERO,
    );
    let early = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), program.clone()).with_render_order(-1),
        Vec3::ZERO,
    );
    let middle = add_mesh(&mut graph, root, Mesh::new(cube(), program), Vec3::ZERO);
    graph.update_matrix_world(root, false).unwrap();

    let list = RenderListLane::new()
        .build(&mut graph, root, None, &RenderListOptions::default())
        .unwrap();

    assert_eq!(list.nodes, vec![early, middle, late]);
}

#[test]
fn equal_keys_fall_back_to_newest_mesh_first() {
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let program = ui();
    let older = add_mesh(&mut graph, root, Mesh::new(cube(), program.clone()), Vec3::ZERO);
    let newer = add_mesh(&mut graph, root, Mesh::new(cube(), program), Vec3::ZERO);
    graph.update_matrix_world(root, false).unwrap();

    let list = RenderListLane::new()
        .build(&mut graph, root, None, &RenderListOptions::default())
        .unwrap();

    assert_eq!(list.nodes, vec![newer, older]);
}

// --- Depth ---

#[test]
fn transparent_meshes_draw_back_to_front() {
    init_logger();
    // --- 1. ARRANGE ---
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let program = transparent();
    let far = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), program.clone()),
        Vec3::new(0.0, 0.0, -10.0),
    );
    let near = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), program),
        Vec3::new(0.0, 0.0, -2.0),
    );
    graph.update_matrix_world(root, false).unwrap();
    let mut camera = camera();

    // --- 2. ACT ---
    let list = RenderListLane::new()
        .build(&mut graph, root, Some(&mut camera), &RenderListOptions::default())
        .unwrap();

    // --- 3. ASSERT ---
    assert_eq!(list.nodes, vec![far, near]);
    assert!(z_depth(&graph, far) > z_depth(&graph, near));
    assert!(z_depth(&graph, near) > 0.0);
}

#[test]
fn opaque_meshes_draw_front_to_back() {
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let program = opaque();
    let near = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), program.clone()),
        Vec3::new(0.0, 0.0, -2.0),
    );
    let far = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), program),
        Vec3::new(0.0, 0.0, -10.0),
    );
    graph.update_matrix_world(root, false).unwrap();
    let mut camera = camera();

    let list = RenderListLane::new()
        .build(&mut graph, root, Some(&mut camera), &RenderListOptions::default())
        .unwrap();

    assert_eq!(list.nodes, vec![near, far]);
}

#[test]
fn z_depth_is_only_computed_for_depth_tested_default_order() {
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let position = Vec3::new(0.0, 0.0, -5.0);
    let sorted = add_mesh(&mut graph, root, Mesh::new(cube(), opaque()), position);
    let ordered = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), opaque()).with_render_order(3),
        position,
    );
    let flat = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), Arc::new(Program::new().with_depth_test(false))),
        position,
    );
    graph.update_matrix_world(root, false).unwrap();
    let mut camera = camera();

    RenderListLane::new()
        .build(&mut graph, root, Some(&mut camera), &RenderListOptions::default())
        .unwrap();

    assert!(z_depth(&graph, sorted) > 0.0);
    assert_eq!(z_depth(&graph, ordered), 0.0);
    assert_eq!(z_depth(&graph, flat), 0.0);
}

// --- Visibility ---

#[test]
fn frustum_culling_skips_meshes_behind_the_camera() {
    init_logger();
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let ahead = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), opaque()),
        Vec3::new(0.0, 0.0, -5.0),
    );
    let behind = Vec3::new(0.0, 0.0, 10.0);
    add_mesh(&mut graph, root, Mesh::new(cube(), opaque()), behind);
    let pinned = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), opaque()).with_frustum_culled(false),
        behind,
    );
    graph.update_matrix_world(root, false).unwrap();
    let mut camera = camera();

    let list = RenderListLane::new()
        .build(&mut graph, root, Some(&mut camera), &RenderListOptions::default())
        .unwrap();

    assert_eq!(list.len(), 2);
    assert!(list.nodes.contains(&ahead));
    assert!(list.nodes.contains(&pinned));
    assert_eq!(list.culled, 1);
    assert!(camera.frustum().is_some());

    // Culling disabled keeps everything.
    let options = RenderListOptions {
        frustum_cull: false,
        ..RenderListOptions::default()
    };
    let list = RenderListLane::new()
        .build(&mut graph, root, Some(&mut camera), &options)
        .unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.culled, 0);
}

#[test]
fn culled_parent_does_not_hide_its_children() {
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let parent = add_mesh(
        &mut graph,
        root,
        Mesh::new(cube(), opaque()),
        Vec3::new(0.0, 0.0, 10.0),
    );
    let child = add_mesh(
        &mut graph,
        parent,
        Mesh::new(cube(), opaque()),
        Vec3::new(0.0, 0.0, -15.0),
    );
    graph.update_matrix_world(root, false).unwrap();
    let mut camera = camera();

    let list = RenderListLane::new()
        .build(&mut graph, root, Some(&mut camera), &RenderListOptions::default())
        .unwrap();

    assert_eq!(list.nodes, vec![child]);
    assert_eq!(list.culled, 1);
}

#[test]
fn invisible_nodes_hide_their_subtree() {
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let shown = add_mesh(&mut graph, root, Mesh::new(cube(), opaque()), Vec3::ZERO);
    let hidden = add_mesh(&mut graph, root, Mesh::new(cube(), opaque()), Vec3::ZERO);
    add_mesh(&mut graph, hidden, Mesh::new(cube(), opaque()), Vec3::ZERO);
    graph.get_mut(hidden).unwrap().transform.visible = false;
    graph.update_matrix_world(root, false).unwrap();

    let list = RenderListLane::new()
        .build(&mut graph, root, None, &RenderListOptions::default())
        .unwrap();

    assert_eq!(list.nodes, vec![shown]);
}

#[test]
fn unsorted_list_keeps_traversal_order() {
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new().with_mesh(Mesh::new(cube(), ui())));
    let a = add_mesh(&mut graph, root, Mesh::new(cube(), transparent()), Vec3::ZERO);
    let b = add_mesh(&mut graph, a, Mesh::new(cube(), opaque()), Vec3::ZERO);
    let c = add_mesh(&mut graph, root, Mesh::new(cube(), opaque()), Vec3::ZERO);
    graph.update_matrix_world(root, false).unwrap();

    let options = RenderListOptions {
        sort: false,
        ..RenderListOptions::default()
    };
    let list = RenderListLane::new()
        .build(&mut graph, root, None, &options)
        .unwrap();

    assert_eq!(list.nodes, vec![root, a, b, c]);
    assert_eq!((list.opaque, list.transparent, list.ui), (0, 0, 0));
}

// --- Renderer ---

#[derive(Default)]
struct CollectingBackend {
    items: Vec<(NodeId, Mat4, Mat4)>,
    fail_on: Option<NodeId>,
}

impl DrawBackend for CollectingBackend {
    fn begin_frame(
        &mut self,
        _settings: &RenderSettings,
        _view: Option<&ViewInfo>,
    ) -> Result<(), DrawError> {
        self.items.clear();
        Ok(())
    }

    fn draw(&mut self, item: &DrawItem<'_>) -> Result<(), DrawError> {
        if self.fail_on == Some(item.node) {
            return Err(DrawError::Draw {
                mesh: item.mesh.0,
                details: "lost context".to_string(),
            });
        }
        self.items
            .push((item.node, item.world_matrix, item.model_view_matrix));
        Ok(())
    }
}

#[test]
fn renderer_follows_a_camera_attached_to_a_node() -> anyhow::Result<()> {
    init_logger();
    // --- 1. ARRANGE ---
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let rig = graph.insert(Node::new().with_position(Vec3::new(0.0, 0.0, 5.0)));
    graph.add_child(root, rig)?;
    let target = add_mesh(&mut graph, root, Mesh::new(cube(), opaque()), Vec3::ZERO);
    let mut camera = Camera::default();
    camera.parent = Some(rig);
    let mut backend = CollectingBackend::default();

    // --- 2. ACT ---
    let stats = Renderer::new().render(&mut graph, root, Some(&mut camera), &mut backend)?;

    // --- 3. ASSERT ---
    assert_eq!(stats.drawn, 1);
    assert!((camera.world_position.z - 5.0).abs() < 1e-5);
    let (node, world, model_view) = backend.items[0];
    assert_eq!(node, target);
    assert_eq!(world, Mat4::IDENTITY);
    assert!((model_view.get_translation().z + 5.0).abs() < 1e-5);
    Ok(())
}

#[test]
fn renderer_maps_backend_failures() {
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let first = add_mesh(&mut graph, root, Mesh::new(cube(), opaque()), Vec3::ZERO);
    let broken = add_mesh(&mut graph, root, Mesh::new(cube(), ui()), Vec3::ZERO);
    let mut backend = CollectingBackend {
        fail_on: Some(broken),
        ..CollectingBackend::default()
    };
    let mut renderer = Renderer::new();

    let result = renderer.render(&mut graph, root, None, &mut backend);

    assert!(matches!(result, Err(RenderError::Backend(DrawError::Draw { .. }))));
    assert_eq!(backend.items.len(), 1);
    assert_eq!(backend.items[0].0, first);
    assert_eq!(renderer.last_stats().drawn, 0);
}

#[test]
fn renderer_honours_disabled_sorting() -> anyhow::Result<()> {
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let hud = add_mesh(&mut graph, root, Mesh::new(cube(), ui()), Vec3::ZERO);
    let wall = add_mesh(&mut graph, root, Mesh::new(cube(), opaque()), Vec3::ZERO);
    let mut renderer = Renderer::new();
    renderer.settings_mut().sort = false;
    let mut backend = CollectingBackend::default();

    renderer.render(&mut graph, root, None, &mut backend)?;
    let order: Vec<NodeId> = backend.items.iter().map(|item| item.0).collect();
    assert_eq!(order, vec![hud, wall]);

    renderer.settings_mut().sort = true;
    renderer.render(&mut graph, root, None, &mut backend)?;
    let order: Vec<NodeId> = backend.items.iter().map(|item| item.0).collect();
    assert_eq!(order, vec![wall, hud]);
    Ok(())
}

/// Writes every draw into a log shared with mesh hooks.
struct SharedLogBackend {
    log: Arc<Mutex<Vec<String>>>,
}

impl DrawBackend for SharedLogBackend {
    fn begin_frame(
        &mut self,
        _settings: &RenderSettings,
        _view: Option<&ViewInfo>,
    ) -> Result<(), DrawError> {
        Ok(())
    }

    fn draw(&mut self, item: &DrawItem<'_>) -> Result<(), DrawError> {
        self.log.lock().unwrap().push(format!("draw {}", item.node));
        Ok(())
    }
}

fn logged_mesh(log: &Arc<Mutex<Vec<String>>>, label: &'static str) -> Mesh {
    let (before, after) = (log.clone(), log.clone());
    Mesh::new(cube(), opaque())
        .on_before_render(move |mesh, camera| {
            assert!(camera.is_some());
            // Draw matrices are already written when the hook runs.
            assert!(mesh.model_view_matrix.get_translation().z < 0.0);
            before.lock().unwrap().push(format!("before {label}"));
        })
        .on_after_render(move |_, _| after.lock().unwrap().push(format!("after {label}")))
}

#[test]
fn render_hooks_wrap_the_draw_of_listed_meshes_only() -> anyhow::Result<()> {
    init_logger();
    // --- 1. ARRANGE ---
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new());
    let shown = add_mesh(
        &mut graph,
        root,
        logged_mesh(&log, "shown"),
        Vec3::new(0.0, 0.0, -5.0),
    );
    add_mesh(
        &mut graph,
        root,
        logged_mesh(&log, "culled"),
        Vec3::new(0.0, 0.0, 10.0),
    );
    let mut camera = Camera::default();
    let mut backend = SharedLogBackend { log: log.clone() };

    // --- 2. ACT ---
    let stats = Renderer::new().render(&mut graph, root, Some(&mut camera), &mut backend)?;

    // --- 3. ASSERT ---
    assert_eq!(stats.culled, 1);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "before shown".to_string(),
            format!("draw {shown}"),
            "after shown".to_string(),
        ]
    );
    Ok(())
}
