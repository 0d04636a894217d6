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

// Lumen Sandbox
// Builds a small scene and prints the draw calls of a few frames.
//
// Usage: sandbox [settings.json]

use std::sync::Arc;

use anyhow::{Context, Result};
use lumen_core::math::{Color, Vec2, Vec3};
use lumen_core::renderer::{
    Attribute, CullFace, DrawBackend, DrawError, DrawItem, Geometry, Program, RenderSettings,
    ViewInfo, POSITION_ATTRIBUTE,
};
use lumen_lanes::Renderer;
use lumen_scene::{intersect_meshes, Camera, CameraOptions, Mesh, Node, SceneGraph};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
}

const CUBE_CORNERS: &[Vertex] = &[
    Vertex { position: [-0.5, -0.5, -0.5] },
    Vertex { position: [0.5, -0.5, -0.5] },
    Vertex { position: [0.5, 0.5, -0.5] },
    Vertex { position: [-0.5, 0.5, -0.5] },
    Vertex { position: [-0.5, -0.5, 0.5] },
    Vertex { position: [0.5, -0.5, 0.5] },
    Vertex { position: [0.5, 0.5, 0.5] },
    Vertex { position: [-0.5, 0.5, 0.5] },
];

const FRAMES: usize = 3;

/// A backend that only logs what it would draw.
struct LoggingBackend {
    background: Color,
    frame: usize,
}

impl DrawBackend for LoggingBackend {
    fn begin_frame(
        &mut self,
        settings: &RenderSettings,
        view: Option<&ViewInfo>,
    ) -> Result<(), DrawError> {
        self.frame += 1;
        if settings.clear {
            log::info!("Frame {}: clear to {:?}", self.frame, self.background.to_array());
        }
        if let Some(view) = view {
            let mut origin = Vec3::ZERO;
            origin.apply_matrix4(&view.view_projection_matrix());
            log::info!(
                "Frame {}: camera at {:?}, scene origin at ndc ({:.2}, {:.2})",
                self.frame,
                view.camera_position,
                origin.x,
                origin.y
            );
        }
        Ok(())
    }

    fn draw(&mut self, item: &DrawItem<'_>) -> Result<(), DrawError> {
        let position = item.world_matrix.get_translation();
        log::info!(
            "  draw node {} mesh {:?} program {:?} {:?} cull {:?}{} at ({:.2}, {:.2}, {:.2})",
            item.node,
            item.mesh,
            item.program.id,
            item.mode,
            item.program.cull_face,
            if item.program.depth_write { "" } else { " no-depth-write" },
            position.x,
            position.y,
            position.z
        );
        Ok(())
    }
}

fn load_settings() -> Result<RenderSettings> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(RenderSettings::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read settings from '{path}'"))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings from '{path}'"))?;
    log::info!("Loaded render settings from '{path}'");
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = load_settings()?;
    let background: Color = "#1a1a2e".parse()?;

    let cube = Arc::new(Geometry::new().with_attribute(
        POSITION_ATTRIBUTE,
        Attribute::new(3, bytemuck::cast_slice::<Vertex, f32>(CUBE_CORNERS).to_vec()),
    ));
    let solid = Arc::new(Program::new());
    let glass = Arc::new(Program::new().with_transparent(true).with_depth_write(false));
    let overlay = Arc::new(
        Program::new()
            .with_transparent(true)
            .with_depth_test(false)
            .with_cull_face(CullFace::None),
    );

    // --- Scene ---
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new().with_name("root"));
    let pivot = graph.insert(Node::new().with_name("pivot"));
    graph.add_child(root, pivot)?;

    for (i, x) in [-2.0, 0.0, 2.0].into_iter().enumerate() {
        let program = if i == 1 { glass.clone() } else { solid.clone() };
        let node = graph.insert(
            Node::new()
                .with_name(format!("cube-{i}"))
                .with_position(Vec3::new(x, 0.0, -(i as f32)))
                .with_mesh(Mesh::new(cube.clone(), program)),
        );
        graph.add_child(pivot, node)?;
    }

    let behind = graph.insert(
        Node::new()
            .with_name("behind")
            .with_position(Vec3::new(0.0, 0.0, 20.0))
            .with_mesh(Mesh::new(cube.clone(), solid.clone())),
    );
    graph.add_child(root, behind)?;

    let hud = graph.insert(
        Node::new()
            .with_name("hud")
            .with_mesh(
                Mesh::new(cube.clone(), overlay)
                    .with_render_order(1)
                    .on_before_render(|_, _| log::debug!("  hud: before draw"))
                    .on_after_render(|_, _| log::debug!("  hud: after draw")),
            ),
    );
    graph.add_child(root, hud)?;

    let mut camera = Camera::new(CameraOptions {
        fov: 60.0,
        ..CameraOptions::default()
    });
    camera.set_aspect_ratio(1280, 720);
    camera.transform.position = Vec3::new(0.0, 2.0, 8.0);
    camera.look_at(Vec3::ZERO);

    // --- Frames ---
    let mut renderer = Renderer::with_settings(settings);
    let mut backend = LoggingBackend {
        background,
        frame: 0,
    };

    for _ in 0..FRAMES {
        if let Some(node) = graph.get_mut(pivot) {
            node.transform.quaternion.rotate_y(0.25);
        }
        let stats = renderer.render(&mut graph, root, Some(&mut camera), &mut backend)?;
        log::info!(
            "Drew {} meshes, culled {}",
            stats.drawn,
            stats.culled
        );

        let ray = camera.cast_ray(Vec2::ZERO);
        let nodes: Vec<_> = graph.iter().map(|(id, _)| id).collect();
        match intersect_meshes(&graph, &ray, nodes, Some(camera.far)).first() {
            Some(hit) => log::info!(
                "Center of view hits node {} at distance {:.2}",
                hit.node,
                hit.distance
            ),
            None => log::info!("Center of view hits nothing"),
        }
    }

    Ok(())
}
