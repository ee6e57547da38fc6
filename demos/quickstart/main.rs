//! # Scenemesh Quickstart Example
//!
//! Builds a small labelled scene, rotates it and "renders" it through the
//! recording backend, printing what a real graphics backend would be asked
//! to do.
//!
//! ## What this example shows:
//! - How to create a render context and a scene
//! - How to add tubes, spheres, cones and lines as scene nodes
//! - How to attach centred labels that stay upright under rotation
//! - How to release backend resources when done
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example quickstart
//! ```

use std::sync::Arc;

use anyhow::Context;
use scenemesh::gfx::rendering::RenderCommand;
use scenemesh::gfx::text::FixedAdvanceLayout;
use scenemesh::prelude::*;

/// Axis arrow: a tube with a cone on its end
fn axis(direction: Vector3<f32>, colour: Colour) -> Shape {
    Shape::Composite(vec![
        Shape::Tube(TubeParams {
            end: direction * 0.8,
            colour_start: colour,
            colour_end: colour,
            radius: 0.02,
            ..TubeParams::default()
        }),
        Shape::Cone(ConeParams {
            centre: direction * 0.8,
            tip: direction,
            colour,
            radius: 0.05,
            ..ConeParams::default()
        }),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let context = RenderContext::new(
        ShaderPrograms {
            graphics: ProgramId(1),
            text: ProgramId(2),
        },
        Arc::new(FixedAdvanceLayout::default()),
    );
    let mut scene = Scene::new(context.clone());

    // Axes with a label at each tip
    let axes = [
        ("x", Vector3::unit_x(), colour::RED),
        ("y", Vector3::unit_y(), colour::GREEN),
        ("z", Vector3::unit_z(), colour::BLUE),
    ];
    for (name, direction, colour) in axes {
        let mut node = SceneNode::new(axis(direction, colour), Vector3::zero(), &context)
            .with_name(format!("{} axis", name));
        node.finalize()?;
        node.add_label(name, direction * 1.1, TextFeatures::default().centred())
            .with_context(|| format!("labelling {} axis", name))?;
        scene.add_node(node)?;
    }

    // A translucent sphere at the origin
    let mut sphere = SceneNode::new(
        Shape::Sphere(SphereParams {
            radius: 0.3,
            pole_colour: Some(colour::WHITE),
            ..SphereParams::default()
        }),
        Vector3::zero(),
        &context,
    );
    sphere.set_alpha(0.5);
    scene.add_node(sphere)?;

    // A dashed line under the scene
    let dashed = SceneNode::new(
        Shape::DashedLine {
            line: FlatLineParams {
                start: Vector3::new(-1.0, -1.0, 0.0),
                end: Vector3::new(1.0, -1.0, 0.0),
                ..FlatLineParams::default()
            },
            pattern: DashPattern::default(),
        },
        Vector3::zero(),
        &context,
    );
    scene.add_node(dashed)?;

    // Tilt everything, keeping the axis labels readable
    let tilt = Quaternion::from_angle_x(Deg(-30.0));
    for index in 0..scene.get_node_count() {
        if let Some(node) = scene.get_node_mut(index) {
            node.set_view_rotation_fix_texts(tilt);
        }
    }

    let mut backend = RecordingBackend::new();
    scene.render(&mut backend)?;

    let stats = scene.get_statistics();
    println!(
        "{} nodes, {} labels, {} triangles, {} vertices",
        stats.node_count, stats.label_count, stats.total_triangles, stats.total_vertices
    );
    for command in backend.commands() {
        match command {
            RenderCommand::Upload {
                mesh,
                vertices,
                indices,
            } => println!("upload {:?}: {} vertices, {} indices", mesh, vertices, indices),
            RenderCommand::DrawTriangles { mesh, index_count } => {
                println!("draw {:?}: {} indices", mesh, index_count)
            }
            RenderCommand::DrawText { text, .. } => println!("text '{}'", text),
            _ => {}
        }
    }

    scene.clear(&mut backend);
    Ok(())
}
