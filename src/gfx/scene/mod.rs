//! # Scene Management Module
//!
//! Scene nodes, the shapes they are built from, and the scene that owns
//! them.
//!
//! ## Key Components
//!
//! - [`Scene`] - owns nodes, binds each to itself once, renders them all
//! - [`SceneNode`] - one mesh with its placements, opacity and labels
//! - [`Shape`] / [`MeshSource`] - what a node's mesh is built from
//! - [`ColouredVertex`] - interleaved vertex format
//!
//! ## Usage
//!
//! ```rust
//! use scenemesh::gfx::geometry::SphereParams;
//! use scenemesh::gfx::rendering::{ProgramId, RecordingBackend, RenderContext};
//! use scenemesh::gfx::scene::{Scene, SceneNode, Shape};
//! use cgmath::Vector3;
//!
//! let mut scene = Scene::new(RenderContext::without_text(ProgramId(1)));
//! let node = SceneNode::new(
//!     Shape::Sphere(SphereParams::default()),
//!     Vector3::new(0.0, 0.0, 1.0),
//!     scene.context(),
//! );
//! scene.add_node(node).unwrap();
//!
//! let mut backend = RecordingBackend::new();
//! scene.render(&mut backend).unwrap();
//! assert_eq!(backend.draw_count(), 1);
//! scene.clear(&mut backend);
//! ```

pub mod node;
pub mod scene;
pub mod shape;
pub mod vertex;

// Re-export main types
pub use node::SceneNode;
pub use scene::{Scene, SceneId, SceneStatistics};
pub use shape::{LabelRequest, MeshSource, Shape, TriFrameParams};
pub use vertex::ColouredVertex;
