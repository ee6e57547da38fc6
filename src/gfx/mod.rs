//! # Graphics Module
//!
//! Everything needed to turn shape parameters into drawable scene nodes.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - parametric tessellation into vertex buffers
//! - **Scene** ([`scene`]) - scene nodes, shapes and the owning scene
//! - **Text** ([`text`]) - label formatting, measurement and placement
//! - **Rendering** ([`rendering`]) - the backend contract and a recording backend
//! - **Transforms** ([`transform`]) - offset and rotation composed into matrices
//!
//! A scene node never calls a graphics API itself. It hands its buffers and
//! uniforms to whatever [`RenderBackend`] the application supplies.

pub mod geometry;
pub mod rendering;
pub mod scene;
pub mod text;
pub mod transform;

// Re-export commonly used types
pub use geometry::VertexBuffers;
pub use rendering::{RenderBackend, RenderContext};
pub use scene::{Scene, SceneNode};
pub use transform::Placement;
