// src/lib.rs
//! Scenemesh
//!
//! Procedural mesh generation and scene nodes for 3D visualisation: tubes,
//! spheres, cones, lines, rings and text labels, drawn through a pluggable
//! render backend.

pub mod config;
pub mod error;
pub mod gfx;
pub mod prelude;

// Re-export main types for convenience
pub use error::{VisualError, VisualResult};
pub use gfx::scene::{Scene, SceneNode, Shape};
