//! # Scenemesh Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ```rust
//! use scenemesh::prelude::*;
//!
//! let ctx = RenderContext::without_text(ProgramId(1));
//! let mut node = SceneNode::new(
//!     Shape::Tube(TubeParams::default()),
//!     Vector3::zero(),
//!     &ctx,
//! )
//! .with_seed(7);
//! node.finalize().unwrap();
//! assert_eq!(node.buffers().vertex_count(), 50);
//! ```

// Re-export errors
pub use crate::error::{VisualError, VisualResult};

// Re-export geometry types
pub use crate::gfx::geometry::{
    colour, CircleOutlineParams, Colour, ConeParams, DashPattern, FlatLineParams, LineParams,
    Orientation, PolygonParams, RhomboParams, RingParams, SphereParams, TubeParams,
    VertexBuffers,
};

// Re-export scene types
pub use crate::gfx::scene::{MeshSource, Scene, SceneNode, Shape, TriFrameParams};

// Re-export text and rendering types
pub use crate::gfx::rendering::{
    ProgramId, RecordingBackend, RenderBackend, RenderContext, ShaderPrograms,
};
pub use crate::gfx::text::{TextFeatures, TextGeometry, TextLayout};
pub use crate::gfx::transform::Placement;

// Re-export common external dependencies
pub use cgmath::{Deg, InnerSpace, Quaternion, Rotation, Rotation3, Vector3, Zero};
