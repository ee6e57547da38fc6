//! # Error Types
//!
//! Errors raised while building meshes, attaching labels and rendering scene
//! nodes. Every failure is returned synchronously to the immediate caller.
//!
//! ## Error Policy
//!
//! - Configuration errors (missing text shader, parent bound twice) are fatal
//!   for the requested operation and are never retried.
//! - Buffer invariant violations are detected before export and reported with
//!   the offending sizes.
//! - A failed build leaves the node's buffers partially written; callers
//!   clear and rebuild.

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while generating or presenting visual models.
///
/// ## Example
///
/// ```rust
/// use scenemesh::error::VisualError;
/// use scenemesh::gfx::geometry::{TubeParams, VertexBuffers};
///
/// let mut buffers = VertexBuffers::new();
/// let tube = TubeParams { segments: 2, ..TubeParams::default() };
/// let mut rng = rand::rng();
/// match buffers.tube(&tube, &mut rng) {
///     Err(VisualError::TooFewSegments { shape, segments }) => {
///         assert_eq!(shape, "tube");
///         assert_eq!(segments, 2);
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisualError {
    /// A label was requested before a text shader program was configured.
    #[error("No text shader program configured; cannot add label {text:?}")]
    NoTextShader {
        /// The label text that could not be attached
        text: String,
    },

    /// The owning scene of a node may be bound exactly once.
    #[error("Scene node already belongs to scene {existing}; set the parent once only")]
    ParentAlreadySet {
        /// Id of the scene the node is already bound to
        existing: u32,
    },

    /// Position, normal and colour buffers hold different element counts.
    #[error(
        "Vertex buffers out of step: {positions} positions, {normals} normals, {colours} colours"
    )]
    BufferSizeMismatch {
        /// Number of floats in the position buffer
        positions: usize,
        /// Number of floats in the normal buffer
        normals: usize,
        /// Number of floats in the colour buffer
        colours: usize,
    },

    /// The index buffer does not describe whole triangles.
    #[error("Index buffer length {0} is not a multiple of 3")]
    RaggedIndices(usize),

    /// Closed primitives need at least three segments.
    #[error("{shape} needs at least 3 segments, got {segments}")]
    TooFewSegments {
        /// Name of the primitive being tessellated
        shape: &'static str,
        /// The rejected segment count
        segments: u32,
    },

    /// Spheres need at least two latitude bands.
    #[error("sphere needs at least 2 rings, got {0}")]
    TooFewRings(u32),

    /// Dash and gap do not advance along the line.
    #[error(
        "dash pattern does not advance: dash length {dash_length}, gap proportion {gap_proportion}"
    )]
    InvalidDashPattern {
        dash_length: f32,
        gap_proportion: f32,
    },

    /// A build would need more vertices than a `u32` index can address.
    #[error("{shape} needs {vertices} vertices, beyond the index range")]
    TooManyVertices {
        shape: &'static str,
        vertices: u64,
    },

    /// The render backend refused an operation.
    #[error("Render backend error: {0}")]
    Backend(String),
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for visual model operations.
pub type VisualResult<T> = Result<T, VisualError>;

// =============================================================================
// TESTS
// =============================================================================
