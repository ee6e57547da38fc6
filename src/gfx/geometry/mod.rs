//! # Procedural Geometry Generation
//!
//! This module generates the vertex, normal, colour and index buffers for
//! parametric 3D primitives. Every builder appends to a [`VertexBuffers`]
//! and returns the vertex index its first vertex was written at, so repeated
//! calls chain into one mesh without index collisions.
//!
//! ## Supported Primitives
//!
//! - **Flat**: triangle, quad, polygon fan, ring band, circle outline
//! - **Closed**: tube (random or oriented cross-section), sphere, cone,
//!   rhombohedron
//! - **Lines**: thick octagonal line, flat line, rounded, joined and dashed
//!   flat lines
//!
//! ## Usage
//!
//! ```rust
//! use scenemesh::gfx::geometry::{SphereParams, TubeParams, VertexBuffers};
//! use cgmath::Vector3;
//!
//! let mut buffers = VertexBuffers::new();
//! let mut rng = rand::rng();
//!
//! let tube = TubeParams {
//!     end: Vector3::new(0.0, 0.0, 2.0),
//!     radius: 0.1,
//!     ..TubeParams::default()
//! };
//! buffers.tube(&tube, &mut rng).unwrap();
//! let sphere_base = buffers
//!     .sphere(&SphereParams { radius: 0.2, ..SphereParams::default() })
//!     .unwrap();
//!
//! assert_eq!(sphere_base, 50);
//! assert_eq!(buffers.index_count() % 3, 0);
//! ```

pub mod basis;
pub mod export;
pub mod lines;
pub mod primitives;
pub mod shapes;

pub use basis::{random_basis, renormalize};
pub use export::{translation_json, BufferBounds, ComponentBounds};
pub use shapes::*;

use crate::config::MIN_SEGMENTS;
use crate::error::{VisualError, VisualResult};
use cgmath::Vector3;

/// RGB colour with components in `[0, 1]`
pub type Colour = [f32; 3];

/// Named colours used as defaults
pub mod colour {
    use super::Colour;

    pub const BLACK: Colour = [0.0, 0.0, 0.0];
    pub const WHITE: Colour = [1.0, 1.0, 1.0];
    pub const GREY30: Colour = [0.3, 0.3, 0.3];
    pub const RED: Colour = [1.0, 0.0, 0.0];
    pub const GREEN: Colour = [0.0, 1.0, 0.0];
    pub const BLUE: Colour = [0.0, 0.0, 1.0];
}

/// Parallel position, normal and colour buffers plus a triangle index list.
///
/// Positions, normals and colours are flat sequences of 3-float groups kept
/// the same length. The vertex cursor is the index the next pushed vertex
/// will receive; it only moves forward until [`clear`](Self::clear).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffers {
    /// Vertex positions (x, y, z)
    positions: Vec<f32>,
    /// Unit normals (x, y, z)
    normals: Vec<f32>,
    /// Vertex colours (r, g, b)
    colours: Vec<f32>,
    /// Triangle indices
    indices: Vec<u32>,
    /// Next unused vertex index
    cursor: u32,
}

impl VertexBuffers {
    /// Create an empty buffer set
    pub fn new() -> Self {
        Self::default()
    }

    /// The index the next vertex will be written at
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Get the number of vertices in these buffers
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get the number of triangles in these buffers
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.indices.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn colours(&self) -> &[f32] {
        &self.colours
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Append one vertex and return the index it was assigned
    pub fn push_vertex(
        &mut self,
        position: Vector3<f32>,
        normal: Vector3<f32>,
        colour: Colour,
    ) -> u32 {
        self.positions.extend_from_slice(&[position.x, position.y, position.z]);
        self.normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
        self.colours.extend_from_slice(&colour);
        let index = self.cursor;
        self.cursor += 1;
        index
    }

    /// Append one triangle by vertex index
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Pre-allocate room for `n` more vertices and about two triangles each
    pub fn reserve_vertices(&mut self, n: usize) {
        self.positions.reserve(3 * n);
        self.normals.reserve(3 * n);
        self.colours.reserve(3 * n);
        self.indices.reserve(6 * n);
    }

    /// Drop every vertex and index and reset the cursor to zero
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.colours.clear();
        self.indices.clear();
        self.cursor = 0;
    }

    /// Check the parallel-buffer and whole-triangle invariants
    pub fn validate(&self) -> VisualResult<()> {
        if self.positions.len() != self.normals.len()
            || self.positions.len() != self.colours.len()
        {
            return Err(VisualError::BufferSizeMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
                colours: self.colours.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(VisualError::RaggedIndices(self.indices.len()));
        }
        Ok(())
    }

    /// Triangle indices of a capped body: a centre vertex, `rings` rings of
    /// `segments` vertices, then a second centre vertex, starting at `base`.
    ///
    /// Emits a fan at each end and two triangles per segment between each
    /// pair of consecutive rings. The last segment of every ring wraps back to
    /// that ring's first vertex.
    pub(crate) fn push_capped_body_indices(&mut self, base: u32, rings: u32, segments: u32) {
        let first_ring = base + 1;
        for j in 0..segments {
            let jn = (j + 1) % segments;
            self.push_triangle(base, first_ring + j, first_ring + jn);
        }

        for l in 0..rings - 1 {
            let near = first_ring + l * segments;
            let far = near + segments;
            for j in 0..segments {
                let jn = (j + 1) % segments;
                self.push_triangle(near + j, near + jn, far + j);
                self.push_triangle(far + j, far + jn, near + jn);
            }
        }

        let last_ring = first_ring + (rings - 1) * segments;
        let end_middle = last_ring + segments;
        for j in 0..segments {
            let jn = (j + 1) % segments;
            self.push_triangle(end_middle, last_ring + j, last_ring + jn);
        }
    }
}

/// Reject tessellations too coarse to close a shape
pub(crate) fn require_segments(shape: &'static str, segments: u32) -> VisualResult<()> {
    if segments < MIN_SEGMENTS {
        return Err(VisualError::TooFewSegments { shape, segments });
    }
    Ok(())
}
