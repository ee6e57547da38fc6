//! # Vertex Data Structures
//!
//! Interleaved vertex format for backends that prefer one vertex buffer over
//! the three parallel arrays a [`VertexBuffers`] keeps.

use crate::error::VisualResult;
use crate::gfx::geometry::VertexBuffers;

/// A vertex with position, normal and colour.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute gives a stable 36-byte layout, so a slice of
/// vertices can be cast to bytes with [`bytemuck::cast_slice`].
///
/// # Examples
///
/// ```
/// use scenemesh::gfx::scene::vertex::ColouredVertex;
///
/// let vertex = ColouredVertex {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
///     colour: [1.0, 0.0, 0.0],
/// };
/// let bytes: &[u8] = bytemuck::bytes_of(&vertex);
/// assert_eq!(bytes.len(), ColouredVertex::STRIDE);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColouredVertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Unit normal [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// RGB colour in `[0, 1]`
    pub colour: [f32; 3],
}

impl ColouredVertex {
    /// Size of one vertex in bytes
    pub const STRIDE: usize = std::mem::size_of::<ColouredVertex>();

    /// Byte offsets of position, normal and colour within a vertex
    pub const OFFSETS: [usize; 3] = [0, 12, 24];
}

impl VertexBuffers {
    /// Zip the parallel arrays into interleaved vertices
    pub fn interleaved(&self) -> VisualResult<Vec<ColouredVertex>> {
        self.validate()?;
        let vertices = self
            .positions()
            .chunks_exact(3)
            .zip(self.normals().chunks_exact(3))
            .zip(self.colours().chunks_exact(3))
            .map(|((p, n), c)| ColouredVertex {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
                colour: [c[0], c[1], c[2]],
            })
            .collect();
        Ok(vertices)
    }
}
