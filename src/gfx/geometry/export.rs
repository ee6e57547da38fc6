//! # Export Accessors
//!
//! Read-only views of a [`VertexBuffers`] for scene exporters: element
//! counts, byte lengths, per-component extents for bounding boxes and
//! little-endian byte images of each buffer.
//!
//! ## Encoding
//!
//! - Indices: each `u32` as 4 little-endian bytes
//! - Positions, normals, colours: each `f32` as its 4-byte IEEE-754
//!   little-endian representation
//!
//! Encoding the bytes for transport (base64 or otherwise) is left to the
//! exporter.

use super::VertexBuffers;
use crate::error::VisualResult;
use std::mem::size_of;

/// Per-component minimum and maximum of a 3-float buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentBounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl ComponentBounds {
    /// Bounds of an empty buffer: min at `f32::MAX`, max at `f32::MIN`
    fn empty() -> Self {
        Self {
            min: [f32::MAX; 3],
            max: [f32::MIN; 3],
        }
    }

    fn of(values: &[f32]) -> Self {
        let mut bounds = Self::empty();
        for triple in values.chunks_exact(3) {
            for k in 0..3 {
                bounds.min[k] = bounds.min[k].min(triple[k]);
                bounds.max[k] = bounds.max[k].max(triple[k]);
            }
        }
        bounds
    }
}

/// Extents of every buffer in a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferBounds {
    /// Smallest index, `u32::MAX` when there are no indices
    pub index_min: u32,
    /// Largest index, 0 when there are no indices
    pub index_max: u32,
    pub positions: ComponentBounds,
    pub colours: ComponentBounds,
    pub normals: ComponentBounds,
}

impl VertexBuffers {
    /// Compute the extents of all buffers.
    ///
    /// Fails if the position, normal and colour buffers are out of step.
    pub fn bounds(&self) -> VisualResult<BufferBounds> {
        self.validate()?;
        let (index_min, index_max) = self
            .indices()
            .iter()
            .fold((u32::MAX, 0), |(lo, hi), &i| (lo.min(i), hi.max(i)));
        Ok(BufferBounds {
            index_min,
            index_max,
            positions: ComponentBounds::of(self.positions()),
            colours: ComponentBounds::of(self.colours()),
            normals: ComponentBounds::of(self.normals()),
        })
    }

    pub fn index_byte_len(&self) -> usize {
        self.indices().len() * size_of::<u32>()
    }

    pub fn position_byte_len(&self) -> usize {
        self.positions().len() * size_of::<f32>()
    }

    pub fn normal_byte_len(&self) -> usize {
        self.normals().len() * size_of::<f32>()
    }

    pub fn colour_byte_len(&self) -> usize {
        self.colours().len() * size_of::<f32>()
    }

    /// Indices as little-endian `u32` bytes
    pub fn index_bytes(&self) -> Vec<u8> {
        if cfg!(target_endian = "little") {
            bytemuck::cast_slice(self.indices()).to_vec()
        } else {
            self.indices().iter().flat_map(|i| i.to_le_bytes()).collect()
        }
    }

    /// Positions as little-endian `f32` bytes
    pub fn position_bytes(&self) -> Vec<u8> {
        f32_le_bytes(self.positions())
    }

    /// Normals as little-endian `f32` bytes
    pub fn normal_bytes(&self) -> Vec<u8> {
        f32_le_bytes(self.normals())
    }

    /// Colours as little-endian `f32` bytes
    pub fn colour_bytes(&self) -> Vec<u8> {
        f32_le_bytes(self.colours())
    }
}

fn f32_le_bytes(values: &[f32]) -> Vec<u8> {
    if cfg!(target_endian = "little") {
        bytemuck::cast_slice(values).to_vec()
    } else {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }
}

/// Format a translation as a JSON array, e.g. `[1,0,-2.5]`
pub fn translation_json(offset: cgmath::Vector3<f32>) -> String {
    format!("[{},{},{}]", offset.x, offset.y, offset.z)
}
