// src/gfx/rendering/mod.rs
//! Render backend contract
//!
//! Scene nodes never talk to a graphics API directly. They hand their
//! buffers and uniforms to a [`RenderBackend`], and look up shader programs
//! in the [`RenderContext`] they were constructed with.

pub mod recorder;

pub use recorder::{RecordingBackend, RenderCommand};

use crate::error::VisualResult;
use crate::gfx::geometry::{Colour, VertexBuffers};
use crate::gfx::text::{FixedAdvanceLayout, TextFeatures, TextLayout};
use cgmath::Matrix4;
use std::sync::Arc;

/// Handle of a linked shader program; 0 means "none"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProgramId(pub u32);

impl ProgramId {
    pub const NONE: ProgramId = ProgramId(0);

    pub fn is_set(&self) -> bool {
        self.0 != 0
    }
}

/// Handle of a mesh uploaded to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// The two matrix uniforms every model shader takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixUniform {
    /// `v_matrix`: placement of the model within the scene
    Scene,
    /// `m_matrix`: model scaling applied to the model's view matrix
    Model,
}

impl MatrixUniform {
    /// Name of the uniform in the shader source
    pub fn name(&self) -> &'static str {
        match self {
            MatrixUniform::Scene => "v_matrix",
            MatrixUniform::Model => "m_matrix",
        }
    }
}

/// Shader programs shared by every node in a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShaderPrograms {
    /// Program for triangle meshes
    pub graphics: ProgramId,
    /// Program for text; labels cannot be created while this is unset
    pub text: ProgramId,
}

/// Read-only context handed to every scene node at construction.
///
/// Created once at program start, after the backend has linked its shader
/// programs, and cloned cheaply into each node.
#[derive(Clone)]
pub struct RenderContext {
    pub programs: ShaderPrograms,
    pub text_layout: Arc<dyn TextLayout>,
}

impl RenderContext {
    pub fn new(programs: ShaderPrograms, text_layout: Arc<dyn TextLayout>) -> Self {
        Self {
            programs,
            text_layout,
        }
    }

    /// Context without a text program; useful for mesh-only scenes
    pub fn without_text(graphics: ProgramId) -> Self {
        Self::new(
            ShaderPrograms {
                graphics,
                text: ProgramId::NONE,
            },
            Arc::new(FixedAdvanceLayout::default()),
        )
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("programs", &self.programs)
            .finish_non_exhaustive()
    }
}

/// Graphics API operations needed to present scene nodes.
///
/// # Lifecycle
///
/// 1. `upload_mesh` is called on a node's first render and again after any
///    rebuild, passing the previous handle so the backend can reuse it
/// 2. Each frame, the node saves `current_program`, selects its own, sets
///    uniforms and draws, then restores the saved program
/// 3. `release_mesh` is called when the node is removed from its scene
pub trait RenderBackend {
    /// Upload (or re-upload) a mesh and return its handle
    fn upload_mesh(
        &mut self,
        buffers: &VertexBuffers,
        previous: Option<MeshHandle>,
    ) -> VisualResult<MeshHandle>;

    /// Free a mesh's backend resources
    fn release_mesh(&mut self, mesh: MeshHandle);

    /// The program currently in use
    fn current_program(&self) -> ProgramId;

    fn use_program(&mut self, program: ProgramId);

    /// Set the `alpha` uniform of the current program
    fn set_alpha(&mut self, alpha: f32);

    /// Set a matrix uniform of the current program
    fn set_matrix(&mut self, uniform: MatrixUniform, matrix: &Matrix4<f32>);

    /// Draw `index_count` indices of a mesh as a triangle list
    fn draw_triangles(&mut self, mesh: MeshHandle, index_count: u32) -> VisualResult<()>;

    /// Draw a string with the current text program
    fn draw_text(&mut self, text: &str, features: &TextFeatures, colour: Colour)
        -> VisualResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_id_unset_by_default() {
        assert!(!ProgramId::default().is_set());
        assert!(ProgramId(3).is_set());
    }

    #[test]
    fn test_uniform_names() {
        assert_eq!(MatrixUniform::Scene.name(), "v_matrix");
        assert_eq!(MatrixUniform::Model.name(), "m_matrix");
    }

    #[test]
    fn test_context_without_text() {
        let ctx = RenderContext::without_text(ProgramId(1));
        assert!(ctx.programs.graphics.is_set());
        assert!(!ctx.programs.text.is_set());
    }
}
