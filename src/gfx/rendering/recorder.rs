//! A [`RenderBackend`] that records every call instead of drawing.
//!
//! Used by headless tools and by tests that assert on the exact sequence
//! of program switches, uniforms and draws a scene produces.

use super::{MatrixUniform, MeshHandle, ProgramId, RenderBackend};
use crate::error::{VisualError, VisualResult};
use crate::gfx::geometry::{Colour, VertexBuffers};
use crate::gfx::text::TextFeatures;
use crate::gfx::transform::matrix_to_array;
use cgmath::Matrix4;
use std::collections::HashMap;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Upload {
        mesh: MeshHandle,
        vertices: usize,
        indices: usize,
    },
    Release(MeshHandle),
    UseProgram(ProgramId),
    SetAlpha(f32),
    SetMatrix(MatrixUniform, [[f32; 4]; 4]),
    DrawTriangles {
        mesh: MeshHandle,
        index_count: u32,
    },
    DrawText {
        text: String,
        colour: Colour,
    },
}

/// Backend that keeps a log of commands and tracks live meshes
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<RenderCommand>,
    program: ProgramId,
    next_handle: u64,
    /// Live meshes and the index count they were uploaded with
    live: HashMap<MeshHandle, usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `program` already in use, as if set by outer code
    pub fn with_program(program: ProgramId) -> Self {
        Self {
            program,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drain the command log, keeping live meshes
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of meshes uploaded and not yet released
    pub fn live_meshes(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, mesh: MeshHandle) -> bool {
        self.live.contains_key(&mesh)
    }

    /// Number of triangle draws recorded
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawTriangles { .. }))
            .count()
    }

    /// Strings drawn by text draws, in order
    pub fn drawn_text(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_mesh(
        &mut self,
        buffers: &VertexBuffers,
        previous: Option<MeshHandle>,
    ) -> VisualResult<MeshHandle> {
        buffers.validate()?;
        let mesh = match previous {
            Some(handle) if self.live.contains_key(&handle) => handle,
            _ => {
                self.next_handle += 1;
                MeshHandle(self.next_handle)
            }
        };
        self.live.insert(mesh, buffers.index_count());
        self.commands.push(RenderCommand::Upload {
            mesh,
            vertices: buffers.vertex_count(),
            indices: buffers.index_count(),
        });
        Ok(mesh)
    }

    fn release_mesh(&mut self, mesh: MeshHandle) {
        if self.live.remove(&mesh).is_some() {
            self.commands.push(RenderCommand::Release(mesh));
        } else {
            log::warn!("Release of unknown mesh {:?} ignored", mesh);
        }
    }

    fn current_program(&self) -> ProgramId {
        self.program
    }

    fn use_program(&mut self, program: ProgramId) {
        self.program = program;
        self.commands.push(RenderCommand::UseProgram(program));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(RenderCommand::SetAlpha(alpha));
    }

    fn set_matrix(&mut self, uniform: MatrixUniform, matrix: &Matrix4<f32>) {
        self.commands
            .push(RenderCommand::SetMatrix(uniform, matrix_to_array(matrix)));
    }

    fn draw_triangles(&mut self, mesh: MeshHandle, index_count: u32) -> VisualResult<()> {
        match self.live.get(&mesh) {
            Some(&uploaded) if index_count as usize <= uploaded => {
                self.commands
                    .push(RenderCommand::DrawTriangles { mesh, index_count });
                Ok(())
            }
            Some(&uploaded) => Err(VisualError::Backend(format!(
                "draw of {} indices exceeds the {} uploaded for {:?}",
                index_count, uploaded, mesh
            ))),
            None => Err(VisualError::Backend(format!(
                "draw of unknown mesh {:?}",
                mesh
            ))),
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        _features: &TextFeatures,
        colour: Colour,
    ) -> VisualResult<()> {
        self.commands.push(RenderCommand::DrawText {
            text: text.to_string(),
            colour,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::colour;
    use cgmath::Vector3;

    fn one_triangle() -> VertexBuffers {
        let mut buffers = VertexBuffers::new();
        buffers.triangle(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            colour::RED,
        );
        buffers
    }

    #[test]
    fn test_upload_reuses_live_handle() {
        let mut backend = RecordingBackend::new();
        let buffers = one_triangle();
        let first = backend.upload_mesh(&buffers, None).unwrap();
        let second = backend.upload_mesh(&buffers, Some(first)).unwrap();
        assert_eq!(first, second);
        assert_eq!(backend.live_meshes(), 1);
    }

    #[test]
    fn test_release_frees_mesh() {
        let mut backend = RecordingBackend::new();
        let mesh = backend.upload_mesh(&one_triangle(), None).unwrap();
        backend.release_mesh(mesh);
        assert_eq!(backend.live_meshes(), 0);
        assert!(backend.draw_triangles(mesh, 3).is_err());
    }

    #[test]
    fn test_draw_beyond_upload_fails() {
        let mut backend = RecordingBackend::new();
        let mesh = backend.upload_mesh(&one_triangle(), None).unwrap();
        assert!(backend.draw_triangles(mesh, 3).is_ok());
        assert!(backend.draw_triangles(mesh, 6).is_err());
        assert_eq!(backend.draw_count(), 1);
    }

    #[test]
    fn test_use_program_tracks_current() {
        let mut backend = RecordingBackend::with_program(ProgramId(9));
        assert_eq!(backend.current_program(), ProgramId(9));
        backend.use_program(ProgramId(2));
        assert_eq!(backend.current_program(), ProgramId(2));
        assert_eq!(backend.take_commands(), vec![RenderCommand::UseProgram(ProgramId(2))]);
        assert!(backend.commands().is_empty());
    }
}
