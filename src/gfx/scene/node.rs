//! # Scene Nodes
//!
//! A [`SceneNode`] owns one model's mesh buffers, its placement, its
//! opacity and visibility, and the text labels attached to it.
//!
//! ## Lifecycle
//!
//! 1. **Construction** - [`SceneNode::new`] takes a [`MeshSource`], a model
//!    offset and the scene's [`RenderContext`]. No geometry exists yet.
//! 2. **Finalize** - [`finalize`](SceneNode::finalize) builds the mesh and
//!    attaches the source's own labels.
//! 3. **Render** - the first [`render`](SceneNode::render) after any build
//!    uploads the buffers, then every call draws the mesh and its labels.
//! 4. **Rebuild** - [`rebuild`](SceneNode::rebuild) re-tessellates keeping
//!    labels; [`rebuild_clearing_labels`](SceneNode::rebuild_clearing_labels)
//!    drops them first.
//! 5. **Release** - the owning scene calls [`release`](SceneNode::release)
//!    to free backend resources before dropping the node.
//!
//! ## Transforms
//!
//! Each node has a *view* placement (its own model frame) and a *scene*
//! placement (where it sits in a larger scene). Both compose as
//! translation then rotation. Labels follow the node: scene changes are
//! copied to them, and view translations move them with the node's offset.
//! [`set_view_rotation_fix_texts`](SceneNode::set_view_rotation_fix_texts)
//! rotates labels' scene frames while counter-rotating their own view so
//! text stays upright.

use super::scene::SceneId;
use super::shape::MeshSource;
use crate::config::ALPHA_STEP;
use crate::error::{VisualError, VisualResult};
use crate::gfx::geometry::export::translation_json;
use crate::gfx::geometry::{BufferBounds, VertexBuffers};
use crate::gfx::rendering::{MatrixUniform, MeshHandle, RenderBackend, RenderContext};
use crate::gfx::text::{Label, TextFeatures, TextGeometry};
use crate::gfx::transform::{size_scale, Placement};
use cgmath::{Matrix4, Quaternion, Rotation, SquareMatrix, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A positionable mesh with attached labels
pub struct SceneNode {
    name: String,
    source: Box<dyn MeshSource>,
    buffers: VertexBuffers,
    view: Placement,
    scene: Placement,
    model_scaling: Matrix4<f32>,
    alpha: f32,
    hidden: bool,
    labels: Vec<Label>,
    context: RenderContext,
    parent: Option<SceneId>,
    mesh: Option<MeshHandle>,
    needs_upload: bool,
    finalized: bool,
    /// Seed for the random cross-section bases, fixed so rebuilds repeat
    seed: u64,
}

impl SceneNode {
    /// Create a node whose model frame is translated to `offset`
    pub fn new(
        source: impl MeshSource + 'static,
        offset: Vector3<f32>,
        context: &RenderContext,
    ) -> Self {
        Self {
            name: source.kind().to_string(),
            source: Box::new(source),
            buffers: VertexBuffers::new(),
            view: Placement::at(offset),
            scene: Placement::identity(),
            model_scaling: Matrix4::identity(),
            alpha: 1.0,
            hidden: false,
            labels: Vec::new(),
            context: context.clone(),
            parent: None,
            mesh: None,
            needs_upload: false,
            finalized: false,
            seed: rand::rng().random(),
        }
    }

    /// Use a fixed seed for randomly oriented cross-sections
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> &'static str {
        self.source.kind()
    }

    pub fn source(&self) -> &dyn MeshSource {
        self.source.as_ref()
    }

    /// Change the seed; takes effect at the next build
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
    }

    // =========================================================================
    // BUILDING
    // =========================================================================

    /// Build the mesh and attach the source's labels.
    ///
    /// Calling this again rebuilds the mesh without duplicating labels.
    pub fn finalize(&mut self) -> VisualResult<()> {
        self.build_vertices()?;
        if !self.finalized {
            for request in self.source.labels() {
                self.add_label(request.text, request.offset, request.features)?;
            }
            self.finalized = true;
        }
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Re-tessellate, keeping attached labels
    pub fn rebuild(&mut self) -> VisualResult<()> {
        self.build_vertices()
    }

    /// Drop labels, then re-tessellate
    pub fn rebuild_clearing_labels(&mut self) -> VisualResult<()> {
        self.labels.clear();
        self.build_vertices()
    }

    /// Empty the buffers and drop every label
    pub fn clear(&mut self) {
        self.buffers.clear();
        self.labels.clear();
        self.needs_upload = true;
    }

    pub fn clear_labels(&mut self) {
        self.labels.clear();
    }

    /// Pre-allocate buffer room for `n` vertices
    pub fn reserve_vertices(&mut self, n: usize) {
        self.buffers.reserve_vertices(n);
    }

    pub fn buffers(&self) -> &VertexBuffers {
        &self.buffers
    }

    /// Mutable access for appending extra geometry; schedules a re-upload
    pub fn buffers_mut(&mut self) -> &mut VertexBuffers {
        self.needs_upload = true;
        &mut self.buffers
    }

    /// Whether the backend copy of the mesh is stale
    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    fn build_vertices(&mut self) -> VisualResult<()> {
        self.buffers.clear();
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.source.build(&mut self.buffers, &mut rng)?;
        self.buffers.validate()?;
        self.needs_upload = true;
        log::debug!(
            "Built {} '{}': {} vertices, {} triangles",
            self.source.kind(),
            self.name,
            self.buffers.vertex_count(),
            self.buffers.triangle_count()
        );
        Ok(())
    }

    // =========================================================================
    // TRANSFORMS
    // =========================================================================

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view.matrix()
    }

    pub fn scene_matrix(&self) -> Matrix4<f32> {
        self.scene.matrix()
    }

    /// Model scaling applied to the view matrix
    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.model_scaling * self.view.matrix()
    }

    pub fn view(&self) -> &Placement {
        &self.view
    }

    pub fn scene(&self) -> &Placement {
        &self.scene
    }

    /// Model-frame offset
    pub fn offset(&self) -> Vector3<f32> {
        self.view.offset()
    }

    pub fn set_view_matrix(&mut self, m: Matrix4<f32>) {
        self.view.set_matrix(m);
    }

    pub fn set_view_translation(&mut self, v: Vector3<f32>) {
        self.view.set_translation(v);
        for label in &mut self.labels {
            label.set_view_translation(v + label.anchor());
        }
    }

    pub fn add_view_translation(&mut self, v: Vector3<f32>) {
        self.view.add_translation(v);
        let offset = self.view.offset();
        for label in &mut self.labels {
            label.set_view_translation(offset + label.anchor());
        }
    }

    /// Rotate the model frame; labels are left as they are
    pub fn set_view_rotation(&mut self, r: Quaternion<f32>) {
        self.view.set_rotation(r);
    }

    /// Rotate the model frame and keep labels upright.
    ///
    /// Each label's scene rotation becomes `r` and its own view rotation
    /// becomes the inverse of `r`.
    pub fn set_view_rotation_fix_texts(&mut self, r: Quaternion<f32>) {
        self.view.set_rotation(r);
        let inverse = r.invert();
        for label in &mut self.labels {
            label.set_scene_rotation(r);
            label.set_view_rotation(inverse);
        }
    }

    /// Apply `r` on top of the current view rotation, labels included
    pub fn add_view_rotation(&mut self, r: Quaternion<f32>) {
        self.view.add_rotation(r);
        for label in &mut self.labels {
            label.add_view_rotation(r);
        }
    }

    pub fn set_scene_matrix(&mut self, m: Matrix4<f32>) {
        self.scene.set_matrix(m);
        for label in &mut self.labels {
            label.set_scene_matrix(m);
        }
    }

    pub fn set_scene_translation(&mut self, v: Vector3<f32>) {
        self.scene.set_translation(v);
        for label in &mut self.labels {
            label.set_scene_translation(v);
        }
    }

    pub fn add_scene_translation(&mut self, v: Vector3<f32>) {
        self.scene.add_translation(v);
        for label in &mut self.labels {
            label.add_scene_translation(v);
        }
    }

    pub fn set_scene_rotation(&mut self, r: Quaternion<f32>) {
        self.scene.set_rotation(r);
    }

    pub fn add_scene_rotation(&mut self, r: Quaternion<f32>) {
        self.scene.add_rotation(r);
    }

    /// Scale the model uniformly
    pub fn set_size_scale(&mut self, scale: f32) {
        self.model_scaling = size_scale(scale, scale, scale);
    }

    /// Scale the model in x and y; z scale resets to 1
    pub fn set_size_scale_xy(&mut self, x: f32, y: f32) {
        self.model_scaling = size_scale(x, y, 1.0);
    }

    // =========================================================================
    // LABELS
    // =========================================================================

    /// Attach a label at `offset` from the model origin.
    ///
    /// With horizontal centring the offset's x is replaced by minus half the
    /// measured width. Returns the measured geometry.
    pub fn add_label(
        &mut self,
        text: impl Into<String>,
        offset: Vector3<f32>,
        features: TextFeatures,
    ) -> VisualResult<TextGeometry> {
        let text = text.into();
        if !self.context.programs.text.is_set() {
            return Err(VisualError::NoTextShader { text });
        }
        let mut label = Label::new(text, features, self.context.text_layout.as_ref());
        let anchor = label.centred_anchor(offset);
        label.set_up(anchor, self.view.offset(), features.colour);
        label.set_scene_placement(self.scene);

        let geometry = label.geometry();
        log::debug!(
            "Label '{}' on '{}' at {:?}, width {}",
            label.text(),
            self.name,
            anchor,
            geometry.total_width
        );
        self.labels.push(label);
        Ok(geometry)
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn label_mut(&mut self, index: usize) -> Option<&mut Label> {
        self.labels.get_mut(index)
    }

    /// Replace a label's text, re-measuring with the context's layout
    pub fn set_label_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Option<TextGeometry> {
        let layout = self.context.text_layout.clone();
        self.labels
            .get_mut(index)
            .map(|label| label.set_text(text, layout.as_ref()))
    }

    // =========================================================================
    // OPACITY AND VISIBILITY
    // =========================================================================

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Set opacity, clamped to `[0, 1]`
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn inc_alpha(&mut self) {
        self.set_alpha(self.alpha + ALPHA_STEP);
    }

    pub fn dec_alpha(&mut self) {
        self.set_alpha(self.alpha - ALPHA_STEP);
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn toggle_hidden(&mut self) {
        self.hidden = !self.hidden;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    // =========================================================================
    // SCENE MEMBERSHIP AND RENDERING
    // =========================================================================

    /// Bind the owning scene. A node belongs to one scene for life.
    pub fn set_parent(&mut self, scene: SceneId) -> VisualResult<()> {
        if let Some(existing) = self.parent {
            return Err(VisualError::ParentAlreadySet {
                existing: existing.0,
            });
        }
        self.parent = Some(scene);
        Ok(())
    }

    pub fn parent(&self) -> Option<SceneId> {
        self.parent
    }

    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// Draw the mesh and then each label.
    ///
    /// Hidden nodes draw nothing. The program active before the call is
    /// restored afterwards, even when a draw fails.
    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> VisualResult<()> {
        if self.hidden {
            return Ok(());
        }
        if self.needs_upload {
            if self.buffers.index_count() > 0 || self.mesh.is_some() {
                self.mesh = Some(backend.upload_mesh(&self.buffers, self.mesh)?);
            }
            self.needs_upload = false;
        }

        let previous = backend.current_program();
        backend.use_program(self.context.programs.graphics);
        let result = self.draw(backend);
        backend.use_program(previous);
        result
    }

    fn draw(&self, backend: &mut dyn RenderBackend) -> VisualResult<()> {
        if let (Some(mesh), false) = (self.mesh, self.buffers.indices().is_empty()) {
            backend.set_alpha(self.alpha);
            backend.set_matrix(MatrixUniform::Scene, &self.scene.matrix());
            backend.set_matrix(MatrixUniform::Model, &self.model_matrix());
            backend.draw_triangles(mesh, self.buffers.index_count() as u32)?;
        }
        for label in &self.labels {
            label.render(backend, self.context.programs.text, self.alpha)?;
        }
        Ok(())
    }

    /// Free backend resources; the next render uploads again
    pub fn release(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(mesh) = self.mesh.take() {
            backend.release_mesh(mesh);
            self.needs_upload = true;
        }
    }

    // =========================================================================
    // EXPORT
    // =========================================================================

    /// Model offset as a JSON array
    pub fn translation_json(&self) -> String {
        translation_json(self.view.offset())
    }

    /// Buffer extents for bounding-box computation
    pub fn bounds(&self) -> VisualResult<BufferBounds> {
        self.buffers.bounds()
    }
}

impl Drop for SceneNode {
    fn drop(&mut self) {
        if let Some(mesh) = self.mesh {
            log::warn!(
                "Scene node '{}' dropped while backend mesh {:?} is still live",
                self.name,
                mesh
            );
        }
    }
}

impl std::fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("kind", &self.source.kind())
            .field("vertices", &self.buffers.vertex_count())
            .field("labels", &self.labels.len())
            .field("alpha", &self.alpha)
            .field("hidden", &self.hidden)
            .field("parent", &self.parent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{SphereParams, TubeParams};
    use crate::gfx::rendering::{ProgramId, RecordingBackend, RenderCommand, ShaderPrograms};
    use crate::gfx::scene::shape::Shape;
    use crate::gfx::text::FixedAdvanceLayout;
    use cgmath::{Deg, Rotation3, Zero};
    use std::sync::Arc;

    fn context() -> RenderContext {
        RenderContext::new(
            ShaderPrograms {
                graphics: ProgramId(1),
                text: ProgramId(2),
            },
            Arc::new(FixedAdvanceLayout::default()),
        )
    }

    fn sphere_node() -> SceneNode {
        let mut node = SceneNode::new(
            Shape::Sphere(SphereParams::default()),
            Vector3::zero(),
            &context(),
        );
        node.finalize().unwrap();
        node
    }

    #[test]
    fn test_finalize_builds_mesh() {
        let node = sphere_node();
        assert_eq!(node.buffers().vertex_count(), 110);
        assert!(node.needs_upload());
        assert!(node.is_finalized());
    }

    #[test]
    fn test_rebuild_is_deterministic_with_seed() {
        let ctx = context();
        let mut node =
            SceneNode::new(Shape::Tube(TubeParams::default()), Vector3::zero(), &ctx).with_seed(5);
        node.finalize().unwrap();
        let first = node.buffers().clone();
        node.clear();
        node.rebuild().unwrap();
        assert_eq!(node.buffers(), &first);
    }

    #[test]
    fn test_alpha_steps_and_clamps() {
        let mut node = sphere_node();
        node.inc_alpha();
        assert_eq!(node.alpha(), 1.0);
        for _ in 0..3 {
            node.dec_alpha();
        }
        assert!((node.alpha() - 0.7).abs() < 1e-6);
        node.set_alpha(-2.0);
        assert_eq!(node.alpha(), 0.0);
    }

    #[test]
    fn test_hidden_node_draws_nothing() {
        let mut node = sphere_node();
        let mut backend = RecordingBackend::new();
        node.toggle_hidden();
        node.render(&mut backend).unwrap();
        assert!(backend.commands().is_empty());
        assert!(node.needs_upload());
    }

    #[test]
    fn test_render_restores_previous_program() {
        let mut node = sphere_node();
        let mut backend = RecordingBackend::with_program(ProgramId(7));
        node.render(&mut backend).unwrap();
        assert_eq!(backend.current_program(), ProgramId(7));
        assert_eq!(backend.draw_count(), 1);
        node.release(&mut backend);
    }

    #[test]
    fn test_render_uploads_once_until_rebuilt() {
        let mut node = sphere_node();
        let mut backend = RecordingBackend::new();
        node.render(&mut backend).unwrap();
        node.render(&mut backend).unwrap();
        let uploads = |b: &RecordingBackend| {
            b.commands()
                .iter()
                .filter(|c| matches!(c, RenderCommand::Upload { .. }))
                .count()
        };
        assert_eq!(uploads(&backend), 1);

        node.rebuild().unwrap();
        node.render(&mut backend).unwrap();
        assert_eq!(uploads(&backend), 2);
        assert_eq!(backend.live_meshes(), 1);
        node.release(&mut backend);
        assert_eq!(backend.live_meshes(), 0);
    }

    #[test]
    fn test_size_scale_feeds_model_matrix() {
        let mut node = sphere_node();
        node.set_size_scale(2.0);
        assert_eq!(node.model_matrix().x.x, 2.0);
        node.set_size_scale_xy(3.0, 4.0);
        let m = node.model_matrix();
        assert_eq!((m.x.x, m.y.y, m.z.z), (3.0, 4.0, 1.0));
    }

    #[test]
    fn test_set_parent_once() {
        let mut node = sphere_node();
        node.set_parent(SceneId(1)).unwrap();
        assert_eq!(
            node.set_parent(SceneId(2)),
            Err(VisualError::ParentAlreadySet { existing: 1 })
        );
        assert_eq!(node.parent(), Some(SceneId(1)));
    }

    #[test]
    fn test_scene_rotation_does_not_touch_labels() {
        let mut node = sphere_node();
        node.add_label("n", Vector3::zero(), TextFeatures::default())
            .unwrap();
        node.set_scene_rotation(Quaternion::from_angle_z(Deg(90.0)));
        assert_eq!(node.labels()[0].scene().rotation(), Quaternion::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_translation_json() {
        let node = SceneNode::new(
            Shape::text("t"),
            Vector3::new(1.0, 2.0, 3.0),
            &context(),
        );
        assert_eq!(node.translation_json(), "[1,2,3]");
    }
}
