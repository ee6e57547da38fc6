//! Text label owned by a scene node.

use super::{TextFeatures, TextGeometry, TextLayout};
use crate::error::VisualResult;
use crate::gfx::geometry::Colour;
use crate::gfx::rendering::{MatrixUniform, ProgramId, RenderBackend};
use crate::gfx::transform::Placement;
use cgmath::{Matrix4, Quaternion, Vector3, Zero};

/// A string drawn at an offset from its parent node.
///
/// The label keeps its own view and scene placements. Its view translation
/// is the parent's view offset plus the label's anchor, so the effective
/// model-frame position is `parent offset + anchor`.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    features: TextFeatures,
    geometry: TextGeometry,
    /// Offset relative to the parent after centring
    anchor: Vector3<f32>,
    colour: Colour,
    view: Placement,
    scene: Placement,
}

impl Label {
    /// Create and measure a label; it sits at the origin until [`set_up`](Self::set_up)
    pub fn new(text: impl Into<String>, features: TextFeatures, layout: &dyn TextLayout) -> Self {
        let text = text.into();
        let geometry = layout.measure(&text, &features);
        Self {
            text,
            colour: features.colour,
            features,
            geometry,
            anchor: Vector3::zero(),
            view: Placement::identity(),
            scene: Placement::identity(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn features(&self) -> &TextFeatures {
        &self.features
    }

    /// Measured extent, available before and after placement
    pub fn geometry(&self) -> TextGeometry {
        self.geometry
    }

    /// Offset from the parent's view offset, after centring
    pub fn anchor(&self) -> Vector3<f32> {
        self.anchor
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// The offset actually used for a requested anchor.
    ///
    /// With horizontal centring the x component becomes `-half_width`
    /// whatever the caller asked for.
    pub fn centred_anchor(&self, requested: Vector3<f32>) -> Vector3<f32> {
        if self.features.centre_horizontal {
            Vector3::new(-self.geometry.half_width(), requested.y, requested.z)
        } else {
            requested
        }
    }

    /// Fix the label's position from its anchor and the parent's view offset
    pub fn set_up(&mut self, anchor: Vector3<f32>, parent_offset: Vector3<f32>, colour: Colour) {
        self.anchor = anchor;
        self.colour = colour;
        self.view.set_translation(parent_offset + anchor);
    }

    /// Replace the string and re-measure it, keeping the label's position.
    ///
    /// A centred label is re-centred on its anchor for the new width.
    pub fn set_text(&mut self, text: impl Into<String>, layout: &dyn TextLayout) -> TextGeometry {
        self.text = text.into();
        self.geometry = layout.measure(&self.text, &self.features);
        let parent_offset = self.view.offset() - self.anchor;
        let anchor = self.centred_anchor(self.anchor);
        self.set_up(anchor, parent_offset, self.colour);
        self.geometry
    }

    /// Model-frame position: parent offset plus anchor
    pub fn effective_offset(&self) -> Vector3<f32> {
        self.view.offset()
    }

    pub fn view(&self) -> &Placement {
        &self.view
    }

    pub fn scene(&self) -> &Placement {
        &self.scene
    }

    pub fn set_view_translation(&mut self, v: Vector3<f32>) {
        self.view.set_translation(v);
    }

    pub fn set_view_rotation(&mut self, r: Quaternion<f32>) {
        self.view.set_rotation(r);
    }

    pub fn add_view_rotation(&mut self, r: Quaternion<f32>) {
        self.view.add_rotation(r);
    }

    /// Adopt a parent's scene placement wholesale
    pub fn set_scene_placement(&mut self, placement: Placement) {
        self.scene = placement;
    }

    pub fn set_scene_matrix(&mut self, m: Matrix4<f32>) {
        self.scene.set_matrix(m);
    }

    pub fn set_scene_translation(&mut self, v: Vector3<f32>) {
        self.scene.set_translation(v);
    }

    pub fn add_scene_translation(&mut self, v: Vector3<f32>) {
        self.scene.add_translation(v);
    }

    pub fn set_scene_rotation(&mut self, r: Quaternion<f32>) {
        self.scene.set_rotation(r);
    }

    /// Draw with the text program; the caller restores the previous program
    pub fn render(
        &self,
        backend: &mut dyn RenderBackend,
        text_program: ProgramId,
        alpha: f32,
    ) -> VisualResult<()> {
        backend.use_program(text_program);
        backend.set_alpha(alpha);
        backend.set_matrix(MatrixUniform::Scene, &self.scene.matrix());
        backend.set_matrix(MatrixUniform::Model, &self.view.matrix());
        backend.draw_text(&self.text, &self.features, self.colour)
    }
}
