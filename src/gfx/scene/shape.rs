//! # Shape Descriptors
//!
//! A scene node's mesh comes from a [`MeshSource`]. The built-in [`Shape`]
//! enum covers every primitive the geometry builders provide, plus text-only
//! and composite models; applications can implement [`MeshSource`] for their
//! own models.

use crate::config::{DEFAULT_SEGMENTS, TRI_FRAME_SPHERE_RADIUS, TRI_FRAME_TUBE_RADIUS};
use crate::error::VisualResult;
use crate::gfx::geometry::lines::polyline;
use crate::gfx::geometry::{
    colour, CircleOutlineParams, Colour, ConeParams, DashPattern, FlatLineParams, LineParams,
    PolygonParams, RhomboParams, RingParams, SphereParams, TubeParams, VertexBuffers,
};
use crate::gfx::text::TextFeatures;
use cgmath::{Vector3, Zero};
use rand::RngCore;

/// A label a mesh source wants attached when its node is finalized
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRequest {
    pub text: String,
    pub offset: Vector3<f32>,
    pub features: TextFeatures,
}

/// Produces the vertices of a scene node.
///
/// `build` appends to `buffers`, which the node has already cleared. Random
/// numbers must come from `rng` so the node can make rebuilds reproducible.
pub trait MeshSource {
    /// Append this model's geometry
    fn build(&self, buffers: &mut VertexBuffers, rng: &mut dyn RngCore) -> VisualResult<()>;

    /// Labels to attach on first build
    fn labels(&self) -> Vec<LabelRequest> {
        Vec::new()
    }

    /// Short name for logging
    fn kind(&self) -> &'static str;
}

/// Triangle outline: spheres at each corner joined by tubes, closed
#[derive(Debug, Clone, PartialEq)]
pub struct TriFrameParams {
    pub corners: Vec<Vector3<f32>>,
    pub sphere_colour: Colour,
    pub frame_colour: Colour,
    pub tube_radius: f32,
    pub sphere_radius: f32,
    pub segments: u32,
}

impl Default for TriFrameParams {
    fn default() -> Self {
        Self {
            corners: Vec::new(),
            sphere_colour: colour::GREY30,
            frame_colour: colour::GREY30,
            tube_radius: TRI_FRAME_TUBE_RADIUS,
            sphere_radius: TRI_FRAME_SPHERE_RADIUS,
            segments: DEFAULT_SEGMENTS,
        }
    }
}

/// Built-in model descriptors
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Triangle {
        corners: [Vector3<f32>; 3],
        colour: Colour,
    },
    Quad {
        corners: [Vector3<f32>; 4],
        colour: Colour,
    },
    Polygon(PolygonParams),
    Tube(TubeParams),
    Sphere(SphereParams),
    Cone(ConeParams),
    /// Thick octagonal line
    Line(LineParams),
    FlatLine(FlatLineParams),
    RoundedLine {
        line: FlatLineParams,
        start_cap: bool,
        end_cap: bool,
    },
    /// Flat line through every point, mitred at the joints
    Polyline {
        points: Vec<Vector3<f32>>,
        up: Vector3<f32>,
        colour: Colour,
        width: f32,
    },
    DashedLine {
        line: FlatLineParams,
        pattern: DashPattern,
    },
    CircleOutline(CircleOutlineParams),
    Ring(RingParams),
    Rhombohedron(RhomboParams),
    TriFrame(TriFrameParams),
    /// No mesh; a single label at the node's origin
    Text {
        text: String,
        features: TextFeatures,
    },
    Composite(Vec<Shape>),
}

impl Shape {
    /// Text-only model with default formatting
    pub fn text(text: impl Into<String>) -> Self {
        Shape::Text {
            text: text.into(),
            features: TextFeatures::default(),
        }
    }
}

impl MeshSource for Shape {
    fn build(&self, buffers: &mut VertexBuffers, rng: &mut dyn RngCore) -> VisualResult<()> {
        match self {
            Shape::Triangle { corners, colour } => {
                buffers.triangle(corners[0], corners[1], corners[2], *colour);
            }
            Shape::Quad { corners, colour } => {
                buffers.flat_quad(corners[0], corners[1], corners[2], corners[3], *colour);
            }
            Shape::Polygon(p) => {
                buffers.polygon(p)?;
            }
            Shape::Tube(p) => {
                buffers.tube(p, &mut *rng)?;
            }
            Shape::Sphere(p) => {
                buffers.sphere(p)?;
            }
            Shape::Cone(p) => {
                buffers.cone(p, &mut *rng)?;
            }
            Shape::Line(p) => {
                buffers.line(p);
            }
            Shape::FlatLine(p) => {
                buffers.flat_line(p);
            }
            Shape::RoundedLine {
                line,
                start_cap,
                end_cap,
            } => {
                buffers.flat_line_rounded(line, *start_cap, *end_cap);
            }
            Shape::Polyline {
                points,
                up,
                colour,
                width,
            } => {
                polyline(buffers, points, *up, *colour, *width);
            }
            Shape::DashedLine { line, pattern } => {
                buffers.flat_dashed_line(line, pattern)?;
            }
            Shape::CircleOutline(p) => {
                buffers.flat_circle_outline(p, &mut *rng)?;
            }
            Shape::Ring(p) => {
                buffers.ring(p)?;
            }
            Shape::Rhombohedron(p) => {
                buffers.rhombohedron(p);
            }
            Shape::TriFrame(p) => build_tri_frame(buffers, p, rng)?,
            Shape::Text { .. } => {}
            Shape::Composite(parts) => {
                for part in parts {
                    part.build(buffers, &mut *rng)?;
                }
            }
        }
        Ok(())
    }

    fn labels(&self) -> Vec<LabelRequest> {
        match self {
            Shape::Text { text, features } => vec![LabelRequest {
                text: text.clone(),
                offset: Vector3::zero(),
                features: *features,
            }],
            Shape::Composite(parts) => parts.iter().flat_map(|p| p.labels()).collect(),
            _ => Vec::new(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Shape::Triangle { .. } => "triangle",
            Shape::Quad { .. } => "quad",
            Shape::Polygon(_) => "polygon",
            Shape::Tube(_) => "tube",
            Shape::Sphere(_) => "sphere",
            Shape::Cone(_) => "cone",
            Shape::Line(_) => "line",
            Shape::FlatLine(_) => "flat line",
            Shape::RoundedLine { .. } => "rounded line",
            Shape::Polyline { .. } => "polyline",
            Shape::DashedLine { .. } => "dashed line",
            Shape::CircleOutline(_) => "circle outline",
            Shape::Ring(_) => "ring",
            Shape::Rhombohedron(_) => "rhombohedron",
            Shape::TriFrame(_) => "tri frame",
            Shape::Text { .. } => "text",
            Shape::Composite(_) => "composite",
        }
    }
}

fn build_tri_frame(
    buffers: &mut VertexBuffers,
    params: &TriFrameParams,
    rng: &mut dyn RngCore,
) -> VisualResult<()> {
    let n = params.corners.len();
    for &centre in &params.corners {
        let sphere = SphereParams {
            centre,
            colour: params.sphere_colour,
            radius: params.sphere_radius,
            segments: params.segments,
            ..SphereParams::default()
        };
        buffers.sphere(&sphere)?;
    }
    for i in 0..n {
        let tube = TubeParams {
            start: params.corners[i],
            end: params.corners[(i + 1) % n],
            colour_start: params.frame_colour,
            colour_end: params.frame_colour,
            radius: params.tube_radius,
            segments: params.segments,
            ..TubeParams::default()
        };
        buffers.tube(&tube, &mut *rng)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(shape: &Shape) -> VertexBuffers {
        let mut buffers = VertexBuffers::new();
        let mut rng = StdRng::seed_from_u64(0);
        shape.build(&mut buffers, &mut rng).unwrap();
        buffers
    }

    #[test]
    fn test_composite_chains_indices() {
        let shape = Shape::Composite(vec![
            Shape::Tube(TubeParams::default()),
            Shape::Sphere(SphereParams::default()),
            Shape::Ring(RingParams::default()),
        ]);
        let buffers = build(&shape);
        assert_eq!(buffers.vertex_count(), 50 + 110 + 48);
        buffers.validate().unwrap();
        assert!(buffers
            .indices()
            .iter()
            .all(|&i| (i as usize) < buffers.vertex_count()));
    }

    #[test]
    fn test_text_shape_has_no_mesh() {
        let shape = Shape::text("hello");
        assert!(build(&shape).is_empty());
        let labels = shape.labels();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text, "hello");
        assert_eq!(labels[0].offset, Vector3::zero());
    }

    #[test]
    fn test_tri_frame() {
        let shape = Shape::TriFrame(TriFrameParams {
            corners: vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            ..TriFrameParams::default()
        });
        let buffers = build(&shape);
        assert_eq!(buffers.vertex_count(), 3 * 110 + 3 * 50);
    }

    #[test]
    fn test_errors_propagate_from_parts() {
        let shape = Shape::Composite(vec![Shape::Cone(ConeParams {
            segments: 1,
            ..ConeParams::default()
        })]);
        let mut buffers = VertexBuffers::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(shape.build(&mut buffers, &mut rng).is_err());
    }

    #[test]
    fn test_composite_collects_labels() {
        let shape = Shape::Composite(vec![
            Shape::text("a"),
            Shape::Sphere(SphereParams::default()),
            Shape::text("b"),
        ]);
        let texts: Vec<String> = shape.labels().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Shape::Tube(TubeParams::default()).kind(), "tube");
        assert_eq!(Shape::text("x").kind(), "text");
    }
}
