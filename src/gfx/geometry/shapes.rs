//! # Shape Parameters
//!
//! Parameter structs for every geometry builder. Each implements `Default`
//! using the values in [`crate::config`], so callers only spell out what
//! differs:
//!
//! ```rust
//! use scenemesh::gfx::geometry::ConeParams;
//! use cgmath::Vector3;
//!
//! let cone = ConeParams {
//!     tip: Vector3::new(0.0, 0.0, 0.5),
//!     radius: 0.1,
//!     ..ConeParams::default()
//! };
//! assert_eq!(cone.segments, 12);
//! ```

use super::{colour, Colour};
use crate::config::*;
use cgmath::{Vector3, Zero};

/// How the circular cross-section of a tube is oriented about its axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Orientation {
    /// Derive a perpendicular basis from a random seed vector
    #[default]
    Random,
    /// Use the supplied perpendicular axes, rotated by `rotation` radians
    Fixed {
        ux: Vector3<f32>,
        uy: Vector3<f32>,
        rotation: f32,
    },
}

/// Flat polygon fan about a centre point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonParams {
    pub centre: Vector3<f32>,
    /// First in-plane axis
    pub ux: Vector3<f32>,
    /// Second in-plane axis
    pub uy: Vector3<f32>,
    pub colour: Colour,
    pub radius: f32,
    pub segments: u32,
    /// Phase offset of the first perimeter point, in radians
    pub rotation: f32,
}

impl Default for PolygonParams {
    fn default() -> Self {
        Self {
            centre: Vector3::zero(),
            ux: Vector3::unit_x(),
            uy: Vector3::unit_y(),
            colour: colour::WHITE,
            radius: DEFAULT_RADIUS,
            segments: DEFAULT_SEGMENTS,
            rotation: 0.0,
        }
    }
}

/// Capped cylinder between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeParams {
    pub start: Vector3<f32>,
    pub end: Vector3<f32>,
    /// Colour of the start cap and start collar
    pub colour_start: Colour,
    /// Colour of the end collar and end cap
    pub colour_end: Colour,
    pub radius: f32,
    pub segments: u32,
    pub orientation: Orientation,
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            start: Vector3::zero(),
            end: Vector3::unit_z(),
            colour_start: colour::WHITE,
            colour_end: colour::WHITE,
            radius: DEFAULT_RADIUS,
            segments: DEFAULT_SEGMENTS,
            orientation: Orientation::Random,
        }
    }
}

/// UV sphere, optionally with a second colour on the poles and outer bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub centre: Vector3<f32>,
    pub colour: Colour,
    /// Colour for the poles and the bands nearest them
    pub pole_colour: Option<Colour>,
    pub radius: f32,
    /// Number of latitude bands between the poles
    pub rings: u32,
    pub segments: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            centre: Vector3::zero(),
            colour: colour::WHITE,
            pole_colour: None,
            radius: DEFAULT_RADIUS,
            rings: DEFAULT_RINGS,
            segments: DEFAULT_SEGMENTS,
        }
    }
}

/// Cone from a base centre to a tip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeParams {
    pub centre: Vector3<f32>,
    pub tip: Vector3<f32>,
    /// Slides the base ring along the axis, as a proportion of `tip - centre`
    pub ring_offset: f32,
    pub colour: Colour,
    pub radius: f32,
    pub segments: u32,
}

impl Default for ConeParams {
    fn default() -> Self {
        Self {
            centre: Vector3::zero(),
            tip: Vector3::unit_z(),
            ring_offset: 0.0,
            colour: colour::WHITE,
            radius: DEFAULT_RADIUS,
            segments: DEFAULT_SEGMENTS,
        }
    }
}

/// Flat band in the XY plane made of one quad per segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingParams {
    pub centre: Vector3<f32>,
    pub colour: Colour,
    /// Radius of the band's midline
    pub radius: f32,
    /// Radial width of the band
    pub thickness: f32,
    pub segments: u32,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            centre: Vector3::zero(),
            colour: colour::WHITE,
            radius: DEFAULT_RADIUS,
            thickness: DEFAULT_RING_THICKNESS,
            segments: DEFAULT_SEGMENTS,
        }
    }
}

/// Parallelepiped spanned by three edge vectors from an origin corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhomboParams {
    pub origin: Vector3<f32>,
    pub edges: [Vector3<f32>; 3],
    pub colour: Colour,
}

impl Default for RhomboParams {
    fn default() -> Self {
        Self {
            origin: Vector3::zero(),
            edges: [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()],
            colour: colour::WHITE,
        }
    }
}

/// Thick line with an octagonal cross-section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParams {
    pub start: Vector3<f32>,
    pub end: Vector3<f32>,
    /// Direction the line's flat face points towards
    pub up: Vector3<f32>,
    pub colour_start: Colour,
    pub colour_end: Colour,
    pub width: f32,
    pub thickness: f32,
    /// Distance to pull each end in along the line
    pub shorten: f32,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            start: Vector3::zero(),
            end: Vector3::unit_x(),
            up: Vector3::unit_z(),
            colour_start: colour::BLACK,
            colour_end: colour::BLACK,
            width: DEFAULT_LINE_WIDTH,
            thickness: DEFAULT_LINE_THICKNESS,
            shorten: 0.0,
        }
    }
}

/// Flat line lying in the plane perpendicular to `up`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatLineParams {
    pub start: Vector3<f32>,
    pub end: Vector3<f32>,
    /// Normal of the plane the line lies in
    pub up: Vector3<f32>,
    pub colour: Colour,
    pub width: f32,
    /// Distance to pull each end in along the line
    pub shorten: f32,
}

impl Default for FlatLineParams {
    fn default() -> Self {
        Self {
            start: Vector3::zero(),
            end: Vector3::unit_x(),
            up: Vector3::unit_z(),
            colour: colour::BLACK,
            width: DEFAULT_LINE_WIDTH,
            shorten: 0.0,
        }
    }
}

/// Dash pattern for dashed flat lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dash_length: f32,
    /// Gap between dashes as a proportion of `dash_length`
    pub gap_proportion: f32,
}

impl Default for DashPattern {
    fn default() -> Self {
        Self {
            dash_length: DEFAULT_DASH_LENGTH,
            gap_proportion: DEFAULT_DASH_GAP,
        }
    }
}

/// Annulus drawn as a closed flat band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleOutlineParams {
    pub centre: Vector3<f32>,
    /// Normal of the circle's plane
    pub normal: Vector3<f32>,
    pub radius: f32,
    pub line_width: f32,
    pub colour: Colour,
    pub segments: u32,
}

impl Default for CircleOutlineParams {
    fn default() -> Self {
        Self {
            centre: Vector3::zero(),
            normal: Vector3::unit_z(),
            radius: DEFAULT_RADIUS,
            line_width: DEFAULT_LINE_WIDTH,
            colour: colour::BLACK,
            segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}
