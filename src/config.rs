//! Centralized tessellation and presentation defaults
//!
//! All magic numbers used by the geometry builders, scene nodes and text
//! layout live here. Every `Default` impl in the crate reads from these
//! constants.

/// Smallest segment count accepted by closed primitives
pub const MIN_SEGMENTS: u32 = 3;

/// Default number of segments around tubes, cones, spheres and rings
pub const DEFAULT_SEGMENTS: u32 = 12;

/// Default number of latitude bands on a sphere
pub const DEFAULT_RINGS: u32 = 10;

/// Default radius for tubes, cones, spheres and rings
pub const DEFAULT_RADIUS: f32 = 1.0;

/// Default radial thickness of a ring band
pub const DEFAULT_RING_THICKNESS: f32 = 0.1;

/// Default width of thick and flat lines
pub const DEFAULT_LINE_WIDTH: f32 = 0.1;

/// Default depth of a thick line's cross-section
pub const DEFAULT_LINE_THICKNESS: f32 = 0.01;

/// Number of vertices around a thick line's octagonal cross-section
pub const THICK_LINE_SEGMENTS: u32 = 8;

/// Default dash length for dashed lines
pub const DEFAULT_DASH_LENGTH: f32 = 0.1;

/// Default gap between dashes as a proportion of the dash length
pub const DEFAULT_DASH_GAP: f32 = 0.3;

/// Default segment count for flat circle outlines
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 128;

/// Segments in the half-disc end caps of rounded flat lines
pub const ROUND_CAP_SEGMENTS: u32 = 12;

/// Step used by alpha increment and decrement
pub const ALPHA_STEP: f32 = 0.1;

/// Default label font size in model units
pub const DEFAULT_FONT_SIZE: f32 = 0.05;

/// Default glyph rasterisation resolution in pixels
pub const DEFAULT_FONT_RES: u32 = 24;

/// Radius of the tubes in a triangle frame
pub const TRI_FRAME_TUBE_RADIUS: f32 = 0.05;

/// Radius of the corner spheres in a triangle frame
pub const TRI_FRAME_SPHERE_RADIUS: f32 = 0.052;

/// Metrics used by [`FixedAdvanceLayout`](crate::gfx::text::FixedAdvanceLayout)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal advance per character as a fraction of the font size
    pub advance: f32,
    /// Height above the baseline as a fraction of the font size
    pub ascent: f32,
    /// Depth below the baseline as a fraction of the font size
    pub descent: f32,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            ascent: 0.8,
            descent: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        assert!(DEFAULT_SEGMENTS >= MIN_SEGMENTS);
        assert!(THICK_LINE_SEGMENTS >= MIN_SEGMENTS);
        assert!(DEFAULT_RINGS >= 2);
        assert!(ALPHA_STEP > 0.0 && ALPHA_STEP < 1.0);
    }

    #[test]
    fn test_glyph_metrics_default() {
        let metrics = GlyphMetrics::default();
        assert!(metrics.advance > 0.0);
        assert!((metrics.ascent + metrics.descent - 1.0).abs() < 1e-6);
    }
}
