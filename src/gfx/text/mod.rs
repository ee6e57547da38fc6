//! # Text Labels
//!
//! Text attached to scene nodes. Glyph rasterisation belongs to the render
//! backend; this module only needs a [`TextLayout`] that measures a string
//! so labels can be centred and callers can lay out neighbouring elements.
//!
//! ## Key Components
//!
//! - [`TextFeatures`] - font, size, resolution, colour and centring options
//! - [`TextGeometry`] - measured extent of a laid-out string
//! - [`TextLayout`] - measuring capability supplied by the render context
//! - [`Label`] - a text child owned by exactly one scene node

pub mod label;

pub use label::Label;

use crate::config::{GlyphMetrics, DEFAULT_FONT_RES, DEFAULT_FONT_SIZE};
use crate::gfx::geometry::{colour, Colour};

/// Fonts available to labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Font {
    #[default]
    DejaVuSans,
    DejaVuSansItalic,
    DejaVuSansBold,
    DejaVuSansBoldItalic,
    DejaVuSansMono,
}

/// Formatting options for a label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFeatures {
    /// Height of a capital letter in model units
    pub font_size: f32,
    /// Glyph rasterisation resolution in pixels
    pub font_res: u32,
    /// Centre the text horizontally on its anchor
    pub centre_horizontal: bool,
    pub colour: Colour,
    pub font: Font,
}

impl TextFeatures {
    /// Default features at a given font size
    pub fn with_size(font_size: f32) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    /// Builder-style toggle for horizontal centring
    pub fn centred(mut self) -> Self {
        self.centre_horizontal = true;
        self
    }
}

impl Default for TextFeatures {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_res: DEFAULT_FONT_RES,
            centre_horizontal: false,
            colour: colour::BLACK,
            font: Font::DejaVuSans,
        }
    }
}

/// Measured extent of a string
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextGeometry {
    /// Width of the whole string
    pub total_width: f32,
    /// Largest distance any glyph rises above the baseline
    pub max_bearing_y: f32,
    /// Largest distance any glyph drops below the baseline
    pub max_drop: f32,
}

impl TextGeometry {
    pub fn half_width(&self) -> f32 {
        self.total_width * 0.5
    }

    pub fn height(&self) -> f32 {
        self.max_bearing_y + self.max_drop
    }

    pub fn half_height(&self) -> f32 {
        self.height() * 0.5
    }
}

/// Measures strings for label placement.
///
/// Implementations typically wrap the render backend's font atlas. The
/// measurement must be available before the label is first drawn.
pub trait TextLayout: Send + Sync {
    /// Measure `text` as it would be drawn with `features`
    fn measure(&self, text: &str, features: &TextFeatures) -> TextGeometry;
}

/// Layout that gives every character the same advance.
///
/// Useful for headless use and tests, and as a fallback when no font atlas
/// is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAdvanceLayout {
    pub metrics: GlyphMetrics,
}

impl FixedAdvanceLayout {
    pub fn new(metrics: GlyphMetrics) -> Self {
        Self { metrics }
    }
}

impl TextLayout for FixedAdvanceLayout {
    fn measure(&self, text: &str, features: &TextFeatures) -> TextGeometry {
        let chars = text.chars().count() as f32;
        let has_descender = text.chars().any(|c| matches!(c, 'g' | 'j' | 'p' | 'q' | 'y'));
        TextGeometry {
            total_width: chars * self.metrics.advance * features.font_size,
            max_bearing_y: if text.is_empty() {
                0.0
            } else {
                self.metrics.ascent * features.font_size
            },
            max_drop: if has_descender {
                self.metrics.descent * features.font_size
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_features_default() {
        let tf = TextFeatures::default();
        assert_eq!(tf.font_size, 0.05);
        assert_eq!(tf.font_res, 24);
        assert!(!tf.centre_horizontal);
        assert_eq!(tf.colour, colour::BLACK);
        assert_eq!(tf.font, Font::DejaVuSans);
    }

    #[test]
    fn test_fixed_advance_measure() {
        let layout = FixedAdvanceLayout::default();
        let geom = layout.measure("abcd", &TextFeatures::with_size(1.0));
        assert!((geom.total_width - 2.4).abs() < 1e-6);
        assert!((geom.half_width() - 1.2).abs() < 1e-6);
        assert_eq!(geom.max_drop, 0.0);

        let geom = layout.measure("gap", &TextFeatures::with_size(1.0));
        assert!((geom.height() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_string_has_no_extent() {
        let layout = FixedAdvanceLayout::default();
        let geom = layout.measure("", &TextFeatures::default());
        assert_eq!(geom, TextGeometry::default());
    }
}
