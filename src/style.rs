//! Styling for rendered guide lines and the margin box

use crate::constants::{DEFAULT_GUIDE_WIDTH, DEFAULT_MARGIN_BOX_WIDTH};

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values should be 0.0-1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Gray color
    pub fn gray(level: f32) -> Self {
        let l = level.clamp(0.0, 1.0);
        Self::rgb(l, l, l)
    }

    /// The cyan commonly used for on-screen guides
    pub fn guide_cyan() -> Self {
        Self::rgb(0.0, 0.6, 0.8)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// How guide lines and the margin box are stroked on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideStyle {
    pub guide_color: Color,
    /// Stroke width of guide lines in points
    pub guide_width: f64,
    pub margin_color: Color,
    /// Stroke width of the margin box in points
    pub margin_width: f64,
    /// Whether to stroke the margin box around the live area
    pub draw_margin_box: bool,
}

impl GuideStyle {
    /// Hairline guides with no margin box
    pub fn guides_only() -> Self {
        Self {
            draw_margin_box: false,
            ..Self::default()
        }
    }

    /// Set the guide color
    pub fn with_guide_color(mut self, color: Color) -> Self {
        self.guide_color = color;
        self
    }

    /// Set the margin box color
    pub fn with_margin_color(mut self, color: Color) -> Self {
        self.margin_color = color;
        self
    }
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            guide_color: Color::guide_cyan(),
            guide_width: DEFAULT_GUIDE_WIDTH,
            margin_color: Color::black(),
            margin_width: DEFAULT_MARGIN_BOX_WIDTH,
            draw_margin_box: true,
        }
    }
}
