//! Paint style records
//!
//! Styles are plain values handed to each [`Surface`](crate::surface::Surface)
//! call. Per-draw variations (tick alpha, hand width) are produced with the
//! `with_*` builders instead of mutating a shared style between draws.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ClockConfig;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composite this color with `alpha` over an opaque `background`.
    pub fn blend_over(self, alpha: u8, background: Color) -> Color {
        let mix = |fg: u8, bg: u8| -> u8 {
            let a = alpha as u16;
            ((fg as u16 * a + bg as u16 * (255 - a) + 127) / 255) as u8
        };
        Color::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.r, color.g, color.b)
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb888::from(color).into()
    }
}

impl From<Rgb565> for Color {
    fn from(color: Rgb565) -> Self {
        let rgb = Rgb888::from(color);
        Color::new(rgb.r(), rgb.g(), rgb.b())
    }
}

/// Shape of line ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    Butt,
    Round,
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Stroke style for straight lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub alpha: u8,
    pub stroke_width: f32,
    pub cap: StrokeCap,
    pub anti_alias: bool,
}

impl LineStyle {
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }

    pub fn with_stroke_width(self, stroke_width: f32) -> Self {
        Self {
            stroke_width,
            ..self
        }
    }
}

/// Fill style for solid shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStyle {
    pub color: Color,
    pub alpha: u8,
    pub anti_alias: bool,
}

/// Text style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// Requested glyph size in pixels
    pub size: f32,
    pub align: TextAlign,
    pub anti_alias: bool,
}

/// The style set a clock face paints with.
///
/// Built once per widget and kept for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintStyles {
    /// Tick stroke at highlight alpha; the painter lowers alpha per tick
    pub tick: LineStyle,
    /// Hand stroke with no width set; the painter picks a width per hand
    pub hand: LineStyle,
    pub numeral: TextStyle,
    pub hub: FillStyle,
}

impl PaintStyles {
    pub fn from_config(config: &ClockConfig) -> Self {
        let foreground = config.foreground;
        Self {
            tick: LineStyle {
                color: foreground,
                alpha: config.highlight_tick_alpha,
                stroke_width: config.tick_stroke_width,
                cap: StrokeCap::Round,
                anti_alias: true,
            },
            hand: LineStyle {
                color: foreground,
                alpha: 0xFF,
                stroke_width: 0.0,
                cap: StrokeCap::Round,
                anti_alias: true,
            },
            numeral: TextStyle {
                color: foreground,
                size: config.numeral_text_size,
                align: TextAlign::Center,
                anti_alias: true,
            },
            hub: FillStyle {
                color: foreground,
                alpha: 0xFF,
                anti_alias: true,
            },
        }
    }
}

impl Default for PaintStyles {
    fn default() -> Self {
        Self::from_config(&ClockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_extremes() {
        let fg = Color::new(200, 100, 50);
        assert_eq!(fg.blend_over(0xFF, Color::BLACK), fg);
        assert_eq!(fg.blend_over(0x00, Color::WHITE), Color::WHITE);
    }

    #[test]
    fn test_blend_half_alpha_white_on_black() {
        let mixed = Color::WHITE.blend_over(0x80, Color::BLACK);
        assert_eq!(mixed, Color::new(0x80, 0x80, 0x80));
    }

    #[test]
    fn test_rgb565_conversion_keeps_white() {
        assert_eq!(Rgb565::from(Color::WHITE), Rgb565::WHITE);
        assert_eq!(Color::from(Rgb565::BLACK), Color::BLACK);
    }

    #[test]
    fn test_default_styles_match_contract() {
        let styles = PaintStyles::default();
        assert_eq!(styles.tick.stroke_width, 8.0);
        assert_eq!(styles.tick.cap, StrokeCap::Round);
        assert_eq!(styles.numeral.size, 60.0);
        assert_eq!(styles.numeral.align, TextAlign::Center);
        assert_eq!(styles.hub.color, Color::WHITE);
        assert!(styles.hand.anti_alias);
    }

    #[test]
    fn test_builders_leave_other_fields() {
        let base = PaintStyles::default().tick;
        let dim = base.with_alpha(0x80);
        assert_eq!(dim.alpha, 0x80);
        assert_eq!(dim.stroke_width, base.stroke_width);
        assert_eq!(base.with_stroke_width(3.0).alpha, base.alpha);
    }
}
