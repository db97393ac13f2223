//! Display-list surface

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::convert::Infallible;

use super::{FontMetrics, Surface};
use crate::geometry::PointF;
use crate::style::{FillStyle, LineStyle, TextStyle};

/// Advance of one glyph, as a fraction of the text size
const ADVANCE_RATIO: f32 = 0.55;

/// Ascent, as a fraction of the text size (negative: above baseline)
const ASCENT_RATIO: f32 = -0.93;

/// Descent, as a fraction of the text size
const DESCENT_RATIO: f32 = 0.24;

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        start: PointF,
        end: PointF,
        style: LineStyle,
    },
    Circle {
        center: PointF,
        radius: f32,
        style: FillStyle,
    },
    Text {
        text: String,
        anchor: PointF,
        style: TextStyle,
    },
}

/// Surface that records every draw call instead of rasterizing it.
///
/// Text is measured with a fixed per-glyph advance proportional to the text
/// size, which is close enough to a proportional digit font for layout.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = (&PointF, &PointF, &LineStyle)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { start, end, style } => Some((start, end, style)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &PointF, &TextStyle)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text {
                text,
                anchor,
                style,
            } => Some((text.as_str(), anchor, style)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (&PointF, f32, &FillStyle)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Circle {
                center,
                radius,
                style,
            } => Some((center, *radius, style)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn draw_line(&mut self, start: PointF, end: PointF, style: &LineStyle) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Line {
            start,
            end,
            style: *style,
        });
        Ok(())
    }

    fn draw_circle(
        &mut self,
        center: PointF,
        radius: f32,
        style: &FillStyle,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            style: *style,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, anchor: PointF, style: &TextStyle) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            style: *style,
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        text.chars().count() as f32 * style.size * ADVANCE_RATIO
    }

    fn font_metrics(&self, style: &TextStyle) -> FontMetrics {
        FontMetrics {
            ascent: style.size * ASCENT_RATIO,
            descent: style.size * DESCENT_RATIO,
        }
    }
}
