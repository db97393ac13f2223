//! Drawing surface abstraction
//!
//! The clock never talks to a display directly. Hosts hand it a [`Surface`]
//! for the duration of one paint call; the surface turns line, circle and
//! text requests into whatever the host renders with.
//!
//! Two implementations ship with the crate:
//!
//! - [`EgSurface`] draws onto any embedded-graphics `DrawTarget<Color = Rgb565>`.
//! - [`RecordingSurface`] keeps a list of [`DrawCommand`]s, useful as a
//!   display list and for asserting on exactly what was painted.

mod eg;
mod recording;

pub use eg::EgSurface;
pub use recording::{DrawCommand, RecordingSurface};

use crate::geometry::PointF;
use crate::style::{FillStyle, LineStyle, TextStyle};

/// Vertical font extents relative to the text baseline.
///
/// Follows the usual screen convention: `ascent` is negative (above the
/// baseline), `descent` positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl FontMetrics {
    /// Full line height, `descent - ascent`
    pub fn height(&self) -> f32 {
        self.descent - self.ascent
    }
}

/// Primitive operations a host surface provides.
///
/// Coordinates are widget-local surface pixels. Text anchors are baseline
/// points interpreted according to [`TextStyle::align`].
pub trait Surface {
    type Error;

    fn draw_line(&mut self, start: PointF, end: PointF, style: &LineStyle)
    -> Result<(), Self::Error>;

    fn draw_circle(
        &mut self,
        center: PointF,
        radius: f32,
        style: &FillStyle,
    ) -> Result<(), Self::Error>;

    fn draw_text(&mut self, text: &str, anchor: PointF, style: &TextStyle)
    -> Result<(), Self::Error>;

    /// Advance width of `text` in pixels
    fn measure_text(&self, text: &str, style: &TextStyle) -> f32;

    fn font_metrics(&self, style: &TextStyle) -> FontMetrics;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    type Error = S::Error;

    fn draw_line(
        &mut self,
        start: PointF,
        end: PointF,
        style: &LineStyle,
    ) -> Result<(), Self::Error> {
        (**self).draw_line(start, end, style)
    }

    fn draw_circle(
        &mut self,
        center: PointF,
        radius: f32,
        style: &FillStyle,
    ) -> Result<(), Self::Error> {
        (**self).draw_circle(center, radius, style)
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: PointF,
        style: &TextStyle,
    ) -> Result<(), Self::Error> {
        (**self).draw_text(text, anchor, style)
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        (**self).measure_text(text, style)
    }

    fn font_metrics(&self, style: &TextStyle) -> FontMetrics {
        (**self).font_metrics(style)
    }
}
