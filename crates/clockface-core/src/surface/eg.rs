//! embedded-graphics surface binding
//!
//! Maps clock primitives onto `Line`, `Circle` and `Text` drawables.
//!
//! RGB565 targets carry no alpha channel, so translucent colors are blended
//! against the page background before drawing. Round caps are emulated by
//! stamping a filled circle on each end of a line. Text uses the built-in
//! mono fonts, magnified by a whole factor to reach the requested size.
//! Mono fonts have no anti-aliasing, so the `anti_alias` flag is ignored.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{
    MonoFont, MonoTextStyle,
    ascii::{FONT_6X10, FONT_8X13, FONT_9X15, FONT_10X20},
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};
use libm::roundf;

use super::{FontMetrics, Surface};
use crate::geometry::PointF;
use crate::style::{Color, FillStyle, LineStyle, StrokeCap, TextAlign, TextStyle};

/// Available fonts, smallest first
const FONTS: [&MonoFont<'static>; 4] = [&FONT_6X10, &FONT_8X13, &FONT_9X15, &FONT_10X20];

/// A mono font drawn at an integer pixel scale.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScaledFont {
    pub font: &'static MonoFont<'static>,
    pub scale: u32,
}

impl ScaledFont {
    /// Pick the font and scale whose glyph cell is tallest without
    /// exceeding `size` pixels.
    ///
    /// On a tie the larger base font wins, since it needs less upscaling.
    /// Sizes below the smallest font still get it at 1x.
    pub fn for_size(size: f32) -> Self {
        let mut best = ScaledFont {
            font: FONTS[0],
            scale: 1,
        };
        let mut best_height = 0;

        for font in FONTS.iter().rev() {
            let cell = font.character_size.height;
            let scale = (size / cell as f32) as u32;
            if scale == 0 {
                continue;
            }
            if cell * scale > best_height {
                best = ScaledFont { font: *font, scale };
                best_height = cell * scale;
            }
        }
        best
    }

    pub fn height(&self) -> u32 {
        self.font.character_size.height * self.scale
    }

    pub fn baseline(&self) -> u32 {
        self.font.baseline * self.scale
    }

    /// Advance width of `glyphs` characters
    pub fn width(&self, glyphs: u32) -> u32 {
        if glyphs == 0 {
            return 0;
        }
        (glyphs * self.font.character_size.width + (glyphs - 1) * self.font.character_spacing)
            * self.scale
    }
}

/// Draw target that magnifies everything drawn through it about `anchor`.
///
/// Each source pixel becomes a `scale` x `scale` block, so text laid out at
/// `anchor` keeps its baseline there while growing outward.
struct Magnified<'a, D> {
    target: &'a mut D,
    anchor: Point,
    scale: i32,
}

impl<D: DrawTarget> Dimensions for Magnified<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

impl<D: DrawTarget> DrawTarget for Magnified<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let block = Size::new_equal(self.scale as u32);
        for Pixel(point, color) in pixels {
            let top_left = self.anchor + (point - self.anchor) * self.scale;
            self.target.fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }
}

/// Surface writing into an embedded-graphics draw target.
///
/// Widget-local coordinates are offset by `origin`, so a widget placed
/// anywhere on screen can paint as if it started at `(0, 0)`.
pub struct EgSurface<'a, D> {
    target: &'a mut D,
    origin: Point,
    background: Color,
}

impl<'a, D> EgSurface<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: &'a mut D, origin: Point, background: Rgb565) -> Self {
        Self {
            target,
            origin,
            background: background.into(),
        }
    }

    fn to_screen(&self, point: PointF) -> Point {
        Point::new(roundf(point.x) as i32, roundf(point.y) as i32) + self.origin
    }

    fn resolve(&self, color: Color, alpha: u8) -> Rgb565 {
        color.blend_over(alpha, self.background).into()
    }
}

impl<'a, D> Surface for EgSurface<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn draw_line(&mut self, start: PointF, end: PointF, style: &LineStyle) -> Result<(), D::Error> {
        let color = self.resolve(style.color, style.alpha);
        let width = roundf(style.stroke_width).max(1.0) as u32;
        let (p1, p2) = (self.to_screen(start), self.to_screen(end));

        Line::new(p1, p2)
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(self.target)?;

        if style.cap == StrokeCap::Round && width > 1 {
            let cap = PrimitiveStyle::with_fill(color);
            Circle::with_center(p1, width).into_styled(cap).draw(self.target)?;
            Circle::with_center(p2, width).into_styled(cap).draw(self.target)?;
        }
        Ok(())
    }

    fn draw_circle(&mut self, center: PointF, radius: f32, style: &FillStyle) -> Result<(), D::Error> {
        let diameter = roundf(radius * 2.0).max(0.0) as u32;
        if diameter == 0 {
            return Ok(());
        }
        Circle::with_center(self.to_screen(center), diameter)
            .into_styled(PrimitiveStyle::with_fill(self.resolve(style.color, style.alpha)))
            .draw(self.target)
    }

    fn draw_text(&mut self, text: &str, anchor: PointF, style: &TextStyle) -> Result<(), D::Error> {
        let font = ScaledFont::for_size(style.size);
        let alignment = match style.align {
            TextAlign::Left => Alignment::Left,
            TextAlign::Center => Alignment::Center,
            TextAlign::Right => Alignment::Right,
        };
        let color: Rgb565 = style.color.into();
        let text_style = MonoTextStyle::new(font.font, color);
        let anchor = self.to_screen(anchor);

        let mut magnified = Magnified {
            target: &mut *self.target,
            anchor,
            scale: font.scale as i32,
        };
        EgDrawable::draw(
            &Text::with_alignment(text, anchor, text_style, alignment),
            &mut magnified,
        )?;
        Ok(())
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        ScaledFont::for_size(style.size).width(text.chars().count() as u32) as f32
    }

    fn font_metrics(&self, style: &TextStyle) -> FontMetrics {
        let font = ScaledFont::for_size(style.size);
        FontMetrics {
            ascent: -(font.baseline() as f32),
            descent: (font.height() - font.baseline()) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DialGeometry;
    use crate::painter::Painter;
    use crate::style::PaintStyles;
    use crate::time::TimeSample;
    use core::convert::Infallible;
    use embedded_graphics::mock_display::MockDisplay;

    /// Plain pixel buffer, for scenes larger than `MockDisplay` allows
    struct Canvas {
        size: Size,
        pixels: Vec<Rgb565>,
    }

    impl Canvas {
        fn new(width: u32, height: u32) -> Self {
            Self {
                size: Size::new(width, height),
                pixels: vec![Rgb565::BLACK; (width * height) as usize],
            }
        }

        fn get(&self, x: i32, y: i32) -> Rgb565 {
            self.pixels[y as usize * self.size.width as usize + x as usize]
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            self.size
        }
    }

    impl DrawTarget for Canvas {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
        where
            I: IntoIterator<Item = Pixel<Rgb565>>,
        {
            for Pixel(point, color) in pixels {
                if self.bounding_box().contains(point) {
                    let index = point.y as usize * self.size.width as usize + point.x as usize;
                    self.pixels[index] = color;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_font_for_size_scales_to_fit() {
        let font = ScaledFont::for_size(60.0);
        assert_eq!(font.font.character_size, FONT_10X20.character_size);
        assert_eq!((font.scale, font.height()), (3, 60));

        let font = ScaledFont::for_size(14.0);
        assert_eq!(font.font.character_size, FONT_8X13.character_size);
        assert_eq!(font.scale, 1);

        let font = ScaledFont::for_size(2.0);
        assert_eq!(font.font.character_size, FONT_6X10.character_size);
        assert_eq!(font.scale, 1);
    }

    #[test]
    fn test_measure_and_metrics_follow_font() {
        let mut display = MockDisplay::<Rgb565>::new();
        let surface = EgSurface::new(&mut display, Point::zero(), Rgb565::BLACK);
        let style = PaintStyles::default().numeral;

        assert_eq!(surface.measure_text("12", &style), 60.0);
        assert_eq!(surface.measure_text("", &style), 0.0);

        let metrics = surface.font_metrics(&style);
        assert_eq!(metrics.height(), 60.0);
        assert_eq!(metrics.ascent, -3.0 * FONT_10X20.baseline as f32);
    }

    #[test]
    fn test_text_is_drawn_at_requested_size() {
        let mut canvas = Canvas::new(100, 100);
        let style = PaintStyles::default().numeral;
        let mut surface = EgSurface::new(&mut canvas, Point::zero(), Rgb565::BLACK);
        surface.draw_text("8", PointF::new(50.0, 70.0), &style).unwrap();

        let rows: Vec<i32> = (0..100)
            .filter(|&y| (0..100).any(|x| canvas.get(x, y) == Rgb565::WHITE))
            .collect();
        let (top, bottom) = (rows[0], rows[rows.len() - 1]);

        // Ink stays within the scaled glyph cell around the baseline
        let baseline = FONT_10X20.baseline as i32;
        let height = FONT_10X20.character_size.height as i32;
        assert!(top >= 70 - 3 * baseline && bottom < 70 + 3 * (height - baseline));
        assert!(bottom - top >= 30, "glyph only {} rows tall", bottom - top + 1);
    }

    #[test]
    fn test_numeral_three_straddles_three_o_clock_line() {
        let mut canvas = Canvas::new(400, 400);
        let mut geometry = DialGeometry::new();
        geometry.reconfigure(400, 400);
        let time = TimeSample::new(6, 0, 0).unwrap();

        let mut surface = EgSurface::new(&mut canvas, Point::zero(), Rgb565::BLACK);
        Painter::default().paint(&mut surface, &geometry, time).unwrap();

        // Columns inside the "3" glyph, clear of the tick caps, rows clear
        // of the "2" and "4"
        let rows: Vec<i32> = (150..260)
            .filter(|&y| (362..382).any(|x| canvas.get(x, y) == Rgb565::WHITE))
            .collect();
        assert!(!rows.is_empty());
        let (top, bottom) = (rows[0], rows[rows.len() - 1]);
        assert!(top < 200 && bottom > 200, "\"3\" ink spans rows {}..={}", top, bottom);
    }

    #[test]
    fn test_half_alpha_line_is_blended() {
        let mut display = MockDisplay::<Rgb565>::new();
        let style = PaintStyles::default()
            .tick
            .with_alpha(0x80)
            .with_stroke_width(1.0);

        let mut surface = EgSurface::new(&mut display, Point::zero(), Rgb565::BLACK);
        surface
            .draw_line(PointF::new(0.0, 0.0), PointF::new(5.0, 0.0), &style)
            .unwrap();

        let expected: Rgb565 = Color::WHITE.blend_over(0x80, Color::BLACK).into();
        assert_eq!(display.get_pixel(Point::new(3, 0)), Some(expected));
        assert_ne!(expected, Rgb565::WHITE);
    }

    #[test]
    fn test_origin_offsets_drawing() {
        let mut display = MockDisplay::<Rgb565>::new();
        let style = PaintStyles::default().hub;

        let mut surface = EgSurface::new(&mut display, Point::new(10, 20), Rgb565::BLACK);
        surface.draw_circle(PointF::new(5.0, 5.0), 1.5, &style).unwrap();

        assert_eq!(display.get_pixel(Point::new(15, 25)), Some(Rgb565::WHITE));
        assert_eq!(display.get_pixel(Point::new(5, 5)), None);
    }

    #[test]
    fn test_zero_radius_circle_draws_nothing() {
        let mut display = MockDisplay::<Rgb565>::new();
        let style = PaintStyles::default().hub;
        let mut surface = EgSurface::new(&mut display, Point::zero(), Rgb565::BLACK);
        surface.draw_circle(PointF::new(5.0, 5.0), 0.0, &style).unwrap();
        assert_eq!(display, MockDisplay::new());
    }
}
