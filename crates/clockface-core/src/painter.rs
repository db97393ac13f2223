//! Clock face painter
//!
//! Draws one frame of the clock onto a [`Surface`]. Layers are painted in a
//! fixed order so later ones cover earlier ones:
//!
//! 1. 60 ticks (hour ticks highlighted)
//! 2. hands: hour, minute, second
//! 3. numerals 1 to 12
//! 4. the hub, always on top so it covers the hand pivots
//!
//! Hand angles are computed in clock degrees (0° at 12 o'clock, clockwise)
//! and shifted by -90° into the surface convention (0° at 3 o'clock).

use log::trace;

use crate::config::{ClockConfig, HandConfig};
use crate::constants::{
    DEG_PER_HOUR, DEG_PER_MINUTE, HOUR_TICK_INTERVAL, NUMERALS, TWELVE_O_CLOCK_OFFSET_DEG,
};
use crate::geometry::{DialGeometry, PointF};
use crate::style::PaintStyles;
use crate::surface::Surface;
use crate::time::TimeSample;

/// One of the three clock hands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

impl Hand {
    /// Paint order, bottom to top
    pub const ALL: [Hand; 3] = [Hand::Hour, Hand::Minute, Hand::Second];
}

/// Surface-convention angles of all three hands, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    /// The hour hand creeps forward with the minutes; the minute and second
    /// hands jump in whole steps.
    pub fn from_time(time: TimeSample) -> Self {
        let hour = time.hour() as f32;
        let minute = time.minute() as f32;
        let second = time.second() as f32;
        Self {
            hour: (hour + minute / 60.0) * DEG_PER_HOUR + TWELVE_O_CLOCK_OFFSET_DEG,
            minute: minute * DEG_PER_MINUTE + TWELVE_O_CLOCK_OFFSET_DEG,
            second: second * DEG_PER_MINUTE + TWELVE_O_CLOCK_OFFSET_DEG,
        }
    }

    pub fn get(&self, hand: Hand) -> f32 {
        match hand {
            Hand::Hour => self.hour,
            Hand::Minute => self.minute,
            Hand::Second => self.second,
        }
    }
}

/// Placement of the numeral ring
#[derive(Debug, Clone, Copy, PartialEq)]
struct NumeralLayout {
    radius_ratio: f32,
    angle_offset_deg: f32,
    vertical_bias: f32,
}

/// Stateless renderer for a configured clock face.
#[derive(Debug, Clone)]
pub struct Painter {
    styles: PaintStyles,
    normal_tick_alpha: u8,
    hands: [HandConfig; 3],
    numerals: NumeralLayout,
    hub_radius: f32,
}

impl Default for Painter {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}

impl Painter {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            styles: PaintStyles::from_config(config),
            normal_tick_alpha: config.normal_tick_alpha,
            hands: [config.hour_hand, config.minute_hand, config.second_hand],
            numerals: NumeralLayout {
                radius_ratio: config.numeral_radius_ratio,
                angle_offset_deg: config.numeral_angle_offset_deg,
                vertical_bias: config.numeral_vertical_bias,
            },
            hub_radius: config.hub_radius,
        }
    }

    pub fn styles(&self) -> &PaintStyles {
        &self.styles
    }

    pub fn hand_config(&self, hand: Hand) -> &HandConfig {
        match hand {
            Hand::Hour => &self.hands[0],
            Hand::Minute => &self.hands[1],
            Hand::Second => &self.hands[2],
        }
    }

    /// Alpha for tick `index`: full on hour ticks, dimmed elsewhere.
    pub fn tick_alpha(&self, index: usize) -> u8 {
        if index % HOUR_TICK_INTERVAL == 0 {
            self.styles.tick.alpha
        } else {
            self.normal_tick_alpha
        }
    }

    /// Outer end of `hand` at `time`; the inner end is the dial center.
    pub fn hand_endpoint(&self, geometry: &DialGeometry, hand: Hand, time: TimeSample) -> PointF {
        let angle = HandAngles::from_time(time).get(hand);
        geometry.point_at(angle, self.hand_config(hand).length_ratio)
    }

    /// Baseline anchor for numeral `number` (1-12).
    ///
    /// Pushes the text outward by half its width horizontally and half its
    /// height vertically, then biases it down so the glyphs sit visually
    /// centered on the ring.
    pub fn numeral_anchor(
        &self,
        geometry: &DialGeometry,
        number: u8,
        text_width: f32,
        text_height: f32,
    ) -> PointF {
        let angle = ((number as f32 - 1.0) * DEG_PER_HOUR + self.numerals.angle_offset_deg) as f64;
        let radians = angle.to_radians();
        let ring = (geometry.radius() * self.numerals.radius_ratio) as f64;
        let center = geometry.center();

        PointF::new(
            (center.x as f64 + (ring + text_width as f64 / 2.0) * libm::cos(radians)) as f32,
            (center.y as f64 + (ring + text_height as f64 / 2.0) * libm::sin(radians)) as f32
                + self.numerals.vertical_bias,
        )
    }

    /// Paint a full frame.
    pub fn paint<S: Surface>(
        &self,
        surface: &mut S,
        geometry: &DialGeometry,
        time: TimeSample,
    ) -> Result<(), S::Error> {
        trace!("Painting clock face at {}", time);
        self.draw_ticks(surface, geometry)?;
        self.draw_hands(surface, geometry, time)?;
        self.draw_numerals(surface, geometry)?;
        self.draw_hub(surface, geometry)
    }

    fn draw_ticks<S: Surface>(&self, surface: &mut S, geometry: &DialGeometry) -> Result<(), S::Error> {
        for (i, tick) in geometry.ticks().iter().enumerate() {
            let style = self.styles.tick.with_alpha(self.tick_alpha(i));
            surface.draw_line(tick.start, tick.end, &style)?;
        }
        Ok(())
    }

    fn draw_hands<S: Surface>(
        &self,
        surface: &mut S,
        geometry: &DialGeometry,
        time: TimeSample,
    ) -> Result<(), S::Error> {
        let center = geometry.center();
        for hand in Hand::ALL {
            let style = self
                .styles
                .hand
                .with_stroke_width(self.hand_config(hand).stroke_width);
            surface.draw_line(center, self.hand_endpoint(geometry, hand, time), &style)?;
        }
        Ok(())
    }

    fn draw_numerals<S: Surface>(&self, surface: &mut S, geometry: &DialGeometry) -> Result<(), S::Error> {
        let style = &self.styles.numeral;
        let text_height = surface.font_metrics(style).height();

        for (number, label) in (1u8..).zip(NUMERALS) {
            let text_width = surface.measure_text(label, style);
            let anchor = self.numeral_anchor(geometry, number, text_width, text_height);
            surface.draw_text(label, anchor, style)?;
        }
        Ok(())
    }

    fn draw_hub<S: Surface>(&self, surface: &mut S, geometry: &DialGeometry) -> Result<(), S::Error> {
        surface.draw_circle(geometry.center(), self.hub_radius, &self.styles.hub)
    }
}
