use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ClockError;
use crate::style::Color;

/// Length and stroke width of one clock hand
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HandConfig {
    /// Hand length as a fraction of the dial radius
    pub length_ratio: f32,
    pub stroke_width: f32,
}

/// Visual and timing parameters of a clock face.
///
/// `Default` gives the reference look: white foreground, 8 px ticks,
/// 12/8/4 px hands at 0.4/0.6/0.8 of the radius, 60 px numerals and a
/// one-second refresh.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    pub foreground: Color,
    pub tick_stroke_width: f32,
    pub highlight_tick_alpha: u8,
    pub normal_tick_alpha: u8,
    pub hour_hand: HandConfig,
    pub minute_hand: HandConfig,
    pub second_hand: HandConfig,
    pub numeral_text_size: f32,
    pub numeral_radius_ratio: f32,
    pub numeral_angle_offset_deg: f32,
    pub numeral_vertical_bias: f32,
    pub hub_radius: f32,
    pub refresh_period_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            foreground: Color::WHITE,
            tick_stroke_width: TICK_STROKE_WIDTH_PX,
            highlight_tick_alpha: HIGHLIGHT_TICK_ALPHA,
            normal_tick_alpha: NORMAL_TICK_ALPHA,
            hour_hand: HandConfig {
                length_ratio: HOUR_HAND_LENGTH_RATIO,
                stroke_width: HOUR_HAND_WIDTH_PX,
            },
            minute_hand: HandConfig {
                length_ratio: MINUTE_HAND_LENGTH_RATIO,
                stroke_width: MINUTE_HAND_WIDTH_PX,
            },
            second_hand: HandConfig {
                length_ratio: SECOND_HAND_LENGTH_RATIO,
                stroke_width: SECOND_HAND_WIDTH_PX,
            },
            numeral_text_size: NUMERAL_TEXT_SIZE_PX,
            numeral_radius_ratio: NUMERAL_RADIUS_RATIO,
            numeral_angle_offset_deg: NUMERAL_ANGLE_OFFSET_DEG,
            numeral_vertical_bias: NUMERAL_VERTICAL_BIAS_PX,
            hub_radius: HUB_RADIUS_PX,
            refresh_period_ms: REFRESH_PERIOD_MS,
        }
    }
}

impl ClockConfig {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_period_ms)
    }

    /// Reject values that cannot produce a sensible face.
    pub fn validate(&self) -> Result<(), ClockError> {
        check_positive(self.tick_stroke_width, "tick_stroke_width")?;
        for (hand, name_len, name_width) in [
            (&self.hour_hand, "hour_hand.length_ratio", "hour_hand.stroke_width"),
            (&self.minute_hand, "minute_hand.length_ratio", "minute_hand.stroke_width"),
            (&self.second_hand, "second_hand.length_ratio", "second_hand.stroke_width"),
        ] {
            check_ratio(hand.length_ratio, name_len)?;
            check_positive(hand.stroke_width, name_width)?;
        }
        check_positive(self.numeral_text_size, "numeral_text_size")?;
        check_ratio(self.numeral_radius_ratio, "numeral_radius_ratio")?;
        check_finite(self.numeral_angle_offset_deg, "numeral_angle_offset_deg")?;
        check_finite(self.numeral_vertical_bias, "numeral_vertical_bias")?;
        if !self.hub_radius.is_finite() || self.hub_radius < 0.0 {
            return Err(ClockError::InvalidConfig {
                param: "hub_radius",
            });
        }
        if !(1..=MAX_REFRESH_PERIOD_MS).contains(&self.refresh_period_ms) {
            return Err(ClockError::InvalidConfig {
                param: "refresh_period_ms",
            });
        }
        Ok(())
    }
}

fn check_finite(value: f32, param: &'static str) -> Result<(), ClockError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ClockError::InvalidConfig { param })
    }
}

fn check_positive(value: f32, param: &'static str) -> Result<(), ClockError> {
    check_finite(value, param)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ClockError::InvalidConfig { param })
    }
}

/// Ratios of the dial radius live in `(0, 1]`.
fn check_ratio(value: f32, param: &'static str) -> Result<(), ClockError> {
    check_positive(value, param)?;
    if value <= 1.0 {
        Ok(())
    } else {
        Err(ClockError::InvalidConfig { param })
    }
}
