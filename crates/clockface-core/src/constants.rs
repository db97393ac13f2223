//! Visual contract constants for the clock face
//!
//! These are the defaults of [`ClockConfig`](crate::config::ClockConfig).
//! Numeral placement constants are tuned by eye and must stay exact for
//! visual parity between hosts.

// ============================================================================
// Dial
// ============================================================================

/// Number of tick marks around the dial (one per second position)
pub const TICK_COUNT: usize = 60;

/// Angular distance between two adjacent ticks in degrees
pub const TICK_STEP_DEG: f64 = 6.0;

/// Every n-th tick marks an hour and is drawn highlighted
pub const HOUR_TICK_INTERVAL: usize = 5;

/// Inner end of a tick, as a fraction of the dial radius
pub const TICK_INNER_RATIO: f32 = 0.95;

/// Tick stroke width in pixels
pub const TICK_STROKE_WIDTH_PX: f32 = 8.0;

/// Alpha of hour ticks
pub const HIGHLIGHT_TICK_ALPHA: u8 = 0xFF;

/// Alpha of the remaining ticks
pub const NORMAL_TICK_ALPHA: u8 = 0x80;

// ============================================================================
// Hands
// ============================================================================

pub const HOUR_HAND_LENGTH_RATIO: f32 = 0.4;
pub const MINUTE_HAND_LENGTH_RATIO: f32 = 0.6;
pub const SECOND_HAND_LENGTH_RATIO: f32 = 0.8;

pub const HOUR_HAND_WIDTH_PX: f32 = 12.0;
pub const MINUTE_HAND_WIDTH_PX: f32 = 8.0;
pub const SECOND_HAND_WIDTH_PX: f32 = 4.0;

/// Degrees swept by the hour hand per hour (360 / 12)
pub const DEG_PER_HOUR: f32 = 30.0;

/// Degrees swept by the minute and second hands per unit (360 / 60)
pub const DEG_PER_MINUTE: f32 = 6.0;

/// Offset rotating 0° from 3 o'clock (surface convention) to 12 o'clock
pub const TWELVE_O_CLOCK_OFFSET_DEG: f32 = -90.0;

// ============================================================================
// Numerals
// ============================================================================

/// Numeral text size in pixels
pub const NUMERAL_TEXT_SIZE_PX: f32 = 60.0;

/// Radius of the numeral ring, as a fraction of the dial radius
pub const NUMERAL_RADIUS_RATIO: f32 = 0.8;

/// Angle of numeral "1" is `0 * 30 + offset`
pub const NUMERAL_ANGLE_OFFSET_DEG: f32 = -60.0;

/// Extra downward shift applied to every numeral, in pixels
pub const NUMERAL_VERTICAL_BIAS_PX: f32 = 25.0;

/// Labels drawn around the dial, starting at one o'clock
pub const NUMERALS: [&str; 12] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];

// ============================================================================
// Hub and refresh
// ============================================================================

/// Radius of the filled circle covering the hand pivots
pub const HUB_RADIUS_PX: f32 = 15.0;

/// Delay between repaints in milliseconds
pub const REFRESH_PERIOD_MS: u64 = 1000;

/// Longest accepted refresh period, one day
pub const MAX_REFRESH_PERIOD_MS: u64 = 24 * 60 * 60 * 1000;
