//! Wall-clock sampling
//!
//! A [`TimeSample`] is taken once per paint so that all three hands observe
//! the same instant. Hosts supply the actual clock through [`WallClock`].

use core::cell::Cell;
use core::fmt;

use crate::error::ClockError;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Hour (0-11), minute and second of a single instant.
///
/// Hour `0` is drawn as twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSample {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeSample {
    /// Build a sample, rejecting out-of-range fields.
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ClockError> {
        check_field("hour", hour, 11)?;
        check_field("minute", minute, 59)?;
        check_field("second", second, 59)?;
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Build a sample from a trusted source, wrapping each field into range.
    ///
    /// A 24-hour value folds onto the 12-hour dial.
    pub fn from_hms_lossy(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: (hour % 12) as u8,
            minute: (minute % 60) as u8,
            second: (second % 60) as u8,
        }
    }

    /// Local time of day for a Unix timestamp shifted by `utc_offset_secs`.
    pub fn from_unix_seconds(secs: i64, utc_offset_secs: i32) -> Self {
        let of_day = (secs + utc_offset_secs as i64).rem_euclid(SECONDS_PER_DAY);
        Self::from_hms_lossy(
            (of_day / SECONDS_PER_HOUR) as u32,
            ((of_day % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u32,
            (of_day % SECONDS_PER_MINUTE) as u32,
        )
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }
}

fn check_field(field: &'static str, value: u8, max: u8) -> Result<(), ClockError> {
    if value > max {
        return Err(ClockError::FieldOutOfRange {
            field,
            value: value as u32,
            max: max as u32,
        });
    }
    Ok(())
}

impl fmt::Display for TimeSample {
    /// Formats as `H:MM:SS` on a 12-hour face, so hour `0` prints as `12`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = if self.hour == 0 { 12 } else { self.hour };
        write!(f, "{}:{:02}:{:02}", hour, self.minute, self.second)
    }
}

/// Source of the current local time.
///
/// Implementations must read one instant per call so the returned fields
/// are mutually consistent, and must not block.
pub trait WallClock {
    fn now(&self) -> TimeSample;
}

impl<T: WallClock + ?Sized> WallClock for &T {
    fn now(&self) -> TimeSample {
        (**self).now()
    }
}

/// Clock that reports whatever time it was last set to.
///
/// Used by hosts that push time in from elsewhere (an RTC interrupt, a
/// simulated timeline) and by tests.
#[derive(Debug, Default)]
pub struct FixedClock {
    current: Cell<TimeSample>,
}

impl FixedClock {
    pub fn new(time: TimeSample) -> Self {
        Self {
            current: Cell::new(time),
        }
    }

    pub fn set(&self, time: TimeSample) {
        self.current.set(time);
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> TimeSample {
        self.current.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_bounds() {
        let t = TimeSample::new(11, 59, 59).unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (11, 59, 59));
        assert!(TimeSample::new(0, 0, 0).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            TimeSample::new(12, 0, 0),
            Err(ClockError::FieldOutOfRange {
                field: "hour",
                value: 12,
                max: 11
            })
        );
        assert!(matches!(
            TimeSample::new(1, 60, 0),
            Err(ClockError::FieldOutOfRange { field: "minute", .. })
        ));
        assert!(matches!(
            TimeSample::new(1, 0, 60),
            Err(ClockError::FieldOutOfRange { field: "second", .. })
        ));
    }

    #[test]
    fn test_lossy_folds_24_hour_values() {
        let t = TimeSample::from_hms_lossy(15, 30, 5);
        assert_eq!((t.hour(), t.minute(), t.second()), (3, 30, 5));
        assert_eq!(TimeSample::from_hms_lossy(12, 0, 0).hour(), 0);
        assert_eq!(TimeSample::from_hms_lossy(0, 61, 75).minute(), 1);
    }

    #[test]
    fn test_from_unix_seconds() {
        // 2023-11-14T22:13:20Z
        let t = TimeSample::from_unix_seconds(1_700_000_000, 0);
        assert_eq!((t.hour(), t.minute(), t.second()), (10, 13, 20));

        // +02:00 crosses midnight
        let t = TimeSample::from_unix_seconds(1_700_000_000, 2 * 3600);
        assert_eq!((t.hour(), t.minute(), t.second()), (0, 13, 20));

        // negative offsets before the epoch still land inside the day
        let t = TimeSample::from_unix_seconds(0, -3600);
        assert_eq!((t.hour(), t.minute(), t.second()), (11, 0, 0));
    }

    #[test]
    fn test_display_shows_twelve_for_zero_hour() {
        let t = TimeSample::new(0, 5, 9).unwrap();
        assert_eq!(t.to_string(), "12:05:09");
        let t = TimeSample::new(9, 15, 45).unwrap();
        assert_eq!(t.to_string(), "9:15:45");
    }

    #[test]
    fn test_fixed_clock_follows_set() {
        let clock = FixedClock::new(TimeSample::new(1, 2, 3).unwrap());
        assert_eq!(clock.now().second(), 3);
        clock.set(TimeSample::new(4, 5, 6).unwrap());
        assert_eq!(clock.now(), TimeSample::new(4, 5, 6).unwrap());
        assert_eq!((&clock).now().hour(), 4);
    }
}
