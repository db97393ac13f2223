//! Wall-clock sources for the simulator

use std::cell::Cell;
use std::time::Duration;

use chrono::{Local, Timelike};
use clockface_core::{TimeSample, WallClock};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Reads the host's local time zone through chrono.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> TimeSample {
        // One read, so the fields always belong to the same instant
        let now = Local::now();
        TimeSample::from_hms_lossy(now.hour(), now.minute(), now.second())
    }
}

/// Simulated timeline that starts at a given time and moves only when told.
#[derive(Debug)]
pub struct SteppedClock {
    start_secs: u64,
    elapsed: Cell<Duration>,
}

impl SteppedClock {
    pub fn new(start: TimeSample) -> Self {
        let start_secs =
            start.hour() as u64 * 3600 + start.minute() as u64 * 60 + start.second() as u64;
        Self {
            start_secs,
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    /// Set how far the timeline has moved since the start time.
    pub fn set_elapsed(&self, elapsed: Duration) {
        self.elapsed.set(elapsed);
    }
}

impl WallClock for SteppedClock {
    fn now(&self) -> TimeSample {
        let secs = (self.start_secs + self.elapsed.get().as_secs()) % SECONDS_PER_DAY;
        TimeSample::from_unix_seconds(secs as i64, 0)
    }
}

/// Whichever source the command line asked for
#[cfg_attr(not(feature = "sdl"), allow(dead_code))]
#[derive(Debug)]
pub enum SimClock {
    Local(LocalClock),
    Stepped(SteppedClock),
}

impl WallClock for SimClock {
    fn now(&self) -> TimeSample {
        match self {
            SimClock::Local(clock) => clock.now(),
            SimClock::Stepped(clock) => clock.now(),
        }
    }
}

/// Parse `H:MM:SS` (24-hour input accepted) into a sample.
pub fn parse_time(text: &str) -> Result<TimeSample, String> {
    let fields: Vec<&str> = text.split(':').collect();
    let [h, m, s] = fields.as_slice() else {
        return Err(format!("expected HH:MM:SS, got {:?}", text));
    };

    let parse = |field: &str, name: &str, max: u32| -> Result<u32, String> {
        let value: u32 = field
            .parse()
            .map_err(|_| format!("{} is not a number: {:?}", name, field))?;
        if value > max {
            return Err(format!("{} out of range: {} (max: {})", name, value, max));
        }
        Ok(value)
    };

    Ok(TimeSample::from_hms_lossy(
        parse(*h, "hour", 23)?,
        parse(*m, "minute", 59)?,
        parse(*s, "second", 59)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        let t = parse_time("15:04:05").unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (3, 4, 5));
        assert!(parse_time("24:00:00").is_err());
        assert!(parse_time("12:00").is_err());
        assert!(parse_time("aa:00:00").is_err());
    }

    #[test]
    fn test_stepped_clock_advances_and_wraps() {
        let clock = SteppedClock::new(TimeSample::new(11, 59, 58).unwrap());
        assert_eq!(clock.now().second(), 58);

        clock.set_elapsed(Duration::from_millis(1999));
        assert_eq!(clock.now(), TimeSample::new(11, 59, 59).unwrap());

        clock.set_elapsed(Duration::from_secs(2));
        assert_eq!(clock.now(), TimeSample::new(0, 0, 0).unwrap());
    }

    #[test]
    fn test_local_clock_is_in_range() {
        let t = LocalClock.now();
        assert!(t.hour() < 12 && t.minute() < 60 && t.second() < 60);
    }
}
