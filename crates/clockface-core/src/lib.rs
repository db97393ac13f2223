//! Hardware-independent core library for clockface
//!
//! This crate contains all platform-agnostic logic for the analog clock
//! widget: dial geometry, time sampling, the painter, the refresh driver,
//! the host-facing widget trait, and the embedded-graphics page binding.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod pages;
pub mod painter;
pub mod refresh;
pub mod style;
pub mod surface;
pub mod time;
pub mod widget;

pub use config::{ClockConfig, HandConfig};
pub use error::{ClockError, SchedulerError};
pub use geometry::{DialGeometry, PointF, TickSegment};
pub use painter::{Hand, HandAngles, Painter};
pub use refresh::{RefreshDriver, RefreshState, Scheduler, TaskId, TimerQueue};
pub use style::{Color, FillStyle, LineStyle, PaintStyles, StrokeCap, TextAlign, TextStyle};
pub use surface::{FontMetrics, Surface};
pub use time::{FixedClock, TimeSample, WallClock};
pub use widget::{ClockWidget, Widget};
