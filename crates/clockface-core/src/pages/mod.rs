//! Pages binding widgets to embedded-graphics displays

pub mod clock;
pub mod page;

pub use clock::{CLOCK_PAGE_TIMERS, ClockPage};
pub use page::Page;
