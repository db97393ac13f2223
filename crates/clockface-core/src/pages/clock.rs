//! Clock page
//!
//! Hosts a [`ClockWidget`] on an embedded-graphics display. The page owns
//! the widget's timer queue, so the host loop only needs to call `update`
//! with the current time and redraw when the page reports dirty.

use embassy_time::Instant;
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use log::{debug, info};

use crate::pages::Page;
use crate::refresh::TimerQueue;
use crate::surface::EgSurface;
use crate::time::WallClock;
use crate::widget::{ClockWidget, Widget};

/// Pending timers a clock page needs; the refresh driver keeps at most one.
pub const CLOCK_PAGE_TIMERS: usize = 2;

/// Full-region page showing an analog clock.
pub struct ClockPage<C, const N: usize = CLOCK_PAGE_TIMERS> {
    bounds: Rectangle,
    background: Rgb565,
    widget: ClockWidget<C>,
    timers: TimerQueue<N>,
    dirty: bool,
}

impl<C: WallClock, const N: usize> ClockPage<C, N> {
    /// Place `widget` in `bounds`, with the timer queue starting at `now`.
    pub fn new(bounds: Rectangle, mut widget: ClockWidget<C>, now: Instant) -> Self {
        widget.on_layout_changed(bounds.size.width, bounds.size.height);
        Self {
            bounds,
            background: Rgb565::BLACK,
            widget,
            timers: TimerQueue::new(now),
            dirty: true,
        }
    }

    pub fn with_background(mut self, background: Rgb565) -> Self {
        self.background = background;
        self.dirty = true;
        self
    }

    /// Move or resize the page; the dial is rebuilt if its radius changes.
    pub fn resize(&mut self, bounds: Rectangle) {
        if bounds == self.bounds {
            return;
        }
        debug!("Clock page resized to {:?}", bounds);
        self.bounds = bounds;
        self.widget
            .on_layout_changed(bounds.size.width, bounds.size.height);
        self.dirty = true;
    }

    pub fn widget(&self) -> &ClockWidget<C> {
        &self.widget
    }

    pub fn timers(&self) -> &TimerQueue<N> {
        &self.timers
    }
}

impl<C: WallClock, const N: usize> Page for ClockPage<C, N> {
    fn title(&self) -> &str {
        "Clock"
    }

    fn on_activate(&mut self) {
        self.widget.on_attach();
        self.dirty = true;
    }

    fn on_deactivate(&mut self) {
        info!("Clock page deactivated, cancelling refresh");
        self.widget.on_detach(&mut self.timers);
        self.dirty = false;
    }

    fn update(&mut self, now: Instant) {
        self.timers.advance_to(now);
        while let Some(task) = self.timers.pop_due() {
            if self.widget.on_refresh(task) {
                self.dirty = true;
            }
        }
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        // Clear background.
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(display)?;

        let mut surface = EgSurface::new(display, self.bounds.top_left, self.background);
        self.widget.on_paint(&mut surface, &mut self.timers)
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
