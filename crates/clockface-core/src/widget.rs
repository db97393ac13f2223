//! Host-facing widget contract and the clock widget
//!
//! A host embeds a [`Widget`] in its layout and forwards four things to it:
//! size changes, paint requests (with a surface and a scheduler), fired
//! scheduler tasks, and attach/detach notifications.

use log::debug;

use crate::config::ClockConfig;
use crate::error::ClockError;
use crate::geometry::DialGeometry;
use crate::painter::Painter;
use crate::refresh::{RefreshDriver, Scheduler, TaskId};
use crate::surface::Surface;
use crate::time::WallClock;

/// Lifecycle and rendering contract between a host and a self-refreshing widget.
///
/// All calls happen on the host's UI thread.
pub trait Widget {
    /// The widget was laid out at a new size.
    fn on_layout_changed(&mut self, width: u32, height: u32);

    /// Paint one frame, then schedule the next refresh.
    fn on_paint<S, K>(&mut self, surface: &mut S, scheduler: &mut K) -> Result<(), S::Error>
    where
        S: Surface,
        K: Scheduler + ?Sized;

    /// A scheduled task fired. Returns `true` if the host should repaint.
    fn on_refresh(&mut self, task: TaskId) -> bool;

    /// The widget (re)entered the visible hierarchy.
    fn on_attach(&mut self) {}

    /// The widget is leaving; no paint may be requested after this.
    fn on_detach<K: Scheduler + ?Sized>(&mut self, scheduler: &mut K);
}

/// Analog clock widget.
///
/// Owns its dial geometry, painter styles and refresh driver; borrows the
/// surface and scheduler only for the duration of a call.
pub struct ClockWidget<C> {
    clock: C,
    geometry: DialGeometry,
    painter: Painter,
    refresh: RefreshDriver,
}

impl<C: WallClock> ClockWidget<C> {
    /// Build a widget, validating `config` first.
    pub fn new(clock: C, config: &ClockConfig) -> Result<Self, ClockError> {
        config.validate()?;
        Ok(Self {
            clock,
            geometry: DialGeometry::new(),
            painter: Painter::new(config),
            refresh: RefreshDriver::new(config.refresh_period()),
        })
    }

    /// Build a widget with the reference look.
    pub fn with_defaults(clock: C) -> Self {
        let config = ClockConfig::default();
        Self {
            clock,
            geometry: DialGeometry::new(),
            painter: Painter::new(&config),
            refresh: RefreshDriver::new(config.refresh_period()),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn geometry(&self) -> &DialGeometry {
        &self.geometry
    }

    pub fn painter(&self) -> &Painter {
        &self.painter
    }

    pub fn refresh(&self) -> &RefreshDriver {
        &self.refresh
    }
}

impl<C: WallClock> Widget for ClockWidget<C> {
    fn on_layout_changed(&mut self, width: u32, height: u32) {
        if !self.geometry.reconfigure(width, height) {
            debug!("Layout {}x{} keeps current dial", width, height);
        }
    }

    fn on_paint<S, K>(&mut self, surface: &mut S, scheduler: &mut K) -> Result<(), S::Error>
    where
        S: Surface,
        K: Scheduler + ?Sized,
    {
        if self.refresh.is_cancelled() {
            debug!("Widget detached, skipping paint");
            return Ok(());
        }

        let time = self.clock.now();
        let result = self.painter.paint(surface, &self.geometry, time);
        // Keep ticking even if this frame failed to draw.
        self.refresh.arm(scheduler);
        result
    }

    fn on_refresh(&mut self, task: TaskId) -> bool {
        self.refresh.deliver(task)
    }

    fn on_attach(&mut self) {
        self.refresh.resume();
    }

    fn on_detach<K: Scheduler + ?Sized>(&mut self, scheduler: &mut K) {
        self.refresh.cancel(scheduler);
    }
}
