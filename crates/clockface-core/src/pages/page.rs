//! Core page abstraction for embedded-graphics hosts.
//!
//! A [`Page`] is a full-screen (or full-region) view that owns its layout,
//! dirty tracking and timers. The host loop calls these methods in a
//! well-defined order each frame:
//!
//! 1. **`on_activate`**: once, when the page becomes visible.
//! 2. **`update`**: once per frame with the current time, to fire timers.
//! 3. **`draw_page`**: when `is_dirty()` is true, followed by `mark_clean`.
//! 4. **`on_deactivate`**: once, when the page is torn down or hidden.

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Trait that all hosted pages implement.
pub trait Page {
    /// Human-readable title (may appear in headers or debug logs).
    fn title(&self) -> &str;

    /// Called once when this page becomes the active page.
    fn on_activate(&mut self) {}

    /// Called once when this page is no longer the active page.
    fn on_deactivate(&mut self) {}

    /// Advance timers to `now` and mark the page dirty if anything fired.
    fn update(&mut self, now: Instant);

    /// Render the entire page to the given display target.
    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D)
    -> Result<(), D::Error>;

    /// Bounding rectangle of this page.
    fn bounds(&self) -> Rectangle;

    /// Whether the page needs redrawing.
    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);
}
