//! Dial geometry cache
//!
//! Tick endpoints depend only on the widget size, so they are computed once
//! per layout change and reused by every paint.
//!
//! # Coordinate system
//!
//! Surface coordinates have their origin at the top-left corner with `y`
//! growing downwards. Angles are measured in degrees from the positive
//! x-axis (3 o'clock) and grow clockwise on screen. Callers that think in
//! clock terms subtract 90° so that 0° points at 12 o'clock.

use libm::{cos, sin};
use log::debug;

use crate::constants::{TICK_COUNT, TICK_INNER_RATIO, TICK_STEP_DEG};

/// A point in surface pixels with sub-pixel precision
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: PointF) -> f32 {
        libm::hypotf(self.x - other.x, self.y - other.y)
    }

    /// Offset of `length` pixels from this point along `angle_deg`
    pub fn polar_offset(&self, angle_deg: f64, length: f64) -> PointF {
        let radians = angle_deg.to_radians();
        PointF::new(
            (self.x as f64 + length * cos(radians)) as f32,
            (self.y as f64 + length * sin(radians)) as f32,
        )
    }
}

/// One radial tick mark, from the inner ring out to the dial edge
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickSegment {
    /// Inner endpoint, on the circle of radius `0.95 * r`
    pub start: PointF,
    /// Outer endpoint, on the circle of radius `r`
    pub end: PointF,
}

/// Cached center, radius and tick segments for the current widget size.
///
/// The tick list always holds exactly [`TICK_COUNT`] segments; `ticks()[i]`
/// sits at `i * 6°` from 3 o'clock. Before the first
/// [`reconfigure`](Self::reconfigure) every segment is at the origin.
#[derive(Debug, Clone)]
pub struct DialGeometry {
    center: PointF,
    radius: f32,
    configured: bool,
    ticks: [TickSegment; TICK_COUNT],
}

impl Default for DialGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl DialGeometry {
    pub const fn new() -> Self {
        Self {
            center: PointF::new(0.0, 0.0),
            radius: 0.0,
            configured: false,
            ticks: [TickSegment {
                start: PointF::new(0.0, 0.0),
                end: PointF::new(0.0, 0.0),
            }; TICK_COUNT],
        }
    }

    /// Build a geometry already configured for the given size.
    pub fn with_size(width: u32, height: u32) -> Self {
        let mut geometry = Self::new();
        geometry.reconfigure(width, height);
        geometry
    }

    /// Recompute the dial for a new widget size.
    ///
    /// Returns `true` when the ticks were regenerated. If the new radius
    /// equals the cached one nothing changes, even when the other dimension
    /// moved (and with it the center).
    pub fn reconfigure(&mut self, width: u32, height: u32) -> bool {
        let radius = width.min(height) as f32 / 2.0;
        if self.configured && radius == self.radius {
            return false;
        }

        self.radius = radius;
        self.center = PointF::new(width as f32 / 2.0, height as f32 / 2.0);
        self.configured = true;

        let inner = (radius * TICK_INNER_RATIO) as f64;
        let outer = radius as f64;
        for (i, tick) in self.ticks.iter_mut().enumerate() {
            let degree = i as f64 * TICK_STEP_DEG;
            *tick = TickSegment {
                start: self.center.polar_offset(degree, inner),
                end: self.center.polar_offset(degree, outer),
            };
        }

        debug!(
            "Dial reconfigured for {}x{}: center ({}, {}), radius {}",
            width, height, self.center.x, self.center.y, self.radius
        );
        true
    }

    pub fn center(&self) -> PointF {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether [`reconfigure`](Self::reconfigure) has run at least once
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn ticks(&self) -> &[TickSegment; TICK_COUNT] {
        &self.ticks
    }

    pub fn tick(&self, index: usize) -> Option<&TickSegment> {
        self.ticks.get(index)
    }

    /// Point at `length_ratio * radius` from the center along `angle_deg`.
    pub fn point_at(&self, angle_deg: f32, length_ratio: f32) -> PointF {
        self.center
            .polar_offset(angle_deg as f64, self.radius as f64 * length_ratio as f64)
    }
}
