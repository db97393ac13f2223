//! Desktop simulator for the clockface analog clock widget.
//!
//! Hosts a [`ClockPage`] on a `SimulatorDisplay`. Two modes:
//!
//! - `--frames N` renders N refresh periods headless and writes one PNG per
//!   frame into `--output`. The timeline is simulated, so this runs as fast
//!   as the frames can be encoded.
//! - Without `--frames`, and with the `sdl` feature enabled, the clock runs
//!   live in an SDL2 window.
//!
//! # Key bindings (window mode)
//!
//! | Key      | Action |
//! |----------|--------|
//! | Q / Esc  | Quit   |

mod clock;
mod config;

use std::fs;
use std::path::PathBuf;
use std::time::Duration as StdDuration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::info;

use clockface_core::pages::{ClockPage, Page};
use clockface_core::{ClockConfig, ClockWidget, TimeSample, WallClock};

use crate::clock::{LocalClock, SteppedClock, parse_time};

/// Command line options
#[derive(Parser, Debug)]
#[command(name = "clockface-simulator", about = "Render the clockface widget on the desktop")]
struct Args {
    /// Widget width in pixels
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Widget height in pixels
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Pixel scale factor for the output
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Render this many frames headless and exit
    #[arg(long)]
    frames: Option<u32>,

    /// Directory for headless PNG frames
    #[arg(long, default_value = "frames")]
    output: PathBuf,

    /// JSON clock config; omitted fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start the clock at a fixed time (HH:MM:SS) instead of local time
    #[arg(long, value_parser = parse_time)]
    time: Option<TimeSample>,
}

impl Args {
    fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.width, self.height))
    }
}

/// Offset of `now` from the timeline origin as a std duration
fn elapsed_since(origin: Instant, now: Instant) -> StdDuration {
    StdDuration::from_micros((now - origin).as_micros())
}

/// Render `frames` refresh periods to PNG files without opening a window.
fn run_headless(args: &Args, config: &ClockConfig, frames: u32) -> Result<()> {
    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let start = args.time.unwrap_or_else(|| LocalClock.now());
    let clock = SteppedClock::new(start);
    let widget = ClockWidget::new(&clock, config).map_err(|e| anyhow!("{}", e))?;

    let origin = Instant::from_ticks(0);
    let mut page: ClockPage<&SteppedClock> = ClockPage::new(args.bounds(), widget, origin);
    let mut display = SimulatorDisplay::<Rgb565>::new(page.bounds().size);
    let output_settings = OutputSettingsBuilder::new().scale(args.scale).build();

    let mut now = origin;
    for frame in 0..frames {
        clock.set_elapsed(elapsed_since(origin, now));
        page.update(now);

        if page.is_dirty() {
            display.clear(Rgb565::BLACK)?;
            page.draw_page(&mut display)?;
            page.mark_clean();
        }

        let path = args.output.join(format!("frame_{:04}.png", frame));
        display
            .to_rgb_output_image(&output_settings)
            .save_png(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} ({})", path.display(), clock.now());

        // Jump straight to the next refresh
        now = page
            .timers()
            .next_deadline()
            .unwrap_or_else(|| now + config.refresh_period());
    }

    page.on_deactivate();
    Ok(())
}

/// Target frame duration (~30 FPS).
#[cfg(feature = "sdl")]
const FRAME_DURATION: StdDuration = StdDuration::from_millis(33);

/// Run the clock live in an SDL2 window until the user quits.
#[cfg(feature = "sdl")]
fn run_window(args: &Args, config: &ClockConfig) -> Result<()> {
    use crate::clock::SimClock;
    use embedded_graphics_simulator::{SimulatorEvent, Window, sdl2::Keycode};

    let clock = match args.time {
        Some(start) => SimClock::Stepped(SteppedClock::new(start)),
        None => SimClock::Local(LocalClock),
    };
    let widget = ClockWidget::new(&clock, config).map_err(|e| anyhow!("{}", e))?;

    let origin = Instant::now();
    let mut page: ClockPage<&SimClock> = ClockPage::new(args.bounds(), widget, origin);
    let mut display = SimulatorDisplay::<Rgb565>::new(page.bounds().size);
    let output_settings = OutputSettingsBuilder::new().scale(args.scale).build();
    let mut window = Window::new("Clockface Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    display.clear(Rgb565::BLACK)?;
    page.draw_page(&mut display)?;
    page.mark_clean();
    window.update(&display);

    'running: loop {
        let frame_start = std::time::Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. }
                    if keycode == Keycode::Q || keycode == Keycode::Escape =>
                {
                    break 'running;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        if let SimClock::Stepped(stepped) = &clock {
            stepped.set_elapsed(elapsed_since(origin, now));
        }
        page.update(now);

        if page.is_dirty() {
            display.clear(Rgb565::BLACK)?;
            page.draw_page(&mut display)?;
            page.mark_clean();
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    page.on_deactivate();
    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn run_window(_args: &Args, _config: &ClockConfig) -> Result<()> {
    anyhow::bail!("window mode needs the `sdl` feature; pass --frames N to render headless")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("Starting clockface simulator");
    info!(
        "Widget: {}×{} (scale {}×)",
        args.width, args.height, args.scale
    );

    let config = config::load(args.config.as_deref())?;

    match args.frames {
        Some(frames) => run_headless(&args, &config, frames)?,
        None => run_window(&args, &config)?,
    }

    info!("Simulator exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["clockface-simulator"]).unwrap();
        assert_eq!((args.width, args.height, args.scale), (400, 400, 1));
        assert!(args.frames.is_none());
        assert_eq!(args.bounds().size, Size::new(400, 400));
    }

    #[test]
    fn test_zero_scale_rejected() {
        assert!(Args::try_parse_from(["clockface-simulator", "--scale", "0"]).is_err());
        let args = Args::try_parse_from(["clockface-simulator", "--scale", "2"]).unwrap();
        assert_eq!(args.scale, 2);
    }

    #[test]
    fn test_time_flag_parses() {
        let args = Args::try_parse_from(["clockface-simulator", "--time", "18:30:00"]).unwrap();
        assert_eq!(args.time, Some(TimeSample::new(6, 30, 0).unwrap()));
    }
}
