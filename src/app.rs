//! The sample-render cycle.
//!
//! One thread, one loop: drain events, sample, lay out, draw, pause. The pause
//! is the only place the loop waits, so a close request is noticed at most one
//! period after it arrives.

use std::{path::Path, thread, time::Duration};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use crate::config::ViewConfig;
use crate::error::{MonitorError, ResourceError};
use crate::layout::{compute_frame, max_value, Viewport};
use crate::source::{RateBounds, SourceSet};
use crate::surface::{Color, Surface, SurfaceEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Initializing,
    Running,
    Closing,
    Terminated,
}

/// Blocks between cycles.
pub trait Pacer {
    fn pause(&mut self, period: Duration);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, period: Duration) {
        (**self).pause(period);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, period: Duration) {
        thread::sleep(period);
    }
}

pub struct Driver<S: Surface, P = ThreadPacer, R = ChaCha8Rng> {
    sources: SourceSet<R>,
    bounds: RateBounds,
    surface: S,
    font: S::Font,
    pacer: P,
    viewport: Viewport,
    margin: f64,
    label_size: f32,
    period: Duration,
    state: DriverState,
    cycles: u64,
}

impl<S: Surface, P: Pacer> Driver<S, P, ChaCha8Rng> {
    /// Startup sequence: sources, then surface, then font.
    ///
    /// A failure at any step is returned as-is; a surface that was already
    /// opened is closed before returning.
    pub fn initialize<O, L>(
        config: &ViewConfig,
        pacer: P,
        open_surface: O,
        load_font: L,
    ) -> Result<Self, MonitorError>
    where
        O: FnOnce(&ViewConfig) -> Result<S, ResourceError>,
        L: FnOnce(&Path) -> Result<S::Font, ResourceError>,
    {
        config.validate()?;
        let sources = SourceSet::create(config.source_count)?;
        let mut surface = open_surface(config)?;
        let font = match load_font(&config.font_path) {
            Ok(font) => font,
            Err(err) => {
                warn!(path = %config.font_path.display(), %err, "label font unavailable");
                surface.close();
                return Err(err.into());
            }
        };
        Self::new(config, sources, surface, font, pacer)
    }
}

impl<S: Surface, P: Pacer, R: Rng> Driver<S, P, R> {
    pub fn new(
        config: &ViewConfig,
        sources: SourceSet<R>,
        surface: S,
        font: S::Font,
        pacer: P,
    ) -> Result<Self, MonitorError> {
        config.validate()?;
        let bounds = config.rate_bounds()?;
        info!(
            sources = sources.len(),
            min_rate = bounds.min(),
            max_rate = bounds.max(),
            period_ms = config.period.as_millis() as u64,
            "driver initialized"
        );
        Ok(Self {
            sources,
            bounds,
            surface,
            font,
            pacer,
            viewport: config.viewport,
            margin: config.margin,
            label_size: config.label_size,
            period: config.period,
            state: DriverState::Initializing,
            cycles: 0,
        })
    }

    /// Runs cycles until the surface closes or a close is requested.
    /// Returns the number of completed cycles.
    pub fn run(&mut self) -> Result<u64, MonitorError> {
        self.transition(DriverState::Running);

        while self.state == DriverState::Running {
            if self.drain_events() || !self.surface.is_open() {
                self.transition(DriverState::Closing);
                break;
            }
            if let Err(err) = self.cycle() {
                self.shutdown();
                return Err(err.into());
            }
            self.pacer.pause(self.period);
        }

        self.shutdown();
        Ok(self.cycles)
    }

    /// One sample, layout, draw pass.
    pub fn cycle(&mut self) -> Result<(), ResourceError> {
        self.sources.sample_all(&self.bounds);
        let frame = compute_frame(self.sources.sources(), self.viewport, self.margin);

        self.surface.clear(Color::Black);
        for item in frame.items() {
            self.surface.draw_rect(item.rect, Color::Green);
            self.surface.draw_text(
                &item.label,
                &self.font,
                self.label_size,
                item.label_anchor,
                Color::White,
            );
        }
        self.surface.present()?;

        self.cycles += 1;
        debug!(
            cycle = self.cycles,
            max = max_value(self.sources.sources()),
            "cycle drawn"
        );
        Ok(())
    }

    // true if any pending event asked to close
    fn drain_events(&mut self) -> bool {
        let mut close = false;
        while let Some(event) = self.surface.poll_event() {
            trace!(?event, "surface event");
            match event {
                SurfaceEvent::CloseRequested => close = true,
            }
        }
        close
    }

    fn shutdown(&mut self) {
        if self.state == DriverState::Terminated {
            return;
        }
        self.transition(DriverState::Closing);
        self.surface.close();
        self.transition(DriverState::Terminated);
    }

    fn transition(&mut self, next: DriverState) {
        if self.state != next {
            info!(from = ?self.state, to = ?next, cycles = self.cycles, "driver state");
            self.state = next;
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn sources(&self) -> &SourceSet<R> {
        &self.sources
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
