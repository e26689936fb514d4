//! Frame driver: decides when a frame is due and runs the frame phases.

use std::time::Duration;

use tracing::trace;

use crate::{color::Rgba, phases, registry::SceneRegistry, surface::Surface};

/// How often frames are produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FramePacing {
    /// One frame per host refresh: every poll is a frame.
    Vsync,
    /// One frame per interval.
    Fixed(Duration),
}

impl FramePacing {
    /// Fixed pacing at `fps` frames per second.
    ///
    /// Returns `None` unless `fps` is positive and finite and its frame
    /// interval fits in a [`Duration`].
    pub fn fixed(fps: f32) -> Option<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return None;
        }
        Duration::try_from_secs_f32(1.0 / fps).ok().map(Self::Fixed)
    }
}

/// What one frame did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Points removed by the sweep.
    pub removed: usize,
    /// Points live after the sweep.
    pub points: usize,
    /// Lines live after the sweep.
    pub lines: usize,
    pub lines_drawn: usize,
}

#[derive(Debug)]
pub struct FrameScheduler {
    pacing: FramePacing,
    next_due: Option<Duration>,
    frames: u64,
}

impl FrameScheduler {
    /// Creates a stopped scheduler.
    pub fn new(pacing: FramePacing) -> Self {
        Self {
            pacing,
            next_due: None,
            frames: 0,
        }
    }

    /// Makes the first frame due at `now`.
    pub fn start(&mut self, now: Duration) {
        self.next_due = Some(now);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn pacing(&self) -> FramePacing {
        self.pacing
    }

    /// Frames rendered since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns whether a frame is due at `now`, scheduling the next one if so.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        match self.pacing {
            FramePacing::Vsync => true,
            FramePacing::Fixed(interval) => {
                if now < due {
                    return false;
                }
                self.next_due = Some(now.saturating_add(interval));
                true
            }
        }
    }

    /// Runs one frame: sweep, clear, draw.
    pub fn render(
        &mut self,
        registry: &mut SceneRegistry,
        surface: &mut impl Surface,
        background: Rgba,
    ) -> FrameStats {
        let removed = phases::sweep_phase(registry);
        phases::clear_phase(surface, background);
        let lines_drawn = phases::draw_phase(registry, surface);
        self.frames += 1;

        let stats = FrameStats {
            removed,
            points: registry.point_count(),
            lines: registry.line_count(),
            lines_drawn,
        };
        trace!(frame = self.frames, ?stats, "frame rendered");
        stats
    }

    /// Renders a frame if one is due at `now`.
    pub fn tick(
        &mut self,
        now: Duration,
        registry: &mut SceneRegistry,
        surface: &mut impl Surface,
        background: Rgba,
    ) -> Option<FrameStats> {
        if self.poll(now) {
            Some(self.render(registry, surface, background))
        } else {
            None
        }
    }
}
