//! Spawn policy and its self-rescheduling timer.
//!
//! Every spawn tick either adds a new point (possibly linked to a random
//! existing one) or links two random existing points. After each tick the
//! next one is scheduled after a random delay in `[min_time, max_time]`.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::{
    config::{Config, SpawnBox},
    random::{random_index, random_int},
    registry::SceneRegistry,
    types::{LineId, PointId},
};

/// Chance that a tick adds a point when enough points are live.
pub const SPAWN_POINT_PROBABILITY: f64 = 0.3;
/// Below this many live points every tick adds a point.
pub const MIN_LIVE_POINTS: usize = 5;

/// Which of the two spawn actions a tick performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnBranch {
    NewPoint,
    ConnectExisting,
}

/// Result of one spawn tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    PointAdded {
        point: PointId,
        /// Line to the existing partner, if one was picked and compatible.
        line: Option<LineId>,
    },
    LineAdded(LineId),
    /// The picked points could not be linked.
    Skipped,
}

/// Picks the branch for a tick given the number of live points.
pub fn choose_branch(rng: &mut impl Rng, live: usize) -> SpawnBranch {
    if rng.random_bool(SPAWN_POINT_PROBABILITY) || live < MIN_LIVE_POINTS {
        SpawnBranch::NewPoint
    } else {
        SpawnBranch::ConnectExisting
    }
}

/// Adds a new point inside `spawn_box` and tries to link it to one
/// existing point picked at random.
///
/// The link is only made when the partner has the same color as the new
/// point, or when `cfg.connect_all` is set. An empty registry just gets
/// the new point.
pub fn spawn_point(
    registry: &mut SceneRegistry,
    cfg: &Config,
    spawn_box: &SpawnBox,
    rng: &mut impl Rng,
) -> SpawnOutcome {
    let Some(color_index) = random_index(rng, cfg.colors.len()) else {
        return SpawnOutcome::Skipped;
    };
    let color = cfg.colors[color_index];
    let pos = spawn_box.sample(rng);
    let radius = cfg.sample_point_size(rng);

    // Partner is picked among the points that existed before this one.
    let partner = registry.random_index(rng);
    let point = registry.add_point(pos, radius, color);
    let new_index = registry.point_count() - 1;

    let line = partner
        .filter(|&i| {
            cfg.connect_all || registry.point_at(i).is_some_and(|p| p.color == color)
        })
        .and_then(|i| registry.connect(new_index, i, color));

    SpawnOutcome::PointAdded { point, line }
}

/// Links two existing points picked independently at random.
///
/// Skips when the registry is empty, when both picks are the same point, or
/// when their colors differ and `cfg.connect_all` is off. The line takes the
/// first point's color.
pub fn connect_existing(
    registry: &mut SceneRegistry,
    cfg: &Config,
    rng: &mut impl Rng,
) -> SpawnOutcome {
    let (Some(a), Some(b)) = (registry.random_index(rng), registry.random_index(rng)) else {
        return SpawnOutcome::Skipped;
    };
    if a == b {
        return SpawnOutcome::Skipped;
    }
    let (Some(pa), Some(pb)) = (registry.point_at(a), registry.point_at(b)) else {
        return SpawnOutcome::Skipped;
    };
    if !cfg.connect_all && pa.color != pb.color {
        return SpawnOutcome::Skipped;
    }
    let color = pa.color;

    registry
        .connect(a, b, color)
        .map_or(SpawnOutcome::Skipped, SpawnOutcome::LineAdded)
}

/// Timer that fires spawn ticks at random intervals.
#[derive(Debug)]
pub struct SpawnScheduler {
    spawn_box: SpawnBox,
    next_due: Option<Duration>,
    ticks: u64,
}

impl SpawnScheduler {
    /// Creates a stopped scheduler placing points in `spawn_box`.
    pub fn new(spawn_box: SpawnBox) -> Self {
        Self {
            spawn_box,
            next_due: None,
            ticks: 0,
        }
    }

    /// Makes the first tick due immediately at `now`.
    pub fn start(&mut self, now: Duration) {
        info!(?now, "spawn scheduler started");
        self.next_due = Some(now);
    }

    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            info!(ticks = self.ticks, "spawn scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next tick fires, if running.
    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    pub fn spawn_box(&self) -> &SpawnBox {
        &self.spawn_box
    }

    /// Ticks fired since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns whether a tick is due at `now`, scheduling the next one after
    /// a random delay in `[cfg.min_time, cfg.max_time]` if so.
    pub fn poll(&mut self, now: Duration, cfg: &Config, rng: &mut impl Rng) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let (min, max) = cfg.spawn_delay_range();
                let delay = random_int(rng, min, max);
                self.next_due = Some(now.saturating_add(Duration::from_millis(delay)));
                true
            }
            _ => false,
        }
    }

    /// Runs a spawn tick if one is due at `now`.
    pub fn tick(
        &mut self,
        now: Duration,
        registry: &mut SceneRegistry,
        cfg: &Config,
        rng: &mut impl Rng,
    ) -> Option<SpawnOutcome> {
        if self.poll(now, cfg, rng) {
            Some(self.run(registry, cfg, rng))
        } else {
            None
        }
    }

    /// Runs one spawn tick regardless of the timer.
    pub fn run(
        &mut self,
        registry: &mut SceneRegistry,
        cfg: &Config,
        rng: &mut impl Rng,
    ) -> SpawnOutcome {
        let branch = choose_branch(rng, registry.point_count());
        self.run_branch(branch, registry, cfg, rng)
    }

    /// Runs one spawn tick with a fixed branch.
    pub fn run_branch(
        &mut self,
        branch: SpawnBranch,
        registry: &mut SceneRegistry,
        cfg: &Config,
        rng: &mut impl Rng,
    ) -> SpawnOutcome {
        self.ticks += 1;
        let outcome = match branch {
            SpawnBranch::NewPoint => spawn_point(registry, cfg, &self.spawn_box, rng),
            SpawnBranch::ConnectExisting => connect_existing(registry, cfg, rng),
        };
        debug!(
            ?branch,
            ?outcome,
            points = registry.point_count(),
            lines = registry.line_count(),
            "spawn tick"
        );
        outcome
    }
}
