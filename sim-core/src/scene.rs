//! A complete animated scene driven from a single thread.
//!
//! [`Scene`] owns the registry and both timers. The host calls
//! [`Scene::update`] with a monotonic clock as often as it likes; each call
//! runs the spawn timer, then the frame timer, so the two interleave
//! cooperatively and never observe each other half-way.

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::info;

use crate::{
    config::Config,
    error::ConfigError,
    frame::{FrameScheduler, FrameStats},
    registry::SceneRegistry,
    spawn::{SpawnBranch, SpawnOutcome, SpawnScheduler},
    surface::DrawList,
};

pub struct Scene<R: Rng> {
    config: Config,
    size: Vec2,
    registry: SceneRegistry,
    spawner: SpawnScheduler,
    frames: FrameScheduler,
    draw_list: DrawList,
    rng: R,
}

impl Scene<StdRng> {
    /// Builds a scene seeded from `config.seed`, or from the thread RNG when
    /// no seed is configured.
    pub fn from_config(config: Config, width: f32, height: f32) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::new(config, width, height, rng)
    }
}

impl<R: Rng> Scene<R> {
    /// Creates a stopped scene for a `width` x `height` surface.
    pub fn new(config: Config, width: f32, height: f32, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidSurface { width, height });
        }

        let spawner = SpawnScheduler::new(config.spawn_box(width, height));
        let frames = FrameScheduler::new(config.frame_pacing());
        Ok(Self {
            config,
            size: Vec2::new(width, height),
            registry: SceneRegistry::new(),
            spawner,
            frames,
            draw_list: DrawList::new(),
            rng,
        })
    }

    /// Starts both timers; the first spawn tick and frame are due at `now`.
    pub fn start(&mut self, now: Duration) {
        self.spawner.start(now);
        self.frames.start(now);
        info!(
            width = self.size.x,
            height = self.size.y,
            pacing = ?self.frames.pacing(),
            "scene started"
        );
    }

    /// Stops both timers. Live points and lines are kept.
    pub fn stop(&mut self) {
        self.spawner.stop();
        self.frames.stop();
        info!(
            points = self.registry.point_count(),
            lines = self.registry.line_count(),
            "scene stopped"
        );
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    /// Runs whatever is due at `now`: first a spawn tick, then a frame.
    ///
    /// Returns the frame statistics when a frame was rendered; the picture
    /// is then available from [`Scene::draw_list`].
    pub fn update(&mut self, now: Duration) -> Option<FrameStats> {
        self.spawner
            .tick(now, &mut self.registry, &self.config, &mut self.rng);
        self.frames.tick(
            now,
            &mut self.registry,
            &mut self.draw_list,
            self.config.background,
        )
    }

    /// Runs one spawn tick with the given branch, bypassing the timer.
    pub fn spawn(&mut self, branch: SpawnBranch) -> SpawnOutcome {
        self.spawner
            .run_branch(branch, &mut self.registry, &self.config, &mut self.rng)
    }

    /// Renders one frame immediately, bypassing the timer.
    pub fn render(&mut self) -> FrameStats {
        self.frames
            .render(&mut self.registry, &mut self.draw_list, self.config.background)
    }

    pub fn point_count(&self) -> usize {
        self.registry.point_count()
    }

    pub fn line_count(&self) -> usize {
        self.registry.line_count()
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// Draw calls of the last rendered frame.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Surface size the scene was built for.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames.frames()
    }
}
