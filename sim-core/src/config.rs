//! Construction-time configuration of a scene.
//!
//! Every field is optional in a config file; missing keys take the values
//! of [`Config::default`].

use std::path::Path;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{color::Rgba, error::ConfigError, frame::FramePacing, random::random_real};

/// Inset of the default spawn box from each surface edge, in pixels.
pub const DEFAULT_BOX_INSET: f32 = 100.0;
/// Upper limit for `min_time` and `max_time`, in milliseconds.
pub const MAX_SPAWN_DELAY_MS: u64 = u32::MAX as u64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Surface width in pixels; unset means the host viewport.
    pub width: Option<f32>,
    /// Surface height in pixels; unset means the host viewport.
    pub height: Option<f32>,
    /// Frames per second; unset means the host's refresh signal.
    pub frame_rate: Option<f32>,
    /// Lower bound of the delay between spawn ticks, in milliseconds.
    pub min_time: u64,
    /// Upper bound of the delay between spawn ticks, in milliseconds.
    pub max_time: u64,
    pub colors: Vec<Rgba>,
    pub background: Rgba,
    /// `[xmin, ymin, xmax, ymax]` of the region points spawn in.
    #[serde(rename = "box")]
    pub spawn_box: Option<[f32; 4]>,
    pub randomize_point: bool,
    pub min_point_size: f32,
    pub max_point_size: f32,
    pub point_size: f32,
    /// Allow lines between points of different colors.
    pub connect_all: bool,
    /// Seed for a reproducible animation.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            frame_rate: None,
            min_time: 500,
            max_time: 2000,
            colors: vec![
                Rgba::new(180, 50, 60, 0.5),
                Rgba::new(30, 60, 200, 0.5),
                Rgba::new(26, 188, 156, 1.0),
                Rgba::new(46, 204, 113, 1.0),
                Rgba::new(52, 152, 219, 1.0),
                Rgba::new(155, 89, 182, 1.0),
                Rgba::new(241, 196, 15, 1.0),
                Rgba::new(230, 126, 34, 1.0),
                Rgba::new(231, 76, 60, 1.0),
                Rgba::new(149, 165, 166, 1.0),
                Rgba::new(236, 240, 241, 1.0),
            ],
            background: Rgba::new(11, 13, 20, 1.0),
            spawn_box: None,
            randomize_point: false,
            min_point_size: 3.0,
            max_point_size: 10.0,
            point_size: 5.0,
            connect_all: false,
            seed: None,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates the TOML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.min_time > self.max_time {
            return Err(ConfigError::InvalidTiming {
                min: self.min_time,
                max: self.max_time,
            });
        }
        for (field, value) in [("min_time", self.min_time), ("max_time", self.max_time)] {
            if value > MAX_SPAWN_DELAY_MS {
                return Err(ConfigError::TimingTooLarge {
                    field,
                    value,
                    limit: MAX_SPAWN_DELAY_MS,
                });
            }
        }
        if let Some(fps) = self.frame_rate
            && FramePacing::fixed(fps).is_none()
        {
            return Err(ConfigError::InvalidFrameRate(fps));
        }
        if let Some([x0, y0, x1, y1]) = self.spawn_box
            && !(x0 < x1 && y0 < y1)
        {
            return Err(ConfigError::InvalidBox(x0, y0, x1, y1));
        }
        if self.randomize_point {
            if !(self.min_point_size > 0.0 && self.min_point_size <= self.max_point_size) {
                return Err(ConfigError::InvalidPointSize {
                    min: self.min_point_size,
                    max: self.max_point_size,
                });
            }
        } else if !(self.point_size > 0.0) {
            return Err(ConfigError::InvalidPointSize {
                min: self.point_size,
                max: self.point_size,
            });
        }
        let w = self.width.unwrap_or(1.0);
        let h = self.height.unwrap_or(1.0);
        if !(w > 0.0 && h > 0.0) {
            return Err(ConfigError::InvalidSurface {
                width: w,
                height: h,
            });
        }
        Ok(())
    }

    /// Spawn region for a surface of the given size.
    ///
    /// Uses the configured box if any, otherwise the surface inset by
    /// [`DEFAULT_BOX_INSET`] on every side. An axis too short for the inset
    /// spans the whole surface instead.
    pub fn spawn_box(&self, width: f32, height: f32) -> SpawnBox {
        if let Some([x0, y0, x1, y1]) = self.spawn_box {
            return SpawnBox {
                min: Vec2::new(x0, y0),
                max: Vec2::new(x1, y1),
            };
        }
        let (x0, x1) = inset_span(width);
        let (y0, y1) = inset_span(height);
        SpawnBox {
            min: Vec2::new(x0, y0),
            max: Vec2::new(x1, y1),
        }
    }

    /// Fixed pacing for a configured frame rate, vsync otherwise. A frame
    /// rate that [`Config::validate`] rejects also falls back to vsync.
    pub fn frame_pacing(&self) -> FramePacing {
        self.frame_rate
            .and_then(FramePacing::fixed)
            .unwrap_or(FramePacing::Vsync)
    }

    /// `(min, max)` delay between spawn ticks in milliseconds.
    pub fn spawn_delay_range(&self) -> (u64, u64) {
        (self.min_time, self.max_time)
    }

    /// Radius for a new point under the configured size policy.
    pub fn sample_point_size(&self, rng: &mut impl Rng) -> f32 {
        if self.randomize_point {
            random_real(rng, self.min_point_size, self.max_point_size)
        } else {
            self.point_size
        }
    }
}

/// `0..len` shrunk by [`DEFAULT_BOX_INSET`] at both ends, or the full span
/// when that would leave nothing.
fn inset_span(len: f32) -> (f32, f32) {
    if len - 2.0 * DEFAULT_BOX_INSET > 0.0 {
        (DEFAULT_BOX_INSET, len - DEFAULT_BOX_INSET)
    } else {
        (0.0, len)
    }
}

/// Axis-aligned rectangle new points are placed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnBox {
    /// Uniform random position inside the box. A degenerate axis collapses
    /// to its minimum.
    pub fn sample(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            random_real(rng, self.min.x, self.max.x),
            random_real(rng, self.min.y, self.max.y),
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use rand::{SeedableRng, rngs::StdRng};
    use std::time::Duration;

    #[test]
    fn defaults_match_reference_values() {
        let cfg = Config::default();
        assert_eq!(cfg.spawn_delay_range(), (500, 2000));
        assert_eq!(cfg.colors.len(), 11);
        assert_eq!(cfg.background, Rgba::new(11, 13, 20, 1.0));
        assert_eq!(cfg.point_size, 5.0);
        assert!(!cfg.connect_all);
        assert_eq!(cfg.frame_pacing(), FramePacing::Vsync);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn default_box_is_inset_from_surface() {
        let b = Config::default().spawn_box(800.0, 600.0);
        assert_eq!(b.min, Vec2::new(100.0, 100.0));
        assert_eq!(b.max, Vec2::new(700.0, 500.0));
    }

    #[test]
    fn default_box_spans_short_axes_fully() {
        let cfg = Config::default();

        let b = cfg.spawn_box(150.0, 600.0);
        assert_eq!(b.min, Vec2::new(0.0, 100.0));
        assert_eq!(b.max, Vec2::new(150.0, 500.0));

        let b = cfg.spawn_box(200.0, 80.0);
        assert_eq!(b.min, Vec2::ZERO);
        assert_eq!(b.max, Vec2::new(200.0, 80.0));
    }

    #[test]
    fn small_surface_spreads_positions_over_surface() {
        let b = Config::default().spawn_box(150.0, 150.0);
        let mut rng = StdRng::seed_from_u64(12);
        let samples: Vec<Vec2> = (0..50).map(|_| b.sample(&mut rng)).collect();

        assert!(samples.iter().all(|p| b.contains(*p)));
        assert!(samples.iter().all(|p| p.x <= 150.0 && p.y <= 150.0));
        assert!(samples.iter().any(|p| *p != samples[0]));
    }

    #[test]
    fn sampled_positions_stay_in_box() {
        let mut cfg = Config::default();
        cfg.spawn_box = Some([10.0, 20.0, 30.0, 40.0]);
        let b = cfg.spawn_box(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            assert!(b.contains(b.sample(&mut rng)));
        }
    }

    #[test]
    fn point_size_policy() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut cfg = Config::default();
        assert_eq!(cfg.sample_point_size(&mut rng), 5.0);

        cfg.randomize_point = true;
        for _ in 0..200 {
            let r = cfg.sample_point_size(&mut rng);
            assert!((3.0..=10.0).contains(&r));
        }
    }

    #[test]
    fn parses_partial_toml_over_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            frame_rate = 30
            min_time = 100
            max_time = 200
            colors = ["rgba(10,20,30,.5)", "rgb(1, 2, 3)"]
            box = [0, 0, 50, 50]
            connect_all = true
            seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(cfg.frame_rate, Some(30.0));
        assert_eq!(cfg.spawn_delay_range(), (100, 200));
        assert_eq!(cfg.colors[0], Rgba::new(10, 20, 30, 0.5));
        assert_eq!(cfg.colors[1], Rgba::new(1, 2, 3, 1.0));
        assert_eq!(cfg.spawn_box, Some([0.0, 0.0, 50.0, 50.0]));
        assert!(cfg.connect_all);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.background, Config::default().background);
        assert_eq!(
            cfg.frame_pacing(),
            FramePacing::Fixed(Duration::from_secs_f32(1.0 / 30.0))
        );
    }

    #[test]
    fn rejects_invalid_configs() {
        assert!(matches!(
            Config::from_toml_str("colors = []"),
            Err(ConfigError::EmptyPalette)
        ));
        assert!(matches!(
            Config::from_toml_str("min_time = 10\nmax_time = 5"),
            Err(ConfigError::InvalidTiming { min: 10, max: 5 })
        ));
        assert!(matches!(
            Config::from_toml_str("frame_rate = 0"),
            Err(ConfigError::InvalidFrameRate(_))
        ));
        assert!(matches!(
            Config::from_toml_str("frame_rate = 1e-30"),
            Err(ConfigError::InvalidFrameRate(_))
        ));
        assert!(matches!(
            Config::from_toml_str("max_time = 9223372036854775807"),
            Err(ConfigError::TimingTooLarge {
                field: "max_time",
                ..
            })
        ));
        assert!(matches!(
            Config::from_toml_str("min_time = 5000000000\nmax_time = 6000000000"),
            Err(ConfigError::TimingTooLarge {
                field: "min_time",
                ..
            })
        ));
        assert!(matches!(
            Config::from_toml_str("box = [10, 10, 5, 50]"),
            Err(ConfigError::InvalidBox(..))
        ));
        assert!(matches!(
            Config::from_toml_str("randomize_point = true\nmin_point_size = 9\nmax_point_size = 2"),
            Err(ConfigError::InvalidPointSize { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("background = \"blue\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml_str("width = -3"),
            Err(ConfigError::InvalidSurface { .. })
        ));
    }

    #[test]
    fn accepts_extreme_but_representable_values() {
        let cfg = Config::from_toml_str(&format!(
            "min_time = {MAX_SPAWN_DELAY_MS}\nmax_time = {MAX_SPAWN_DELAY_MS}\nframe_rate = 1e-9"
        ))
        .unwrap();
        assert!(matches!(cfg.frame_pacing(), FramePacing::Fixed(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
