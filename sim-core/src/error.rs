//! Error types for configuration loading and color parsing.
//!
//! The simulation itself never fails: out-of-range removals and
//! connections against an empty registry are silent no-ops. Only the
//! inputs that come from outside (config files, color strings) are
//! validated and reported.

use std::path::PathBuf;

use thiserror::Error;

/// A color string that is not of the form `rgba(r, g, b, a)` / `rgb(r, g, b)`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("expected `rgba(...)` or `rgb(...)`, got {0:?}")]
    BadSyntax(String),

    #[error("expected {expected} components, found {found} in {input:?}")]
    ComponentCount {
        input: String,
        expected: usize,
        found: usize,
    },

    #[error("channel {0:?} is not an integer in 0..=255")]
    InvalidChannel(String),

    #[error("alpha {0:?} is not a finite number")]
    InvalidAlpha(String),
}

/// Errors produced while loading or validating a [`crate::config::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("color palette must not be empty")]
    EmptyPalette,

    #[error("min_time ({min} ms) must not exceed max_time ({max} ms)")]
    InvalidTiming { min: u64, max: u64 },

    #[error("{field} ({value} ms) exceeds the limit of {limit} ms")]
    TimingTooLarge {
        field: &'static str,
        value: u64,
        limit: u64,
    },

    #[error("frame_rate must be positive with a representable frame interval, got {0}")]
    InvalidFrameRate(f32),

    #[error("spawn box [{0}, {1}, {2}, {3}] is empty or inverted")]
    InvalidBox(f32, f32, f32, f32),

    #[error("point size range {min}..{max} is invalid")]
    InvalidPointSize { min: f32, max: f32 },

    #[error("surface dimensions {width}x{height} must be positive")]
    InvalidSurface { width: f32, height: f32 },
}
