//! Core of the constellation animation: points that fade in and out inside
//! a box, and lines that link points of the same color.
//!
//! Main components:
//! - [`age`]: age/opacity model shared by points and lines.
//! - [`point`] / [`line`]: the aging elements.
//! - [`registry`]: arena owning every live point and line.
//! - [`spawn`]: spawn policy and its randomized timer.
//! - [`phases`]: per-frame sweep, clear and draw.
//! - [`frame`]: frame pacing and the frame driver.
//! - [`scene`]: single-threaded loop tying registry and timers together.
//! - [`surface`]: the drawing surface abstraction and a recording surface.
//! - [`config`]: scene configuration, defaults and TOML loading.
//! - [`color`], [`random`], [`types`], [`error`]: shared building blocks.

pub mod age;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod line;
pub mod phases;
pub mod point;
pub mod random;
pub mod registry;
pub mod scene;
pub mod spawn;
pub mod surface;
pub mod types;
