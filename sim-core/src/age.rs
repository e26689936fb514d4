//! Age model shared by points and lines.
//!
//! An element's age doubles as its rendered opacity and as its lifecycle
//! phase: it grows from `0` toward a ceiling, then decays, and once it drops
//! below `0` the element is expired.

use crate::color::Rgba;

/// Age gained per frame by a growing point.
pub const POINT_GROW_STEP: f32 = 0.005;
/// Age lost per frame by a decaying point.
pub const POINT_DECAY_STEP: f32 = 0.001;
/// Age gained per frame by a growing line.
pub const LINE_GROW_STEP: f32 = 0.005;
/// Age lost per frame by a decaying line; lines outlive their points a little.
pub const LINE_DECAY_STEP: f32 = 0.0005;
/// Ceiling a point grows to before it starts decaying.
pub const POINT_MAX_AGE: f32 = 1.0;
/// Opacity of the glow drawn around points and lines.
pub const GLOW_ALPHA: f32 = 0.8;

/// Age and phase of a point or line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lifecycle {
    pub age: f32,
    /// `true` while the age is still increasing.
    pub growing: bool,
}

impl Lifecycle {
    pub fn newborn() -> Self {
        Self {
            age: 0.0,
            growing: true,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age < 0.0
    }

    /// Advances the age by one frame.
    ///
    /// While growing, the age increases by `grow` and the phase flips to
    /// decaying as soon as it reaches `ceiling`. Afterwards the age only
    /// decreases by `decay`; the phase never flips back.
    pub fn step(&mut self, grow: f32, decay: f32, ceiling: f32) {
        if self.growing {
            self.age += grow;
            if self.age >= ceiling {
                self.growing = false;
            }
        } else {
            self.age -= decay;
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::newborn()
    }
}

/// Returns `base` with its alpha replaced by `age`. No clamping.
pub fn opacity_color(base: Rgba, age: f32) -> Rgba {
    base.with_alpha(age)
}

/// Age ceiling for a line that is still growing between `a` and `b`.
///
/// - neither endpoint growing: the smaller of the two ages;
/// - exactly one growing: the age of the one that is already decaying;
/// - both growing: `1`, there is no ceiling yet.
pub fn shared_birth_age(a: Lifecycle, b: Lifecycle) -> f32 {
    match (a.growing, b.growing) {
        (false, false) => a.age.min(b.age),
        (false, true) => a.age,
        (true, false) => b.age,
        (true, true) => 1.0,
    }
}
