use glam::Vec2;

use crate::{
    age::{GLOW_ALPHA, Lifecycle, POINT_DECAY_STEP, POINT_GROW_STEP, POINT_MAX_AGE, opacity_color},
    color::Rgba,
    surface::{Glow, Surface},
    types::{LineId, PointId},
};

/// Glow blur around a point, in surface pixels.
pub const POINT_GLOW_BLUR: f32 = 50.0;

/// A positioned, colored, aging dot.
///
/// `lines` holds the ids of incident lines; the lines themselves live in
/// the [`crate::registry::SceneRegistry`].
#[derive(Clone, Debug)]
pub struct Point {
    pub id: PointId,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub life: Lifecycle,
    pub lines: Vec<LineId>,
}

impl Point {
    pub fn new(id: PointId, pos: Vec2, radius: f32, color: Rgba) -> Self {
        Self {
            id,
            pos,
            radius,
            color,
            life: Lifecycle::newborn(),
            lines: Vec::with_capacity(4),
        }
    }

    /// Appends `line` to the incident list. Duplicates are not checked.
    pub fn attach_line(&mut self, line: LineId) {
        self.lines.push(line);
    }

    /// Removes the first incident line with id `line`.
    ///
    /// Returns `false` (and changes nothing) if the point does not hold it.
    pub fn detach_line(&mut self, line: LineId) -> bool {
        match self.lines.iter().position(|&l| l == line) {
            Some(i) => {
                self.lines.remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.life.is_expired()
    }

    /// Ages the point by one frame and draws it.
    ///
    /// Expired points are neither aged nor drawn. Returns whether the point
    /// was drawn, which is when its incident lines should be drawn too.
    pub fn tick(&mut self, surface: &mut impl Surface) -> bool {
        if self.is_expired() {
            return false;
        }
        self.life.step(POINT_GROW_STEP, POINT_DECAY_STEP, POINT_MAX_AGE);
        if self.is_expired() {
            return false;
        }

        let glow = Glow {
            blur: POINT_GLOW_BLUR,
            color: opacity_color(self.color, GLOW_ALPHA),
        };
        surface.fill_disc(
            self.pos,
            self.radius,
            opacity_color(self.color, self.life.age),
            glow,
        );
        true
    }
}
