use glam::Vec2;

use crate::{
    age::{GLOW_ALPHA, LINE_DECAY_STEP, LINE_GROW_STEP, Lifecycle, opacity_color},
    color::Rgba,
    surface::{Glow, Surface},
    types::{LineId, PointId},
};

/// Stroke width of a line, in surface pixels.
pub const LINE_WIDTH: f32 = 2.0;
/// Glow blur around a line, in surface pixels.
pub const LINE_GLOW_BLUR: f32 = 20.0;

/// A colored, aging connection between two points.
///
/// `endpoints` is ordered (first, second) for identity; drawing does not
/// care about the order.
#[derive(Clone, Debug)]
pub struct Line {
    pub id: LineId,
    pub endpoints: [PointId; 2],
    pub color: Rgba,
    pub life: Lifecycle,
}

impl Line {
    pub fn new(id: LineId, first: PointId, second: PointId, color: Rgba) -> Self {
        Self {
            id,
            endpoints: [first, second],
            color,
            life: Lifecycle::newborn(),
        }
    }

    /// Whether `point` is one of the endpoints.
    pub fn touches(&self, point: PointId) -> bool {
        self.endpoints.contains(&point)
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.life.is_expired()
    }

    /// Ages the line by one frame and strokes it from `from` to `to`.
    ///
    /// `ceiling` is the shared birth age of the two endpoints, see
    /// [`crate::age::shared_birth_age`]. Expired lines are skipped. Returns
    /// whether the line was drawn.
    pub fn tick(&mut self, ceiling: f32, from: Vec2, to: Vec2, surface: &mut impl Surface) -> bool {
        if self.is_expired() {
            return false;
        }
        self.life.step(LINE_GROW_STEP, LINE_DECAY_STEP, ceiling);

        let glow = Glow {
            blur: LINE_GLOW_BLUR,
            color: opacity_color(self.color, GLOW_ALPHA),
        };
        surface.stroke_segment(
            from,
            to,
            LINE_WIDTH,
            opacity_color(self.color, self.life.age),
            glow,
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList};

    fn line() -> Line {
        Line::new(LineId(7), PointId(1), PointId(2), Rgba::new(1, 2, 3, 1.0))
    }

    #[test]
    fn growing_line_stops_at_ceiling() {
        let mut l = line();
        let mut list = DrawList::new();

        // Ceiling just above one step: two steps are needed to flip.
        l.tick(0.008, Vec2::ZERO, Vec2::ONE, &mut list);
        assert!(l.life.growing);
        l.tick(0.008, Vec2::ZERO, Vec2::ONE, &mut list);
        assert!(!l.life.growing);

        let age = l.life.age;
        l.tick(1.0, Vec2::ZERO, Vec2::ONE, &mut list);
        assert!(!l.life.growing);
        assert!((l.life.age - (age - LINE_DECAY_STEP)).abs() < 1e-7);
    }

    #[test]
    fn tick_strokes_segment_between_endpoints() {
        let mut l = line();
        let mut list = DrawList::new();
        let a = Vec2::new(10.0, 20.0);
        let b = Vec2::new(30.0, 40.0);

        assert!(l.tick(1.0, a, b, &mut list));
        match &list.commands()[0] {
            DrawCommand::Segment {
                from,
                to,
                width,
                stroke,
                glow,
            } => {
                assert_eq!((*from, *to), (a, b));
                assert_eq!(*width, LINE_WIDTH);
                assert_eq!(stroke.a, LINE_GROW_STEP);
                assert_eq!(glow.color.a, GLOW_ALPHA);
                assert_eq!(glow.blur, LINE_GLOW_BLUR);
            }
            other => panic!("expected a segment, got {other:?}"),
        }
    }

    #[test]
    fn expired_line_is_skipped() {
        let mut l = line();
        l.life = Lifecycle {
            age: -0.01,
            growing: false,
        };
        let mut list = DrawList::new();

        assert!(!l.tick(1.0, Vec2::ZERO, Vec2::ONE, &mut list));
        assert_eq!(l.life.age, -0.01);
        assert!(list.is_empty());
    }

    #[test]
    fn touches_either_endpoint() {
        let l = line();
        assert!(l.touches(PointId(1)));
        assert!(l.touches(PointId(2)));
        assert!(!l.touches(PointId(3)));
    }
}
