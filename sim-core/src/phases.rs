//! The per-frame phases of the scene.
//!
//! A frame always runs, in order:
//! 1. [`sweep_phase`]: expired points are removed, cascading to their lines.
//! 2. [`clear_phase`]: the surface is filled with the background color.
//! 3. [`draw_phase`]: every live point is aged and drawn in registry
//!    order; each line follows the later of its two endpoints.

use std::collections::HashSet;

use crate::{color::Rgba, registry::SceneRegistry, surface::Surface, types::LineId};

/// Removes expired points and their lines.
///
/// ### Returns
/// The number of points removed.
pub fn sweep_phase(registry: &mut SceneRegistry) -> usize {
    registry.sweep_expired()
}

/// Wipes the surface with `background`.
pub fn clear_phase(surface: &mut impl Surface, background: Rgba) {
    surface.clear(background);
}

/// Ages and draws every live point and line.
///
/// Points are ticked in registry order. A line is ticked once per frame,
/// right after the later of its two endpoints in that order, so its
/// segment lands above both discs. It is drawn when at least one endpoint
/// was drawn this frame; a line whose endpoints both stayed hidden keeps
/// its age.
///
/// ### Parameters
/// - `registry` - Points and lines to advance; ages are mutated.
/// - `surface` - Target for the draw calls.
///
/// ### Returns
/// The number of lines drawn.
pub fn draw_phase(registry: &mut SceneRegistry, surface: &mut impl Surface) -> usize {
    let mut seen: HashSet<LineId> = HashSet::with_capacity(registry.line_count());
    let mut visible = vec![false; registry.point_count()];
    let mut drawn = 0;

    for i in 0..registry.point_count() {
        visible[i] = registry.tick_point(i, surface);

        // Ticking a line never changes incident lists, so indexing is stable.
        let mut k = 0;
        while let Some(id) = registry.point_at(i).and_then(|p| p.lines.get(k).copied()) {
            k += 1;
            let Some(j) = registry.other_endpoint_index(id, i) else {
                continue;
            };
            let pending = j > i && registry.point_at(j).is_some_and(|p| !p.is_expired());
            if pending || !seen.insert(id) {
                continue;
            }
            let shown = visible[i] || (j < i && visible[j]);
            if shown && registry.tick_line(id, surface) {
                drawn += 1;
            }
        }
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        age::{LINE_GROW_STEP, Lifecycle, POINT_GROW_STEP},
        registry::tests::{assert_consistent, red},
        surface::{DrawCommand, DrawList},
    };
    use glam::Vec2;

    fn two_connected() -> (SceneRegistry, LineId) {
        let mut reg = SceneRegistry::new();
        reg.add_point(Vec2::new(0.0, 0.0), 5.0, red());
        reg.add_point(Vec2::new(10.0, 0.0), 5.0, red());
        let id = reg.connect(1, 0, red()).unwrap();
        (reg, id)
    }

    #[test]
    fn draw_phase_ticks_each_line_once() {
        let (mut reg, id) = two_connected();
        let mut list = DrawList::new();

        let drawn = draw_phase(&mut reg, &mut list);

        assert_eq!(drawn, 1);
        assert_eq!(list.disc_count(), 2);
        assert_eq!(list.segment_count(), 1);
        assert_eq!(reg.line(id).unwrap().life.age, LINE_GROW_STEP);
        for p in reg.points() {
            assert_eq!(p.life.age, POINT_GROW_STEP);
        }
    }

    fn kinds(list: &DrawList) -> Vec<&'static str> {
        list.commands()
            .iter()
            .map(|c| match c {
                DrawCommand::Clear(_) => "clear",
                DrawCommand::Disc { .. } => "disc",
                DrawCommand::Segment { .. } => "segment",
            })
            .collect()
    }

    #[test]
    fn line_is_painted_above_both_endpoint_discs() {
        let (mut reg, _) = two_connected();
        let mut list = DrawList::new();
        draw_phase(&mut reg, &mut list);
        assert_eq!(kinds(&list), vec!["disc", "disc", "segment"]);
    }

    #[test]
    fn line_follows_its_later_endpoint_in_registry_order() {
        let mut reg = SceneRegistry::new();
        for x in [0.0, 10.0, 20.0] {
            reg.add_point(Vec2::new(x, 0.0), 5.0, red());
        }
        reg.connect(0, 1, red()).unwrap();
        reg.connect(2, 0, red()).unwrap();
        let mut list = DrawList::new();

        assert_eq!(draw_phase(&mut reg, &mut list), 2);
        assert_eq!(kinds(&list), vec!["disc", "disc", "segment", "disc", "segment"]);
        for line in reg.lines() {
            assert_eq!(line.life.age, LINE_GROW_STEP);
        }
    }

    #[test]
    fn line_is_still_drawn_when_later_endpoint_expires_mid_frame() {
        let (mut reg, id) = two_connected();
        reg.point_at_mut(1).unwrap().life = Lifecycle {
            age: 0.0005,
            growing: false,
        };
        let mut list = DrawList::new();

        assert_eq!(draw_phase(&mut reg, &mut list), 1);
        assert_eq!(kinds(&list), vec!["disc", "segment"]);
        assert_eq!(reg.line(id).unwrap().life.age, LINE_GROW_STEP);
    }

    #[test]
    fn line_of_hidden_endpoints_keeps_its_age() {
        let (mut reg, id) = two_connected();
        for i in 0..2 {
            reg.point_at_mut(i).unwrap().life = Lifecycle {
                age: 0.0005,
                growing: false,
            };
        }
        let mut list = DrawList::new();

        assert_eq!(draw_phase(&mut reg, &mut list), 0);
        assert!(list.is_empty());
        assert_eq!(reg.line(id).unwrap().life.age, 0.0);
    }

    #[test]
    fn line_of_undrawn_point_is_drawn_from_other_endpoint() {
        let (mut reg, id) = two_connected();
        // First point expires during this frame's tick.
        reg.point_at_mut(0).unwrap().life = Lifecycle {
            age: 0.0005,
            growing: false,
        };
        let mut list = DrawList::new();

        assert_eq!(draw_phase(&mut reg, &mut list), 1);
        assert_eq!(list.disc_count(), 1);
        assert!(reg.line(id).is_some());
    }

    #[test]
    fn full_frame_removes_expired_point_before_drawing() {
        let (mut reg, id) = two_connected();
        let survivor = reg.point_at(1).unwrap().id;
        reg.point_at_mut(0).unwrap().life = Lifecycle {
            age: -0.001,
            growing: false,
        };
        let mut list = DrawList::new();
        let bg = Rgba::new(11, 13, 20, 1.0);

        assert_eq!(sweep_phase(&mut reg), 1);
        clear_phase(&mut list, bg);
        let drawn = draw_phase(&mut reg, &mut list);

        assert_eq!(drawn, 0);
        assert_eq!(reg.point_count(), 1);
        assert_eq!(reg.line_count(), 0);
        assert!(reg.line(id).is_none());
        assert!(!reg.point(survivor).unwrap().lines.contains(&id));
        assert_eq!(list.commands()[0], DrawCommand::Clear(bg));
        assert_eq!(list.disc_count(), 1);
        assert_consistent(&reg);
    }
}
