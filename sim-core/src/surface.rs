//! The drawable surface the engine renders onto.
//!
//! Every draw call carries its complete style (color, width, glow), so a
//! surface never has to remember state between calls.

use glam::Vec2;

use crate::color::Rgba;

/// Soft halo drawn around a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    /// Blur radius in surface pixels.
    pub blur: f32,
    pub color: Rgba,
}

/// A 2D target the frame driver draws onto.
pub trait Surface {
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Rgba);

    /// Fills a disc centered on `center`.
    fn fill_disc(&mut self, center: Vec2, radius: f32, fill: Rgba, glow: Glow);

    /// Strokes a straight segment from `from` to `to`.
    fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, stroke: Rgba, glow: Glow);
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Disc {
        center: Vec2,
        radius: f32,
        fill: Rgba,
        glow: Glow,
    },
    Segment {
        from: Vec2,
        to: Vec2,
        width: f32,
        stroke: Rgba,
        glow: Glow,
    },
}

/// A surface that records draw calls for later replay.
///
/// Clearing drops everything recorded so far, so after a frame the list
/// holds exactly that frame's picture.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of recorded segments.
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Segment { .. }))
            .count()
    }

    /// Number of recorded discs.
    pub fn disc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: Rgba) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, fill: Rgba, glow: Glow) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            fill,
            glow,
        });
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, stroke: Rgba, glow: Glow) {
        self.commands.push(DrawCommand::Segment {
            from,
            to,
            width,
            stroke,
            glow,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glow() -> Glow {
        Glow {
            blur: 1.0,
            color: Rgba::new(0, 0, 0, 0.8),
        }
    }

    #[test]
    fn clear_discards_previous_commands() {
        let mut list = DrawList::new();
        let c = Rgba::new(1, 2, 3, 1.0);
        list.fill_disc(Vec2::ZERO, 1.0, c, glow());
        list.stroke_segment(Vec2::ZERO, Vec2::ONE, 2.0, c, glow());
        assert_eq!(list.len(), 2);

        let bg = Rgba::new(11, 13, 20, 1.0);
        list.clear(bg);
        assert_eq!(list.commands(), &[DrawCommand::Clear(bg)]);
    }

    #[test]
    fn counts_shapes_by_kind() {
        let mut list = DrawList::new();
        let c = Rgba::new(1, 2, 3, 1.0);
        list.clear(c);
        list.fill_disc(Vec2::ZERO, 1.0, c, glow());
        list.fill_disc(Vec2::ONE, 1.0, c, glow());
        list.stroke_segment(Vec2::ZERO, Vec2::ONE, 2.0, c, glow());

        assert_eq!(list.disc_count(), 2);
        assert_eq!(list.segment_count(), 1);
        assert!(!list.is_empty());
    }
}
