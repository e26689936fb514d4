//! Arena that owns every live point and line.
//!
//! Points keep insertion order and are addressed by position for removal;
//! their positions are only stable between mutations. Lines are keyed by
//! [`LineId`] and reference their endpoints by [`PointId`], so there are no
//! ownership cycles between the two. An id-to-position index keeps
//! endpoint lookups constant-time and is refreshed on every removal.

use std::collections::{BTreeMap, HashMap};

use glam::Vec2;
use rand::Rng;
use tracing::debug;

use crate::{
    age::shared_birth_age,
    color::Rgba,
    line::Line,
    point::Point,
    random::random_index,
    surface::Surface,
    types::{LineId, PointId},
};

#[derive(Debug, Default)]
pub struct SceneRegistry {
    points: Vec<Point>,
    lines: BTreeMap<LineId, Line>,
    index: HashMap<PointId, usize>,
    next_point_id: u64,
    next_line_id: u64,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a newborn point and returns its id.
    pub fn add_point(&mut self, pos: Vec2, radius: f32, color: Rgba) -> PointId {
        let id = PointId(self.next_point_id);
        self.next_point_id += 1;
        self.index.insert(id, self.points.len());
        self.points.push(Point::new(id, pos, radius, color));
        id
    }

    /// Creates a line between the points at positions `first` and `second`
    /// and attaches it to both.
    ///
    /// Out-of-range positions and `first == second` are no-ops.
    pub fn connect(&mut self, first: usize, second: usize, color: Rgba) -> Option<LineId> {
        if first == second || first >= self.points.len() || second >= self.points.len() {
            return None;
        }

        let id = LineId(self.next_line_id);
        self.next_line_id += 1;

        let a = self.points[first].id;
        let b = self.points[second].id;
        self.lines.insert(id, Line::new(id, a, b, color));
        self.points[first].attach_line(id);
        self.points[second].attach_line(id);
        Some(id)
    }

    /// Removes the point at position `index` together with its lines.
    ///
    /// Every incident line id is detached from every other live point and
    /// the line is dropped from the arena. Out-of-range indices are a no-op.
    pub fn remove_point(&mut self, index: usize) -> Option<Point> {
        if index >= self.points.len() {
            return None;
        }

        let point = self.points.remove(index);
        self.index.remove(&point.id);
        for (pos, shifted) in self.points.iter().enumerate().skip(index) {
            self.index.insert(shifted.id, pos);
        }
        for &line in &point.lines {
            for other in &mut self.points {
                other.detach_line(line);
            }
            self.lines.remove(&line);
        }
        Some(point)
    }

    /// Removes every expired point, cascading to its lines.
    ///
    /// Walks from the back so that removals never shift positions that are
    /// still to be visited. Returns the number of points removed.
    pub fn sweep_expired(&mut self) -> usize {
        let mut removed = 0;
        for i in (0..self.points.len()).rev() {
            if self.points[i].is_expired() && self.remove_point(i).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            debug!(removed, live = self.points.len(), "swept expired points");
        }
        removed
    }

    /// Ages and draws the point at position `index`.
    ///
    /// Returns whether it was drawn; `false` for expired points and
    /// out-of-range positions.
    pub fn tick_point(&mut self, index: usize, surface: &mut impl Surface) -> bool {
        match self.points.get_mut(index) {
            Some(p) => p.tick(surface),
            None => false,
        }
    }

    /// Ages and draws the line `id`, growing it toward the shared birth age
    /// of its endpoints.
    pub fn tick_line(&mut self, id: LineId, surface: &mut impl Surface) -> bool {
        let Some(line) = self.lines.get(&id) else {
            return false;
        };
        let [a, b] = line.endpoints;
        let (Some(a), Some(b)) = (self.point(a), self.point(b)) else {
            return false;
        };
        let ceiling = shared_birth_age(a.life, b.life);
        let (from, to) = (a.pos, b.pos);

        match self.lines.get_mut(&id) {
            Some(line) => line.tick(ceiling, from, to, surface),
            None => false,
        }
    }

    /// Position of the endpoint of `line` opposite the point at `index`.
    ///
    /// `None` when the line does not touch that point or its other endpoint
    /// is gone.
    pub fn other_endpoint_index(&self, line: LineId, index: usize) -> Option<usize> {
        let id = self.points.get(index)?.id;
        let line = self.lines.get(&line)?;
        let [a, b] = line.endpoints;
        let other = match (a == id, b == id) {
            (true, false) => b,
            (false, true) => a,
            _ => return None,
        };
        self.index_of(other)
    }

    /// Picks the position of a uniformly random live point.
    pub fn random_index(&self, rng: &mut impl Rng) -> Option<usize> {
        random_index(rng, self.points.len())
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Live points in registry order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn point_at(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn point_at_mut(&mut self, index: usize) -> Option<&mut Point> {
        self.points.get_mut(index)
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.index.get(&id).and_then(|&i| self.points.get(i))
    }

    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }
}
