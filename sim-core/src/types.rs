use std::fmt;

/// Stable identifier for a [`crate::point::Point`].
///
/// Unlike a position in `SceneRegistry::points`, a `PointId` survives
/// removals of other points. Ids are handed out by a single
/// [`crate::registry::SceneRegistry`] and are only meaningful within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u64);

/// Identifier for a [`crate::line::Line`].
///
/// Monotonically increasing per registry and never reused, even after the
/// line has been removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}
