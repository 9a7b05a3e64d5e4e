//! Point inputs.
//!
//! A [`PointSource`] supplies an ordered sequence of 3D points. Order is
//! significant: the first two points define the fitted sphere. Sources may
//! be empty.

use crate::math::Point3;

/// Name reported by sources that carry no name of their own.
pub const UNNAMED_SOURCE: &str = "points";

/// An ordered, read-only supply of 3D points.
pub trait PointSource {
    /// Returns a human-readable name for diagnostics.
    fn name(&self) -> &str {
        UNNAMED_SOURCE
    }

    /// Returns the number of points.
    fn count(&self) -> usize;

    /// Returns the point at `index`, or `None` if out of range.
    fn point_at(&self, index: usize) -> Option<Point3>;

    /// Copies the current points into an owned [`PointSet`].
    fn snapshot(&self) -> PointSet {
        let points = (0..self.count()).filter_map(|i| self.point_at(i)).collect();
        PointSet::new(points).with_name(self.name())
    }
}

/// An owned, ordered snapshot of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    name: Option<String>,
    points: Vec<Point3>,
}

impl PointSet {
    /// Creates a point set from the given points, preserving order.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { name: None, points }
    }

    /// Sets the diagnostic name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<Point3> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl PointSource for PointSet {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_SOURCE)
    }

    fn count(&self) -> usize {
        self.points.len()
    }

    fn point_at(&self, index: usize) -> Option<Point3> {
        self.points.get(index).copied()
    }
}

impl PointSource for [Point3] {
    fn count(&self) -> usize {
        self.len()
    }

    fn point_at(&self, index: usize) -> Option<Point3> {
        self.get(index).copied()
    }
}

impl PointSource for Vec<Point3> {
    fn count(&self) -> usize {
        self.len()
    }

    fn point_at(&self, index: usize) -> Option<Point3> {
        self.get(index).copied()
    }
}
