use tracing::info;

use crate::math::{Point3, Vector3};
use crate::source::PointSource;

/// Computes the arithmetic mean position of all points in a source.
///
/// Points are unweighted. An empty source yields the origin.
pub struct CenterOfMass<'a> {
    source: &'a dyn PointSource,
}

impl<'a> CenterOfMass<'a> {
    /// Creates a new `CenterOfMass` query.
    #[must_use]
    pub fn new(source: &'a dyn PointSource) -> Self {
        Self { source }
    }

    /// Executes the query, returning the mean point.
    #[must_use]
    pub fn execute(&self) -> Point3 {
        let center = self.mean();
        info!(
            source = self.source.name(),
            x = center.x,
            y = center.y,
            z = center.z,
            "center of mass"
        );
        center
    }

    /// Computes the mean point without emitting any event.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn mean(&self) -> Point3 {
        let count = self.source.count();
        if count == 0 {
            return Point3::origin();
        }

        let sum = (0..count)
            .filter_map(|i| self.source.point_at(i))
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / count as f64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::source::PointSet;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn empty_source_is_origin() {
        let set = PointSet::default();
        assert_eq!(CenterOfMass::new(&set).execute(), Point3::origin());
    }

    #[test]
    fn single_point_is_itself() {
        let pts = vec![p(1.5, -2.0, 8.25)];
        assert_eq!(CenterOfMass::new(&pts).execute(), p(1.5, -2.0, 8.25));
    }

    #[test]
    fn mean_of_points() {
        let pts = vec![p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), p(2.0, 6.0, -3.0)];
        let c = CenterOfMass::new(&pts).execute();
        assert_relative_eq!(c, p(4.0, 2.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn two_points_give_midpoint() {
        let pts = vec![p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)];
        assert_relative_eq!(CenterOfMass::new(&pts).execute(), p(5.0, 0.0, 0.0));
    }

    #[test]
    fn tail_order_does_not_change_mean_of_same_points() {
        let a = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 3.0, 0.0), p(-4.0, 1.0, 7.0)];
        let b = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(-4.0, 1.0, 7.0), p(2.0, 3.0, 0.0)];
        assert_relative_eq!(
            CenterOfMass::new(&a).execute(),
            CenterOfMass::new(&b).execute(),
            epsilon = 1e-12
        );
    }
}
