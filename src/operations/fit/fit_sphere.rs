use crate::error::{InputError, Result};
use crate::geometry::Sphere;
use crate::source::PointSource;

use super::CenterOfMass;

/// Number of points needed to define a sphere by its diameter.
pub const MIN_FIT_POINTS: usize = 2;

/// Fits a sphere whose diameter is the segment between the first two points.
///
/// Only points 0 and 1 participate; any further points are ignored.
pub struct FitSphere<'a> {
    source: &'a dyn PointSource,
}

impl<'a> FitSphere<'a> {
    /// Creates a new `FitSphere` operation.
    #[must_use]
    pub fn new(source: &'a dyn PointSource) -> Self {
        Self { source }
    }

    /// Executes the fit. Emits no tracing events.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Insufficient`] if the source holds fewer than
    /// two points, or a geometry error if a point is not finite.
    pub fn execute(&self) -> Result<Sphere> {
        let found = self.source.count();
        let (Some(p0), Some(p1)) = (self.source.point_at(0), self.source.point_at(1)) else {
            return Err(InputError::Insufficient {
                required: MIN_FIT_POINTS,
                found,
                center_of_mass: CenterOfMass::new(self.source).mean(),
            }
            .into());
        };
        Sphere::from_diameter(&p0, &p1)
    }
}
