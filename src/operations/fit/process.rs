use tracing::debug;

use crate::error::{InputError, Result};
use crate::geometry::Sphere;
use crate::math::Point3;
use crate::source::PointSource;
use crate::tessellation::{DisplayStyle, MeshDescriptor, TessellateSphere, TessellationParams};

use super::{CenterOfMass, FitSphere, MIN_FIT_POINTS};

/// Everything produced by a successful [`Process`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    /// The sphere spanned by the first two points.
    pub sphere: Sphere,
    /// Mean of all input points.
    pub center_of_mass: Point3,
    /// Tessellated sphere with its display style.
    pub mesh: MeshDescriptor,
}

/// Runs center of mass, sphere fit and mesh generation over one point
/// snapshot.
///
/// The center of mass is computed before the point count is validated, so
/// an [`InputError::Insufficient`] failure still carries it. Nothing else is
/// returned on failure.
pub struct Process {
    image_threshold: f64,
    params: TessellationParams,
}

impl Process {
    /// Creates a new `Process` operation.
    ///
    /// `image_threshold` is applied as the opacity of the generated model.
    #[must_use]
    pub fn new(image_threshold: f64) -> Self {
        Self {
            image_threshold,
            params: TessellationParams::default(),
        }
    }

    /// Sets custom tessellation parameters.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// - [`InputError::Missing`] if `source` is `None`.
    /// - [`InputError::Insufficient`] if fewer than two points are available.
    /// - A parameter error if the opacity is outside `[0, 1]`.
    /// - A tessellation error if the resolution is invalid.
    pub fn execute(&self, source: Option<&dyn PointSource>) -> Result<Processed> {
        let source = source.ok_or(InputError::Missing("input points"))?;

        let center_of_mass = CenterOfMass::new(source).execute();

        let found = source.count();
        if found < MIN_FIT_POINTS {
            return Err(InputError::Insufficient {
                required: MIN_FIT_POINTS,
                found,
                center_of_mass,
            }
            .into());
        }

        let sphere = FitSphere::new(source).execute()?;
        debug!(
            x = sphere.center().x,
            y = sphere.center().y,
            z = sphere.center().z,
            radius = sphere.radius(),
            "fitted sphere"
        );

        let style = DisplayStyle::with_opacity(self.image_threshold)?;
        let mesh = TessellateSphere::new(&sphere, self.params).execute()?;

        Ok(Processed {
            sphere,
            center_of_mass,
            mesh: MeshDescriptor::new(mesh, style),
        })
    }
}
