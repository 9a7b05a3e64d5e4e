use thiserror::Error;

use crate::math::Point3;

/// Top-level error type for sphere fitting.
#[derive(Debug, Error)]
pub enum SphereFitError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("sphere radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),

    #[error("non-finite coordinate in point {0}")]
    NonFinitePoint(Point3),
}

/// Errors related to the point input of a computation.
#[derive(Debug, Error)]
pub enum InputError {
    /// A required input is absent.
    #[error("missing input: {0}")]
    Missing(&'static str),

    /// Not enough points to fit a sphere.
    ///
    /// The center of mass is computed before the count is validated, so it
    /// travels with the error.
    #[error("at least {required} points are required, found {found}")]
    Insufficient {
        required: usize,
        found: usize,
        center_of_mass: Point3,
    },
}

/// Errors related to the geometry output target.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output target is not a valid geometry container: {0}")]
    InvalidTarget(String),
}

/// Errors related to module parameters.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors related to scene node handles.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("control point index {index} is out of range for {count} points")]
    PointIndexOutOfRange { index: usize, count: usize },
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`SphereFitError`].
pub type Result<T> = std::result::Result<T, SphereFitError>;
