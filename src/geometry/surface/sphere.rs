use crate::error::{GeometryError, Result};
use crate::math::{half_distance, midpoint, Point3, Vector3};

use super::{Surface, SurfaceDomain};

/// A sphere described by its center and radius.
///
/// The polar axis is +Z and longitude `u = 0` lies along +X:
///
/// `P(u, v) = center + r * (cos(v) * cos(u), cos(v) * sin(u), sin(v))`
///
/// Parameters: `u` = longitude `[0, 2*pi)`, `v` = latitude `[-pi/2, pi/2]`.
///
/// A radius of zero is a valid degenerate sphere: every parameter pair
/// evaluates to the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is negative or not finite, or if the
    /// center has a non-finite coordinate.
    pub fn new(center: Point3, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::InvalidRadius(radius).into());
        }
        if !center.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinitePoint(center).into());
        }
        Ok(Self { center, radius })
    }

    /// Creates the sphere whose diameter is the segment `p0`–`p1`.
    ///
    /// The center is the midpoint and the radius is half the Euclidean
    /// distance. Coincident points give a zero radius.
    ///
    /// # Errors
    ///
    /// Returns an error if either point has a non-finite coordinate.
    pub fn from_diameter(p0: &Point3, p1: &Point3) -> Result<Self> {
        Self::new(midpoint(p0, p1), half_distance(p0, p1))
    }

    /// Returns the center of the sphere.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns `true` if the sphere has collapsed to a single point.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0
    }

    /// Returns the enclosed volume, `4/3 * pi * r^3`.
    #[must_use]
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * std::f64::consts::PI * self.radius.powi(3)
    }

    /// Returns the surface area, `4 * pi * r^2`.
    #[must_use]
    pub fn area(&self) -> f64 {
        4.0 * std::f64::consts::PI * self.radius * self.radius
    }
}

impl Surface for Sphere {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        self.center + self.normal(u, v) * self.radius
    }

    fn normal(&self, u: f64, v: f64) -> Vector3 {
        let cv = v.cos();
        Vector3::new(cv * u.cos(), cv * u.sin(), v.sin())
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(
            0.0,
            std::f64::consts::TAU,
            -std::f64::consts::FRAC_PI_2,
            std::f64::consts::FRAC_PI_2,
        )
    }
}
