/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns the point halfway between `a` and `b`.
///
/// Halves before adding so finite inputs always give a finite result.
#[must_use]
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    Point3::from(a.coords / 2.0 + b.coords / 2.0)
}

/// Returns half the distance between `a` and `b`.
///
/// Scaled by the largest component so finite inputs never overflow.
#[must_use]
pub fn half_distance(a: &Point3, b: &Point3) -> f64 {
    let half = b.coords / 2.0 - a.coords / 2.0;
    let scale = half.amax();
    if scale <= 0.0 {
        return 0.0;
    }
    (half / scale).norm() * scale
}
