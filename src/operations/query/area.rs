use crate::tessellation::TriangleMesh;

/// Computes the total surface area of a triangle mesh.
///
/// Sums the areas of all triangles. For a tessellated sphere this
/// approaches `4 * pi * r^2` from below as the resolution grows.
pub struct Area<'a> {
    mesh: &'a TriangleMesh,
}

impl<'a> Area<'a> {
    /// Creates a new `Area` query.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning the total surface area.
    #[must_use]
    pub fn execute(&self) -> f64 {
        self.mesh
            .triangles()
            .map(|[v0, v1, v2]| (v1 - v0).cross(&(v2 - v0)).norm() * 0.5)
            .sum()
    }
}
