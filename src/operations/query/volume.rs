use crate::tessellation::TriangleMesh;

/// Computes the volume enclosed by a closed triangle mesh.
///
/// Uses the signed tetrahedron method: for each triangle, computes
/// `(1/6) * v0 . (v1 x v2)` and sums over all triangles. The mesh must be
/// closed and consistently wound; the absolute value is returned.
pub struct Volume<'a> {
    mesh: &'a TriangleMesh,
}

impl<'a> Volume<'a> {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning the enclosed volume.
    #[must_use]
    pub fn execute(&self) -> f64 {
        let signed: f64 = self
            .mesh
            .triangles()
            .map(|[v0, v1, v2]| v0.coords.dot(&v1.coords.cross(&v2.coords)))
            .sum();
        signed.abs() / 6.0
    }
}
