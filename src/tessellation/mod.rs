mod display_style;
mod tessellate_sphere;

pub use display_style::{
    DisplayStyle, MeshDescriptor, DEFAULT_COLOR, DEFAULT_SLICE_INTERSECTION_THICKNESS,
};
pub use tessellate_sphere::TessellateSphere;

use crate::math::{Point3, Vector3};

/// Default number of longitude subdivisions.
pub const DEFAULT_THETA_RESOLUTION: usize = 64;

/// Default number of latitude subdivisions.
pub const DEFAULT_PHI_RESOLUTION: usize = 64;

/// Smallest resolution that still encloses a volume.
pub const MIN_RESOLUTION: usize = 3;

/// Parameters controlling sphere tessellation density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessellationParams {
    /// Number of subdivisions around the polar axis.
    pub theta_resolution: usize,
    /// Number of points from pole to pole, both poles included.
    pub phi_resolution: usize,
}

impl TessellationParams {
    /// Creates tessellation parameters with explicit resolutions.
    #[must_use]
    pub fn new(theta_resolution: usize, phi_resolution: usize) -> Self {
        Self {
            theta_resolution,
            phi_resolution,
        }
    }
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self::new(DEFAULT_THETA_RESOLUTION, DEFAULT_PHI_RESOLUTION)
    }
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates over the corner positions of every triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.indices.iter().map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }
}
