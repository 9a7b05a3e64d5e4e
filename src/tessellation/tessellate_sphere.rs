use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::geometry::{Sphere, Surface};

use super::{TessellationParams, TriangleMesh, MIN_RESOLUTION};

/// Tessellates a sphere into a closed latitude/longitude triangle mesh.
///
/// Vertex layout: north pole, south pole, then `phi_resolution - 2` rings of
/// `theta_resolution` vertices ordered from north to south. The longitude
/// seam is shared, so the mesh is closed and has
/// `2 * theta * (phi - 2)` triangles, all wound counter-clockwise when seen
/// from outside.
pub struct TessellateSphere<'a> {
    sphere: &'a Sphere,
    params: TessellationParams,
}

impl<'a> TessellateSphere<'a> {
    /// Creates a new `TessellateSphere` operation.
    #[must_use]
    pub fn new(sphere: &'a Sphere, params: TessellationParams) -> Self {
        Self { sphere, params }
    }

    /// Executes the tessellation, returning a triangle mesh.
    ///
    /// A zero-radius sphere yields the same topology with every vertex at
    /// the center.
    ///
    /// # Errors
    ///
    /// Returns an error if either resolution is below [`MIN_RESOLUTION`] or
    /// the vertex count does not fit in 32-bit indices.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        let n_theta = self.params.theta_resolution;
        let n_phi = self.params.phi_resolution;
        if n_theta < MIN_RESOLUTION || n_phi < MIN_RESOLUTION {
            return Err(TessellationError::InvalidParameters(format!(
                "sphere resolution must be at least {MIN_RESOLUTION}x{MIN_RESOLUTION}, got {n_theta}x{n_phi}"
            ))
            .into());
        }

        let n_rings = n_phi - 2;
        let vertex_count = n_rings
            .checked_mul(n_theta)
            .and_then(|n| n.checked_add(2))
            .filter(|&n| u32::try_from(n).is_ok())
            .ok_or_else(|| {
                TessellationError::InvalidParameters(format!(
                    "sphere resolution {n_theta}x{n_phi} exceeds 32-bit vertex indices"
                ))
            })?;

        let mut mesh = TriangleMesh::default();
        mesh.vertices.reserve(vertex_count);
        mesh.normals.reserve(vertex_count);
        mesh.indices.reserve(2 * n_theta * n_rings);

        let surface = self.sphere;
        let domain = surface.domain();
        for v in [domain.v_max, domain.v_min] {
            mesh.vertices.push(surface.evaluate(domain.u_min, v));
            mesh.normals.push(surface.normal(domain.u_min, v));
        }

        // Rings, north to south
        let v_span = domain.v_max - domain.v_min;
        let u_span = domain.u_max - domain.u_min;
        for j in 1..=n_rings {
            let v = domain.v_max - v_span * j as f64 / (n_phi - 1) as f64;
            for i in 0..n_theta {
                let u = domain.u_min + u_span * i as f64 / n_theta as f64;
                mesh.vertices.push(surface.evaluate(u, v));
                mesh.normals.push(surface.normal(u, v));
            }
        }

        let index = |ring: usize, i: usize| -> u32 { ring_index(ring, i % n_theta, n_theta) };

        // Polar caps
        for i in 0..n_theta {
            mesh.indices.push([NORTH_POLE, index(0, i), index(0, i + 1)]);
        }
        for i in 0..n_theta {
            mesh.indices
                .push([SOUTH_POLE, index(n_rings - 1, i + 1), index(n_rings - 1, i)]);
        }

        // Bands between adjacent rings, two triangles per quad
        for ring in 0..n_rings - 1 {
            for i in 0..n_theta {
                let a0 = index(ring, i);
                let a1 = index(ring, i + 1);
                let b0 = index(ring + 1, i);
                let b1 = index(ring + 1, i + 1);
                mesh.indices.push([a0, b0, b1]);
                mesh.indices.push([a0, b1, a1]);
            }
        }

        debug!(
            radius = self.sphere.radius(),
            theta = n_theta,
            phi = n_phi,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "tessellated sphere"
        );

        Ok(mesh)
    }
}

const NORTH_POLE: u32 = 0;
const SOUTH_POLE: u32 = 1;

/// Index of vertex `i` in ring `ring`; bounds were checked against `u32`.
#[allow(clippy::cast_possible_truncation)]
fn ring_index(ring: usize, i: usize, n_theta: usize) -> u32 {
    (2 + ring * n_theta + i) as u32
}
