use crate::error::{GeometryError, Result};
use crate::math::{try_normalize, Vector3, DEGENERATE_EPSILON};
use crate::mesh::{Mesh, VertexMask};
use crate::normals::{read_corner_normals, read_vertex_normals};
use crate::topology::TopologyIndex;

use super::{editable_vertices, NormalOperation};

/// Averages each selected vertex normal with its 1-ring.
///
/// For every selected, unmasked vertex the sum of its own normal and its
/// neighbours' normals is normalized and written to all of its corners.
/// Vertex normals are sampled once up front, so the result does not depend
/// on the order vertices are visited. Vertices whose sum is degenerate are
/// skipped and logged.
#[derive(Debug, Clone, Default)]
pub struct Smooth {
    mask: VertexMask,
}

impl Smooth {
    /// Creates a new `Smooth` operation with nothing masked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Excludes masked vertices.
    #[must_use]
    pub fn with_mask(mut self, mask: VertexMask) -> Self {
        self.mask = mask;
        self
    }

    /// Computes the smoothed normal of every editable vertex.
    ///
    /// Degenerate vertices are left out of the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh holds stale references.
    pub fn vertex_targets(&self, mesh: &Mesh) -> Result<Vec<(usize, Vector3)>> {
        let index = TopologyIndex::build(mesh)?;
        Ok(self.targets_with(mesh, &index))
    }

    fn targets_with(&self, mesh: &Mesh, index: &TopologyIndex) -> Vec<(usize, Vector3)> {
        let vnormals = read_vertex_normals(mesh);

        let mut targets = Vec::new();
        for v in editable_vertices(mesh, &self.mask) {
            let sum = index
                .neighbors(v)
                .fold(vnormals[v], |acc, n| acc + vnormals[n]);
            match smoothed(v, &sum) {
                Ok(normal) => targets.push((v, normal)),
                Err(err) => tracing::warn!(%err, "skipping vertex"),
            }
        }
        targets
    }
}

impl NormalOperation for Smooth {
    fn name(&self) -> &'static str {
        "smooth"
    }

    fn execute(&self, mesh: &Mesh) -> Result<Vec<Vector3>> {
        let index = TopologyIndex::build(mesh)?;
        let mut normals = read_corner_normals(mesh);
        for (v, normal) in self.targets_with(mesh, &index) {
            for &corner in index.corners(v) {
                normals[corner] = normal;
            }
        }
        Ok(normals)
    }
}

fn smoothed(vertex: usize, sum: &Vector3) -> std::result::Result<Vector3, GeometryError> {
    try_normalize(sum, DEGENERATE_EPSILON).ok_or(GeometryError::DegenerateNormal {
        vertex,
        magnitude: sum.norm(),
    })
}
