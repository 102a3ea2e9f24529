use crate::error::Result;
use crate::math::Vector3;
use crate::mesh::{Mesh, VertexMask};
use crate::normals::read_corner_normals;
use crate::topology::TopologyIndex;

use super::{editable_vertices, NormalOperation};

/// Resets the corners of selected vertices to the geometric vertex normal,
/// discarding any split or custom override.
#[derive(Debug, Clone, Default)]
pub struct Restore {
    mask: VertexMask,
}

impl Restore {
    /// Creates a new `Restore` operation with nothing masked.
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
}

impl NormalOperation for Restore {
    fn name(&self) -> &'static str {
        "restore"
    }

    fn execute(&self, mesh: &Mesh) -> Result<Vec<Vector3>> {
        let index = TopologyIndex::build(mesh)?;
        let mut normals = read_corner_normals(mesh);
        for v in editable_vertices(mesh, &self.mask) {
            let geometric = mesh.vertices[v].normal;
            for &corner in index.corners(v) {
                normals[corner] = geometric;
            }
        }
        Ok(normals)
    }
}
