use crate::error::Result;
use crate::math::Vector3;
use crate::mesh::{Mesh, VertexMask};
use crate::normals::read_corner_normals;
use crate::topology::TopologyIndex;

use super::{editable_vertices, NormalOperation};

/// Assigns one normal to every corner of every selected vertex.
#[derive(Debug, Clone)]
pub struct SetUniform {
    normal: Vector3,
    mask: VertexMask,
}

impl SetUniform {
    /// Creates a new `SetUniform` operation with nothing masked.
    #[must_use]
    pub fn new(normal: Vector3) -> Self {
        Self {
            normal,
            mask: VertexMask::none(),
        }
    }

    /// Excludes masked vertices.
    #[must_use]
    pub fn with_mask(mut self, mask: VertexMask) -> Self {
        self.mask = mask;
        self
    }
}

impl NormalOperation for SetUniform {
    fn name(&self) -> &'static str {
        "set uniform"
    }

    fn execute(&self, mesh: &Mesh) -> Result<Vec<Vector3>> {
        let index = TopologyIndex::build(mesh)?;
        let mut normals = read_corner_normals(mesh);
        for v in editable_vertices(mesh, &self.mask) {
            for &corner in index.corners(v) {
                normals[corner] = self.normal;
            }
        }
        Ok(normals)
    }
}
