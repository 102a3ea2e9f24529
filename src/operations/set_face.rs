use crate::error::Result;
use crate::math::Vector3;
use crate::mesh::{Mesh, VertexMask};
use crate::normals::read_corner_normals;

use super::NormalOperation;

/// Flat-shades selected polygons: each of their corners gets the polygon's
/// face normal.
///
/// Face selection is not filtered by vertex selection, but corners whose
/// vertex is masked keep their normal.
#[derive(Debug, Clone, Default)]
pub struct SetPerFace {
    mask: VertexMask,
}

impl SetPerFace {
    /// Creates a new `SetPerFace` operation with nothing masked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Excludes corners of masked vertices.
    #[must_use]
    pub fn with_mask(mut self, mask: VertexMask) -> Self {
        self.mask = mask;
        self
    }
}

impl NormalOperation for SetPerFace {
    fn name(&self) -> &'static str {
        "set face normal"
    }

    fn execute(&self, mesh: &Mesh) -> Result<Vec<Vector3>> {
        mesh.validate()?;
        let mut normals = read_corner_normals(mesh);
        for polygon in mesh.polygons.iter().filter(|p| p.select) {
            for corner in polygon.corners() {
                if !self.mask.is_masked(mesh.corners[corner].vertex) {
                    normals[corner] = polygon.normal;
                }
            }
        }
        Ok(normals)
    }
}
