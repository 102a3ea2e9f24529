use crate::error::{MeshError, Result};
use crate::math::Vector3;
use crate::mesh::{Mesh, VertexMask};
use crate::normals::read_corner_normals;

use super::NormalOperation;

/// Assigns one normal to an explicit list of corners.
///
/// This is the write primitive behind typing or pasting a direction once the
/// caller has decided which corners the active element covers. Corners of
/// masked vertices are skipped.
#[derive(Debug, Clone)]
pub struct SetAtCorners {
    normal: Vector3,
    corners: Vec<usize>,
    mask: VertexMask,
}

impl SetAtCorners {
    /// Creates a new `SetAtCorners` operation with nothing masked.
    #[must_use]
    pub fn new(normal: Vector3, corners: Vec<usize>) -> Self {
        Self {
            normal,
            corners,
            mask: VertexMask::none(),
        }
    }

    /// Excludes corners of masked vertices.
    #[must_use]
    pub fn with_mask(mut self, mask: VertexMask) -> Self {
        self.mask = mask;
        self
    }

    /// The corners this operation targets.
    #[must_use]
    pub fn corners(&self) -> &[usize] {
        &self.corners
    }
}

impl NormalOperation for SetAtCorners {
    fn name(&self) -> &'static str {
        "set at corners"
    }

    fn execute(&self, mesh: &Mesh) -> Result<Vec<Vector3>> {
        mesh.validate()?;
        let mut normals = read_corner_normals(mesh);
        for &corner in &self.corners {
            let Some(c) = mesh.corners.get(corner) else {
                return Err(MeshError::InvalidMesh(format!(
                    "corner {corner} of {}",
                    mesh.corner_count()
                ))
                .into());
            };
            if !self.mask.is_masked(c.vertex) {
                normals[corner] = self.normal;
            }
        }
        Ok(normals)
    }
}
