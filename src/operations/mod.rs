//! Normal mutation algorithms.
//!
//! Each operation reads a fresh normal array from the mesh and returns a new
//! one; committing it is the caller's job (see [`crate::normals`]).

mod restore;
mod set_corners;
mod set_face;
mod set_uniform;
mod smooth;

pub use restore::Restore;
pub use set_corners::SetAtCorners;
pub use set_face::SetPerFace;
pub use set_uniform::SetUniform;
pub use smooth::Smooth;

use crate::error::Result;
use crate::math::Vector3;
use crate::mesh::{Mesh, VertexMask};

/// An operation producing a replacement corner normal array.
pub trait NormalOperation {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Computes the new corner normals without touching the mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh holds stale references.
    fn execute(&self, mesh: &Mesh) -> Result<Vec<Vector3>>;
}

/// Selected vertices that the mask does not exclude.
fn editable_vertices<'a>(mesh: &'a Mesh, mask: &'a VertexMask) -> impl Iterator<Item = usize> + 'a {
    mesh.selected_vertices().filter(|&v| !mask.is_masked(v))
}
