//! Reading and committing per-corner normals.

use crate::error::MeshError;
use crate::math::Vector3;
use crate::mesh::Mesh;

/// Returns one normal per corner.
///
/// With custom normals present these are the stored split normals; otherwise
/// every corner copies its vertex's geometric normal.
#[must_use]
pub fn read_corner_normals(mesh: &Mesh) -> Vec<Vector3> {
    if mesh.has_custom_normals() {
        mesh.corners.iter().map(|c| c.normal).collect()
    } else {
        mesh.corners
            .iter()
            .map(|c| {
                mesh.vertices
                    .get(c.vertex)
                    .map_or_else(Vector3::zeros, |v| v.normal)
            })
            .collect()
    }
}

/// Returns one normal per vertex.
///
/// With custom normals present, a vertex reports the last corner normal seen
/// for it while walking polygons in order. Vertices without corners keep
/// their geometric normal.
#[must_use]
pub fn read_vertex_normals(mesh: &Mesh) -> Vec<Vector3> {
    let mut normals: Vec<Vector3> = mesh.vertices.iter().map(|v| v.normal).collect();
    if !mesh.has_custom_normals() {
        return normals;
    }
    for polygon in &mesh.polygons {
        for corner in polygon.corners() {
            let Some(c) = mesh.corners.get(corner) else {
                continue;
            };
            if let Some(slot) = normals.get_mut(c.vertex) {
                *slot = c.normal;
            }
        }
    }
    normals
}

/// Replaces the whole corner normal array and marks the mesh as carrying
/// custom normals.
///
/// # Errors
///
/// Returns [`MeshError::ShapeMismatch`] if `normals` does not have one entry
/// per corner; nothing is written in that case.
pub fn write_corner_normals(mesh: &mut Mesh, normals: &[Vector3]) -> Result<(), MeshError> {
    if normals.len() != mesh.corner_count() {
        return Err(MeshError::ShapeMismatch {
            expected: mesh.corner_count(),
            actual: normals.len(),
        });
    }
    mesh.store_corner_normals(normals);
    tracing::debug!(
        corners = normals.len(),
        revision = mesh.normals_revision(),
        "committed corner normals"
    );
    Ok(())
}
