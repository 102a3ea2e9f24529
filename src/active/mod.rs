//! Resolution of the normal shown and edited for the active vertex.

use crate::error::{MeshError, Result};
use crate::host::SelectMode;
use crate::math::Vector3;
use crate::mesh::Mesh;
use crate::normals::read_corner_normals;
use crate::topology::TopologyIndex;

/// The normal the type/paste controls operate on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveElement {
    /// Active vertex index.
    pub vertex: usize,
    /// Normal to display.
    pub normal: Vector3,
    /// Corner the normal was read from. `None` means a display-only
    /// fallback with no write target.
    pub corner: Option<usize>,
}

/// Resolves the active element from selection mode and display options.
#[derive(Debug, Clone, Copy)]
pub struct ResolveActive {
    select_mode: SelectMode,
    active_vertex: Option<usize>,
    split_index: Option<usize>,
}

impl ResolveActive {
    /// Creates a resolver in unsplit display mode.
    #[must_use]
    pub fn new(select_mode: SelectMode, active_vertex: Option<usize>) -> Self {
        Self {
            select_mode,
            active_vertex,
            split_index: None,
        }
    }

    /// Switches to split display; `index` picks which corner of the active
    /// vertex to show. `None` keeps unsplit display.
    #[must_use]
    pub fn with_split_index(mut self, index: Option<usize>) -> Self {
        self.split_index = index;
        self
    }

    /// Executes the resolution.
    ///
    /// Returns `Ok(None)` in edge mode or when nothing is active.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidMesh`] if the active vertex or any mesh
    /// reference is out of range.
    pub fn execute(&self, mesh: &Mesh) -> Result<Option<ActiveElement>> {
        let Some(vertex) = self.active_vertex else {
            return Ok(None);
        };
        if self.select_mode == SelectMode::Edge {
            return Ok(None);
        }
        let Some(geometric) = mesh.vertices.get(vertex).map(|v| v.normal) else {
            return Err(MeshError::InvalidMesh(format!(
                "active vertex {vertex} of {}",
                mesh.vertex_count()
            ))
            .into());
        };
        let fallback = ActiveElement {
            vertex,
            normal: geometric,
            corner: None,
        };
        if self.select_mode == SelectMode::Face {
            return Ok(Some(fallback));
        }

        let index = TopologyIndex::build(mesh)?;
        let bucket = index.corners(vertex);
        let corner = match self.split_index {
            Some(selector) => bucket.get(selector).copied(),
            None => bucket
                .iter()
                .copied()
                .find(|&c| mesh.corners[c].vertex == vertex),
        };
        let Some(corner) = corner else {
            return Ok(Some(fallback));
        };

        let normals = read_corner_normals(mesh);
        Ok(Some(ActiveElement {
            vertex,
            normal: normals[corner],
            corner: Some(corner),
        }))
    }
}
