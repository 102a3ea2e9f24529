use super::Mesh;

/// Name of the vertex group used as the edit mask unless configured otherwise.
pub const DEFAULT_MASK_GROUP: &str = "smooth_normal_mask";

/// Per-vertex flags marking vertices excluded from normal edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexMask {
    masked: Vec<bool>,
}

impl VertexMask {
    /// A mask that excludes nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds a mask from per-vertex flags.
    #[must_use]
    pub fn from_flags(masked: Vec<bool>) -> Self {
        Self { masked }
    }

    /// Reads the mask from the named vertex group.
    ///
    /// A mesh without that group has nothing masked.
    #[must_use]
    pub fn from_group(mesh: &Mesh, group: &str) -> Self {
        let Some(members) = mesh.vertex_groups.get(group) else {
            return Self::none();
        };
        let mut masked = vec![false; mesh.vertex_count()];
        for &v in members {
            if let Some(flag) = masked.get_mut(v) {
                *flag = true;
            }
        }
        Self { masked }
    }

    /// Whether `vertex` is excluded from edits. Unknown vertices are not.
    #[must_use]
    pub fn is_masked(&self, vertex: usize) -> bool {
        self.masked.get(vertex).copied().unwrap_or(false)
    }

    /// Number of masked vertices.
    #[must_use]
    pub fn masked_count(&self) -> usize {
        self.masked.iter().filter(|&&m| m).count()
    }
}

impl Mesh {
    /// Adds every selected vertex to the named mask group, creating it if
    /// needed. Returns the number of vertices added.
    pub fn mask_selected(&mut self, group: &str) -> usize {
        let selected: Vec<usize> = self.selected_vertices().collect();
        let members = self.vertex_groups.entry(group.to_owned()).or_default();
        selected.into_iter().filter(|&v| members.insert(v)).count()
    }

    /// Removes every selected vertex from the named mask group. Returns the
    /// number of vertices removed; a missing group removes nothing.
    pub fn unmask_selected(&mut self, group: &str) -> usize {
        let selected: Vec<usize> = self.selected_vertices().collect();
        let Some(members) = self.vertex_groups.get_mut(group) else {
            return 0;
        };
        selected.into_iter().filter(|v| members.remove(v)).count()
    }
}
