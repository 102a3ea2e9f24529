use crate::error::HostError;
use crate::math::UnitQuaternion;
use crate::mesh::Mesh;

use super::{EditHost, InteractionMode, SelectMode};

/// An in-process host holding its own mesh and viewport state.
///
/// Useful for headless tools and for driving the engine in tests.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    pub mesh: Mesh,
    pub mode: InteractionMode,
    pub select_mode: SelectMode,
    pub active_vertex: Option<usize>,
    pub viewport: Option<UnitQuaternion>,
    pub object_rotation: UnitQuaternion,
    /// Mode switch requests to this mode are refused.
    pub refuse_mode: Option<InteractionMode>,
    /// Number of successful mode switches.
    pub mode_switches: usize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            mesh: Mesh::default(),
            mode: InteractionMode::Object,
            select_mode: SelectMode::Vertex,
            active_vertex: None,
            viewport: None,
            object_rotation: UnitQuaternion::identity(),
            refuse_mode: None,
            mode_switches: 0,
        }
    }
}

impl MemoryHost {
    /// Creates a host editing `mesh` in vertex mode with an identity viewport.
    #[must_use]
    pub fn editing(mesh: Mesh) -> Self {
        Self {
            mesh,
            mode: InteractionMode::Edit,
            viewport: Some(UnitQuaternion::identity()),
            ..Self::default()
        }
    }
}

impl EditHost for MemoryHost {
    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    fn interaction_mode(&self) -> InteractionMode {
        self.mode
    }

    fn set_interaction_mode(&mut self, mode: InteractionMode) -> Result<(), HostError> {
        if self.refuse_mode == Some(mode) {
            return Err(HostError::ModeSwitch(format!("{mode:?} mode unavailable")));
        }
        self.mode = mode;
        self.mode_switches += 1;
        Ok(())
    }

    fn select_mode(&self) -> SelectMode {
        self.select_mode
    }

    fn active_vertex(&self) -> Option<usize> {
        self.active_vertex
    }

    fn viewport_rotation(&self) -> Option<UnitQuaternion> {
        self.viewport
    }

    fn object_rotation(&self) -> UnitQuaternion {
        self.object_rotation
    }
}
