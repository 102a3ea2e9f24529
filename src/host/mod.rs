//! The boundary to the host application.
//!
//! The engine never reaches for global state: every command receives the
//! host as an explicit [`EditHost`] handle.

mod memory;

pub use memory::MemoryHost;

use crate::error::{HostError, Result};
use crate::math::UnitQuaternion;
use crate::mesh::Mesh;

/// Host interaction mode of the active object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Non-interactive representation; normal commits are only valid here.
    #[default]
    Object,
    /// Interactive mesh editing.
    Edit,
}

/// Mesh element selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    #[default]
    Vertex,
    Edge,
    Face,
}

/// Services the host application provides to the engine.
pub trait EditHost {
    /// The active object's mesh.
    fn mesh(&self) -> &Mesh;

    /// Mutable access to the active object's mesh.
    fn mesh_mut(&mut self) -> &mut Mesh;

    /// Current interaction mode.
    fn interaction_mode(&self) -> InteractionMode;

    /// Switches interaction mode.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::ModeSwitch`] if the host refuses the switch.
    fn set_interaction_mode(&mut self, mode: InteractionMode) -> std::result::Result<(), HostError>;

    /// Current element selection mode.
    fn select_mode(&self) -> SelectMode;

    /// Index of the active vertex, if any.
    fn active_vertex(&self) -> Option<usize>;

    /// Orientation of the visible 3D viewport, or `None` if no viewport is
    /// visible.
    fn viewport_rotation(&self) -> Option<UnitQuaternion>;

    /// World rotation of the active object.
    fn object_rotation(&self) -> UnitQuaternion;

    /// Whether the active object is a mesh in edit mode.
    fn is_editing_mesh(&self) -> bool {
        self.interaction_mode() == InteractionMode::Edit
    }
}

/// Runs `commit` with the host in object mode, then returns to the previous
/// mode on every exit path.
///
/// If both the commit and the restore fail, the commit error is returned and
/// the restore failure is logged.
///
/// # Errors
///
/// Returns the error of entering object mode, of `commit`, or of restoring
/// the previous mode, in that order of precedence.
pub fn with_object_mode<H, T, F>(host: &mut H, commit: F) -> Result<T>
where
    H: EditHost + ?Sized,
    F: FnOnce(&mut H) -> Result<T>,
{
    let previous = host.interaction_mode();
    if previous == InteractionMode::Object {
        return commit(host);
    }

    host.set_interaction_mode(InteractionMode::Object)?;
    let result = commit(host);
    match host.set_interaction_mode(previous) {
        Ok(()) => result,
        Err(err) if result.is_ok() => Err(err.into()),
        Err(err) => {
            tracing::warn!(%err, "failed to restore interaction mode after failed commit");
            result
        }
    }
}
