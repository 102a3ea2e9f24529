//! Keeps the typed object-space normal and the view-space direction picker
//! consistent.
//!
//! Either side may be edited. Writing one side from the other sets a one-shot
//! guard; the receiving handler takes the guard, records its value, and
//! stops. A single user edit therefore requests at most one mesh commit.

mod frame;

pub use frame::Frame;

use crate::math::{same_vector, try_normalize, UnitQuaternion, Vector3, TOLERANCE};

/// Which side of the synchronisation is currently propagating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    UpdatingFromObjectSpace,
    UpdatingFromViewSpace,
}

/// Paired object-space / view-space normal state.
#[derive(Debug, Clone)]
pub struct ViewSync {
    typed: Vector3,
    typed_prev: Vector3,
    pending: Option<Vector3>,
    view: Vector3,
    view_rotation: UnitQuaternion,
    sampled_rotation: Option<UnitQuaternion>,
    guard: bool,
    phase: SyncPhase,
}

impl Default for ViewSync {
    fn default() -> Self {
        Self {
            typed: Vector3::zeros(),
            typed_prev: Vector3::zeros(),
            pending: None,
            view: Vector3::zeros(),
            view_rotation: UnitQuaternion::identity(),
            sampled_rotation: None,
            guard: false,
            phase: SyncPhase::Idle,
        }
    }
}

impl ViewSync {
    /// Creates the state with no viewport sample yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Object-space normal as last typed or refreshed.
    #[must_use]
    pub fn typed_normal(&self) -> Vector3 {
        self.typed
    }

    /// View-space normal shown by the direction picker.
    #[must_use]
    pub fn view_normal(&self) -> Vector3 {
        self.view
    }

    /// Last viewport orientation adopted for conversions.
    #[must_use]
    pub fn view_rotation(&self) -> UnitQuaternion {
        self.view_rotation
    }

    /// Whether the last viewport sample found a visible viewport.
    #[must_use]
    pub fn is_rotation_available(&self) -> bool {
        self.sampled_rotation.is_some()
    }

    /// The last viewport sample, if a viewport was visible.
    #[must_use]
    pub fn sampled_rotation(&self) -> Option<UnitQuaternion> {
        self.sampled_rotation
    }

    /// Whether a cross-update is pending. Always `false` between calls.
    #[must_use]
    pub fn is_guarded(&self) -> bool {
        self.guard
    }

    /// Current phase. Always [`SyncPhase::Idle`] between calls.
    #[must_use]
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Records a per-frame viewport sample; `None` marks the orientation as
    /// unavailable.
    pub fn record_viewport_sample(&mut self, sample: Option<UnitQuaternion>) {
        self.sampled_rotation = sample;
    }

    /// Adopts `rotation` for future conversions. Returns `true` if it differs
    /// from the previously adopted orientation.
    pub fn adopt_view_rotation(&mut self, rotation: UnitQuaternion) -> bool {
        let changed = rotation.coords != self.view_rotation.coords;
        self.view_rotation = rotation;
        changed
    }

    /// Handles a user edit of the object-space normal.
    ///
    /// Returns the unit normal to commit, if any. The edited value becomes
    /// the baseline for change detection only once
    /// [`confirm_commit`](Self::confirm_commit) is called, so a failed write
    /// can be retried with the same value.
    pub fn edit_object_space(&mut self, value: Vector3, frame: &Frame) -> Option<Vector3> {
        self.phase = SyncPhase::UpdatingFromObjectSpace;
        let commit = self.on_object_space(value, frame);
        self.phase = SyncPhase::Idle;
        commit
    }

    /// Handles a user edit of the view-space direction picker.
    ///
    /// Returns the unit object-space normal to commit, if any. See
    /// [`edit_object_space`](Self::edit_object_space) for confirmation.
    pub fn edit_view_space(&mut self, value: Vector3, frame: &Frame) -> Option<Vector3> {
        self.phase = SyncPhase::UpdatingFromViewSpace;
        let commit = self.on_view_space(value, frame);
        self.phase = SyncPhase::Idle;
        commit
    }

    /// Marks the last requested commit as written.
    pub fn confirm_commit(&mut self) {
        if let Some(value) = self.pending.take() {
            self.typed_prev = value;
        }
    }

    /// Replaces the object-space normal for display without committing, and
    /// recomputes the view-space side with the current frame.
    pub fn refresh(&mut self, value: Vector3, frame: &Frame) {
        self.phase = SyncPhase::UpdatingFromObjectSpace;
        self.guard = true;
        let commit = self.on_object_space(value, frame);
        debug_assert!(commit.is_none());
        self.phase = SyncPhase::Idle;
    }

    fn on_object_space(&mut self, value: Vector3, frame: &Frame) -> Option<Vector3> {
        let from_other_side = std::mem::take(&mut self.guard);
        let unit = try_normalize(&value, TOLERANCE);
        self.typed = value;

        let mut commit = None;
        self.pending = None;
        if !same_vector(&value, &self.typed_prev) {
            if !from_other_side {
                if unit.is_none() {
                    tracing::debug!("typed normal has zero length; nothing to commit");
                }
                commit = unit;
            }
            if commit.is_some() {
                self.pending = Some(value);
            } else {
                self.typed_prev = value;
            }
        }

        let view = unit.map_or_else(Vector3::zeros, |u| frame.to_view_space(&u));
        self.guard = true;
        let echoed = self.on_view_space(view, frame);
        debug_assert!(echoed.is_none());
        tracing::trace!(phase = ?self.phase, ?commit, "object-space normal updated");
        commit
    }

    fn on_view_space(&mut self, value: Vector3, frame: &Frame) -> Option<Vector3> {
        self.view = value;
        if std::mem::take(&mut self.guard) {
            return None;
        }
        let typed = frame.to_object_space(&value);
        self.on_object_space(typed, frame)
    }
}
