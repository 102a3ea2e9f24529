use std::f64::consts::FRAC_PI_2;

use crate::math::{UnitQuaternion, Vector3};

/// Orientations needed to move a direction between object space and view
/// space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// When `false`, a fixed reference rotation replaces the live orientations.
    pub view_sync: bool,
    /// Viewport camera orientation.
    pub view: UnitQuaternion,
    /// World rotation of the edited object.
    pub object: UnitQuaternion,
}

impl Frame {
    /// Creates a frame.
    #[must_use]
    pub fn new(view_sync: bool, view: UnitQuaternion, object: UnitQuaternion) -> Self {
        Self {
            view_sync,
            view,
            object,
        }
    }

    /// Object space -> view space.
    #[must_use]
    pub fn to_view_space(&self, v: &Vector3) -> Vector3 {
        if self.view_sync {
            self.view.inverse() * (self.object * v)
        } else {
            reference_rotation().inverse() * v
        }
    }

    /// View space -> object space.
    #[must_use]
    pub fn to_object_space(&self, v: &Vector3) -> Vector3 {
        if self.view_sync {
            self.object.inverse() * (self.view * v)
        } else {
            reference_rotation() * v
        }
    }
}

/// Quarter turn about +X used when view-sync is off.
fn reference_rotation() -> UnitQuaternion {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2)
}
