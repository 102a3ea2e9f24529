/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit quaternion used for viewport and object orientations.
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Magnitude below which a summed normal is considered degenerate.
pub const DEGENERATE_EPSILON: f64 = 1e-6;

/// Exact component-wise comparison.
///
/// Change detection on typed normals compares raw values, so no tolerance
/// is applied here.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn same_vector(a: &Vector3, b: &Vector3) -> bool {
    a.x == b.x && a.y == b.y && a.z == b.z
}

/// Returns the unit vector of `v`, or `None` if its length is below `epsilon`.
#[must_use]
pub fn try_normalize(v: &Vector3, epsilon: f64) -> Option<Vector3> {
    let len = v.norm();
    (len >= epsilon).then(|| v / len)
}
