use thiserror::Error;

/// Top-level error type for the normal editing engine.
#[derive(Debug, Error)]
pub enum NormalEditError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors caused by the mesh no longer matching what the caller expects.
///
/// Both variants mean the host changed topology between reads; the caller
/// should re-resolve and retry once.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("corner normal count {actual} does not match corner count {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// Errors related to normal vector computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("smoothed normal of vertex {vertex} is degenerate (magnitude {magnitude:e})")]
    DegenerateNormal { vertex: usize, magnitude: f64 },
}

/// Errors reported by the host application.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("mode switch failed: {0}")]
    ModeSwitch(String),
}

/// Convenience type alias for results using [`NormalEditError`].
pub type Result<T> = std::result::Result<T, NormalEditError>;
