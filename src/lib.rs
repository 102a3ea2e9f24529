pub mod active;
pub mod editor;
pub mod error;
pub mod host;
pub mod math;
pub mod mesh;
pub mod monitor;
pub mod normals;
pub mod operations;
pub mod options;
pub mod topology;
pub mod view_sync;

pub use editor::NormalEditor;
pub use error::{NormalEditError, Result};
pub use monitor::PollingMonitor;
pub use options::EditOptions;
