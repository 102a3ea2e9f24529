//! Timer-driven tracking of viewport rotation and active vertex.

use std::time::Duration;

use crate::editor::NormalEditor;
use crate::error::Result;
use crate::host::EditHost;

/// Periodic check driven by the host's timer facility.
///
/// The host calls [`tick`](Self::tick) and reschedules after the returned
/// interval. The monitor never stops itself; detaching the editor does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingMonitor {
    interval: Duration,
}

impl Default for PollingMonitor {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl PollingMonitor {
    /// Creates a monitor with the given cadence.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Creates a monitor using the editor's configured cadence.
    #[must_use]
    pub fn for_editor(editor: &NormalEditor) -> Self {
        Self::new(editor.options().poll_interval)
    }

    /// Rescheduling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one check and returns the interval until the next one.
    ///
    /// Does nothing unless the host is editing a mesh with view-sync on.
    /// Failures are logged and retried on the next tick.
    pub fn tick<H: EditHost + ?Sized>(&self, editor: &mut NormalEditor, host: &H) -> Duration {
        if host.is_editing_mesh() && editor.options().view_sync {
            if let Err(err) = poll(editor, host) {
                tracing::warn!(%err, "normal display refresh failed");
            }
        }
        self.interval
    }
}

fn poll<H: EditHost + ?Sized>(editor: &mut NormalEditor, host: &H) -> Result<()> {
    let Some(rotation) = editor.sample_viewport(host) else {
        return Ok(());
    };
    editor.follow_viewport(host, rotation);
    editor.follow_active_vertex(host)?;
    Ok(())
}
