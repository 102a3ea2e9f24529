//! The command surface a host UI binds to.
//!
//! A [`NormalEditor`] lives for as long as the tool is attached to the host
//! and owns the view-sync state, the normal clipboard, and the options.

use crate::active::{ActiveElement, ResolveActive};
use crate::error::Result;
use crate::host::{with_object_mode, EditHost, SelectMode};
use crate::math::{UnitQuaternion, Vector3};
use crate::mesh::{Mesh, Polygon, VertexMask};
use crate::normals::write_corner_normals;
use crate::operations::{NormalOperation, Restore, SetAtCorners, SetPerFace, SetUniform, Smooth};
use crate::options::EditOptions;
use crate::topology::TopologyIndex;
use crate::view_sync::{Frame, ViewSync};

/// One normal editing session.
#[derive(Debug, Clone, Default)]
pub struct NormalEditor {
    options: EditOptions,
    sync: ViewSync,
    clipboard: Option<Vector3>,
    last_active_vertex: Option<usize>,
}

impl NormalEditor {
    /// Attaches a new session.
    #[must_use]
    pub fn new(options: EditOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Session options.
    #[must_use]
    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    /// The paired object-space / view-space normal state.
    #[must_use]
    pub fn view_sync(&self) -> &ViewSync {
        &self.sync
    }

    /// Normal stored by the last [`copy`](Self::copy).
    #[must_use]
    pub fn clipboard(&self) -> Option<Vector3> {
        self.clipboard
    }

    /// Smooths the selected vertices' normals with their 1-ring.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh changed shape or the host refused a mode
    /// switch; nothing is written in that case.
    pub fn smooth<H: EditHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let mask = self.mask(host.mesh());
        commit(host, &Smooth::new().with_mask(mask))?;
        self.refresh_active(host)
    }

    /// Resets the selected vertices' corners to their geometric normals.
    ///
    /// # Errors
    ///
    /// See [`smooth`](Self::smooth).
    pub fn restore<H: EditHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let mask = self.mask(host.mesh());
        commit(host, &Restore::new().with_mask(mask))?;
        self.refresh_active(host)
    }

    /// Flat-shades the selected polygons.
    ///
    /// # Errors
    ///
    /// See [`smooth`](Self::smooth).
    pub fn set_face_normals<H: EditHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let mask = self.mask(host.mesh());
        commit(host, &SetPerFace::new().with_mask(mask))?;
        self.refresh_active(host)
    }

    /// Adds the selected vertices to the mask group.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refused a mode switch.
    pub fn mask_selected<H: EditHost + ?Sized>(&mut self, host: &mut H) -> Result<usize> {
        let group = self.options.mask_group.clone();
        with_object_mode(host, |h| Ok(h.mesh_mut().mask_selected(&group)))
    }

    /// Removes the selected vertices from the mask group.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refused a mode switch.
    pub fn unmask_selected<H: EditHost + ?Sized>(&mut self, host: &mut H) -> Result<usize> {
        let group = self.options.mask_group.clone();
        with_object_mode(host, |h| Ok(h.mesh_mut().unmask_selected(&group)))
    }

    /// Resolves the element the type/paste controls currently refer to.
    ///
    /// # Errors
    ///
    /// Returns an error if the active vertex is stale.
    pub fn resolve_active<H: EditHost + ?Sized>(&self, host: &H) -> Result<Option<ActiveElement>> {
        ResolveActive::new(host.select_mode(), host.active_vertex())
            .with_split_index(self.options.split_selector())
            .execute(host.mesh())
    }

    /// Stores the active normal in the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the active vertex is stale.
    pub fn copy<H: EditHost + ?Sized>(&mut self, host: &H) -> Result<Option<Vector3>> {
        if let Some(active) = self.resolve_active(host)? {
            self.clipboard = Some(active.normal);
        }
        Ok(self.clipboard)
    }

    /// Writes the clipboard normal to the current selection. Returns whether
    /// anything was committed.
    ///
    /// # Errors
    ///
    /// See [`smooth`](Self::smooth).
    pub fn paste<H: EditHost + ?Sized>(&mut self, host: &mut H) -> Result<bool> {
        let Some(normal) = self.clipboard else {
            return Ok(false);
        };
        let written = self.commit_to_selection(host, normal)?;
        self.refresh_active(host)?;
        Ok(written)
    }

    /// Handles the user typing an object-space normal. Returns whether the
    /// mesh was written.
    ///
    /// # Errors
    ///
    /// See [`smooth`](Self::smooth).
    pub fn type_normal<H>(&mut self, host: &mut H, value: Vector3) -> Result<bool>
    where
        H: EditHost + ?Sized,
    {
        let frame = self.frame(host);
        let Some(normal) = self.sync.edit_object_space(value, &frame) else {
            return Ok(false);
        };
        self.commit_edit(host, normal)
    }

    /// Handles the user dragging the view-space direction picker. Returns
    /// whether the mesh was written.
    ///
    /// # Errors
    ///
    /// See [`smooth`](Self::smooth).
    pub fn drag_view_normal<H>(&mut self, host: &mut H, value: Vector3) -> Result<bool>
    where
        H: EditHost + ?Sized,
    {
        let frame = self.frame(host);
        let Some(normal) = self.sync.edit_view_space(value, &frame) else {
            return Ok(false);
        };
        self.commit_edit(host, normal)
    }

    /// Toggles view-sync mode and recomputes the view-space display.
    pub fn set_view_sync<H: EditHost + ?Sized>(&mut self, host: &H, enabled: bool) {
        self.options.view_sync = enabled;
        let frame = self.frame(host);
        let typed = self.sync.typed_normal();
        self.sync.refresh(typed, &frame);
    }

    /// Toggles split display and refreshes the displayed normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the active vertex is stale.
    pub fn set_split_display<H>(&mut self, host: &H, enabled: bool) -> Result<()>
    where
        H: EditHost + ?Sized,
    {
        self.options.split_display = enabled;
        self.refresh_active(host)
    }

    /// Picks which corner of the active vertex split display refers to. The
    /// display only follows when that corner exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the active vertex is stale.
    pub fn set_split_index<H: EditHost + ?Sized>(&mut self, host: &H, index: usize) -> Result<()> {
        self.options.split_index = index;
        if !self.options.split_display {
            return Ok(());
        }
        if let Some(ActiveElement {
            normal,
            corner: Some(_),
            ..
        }) = self.resolve_active(host)?
        {
            let frame = self.frame(host);
            self.sync.refresh(normal, &frame);
        }
        Ok(())
    }

    /// Per-frame viewport callback: records the orientation sample and
    /// returns it.
    pub fn sample_viewport<H: EditHost + ?Sized>(&mut self, host: &H) -> Option<UnitQuaternion> {
        let sample = host.viewport_rotation();
        self.sync.record_viewport_sample(sample);
        sample
    }

    /// Shows the active element's normal in both fields without committing.
    ///
    /// # Errors
    ///
    /// Returns an error if the active vertex is stale.
    pub fn refresh_active<H: EditHost + ?Sized>(&mut self, host: &H) -> Result<()> {
        if let Some(active) = self.resolve_active(host)? {
            let frame = self.frame(host);
            self.sync.refresh(active.normal, &frame);
        }
        Ok(())
    }

    /// Adopts a new viewport orientation. Returns `true` if it changed, in
    /// which case the view-space display was recomputed.
    pub(crate) fn follow_viewport<H>(&mut self, host: &H, rotation: UnitQuaternion) -> bool
    where
        H: EditHost + ?Sized,
    {
        if !self.sync.adopt_view_rotation(rotation) {
            return false;
        }
        let frame = self.frame(host);
        let typed = self.sync.typed_normal();
        self.sync.refresh(typed, &frame);
        tracing::debug!("viewport rotation changed");
        true
    }

    /// Refreshes the display if the active vertex changed since the last
    /// call. Returns `true` on change.
    pub(crate) fn follow_active_vertex<H: EditHost + ?Sized>(&mut self, host: &H) -> Result<bool> {
        let Some(vertex) = host.active_vertex() else {
            return Ok(false);
        };
        if self.last_active_vertex == Some(vertex) {
            return Ok(false);
        }
        tracing::debug!(vertex, "active vertex changed");
        self.refresh_active(host)?;
        self.last_active_vertex = Some(vertex);
        Ok(true)
    }

    /// Commits a user edit and confirms it as the change-detection baseline.
    /// A failed write leaves the baseline alone so the same value can be
    /// retried.
    fn commit_edit<H>(&mut self, host: &mut H, normal: Vector3) -> Result<bool>
    where
        H: EditHost + ?Sized,
    {
        let written = self.commit_to_selection(host, normal)?;
        self.sync.confirm_commit();
        Ok(written)
    }

    fn frame<H: EditHost + ?Sized>(&self, host: &H) -> Frame {
        Frame::new(
            self.options.view_sync,
            self.sync.view_rotation(),
            host.object_rotation(),
        )
    }

    fn mask(&self, mesh: &Mesh) -> VertexMask {
        VertexMask::from_group(mesh, &self.options.mask_group)
    }

    /// Writes `normal` to whatever the selection mode and display mode say
    /// the type/paste controls target. Returns whether anything was written.
    fn commit_to_selection<H>(&self, host: &mut H, normal: Vector3) -> Result<bool>
    where
        H: EditHost + ?Sized,
    {
        let mask = self.mask(host.mesh());
        let Some(selector) = self.options.split_selector() else {
            commit(host, &SetUniform::new(normal).with_mask(mask))?;
            return Ok(true);
        };
        let Some(vertex) = host.active_vertex() else {
            return Ok(false);
        };

        let corners: Vec<usize> = match host.select_mode() {
            SelectMode::Vertex => {
                let index = TopologyIndex::build(host.mesh())?;
                let Some(&corner) = index.corners(vertex).get(selector) else {
                    tracing::debug!(vertex, selector, "no corner at split index; nothing written");
                    return Ok(false);
                };
                vec![corner]
            }
            SelectMode::Face => host
                .mesh()
                .polygons
                .iter()
                .filter(|p| p.select)
                .flat_map(Polygon::corners)
                .collect(),
            SelectMode::Edge => return Ok(false),
        };
        commit(host, &SetAtCorners::new(normal, corners).with_mask(mask))?;
        Ok(true)
    }
}

/// Computes `operation` and writes the result with the host in object mode.
fn commit<H, O>(host: &mut H, operation: &O) -> Result<()>
where
    H: EditHost + ?Sized,
    O: NormalOperation + ?Sized,
{
    with_object_mode(host, |h| {
        let normals = operation.execute(h.mesh())?;
        write_corner_normals(h.mesh_mut(), &normals)?;
        Ok(())
    })?;
    tracing::debug!(operation = operation.name(), "normals committed");
    Ok(())
}
