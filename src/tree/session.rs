use log::{debug, info};

use crate::contacts::ContactRecord;

use super::layout::{LayoutParams, TreeLayout, compute_layout_with};
use super::transform::Point;
use super::viewport::{TapOutcome, ViewportState};

/// State of one mounted tree view: the latest layout plus its viewport.
///
/// Each snapshot replaces the previous layout wholesale. The viewport is never
/// derived from contact data, so pan, zoom and selection survive recomputes.
#[derive(Debug, Default)]
pub struct TreeSession {
    params: LayoutParams,
    contacts: Vec<ContactRecord>,
    layout: TreeLayout,
    viewport: ViewportState,
    revision: u64,
}

impl TreeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: LayoutParams) -> Self {
        Self {
            params,
            layout: TreeLayout {
                params,
                ..TreeLayout::default()
            },
            ..Self::default()
        }
    }

    /// Recomputes the layout from a full snapshot.
    ///
    /// Returns whether node placement or edges differ from the previous layout.
    pub fn apply_snapshot(&mut self, contacts: Vec<ContactRecord>) -> bool {
        let layout = compute_layout_with(&contacts, &self.params);
        let changed = !layout.same_placement(&self.layout);

        self.revision = self.revision.wrapping_add(1);
        self.contacts = contacts;
        self.layout = layout;

        debug!(
            "event=layout_recomputed revision={} nodes={} edges={} tiers={} changed={changed}",
            self.revision,
            self.layout.nodes.len(),
            self.layout.edges.len(),
            self.layout.tiers.len()
        );
        changed
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportState {
        &mut self.viewport
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contact(&self, id: &str) -> Option<&ContactRecord> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    pub fn apply_zoom_pan(&mut self, scale_delta: f32, pan_delta: Point) {
        self.viewport.apply_zoom_pan(scale_delta, pan_delta);
    }

    pub fn tap(&mut self, screen: Point) -> TapOutcome {
        let outcome = self.viewport.tap(&self.layout, screen);
        if let TapOutcome::Activated(id) = &outcome {
            info!("event=contact_activated id={id}");
        }
        outcome
    }

    /// Like [`Self::tap`], invoking `on_activate` when the tap activates a contact.
    pub fn tap_with(&mut self, screen: Point, mut on_activate: impl FnMut(&str)) -> TapOutcome {
        let outcome = self.tap(screen);
        if let TapOutcome::Activated(id) = &outcome {
            on_activate(id);
        }
        outcome
    }
}
