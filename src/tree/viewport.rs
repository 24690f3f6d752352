use super::layout::{GraphNode, TreeLayout};
use super::transform::{NodeSizes, Point, ScreenCircle, Transform};

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Previewing(String),
}

/// Result of routing one tap through the selection state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// Tap on empty space while idle.
    Ignored,
    /// A node is now previewed; either the first tap or a switch from another node.
    Previewed(String),
    /// Second tap on the previewed node. The host should open the contact.
    Activated(String),
    /// Tap on empty space cleared the preview.
    Dismissed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewCard {
    pub id: String,
    pub name: String,
    pub photo_url: String,
    pub level: i32,
    pub level_label: String,
    pub rgb: [u8; 3],
    pub same_level_count: usize,
}

/// Pan, zoom and selection state of one tree view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewportState {
    transform: Transform,
    selection: Selection,
    sizes: NodeSizes,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sizes(sizes: NodeSizes) -> Self {
        Self {
            sizes,
            ..Self::default()
        }
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    pub fn offset(&self) -> Point {
        self.transform.offset
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn sizes(&self) -> NodeSizes {
        self.sizes
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_id(&self) -> Option<&str> {
        match &self.selection {
            Selection::Idle => None,
            Selection::Previewing(id) => Some(id.as_str()),
        }
    }

    pub fn preview_visible(&self) -> bool {
        matches!(self.selection, Selection::Previewing(_))
    }

    pub fn is_selected(&self, node: &GraphNode) -> bool {
        self.selected_id() == Some(node.id.as_str())
    }

    /// Multiplies the scale (clamped to `[MIN_SCALE, MAX_SCALE]`) and adds the pan delta.
    ///
    /// Non-finite input is dropped so the state never holds NaN.
    pub fn apply_zoom_pan(&mut self, scale_delta: f32, pan_delta: Point) {
        if scale_delta.is_finite() && scale_delta > 0.0 {
            self.transform.scale = (self.transform.scale * scale_delta).clamp(MIN_SCALE, MAX_SCALE);
        }
        if pan_delta.is_finite() {
            self.transform.offset = self.transform.offset + pan_delta;
        }
    }

    /// Zooms while keeping the model point under `anchor` in place.
    pub fn zoom_about(&mut self, anchor: Point, factor: f32) {
        if !anchor.is_finite() || !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let model_before = self.transform.screen_to_model(anchor);
        self.transform.scale = (self.transform.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.transform.offset = anchor - model_before * self.transform.scale;
    }

    /// Pans so `model` lands at the centre of a canvas of `canvas_size` pixels.
    pub fn focus_on(&mut self, model: Point, canvas_size: Point) {
        let delta = canvas_size / 2.0 - self.transform.model_to_screen(model);
        self.apply_zoom_pan(1.0, delta);
    }

    pub fn reset(&mut self) {
        self.transform = Transform::default();
        self.selection = Selection::Idle;
    }

    pub fn node_circle(&self, node: &GraphNode) -> ScreenCircle {
        self.transform
            .circle(node.position, self.sizes.diameter(self.is_selected(node)))
    }

    pub fn root_circle(&self, layout: &TreeLayout) -> ScreenCircle {
        self.transform
            .circle(layout.root_position(), self.sizes.diameter(false))
    }

    /// Layout order with the selected node(s) moved last, so they paint on top.
    pub fn draw_order<'a>(
        &'a self,
        layout: &'a TreeLayout,
    ) -> impl DoubleEndedIterator<Item = usize> + 'a {
        let unselected =
            (0..layout.nodes.len()).filter(move |&index| !self.is_selected(&layout.nodes[index]));
        let selected =
            (0..layout.nodes.len()).filter(move |&index| self.is_selected(&layout.nodes[index]));
        unselected.chain(selected)
    }

    /// Topmost node whose screen circle contains `screen`.
    pub fn hit_test(&self, layout: &TreeLayout, screen: Point) -> Option<usize> {
        self.draw_order(layout)
            .rev()
            .find(|&index| self.node_circle(&layout.nodes[index]).contains(screen))
    }

    /// Advances the selection state machine with a tap on `hit` (`None` = empty space).
    pub fn tap_node(&mut self, hit: Option<&str>) -> TapOutcome {
        let outcome = match (self.selected_id(), hit) {
            (None, None) => TapOutcome::Ignored,
            (Some(_), None) => TapOutcome::Dismissed,
            (Some(current), Some(id)) if current == id => TapOutcome::Activated(id.to_owned()),
            (_, Some(id)) => TapOutcome::Previewed(id.to_owned()),
        };

        self.selection = match &outcome {
            TapOutcome::Previewed(id) => Selection::Previewing(id.clone()),
            TapOutcome::Ignored | TapOutcome::Activated(_) | TapOutcome::Dismissed => {
                Selection::Idle
            }
        };
        outcome
    }

    pub fn tap(&mut self, layout: &TreeLayout, screen: Point) -> TapOutcome {
        let hit = self
            .hit_test(layout, screen)
            .map(|index| layout.nodes[index].id.clone());
        self.tap_node(hit.as_deref())
    }

    /// Card for the previewed node, if it still exists in `layout`.
    pub fn preview(&self, layout: &TreeLayout) -> Option<PreviewCard> {
        let index = layout.node_index(self.selected_id()?)?;
        let node = &layout.nodes[index];
        Some(PreviewCard {
            id: node.id.clone(),
            name: node.name.clone(),
            photo_url: node.photo_url.clone(),
            level: node.level,
            level_label: node.category.label(node.level),
            rgb: node.category.rgb(),
            same_level_count: layout.same_tier_count(index),
        })
    }
}
