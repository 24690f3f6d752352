use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Painter, Rect, Sense, Stroke, Ui, vec2};

use network_tree::search::matching_nodes;
use network_tree::tree::{Point, edge_segment};
use network_tree::util::initials;

use super::super::render_utils::{
    CONNECTED_BORDER, ROOT_COLOR, SEARCH_BORDER, SELECTED_BORDER, blend_color, category_color,
    circle_visible, draw_background, to_screen, with_alpha,
};
use super::super::{SearchMatchCache, ViewModel};

const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(64, 64, 64, 128);
const ROOT_LINK_HIGHLIGHT: Color32 = Color32::from_rgb(0xFF, 0x98, 0x00);
const TIER_EDGE_HIGHLIGHT: Color32 = Color32::from_rgb(0x21, 0x96, 0xF3);

impl ViewModel {
    pub(in crate::app) fn cached_search_matches(&mut self) -> HashSet<usize> {
        let query = self.search.trim();
        if query.is_empty() {
            self.search_match_cache = None;
            return HashSet::new();
        }

        let revision = self.session.revision();
        if let Some(cached) = &self.search_match_cache
            && cached.layout_revision == revision
            && cached.query == query
        {
            return cached.matches.iter().copied().collect();
        }

        let matches = matching_nodes(&self.session.layout().nodes, query);
        let set: HashSet<usize> = matches.iter().copied().collect();
        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            layout_revision: revision,
            matches,
        });
        set
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.canvas_size = rect.size();

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        self.handle_graph_tap(rect, &response);

        let search_matches = self.cached_search_matches();
        let hovered = self.hovered_index(ui, rect);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let painter = ui.painter_at(rect);
        let layout = self.session.layout();
        let viewport = self.session.viewport();
        let scale = viewport.scale();
        let selected_index = viewport.selected_id().and_then(|id| layout.node_index(id));

        draw_background(&painter, rect, viewport.offset(), scale);

        let edge_stroke = |highlighted: bool, highlight: Color32| {
            if highlighted {
                Stroke::new((6.0 * scale).clamp(2.0, 14.0), highlight)
            } else {
                Stroke::new((4.0 * scale).clamp(1.5, 10.0), EDGE_COLOR)
            }
        };

        let root = viewport.root_circle(layout);
        for index in layout.root_links() {
            let child = viewport.node_circle(&layout.nodes[index]);
            let [start, end] = edge_segment(root, child);
            painter.line_segment(
                [to_screen(rect, start), to_screen(rect, end)],
                edge_stroke(selected_index == Some(index), ROOT_LINK_HIGHLIGHT),
            );
        }

        for edge in &layout.edges {
            let parent = viewport.node_circle(&layout.nodes[edge.parent]);
            let child = viewport.node_circle(&layout.nodes[edge.child]);
            let highlighted = selected_index.is_some_and(|index| layout.edge_touches(edge, index));
            let [start, end] = edge_segment(parent, child);
            painter.line_segment(
                [to_screen(rect, start), to_screen(rect, end)],
                edge_stroke(highlighted, TIER_EDGE_HIGHLIGHT),
            );
        }

        if circle_visible(rect, root) {
            let center = to_screen(rect, root.center());
            painter.circle_filled(center, root.radius(), ROOT_COLOR);
            painter.circle_stroke(center, root.radius(), Stroke::new(2.0, Color32::WHITE));
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "Me",
                FontId::proportional((root.radius() * 0.7).clamp(6.0, 40.0)),
                Color32::WHITE,
            );
        }

        for index in viewport.draw_order(layout) {
            let node = &layout.nodes[index];
            let circle = viewport.node_circle(node);
            if !circle_visible(rect, circle) {
                continue;
            }

            let center = to_screen(rect, circle.center());
            let radius = circle.radius();
            let is_selected = viewport.is_selected(node);
            let is_hovered = hovered == Some(index);
            let is_connected = self.show_connections
                && !is_selected
                && selected_index.is_some_and(|selected| layout.is_connected(selected, index));
            let is_match = search_matches.contains(&index);

            let base_color = category_color(node.category.rgb());
            let fill = if is_hovered {
                blend_color(with_alpha(base_color, 0.7), Color32::WHITE, 0.2)
            } else {
                with_alpha(base_color, 0.7)
            };
            let border = if is_selected {
                SELECTED_BORDER
            } else if is_connected {
                CONNECTED_BORDER
            } else if is_match {
                SEARCH_BORDER
            } else {
                base_color
            };
            let border_width = if is_selected || is_match { 3.0 } else { 2.0 };

            painter.circle_filled(center, radius, fill);
            painter.circle_stroke(center, radius, Stroke::new(border_width, border));
            painter.text(
                center,
                Align2::CENTER_CENTER,
                initials(&node.name),
                FontId::proportional((radius * 0.7).clamp(6.0, 40.0)),
                Color32::WHITE,
            );

            if is_selected || is_hovered || is_match || scale >= 0.8 {
                painter.text(
                    center + vec2(0.0, radius + 4.0),
                    Align2::CENTER_TOP,
                    node.name.as_str(),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        self.draw_tier_labels(&painter);

        painter.text(
            rect.left_bottom() + vec2(12.0, -12.0),
            Align2::LEFT_BOTTOM,
            format!("Zoom: {scale:.1}x"),
            FontId::proportional(13.0),
            Color32::from_gray(230),
        );

        if layout.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_BOTTOM,
                "No Contacts Yet",
                FontId::proportional(22.0),
                Color32::from_gray(200),
            );
            painter.text(
                rect.center() + vec2(0.0, 8.0),
                Align2::CENTER_TOP,
                "Add your first contact to start building your network\nPinch or scroll to zoom, drag to pan",
                FontId::proportional(13.0),
                Color32::from_gray(160),
            );
        }
    }

    fn draw_tier_labels(&self, painter: &Painter) {
        let rect = painter.clip_rect();
        let layout = self.session.layout();
        let transform = self.session.viewport().transform();

        let label = |text: String, y: f32, color: Color32| {
            let anchor = transform.model_to_screen(Point::new(16.0, y - 15.0));
            let galley = painter.layout_no_wrap(text, FontId::proportional(12.0), color);
            let frame = Rect::from_min_size(to_screen(rect, anchor), galley.size() + vec2(24.0, 12.0));
            painter.rect_filled(frame, 6.0, with_alpha(color, 0.15));
            painter.galley(frame.min + vec2(12.0, 6.0), galley, color);
        };

        label("Me".to_owned(), layout.params.base_y, ROOT_COLOR);
        for tier in &layout.tiers {
            label(tier.label(), tier.y, category_color(tier.category.rgb()));
        }
    }
}
