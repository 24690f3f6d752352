use eframe::egui::{self, Rect, Ui};
use log::debug;

use network_tree::tree::{Point, TapOutcome};

use super::super::ViewModel;
use super::super::render_utils::{from_screen, from_vec};

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let pinch = ui.input(|input| input.zoom_delta());
        if (pinch - 1.0).abs() > f32::EPSILON {
            self.session.apply_zoom_pan(pinch, Point::ZERO);
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.session
            .viewport_mut()
            .zoom_about(from_screen(rect, pointer), zoom_factor);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged() {
            self.session
                .apply_zoom_pan(1.0, from_vec(response.drag_delta()));
        }
    }

    pub(in crate::app) fn hovered_index(&self, ui: &Ui, rect: Rect) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }
        self.session
            .viewport()
            .hit_test(self.session.layout(), from_screen(rect, pointer))
    }

    pub(in crate::app) fn handle_graph_tap(&mut self, rect: Rect, response: &egui::Response) {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return;
        }
        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };

        let outcome = self.session.tap(from_screen(rect, pointer));
        debug!("event=graph_tap outcome={outcome:?}");
        if let TapOutcome::Activated(id) = outcome {
            self.open_contact(id);
        }
    }

    pub(in crate::app) fn open_contact(&mut self, id: String) {
        self.opened = Some(id);
    }
}
