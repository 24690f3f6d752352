use std::path::Path;

use eframe::egui::{self, Align, Context, Key, Layout, RichText, vec2};

use network_tree::search::best_match;
use network_tree::tree::RelationshipCategory;
use network_tree::util::contact_count_label;

use super::super::ViewModel;
use super::super::render_utils::{category_color, from_vec};

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context, source: &Path) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Network Tree");
                    ui.separator();
                    ui.label(format!("source: {}", source.display()));
                    ui.label(contact_count_label(self.session.layout().nodes.len()));
                    ui.separator();

                    let search = ui.add(
                        egui::TextEdit::singleline(&mut self.search)
                            .hint_text("Search name or tag")
                            .desired_width(220.0),
                    );
                    let submitted =
                        search.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));
                    if search.changed() || submitted {
                        self.focus_best_match();
                    }

                    if ui.button("Reset view").clicked() {
                        self.session.viewport_mut().reset();
                    }
                    ui.checkbox(&mut self.show_connections, "Show connections");

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(error) = &self.feed_error {
                            ui.colored_label(ui.visuals().error_fg_color, error.as_str());
                        }
                    });
                });
            });

        egui::SidePanel::left("legend")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| self.draw_legend(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));

        self.draw_preview_card(ctx);
        self.draw_contact_window(ctx);
    }

    fn draw_legend(&self, ui: &mut egui::Ui) {
        ui.heading("Your Network Tree");
        ui.add_space(6.0);

        let layout = self.session.layout();
        for (rank, category) in RelationshipCategory::RANKED.into_iter().enumerate() {
            let level = rank as i32 + 1;
            let count = layout
                .tiers
                .iter()
                .find(|tier| tier.level == level)
                .map_or(0, |tier| tier.len());

            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(swatch, 2.0, category_color(category.rgb()));
                ui.label(RichText::new(format!("L{level}: {}", category.label(level))).small());
                ui.label(RichText::new(count.to_string()).small().weak());
            });
        }

        let other = layout
            .tiers
            .iter()
            .filter(|tier| tier.category == RelationshipCategory::Other)
            .map(|tier| tier.len())
            .sum::<usize>();
        if other > 0 {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("{} outside levels 1-5", contact_count_label(other)))
                    .small()
                    .weak(),
            );
        }

        ui.separator();
        ui.label(RichText::new("Tap a contact to preview, tap again to open.").small());
        ui.label(RichText::new("Pinch or scroll to zoom, drag to pan.").small());
    }

    fn focus_best_match(&mut self) {
        let nodes = &self.session.layout().nodes;
        let Some(position) = best_match(nodes, &self.search)
            .and_then(|index| nodes.get(index))
            .map(|node| node.position)
        else {
            return;
        };

        let canvas = from_vec(self.canvas_size);
        self.session.viewport_mut().focus_on(position, canvas);
    }
}
