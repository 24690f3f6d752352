use eframe::egui::{self, Align2, Context, RichText, vec2};

use network_tree::tree::{RelationshipCategory, TapOutcome};
use network_tree::util::contact_count_label;

use super::super::ViewModel;
use super::super::render_utils::category_color;

impl ViewModel {
    pub(in crate::app) fn draw_preview_card(&mut self, ctx: &Context) {
        let Some(card) = self.session.viewport().preview(self.session.layout()) else {
            return;
        };

        let mut open_requested = false;
        egui::Window::new("contact_preview")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(Align2::CENTER_BOTTOM, vec2(0.0, -16.0))
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                ui.label(RichText::new(card.name.as_str()).heading().strong());
                ui.add_space(8.0);
                ui.colored_label(category_color(card.rgb), card.level_label.as_str());
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!(
                        "{} at this level",
                        contact_count_label(card.same_level_count)
                    ))
                    .small()
                    .weak(),
                );
                ui.add_space(8.0);
                if ui.link("Tap to view full profile").clicked() {
                    open_requested = true;
                }
            });

        if open_requested
            && let TapOutcome::Activated(id) =
                self.session.viewport_mut().tap_node(Some(card.id.as_str()))
        {
            self.open_contact(id);
        }
    }

    pub(in crate::app) fn draw_contact_window(&mut self, ctx: &Context) {
        let Some(id) = self.opened.clone() else {
            return;
        };
        let Some(contact) = self.session.contact(&id) else {
            self.opened = None;
            return;
        };

        let mut open = true;
        let category = RelationshipCategory::from_level(contact.relationship_level);
        egui::Window::new(contact.name.as_str())
            .id(egui::Id::new(("contact_detail", id.as_str())))
            .open(&mut open)
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.colored_label(
                    category_color(category.rgb()),
                    category.label(contact.relationship_level),
                );
                ui.separator();

                let fields = [
                    ("Email", contact.email.as_str()),
                    ("Phone", contact.phone.as_str()),
                    ("Company", contact.company.as_str()),
                    ("Position", contact.position.as_str()),
                    ("Photo", contact.photo_url.as_str()),
                ];
                for (label, value) in fields {
                    if !value.is_empty() {
                        ui.label(format!("{label}: {value}"));
                    }
                }

                if !contact.tags.is_empty() {
                    ui.label(format!("Tags: {}", contact.tags.join(", ")));
                }

                if !contact.connected_to.is_empty() {
                    let names = contact
                        .connected_to
                        .iter()
                        .map(|other| {
                            self.session
                                .contact(other)
                                .map_or(other.as_str(), |record| record.name.as_str())
                        })
                        .collect::<Vec<_>>();
                    ui.label(format!("Connected to: {}", names.join(", ")));
                }

                if !contact.notes.is_empty() {
                    ui.separator();
                    ui.label(RichText::new("Notes").strong());
                    ui.label(contact.notes.as_str());
                }
            });

        if !open {
            self.opened = None;
        }
    }
}
