use std::path::PathBuf;
use std::time::Duration;

use eframe::egui::{self, Context, Vec2};
use log::{info, warn};

use network_tree::contacts::{ContactRecord, SnapshotResult, Subscription};
use network_tree::tree::TreeSession;

mod graph;
mod render_utils;
mod ui;

pub struct NetworkTreeApp {
    source: PathBuf,
    poll_interval: Duration,
    subscription: Subscription,
    state: AppState,
}

enum AppState {
    Waiting,
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    session: TreeSession,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    feed_error: Option<String>,
    opened: Option<String>,
    canvas_size: Vec2,
    show_connections: bool,
}

struct SearchMatchCache {
    query: String,
    layout_revision: u64,
    matches: Vec<usize>,
}

impl NetworkTreeApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: PathBuf,
        poll_interval: Duration,
        subscription: Subscription,
    ) -> Self {
        Self {
            source,
            poll_interval,
            subscription,
            state: AppState::Waiting,
        }
    }

    fn receive_snapshot(&mut self, snapshot: SnapshotResult) {
        if let AppState::Ready(model) = &mut self.state {
            match snapshot {
                Ok(contacts) => model.apply_snapshot(contacts),
                Err(error) => {
                    warn!("event=feed_error keep_layout=true error={error}");
                    model.feed_error = Some(error);
                }
            }
            return;
        }

        self.state = match snapshot {
            Ok(contacts) => {
                info!("event=tree_ready contacts={}", contacts.len());
                AppState::Ready(Box::new(ViewModel::new(contacts)))
            }
            Err(error) => AppState::Error(error),
        };
    }
}

impl eframe::App for NetworkTreeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if let Some(snapshot) = self.subscription.latest() {
            self.receive_snapshot(snapshot);
        }

        if self.subscription.is_disconnected() && matches!(self.state, AppState::Waiting) {
            self.state = AppState::Error("Contact feed disconnected".to_owned());
        }

        match &mut self.state {
            AppState::Waiting => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Waiting for contacts...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load contacts");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(6.0);
                    ui.label(format!(
                        "Watching {} for changes.",
                        self.source.display()
                    ));
                });
            }
            AppState::Ready(model) => model.show(ctx, &self.source),
        }

        ctx.request_repaint_after(self.poll_interval);
    }
}

impl ViewModel {
    fn new(contacts: Vec<ContactRecord>) -> Self {
        let mut session = TreeSession::new();
        session.apply_snapshot(contacts);

        Self {
            session,
            search: String::new(),
            search_match_cache: None,
            feed_error: None,
            opened: None,
            canvas_size: Vec2::ZERO,
            show_connections: true,
        }
    }

    fn apply_snapshot(&mut self, contacts: Vec<ContactRecord>) {
        self.feed_error = None;
        if !self.session.apply_snapshot(contacts) {
            return;
        }

        if let Some(opened) = &self.opened
            && self.session.contact(opened).is_none()
        {
            self.opened = None;
        }
    }
}
