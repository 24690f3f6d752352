mod app;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::error;

use network_tree::contacts::watch_file;
use network_tree::logging::{default_log_level, init_logging};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON contact snapshot to watch (array or `{ "contacts": [...] }`).
    #[arg(long, default_value = "contacts.json")]
    contacts: PathBuf,

    #[arg(long, default_value_t = 500)]
    poll_interval_ms: u64,

    #[arg(long, default_value = default_log_level())]
    log_level: String,

    /// Write rotating log files here instead of stderr.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = init_logging(&args.log_level, args.log_dir.as_deref())?;

    let poll_interval = Duration::from_millis(args.poll_interval_ms.max(50));
    let subscription = watch_file(args.contacts.clone(), poll_interval)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Network Tree",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::NetworkTreeApp::new(
                cc,
                args.contacts.clone(),
                poll_interval,
                subscription,
            )))
        }),
    )
    .map_err(|error| {
        error!("event=viewer_failed error={error}");
        anyhow!("{error}")
    })
    .context("failed to run the network tree viewer")
}
