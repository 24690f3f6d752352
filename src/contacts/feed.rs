use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use super::parse::parse_snapshot;
use super::record::ContactRecord;

pub type SnapshotResult = Result<Vec<ContactRecord>, String>;

/// Receiving end of a live contact collection.
///
/// Every delivery is a full snapshot. Dropping the subscription detaches it:
/// the producer observes this and never delivers again.
pub struct Subscription {
    rx: Receiver<SnapshotResult>,
    active: Arc<AtomicBool>,
    disconnected: bool,
}

/// Producing end of a live contact collection.
#[derive(Clone)]
pub struct SnapshotPublisher {
    tx: Sender<SnapshotResult>,
    active: Arc<AtomicBool>,
}

pub fn snapshot_channel() -> (SnapshotPublisher, Subscription) {
    let (tx, rx) = mpsc::channel();
    let active = Arc::new(AtomicBool::new(true));

    (
        SnapshotPublisher {
            tx,
            active: Arc::clone(&active),
        },
        Subscription {
            rx,
            active,
            disconnected: false,
        },
    )
}

impl Subscription {
    /// Drains pending deliveries and returns only the newest one.
    pub fn latest(&mut self) -> Option<SnapshotResult> {
        let mut newest = None;
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => newest = Some(snapshot),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.disconnected = true;
                    break;
                }
            }
        }
        newest
    }

    /// Blocks until at least one delivery arrives, then behaves like [`Self::latest`].
    pub fn wait_latest(&mut self, timeout: Duration) -> Option<SnapshotResult> {
        match self.rx.recv_timeout(timeout) {
            Ok(first) => Some(self.latest().unwrap_or(first)),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.disconnected = true;
                None
            }
        }
    }

    /// True once every producer has gone away and the backlog was drained.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

impl SnapshotPublisher {
    pub fn publish(&self, contacts: Vec<ContactRecord>) -> bool {
        self.send(Ok(contacts))
    }

    pub fn publish_error(&self, error: impl Into<String>) -> bool {
        self.send(Err(error.into()))
    }

    /// False once the subscriber has been dropped.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    fn send(&self, snapshot: SnapshotResult) -> bool {
        if !self.is_active() {
            return false;
        }
        self.tx.send(snapshot).is_ok()
    }
}

pub fn load_snapshot(path: &Path) -> Result<Vec<ContactRecord>> {
    let raw = read_snapshot(path)?;
    decode_snapshot(path, &raw)
}

fn read_snapshot(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read contact snapshot {}", path.display()))
}

fn decode_snapshot(path: &Path, raw: &str) -> Result<Vec<ContactRecord>> {
    parse_snapshot(raw)
        .with_context(|| format!("failed to decode contact snapshot {}", path.display()))
}

/// Watches a JSON snapshot file and publishes it whenever it changes.
///
/// The first state of the file is always delivered, including a read or
/// decode error. Changes are detected by content, so a rewrite that keeps
/// the length and mtime is still picked up.
pub fn watch_file(path: impl Into<PathBuf>, poll_interval: Duration) -> Result<Subscription> {
    let path = path.into();
    let (publisher, subscription) = snapshot_channel();

    let thread_path = path.clone();
    thread::Builder::new()
        .name("contact-feed".to_owned())
        .spawn(move || run_file_watch(&publisher, &thread_path, poll_interval))
        .with_context(|| format!("failed to spawn watcher for {}", path.display()))?;

    info!(
        "event=feed_started path={} poll_ms={}",
        path.display(),
        poll_interval.as_millis()
    );
    Ok(subscription)
}

/// `None` while the file cannot be read.
fn content_hash(raw: &Result<String>) -> Option<u64> {
    let raw = raw.as_ref().ok()?;
    let mut hasher = DefaultHasher::new();
    raw.hash(&mut hasher);
    Some(hasher.finish())
}

fn run_file_watch(publisher: &SnapshotPublisher, path: &Path, poll_interval: Duration) {
    let mut last_hash: Option<Option<u64>> = None;

    while publisher.is_active() {
        let raw = read_snapshot(path);
        let hash = content_hash(&raw);
        if last_hash != Some(hash) {
            let snapshot = raw
                .and_then(|raw| decode_snapshot(path, &raw))
                .map_err(|error| format!("{error:#}"));
            match &snapshot {
                Ok(contacts) => debug!(
                    "event=snapshot_loaded path={} contacts={}",
                    path.display(),
                    contacts.len()
                ),
                Err(error) => warn!(
                    "event=snapshot_failed path={} error={error}",
                    path.display()
                ),
            }

            if !publisher.send(snapshot) {
                break;
            }
            last_hash = Some(hash);
        }

        thread::sleep(poll_interval);
    }

    debug!("event=feed_stopped path={}", path.display());
}
