mod feed;
mod parse;
mod record;

pub use feed::{
    SnapshotPublisher, SnapshotResult, Subscription, load_snapshot, snapshot_channel, watch_file,
};
pub use parse::parse_snapshot;
pub use record::{ContactRecord, DEFAULT_RELATIONSHIP_LEVEL};
