mod category;
mod layout;
mod session;
mod transform;
mod viewport;

pub use category::RelationshipCategory;
pub use layout::{
    GraphNode, LayoutParams, Tier, TierEdge, TreeLayout, compute_layout, compute_layout_with,
};
pub use session::TreeSession;
pub use transform::{NodeSizes, Point, ScreenCircle, Transform, edge_segment};
pub use viewport::{
    MAX_SCALE, MIN_SCALE, PreviewCard, Selection, TapOutcome, ViewportState,
};
