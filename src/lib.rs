//! Relationship-tier layout and interaction core for a personal network tree.

pub mod contacts;
pub mod logging;
pub mod search;
pub mod tree;
pub mod util;
