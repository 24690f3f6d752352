use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

use super::record::ContactRecord;

/// Decodes a full contact snapshot.
///
/// Accepts either a bare array of contact documents or an object with a
/// `contacts` array. Entries that are not valid contact documents are skipped.
pub fn parse_snapshot(raw: &str) -> Result<Vec<ContactRecord>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in contact snapshot")?;

    let entries = match &parsed {
        Value::Array(entries) => entries,
        Value::Object(object) => object
            .get("contacts")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("contact snapshot object has no `contacts` array"))?,
        _ => return Err(anyhow!("unexpected JSON type for contact snapshot")),
    };

    let mut contacts = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        match ContactRecord::deserialize(entry) {
            Ok(record) => contacts.push(record),
            Err(error) => {
                warn!("event=snapshot_entry_skipped position={position} error={error}");
            }
        }
    }

    Ok(contacts)
}
