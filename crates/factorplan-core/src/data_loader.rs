//! Item list loading from JSON.
//!
//! Feature-gated behind `data-loader`. Accepts the loosely-typed record shape
//! the surrounding application persists (nullable `output`/`time`, camelCase
//! `isPlaceholder`/`isDeleted` flags) and converts it into the typed
//! [`ItemKind`] variants the planner consumes.

use crate::item::{ItemDef, ItemKind, Requirement};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading an item list.
#[derive(Debug, thiserror::Error)]
pub enum ItemLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    /// A concrete item record is missing its output or cycle time.
    #[error("item '{0}' is neither a placeholder nor fully specified")]
    IncompleteItem(String),
}

// ---------------------------------------------------------------------------
// JSON data structures
// ---------------------------------------------------------------------------

/// On-disk representation of one item, matching the application's save shape.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct ItemRecord {
    pub name: String,
    #[serde(default)]
    pub output: Option<f64>,
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub required: Vec<RequirementRecord>,
    #[serde(default, rename = "isPlaceholder")]
    pub is_placeholder: bool,
    #[serde(default, rename = "isDeleted")]
    pub is_deleted: bool,
}

/// On-disk representation of one requirement entry.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct RequirementRecord {
    pub item: String,
    pub count: f64,
}

// ---------------------------------------------------------------------------
// Loading functions
// ---------------------------------------------------------------------------

/// Load an item list from a JSON string.
pub fn load_items_json(json: &str) -> Result<Vec<ItemDef>, ItemLoadError> {
    let records: Vec<ItemRecord> = serde_json::from_str(json)?;
    records.into_iter().map(convert_record).collect()
}

/// Load an item list from JSON bytes.
pub fn load_items_json_bytes(bytes: &[u8]) -> Result<Vec<ItemDef>, ItemLoadError> {
    let records: Vec<ItemRecord> = serde_json::from_slice(bytes)?;
    records.into_iter().map(convert_record).collect()
}

/// Convert one record into a typed definition.
///
/// Deleted wins over placeholder when both flags are set; records flagged
/// neither way must carry both `output` and `time`. Requirements on
/// placeholder or tombstone records are discarded, which is what makes the
/// "placeholder with inputs" state unrepresentable downstream.
pub fn convert_record(record: ItemRecord) -> Result<ItemDef, ItemLoadError> {
    if record.is_deleted {
        return Ok(ItemDef::tombstone(record.name));
    }
    if record.is_placeholder {
        return Ok(ItemDef::placeholder(record.name));
    }

    let (Some(output), Some(time)) = (record.output, record.time) else {
        return Err(ItemLoadError::IncompleteItem(record.name));
    };

    let required: Vec<Requirement> = record
        .required
        .into_iter()
        .map(|r| Requirement {
            item: r.item,
            count: r.count,
        })
        .collect();

    Ok(ItemDef {
        name: record.name,
        kind: ItemKind::Concrete {
            output,
            time,
            required,
        },
    })
}

// ===========================================================================
// Tests
// ===========================================================================
