//! Bundled starter catalogs, embedded at compile time and parsed on demand.

use factorplan_core::data_loader::ItemRecord;
use factorplan_core::item::ItemDef;

use crate::schema::{CatalogError, catalog_from_records};

/// Satisfactory-style production chain: ores through Heavy Modular Frame,
/// Motor, and Computer.
const SATISFACTORY_JSON: &str = include_str!("../data/satisfactory.json");

/// Available bundled catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Satisfactory,
}

impl Preset {
    /// Stable identifier, usable as a save key.
    pub fn key(self) -> &'static str {
        match self {
            Preset::Satisfactory => "satisfactory",
        }
    }

    /// Look up a preset by its key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "satisfactory" => Some(Preset::Satisfactory),
            _ => None,
        }
    }

    /// Parse and validate this preset's item list.
    pub fn items(self) -> Result<Vec<ItemDef>, CatalogError> {
        let json = match self {
            Preset::Satisfactory => SATISFACTORY_JSON,
        };
        let records: Vec<ItemRecord> =
            serde_json::from_str(json).map_err(factorplan_core::data_loader::ItemLoadError::from)?;
        catalog_from_records(records)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
