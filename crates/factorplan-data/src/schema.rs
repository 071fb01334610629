//! Catalog-level validation on top of the raw record shape.
//!
//! The core's `data-loader` converts individual records; this module checks
//! whole catalogs: unique names and, for shipped presets, fully-resolved
//! requirement references. The planner tolerates dangling references at run
//! time, but a catalog file that ships with them is an authoring bug worth
//! rejecting up front.

use factorplan_core::data_loader::{ItemLoadError, ItemRecord, convert_record};
use factorplan_core::item::ItemDef;
use std::collections::HashSet;
use std::path::Path;

use crate::loader::{self, DataLoadError};

/// Errors that can occur while assembling a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Load(#[from] DataLoadError),
    #[error(transparent)]
    Item(#[from] ItemLoadError),
    #[error("duplicate item name '{name}'")]
    DuplicateName { name: String },
    #[error("item '{item}' requires undefined item '{required}'")]
    UnresolvedRef { item: String, required: String },
}

/// Convert raw records into definitions and validate the result as a
/// closed catalog.
pub fn catalog_from_records(records: Vec<ItemRecord>) -> Result<Vec<ItemDef>, CatalogError> {
    let items = records
        .into_iter()
        .map(convert_record)
        .collect::<Result<Vec<_>, _>>()?;
    validate_catalog(&items)?;
    Ok(items)
}

/// Check that names are unique and every requirement reference resolves.
pub fn validate_catalog(items: &[ItemDef]) -> Result<(), CatalogError> {
    let mut names: HashSet<&str> = HashSet::with_capacity(items.len());
    for item in items {
        if !names.insert(&item.name) {
            return Err(CatalogError::DuplicateName {
                name: item.name.clone(),
            });
        }
    }

    for item in items {
        for req in item.required() {
            if !names.contains(req.item.as_str()) {
                return Err(CatalogError::UnresolvedRef {
                    item: item.name.clone(),
                    required: req.item.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Load and validate a catalog from a single file (format by extension).
pub fn load_catalog(path: &Path) -> Result<Vec<ItemDef>, CatalogError> {
    let records: Vec<ItemRecord> = loader::deserialize_list(path, "items")?;
    catalog_from_records(records)
}

/// Load and validate a catalog from a directory containing an `items` file
/// in any supported format.
pub fn load_catalog_dir(dir: &Path) -> Result<Vec<ItemDef>, CatalogError> {
    let path = loader::require_data_file(dir, "items")?;
    load_catalog(&path)
}

// ===========================================================================
// Tests
// ===========================================================================
