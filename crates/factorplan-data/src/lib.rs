//! Catalog loading for Factorplan: file discovery and deserialization with
//! RON/JSON/TOML format detection, catalog validation, and bundled presets.

pub mod loader;
pub mod presets;
pub mod schema;

pub use loader::DataLoadError;
pub use presets::Preset;
pub use schema::{CatalogError, load_catalog, load_catalog_dir};
