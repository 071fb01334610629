//! File plumbing for item catalogs: format detection (RON/TOML/JSON), file
//! discovery, and deserialization helpers. Shape-level validation lives in
//! [`crate::schema`].

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during catalog file loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required catalog file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a catalog file with the given base name (without
/// extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its format (detected from
/// extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Json => serde_json::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Toml => toml::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Json => serde_json::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Toml => {
            let table: toml::Value = toml::from_str(&content).map_err(|e| DataLoadError::Parse {
                file: path.to_path_buf(),
                detail: e.to_string(),
            })?;
            let array = table
                .get(toml_key)
                .ok_or_else(|| DataLoadError::Parse {
                    file: path.to_path_buf(),
                    detail: format!("missing key '{toml_key}' in TOML file"),
                })?
                .clone();
            array
                .try_into()
                .map_err(|e: toml::de::Error| DataLoadError::Parse {
                    file: path.to_path_buf(),
                    detail: e.to_string(),
                })
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use factorplan_core::data_loader::ItemRecord;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "factorplan_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("items.ron")).unwrap(), Format::Ron);
        assert_eq!(
            detect_format(Path::new("items.toml")).unwrap(),
            Format::Toml
        );
        assert_eq!(
            detect_format(Path::new("items.json")).unwrap(),
            Format::Json
        );
    }

    #[test]
    fn detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("items.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("items")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // find_data_file / require_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_found() {
        let dir = make_test_dir("find");
        fs::write(dir.join("items.json"), "[]").unwrap();

        let result = find_data_file(&dir, "items").unwrap();
        assert_eq!(result, Some(dir.join("items.json")));

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_missing() {
        let dir = make_test_dir("find_missing");
        assert_eq!(find_data_file(&dir, "items").unwrap(), None);
        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("items.ron"), "[]").unwrap();
        fs::write(dir.join("items.json"), "[]").unwrap();

        assert!(matches!(
            find_data_file(&dir, "items"),
            Err(DataLoadError::ConflictingFormats { .. })
        ));

        cleanup(&dir);
    }

    #[test]
    fn require_data_file_missing() {
        let dir = make_test_dir("require_missing");
        assert!(matches!(
            require_data_file(&dir, "items"),
            Err(DataLoadError::MissingRequired { .. })
        ));
        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // deserialize_list
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_list_json() {
        let dir = make_test_dir("list_json");
        let path = dir.join("items.json");
        fs::write(
            &path,
            r#"[{"name": "Iron Ore", "output": 1, "time": 1}]"#,
        )
        .unwrap();

        let records: Vec<ItemRecord> = deserialize_list(&path, "items").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Iron Ore");

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml_extracts_key() {
        let dir = make_test_dir("list_toml");
        let path = dir.join("items.toml");
        fs::write(
            &path,
            "[[items]]\nname = \"Iron Ore\"\noutput = 1.0\ntime = 1.0\n",
        )
        .unwrap();

        let records: Vec<ItemRecord> = deserialize_list(&path, "items").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].output, Some(1.0));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml_missing_key() {
        let dir = make_test_dir("list_toml_missing");
        let path = dir.join("items.toml");
        fs::write(&path, "[[recipes]]\nname = \"x\"\n").unwrap();

        let result: Result<Vec<ItemRecord>, _> = deserialize_list(&path, "items");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_ron() {
        let dir = make_test_dir("list_ron");
        let path = dir.join("items.ron");
        fs::write(
            &path,
            r#"[(name: "Iron Ore", output: Some(1.0), time: Some(1.0))]"#,
        )
        .unwrap();

        let records: Vec<ItemRecord> = deserialize_list(&path, "items").unwrap();
        assert_eq!(records.len(), 1);

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_parse_error() {
        let dir = make_test_dir("list_bad");
        let path = dir.join("items.json");
        fs::write(&path, "not json").unwrap();

        let result: Result<Vec<ItemRecord>, _> = deserialize_list(&path, "items");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }
}
