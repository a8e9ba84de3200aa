//! Data loader
//!
//! Loads generation settings and content templates from external RON or
//! JSON files, with fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::content::ContentData;
use super::procgen::ProcgenData;

/// Directory searched by [`DataManager::new`]
pub const DEFAULT_DATA_DIR: &str = "assets/data";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("failed to serialize data: {0}")]
    Serialize(String),
    #[error("unsupported data file extension: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// On-disk encodings we understand, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Ron,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, DataError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Ok(Format::Ron),
            Some("json") => Ok(Format::Json),
            _ => Err(DataError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Manages external generation data
#[derive(Debug, Clone, Default)]
pub struct DataManager {
    pub procgen: ProcgenData,
    pub content: ContentData,
}

impl DataManager {
    /// Load from the default data directory, using defaults for anything missing
    pub fn new() -> Self {
        Self::load_from_dir(Path::new(DEFAULT_DATA_DIR))
    }

    /// Look for `<name>.ron`, then `<name>.json`, in `base_path` for
    /// both `procgen` and `content`
    pub fn load_from_dir(base_path: &Path) -> Self {
        let procgen = match find_data_file(base_path, "procgen") {
            Some(path) => load_procgen_or_default(&path),
            None => {
                log::info!("No procgen data in {:?}, using defaults", base_path);
                ProcgenData::default()
            }
        };
        let content = match find_data_file(base_path, "content") {
            Some(path) => load_content_or_default(&path),
            None => {
                log::info!("No content data in {:?}, using defaults", base_path);
                ContentData::default()
            }
        };
        Self { procgen, content }
    }
}

fn find_data_file(base_path: &Path, name: &str) -> Option<PathBuf> {
    ["ron", "json"]
        .iter()
        .map(|ext| base_path.join(format!("{}.{}", name, ext)))
        .find(|p| p.exists())
}

fn read_data<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let format = Format::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = match format {
        Format::Ron => ron::from_str(&text).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(&text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| DataError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn write_data<T: Serialize>(data: &T, path: &Path) -> Result<(), DataError> {
    let text = match Format::from_path(path)? {
        Format::Ron => ron::ser::to_string_pretty(data, ron::ser::PrettyConfig::default())
            .map_err(|e| DataError::Serialize(e.to_string()))?,
        Format::Json => serde_json::to_string_pretty(data).map_err(|e| DataError::Serialize(e.to_string()))?,
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| DataError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a procgen file
pub fn read_procgen(path: &Path) -> Result<ProcgenData, DataError> {
    let data: ProcgenData = read_data(path)?;
    log::info!(
        "Loaded {} depth profiles from {:?}",
        data.depth_settings.len(),
        path
    );
    Ok(data)
}

/// Like [`read_procgen`], but a bad or missing file yields the defaults
pub fn load_procgen_or_default(path: &Path) -> ProcgenData {
    read_procgen(path).unwrap_or_else(|e| {
        log::warn!("{}. Using default procgen data.", e);
        ProcgenData::default()
    })
}

/// Write the built-in defaults, format chosen by extension
pub fn export_default_procgen(path: &Path) -> Result<(), DataError> {
    write_data(&ProcgenData::default(), path)?;
    log::info!("Exported default procgen data to {:?}", path);
    Ok(())
}

/// Read and parse a content file; `items` and `enemies` must both be present
pub fn read_content(path: &Path) -> Result<ContentData, DataError> {
    let data: ContentData = read_data(path)?;
    log::info!(
        "Loaded {} items and {} enemies from {:?}",
        data.items.len(),
        data.enemies.len(),
        path
    );
    Ok(data)
}

/// Like [`read_content`], but a bad or missing file yields the defaults
pub fn load_content_or_default(path: &Path) -> ContentData {
    read_content(path).unwrap_or_else(|e| {
        log::warn!("{}. Using default content.", e);
        ContentData::default()
    })
}

pub fn export_default_content(path: &Path) -> Result<(), DataError> {
    write_data(&ContentData::default(), path)?;
    log::info!("Exported default content to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_and_reload_ron() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("procgen.ron");

        export_default_procgen(&path).unwrap();
        assert!(path.exists(), "procgen.ron not created");
        assert_eq!(read_procgen(&path).unwrap(), ProcgenData::default());
    }

    #[test]
    fn test_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("procgen.json");
        fs::write(
            &path,
            r#"{
                "map": { "width": 40, "height": 30 },
                "depth_settings": [
                    { "min_depth": 1, "max_rooms": 10, "room_min_size": 4, "room_max_size": 8 }
                ]
            }"#,
        )
        .unwrap();

        let data = read_procgen(&path).unwrap();
        assert_eq!(data.map.width, 40);
        assert_eq!(data.config_for_depth(3).max_rooms, 10);

        let manager = DataManager::load_from_dir(dir.path());
        assert_eq!(manager.procgen, data);
    }

    #[test]
    fn test_bad_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("procgen.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(read_procgen(&path), Err(DataError::Parse { .. })));
        assert_eq!(load_procgen_or_default(&path), ProcgenData::default());

        let missing = dir.path().join("missing.ron");
        assert!(matches!(read_procgen(&missing), Err(DataError::Io { .. })));
        assert!(matches!(
            read_procgen(&dir.path().join("procgen.toml")),
            Err(DataError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_empty_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = DataManager::load_from_dir(dir.path());
        assert_eq!(manager.procgen, ProcgenData::default());
        assert_eq!(manager.content, ContentData::default());
    }

    #[test]
    fn test_content_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        fs::write(
            &path,
            r#"{
                "items": [{ "id": "torch", "name": "Torch", "glyph": "(" }],
                "enemies": [
                    { "id": "bat", "name": "Bat", "glyph": "b", "hp": 3 },
                    { "id": "lich", "name": "Lich", "glyph": "L", "hp": 40, "min_depth": 9 }
                ]
            }"#,
        )
        .unwrap();

        let content = read_content(&path).unwrap();
        assert_eq!(content.items.len(), 1);
        assert_eq!(content.enemies_for_depth(1).len(), 1);

        let manager = DataManager::load_from_dir(dir.path());
        assert_eq!(manager.content, content);
        assert_eq!(manager.procgen, ProcgenData::default());
    }

    #[test]
    fn test_content_requires_both_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        fs::write(&path, r#"{ "items": [] }"#).unwrap();

        match read_content(&path) {
            Err(DataError::Parse { message, .. }) => assert!(message.contains("enemies"), "{}", message),
            other => panic!("expected a parse error, got {:?}", other),
        }
        assert_eq!(load_content_or_default(&path), ContentData::default());

        let ron_path = dir.path().join("content.ron");
        fs::write(&ron_path, "(enemies: [])").unwrap();
        assert!(matches!(read_content(&ron_path), Err(DataError::Parse { .. })));
    }

    #[test]
    fn test_export_and_reload_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("content.ron");

        export_default_content(&path).unwrap();
        assert_eq!(read_content(&path).unwrap(), ContentData::default());
        assert_eq!(DataManager::load_from_dir(path.parent().unwrap()).content, ContentData::default());
    }
}
