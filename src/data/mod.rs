//! Data loading and external generation content
//!
//! Generation settings and content templates live in external RON or
//! JSON files so depth tuning does not need a rebuild.

pub mod content;
pub mod loader;
pub mod procgen;

pub use content::{ContentData, EnemyTemplate, ItemTemplate};
pub use loader::{
    export_default_content, export_default_procgen, load_content_or_default, load_procgen_or_default, read_content,
    read_procgen, DataError, DataManager, DEFAULT_DATA_DIR,
};
pub use procgen::{DepthSettings, MapSettings, ProcgenData};
