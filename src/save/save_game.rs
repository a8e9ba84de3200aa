//! Game save/load system
//!
//! A save holds the seed and generation record, never the tiles. Loading
//! regenerates the map from them and checks the saved positions still
//! make sense on it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::ContentData;
use crate::rng::GameRng;
use crate::world::generation::MapGenConfig;
use crate::world::{generate_map, GenerationError, Map, Position};

/// Save file version for compatibility checking
pub const SAVE_VERSION: u32 = 1;

/// Keeps enemy rolls independent of the layout stream
const ENEMY_STREAM: u64 = 0x656e_656d_6965_7321;

/// Complete save data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub seed: u64,
    pub depth: u32,
    pub config: MapGenConfig,
    pub player: PlayerSaveData,
    #[serde(default)]
    pub enemies: Vec<EnemySaveData>,
}

/// Player-specific save data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSaveData {
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    #[serde(default)]
    pub inventory: Vec<String>,
}

/// Enemy save data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySaveData {
    pub name: String,
    pub position: Position,
    pub hp: i32,
}

impl SaveData {
    /// Save data for a freshly generated map, player on the start tile
    pub fn new_game(map: &Map, depth: u32, config: MapGenConfig, max_hp: i32) -> Self {
        Self {
            version: SAVE_VERSION,
            seed: map.seed(),
            depth,
            config,
            player: PlayerSaveData {
                position: map.start_pos().unwrap_or_default(),
                hp: max_hp,
                max_hp,
                inventory: Vec::new(),
            },
            enemies: Vec::new(),
        }
    }

    /// Put one enemy on each spawn point, rolled from the depth's templates
    ///
    /// Rolls use their own stream derived from the map seed, so the same
    /// save always gets the same enemies.
    pub fn populate_enemies(&mut self, map: &Map, content: &ContentData) {
        let mut rng = GameRng::new(map.seed() ^ ENEMY_STREAM);
        self.enemies = map
            .spawn_points()
            .into_iter()
            .filter_map(|position| {
                content.roll_enemy(&mut rng, self.depth).map(|t| EnemySaveData {
                    name: t.id.clone(),
                    position,
                    hp: t.hp,
                })
            })
            .collect();
        log::debug!("Populated {} enemies at depth {}", self.enemies.len(), self.depth);
    }
}

/// A loaded save together with its regenerated map
#[derive(Debug, Clone)]
pub struct LoadedGame {
    pub save: SaveData,
    pub map: Map,
}

/// Save error types
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("invalid save data: {0}")]
    InvalidData(String),
    #[error("could not regenerate map: {0}")]
    Generation(#[from] GenerationError),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SaveError + '_ {
    move |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "hollowdeep", "Cryptgen") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("saves");
        path
    } else {
        // Fallback to current directory
        PathBuf::from("./saves")
    }
}

/// Get the path for a specific save slot
pub fn save_path(slot: u8) -> PathBuf {
    let mut path = save_directory();
    path.push(format!("save_{}.json", slot));
    path
}

/// Check if a save exists in the given slot
pub fn save_exists(slot: u8) -> bool {
    save_path(slot).exists()
}

/// Write a save file, creating parent directories
pub fn save_to_path(save: &SaveData, path: &Path) -> Result<(), SaveError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_error(dir))?;
    }
    let json = serde_json::to_string_pretty(save)?;
    fs::write(path, json).map_err(io_error(path))?;

    log::info!("Game saved to {:?} (seed {}, depth {})", path, save.seed, save.depth);
    Ok(())
}

/// Read a save file and rebuild its map from the stored seed
pub fn load_from_path(path: &Path) -> Result<LoadedGame, SaveError> {
    let data = fs::read_to_string(path).map_err(io_error(path))?;
    let save: SaveData = serde_json::from_str(&data)?;

    // Version check
    if save.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save.version,
        });
    }

    let map = generate_map(save.seed, &save.config)?;
    check_positions(&save, &map)?;

    log::info!("Game loaded from {:?} (seed {}, depth {})", path, save.seed, save.depth);
    Ok(LoadedGame { save, map })
}

/// Saved entities must stand on floor of the regenerated map
fn check_positions(save: &SaveData, map: &Map) -> Result<(), SaveError> {
    let player = save.player.position;
    if !map.is_walkable(player.x, player.y) {
        return Err(SaveError::InvalidData(format!(
            "player position ({}, {}) is not walkable",
            player.x, player.y
        )));
    }
    if let Some(enemy) = save.enemies.iter().find(|e| !map.is_walkable(e.position.x, e.position.y)) {
        return Err(SaveError::InvalidData(format!(
            "{} at ({}, {}) is not on a walkable tile",
            enemy.name, enemy.position.x, enemy.position.y
        )));
    }
    Ok(())
}

/// Save the game to a slot
pub fn save_game(save: &SaveData, slot: u8) -> Result<(), SaveError> {
    save_to_path(save, &save_path(slot))
}

/// Load a game from a slot
pub fn load_game(slot: u8) -> Result<LoadedGame, SaveError> {
    load_from_path(&save_path(slot))
}

/// Delete a save slot
pub fn delete_save(slot: u8) -> Result<(), SaveError> {
    let path = save_path(slot);
    if path.exists() {
        fs::remove_file(&path).map_err(io_error(&path))?;
        log::info!("Deleted save slot {}", slot);
    }
    Ok(())
}
