//! Save/load system
//!
//! Persists the seed and generation record; maps are rebuilt on load.

pub mod save_game;

pub use save_game::{
    SaveData, PlayerSaveData, EnemySaveData, LoadedGame, SaveError, SAVE_VERSION,
    save_game, load_game, delete_save, save_exists, save_path, save_directory,
    save_to_path, load_from_path,
};
