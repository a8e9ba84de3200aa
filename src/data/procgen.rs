//! Procedural generation settings
//!
//! Map dimensions plus a table of room parameters that tightens as the
//! player descends.

use serde::{Deserialize, Serialize};

use crate::rng::level_seed;
use crate::world::generation::{MapGenConfig, DEFAULT_MAX_ATTEMPTS};
use crate::world::{generate_map, GenerationError, Map};

/// Map dimensions shared by every depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSettings {
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

/// Room parameters that apply from `min_depth` downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSettings {
    pub min_depth: u32,
    pub max_rooms: i32,
    pub room_min_size: i32,
    pub room_max_size: i32,
}

/// Contents of the procgen data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcgenData {
    pub map: MapSettings,
    pub depth_settings: Vec<DepthSettings>,
}

impl ProcgenData {
    /// Settings for a depth: the deepest entry whose `min_depth` has been reached
    ///
    /// Depths shallower than every entry use the first entry. An empty
    /// table falls back to the built-in defaults.
    pub fn settings_for_depth(&self, depth: u32) -> DepthSettings {
        self.depth_settings
            .iter()
            .filter(|s| s.min_depth <= depth)
            .max_by_key(|s| s.min_depth)
            .or_else(|| self.depth_settings.first())
            .copied()
            .unwrap_or_else(|| default_depth_settings()[0])
    }

    /// Generation record for a depth
    pub fn config_for_depth(&self, depth: u32) -> MapGenConfig {
        let s = self.settings_for_depth(depth);
        MapGenConfig {
            map_width: self.map.width,
            map_height: self.map.height,
            max_rooms: s.max_rooms,
            room_min_size: s.room_min_size,
            room_max_size: s.room_max_size,
            max_attempts: self.map.max_attempts,
        }
    }

    /// Generate one level of a run; each depth gets its own seed
    pub fn generate_level(&self, run_seed: u64, depth: u32) -> Result<Map, GenerationError> {
        let seed = level_seed(run_seed, depth);
        log::debug!("Depth {} of run {} uses seed {}", depth, run_seed, seed);
        generate_map(seed, &self.config_for_depth(depth))
    }
}

impl Default for ProcgenData {
    fn default() -> Self {
        Self {
            map: MapSettings {
                width: 80,
                height: 45,
                max_attempts: DEFAULT_MAX_ATTEMPTS,
            },
            depth_settings: default_depth_settings(),
        }
    }
}

/// Built-in depth table: smaller, more numerous rooms deeper down
pub fn default_depth_settings() -> Vec<DepthSettings> {
    vec![
        DepthSettings { min_depth: 1, max_rooms: 30, room_min_size: 6, room_max_size: 10 },
        DepthSettings { min_depth: 4, max_rooms: 36, room_min_size: 5, room_max_size: 9 },
        DepthSettings { min_depth: 8, max_rooms: 42, room_min_size: 4, room_max_size: 8 },
    ]
}
