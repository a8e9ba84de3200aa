//! Cryptgen - seeded dungeon generation for Hollowdeep-style roguelikes
//!
//! Places rooms, digs corridors between them, and proves every room can
//! be reached from the start before handing the map over. A map is a
//! pure function of its seed and configuration, which is what lets saves
//! store the seed instead of the tiles.

pub mod rng;
pub mod world;
pub mod data;
pub mod save;

// Re-export commonly used types
pub use rng::{level_seed, GameRng};
pub use world::generation::{ConfigError, MapGenConfig, RoomConfig};
pub use world::{generate, generate_map, GenerationError, Map, Position, Rect, Tile};
