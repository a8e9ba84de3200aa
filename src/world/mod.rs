//! World module
//!
//! Contains map data structures, tiles, and procedural generation.

pub mod geometry;
pub mod map;
pub mod tile;
pub mod occupancy;
pub mod generation;

pub use geometry::{Position, Rect};
pub use map::{GenerationState, Grid, Map};
pub use tile::Tile;
pub use occupancy::{EntityId, Occupancy, OccupancyError};
pub use generation::{generate, generate_map, generate_with_attempts, GenerationError};
