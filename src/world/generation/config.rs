//! Generation parameters and their validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest room outline that still has an interior tile
pub const MIN_ROOM_SIZE: i32 = 2;

/// Full regeneration attempts before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Room placement parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub max_rooms: i32,
    pub room_min_size: i32,
    pub room_max_size: i32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
        }
    }
}

/// Map generation record as handed over by the content loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapGenConfig {
    pub map_width: i32,
    pub map_height: i32,
    pub max_rooms: i32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl MapGenConfig {
    pub fn new(map_width: i32, map_height: i32, rooms: RoomConfig) -> Self {
        Self {
            map_width,
            map_height,
            max_rooms: rooms.max_rooms,
            room_min_size: rooms.room_min_size,
            room_max_size: rooms.room_max_size,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn rooms(&self) -> RoomConfig {
        RoomConfig {
            max_rooms: self.max_rooms,
            room_min_size: self.room_min_size,
            room_max_size: self.room_max_size,
        }
    }
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self::new(80, 45, RoomConfig::default())
    }
}

/// Rejected generation parameters
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    NonPositiveDimensions { width: i32, height: i32 },
    #[error("a {width}x{height} map has more tiles than can be indexed")]
    MapTooLarge { width: i32, height: i32 },
    #[error("max_rooms must be positive, got {0}")]
    NoRooms(i32),
    #[error("room_min_size must be at least {min}, got {0}", min = MIN_ROOM_SIZE)]
    RoomTooSmall(i32),
    #[error("room_min_size ({min}) is larger than room_max_size ({max})")]
    InvertedRoomSize { min: i32, max: i32 },
    #[error("rooms up to {size} tiles cannot fit in a {width}x{height} map")]
    RoomDoesNotFit { size: i32, width: i32, height: i32 },
    #[error("max_attempts must be at least 1")]
    NoAttempts,
}

/// Check that every room size the placement loop can draw fits the grid
pub fn validate(width: i32, height: i32, rooms: &RoomConfig, max_attempts: u32) -> Result<(), ConfigError> {
    if width <= 0 || height <= 0 {
        return Err(ConfigError::NonPositiveDimensions { width, height });
    }
    // Tile indices are computed as y * width + x in i32
    if width.checked_mul(height).is_none() {
        return Err(ConfigError::MapTooLarge { width, height });
    }
    if rooms.max_rooms <= 0 {
        return Err(ConfigError::NoRooms(rooms.max_rooms));
    }
    if rooms.room_min_size < MIN_ROOM_SIZE {
        return Err(ConfigError::RoomTooSmall(rooms.room_min_size));
    }
    if rooms.room_min_size > rooms.room_max_size {
        return Err(ConfigError::InvertedRoomSize {
            min: rooms.room_min_size,
            max: rooms.room_max_size,
        });
    }
    // The outline spans size + 1 tiles and must stay inside the grid
    if rooms.room_max_size > width.min(height) - 1 {
        return Err(ConfigError::RoomDoesNotFit {
            size: rooms.room_max_size,
            width,
            height,
        });
    }
    if max_attempts == 0 {
        return Err(ConfigError::NoAttempts);
    }
    Ok(())
}
