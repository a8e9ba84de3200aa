//! Procedural map generation
//!
//! Drives a map through `Empty -> RoomsPlaced -> Tunneled -> Verified`.
//! A layout that fails verification is thrown away and rebuilt from the
//! next seed (`seed + attempt`), up to a fixed number of attempts, so the
//! whole run stays a pure function of the requested seed.

pub mod config;
pub mod connectivity;
pub mod rooms;
pub mod tunnels;

pub use config::{validate, ConfigError, MapGenConfig, RoomConfig, DEFAULT_MAX_ATTEMPTS, MIN_ROOM_SIZE};
pub use connectivity::{flood_fill, unreachable_rooms, verify_connectivity, Reachability, Unreachable};
pub use rooms::{overlaps_any, place_rooms, ROOM_MARGIN};
pub use tunnels::{carve_l_corridor, carve_tunnels, LegOrder};

use thiserror::Error;

use super::Map;
use crate::rng::GameRng;

/// Why no map could be produced
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("invalid map configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error(
        "no connected layout for seed {seed} after {attempts} attempts \
         ({unreachable_rooms} room(s) unreachable on the last attempt)"
    )]
    GenerationExhausted {
        seed: u64,
        attempts: u32,
        unreachable_rooms: usize,
    },
}

/// Generate a verified map with the default retry bound
pub fn generate(width: i32, height: i32, seed: u64, config: &RoomConfig) -> Result<Map, GenerationError> {
    generate_with_attempts(width, height, seed, config, DEFAULT_MAX_ATTEMPTS)
}

/// Generate a verified map, trying at most `max_attempts` layouts
pub fn generate_with_attempts(
    width: i32,
    height: i32,
    seed: u64,
    config: &RoomConfig,
    max_attempts: u32,
) -> Result<Map, GenerationError> {
    // Nothing touches an RNG until the parameters are known to be sane
    validate(width, height, config, max_attempts)?;

    let map = retry_generation(seed, max_attempts, |attempt_seed| {
        build_layout(width, height, seed, attempt_seed, config)
    })?;

    log::info!(
        "Generated {}x{} map for seed {}: {} rooms, {} attempt(s)",
        width,
        height,
        seed,
        map.rooms().len(),
        map.attempts()
    );
    Ok(map)
}

/// Generate from a content-loader record
pub fn generate_map(seed: u64, config: &MapGenConfig) -> Result<Map, GenerationError> {
    generate_with_attempts(
        config.map_width,
        config.map_height,
        seed,
        &config.rooms(),
        config.max_attempts,
    )
}

/// One pass through the pipeline with its own RNG
fn build_layout(width: i32, height: i32, seed: u64, attempt_seed: u64, config: &RoomConfig) -> Result<Map, Unreachable> {
    let mut rng = GameRng::new(attempt_seed);
    let mut map = Map::new(width, height, seed);

    place_rooms(&mut map, &mut rng, config);
    carve_tunnels(&mut map, &mut rng);
    verify_connectivity(&mut map)?;

    Ok(map)
}

/// Bounded regeneration loop
///
/// `attempt` receives the seed for that attempt and either returns a
/// verified map or the rooms it failed to connect.
fn retry_generation<F>(seed: u64, max_attempts: u32, mut attempt: F) -> Result<Map, GenerationError>
where
    F: FnMut(u64) -> Result<Map, Unreachable>,
{
    let mut unreachable_rooms = 0;

    for n in 0..max_attempts {
        let attempt_seed = seed.wrapping_add(n as u64);
        match attempt(attempt_seed) {
            Ok(mut map) => {
                map.set_attempts(n + 1);
                return Ok(map);
            }
            Err(e) => {
                log::warn!("Layout for seed {} (attempt {}) failed verification: {}", attempt_seed, n + 1, e);
                unreachable_rooms = e.rooms.len();
            }
        }
    }

    log::error!("Map generation exhausted {} attempts for seed {}", max_attempts, seed);
    Err(GenerationError::GenerationExhausted {
        seed,
        attempts: max_attempts,
        unreachable_rooms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{GenerationState, Rect};

    fn config() -> RoomConfig {
        RoomConfig {
            max_rooms: 10,
            room_min_size: 4,
            room_max_size: 8,
        }
    }

    #[test]
    fn test_example_scenario() {
        let map = generate(40, 30, 42, &config()).unwrap();
        assert_eq!(map.state(), GenerationState::Verified);
        assert!((1..=10).contains(&map.rooms().len()));
        assert!(unreachable_rooms(&map).is_empty());
        assert_eq!(map.seed(), 42);

        let again = generate(40, 30, 42, &config()).unwrap();
        assert_eq!(map.grid(), again.grid());
        assert_eq!(map.rooms(), again.rooms());
    }

    #[test]
    fn test_room_cannot_fit() {
        let cfg = RoomConfig {
            max_rooms: 10,
            room_min_size: 6,
            room_max_size: 8,
        };
        let err = generate(5, 5, 1, &cfg).unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(ConfigError::RoomDoesNotFit { .. })));
    }

    #[test]
    fn test_oversized_map_is_rejected_before_allocating() {
        let cfg = RoomConfig {
            max_rooms: 1,
            room_min_size: 4,
            room_max_size: 8,
        };
        let err = generate(50_000, 50_000, 1, &cfg).unwrap_err();
        assert_eq!(
            err,
            GenerationError::Configuration(ConfigError::MapTooLarge { width: 50_000, height: 50_000 })
        );
    }

    #[test]
    fn test_original_game_parameters() {
        let cfg = RoomConfig {
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
        };
        let map = generate(80, 45, 12345, &cfg).unwrap();
        assert!(map.rooms().len() > 1);
        assert_eq!(map.spawn_points().len(), map.rooms().len() - 1);
        let start = map.start_pos().unwrap();
        assert!(map.is_walkable(start.x, start.y));
    }

    #[test]
    fn test_generate_map_uses_record() {
        let record = MapGenConfig::new(40, 30, config());
        let a = generate_map(7, &record).unwrap();
        let b = generate(40, 30, 7, &config()).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.width(), 40);
        assert_eq!(a.height(), 30);
    }

    #[test]
    fn test_border_is_never_carved() {
        let map = generate(30, 20, 99, &config()).unwrap();
        for x in 0..map.width() {
            assert!(!map.is_walkable(x, 0));
            assert!(!map.is_walkable(x, map.height() - 1));
        }
        for y in 0..map.height() {
            assert!(!map.is_walkable(0, y));
            assert!(!map.is_walkable(map.width() - 1, y));
        }
    }

    #[test]
    fn test_retry_exhaustion_is_reported() {
        let mut calls = Vec::new();
        let err = retry_generation(10, 3, |s| {
            calls.push(s);
            Err(Unreachable { rooms: vec![2, 4] })
        })
        .unwrap_err();

        assert_eq!(calls, vec![10, 11, 12]);
        assert_eq!(
            err,
            GenerationError::GenerationExhausted {
                seed: 10,
                attempts: 3,
                unreachable_rooms: 2,
            }
        );
    }

    #[test]
    fn test_retry_recovers_on_later_attempt() {
        let map = retry_generation(u64::MAX, 4, |s| {
            if s == u64::MAX {
                return Err(Unreachable { rooms: vec![1] });
            }
            let mut map = Map::new(10, 10, u64::MAX);
            map.add_room(Rect::new(1, 1, 3, 3));
            Ok(map)
        })
        .unwrap();
        assert_eq!(map.attempts(), 2);
        assert_eq!(map.seed(), u64::MAX);
    }
}
