//! Room placement
//!
//! Classic roguelike rejection sampling: propose random rectangles, throw
//! away any that come too close to an accepted room, carve the rest.

use super::config::RoomConfig;
use crate::rng::GameRng;
use crate::world::{GenerationState, Map, Rect};

/// Minimum gap, in tiles, between the outlines of two rooms
pub const ROOM_MARGIN: i32 = 1;

/// Would the candidate crowd any accepted room?
pub fn overlaps_any(candidate: &Rect, rooms: &[Rect]) -> bool {
    let padded = candidate.expanded(ROOM_MARGIN);
    rooms.iter().any(|r| padded.intersects(r))
}

/// Run `max_rooms` placement iterations against a fresh map
///
/// Rejected candidates are dropped silently; fewer rooms than requested is
/// a normal outcome. The first candidate is always accepted.
pub fn place_rooms(map: &mut Map, rng: &mut GameRng, config: &RoomConfig) {
    debug_assert_eq!(map.state(), GenerationState::Empty);

    let width = map.width();
    let height = map.height();
    let mut rejected = 0;

    for _ in 0..config.max_rooms {
        let w = rng.next_int(config.room_min_size, config.room_max_size);
        let h = rng.next_int(config.room_min_size, config.room_max_size);
        let x = rng.next_int(0, width - w - 1);
        let y = rng.next_int(0, height - h - 1);

        let candidate = Rect::new(x, y, w, h);

        if overlaps_any(&candidate, map.rooms()) {
            rejected += 1;
            continue;
        }

        map.add_room(candidate);
    }

    log::debug!(
        "Placed {} rooms ({} candidates rejected for overlap)",
        map.rooms().len(),
        rejected
    );
    map.transition(GenerationState::RoomsPlaced);
}
