//! Reachability check over floor tiles
//!
//! Breadth-first flood fill from the start room's center using 4-way
//! steps. A map passes when every room center is in the filled set.

use std::collections::VecDeque;

use thiserror::Error;

use crate::world::{GenerationState, Map, Position};

/// Rooms whose centers could not be reached from the start room
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{} room(s) unreachable from the start room: {:?}", .rooms.len(), .rooms)]
pub struct Unreachable {
    /// Indices into the map's room sequence
    pub rooms: Vec<usize>,
}

/// Set of tiles reachable from an origin
#[derive(Debug, Clone)]
pub struct Reachability {
    width: i32,
    height: i32,
    reached: Vec<bool>,
    count: usize,
}

impl Reachability {
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.width
            && pos.y >= 0
            && pos.y < self.height
            && self.reached[pos.y as usize * self.width as usize + pos.x as usize]
    }

    /// Number of reachable tiles
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Flood fill over walkable tiles starting at `origin`
///
/// An origin that is itself a wall reaches nothing.
pub fn flood_fill(map: &Map, origin: Position) -> Reachability {
    let width = map.width();
    let height = map.height();
    let mut reached = vec![false; map.grid().tiles().len()];
    let mut count = 0;
    let mut queue = VecDeque::new();

    if map.is_walkable(origin.x, origin.y) {
        reached[map.grid().xy_to_idx(origin.x, origin.y)] = true;
        count += 1;
        queue.push_back(origin);
    }

    while let Some(pos) = queue.pop_front() {
        for next in pos.cardinal_neighbors() {
            if !map.is_walkable(next.x, next.y) {
                continue;
            }
            let idx = map.grid().xy_to_idx(next.x, next.y);
            if !reached[idx] {
                reached[idx] = true;
                count += 1;
                queue.push_back(next);
            }
        }
    }

    Reachability { width, height, reached, count }
}

/// Rooms whose centers the start room cannot reach
pub fn unreachable_rooms(map: &Map) -> Vec<usize> {
    let Some(start) = map.start_pos() else {
        return Vec::new();
    };
    let reach = flood_fill(map, start);
    map.rooms()
        .iter()
        .enumerate()
        .filter(|(_, room)| !reach.contains(room.center()))
        .map(|(i, _)| i)
        .collect()
}

/// Check the connectivity invariant and mark the map verified
pub fn verify_connectivity(map: &mut Map) -> Result<(), Unreachable> {
    debug_assert_eq!(map.state(), GenerationState::Tunneled);

    let rooms = unreachable_rooms(map);
    if !rooms.is_empty() {
        return Err(Unreachable { rooms });
    }
    map.transition(GenerationState::Verified);
    Ok(())
}
