//! Map data structure
//!
//! The 2D grid representing a dungeon floor, plus the rooms carved into it.

use std::fmt;

use super::geometry::{Position, Rect};
use super::tile::Tile;

/// Fixed-size tile array with bounds-checked access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create a grid filled with walls
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width.max(0) as usize * height.max(0) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    pub fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Set a tile; out-of-bounds writes are ignored and reported as `false`
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.tiles[idx] = tile;
            true
        } else {
            false
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

/// Generation pipeline stage of a map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Empty,
    RoomsPlaced,
    Tunneled,
    Verified,
}

/// A generated dungeon floor
#[derive(Debug, Clone)]
pub struct Map {
    grid: Grid,
    rooms: Vec<Rect>,
    seed: u64,
    attempts: u32,
    state: GenerationState,
}

impl Map {
    /// Create an empty map filled with walls
    pub(crate) fn new(width: i32, height: i32, seed: u64) -> Self {
        Self {
            grid: Grid::new(width, height),
            rooms: Vec::new(),
            seed,
            attempts: 0,
            state: GenerationState::Empty,
        }
    }

    pub(crate) fn transition(&mut self, state: GenerationState) {
        log::debug!("Map state transition: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub(crate) fn set_attempts(&mut self, attempts: u32) {
        self.attempts = attempts;
    }

    /// Turn a tile into floor
    pub(crate) fn carve(&mut self, pos: Position) {
        self.grid.set(pos.x, pos.y, Tile::Floor);
    }

    /// Carve a room's interior and record it
    pub(crate) fn add_room(&mut self, room: Rect) {
        for pos in room.interior() {
            self.carve(pos);
        }
        self.rooms.push(room);
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rooms in generation order; the first is the player's start room
    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    /// Seed requested by the caller (what Save/Load persists)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of generation attempts it took to reach a verified layout
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.in_bounds(x, y)
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        self.grid.get(x, y)
    }

    /// Check if a position is walkable
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.grid.get(x, y).map_or(false, |t| t.is_walkable())
    }

    /// Player start position: center of the first room
    pub fn start_pos(&self) -> Option<Position> {
        self.rooms.first().map(Rect::center)
    }

    /// Enemy spawn points: one per room after the first
    pub fn spawn_points(&self) -> Vec<Position> {
        self.rooms.iter().skip(1).map(Rect::center).collect()
    }

    /// Get all walkable positions
    pub fn walkable_positions(&self) -> Vec<Position> {
        self.grid
            .tiles()
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_walkable())
            .map(|(idx, _)| {
                let (x, y) = self.grid.idx_to_xy(idx);
                Position::new(x, y)
            })
            .collect()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            let row: String = (0..self.width())
                .filter_map(|x| self.tile(x, y))
                .map(|t| t.glyph())
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_is_all_walls() {
        let map = Map::new(10, 8, 0);
        assert_eq!(map.state(), GenerationState::Empty);
        assert!(map.walkable_positions().is_empty());
        assert_eq!(map.grid().tiles().len(), 80);
    }

    #[test]
    fn test_out_of_bounds_is_not_walkable() {
        let mut map = Map::new(4, 4, 0);
        map.carve(Position::new(0, 0));
        assert!(map.is_walkable(0, 0));
        assert!(!map.is_walkable(-1, 0));
        assert!(!map.is_walkable(4, 0));
        assert!(map.tile(0, 4).is_none());
    }

    #[test]
    fn test_out_of_bounds_write_is_ignored() {
        let mut grid = Grid::new(3, 3);
        assert!(!grid.set(3, 1, Tile::Floor));
        assert!(!grid.set(-1, 1, Tile::Floor));
        assert!(grid.tiles().iter().all(|t| *t == Tile::Wall));
    }

    #[test]
    fn test_add_room_carves_interior_only() {
        let mut map = Map::new(10, 10, 0);
        let room = Rect::new(1, 1, 4, 4);
        map.add_room(room);
        assert_eq!(map.walkable_positions().len(), 9);
        assert!(!map.is_walkable(1, 1));
        assert!(map.is_walkable(2, 2));
        assert_eq!(map.start_pos(), Some(Position::new(3, 3)));
        assert!(map.spawn_points().is_empty());
    }

    #[test]
    fn test_display_dump() {
        let mut map = Map::new(4, 3, 0);
        map.carve(Position::new(1, 1));
        map.carve(Position::new(2, 1));
        assert_eq!(map.to_string(), "####\n#..#\n####\n");
    }
}
