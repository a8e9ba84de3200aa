//! Entity occupancy
//!
//! Entity positions are tracked here, next to the map rather than in it,
//! so a generated map's tiles never change after verification.

use std::collections::HashMap;

use thiserror::Error;

use super::{Map, Position};

/// Opaque id handed out by whatever owns the entities
pub type EntityId = u32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OccupancyError {
    #[error("tile ({}, {}) is not walkable", .0.x, .0.y)]
    NotWalkable(Position),
    #[error("tile ({}, {}) is occupied by entity {}", .0.x, .0.y, .1)]
    Occupied(Position, EntityId),
    #[error("entity {0} is not on the map")]
    UnknownEntity(EntityId),
    #[error("entity {} is already at ({}, {})", .0, .1.x, .1.y)]
    AlreadyPlaced(EntityId, Position),
}

/// Which entity stands on which tile
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    by_pos: HashMap<Position, EntityId>,
    by_entity: HashMap<EntityId, Position>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Is the tile walkable and unoccupied?
    pub fn is_free(&self, map: &Map, pos: Position) -> bool {
        map.is_walkable(pos.x, pos.y) && !self.by_pos.contains_key(&pos)
    }

    pub fn entity_at(&self, pos: Position) -> Option<EntityId> {
        self.by_pos.get(&pos).copied()
    }

    pub fn position_of(&self, entity: EntityId) -> Option<Position> {
        self.by_entity.get(&entity).copied()
    }

    /// Place an entity that is not yet on the map
    ///
    /// Entities already placed must go through [`Occupancy::move_entity`].
    pub fn occupy(&mut self, map: &Map, entity: EntityId, pos: Position) -> Result<(), OccupancyError> {
        if let Some(current) = self.position_of(entity) {
            return Err(OccupancyError::AlreadyPlaced(entity, current));
        }
        self.check_target(map, pos)?;
        self.by_entity.insert(entity, pos);
        self.by_pos.insert(pos, entity);
        Ok(())
    }

    /// Remove an entity, returning where it stood
    pub fn vacate(&mut self, entity: EntityId) -> Option<Position> {
        let pos = self.by_entity.remove(&entity)?;
        self.by_pos.remove(&pos);
        Some(pos)
    }

    pub fn move_entity(&mut self, map: &Map, entity: EntityId, to: Position) -> Result<(), OccupancyError> {
        let from = self.position_of(entity).ok_or(OccupancyError::UnknownEntity(entity))?;
        if from == to {
            return Ok(());
        }
        self.check_target(map, to)?;
        self.by_pos.remove(&from);
        self.by_pos.insert(to, entity);
        self.by_entity.insert(entity, to);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_entity.is_empty()
    }

    fn check_target(&self, map: &Map, pos: Position) -> Result<(), OccupancyError> {
        if !map.is_walkable(pos.x, pos.y) {
            return Err(OccupancyError::NotWalkable(pos));
        }
        if let Some(other) = self.entity_at(pos) {
            return Err(OccupancyError::Occupied(pos, other));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Rect;

    fn small_map() -> Map {
        let mut map = Map::new(8, 8, 0);
        map.add_room(Rect::new(1, 1, 4, 4));
        map
    }

    #[test]
    fn test_occupy_and_vacate() {
        let map = small_map();
        let mut occ = Occupancy::new();
        let pos = Position::new(2, 2);

        occ.occupy(&map, 1, pos).unwrap();
        assert!(!occ.is_free(&map, pos));
        assert_eq!(occ.entity_at(pos), Some(1));
        assert_eq!(occ.vacate(1), Some(pos));
        assert!(occ.is_free(&map, pos));
        assert!(occ.is_empty());
    }

    #[test]
    fn test_occupy_rejects_walls_and_collisions() {
        let map = small_map();
        let mut occ = Occupancy::new();

        assert_eq!(
            occ.occupy(&map, 1, Position::new(0, 0)),
            Err(OccupancyError::NotWalkable(Position::new(0, 0)))
        );
        occ.occupy(&map, 1, Position::new(2, 2)).unwrap();
        assert_eq!(
            occ.occupy(&map, 2, Position::new(2, 2)),
            Err(OccupancyError::Occupied(Position::new(2, 2), 1))
        );
    }

    #[test]
    fn test_occupy_twice_is_rejected() {
        let map = small_map();
        let mut occ = Occupancy::new();
        occ.occupy(&map, 1, Position::new(2, 2)).unwrap();

        // Same tile or a new one, the first placement stands
        assert_eq!(
            occ.occupy(&map, 1, Position::new(2, 2)),
            Err(OccupancyError::AlreadyPlaced(1, Position::new(2, 2)))
        );
        assert_eq!(
            occ.occupy(&map, 1, Position::new(3, 3)),
            Err(OccupancyError::AlreadyPlaced(1, Position::new(2, 2)))
        );
        assert_eq!(occ.position_of(1), Some(Position::new(2, 2)));
        assert!(occ.is_free(&map, Position::new(3, 3)));
        assert_eq!(occ.len(), 1);
    }

    #[test]
    fn test_move_entity() {
        let map = small_map();
        let mut occ = Occupancy::new();
        occ.occupy(&map, 7, Position::new(2, 2)).unwrap();

        occ.move_entity(&map, 7, Position::new(3, 2)).unwrap();
        assert_eq!(occ.position_of(7), Some(Position::new(3, 2)));
        assert!(occ.is_free(&map, Position::new(2, 2)));
        assert_eq!(occ.len(), 1);

        assert_eq!(
            occ.move_entity(&map, 8, Position::new(2, 2)),
            Err(OccupancyError::UnknownEntity(8))
        );
    }

    #[test]
    fn test_occupy_does_not_touch_tiles() {
        let map = small_map();
        let before = map.grid().clone();
        let mut occ = Occupancy::new();
        occ.occupy(&map, 1, Position::new(2, 3)).unwrap();
        assert_eq!(map.grid(), &before);
    }
}
