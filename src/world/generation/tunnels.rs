//! L-shaped corridors between consecutive rooms

use crate::rng::GameRng;
use crate::world::{GenerationState, Map, Position};

/// Which leg of the L is dug first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegOrder {
    HorizontalFirst,
    VerticalFirst,
}

impl LegOrder {
    /// One draw per corridor: 0 is horizontal-first, 1 vertical-first
    pub fn draw(rng: &mut GameRng) -> Self {
        if rng.coin_flip() {
            LegOrder::VerticalFirst
        } else {
            LegOrder::HorizontalFirst
        }
    }
}

/// Connect every room to the one placed before it
pub fn carve_tunnels(map: &mut Map, rng: &mut GameRng) {
    debug_assert_eq!(map.state(), GenerationState::RoomsPlaced);

    let centers: Vec<Position> = map.rooms().iter().map(|r| r.center()).collect();
    for pair in centers.windows(2) {
        let order = LegOrder::draw(rng);
        carve_l_corridor(map, pair[0], pair[1], order);
    }

    log::debug!("Carved {} corridors", centers.len().saturating_sub(1));
    map.transition(GenerationState::Tunneled);
}

/// Dig from `from` to `to`, turning once at the corner
///
/// Corridors may run straight through other rooms and corridors.
pub fn carve_l_corridor(map: &mut Map, from: Position, to: Position, order: LegOrder) {
    match order {
        LegOrder::HorizontalFirst => {
            carve_h_corridor(map, from.x, to.x, from.y);
            carve_v_corridor(map, from.y, to.y, to.x);
        }
        LegOrder::VerticalFirst => {
            carve_v_corridor(map, from.y, to.y, from.x);
            carve_h_corridor(map, from.x, to.x, to.y);
        }
    }
}

/// Carve a horizontal run at fixed y, endpoints inclusive
fn carve_h_corridor(map: &mut Map, x1: i32, x2: i32, y: i32) {
    let (start, end) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    for x in start..=end {
        map.carve(Position::new(x, y));
    }
}

/// Carve a vertical run at fixed x, endpoints inclusive
fn carve_v_corridor(map: &mut Map, y1: i32, y2: i32, x: i32) {
    let (start, end) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    for y in start..=end {
        map.carve(Position::new(x, y));
    }
}
