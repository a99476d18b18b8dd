//! Default map generator: rectangular rooms joined by L-shaped corridors.

mod layout;
mod seed;

use tracing::debug;

use crate::capabilities::{MapGenerator, RandomSource};
use crate::state::Map;
use crate::types::TileKind;

use layout::{RoomSizing, build_room_layout, carve_room, carve_room_corridors};

/// Largest integer an `f64` holds exactly.
const SEED_SPAN: f64 = (1_u64 << 53) as f64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomsAndCorridors {
    pub min_room_width: usize,
    pub max_room_width: usize,
    pub min_room_height: usize,
    pub max_room_height: usize,
    pub min_rooms: usize,
    pub max_rooms: usize,
    pub placement_attempts: u64,
}

impl Default for RoomsAndCorridors {
    fn default() -> Self {
        Self {
            min_room_width: 3,
            max_room_width: 9,
            min_room_height: 3,
            max_room_height: 5,
            min_rooms: 8,
            max_rooms: 14,
            placement_attempts: 400,
        }
    }
}

impl MapGenerator for RoomsAndCorridors {
    fn generate(&self, width: usize, height: usize, rng: &mut dyn RandomSource) -> Map {
        let floor_seed = (rng.uniform() * SEED_SPAN) as u64;
        let sizing = RoomSizing {
            min_width: self.min_room_width,
            max_width: self.max_room_width.max(self.min_room_width),
            min_height: self.min_room_height,
            max_height: self.max_room_height.max(self.min_room_height),
            min_rooms: self.min_rooms,
            max_rooms: self.max_rooms.max(self.min_rooms),
            attempts: self.placement_attempts,
        };
        let rooms = build_room_layout(floor_seed, width, height, &sizing);

        let mut map = Map::filled(width, height, TileKind::Wall);
        for room in &rooms {
            carve_room(&mut map, room);
        }
        carve_room_corridors(&mut map, floor_seed, &rooms);
        debug!(floor_seed, rooms = rooms.len(), width, height, "carved rooms and corridors");
        map
    }
}
