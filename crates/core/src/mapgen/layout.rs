//! Room placement and corridor carving.

use crate::state::Map;
use crate::types::{Pos, TileKind};

use super::seed::{mix_seed_stream, random_usize};

const FALLBACK_ROOM_SIDE: usize = 4;
const MIN_ROOMS_BEFORE_FALLBACK: usize = 4;

pub(super) struct RoomSizing {
    pub(super) min_width: usize,
    pub(super) max_width: usize,
    pub(super) min_height: usize,
    pub(super) max_height: usize,
    pub(super) min_rooms: usize,
    pub(super) max_rooms: usize,
    pub(super) attempts: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl RoomRect {
    fn right(self) -> usize {
        self.x + self.width - 1
    }

    fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub(super) fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            width: self.right() + margin - expanded_x + 1,
            height: self.bottom() + margin - expanded_y + 1,
        }
    }

    fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    fn touches_any(self, rooms: &[RoomRect]) -> bool {
        let with_margin = self.expanded(1);
        rooms.iter().any(|existing| existing.expanded(1).intersects(&with_margin))
    }
}

pub(super) fn build_room_layout(
    floor_seed: u64,
    width: usize,
    height: usize,
    sizing: &RoomSizing,
) -> Vec<RoomRect> {
    let target_room_count = random_usize(floor_seed, 1, sizing.min_rooms, sizing.max_rooms);

    let mut rooms = Vec::new();
    for attempt in 0..sizing.attempts {
        if rooms.len() >= target_room_count {
            break;
        }
        let room_width =
            random_usize(floor_seed, attempt * 8 + 2, sizing.min_width, sizing.max_width);
        let room_height =
            random_usize(floor_seed, attempt * 8 + 3, sizing.min_height, sizing.max_height);
        if room_width + 2 >= width || room_height + 2 >= height {
            continue;
        }

        let max_x = width - room_width - 1;
        let max_y = height - room_height - 1;
        let x = random_usize(floor_seed, attempt * 8 + 4, 1, max_x);
        let y = random_usize(floor_seed, attempt * 8 + 5, 1, max_y);
        let candidate = RoomRect { x, y, width: room_width, height: room_height };
        if candidate.touches_any(&rooms) {
            continue;
        }
        rooms.push(candidate);
    }

    add_fallback_rooms(width, height, &mut rooms);
    rooms.sort_by_key(|room| {
        let center = room.center();
        (center.y, center.x, room.height, room.width)
    });
    rooms
}

fn add_fallback_rooms(width: usize, height: usize, rooms: &mut Vec<RoomRect>) {
    let side = FALLBACK_ROOM_SIDE;
    if side + 2 < width && side + 2 < height {
        let corners = [
            (1, 1),
            (width - side - 1, 1),
            (1, height - side - 1),
            (width - side - 1, height - side - 1),
        ];
        for (x, y) in corners {
            if rooms.len() >= MIN_ROOMS_BEFORE_FALLBACK {
                break;
            }
            let candidate = RoomRect { x, y, width: side, height: side };
            if !candidate.touches_any(rooms) {
                rooms.push(candidate);
            }
        }
    }

    if rooms.is_empty() {
        rooms.push(RoomRect {
            x: 1,
            y: 1,
            width: width.saturating_sub(2).max(1),
            height: height.saturating_sub(2).max(1),
        });
    }
}

pub(super) fn carve_room(map: &mut Map, room: &RoomRect) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            map.set_tile(Pos { y: y as i32, x: x as i32 }, TileKind::Floor);
        }
    }
}

/// Joins every room to the growing connected set by its nearest pending neighbour.
pub(super) fn carve_room_corridors(map: &mut Map, floor_seed: u64, rooms: &[RoomRect]) {
    if rooms.len() < 2 {
        return;
    }

    let mut connected_room_indices = vec![0_usize];
    let mut pending_room_indices: Vec<usize> = (1..rooms.len()).collect();

    while !pending_room_indices.is_empty() {
        let mut best_choice: Option<(u32, usize, usize)> = None;
        for &connected_index in &connected_room_indices {
            let connected_center = rooms[connected_index].center();
            for &pending_index in &pending_room_indices {
                let distance = connected_center.manhattan(rooms[pending_index].center());
                let candidate = (distance, connected_index, pending_index);
                if best_choice.is_none_or(|best| candidate < best) {
                    best_choice = Some(candidate);
                }
            }
        }

        let (_, connected_index, pending_index) = best_choice.expect("pending list is non-empty");
        let horizontal_first =
            mix_seed_stream(floor_seed, ((connected_index as u64) << 32) | (pending_index as u64))
                & 1
                == 0;
        carve_l_shaped_corridor(
            map,
            rooms[connected_index].center(),
            rooms[pending_index].center(),
            horizontal_first,
        );

        connected_room_indices.push(pending_index);
        pending_room_indices.retain(|&index| index != pending_index);
    }
}

fn carve_l_shaped_corridor(map: &mut Map, start: Pos, end: Pos, horizontal_first: bool) {
    let corner = if horizontal_first {
        Pos { y: start.y, x: end.x }
    } else {
        Pos { y: end.y, x: start.x }
    };
    carve_line(map, start, corner);
    carve_line(map, corner, end);
}

/// Carves a straight axis-aligned run, leaving the outer border intact.
fn carve_line(map: &mut Map, from: Pos, to: Pos) {
    let (min_x, max_x) = (from.x.min(to.x), from.x.max(to.x));
    let (min_y, max_y) = (from.y.min(to.y), from.y.max(to.y));
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if x <= 0 || y <= 0 || x as usize >= map.width - 1 || y as usize >= map.height - 1 {
                continue;
            }
            map.set_tile(Pos { y, x }, TileKind::Floor);
        }
    }
}
