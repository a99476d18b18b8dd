//! Recursive shadowcasting field of view with a Euclidean radius bound.
//! This module exists to keep sight rules deterministic and independent of floor state.
//! It does not own enemy alert policy or auto-run stop decisions.

use std::collections::BTreeSet;

use super::VisibilityProvider;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, Default)]
pub struct Shadowcasting;

impl VisibilityProvider for Shadowcasting {
    fn compute_visible(
        &self,
        is_opaque: &dyn Fn(Pos) -> bool,
        origin: Pos,
        radius: i32,
    ) -> BTreeSet<Pos> {
        let mut visible = BTreeSet::new();
        visible.insert(origin);
        if radius <= 0 {
            return visible;
        }
        let mut scan = OctantScan { is_opaque, origin, radius, visible: &mut visible };
        for octant in 0..8 {
            scan.scan(1, Slope::new(1, 1), Slope::new(0, 1), octant);
        }
        visible.retain(|&p| p == origin || has_direct_line_of_sight(is_opaque, origin, p));
        visible
    }
}

fn transform_octant(orig: Pos, x: i32, y: i32, oct: u8) -> Pos {
    match oct {
        0 => Pos { y: orig.y - y, x: orig.x + x },
        1 => Pos { y: orig.y - x, x: orig.x + y },
        2 => Pos { y: orig.y - x, x: orig.x - y },
        3 => Pos { y: orig.y - y, x: orig.x - x },
        4 => Pos { y: orig.y + y, x: orig.x - x },
        5 => Pos { y: orig.y + x, x: orig.x - y },
        6 => Pos { y: orig.y + x, x: orig.x + y },
        7 => Pos { y: orig.y + y, x: orig.x + x },
        _ => orig,
    }
}

#[derive(Clone, Copy)]
struct Slope {
    y: i32,
    x: i32,
}

impl Slope {
    fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    fn greater_or_equal(&self, other: &Slope) -> bool {
        self.y * other.x >= other.y * self.x
    }

    fn greater_than(&self, other: &Slope) -> bool {
        self.y * other.x > other.y * self.x
    }
}

struct OctantScan<'a> {
    is_opaque: &'a dyn Fn(Pos) -> bool,
    origin: Pos,
    radius: i32,
    visible: &'a mut BTreeSet<Pos>,
}

impl OctantScan<'_> {
    fn within_radius(&self, p: Pos) -> bool {
        let dx = i64::from(p.x) - i64::from(self.origin.x);
        let dy = i64::from(p.y) - i64::from(self.origin.y);
        let radius = i64::from(self.radius);
        dx * dx + dy * dy <= radius * radius
    }

    fn scan(&mut self, dist: i32, start: Slope, end: Slope, oct: u8) {
        if dist > self.radius {
            return;
        }
        let mut blocked = false;
        let mut cur_start = start;
        for y in (0..=dist).rev() {
            let top = Slope::new(2 * y + 1, 2 * dist - 1);
            let bot = Slope::new(2 * y - 1, 2 * dist + 1);
            if cur_start.greater_or_equal(&bot) && top.greater_than(&end) {
                let p = transform_octant(self.origin, dist, y, oct);
                if self.within_radius(p) {
                    self.visible.insert(p);
                }
                if (self.is_opaque)(p) {
                    if !blocked {
                        self.scan(dist + 1, cur_start, top, oct);
                        blocked = true;
                    }
                    cur_start = bot;
                } else if blocked {
                    blocked = false;
                }
            }
        }
        if !blocked {
            self.scan(dist + 1, cur_start, end, oct);
        }
    }
}

fn has_direct_line_of_sight(is_opaque: &dyn Fn(Pos) -> bool, origin: Pos, target: Pos) -> bool {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_dist_x = dx.abs();
    let total_dist_y = dy.abs();

    let mut x = origin.x;
    let mut y = origin.y;
    let mut current_step_x = 0;
    let mut current_step_y = 0;

    while current_step_x < total_dist_x || current_step_y < total_dist_y {
        let lhs = (1 + 2 * current_step_x) * total_dist_y;
        let rhs = (1 + 2 * current_step_y) * total_dist_x;

        if lhs == rhs {
            x += sx;
            y += sy;
            current_step_x += 1;
            current_step_y += 1;
        } else if lhs < rhs {
            x += sx;
            current_step_x += 1;
        } else {
            y += sy;
            current_step_y += 1;
        }

        if x == target.x && y == target.y {
            break;
        }
        if is_opaque(Pos { y, x }) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Map;
    use crate::types::TileKind;

    fn visible_in(map: &Map, origin: Pos, radius: i32) -> BTreeSet<Pos> {
        Shadowcasting.compute_visible(&|p| !map.is_floor(p), origin, radius)
    }

    #[test]
    fn open_room_visibility_is_radius_bounded() {
        let map = Map::new(20, 20);
        let origin = Pos::new(10, 10);
        let visible = visible_in(&map, origin, 3);
        assert!(visible.contains(&origin));
        assert!(visible.contains(&Pos::new(13, 10)));
        assert!(visible.contains(&Pos::new(12, 12)));
        assert!(!visible.contains(&Pos::new(13, 13)), "corner lies outside a Euclidean radius");
        assert!(!visible.contains(&Pos::new(14, 10)));
    }

    #[test]
    fn tiles_behind_a_corridor_wall_are_occluded() {
        let mut map = Map::filled(11, 11, TileKind::Wall);
        for x in 1..10 {
            map.set_tile(Pos::new(x, 5), TileKind::Floor);
        }
        map.set_tile(Pos::new(6, 5), TileKind::Wall);
        let visible = visible_in(&map, Pos::new(3, 5), 10);
        assert!(visible.contains(&Pos::new(5, 5)));
        assert!(visible.contains(&Pos::new(6, 5)), "the blocking wall itself is seen");
        assert!(!visible.contains(&Pos::new(7, 5)));
    }

    #[test]
    fn light_does_not_leak_out_of_a_closed_room() {
        let mut map = Map::new(20, 20);
        let (lo, hi) = (4, 10);
        for y in lo..=hi {
            for x in lo..=hi {
                let edge = y == lo || y == hi || x == lo || x == hi;
                map.set_tile(Pos::new(x, y), if edge { TileKind::Wall } else { TileKind::Floor });
            }
        }
        for py in (lo + 1)..hi {
            for px in (lo + 1)..hi {
                let origin = Pos::new(px, py);
                for p in visible_in(&map, origin, 15) {
                    assert!(
                        p.x >= lo && p.x <= hi && p.y >= lo && p.y <= hi,
                        "light leaked to {p} from {origin}"
                    );
                }
            }
        }
    }

    #[test]
    fn visibility_is_symmetric_in_an_open_room() {
        let map = Map::new(16, 16);
        let a = Pos::new(4, 4);
        for b in visible_in(&map, a, 5).into_iter().filter(|&p| map.is_floor(p)) {
            assert!(visible_in(&map, b, 5).contains(&a), "{b} sees {a} but not the reverse");
        }
    }

    #[test]
    fn repeat_calls_are_deterministic() {
        let mut map = Map::new(12, 12);
        map.set_tile(Pos::new(7, 5), TileKind::Wall);
        let origin = Pos::new(5, 5);
        assert_eq!(visible_in(&map, origin, 5), visible_in(&map, origin, 5));
    }
}
