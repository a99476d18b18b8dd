//! Deterministic A* over a walkability predicate.
//! Ties in the open list break on (f, h, y, x), so equal-cost paths are stable across runs.

use std::collections::{BTreeMap, BTreeSet};

use super::Pathfinder;
use crate::types::{Pos, Topology};

#[derive(Clone, Copy, Debug, Default)]
pub struct AStar;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

impl Pathfinder for AStar {
    fn find_path(
        &self,
        is_walkable: &dyn Fn(Pos) -> bool,
        start: Pos,
        goal: Pos,
        topology: Topology,
    ) -> Vec<Pos> {
        if !is_walkable(goal) {
            return Vec::new();
        }
        if start == goal {
            return vec![start];
        }
        let mut open_set = BTreeSet::new();
        let mut g_score = BTreeMap::new();
        let mut came_from = BTreeMap::new();
        let h = heuristic(start, goal, topology);
        open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
        g_score.insert(start, 0_u32);
        while let Some(curr) = open_set.pop_first() {
            let p = Pos { y: curr.y, x: curr.x };
            if p == goal {
                return reconstruct_path(&came_from, start, goal);
            }
            let cur_g = *g_score.get(&p).expect("current node must have g-score");
            for n in neighbors(p, topology) {
                if !is_walkable(n) {
                    continue;
                }
                let tg = cur_g + 1;
                if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                    came_from.insert(n, p);
                    g_score.insert(n, tg);
                    let h = heuristic(n, goal, topology);
                    open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
                }
            }
        }
        Vec::new()
    }
}

fn neighbors(p: Pos, topology: Topology) -> Vec<Pos> {
    match topology {
        Topology::Four => p.neighbors4().to_vec(),
        Topology::Eight => p.neighbors8().to_vec(),
    }
}

fn heuristic(a: Pos, b: Pos, topology: Topology) -> u32 {
    match topology {
        Topology::Four => a.manhattan(b),
        Topology::Eight => a.chebyshev(b),
    }
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        p = *came.get(&p).expect("path must be reconstructible");
        result.push(p);
    }
    result.reverse();
    result
}
