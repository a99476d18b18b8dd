//! Pluggable collaborators the engine calls but does not own.
//! Each trait has a deterministic default; tests and tools may swap any of them.

use std::collections::BTreeSet;

use crate::state::Map;
use crate::types::{Pos, Topology};

mod pathfinding;
mod random;
mod visibility;

pub use crate::mapgen::RoomsAndCorridors;
pub use pathfinding::AStar;
pub use random::SeededRandom;
pub use visibility::Shadowcasting;

pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn random_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let scaled = (self.uniform() * len as f64) as usize;
        scaled.min(len - 1)
    }
}

pub trait MapGenerator {
    /// Classifies every cell of a `width` x `height` grid.
    fn generate(&self, width: usize, height: usize, rng: &mut dyn RandomSource) -> Map;
}

pub trait VisibilityProvider {
    fn compute_visible(
        &self,
        is_opaque: &dyn Fn(Pos) -> bool,
        origin: Pos,
        radius: i32,
    ) -> BTreeSet<Pos>;
}

pub trait Pathfinder {
    /// Shortest path from `start` to `goal`, both ends included. Empty when unreachable.
    fn find_path(
        &self,
        is_walkable: &dyn Fn(Pos) -> bool,
        start: Pos,
        goal: Pos,
        topology: Topology,
    ) -> Vec<Pos>;
}

pub struct Capabilities {
    pub rng: Box<dyn RandomSource>,
    pub map_generator: Box<dyn MapGenerator>,
    pub visibility: Box<dyn VisibilityProvider>,
    pub pathfinder: Box<dyn Pathfinder>,
}

impl Capabilities {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Box::new(SeededRandom::new(seed)),
            map_generator: Box::new(RoomsAndCorridors::default()),
            visibility: Box::new(Shadowcasting),
            pathfinder: Box::new(AStar),
        }
    }

    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_map_generator(mut self, generator: impl MapGenerator + 'static) -> Self {
        self.map_generator = Box::new(generator);
        self
    }

    pub fn with_visibility(mut self, visibility: impl VisibilityProvider + 'static) -> Self {
        self.visibility = Box::new(visibility);
        self
    }

    pub fn with_pathfinder(mut self, pathfinder: impl Pathfinder + 'static) -> Self {
        self.pathfinder = Box::new(pathfinder);
        self
    }
}
