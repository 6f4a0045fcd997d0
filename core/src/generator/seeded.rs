use std::hash::{DefaultHasher, Hash, Hasher};

use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

use super::*;

const SPAWN_SALT: &str = "spawn";
const VALUE_SALT: &str = "value";

/// Per-cell pseudo-random generation: whether a token spawns, and at which
/// base level.
///
/// Each decision hashes `(seed, i, j, salt)` into a sub-seed for a throwaway
/// [`SmallRng`]; the two distinct salts keep the spawn and value draws
/// uncorrelated. No state is kept between calls, so answers survive restarts
/// and repeated resolution of the same cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SeededGenerator {
    seed: u64,
    spawn_chance: f64,
}

impl SeededGenerator {
    pub fn new(seed: u64, spawn_chance: f64) -> Self {
        let spawn_chance = spawn_chance.clamp(0.0, 1.0);
        Self { seed, spawn_chance }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub const fn spawn_chance(&self) -> f64 {
        self.spawn_chance
    }

    /// Uniform draw in `[0, 1)` for one `(cell, salt)` pair.
    fn cell_draw(&self, cell: CellId, salt: &str) -> f64 {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        cell.hash(&mut hasher);
        salt.hash(&mut hasher);
        SmallRng::seed_from_u64(hasher.finish()).random()
    }

    /// Whether generation puts a token at `cell`.
    pub fn spawns_at(&self, cell: CellId) -> bool {
        self.cell_draw(cell, SPAWN_SALT) < self.spawn_chance
    }

    /// Base level seeded at `cell`. Meaningful only when [`Self::spawns_at`]
    /// holds there.
    pub fn level_at(&self, cell: CellId) -> Token {
        let draw = self.cell_draw(cell, VALUE_SALT);
        let index = (draw * BASE_LEVELS.len() as f64) as usize;
        BASE_LEVELS[index.min(BASE_LEVELS.len() - 1)]
    }
}

impl TokenGenerator for SeededGenerator {
    fn token_at(&self, cell: CellId) -> Option<Token> {
        self.spawns_at(cell).then(|| self.level_at(cell))
    }
}
