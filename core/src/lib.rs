//! Logic core of a map-overlaid token collection and crafting game.
//!
//! An infinite integer grid is populated deterministically from a seed; a
//! sparse persistent override layer records every player-caused change on
//! top of it; an interaction engine turns clicks into pickup, craft, and win
//! outcomes; and a movement controller decides whether the visible window
//! follows the player or pans freely. Rendering, input translation, and the
//! storage medium live outside this crate and connect through [`Region`],
//! [`Direction`], and [`BlobStore`].

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use movement::*;
pub use overrides::*;
pub use types::*;
pub use viewport::*;

mod cell;
mod engine;
mod error;
mod generator;
mod movement;
mod overrides;
mod types;
mod viewport;

/// Fixed parameters of one game world.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRules {
    /// Probability that generation seeds a token into a cell.
    pub spawn_chance: f64,
    /// Token value whose crafting wins the game.
    pub target: Token,
    /// Maximum Chebyshev distance from the player at which clicks count.
    pub reach: u32,
    /// Distance one discrete movement intent covers, in cell units.
    pub step: f64,
}

impl GameRules {
    pub const fn new_unchecked(spawn_chance: f64, target: Token, reach: u32, step: f64) -> Self {
        Self {
            spawn_chance,
            target,
            reach,
            step,
        }
    }

    pub fn new(spawn_chance: f64, target: Token, reach: u32, step: f64) -> Self {
        let spawn_chance = spawn_chance.clamp(0.0, 1.0);
        let max_base = BASE_LEVELS[BASE_LEVELS.len() - 1];
        // The target must be craftable, which means at least one doubling.
        let target = target.max(max_base * 2);
        Self::new_unchecked(spawn_chance, target, reach, step)
    }

    pub const fn standard() -> Self {
        Self::new_unchecked(0.15, 256, 2, 1.0)
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Single source of truth for "what is at cell `(i, j)` right now".
///
/// Overrides always win over generation, including the explicit
/// [`CellState::Empty`] entries that pickups leave behind. Every mutation is
/// persisted before it returns, so a resolve issued afterwards on the same
/// thread always observes it.
#[derive(Debug)]
pub struct TokenWorld<S: BlobStore> {
    generator: SeededGenerator,
    overrides: OverrideStore<S>,
}

impl<S: BlobStore> TokenWorld<S> {
    /// Pairs generation for `seed` with the override layer persisted in
    /// `backend`.
    pub fn load(rules: &GameRules, seed: u64, backend: S) -> Result<Self> {
        Ok(Self {
            generator: SeededGenerator::new(seed, rules.spawn_chance),
            overrides: OverrideStore::load(backend)?,
        })
    }

    pub fn resolve(&self, cell: CellId) -> CellState {
        match self.overrides.get(cell) {
            Some(state) => state,
            None => CellState::from(self.generator.token_at(cell)),
        }
    }

    /// Resolved states for every cell of `region`, in row-major order.
    pub fn resolve_region(&self, region: Region) -> impl Iterator<Item = (CellId, CellState)> {
        region.cells().map(|cell| (cell, self.resolve(cell)))
    }

    /// Permanently empties `cell`.
    pub fn clear(&mut self, cell: CellId) -> Result<()> {
        self.overrides.set(cell, CellState::Empty)
    }

    /// Permanently places `token` on `cell`.
    pub fn place(&mut self, cell: CellId, token: Token) -> Result<()> {
        self.overrides.set(cell, CellState::Occupied(token))
    }

    pub fn generator(&self) -> &SeededGenerator {
        &self.generator
    }

    pub fn overrides(&self) -> &OverrideStore<S> {
        &self.overrides
    }
}

/// Result of one click on a resolved cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The player took the cell's token into hand.
    PickedUp(Token),
    /// Held and clicked tokens merged into a doubled token on the cell.
    /// `won` flags the craft that first reaches the target value.
    Crafted { value: Token, won: bool },
    /// The cell is outside the player's reach.
    RejectedTooFar,
    /// Empty-handed click on an empty cell.
    RejectedEmpty,
    /// The clicked cell does not match the held token.
    RejectedMismatch,
}

impl ClickOutcome {
    /// Whether this outcome changed world or player state.
    pub const fn has_update(self) -> bool {
        match self {
            Self::PickedUp(_) | Self::Crafted { .. } => true,
            Self::RejectedTooFar | Self::RejectedEmpty | Self::RejectedMismatch => false,
        }
    }

    pub const fn is_win(self) -> bool {
        matches!(self, Self::Crafted { won: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_clamp_into_sane_ranges() {
        let rules = GameRules::new(1.5, 4, 2, 1.0);
        assert_eq!(rules.spawn_chance, 1.0);
        assert_eq!(rules.target, 16);
    }

    #[test]
    fn overrides_win_over_generation_both_ways() {
        let rules = GameRules::new_unchecked(1.0, 256, 2, 1.0);
        let mut world = TokenWorld::load(&rules, 0xfeed, MemoryStore::new()).unwrap();
        let cell = CellId::new(4, -7);

        // chance 1.0 guarantees generation has something here
        assert!(!world.resolve(cell).is_empty());

        world.clear(cell).unwrap();
        assert_eq!(world.resolve(cell), CellState::Empty);

        world.place(cell, 64).unwrap();
        assert_eq!(world.resolve(cell), CellState::Occupied(64));
    }

    #[test]
    fn untouched_cells_defer_to_generation() {
        let rules = GameRules::standard();
        let world = TokenWorld::load(&rules, 99, MemoryStore::new()).unwrap();
        let region = Region::around(GeoPos::new(0.0, 0.0), 10.0);

        for (cell, state) in world.resolve_region(region) {
            assert_eq!(
                state,
                CellState::from(world.generator().token_at(cell)),
            );
        }
    }

    #[test]
    fn overrides_survive_a_reload() {
        let rules = GameRules::standard();
        let cell = CellId::new(-3, 3);

        let mut world = TokenWorld::load(&rules, 1, MemoryStore::new()).unwrap();
        world.place(cell, 32).unwrap();
        let backend = world.overrides().backend().clone();

        let reloaded = TokenWorld::load(&rules, 1, backend).unwrap();
        assert_eq!(reloaded.resolve(cell), CellState::Occupied(32));
    }
}
