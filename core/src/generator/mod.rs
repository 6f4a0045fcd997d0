use crate::*;
pub use seeded::*;

mod seeded;

/// Deterministic source of procedurally generated tokens.
///
/// Implementations must be pure: the answer for a cell depends only on the
/// cell and the generator's own configuration, never on call order.
pub trait TokenGenerator {
    /// Token seeded at `cell`, if the cell spawns one at all.
    fn token_at(&self, cell: CellId) -> Option<Token>;
}
