use serde::{Deserialize, Serialize};

/// Numeric value carried by a token. Doubles on every successful craft.
pub type Token = u32;

/// Values generation may seed into a cell. Anything larger only ever comes
/// out of crafting.
pub const BASE_LEVELS: [Token; 4] = [1, 2, 4, 8];

/// Resolved, displayable state of one grid cell.
///
/// Serializes as `null` / number, which keeps an explicit `Empty` override
/// distinguishable from a missing entry in the persisted blob.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Token>", into = "Option<Token>")]
pub enum CellState {
    Empty,
    Occupied(Token),
}

impl CellState {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn token(self) -> Option<Token> {
        match self {
            Self::Empty => None,
            Self::Occupied(value) => Some(value),
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<Option<Token>> for CellState {
    fn from(token: Option<Token>) -> Self {
        match token {
            None => Self::Empty,
            Some(value) => Self::Occupied(value),
        }
    }
}

impl From<CellState> for Option<Token> {
    fn from(state: CellState) -> Self {
        state.token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_serializes_as_null_and_occupied_as_a_number() {
        assert_eq!(serde_json::to_string(&CellState::Empty).unwrap(), "null");
        assert_eq!(serde_json::to_string(&CellState::Occupied(8)).unwrap(), "8");
    }

    #[test]
    fn state_round_trips_through_json() {
        for state in [CellState::Empty, CellState::Occupied(1), CellState::Occupied(256)] {
            let blob = serde_json::to_string(&state).unwrap();
            assert_eq!(serde_json::from_str::<CellState>(&blob).unwrap(), state);
        }
    }
}
