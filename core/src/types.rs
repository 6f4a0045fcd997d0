use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Index of a grid cell along a single axis.
pub type Axis = i32;

/// One unit square of the infinite integer grid, addressed by `(i, j)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    pub i: Axis,
    pub j: Axis,
}

impl CellId {
    pub const fn new(i: Axis, j: Axis) -> Self {
        Self { i, j }
    }

    /// Chebyshev distance: the number of king moves between two cells.
    pub const fn chebyshev(self, other: Self) -> u32 {
        let di = self.i.abs_diff(other.i);
        let dj = self.j.abs_diff(other.j);
        if di > dj { di } else { dj }
    }

    /// Canonical key for this cell in the persisted override blob.
    ///
    /// The comma keeps differently-signed coordinates unambiguous:
    /// `(-1, 2)` is `"-1,2"`, `(1, -2)` is `"1,-2"`.
    pub fn storage_key(self) -> String {
        format!("{},{}", self.i, self.j)
    }

    pub fn parse_key(key: &str) -> Result<Self> {
        let bad_key = || GameError::CorruptOverrides(format!("bad cell key {key:?}"));
        let (i, j) = key.split_once(',').ok_or_else(bad_key)?;
        Ok(Self::new(
            i.parse().map_err(|_| bad_key())?,
            j.parse().map_err(|_| bad_key())?,
        ))
    }
}

/// Continuous position in the same coordinate space as the cell grid.
///
/// One cell spans one unit per axis; any projection to screen pixels or real
/// geography belongs to the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPos {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPos {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Cell containing this position, rounding each axis to the nearest index.
    pub fn cell(self) -> CellId {
        CellId::new(self.lat.round() as Axis, self.lng.round() as Axis)
    }

    pub fn translated(self, dlat: f64, dlng: f64) -> Self {
        Self::new(self.lat + dlat, self.lng + dlng)
    }
}

/// Discrete movement intent delivered by the input source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// `(dlat, dlng)` for one move of `step` units.
    pub const fn delta(self, step: f64) -> (f64, f64) {
        match self {
            Self::North => (step, 0.0),
            Self::South => (-step, 0.0),
            Self::East => (0.0, step),
            Self::West => (0.0, -step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_round_trips_signed_coordinates() {
        for cell in [
            CellId::new(0, 0),
            CellId::new(-1, 2),
            CellId::new(1, -2),
            CellId::new(Axis::MIN, Axis::MAX),
        ] {
            assert_eq!(CellId::parse_key(&cell.storage_key()).unwrap(), cell);
        }
    }

    #[test]
    fn differently_signed_cells_never_share_a_key() {
        assert_ne!(
            CellId::new(-1, 2).storage_key(),
            CellId::new(1, -2).storage_key()
        );
        assert_ne!(
            CellId::new(-12, 3).storage_key(),
            CellId::new(-1, 23).storage_key()
        );
    }

    #[test]
    fn malformed_keys_are_rejected() {
        for key in ["", "1", "1;2", "a,2", "1,2,3", "1.5,2"] {
            assert!(matches!(
                CellId::parse_key(key),
                Err(GameError::CorruptOverrides(_))
            ));
        }
    }

    #[test]
    fn chebyshev_takes_the_larger_axis_delta() {
        let origin = CellId::new(0, 0);
        assert_eq!(origin.chebyshev(origin), 0);
        assert_eq!(origin.chebyshev(CellId::new(1, 1)), 1);
        assert_eq!(origin.chebyshev(CellId::new(-3, 2)), 3);
        assert_eq!(origin.chebyshev(CellId::new(2, -5)), 5);
    }

    #[test]
    fn positions_round_to_the_nearest_cell() {
        assert_eq!(GeoPos::new(0.4, -0.4).cell(), CellId::new(0, 0));
        assert_eq!(GeoPos::new(0.6, -0.6).cell(), CellId::new(1, -1));
        assert_eq!(GeoPos::new(-2.5, 2.5).cell(), CellId::new(-3, 3));
    }
}
