use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular region of interest, supplied by the renderer as any two
/// opposite corners in the same coordinate space as the cells.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub a: GeoPos,
    pub b: GeoPos,
}

impl Region {
    pub const fn new(a: GeoPos, b: GeoPos) -> Self {
        Self { a, b }
    }

    /// Square region spanning `radius` units on each side of `center`.
    pub fn around(center: GeoPos, radius: f64) -> Self {
        Self::new(
            center.translated(-radius, -radius),
            center.translated(radius, radius),
        )
    }

    /// Inclusive cell bounds, normalized so corner order never matters.
    /// A zero-area or inverted region collapses to a valid bound, not an
    /// error.
    fn bounds(&self) -> (CellId, CellId) {
        let a = self.a.cell();
        let b = self.b.cell();
        (
            CellId::new(a.i.min(b.i), a.j.min(b.j)),
            CellId::new(a.i.max(b.i), a.j.max(b.j)),
        )
    }

    /// Cells covered by the region, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + use<> {
        let (lo, hi) = self.bounds();
        (lo.i..=hi.i).flat_map(move |i| (lo.j..=hi.j).map(move |j| CellId::new(i, j)))
    }

    pub fn cell_count(&self) -> usize {
        let (lo, hi) = self.bounds();
        (hi.i.abs_diff(lo.i) as usize + 1) * (hi.j.abs_diff(lo.j) as usize + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_order_never_changes_the_cell_set() {
        let nw = GeoPos::new(2.0, -1.0);
        let se = GeoPos::new(-1.0, 3.0);
        let cells: Vec<_> = Region::new(nw, se).cells().collect();
        assert_eq!(Region::new(se, nw).cells().collect::<Vec<_>>(), cells);
        assert_eq!(cells.len(), 4 * 5);
    }

    #[test]
    fn enumeration_is_inclusive_and_row_major() {
        let region = Region::new(GeoPos::new(0.0, 0.0), GeoPos::new(1.0, 1.0));
        let cells: Vec<_> = region.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellId::new(0, 0),
                CellId::new(0, 1),
                CellId::new(1, 0),
                CellId::new(1, 1),
            ]
        );
    }

    #[test]
    fn corners_round_to_the_nearest_cell_per_axis() {
        let region = Region::new(GeoPos::new(-0.4, 0.6), GeoPos::new(0.4, 1.2));
        let cells: Vec<_> = region.cells().collect();
        assert_eq!(cells, vec![CellId::new(0, 1)]);
    }

    #[test]
    fn zero_area_region_still_covers_one_cell() {
        let corner = GeoPos::new(5.0, -5.0);
        let region = Region::new(corner, corner);
        assert_eq!(region.cell_count(), 1);
        assert_eq!(region.cells().collect::<Vec<_>>(), vec![CellId::new(5, -5)]);
    }

    #[test]
    fn around_spans_the_requested_window() {
        let region = Region::around(GeoPos::new(0.0, 0.0), 2.0);
        assert_eq!(region.cell_count(), 5 * 5);
    }
}
