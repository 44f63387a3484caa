use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::types::{neighbors, CellCount, Coord2, ToNdIndex};

/// Immutable mine layout plus the adjacent-mine count derived for every cell.
///
/// Counts are computed once at construction, so lookups during play never
/// re-walk the neighborhood. Mined cells carry a count too, it is simply
/// never displayed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    mines: Array2<bool>,
    counts: Array2<u8>,
    mine_count: CellCount,
}

impl MineField {
    pub fn from_mine_mask(mines: Array2<bool>) -> Self {
        let mine_count = mines
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();

        let dim = mines.dim();
        let size: Coord2 = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        let mut counts: Array2<u8> = Array2::default(dim);
        for x in 0..size.0 {
            for y in 0..size.1 {
                let coords = (x, y);
                counts[coords.to_nd_index()] = neighbors(coords, size)
                    .filter(|&pos| mines[pos.to_nd_index()])
                    .count()
                    .try_into()
                    .unwrap();
            }
        }

        Self {
            mines,
            counts,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mines[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mines))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mines.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.counts[coords.to_nd_index()]
    }

    /// All mine coordinates in grid order (`x` outer, `y` inner).
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.mines
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x.try_into().unwrap(), y.try_into().unwrap()))
            .collect()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        neighbors(coords, self.size())
    }
}

impl Index<Coord2> for MineField {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mines[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(size: Coord2, mines: &[Coord2]) -> MineField {
        MineField::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn counts_match_neighborhood_at_corner_edge_and_interior() {
        // mines at the center and the north edge of a 3x3 board
        let field = field((3, 3), &[(1, 1), (1, 0)]);

        assert_eq!(field.adjacent_mines((0, 0)), 2);
        assert_eq!(field.adjacent_mines((2, 1)), 2);
        assert_eq!(field.adjacent_mines((1, 2)), 1);
        assert_eq!(field.adjacent_mines((0, 2)), 1);
        // mined cells still carry a count of their own neighbors
        assert_eq!(field.adjacent_mines((1, 1)), 1);
        assert_eq!(field.adjacent_mines((1, 0)), 1);
    }

    #[test]
    fn counts_agree_with_a_fresh_neighborhood_walk() {
        let field = field((4, 3), &[(0, 0), (3, 0), (1, 2), (2, 1)]);
        let size = field.size();

        for x in 0..size.0 {
            for y in 0..size.1 {
                let walked = field
                    .iter_neighbors((x, y))
                    .filter(|&pos| field.contains_mine(pos))
                    .count();
                assert_eq!(usize::from(field.adjacent_mines((x, y))), walked);
            }
        }
    }

    #[test]
    fn from_mine_coords_rejects_out_of_range_mines() {
        let result = MineField::from_mine_coords((2, 2), &[(2, 0)]);
        assert_eq!(result.unwrap_err(), GameError::OutOfBounds);
    }

    #[test]
    fn mine_coords_lists_mines_in_grid_order() {
        let field = field((3, 3), &[(2, 2), (0, 1), (1, 0)]);
        assert_eq!(field.mine_coords(), vec![(0, 1), (1, 0), (2, 2)]);
    }

    #[test]
    fn cell_accounting_is_consistent() {
        let field = field((4, 4), &[(0, 0), (3, 3)]);
        assert_eq!(field.total_cells(), 16);
        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.safe_cell_count(), 14);
        assert!(field.contains_mine((0, 0)));
        assert!(!field.contains_mine((1, 1)));
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let field = field((3, 2), &[(0, 0)]);
        assert_eq!(field.validate_coords((2, 1)), Ok((2, 1)));
        assert_eq!(field.validate_coords((3, 0)), Err(GameError::OutOfBounds));
        assert_eq!(field.validate_coords((0, 2)), Err(GameError::OutOfBounds));
    }
}
