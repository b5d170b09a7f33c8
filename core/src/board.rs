use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The grid of a single mission. Cell kinds never change after construction, only visibility does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    flag_count: CellCount,
}

impl Board {
    pub fn from_kind_mask(kinds: Array2<CellKind>) -> Result<Self> {
        let (rows, cols) = kinds.dim();
        if rows == 0 || cols == 0 || rows > Coord::MAX.into() || cols > Coord::MAX.into() {
            return Err(GameError::InvalidBoardShape);
        }

        let flag_count = kinds
            .iter()
            .filter(|kind| kind.is_flag())
            .count()
            .try_into()
            .map_err(|_| GameError::InvalidBoardShape)?;

        Ok(Self {
            cells: kinds.mapv(Cell::hidden),
            flag_count,
        })
    }

    pub fn from_bomb_coords(size: Coord2, bomb_coords: &[Coord2]) -> Result<Self> {
        let mut kinds: Array2<CellKind> = Array2::default(size.to_nd_index());

        for &coords in bomb_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            kinds[coords.to_nd_index()] = CellKind::Bomb;
        }

        Self::from_kind_mask(kinds)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // both axes are checked against `Coord::MAX` on construction
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn bomb_count(&self) -> CellCount {
        self.total_cells() - self.flag_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    #[cfg(test)]
    pub(crate) fn kind_at(&self, coords: Coord2) -> Option<CellKind> {
        self.cell_at(coords).map(Cell::kind)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_revealed())
    }

    pub fn revealed_flag_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_revealed() && cell.kind().is_flag())
    }

    pub fn all_bombs_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.kind().is_flag() || cell.is_revealed())
    }

    #[cfg(test)]
    pub(crate) fn all_revealed(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_revealed())
    }

    /// Cells with their positions, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        iter_coords(self.size()).map(|coords| (coords, self[coords]))
    }

    /// Row slices of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, Cell>> + '_ {
        self.cells.rows().into_iter()
    }

    /// Returns whether the cell was hidden; out-of-range coordinates are ignored.
    pub(crate) fn reveal(&mut self, coords: Coord2) -> bool {
        self.cells
            .get_mut(coords.to_nd_index())
            .is_some_and(Cell::reveal)
    }

    pub(crate) fn reveal_bombs(&mut self) -> CellCount {
        self.reveal_where(|cell| cell.kind().is_bomb())
    }

    pub(crate) fn reveal_all(&mut self) -> CellCount {
        self.reveal_where(|_| true)
    }

    fn reveal_where(&mut self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        let mut newly_revealed: CellCount = 0;
        for cell in self.cells.iter_mut().filter(|cell| pred(cell)) {
            if cell.reveal() {
                newly_revealed += 1;
            }
        }
        newly_revealed
    }

    fn count_where(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        // bounded by `total_cells`, which fits
        self.cells.iter().filter(|cell| pred(cell)).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
