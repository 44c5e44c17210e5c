//! Grid store: live cells in stable slots plus a position index.

use crate::cell::{Cell, CellColor, CellId};
use rand::Rng;

/// Board of cells. y=0 is top, x=0 is the left edge.
///
/// Cells live in `slots`; removal leaves a hole instead of renumbering, so a
/// `CellId` stays valid for as long as its cell is on the board. `index` maps
/// each position to the cell occupying it and is kept in sync by every
/// mutation, which makes `cell_at` O(1).
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    slots: Vec<Option<Cell>>,
    /// index[y * width + x] = occupant.
    index: Vec<Option<CellId>>,
    live: usize,
}

impl Grid {
    /// Empty board.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must be at least 1x1");
        Self {
            width,
            height,
            slots: Vec::with_capacity(width * height),
            index: vec![None; width * height],
            live: 0,
        }
    }

    /// Full board, one random colour out of the first `colors` per position.
    pub fn filled<R: Rng>(width: usize, height: usize, colors: usize, rng: &mut R) -> Self {
        let colors = colors.clamp(1, CellColor::ALL.len());
        let mut grid = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                grid.insert(x, y, CellColor::from_index(rng.random_range(0..colors)));
            }
        }
        grid
    }

    /// Board from text rows, top row first: one colour letter per cell
    /// (`G Y R B M C`), `.` for an empty position.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let color = CellColor::from_letter(c)
                    .unwrap_or_else(|| panic!("unknown colour letter {c:?} at ({x}, {y})"));
                grid.insert(x, y, color);
            }
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of live cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[inline]
    fn pos(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Place a new cell. Panics if the position is outside the board or taken.
    pub fn insert(&mut self, x: usize, y: usize, color: CellColor) -> CellId {
        let pos = self
            .pos(x, y)
            .unwrap_or_else(|| panic!("cell ({x}, {y}) outside {}x{} grid", self.width, self.height));
        assert!(self.index[pos].is_none(), "position ({x}, {y}) already occupied");
        let id = CellId(self.slots.len());
        self.slots.push(Some(Cell::new(x, y, color)));
        self.index[pos] = Some(id);
        self.live += 1;
        id
    }

    #[inline]
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Cell occupying (x, y); `None` when empty or off the board.
    #[inline]
    pub fn cell_at(&self, x: usize, y: usize) -> Option<CellId> {
        self.pos(x, y).and_then(|p| self.index[p])
    }

    /// Live cells in column `x`, top to bottom.
    pub fn cells_in_column(&self, x: usize) -> Vec<CellId> {
        if x >= self.width {
            return Vec::new();
        }
        (0..self.height).filter_map(|y| self.cell_at(x, y)).collect()
    }

    /// Live cells in row `y`, left to right.
    pub fn cells_in_row(&self, y: usize) -> Vec<CellId> {
        if y >= self.height {
            return Vec::new();
        }
        (0..self.width).filter_map(|x| self.cell_at(x, y)).collect()
    }

    pub fn column_is_empty(&self, x: usize) -> bool {
        (0..self.height).all(|y| self.cell_at(x, y).is_none())
    }

    /// All live cells with their ids, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|cell| (CellId(i), cell)))
    }

    /// All live cells, in slot order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.slots.iter().flatten()
    }

    pub fn ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.iter().map(|(id, _)| id)
    }

    /// Remove exactly these cells. Ids that are not live are skipped.
    /// Returns how many cells were removed.
    pub fn remove_cells(&mut self, ids: &[CellId]) -> usize {
        let mut removed = 0;
        for &id in ids {
            let Some(cell) = self.slots.get_mut(id.0).and_then(Option::take) else {
                continue;
            };
            let pos = cell.y * self.width + cell.x;
            debug_assert_eq!(self.index[pos], Some(id));
            self.index[pos] = None;
            self.live -= 1;
            removed += 1;
        }
        removed
    }

    /// Move a live cell to (x, y). Panics if the target is off the board or
    /// held by another cell.
    pub fn move_cell(&mut self, id: CellId, x: usize, y: usize) {
        let new_pos = self
            .pos(x, y)
            .unwrap_or_else(|| panic!("move to ({x}, {y}) outside {}x{} grid", self.width, self.height));
        let width = self.width;
        let Some(cell) = self.slots.get_mut(id.0).and_then(Option::as_mut) else {
            panic!("move of removed cell {id:?}");
        };
        let old_pos = cell.y * width + cell.x;
        if old_pos == new_pos {
            return;
        }
        assert!(
            self.index[new_pos].is_none(),
            "move of {id:?} onto occupied position ({x}, {y})"
        );
        cell.x = x;
        cell.y = y;
        self.index[old_pos] = None;
        self.index[new_pos] = Some(id);
    }

    pub fn set_matched(&mut self, id: CellId, matched: bool) {
        if let Some(cell) = self.slots.get_mut(id.0).and_then(Option::as_mut) {
            cell.matched = matched;
        }
    }

    pub fn clear_matched(&mut self) {
        for cell in self.slots.iter_mut().flatten() {
            cell.matched = false;
        }
    }

    /// Panics if any cell is off the board, two cells share a position, or
    /// the position index disagrees with the cells.
    pub fn check_invariants(&self) {
        let mut indexed = 0;
        for (id, cell) in self.iter() {
            let pos = self.pos(cell.x, cell.y).unwrap_or_else(|| {
                panic!("{id:?} at ({}, {}) escaped {}x{} grid", cell.x, cell.y, self.width, self.height)
            });
            assert_eq!(
                self.index[pos],
                Some(id),
                "position ({}, {}) does not point back at {id:?}",
                cell.x,
                cell.y
            );
            indexed += 1;
        }
        assert_eq!(indexed, self.live, "live count out of sync");
        assert_eq!(
            self.index.iter().flatten().count(),
            self.live,
            "two cells share a position"
        );
    }

    /// Text rows in the `from_rows` format.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        self.cell_at(x, y)
                            .and_then(|id| self.get(id))
                            .map_or('.', |cell| cell.color.letter())
                    })
                    .collect()
            })
            .collect()
    }
}
