//! Gravity and column collapse, applied in place after a removal.

use crate::grid::Grid;

/// Let every cell fall into the empty space below it.
///
/// Rows are visited bottom to top, so by the time a cell falls everything
/// under it has already settled; one pass compacts each column towards the
/// bottom row without reordering it. Returns true if any cell moved.
pub fn apply_gravity(grid: &mut Grid) -> bool {
    let bottom = grid.height() - 1;
    let mut moved = 0usize;
    for y in (0..grid.height()).rev() {
        for id in grid.cells_in_row(y) {
            let Some(&cell) = grid.get(id) else { continue };
            let mut ny = cell.y;
            while ny < bottom && grid.cell_at(cell.x, ny + 1).is_none() {
                ny += 1;
            }
            if ny != cell.y {
                grid.move_cell(id, cell.x, ny);
                moved += 1;
            }
        }
    }
    grid.check_invariants();
    if moved > 0 {
        log::trace!("gravity moved {moved} cells");
    }
    moved > 0
}

/// Squeeze out fully empty columns: non-empty columns are packed from x=0 in
/// their left-to-right order. Only `x` changes. Returns true if any column moved.
pub fn collapse_columns(grid: &mut Grid) -> bool {
    let mut next = 0;
    let mut shifted = 0usize;
    for x in 0..grid.width() {
        let column = grid.cells_in_column(x);
        if column.is_empty() {
            continue;
        }
        if x != next {
            // Every column in next..x is empty by now.
            for id in column {
                if let Some(&cell) = grid.get(id) {
                    grid.move_cell(id, next, cell.y);
                }
            }
            shifted += 1;
        }
        next += 1;
    }
    grid.check_invariants();
    if shifted > 0 {
        log::trace!("collapse shifted {shifted} columns, {next} remain");
    }
    shifted > 0
}
