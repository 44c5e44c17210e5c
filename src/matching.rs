//! Flood fill: the same-coloured group around a seed cell.

use crate::cell::CellId;
use crate::grid::Grid;
use std::collections::HashSet;

const NEIGHBOURS_4: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Maximal set of same-coloured, axis-connected cells. Never empty when
/// produced by `find_group` on a live seed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    /// Ascending slot order.
    cells: Vec<CellId>,
}

impl Group {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Two or more cells: the group can be removed.
    #[inline]
    pub fn is_match(&self) -> bool {
        self.cells.len() >= 2
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.cells.binary_search(&id).is_ok()
    }

    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }
}

/// Live same-coloured neighbours of `id` (above, below, right, left).
fn neighbours(grid: &Grid, id: CellId) -> impl Iterator<Item = CellId> + '_ {
    let cell = grid.get(id).copied();
    NEIGHBOURS_4.into_iter().filter_map(move |(dx, dy)| {
        let cell = cell?;
        let nx = cell.x.checked_add_signed(dx)?;
        let ny = cell.y.checked_add_signed(dy)?;
        let other = grid.cell_at(nx, ny)?;
        (grid.get(other)?.color == cell.color).then_some(other)
    })
}

/// Group containing `seed`. A removed seed yields an empty group.
pub fn find_group(grid: &Grid, seed: CellId) -> Group {
    if grid.get(seed).is_none() {
        return Group::default();
    }
    let mut visited = HashSet::new();
    let mut stack = vec![seed];
    visited.insert(seed);
    let mut cells = Vec::new();

    while let Some(id) = stack.pop() {
        cells.push(id);
        for next in neighbours(grid, id) {
            if visited.insert(next) {
                stack.push(next);
            }
        }
    }
    cells.sort_unstable();
    Group { cells }
}

/// True if any two adjacent cells share a colour, i.e. some click would
/// remove something.
pub fn has_any_group(grid: &Grid) -> bool {
    grid.cells().any(|cell| {
        // Right and down cover every adjacent pair once.
        [(cell.x + 1, cell.y), (cell.x, cell.y + 1)]
            .into_iter()
            .filter_map(|(x, y)| grid.cell_at(x, y))
            .any(|other| grid.get(other).is_some_and(|o| o.color == cell.color))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids_at(grid: &Grid, positions: &[(usize, usize)]) -> Vec<CellId> {
        let mut ids: Vec<_> = positions
            .iter()
            .map(|&(x, y)| grid.cell_at(x, y).unwrap())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Every member is reachable from `seed` inside the group, and nothing
    /// outside the group touches it with the same colour.
    fn assert_connected_and_maximal(grid: &Grid, seed: CellId, group: &Group) {
        assert!(group.contains(seed));
        let mut reached = HashSet::from([seed]);
        let mut stack = vec![seed];
        while let Some(id) = stack.pop() {
            for n in neighbours(grid, id) {
                assert!(group.contains(n), "{n:?} adjacent and same colour but missing");
                if reached.insert(n) {
                    stack.push(n);
                }
            }
        }
        assert_eq!(reached.len(), group.len(), "group holds unreachable cells");
    }

    #[test]
    fn test_isolated_seed_is_group_of_one() {
        let grid = Grid::from_rows(&["GYG", "YRY", "GYG"]);
        let seed = grid.cell_at(1, 1).unwrap();
        let group = find_group(&grid, seed);
        assert_eq!(group.cells(), &[seed]);
        assert!(!group.is_match());
    }

    #[test]
    fn test_l_shape_group() {
        let grid = Grid::from_rows(&["RYY", "RYB", "RRB"]);
        let seed = grid.cell_at(0, 0).unwrap();
        let group = find_group(&grid, seed);
        assert_eq!(group.cells(), ids_at(&grid, &[(0, 0), (0, 1), (0, 2), (1, 2)]));
        assert_connected_and_maximal(&grid, seed, &group);
    }

    #[test]
    fn test_diagonal_does_not_connect() {
        let grid = Grid::from_rows(&["GY", "YG"]);
        let group = find_group(&grid, grid.cell_at(0, 0).unwrap());
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_ring_terminates_and_skips_hole() {
        let grid = Grid::from_rows(&["BBB", "BRB", "BBB"]);
        let seed = grid.cell_at(2, 2).unwrap();
        let group = find_group(&grid, seed);
        assert_eq!(group.len(), 8);
        assert!(!group.contains(grid.cell_at(1, 1).unwrap()));
        assert_connected_and_maximal(&grid, seed, &group);
    }

    #[test]
    fn test_same_group_from_any_member() {
        let grid = Grid::from_rows(&["MMY", "YMM", "YYM"]);
        let from_corner = find_group(&grid, grid.cell_at(0, 0).unwrap());
        let from_end = find_group(&grid, grid.cell_at(2, 2).unwrap());
        assert_eq!(from_corner, from_end);
        assert_eq!(from_corner.len(), 5);
    }

    #[test]
    fn test_group_stops_at_gaps() {
        let grid = Grid::from_rows(&["C.C", "C.C"]);
        let group = find_group(&grid, grid.cell_at(0, 0).unwrap());
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_removed_seed_is_empty_group() {
        let mut grid = Grid::from_rows(&["GG"]);
        let seed = grid.cell_at(0, 0).unwrap();
        grid.remove_cells(&[seed]);
        assert!(find_group(&grid, seed).is_empty());
    }

    #[test]
    fn test_every_seed_on_mixed_board() {
        let grid = Grid::from_rows(&["GGYRB", "GYYRB", "RRYBB", "MRCCB"]);
        for seed in grid.ids() {
            let group = find_group(&grid, seed);
            assert_connected_and_maximal(&grid, seed, &group);
        }
    }

    #[test]
    fn test_has_any_group() {
        assert!(has_any_group(&Grid::from_rows(&["GY", "GR"])));
        assert!(has_any_group(&Grid::from_rows(&["GYY"])));
        assert!(!has_any_group(&Grid::from_rows(&["GY", "YG"])));
        assert!(!has_any_group(&Grid::from_rows(&["G.G"])));
        assert!(!has_any_group(&Grid::new(3, 3)));
    }
}
