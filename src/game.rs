//! Game state: grid, score, hover bonus, click and hover handling.

use crate::cell::{CellColor, CellId};
use crate::grid::Grid;
use crate::matching::{self, Group};
use crate::physics;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Board size of the classic layout.
pub const DEFAULT_WIDTH: usize = 11;
pub const DEFAULT_HEIGHT: usize = 12;

/// Options that shape a new board.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Number of distinct colours, 1..=6.
    pub colors: usize,
    /// Board seed; a fresh one is drawn when `None`.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            colors: CellColor::ALL.len(),
            seed: None,
        }
    }
}

/// Points for removing a group of `n` cells: n * (n - 1).
#[inline]
pub fn points(n: usize) -> u32 {
    let n = u32::try_from(n).unwrap_or(u32::MAX);
    n.saturating_mul(n.saturating_sub(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Some group of two or more cells remains.
    Playing,
    /// Every cell has been removed.
    Cleared,
    /// Cells remain but none can be removed.
    Stuck,
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Self::Playing
    }
}

/// Result of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Removed { cells: usize, points: u32 },
    /// Empty position, or a group of one.
    NoMatch,
}

/// Read-only view of one cell for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub x: usize,
    pub y: usize,
    pub color: CellColor,
    pub matched: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<CellView>,
    pub score: u32,
    pub bonus: u32,
    pub status: Status,
}

/// Game state: the board plus cumulative score and hover preview.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    score: u32,
    /// Points the hovered group would award; 0 when nothing removable is hovered.
    bonus: u32,
    status: Status,
    seed: u64,
}

impl GameState {
    /// Fresh, fully filled board.
    pub fn new(config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = Grid::filled(config.width.max(1), config.height.max(1), config.colors, &mut rng);
        log::debug!(
            "new {}x{} board, {} colours, seed {seed}",
            grid.width(),
            grid.height(),
            config.colors
        );
        Self::from_grid_with_seed(grid, seed)
    }

    /// Start from an existing board (score 0).
    pub fn from_grid(grid: Grid) -> Self {
        Self::from_grid_with_seed(grid, 0)
    }

    fn from_grid_with_seed(grid: Grid, seed: u64) -> Self {
        grid.check_invariants();
        let mut state = Self {
            grid,
            score: 0,
            bonus: 0,
            status: Status::Playing,
            seed,
        };
        state.refresh_status();
        state
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Seed the board was generated from (0 for boards built by hand).
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Cells left on the board.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.grid.len()
    }

    fn cell_at_pointer(&self, x: i32, y: i32) -> Option<CellId> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.grid.cell_at(x, y)
    }

    fn group_at_pointer(&self, x: i32, y: i32) -> Option<Group> {
        self.cell_at_pointer(x, y)
            .map(|seed| matching::find_group(&self.grid, seed))
    }

    /// Pointer moved over (x, y): highlight the group under it and preview its points.
    pub fn pointer_moved(&mut self, x: i32, y: i32) {
        self.grid.clear_matched();
        self.bonus = 0;
        let Some(group) = self.group_at_pointer(x, y) else {
            return;
        };
        if group.is_match() {
            for &id in group.cells() {
                self.grid.set_matched(id, true);
            }
        }
        self.bonus = points(group.len());
    }

    /// Pointer clicked (x, y): remove the group under it if it has two or more
    /// cells, settle the board, then refresh the highlight for the same spot.
    pub fn pointer_clicked(&mut self, x: i32, y: i32) -> ClickOutcome {
        let outcome = self.click(x, y);
        self.pointer_moved(x, y);
        outcome
    }

    fn click(&mut self, x: i32, y: i32) -> ClickOutcome {
        let Some(group) = self.group_at_pointer(x, y) else {
            return ClickOutcome::NoMatch;
        };
        if !group.is_match() {
            return ClickOutcome::NoMatch;
        }
        let gained = points(group.len());
        self.score = self.score.saturating_add(gained);
        let removed = self.grid.remove_cells(group.cells());
        assert_eq!(removed, group.len(), "group held cells not on the board");
        physics::apply_gravity(&mut self.grid);
        physics::collapse_columns(&mut self.grid);
        self.refresh_status();
        log::debug!(
            "removed {removed} cells at ({x}, {y}) for {gained} points, score {}, {} left, {:?}",
            self.score,
            self.grid.len(),
            self.status
        );
        ClickOutcome::Removed {
            cells: removed,
            points: gained,
        }
    }

    fn refresh_status(&mut self) {
        self.status = if self.grid.is_empty() {
            Status::Cleared
        } else if matching::has_any_group(&self.grid) {
            Status::Playing
        } else {
            Status::Stuck
        };
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            cells: self
                .grid
                .cells()
                .map(|c| CellView {
                    x: c.x,
                    y: c.y,
                    color: c.color,
                    matched: c.matched,
                })
                .collect(),
            score: self.score,
            bonus: self.bonus,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched_positions(state: &GameState) -> Vec<(usize, usize)> {
        let mut v: Vec<_> = state
            .snapshot()
            .cells
            .iter()
            .filter(|c| c.matched)
            .map(|c| (c.x, c.y))
            .collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_points_formula() {
        assert_eq!(points(0), 0);
        assert_eq!(points(1), 0);
        assert_eq!(points(2), 2);
        assert_eq!(points(3), 6);
        assert_eq!(points(5), 20);
        assert_eq!(points(9), 72);
    }

    #[test]
    fn test_new_board_is_full() {
        let config = GameConfig {
            width: 5,
            height: 4,
            colors: 3,
            seed: Some(42),
        };
        let state = GameState::new(&config);
        assert_eq!(state.remaining(), 20);
        assert_eq!(state.score(), 0);
        assert_eq!(state.bonus(), 0);
        assert_eq!(state.seed(), 42);
    }

    #[test]
    fn test_same_seed_same_board() {
        let config = GameConfig {
            seed: Some(1234),
            ..GameConfig::default()
        };
        let a = GameState::new(&config);
        let b = GameState::new(&config);
        assert_eq!(a.grid().to_rows(), b.grid().to_rows());
        assert_eq!(a.snapshot().cells.len(), DEFAULT_WIDTH * DEFAULT_HEIGHT);
    }

    #[test]
    fn test_hover_highlights_group_and_sets_bonus() {
        let mut state = GameState::from_grid(Grid::from_rows(&["RRG", "RYG", "BYB"]));
        state.pointer_moved(0, 1);
        assert_eq!(matched_positions(&state), vec![(0, 0), (0, 1), (1, 0)]);
        assert_eq!(state.bonus(), 6);
        assert_eq!(state.score(), 0);
        assert_eq!(state.remaining(), 9);
    }

    #[test]
    fn test_hover_single_cell_clears_highlight() {
        let mut state = GameState::from_grid(Grid::from_rows(&["RRG", "RYG", "BYB"]));
        state.pointer_moved(0, 0);
        assert!(!matched_positions(&state).is_empty());
        state.pointer_moved(0, 2);
        assert!(matched_positions(&state).is_empty());
        assert_eq!(state.bonus(), 0);
    }

    #[test]
    fn test_hover_off_board_clears_highlight() {
        let mut state = GameState::from_grid(Grid::from_rows(&["GG"]));
        state.pointer_moved(1, 0);
        assert_eq!(state.bonus(), 2);
        state.pointer_moved(-1, 0);
        assert!(matched_positions(&state).is_empty());
        assert_eq!(state.bonus(), 0);
        state.pointer_moved(0, 7);
        assert_eq!(state.bonus(), 0);
    }

    #[test]
    fn test_click_removes_settles_and_scores() {
        // Column 0 empties entirely and the rest slides left.
        let mut state = GameState::from_grid(Grid::from_rows(&["CBY", "CBR", "CMR"]));
        let outcome = state.pointer_clicked(0, 0);
        assert_eq!(outcome, ClickOutcome::Removed { cells: 3, points: 6 });
        assert_eq!(state.grid().to_rows(), vec!["BY.", "BR.", "MR."]);

        // The yellow above the red pair falls into the gap.
        let outcome = state.pointer_clicked(1, 2);
        assert_eq!(outcome, ClickOutcome::Removed { cells: 2, points: 2 });
        assert_eq!(state.score(), 8);
        assert_eq!(state.grid().to_rows(), vec!["B..", "B..", "MY."]);
        state.grid().check_invariants();
    }

    #[test]
    fn test_click_isolated_cell_changes_nothing() {
        let mut state = GameState::from_grid(Grid::from_rows(&["GYG", "YRY", "GYG"]));
        let before = state.grid().to_rows();
        assert_eq!(state.pointer_clicked(1, 1), ClickOutcome::NoMatch);
        assert_eq!(state.score(), 0);
        assert_eq!(state.grid().to_rows(), before);
    }

    #[test]
    fn test_click_empty_position_is_noop() {
        let mut state = GameState::from_grid(Grid::from_rows(&["G.", "GY"]));
        assert_eq!(state.pointer_clicked(1, 0), ClickOutcome::NoMatch);
        assert_eq!(state.pointer_clicked(5, 5), ClickOutcome::NoMatch);
        assert_eq!(state.remaining(), 3);
    }

    #[test]
    fn test_hover_after_click_reflects_new_board() {
        // After the reds go, the blue pair lands under the pointer.
        let mut state = GameState::from_grid(Grid::from_rows(&["B", "B", "R", "R"]));
        state.pointer_clicked(0, 3);
        assert_eq!(state.grid().to_rows(), vec![".", ".", "B", "B"]);
        assert_eq!(matched_positions(&state), vec![(0, 2), (0, 3)]);
        assert_eq!(state.bonus(), 2);
    }

    #[test]
    fn test_status_transitions() {
        let mut state = GameState::from_grid(Grid::from_rows(&["GG"]));
        assert_eq!(state.status(), Status::Playing);
        state.pointer_clicked(0, 0);
        assert_eq!(state.status(), Status::Cleared);

        let mut state = GameState::from_grid(Grid::from_rows(&["YY", "GB"]));
        state.pointer_clicked(0, 0);
        assert_eq!(state.status(), Status::Stuck);
        assert!(state.status().is_over());
    }

    #[test]
    fn test_snapshot_reports_state() {
        let mut state = GameState::from_grid(Grid::from_rows(&["RR", "GB"]));
        state.pointer_moved(0, 0);
        let snap = state.snapshot();
        assert_eq!((snap.width, snap.height), (2, 2));
        assert_eq!(snap.cells.len(), 4);
        assert_eq!(snap.bonus, 2);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.status, Status::Playing);
        assert_eq!(snap.cells.iter().filter(|c| c.matched).count(), 2);
    }
}
