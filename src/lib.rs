//! Sametui core: SameGame-style board, flood fill, gravity, collapse and scoring.
//!
//! The terminal front-end lives in the `sametui` binary; everything here is
//! synchronous, single-threaded and free of I/O. A front-end feeds pointer
//! positions (already converted to grid column/row) into [`GameState`] and
//! draws the [`Snapshot`] it returns each frame.
//!
//! ```
//! use sametui::{GameState, Grid};
//!
//! let mut game = GameState::from_grid(Grid::from_rows(&["GGG", "GGG", "GGG"]));
//! game.pointer_clicked(1, 1);
//! assert_eq!(game.score(), 72);
//! assert_eq!(game.remaining(), 0);
//! ```

pub mod cell;
pub mod game;
pub mod grid;
pub mod matching;
pub mod physics;

pub use cell::{Cell, CellColor, CellId};
pub use game::{CellView, ClickOutcome, GameConfig, GameState, Snapshot, Status, points};
pub use grid::Grid;
pub use matching::{Group, find_group};
