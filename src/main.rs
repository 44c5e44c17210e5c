//! Sametui: SameGame-style tile-matching puzzle in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Parser, ValueEnum};
use sametui::GameConfig;

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_default();
    let config = GameConfig {
        width: usize::from(args.width),
        height: usize::from(args.height),
        colors: usize::from(args.colors),
        seed: args.seed,
    };
    let mut app = App::new(config, theme);
    app.run()?;
    Ok(())
}

/// SameGame-style puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "sametui",
    version,
    about = "SameGame-style tile-matching puzzle in the terminal. Remove groups of the same colour; bigger groups score more.",
    long_about = "Sametui is a terminal take on the classic SameGame.\n\n\
        Click a cell to remove it together with every same-coloured cell connected to it \
        (up, down, left, right). Groups need at least two cells and are worth n*(n-1) points. \
        Cells above fall into the gap and empty columns close up to the left.\n\n\
        CONTROLS:\n  Mouse       Hover previews a group, left click removes it\n  \
        Arrows/hjkl Move the cursor    Enter/Space Remove group under cursor\n  \
        R           New game           Q / Esc     Quit"
)]
pub struct Args {
    /// Board width in columns. Shrunk to fit the terminal if needed.
    #[arg(long, default_value = "11", value_name = "COLS",
          value_parser = clap::value_parser!(u16).range(1..))]
    pub width: u16,

    /// Board height in rows. Shrunk to fit the terminal if needed.
    #[arg(long, default_value = "12", value_name = "ROWS",
          value_parser = clap::value_parser!(u16).range(1..))]
    pub height: u16,

    /// Number of distinct colours (1-6). Fewer colours make bigger groups.
    #[arg(short, long, default_value = "6", value_name = "N",
          value_parser = clap::value_parser!(u8).range(1..=6))]
    pub colors: u8,

    /// Seed for the board; the same seed always deals the same board.
    #[arg(short, long, value_name = "N")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
