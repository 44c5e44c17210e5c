//! Cell record, slot identity and colour palette.

/// Cell colours (index 0..6 matches the theme palette order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColor {
    Green,
    Yellow,
    Red,
    Blue,
    Magenta,
    Cyan,
}

impl CellColor {
    pub const ALL: [Self; 6] = [
        Self::Green,
        Self::Yellow,
        Self::Red,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
    ];

    /// Palette index 0..6 for theme.cell_color().
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Self::Green => 0,
            Self::Yellow => 1,
            Self::Red => 2,
            Self::Blue => 3,
            Self::Magenta => 4,
            Self::Cyan => 5,
        }
    }

    /// Colour for a palette index; wraps past the last variant.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Letter used by `Grid::from_rows` and debug output.
    pub fn letter(self) -> char {
        match self {
            Self::Green => 'G',
            Self::Yellow => 'Y',
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Magenta => 'M',
            Self::Cyan => 'C',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.letter() == c.to_ascii_uppercase())
    }
}

/// Stable identity of a cell: its slot in the grid store.
/// Falling changes a cell's position, never its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(pub(crate) usize);

impl CellId {
    #[inline]
    pub fn slot(self) -> usize {
        self.0
    }
}

/// Single tile. `x` is the column, `y` the row; y=0 is top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub color: CellColor,
    /// Member of the currently hovered group.
    pub matched: bool,
}

impl Cell {
    pub fn new(x: usize, y: usize, color: CellColor) -> Self {
        Self {
            x,
            y,
            color,
            matched: false,
        }
    }
}
