//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use ratatui::style::Color;
use sametui::CellColor;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// `0xRRGGBB` → Color.
const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const ONEDARK_CELLS: [Color; 6] = [
    rgb(0x98C379), // green
    rgb(0xE5C07B), // yellow
    rgb(0xE06C75), // red
    rgb(0x61AFEF), // blue
    rgb(0xC678DD), // magenta
    rgb(0x56B6C2), // cyan
];

/// One Dark palette and UI colours loaded from a theme file.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Cell colours (index 0..=5): green, yellow, red, blue, magenta, cyan.
    pub cells: [Color; 6],
    /// Cells of the hovered group.
    pub highlight: Color,
    /// Board background.
    pub bg: Color,
    /// Grid / border.
    pub div_line: Color,
    /// Text (score, cells left).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
    /// Secondary text (key hints).
    pub inactive_fg: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::onedark_default()
    }
}

impl Theme {
    pub fn onedark_default() -> Self {
        Self {
            cells: ONEDARK_CELLS,
            highlight: rgb(0xDDDDDD),
            bg: rgb(0x31353F),
            div_line: rgb(0x3F444F),
            main_fg: rgb(0xABB2BF),
            title: rgb(0xE5C07B),
            inactive_fg: rgb(0x5C6370),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to One Dark defaults if path is None or the file is missing.
    /// `palette` selects colour variant: Normal (theme), HighContrast, or Colorblind.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default_for_palette(palette)),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        let mut theme = Self::from_map(&map);
        theme.apply_palette(palette);
        Ok(theme)
    }

    fn default_for_palette(palette: crate::Palette) -> Self {
        let mut t = Self::onedark_default();
        t.apply_palette(palette);
        t
    }

    /// Override cell colours for high-contrast or colorblind.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => {
                self.cells = [
                    rgb(0x00FF00),
                    rgb(0xFFFF00),
                    rgb(0xFF0000),
                    rgb(0x0088FF),
                    rgb(0xFF00FF),
                    rgb(0x00FFFF),
                ];
                self.highlight = rgb(0xFFFFFF);
            }
            crate::Palette::Colorblind => {
                // Blue/orange first so two-colour boards stay readable.
                self.cells = [
                    rgb(0x0077BB),
                    rgb(0xEE7733),
                    rgb(0x009988),
                    rgb(0xCC3311),
                    rgb(0xEE3377),
                    rgb(0xBBBB00),
                ];
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).and_then(|v| parse_hex(v).ok());
        let d = Self::onedark_default();
        Self {
            cells: [
                get("mem_box").or_else(|| get("cpu_start")).unwrap_or(d.cells[0]),
                get("title").or_else(|| get("cpu_mid")).unwrap_or(d.cells[1]),
                get("cpu_end").or_else(|| get("temp_end")).unwrap_or(d.cells[2]),
                get("cpu_box").unwrap_or(d.cells[3]),
                get("net_box").unwrap_or(d.cells[4]),
                get("hi_fg").or_else(|| get("proc_misc")).unwrap_or(d.cells[5]),
            ],
            highlight: get("selected_bg").unwrap_or(d.highlight),
            bg: get("meter_bg").unwrap_or(d.bg),
            div_line: get("div_line").unwrap_or(d.div_line),
            main_fg: get("main_fg").unwrap_or(d.main_fg),
            title: get("title").unwrap_or(d.title),
            inactive_fg: get("inactive_fg").unwrap_or(d.inactive_fg),
        }
    }

    #[inline]
    pub fn cell_color(&self, color: CellColor) -> Color {
        self.cells[color.index() as usize % self.cells.len()]
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let value = u32::from_str_radix(s, 16).map_err(|_| invalid())?;
    match s.len() {
        6 => Ok(rgb(value)),
        3 => {
            let r = ((value >> 8) & 0xF) as u8 * 17;
            let g = ((value >> 4) & 0xF) as u8 * 17;
            let b = (value & 0xF) as u8 * 17;
            Ok(Color::Rgb(r, g, b))
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#98C379").unwrap();
        assert!(matches!(c, Color::Rgb(0x98, 0xC3, 0x79)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
        assert!(matches!(parse_hex("#DDD").unwrap(), Color::Rgb(0xDD, 0xDD, 0xDD)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("#12").is_err());
        assert!(parse_hex("#GGGGGG").is_err());
        assert!(parse_hex("#-12345").is_err());
    }

    #[test]
    fn test_parse_theme_line() {
        let map = parse_theme_file(r##"theme[meter_bg]="#31353F""##);
        assert_eq!(map.get("meter_bg"), Some(&"#31353F".to_string()));
    }

    #[test]
    fn test_theme_file_overrides_cells_and_highlight() {
        let map = parse_theme_file(
            "# comment\ntheme[cpu_box]='#000080'\ntheme[selected_bg]=\"#FFFFFF\"\ngarbage\n",
        );
        let theme = Theme::from_map(&map);
        assert_eq!(theme.cell_color(CellColor::Blue), Color::Rgb(0, 0, 0x80));
        assert_eq!(theme.highlight, Color::Rgb(255, 255, 255));
        assert_eq!(theme.cell_color(CellColor::Green), ONEDARK_CELLS[0]);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let theme = Theme::load(
            Some(Path::new("/nonexistent/sametui.theme")),
            crate::Palette::Normal,
        )
        .unwrap();
        assert_eq!(theme.cells, ONEDARK_CELLS);
    }
}
