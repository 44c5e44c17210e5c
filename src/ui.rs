//! Layout and drawing: board, sidebar, game over.

use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use sametui::{CellColor, Snapshot, Status};

/// Each cell is two terminal columns wide so the board looks square.
const CELL_WIDTH: u16 = 2;
const CELL_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH: u16 = 24;
const CELL_SYMBOL: &str = "●";

/// Board size in terminal cells (border + grid) for given grid dimensions.
fn board_pixel_size(width: usize, height: usize) -> (u16, u16) {
    let w = u16::try_from(width).unwrap_or(u16::MAX);
    let h = u16::try_from(height).unwrap_or(u16::MAX);
    (
        w.saturating_mul(CELL_WIDTH).saturating_add(2),
        h.saturating_mul(CELL_HEIGHT).saturating_add(2),
    )
}

/// Largest board (width, height) in grid cells that fits the given terminal size.
pub fn max_board_cells_for_terminal(term_cols: u16, term_rows: u16) -> (usize, usize) {
    let w = term_cols.saturating_sub(2).saturating_sub(SIDEBAR_WIDTH) / CELL_WIDTH;
    let h = term_rows.saturating_sub(2) / CELL_HEIGHT;
    (usize::from(w).max(1), usize::from(h).max(1))
}

/// Outer rects (board with border, sidebar) for the centred game layout.
fn game_layout(area: Rect, width: usize, height: usize) -> (Rect, Rect) {
    let (pw, ph) = board_pixel_size(width, height);
    let total_w = pw + SIDEBAR_WIDTH;

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(ph),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);
    (inner[0], inner[1])
}

/// Board inner rect (no border); matches what `draw` renders into.
pub fn board_rect(area: Rect, width: usize, height: usize) -> Rect {
    let (outer, _) = game_layout(area, width, height);
    Block::default().borders(Borders::ALL).inner(outer)
}

/// Terminal position → grid (column, row). `None` outside the board.
pub fn screen_to_cell(board: Rect, col: u16, row: u16) -> Option<(i32, i32)> {
    if col < board.x || row < board.y || col >= board.right() || row >= board.bottom() {
        return None;
    }
    Some((
        i32::from((col - board.x) / CELL_WIDTH),
        i32::from((row - board.y) / CELL_HEIGHT),
    ))
}

pub fn draw(
    frame: &mut Frame,
    snapshot: &Snapshot,
    theme: &Theme,
    cursor: Option<(usize, usize)>,
    seed: u64,
) {
    let area = frame.area();
    let (board_outer, sidebar) = game_layout(area, snapshot.width, snapshot.height);
    draw_board(frame, snapshot, theme, board_outer, cursor);
    draw_sidebar(frame, snapshot, theme, sidebar, seed);
    if snapshot.status.is_over() {
        draw_game_over(frame, snapshot, theme, area);
    }
}

fn draw_board(
    frame: &mut Frame,
    snapshot: &Snapshot,
    theme: &Theme,
    area: Rect,
    cursor: Option<(usize, usize)>,
) {
    let title = if snapshot.bonus > 0 {
        format!(" Sametui  Score: {} + {} ", snapshot.score, snapshot.bonus)
    } else {
        format!(" Sametui  Score: {} ", snapshot.score)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(title, theme.title));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();
    for y in inner.top()..inner.bottom() {
        for x in inner.left()..inner.right() {
            buf[(x, y)].set_symbol(" ").set_style(Style::default().bg(theme.bg));
        }
    }

    for cell in &snapshot.cells {
        let (Ok(cx), Ok(cy)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            continue;
        };
        let rx = inner.x.saturating_add(cx.saturating_mul(CELL_WIDTH));
        let ry = inner.y.saturating_add(cy.saturating_mul(CELL_HEIGHT));
        if rx >= inner.right() || ry >= inner.bottom() {
            continue;
        }
        let fg = if cell.matched {
            theme.highlight
        } else {
            theme.cell_color(cell.color)
        };
        buf[(rx, ry)]
            .set_symbol(CELL_SYMBOL)
            .set_style(Style::default().fg(fg).bg(theme.bg));
    }

    if let Some((cx, cy)) = cursor {
        let (Ok(cx), Ok(cy)) = (u16::try_from(cx), u16::try_from(cy)) else {
            return;
        };
        let rx = inner.x.saturating_add(cx.saturating_mul(CELL_WIDTH));
        let ry = inner.y.saturating_add(cy.saturating_mul(CELL_HEIGHT));
        for x in rx..(rx + CELL_WIDTH).min(inner.right()) {
            if ry < inner.bottom() {
                buf[(x, ry)].set_bg(theme.div_line);
            }
        }
    }
}

fn sidebar_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
}

fn draw_sidebar(frame: &mut Frame, snapshot: &Snapshot, theme: &Theme, area: Rect, seed: u64) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let hint_style = Style::default().fg(theme.inactive_fg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Stats (border + score, bonus, left, seed)
            Constraint::Length(1),
            Constraint::Length(4), // Colours (border + title + strip)
            Constraint::Length(1),
            Constraint::Min(0), // Keys
        ])
        .split(area);

    let stats_block = sidebar_block(theme);
    let stats_inner = stats_block.inner(chunks[0]);
    stats_block.render(chunks[0], frame.buffer_mut());
    let stats_lines = vec![
        Line::from(vec![
            Span::styled("Score: ", title_style),
            Span::styled(snapshot.score.to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Bonus: ", title_style),
            Span::styled(snapshot.bonus.to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Left: ", title_style),
            Span::styled(snapshot.cells.len().to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Seed: ", title_style),
            Span::styled(seed.to_string(), hint_style),
        ]),
    ];
    Paragraph::new(Text::from(stats_lines)).render(stats_inner, frame.buffer_mut());

    let colours_block = sidebar_block(theme);
    let colours_inner = colours_block.inner(chunks[2]);
    colours_block.render(chunks[2], frame.buffer_mut());
    let colours_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(colours_inner);
    Paragraph::new(Line::from(Span::styled("Colours", title_style)))
        .render(colours_layout[0], frame.buffer_mut());
    draw_colour_strip(frame, snapshot, theme, colours_layout[1]);

    let keys = vec![
        Line::from(Span::styled("Mouse  hover / click", hint_style)),
        Line::from(Span::styled("hjkl   move cursor", hint_style)),
        Line::from(Span::styled("Enter  remove group", hint_style)),
        Line::from(Span::styled("R      new game", hint_style)),
        Line::from(Span::styled("Q      quit", hint_style)),
    ];
    Paragraph::new(Text::from(keys)).render(chunks[4], frame.buffer_mut());
}

/// One block per colour still on the board, with its count.
fn draw_colour_strip(frame: &mut Frame, snapshot: &Snapshot, theme: &Theme, area: Rect) {
    let mut x = area.x;
    for color in CellColor::ALL {
        let count = snapshot.cells.iter().filter(|c| c.color == color).count();
        if count == 0 {
            continue;
        }
        let label = format!("{CELL_SYMBOL}{count} ");
        let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
        if x.saturating_add(width) > area.right() {
            break;
        }
        frame.buffer_mut().set_string(
            x,
            area.y,
            &label,
            Style::default().fg(theme.cell_color(color)).bg(theme.bg),
        );
        x += width;
    }
}

fn draw_game_over(frame: &mut Frame, snapshot: &Snapshot, theme: &Theme, area: Rect) {
    let popup_w = 30u16;
    let popup_h = 8u16;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    let (title, title_bg) = match snapshot.status {
        Status::Cleared => (" Board cleared! ", Color::Green),
        _ => (" No more moves ", Color::Red),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::White).bg(title_bg).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" Score: {} ", snapshot.score),
            Style::default().fg(theme.main_fg),
        )),
        Line::from(Span::styled(
            format!(" Left: {} ", snapshot.cells.len()),
            Style::default().fg(theme.main_fg),
        )),
        Line::from(Span::styled(
            " R — New game    Q — Quit ",
            Style::default().fg(theme.main_fg),
        )),
    ];
    let buf = frame.buffer_mut();
    for y in popup.top()..popup.bottom() {
        for x in popup.left()..popup.right() {
            buf[(x, y)].set_symbol(" ").set_style(Style::default().bg(theme.bg));
        }
    }
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
                .title(Span::styled(" Sametui ", theme.title)),
        )
        .render(popup, frame.buffer_mut());
}
