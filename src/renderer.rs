use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::{CELL_GLYPH, GridSize};
use crate::game::{GameSnapshot, RunState};
use crate::snake::Position;

const SNAKE_COLOR: Color = Color::Rgb(0, 255, 0);
const FOOD_COLOR: Color = Color::Red;
const PLAY_BG: Color = Color::Black;
const BORDER_COLOR: Color = Color::White;

/// Terminal columns one grid cell occupies.
#[must_use]
pub fn cell_width() -> u16 {
    u16::try_from(CELL_GLYPH.width()).unwrap_or(1).max(1)
}

/// Terminal size needed to draw the bordered grid plus the status bar.
#[must_use]
pub fn required_area(bounds: GridSize) -> (u16, u16) {
    let width = bounds.width.saturating_mul(cell_width()).saturating_add(2);
    let height = bounds.height.saturating_add(3);
    (width, height)
}

/// Redraws the whole frame from one snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let (width, height) = required_area(snapshot.bounds);
    if area.width < width || area.height < height {
        render_too_small(frame, area, width, height);
        return;
    }

    let [board_area, status_area] = centered_board(area, width, height);

    let block = Block::bordered()
        .border_style(Style::new().fg(BORDER_COLOR))
        .style(Style::new().bg(PLAY_BG));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let buffer = frame.buffer_mut();
    for segment in &snapshot.snake {
        if let Some((x, y)) = grid_to_terminal(inner, snapshot.bounds, *segment) {
            buffer.set_string(x, y, CELL_GLYPH, Style::new().fg(SNAKE_COLOR).bg(PLAY_BG));
        }
    }
    if let Some((x, y)) = grid_to_terminal(inner, snapshot.bounds, snapshot.food) {
        buffer.set_string(x, y, CELL_GLYPH, Style::new().fg(FOOD_COLOR).bg(PLAY_BG));
    }

    frame.render_widget(status_line(snapshot), status_area);
}

fn centered_board(area: Rect, width: u16, height: u16) -> [Rect; 2] {
    let [rows] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board_rows, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(rows);
    let [board_area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(board_rows);

    [board_area, status_area]
}

fn status_line(snapshot: &GameSnapshot) -> Paragraph<'static> {
    let line = match (snapshot.run_state, snapshot.death_reason) {
        (RunState::Running, _) => Line::from(format!(
            "length {}  heading {}  [q] quit",
            snapshot.snake.len(),
            snapshot.direction.label()
        )),
        (RunState::Terminated, reason) => {
            let cause = reason.map_or("stopped", |reason| reason.describe());
            Line::from(format!(
                "game over: {cause} at length {}  [r] restart  [q] quit",
                snapshot.snake.len()
            ))
            .style(Style::new().fg(FOOD_COLOR).add_modifier(Modifier::BOLD))
        }
    };

    Paragraph::new(line).alignment(Alignment::Center)
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, width: u16, height: u16) {
    let message = Paragraph::new(vec![
        Line::from("Terminal too small"),
        Line::from(format!(
            "need {width}x{height}, have {}x{}",
            area.width, area.height
        )),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(message, area);
}

/// Maps a grid cell to the terminal cell its glyph starts at.
fn grid_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(cell_width())?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
