use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::{GLYPH_CELL, GLYPH_EMPTY, PALETTE};
use crate::food::Food;
use crate::game::GameState;
use crate::grid::{Grid, Position};
use crate::snake::Snake;

/// Terminal columns per grid cell.
const CELL_COLUMNS: u16 = 2;

/// Drawable game entities.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Snake(&'a Snake),
    Food(&'a Food),
}

impl Entity<'_> {
    /// Cells this entity covers and the fill color for each.
    #[must_use]
    pub fn cells(&self) -> Vec<(Position, Color)> {
        match self {
            Self::Snake(snake) => snake
                .segments()
                .enumerate()
                .map(|(index, segment)| {
                    let color = if index == 0 {
                        PALETTE.snake_head
                    } else {
                        PALETTE.snake_body
                    };
                    (*segment, color)
                })
                .collect(),
            Self::Food(food) => vec![(food.position(), PALETTE.food)],
        }
    }
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState) {
    let grid = *state.grid();
    let [play_area, hud_area] = layout(frame.area(), grid);

    let block = Block::bordered()
        .border_style(Style::new().fg(PALETTE.cell_border))
        .style(Style::new().bg(PALETTE.background));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    if let Some(vacated) = state.snake.last_vacated() {
        let style = Style::new().bg(PALETTE.background);
        paint(frame, inner, grid, vacated, GLYPH_EMPTY, style);
    }

    for entity in [Entity::Food(&state.food), Entity::Snake(&state.snake)] {
        for (position, fill) in entity.cells() {
            let style = Style::new()
                .fg(PALETTE.cell_border)
                .bg(fill)
                .add_modifier(Modifier::BOLD);
            paint(frame, inner, grid, position, GLYPH_CELL, style);
        }
    }

    frame.render_widget(
        Paragraph::new(hud_line(state)).style(Style::new().fg(PALETTE.hud)),
        hud_area,
    );
}

fn layout(area: Rect, grid: Grid) -> [Rect; 2] {
    let width = u16::try_from(grid.columns())
        .unwrap_or(u16::MAX)
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2);
    let height = u16::try_from(grid.rows())
        .unwrap_or(u16::MAX)
        .saturating_add(2);

    let [play_row, hud_row, _] = Layout::vertical([
        Constraint::Length(height),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);
    let [play_area, _] =
        Layout::horizontal([Constraint::Length(width), Constraint::Min(0)]).areas(play_row);

    [play_area, hud_row]
}

fn hud_line(state: &GameState) -> Line<'static> {
    let last = state
        .last_score
        .map_or_else(|| "-".to_string(), |length| length.to_string());

    Line::from(format!(
        " Length {}   Last game {last}   [Arrows/WASD] move  [N] new game  [Esc] quit",
        state.snake.len()
    ))
}

fn paint(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: Grid,
    position: Position,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = cell_to_terminal(inner, grid, position) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, glyph, style);
}

/// Maps a grid position to the terminal cell of its left glyph column.
/// Returns `None` when the cell does not fit in `inner`.
fn cell_to_terminal(inner: Rect, grid: Grid, position: Position) -> Option<(u16, u16)> {
    let (column, row) = grid.cell_of(position)?;

    let x_offset = u16::try_from(column).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(row).ok()?;

    let x = inner.x.checked_add(x_offset)?;
    let y = inner.y.checked_add(y_offset)?;
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
