use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::border;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::config::{BoardConfig, GLYPH_CELL, GLYPH_GRID, THEME};
use crate::game::{GameState, GameStatus};
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Terminal columns used by one board cell, so cells look roughly square.
pub const CELL_COLUMNS: u16 = 2;

/// Front-end switches that do not affect the simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub show_grid: bool,
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, options: RenderOptions) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state);
    let board = state.board();

    let Some(board_area) = board_viewport(play_area, board) else {
        render_too_small(frame, play_area, board);
        return;
    };

    let block = Block::bordered()
        .border_set(border::THICK)
        .border_style(Style::new().fg(THEME.border_fg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    if options.show_grid {
        render_grid(frame, inner, board);
    }
    render_body(frame, inner, state);
    render_food(frame, inner, state);
    render_head(frame, inner, state);

    if state.status == GameStatus::GameOver {
        render_game_over_menu(frame, board_area, state.score);
    }
}

/// Returns the bordered board rectangle centred in `area`, or `None` when the
/// board does not fit.
#[must_use]
pub fn board_viewport(area: Rect, board: BoardConfig) -> Option<Rect> {
    let width = board.columns().checked_mul(CELL_COLUMNS)?.checked_add(2)?;
    let height = board.rows().checked_add(2)?;

    if area.width < width || area.height < height {
        return None;
    }

    Some(Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    })
}

/// Maps a board position to the terminal cell of its left column.
///
/// Board y grows upwards, terminal rows grow downwards.
#[must_use]
pub fn cell_to_terminal(inner: Rect, board: BoardConfig, position: Position) -> Option<(u16, u16)> {
    if !board.contains(position) {
        return None;
    }

    let cell = i32::from(board.cell_size());
    let column = u16::try_from(position.x / cell).ok()?;
    let row_from_bottom = u16::try_from(position.y / cell).ok()?;
    let row = board.rows().checked_sub(row_from_bottom + 1)?;

    let x = inner.x.saturating_add(column.saturating_mul(CELL_COLUMNS));
    let y = inner.y.saturating_add(row);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, board: BoardConfig) {
    let needed_width = u32::from(board.columns()) * u32::from(CELL_COLUMNS) + 2;
    let needed_height = u32::from(board.rows()) + 4;
    let message = format!(
        "Terminal too small: need {needed_width}x{needed_height}, have {}x{}",
        area.width,
        area.height.saturating_add(2)
    );

    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::new().fg(THEME.hud_hint)),
        area,
    );
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, board: BoardConfig) {
    let style = Style::new().fg(THEME.grid);
    let cell = i32::from(board.cell_size());
    let buffer = frame.buffer_mut();

    for row in 0..i32::from(board.rows()) {
        for column in 0..i32::from(board.columns()) {
            let position = Position {
                x: column * cell,
                y: row * cell,
            };
            if let Some((x, y)) = cell_to_terminal(inner, board, position) {
                buffer.set_string(x, y, GLYPH_GRID, style);
            }
        }
    }
}

fn render_body(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let board = state.board();
    let head = state.snake.head();
    let buffer = frame.buffer_mut();

    for (index, segment) in state.snake.body().enumerate() {
        // A freshly grown segment shares the head cell until the next step.
        if *segment == head {
            continue;
        }

        let Some((x, y)) = cell_to_terminal(inner, board, *segment) else {
            continue;
        };

        let color = if index == 0 {
            THEME.snake_tail
        } else {
            THEME.snake_body
        };
        buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(color));
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let Some(food) = state.food else {
        return;
    };
    let Some((x, y)) = cell_to_terminal(inner, state.board(), food.position) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_CELL, Style::new().fg(THEME.food));
}

fn render_head(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let Some((x, y)) = cell_to_terminal(inner, state.board(), state.snake.head()) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_CELL,
        Style::new()
            .fg(THEME.snake_head)
            .add_modifier(Modifier::BOLD),
    );
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::config::{BoardConfig, GameConfig, THEME};
    use crate::food::Food;
    use crate::game::{GameState, GameStatus};
    use crate::snake::Position;

    use super::{RenderOptions, board_viewport, cell_to_terminal, render};

    #[test]
    fn viewport_is_centred_and_includes_border() {
        let board = BoardConfig::default();
        let area = Rect::new(0, 0, 62, 27);

        let viewport = board_viewport(area, board).expect("board should fit");

        assert_eq!(viewport, Rect::new(10, 5, 42, 17));
    }

    #[test]
    fn viewport_is_none_when_terminal_is_too_small() {
        let board = BoardConfig::default();

        assert!(board_viewport(Rect::new(0, 0, 41, 30), board).is_none());
        assert!(board_viewport(Rect::new(0, 0, 80, 16), board).is_none());
    }

    #[test]
    fn origin_maps_to_bottom_left_cell() {
        let board = BoardConfig::default();
        let inner = Rect::new(1, 1, 40, 15);

        assert_eq!(
            cell_to_terminal(inner, board, Position::ORIGIN),
            Some((1, 15))
        );
        assert_eq!(
            cell_to_terminal(inner, board, Position { x: 608, y: 448 }),
            Some((39, 1))
        );
        assert_eq!(
            cell_to_terminal(inner, board, Position { x: 640, y: 0 }),
            None
        );
    }

    #[test]
    fn head_and_food_are_drawn_in_their_cells() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 3);
        state.food = Some(Food::new(Position { x: 64, y: 0 }));
        let mut terminal = Terminal::new(TestBackend::new(42, 19)).unwrap();

        terminal
            .draw(|frame| render(frame, &state, RenderOptions::default()))
            .unwrap();

        // Score row on top, so the board border starts on row 1.
        let inner = Rect::new(1, 2, 40, 15);
        let board = state.board();
        let buffer = terminal.backend().buffer();

        let (hx, hy) = cell_to_terminal(inner, board, Position::ORIGIN).unwrap();
        let head = buffer.cell((hx, hy)).unwrap();
        assert_eq!(head.symbol(), "█");
        assert_eq!(head.fg, THEME.snake_head);

        let (fx, fy) = cell_to_terminal(inner, board, Position { x: 64, y: 0 }).unwrap();
        assert_eq!(buffer.cell((fx, fy)).unwrap().fg, THEME.food);
    }

    #[test]
    fn small_terminal_renders_without_panicking() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 3);
        state.status = GameStatus::GameOver;
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();

        terminal
            .draw(|frame| {
                render(
                    frame,
                    &state,
                    RenderOptions { show_grid: true },
                )
            })
            .unwrap();
    }
}
