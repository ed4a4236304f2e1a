use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::THEME;
use crate::game::{GameState, GameStatus};

const HINT_PLAYING: &str = "arrows/WASD move";
const HINT_GAME_OVER: &str = "[Space] restart";
const HINT_QUIT: &str = "[Q] quit";

/// Renders the score row above and the key-hint row below the play area, and
/// returns the remaining play area between them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState) -> Rect {
    let [score_area, play_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    // The score is only shown while playing; the game-over popup repeats it.
    if state.status == GameStatus::Playing {
        frame.render_widget(
            Paragraph::new(score_line(
                state.score,
                state.snake.body_len(),
                usize::from(score_area.width),
            )),
            score_area,
        );
    }

    let hint = match state.status {
        GameStatus::Playing => HINT_PLAYING,
        GameStatus::GameOver => HINT_GAME_OVER,
    };
    frame.render_widget(
        Paragraph::new(Line::from(spread(hint, HINT_QUIT, usize::from(hint_area.width))))
            .style(Style::default().fg(THEME.hud_hint)),
        hint_area,
    );

    play_area
}

fn score_line(score: u32, length: usize, width: usize) -> Line<'static> {
    let left = format!("SCORE {score}");
    let right = format!("LENGTH {length}");
    let gap = width
        .saturating_sub(left.width())
        .saturating_sub(right.width())
        .max(1);

    Line::from(vec![
        Span::styled(
            left,
            Style::default()
                .fg(THEME.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(THEME.hud_hint)),
    ])
}

/// Joins `left` and `right` with enough spaces to fill `width` display
/// columns, keeping at least one space between them.
#[must_use]
pub fn spread(left: &str, right: &str, width: usize) -> String {
    let gap = width
        .saturating_sub(left.width())
        .saturating_sub(right.width())
        .max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}
