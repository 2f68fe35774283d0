use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::PALETTE;
use crate::game::DeathReason;

/// Draws the start hint as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        title_line("SNAKE"),
        Line::from(""),
        Line::from("[S]/[Enter] Start"),
        Line::from("[Space]/[P] Pause"),
        Line::from("[Q]/[Esc] Quit"),
        Line::from(""),
        muted_line("Arrows or h/j/k/l to steer"),
    ];

    render_popup(frame, area, " start ", lines);
}

/// Draws the pause notice as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        title_line("PAUSED"),
        Line::from(""),
        Line::from("[Space]/[P] Resume"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    render_popup(frame, area, " pause ", lines);
}

/// Draws the game-over notice with a countdown to the automatic restart.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
    reset_in: Option<Duration>,
) {
    let lines = vec![
        title_line("Game Over"),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(match death_reason {
            Some(DeathReason::WallCollision) => "Cause: hit wall",
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            None => "",
        }),
        Line::from(""),
        muted_line(restart_label(reset_in)),
    ];

    render_popup(frame, area, " game over ", lines);
}

fn restart_label(reset_in: Option<Duration>) -> String {
    match reset_in {
        Some(remaining) => format!("Restarting in {}s", remaining.as_secs_f32().ceil() as u64),
        None => String::from("Restarting..."),
    }
}

fn title_line(text: &'static str) -> Line<'static> {
    Line::styled(
        text,
        Style::default()
            .fg(PALETTE.menu_title)
            .add_modifier(Modifier::BOLD),
    )
}

fn muted_line(text: impl Into<String>) -> Line<'static> {
    Line::styled(text.into(), Style::default().fg(PALETTE.hud_muted))
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &'static str, lines: Vec<Line<'static>>) {
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0);
    let width = u16::try_from(content_width + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);

    let popup = centered_rect(area, width, height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

/// Centers a `width` x `height` rectangle in `area`, shrinking it to fit.
#[must_use]
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::layout::Rect;

    use super::{centered_rect, restart_label};

    #[test]
    fn centered_rect_is_centered_and_clamped() {
        let area = Rect::new(2, 1, 20, 10);

        assert_eq!(centered_rect(area, 10, 4), Rect::new(7, 4, 10, 4));
        assert_eq!(centered_rect(area, 50, 50), area);
    }

    #[test]
    fn countdown_rounds_up_to_whole_seconds() {
        assert_eq!(
            restart_label(Some(Duration::from_millis(4_200))),
            "Restarting in 5s"
        );
        assert_eq!(restart_label(Some(Duration::ZERO)), "Restarting in 0s");
        assert_eq!(restart_label(None), "Restarting...");
    }
}
