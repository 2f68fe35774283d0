use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::PALETTE;
use crate::game::{Phase, Snapshot};

const HUD_INNER_MARGIN_X: u16 = 1;

/// Renders the one-line HUD and returns the remaining area below it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>) -> Rect {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    let hud_area = inset_horizontal(hud_area, HUD_INNER_MARGIN_X);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(hud_area);

    frame.render_widget(
        Paragraph::new(score_line(snapshot.score)).alignment(Alignment::Left),
        left,
    );
    frame.render_widget(
        Paragraph::new(status_line(snapshot)).alignment(Alignment::Right),
        right,
    );

    play_area
}

fn score_line(score: u32) -> Line<'static> {
    Line::from(vec![
        Span::styled("Score: ", Style::default().fg(PALETTE.hud_muted)),
        Span::styled(
            score.to_string(),
            Style::default()
                .fg(PALETTE.hud_text)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn status_line(snapshot: &Snapshot<'_>) -> Line<'static> {
    let muted = Style::default().fg(PALETTE.hud_muted);
    let value = Style::default().fg(PALETTE.hud_text);

    Line::from(vec![
        Span::styled("Length ", muted),
        Span::styled(snapshot.snake.len().to_string(), value),
        Span::styled(" | ", muted),
        Span::styled(format!("{}ms", snapshot.tick_interval_ms), value),
        Span::styled(" | ", muted),
        Span::styled(phase_label(snapshot.phase), value),
    ])
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::NotStarted => "ready",
        Phase::Running => "running",
        Phase::Paused => "paused",
        Phase::Over => "over",
    }
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{inset_horizontal, score_line};

    #[test]
    fn score_line_reads_like_a_label() {
        let line = score_line(40);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();

        assert_eq!(text, "Score: 40");
    }

    #[test]
    fn inset_never_underflows() {
        let inset = inset_horizontal(Rect::new(0, 0, 1, 1), 3);

        assert_eq!(inset.width, 0);
        assert_eq!(inset.x, 3);
    }
}
