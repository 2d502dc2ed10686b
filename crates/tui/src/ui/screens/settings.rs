use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{app::AppState, ui::theme::Theme};

/// Post-login landing. Reaching this screen means the candidate secret was
/// accepted and now lives in session scope.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let block = Block::default()
        .title(" settings ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let server = state.server.as_deref().unwrap_or("(no server)");
    let lines = vec![
        Line::styled(
            "Configuration access unlocked.",
            Style::default().fg(theme.text),
        ),
        Line::styled(
            format!("Backend: {server}"),
            Style::default().fg(theme.text_muted),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
