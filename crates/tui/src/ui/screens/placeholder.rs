use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::Theme;

/// Destination screens whose content comes from backend views not part of
/// this client (search results, category browsing).
pub fn render(frame: &mut Frame<'_>, area: Rect, title: &str) {
    let theme = Theme::default();

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "nothing to show here yet",
            Style::default().fg(theme.text_muted),
        ))
        .alignment(Alignment::Center),
        inner,
    );
}
