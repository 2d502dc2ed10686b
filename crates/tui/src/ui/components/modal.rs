use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{app::ModalState, ui::theme::Theme};

/// Blocking error dialog. While it is visible the app routes every key
/// here; the owning flow resumes only once a choice is confirmed.
pub fn render(frame: &mut Frame<'_>, area: Rect, modal: Option<&ModalState>) {
    let Some(modal) = modal else {
        return;
    };
    let theme = Theme::default();

    let width = area.width.clamp(20, 56);
    let height = 8u16.min(area.height);
    let rect = centered(width, height, area);

    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(" error ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(inner);

    frame.render_widget(
        Paragraph::new(modal.prompt.message.as_str())
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: true }),
        rows[0],
    );

    let mut spans: Vec<Span<'_>> = Vec::new();
    for (idx, choice) in modal.prompt.choices.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("   "));
        }
        let style = if idx == modal.selected {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_muted)
        };
        spans.push(Span::styled(format!("[ {} ]", choice.label()), style));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        rows[1],
    );
}

fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
