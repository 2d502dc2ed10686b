use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::ui::theme::Theme;

/// Dropdown list anchored below the navigation bar, in the manner of the
/// web client's Browse/Account menus.
pub fn render_dropdown(
    frame: &mut Frame<'_>,
    area: Rect,
    x: u16,
    title: &str,
    items: &[String],
    selected: usize,
) {
    if items.is_empty() {
        return;
    }
    let theme = Theme::default();

    let widest = items
        .iter()
        .map(|item| item.chars().count())
        .max()
        .unwrap_or(0);
    let width = ((widest + 4).max(title.chars().count() + 4) as u16).min(area.width);
    let height = (items.len() as u16 + 2).min(area.height.saturating_sub(1));
    let x = x.min(area.width.saturating_sub(width));
    let rect = Rect {
        x: area.x + x,
        y: area.y + 1,
        width,
        height,
    };

    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let lines: Vec<Line<'_>> = items
        .iter()
        .enumerate()
        .take(inner.height as usize)
        .map(|(idx, item)| {
            let style = if idx == selected {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::styled(item.clone(), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
