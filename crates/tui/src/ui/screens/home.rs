use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{app::AppState, ui::theme::Theme};

/// Home content behind the render gate: account overview once the
/// environment is loaded, a status line otherwise.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let Some(env) = state.bootstrap.environment() else {
        let message = match state.bootstrap.failure() {
            Some(kind) => Span::styled(kind.label(), Style::default().fg(theme.error)),
            None => Span::styled(
                "loading environment…",
                Style::default().fg(theme.text_muted),
            ),
        };
        frame.render_widget(
            Paragraph::new(message).alignment(Alignment::Center),
            vertically_centered(area),
        );
        return;
    };

    let block = Block::default()
        .title(" accounts ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if env.account_list.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "no accounts in this environment",
                Style::default().fg(theme.text_muted),
            )),
            inner,
        );
        return;
    }

    let lines: Vec<Line<'_>> = env
        .account_list
        .values()
        .take(inner.height as usize)
        .map(|account| {
            let mut spans = vec![Span::styled(
                account.display_name.clone(),
                Style::default().fg(theme.text),
            )];
            if let Some(pic) = &account.pic {
                spans.push(Span::styled(
                    format!("  {pic}"),
                    Style::default().fg(theme.text_muted),
                ));
            }
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn vertically_centered(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1.min(area.height),
    }
}
