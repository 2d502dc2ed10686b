pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{ACCOUNT_MENU, AppState, NavFocus, Screen, browse_menu};

pub use terminal::{AppTerminal as Terminal, TerminalSession};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Navigation bar
            Constraint::Min(0),    // Screen content
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    let anchors = render_nav(frame, layout[0], state, &theme);

    match &state.screen {
        Screen::Home => screens::home::render(frame, layout[1], state),
        Screen::SettingsLogin => screens::settings_login::render(frame, layout[1], state),
        Screen::Settings => screens::settings::render(frame, layout[1], state),
        Screen::Search(query) => {
            screens::placeholder::render(frame, layout[1], &format!("search: {query}"))
        }
        Screen::Browse(category) => {
            screens::placeholder::render(frame, layout[1], &format!("browse: {category}"))
        }
    }

    render_bottom_bar(frame, layout[2], state, &theme);
    render_menus(frame, area, state, anchors);

    // Painted last: the modal blocks everything beneath it.
    components::modal::render(frame, area, state.modal.as_ref());
}

/// Horizontal anchor columns of the Browse and Account entries, used to
/// position their dropdowns.
#[derive(Debug, Clone, Copy)]
struct NavAnchors {
    browse_x: u16,
    account_x: u16,
}

/// Navigation bar, gated on bootstrap: menus and search appear only once
/// the environment is loaded.
fn render_nav(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) -> NavAnchors {
    let mut spans: Vec<Span<'_>> = vec![Span::styled(
        "libDrive",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    let mut column = "libDrive".chars().count();
    let mut anchors = NavAnchors {
        browse_x: 0,
        account_x: 0,
    };

    if state.bootstrap.environment().is_some() {
        let search_focused = state.nav.focus == Some(NavFocus::Search);
        let label = "  Search: ";
        spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        column += label.chars().count();

        let input = if search_focused {
            format!("{}│", state.nav.search)
        } else {
            state.nav.search.clone()
        };
        let input_style = if search_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        };
        column += input.chars().count();
        spans.push(Span::styled(input, input_style));

        for (entry, focus, anchor) in [
            ("Browse", NavFocus::Browse, &mut anchors.browse_x),
            ("Account", NavFocus::Account, &mut anchors.account_x),
        ] {
            spans.push(Span::raw("  "));
            column += 2;
            *anchor = column as u16;
            let style = if state.nav.focus == Some(focus) {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            spans.push(Span::styled(entry, style));
            column += entry.chars().count();
        }

        if let Some(refresh) = state.last_refresh {
            spans.push(Span::styled(
                format!("  {}", refresh.format("%H:%M:%S")),
                Style::default().fg(theme.text_muted),
            ));
        }
    } else if let Some(kind) = state.bootstrap.failure() {
        spans.push(Span::styled(
            format!("  {}", kind.label()),
            Style::default().fg(theme.error),
        ));
    } else if state.bootstrap.is_loading() {
        spans.push(Span::styled(
            "  loading…",
            Style::default().fg(theme.text_muted),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.background)),
        area,
    );
    anchors
}

fn render_menus(frame: &mut Frame<'_>, area: Rect, state: &AppState, anchors: NavAnchors) {
    if state.screen != Screen::Home {
        return;
    }
    let Some(env) = state.bootstrap.environment() else {
        return;
    };

    match state.nav.focus {
        Some(NavFocus::Browse) => {
            let items = browse_menu(env);
            components::menu::render_dropdown(
                frame,
                area,
                anchors.browse_x,
                "browse",
                &items,
                state.nav.browse_selected,
            );
        }
        Some(NavFocus::Account) => {
            let items: Vec<String> = ACCOUNT_MENU.iter().map(|entry| entry.to_string()).collect();
            components::menu::render_dropdown(
                frame,
                area,
                anchors.account_x,
                "account",
                &items,
                state.nav.account_selected,
            );
        }
        _ => {}
    }
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints: &[(&str, &str)] = if state.modal.is_some() {
        &[("↑↓/Tab", "select"), ("Enter", "confirm")]
    } else {
        match state.screen {
            Screen::Home => &[
                ("Tab", "focus"),
                ("↑↓", "select"),
                ("Enter", "open"),
                ("Ctrl+C", "quit"),
            ],
            Screen::SettingsLogin => &[("Enter", "submit"), ("Esc", "back"), ("Ctrl+C", "quit")],
            _ => &[("Esc", "back"), ("Ctrl+C", "quit")],
        }
    };

    let mut parts: Vec<Span<'_>> = Vec::new();
    for (idx, (key, action)) in hints.iter().enumerate() {
        if idx > 0 {
            parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        }
        parts.push(Span::styled(*key, Style::default().fg(theme.accent)));
        parts.push(Span::raw(format!(" {action}")));
    }
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
