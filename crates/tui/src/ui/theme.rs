use ratatui::style::Color;

/// Dark palette matching the web client's appbar styling.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub accent: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(31, 31, 31),
            text: Color::Rgb(255, 255, 255),
            text_muted: Color::Rgb(150, 150, 150),
            border: Color::Rgb(70, 70, 70),
            accent: Color::Rgb(100, 180, 255),
            error: Color::Rgb(220, 90, 90),
        }
    }
}
