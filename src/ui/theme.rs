use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Green;
    pub const HIGHLIGHT: Color = Color::Cyan;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Money colors
    pub const REVENUE: Color = Color::Green;
    pub const COST: Color = Color::Yellow;
    pub const LOSS: Color = Color::Red;

    // Weather colors
    pub const RAIN_DRY: Color = Color::Yellow;
    pub const RAIN_OK: Color = Color::Green;
    pub const RAIN_WET: Color = Color::LightBlue;

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    /// Green for gains, red for losses.
    pub fn money(amount_kes: i64) -> Style {
        if amount_kes >= 0 {
            Style::default().fg(Self::REVENUE)
        } else {
            Style::default().fg(Self::LOSS)
        }
    }

    pub fn change_color(percent: f64) -> Color {
        if percent >= 0.0 {
            Self::SUCCESS
        } else {
            Self::ERROR
        }
    }

    pub fn rain_color(mm: f64) -> Color {
        if mm < 10.0 {
            Self::RAIN_DRY
        } else if mm < 100.0 {
            Self::RAIN_OK
        } else {
            Self::RAIN_WET
        }
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}
