//! Color theme and glyphs for the journal TUI.
//!
//! Kanagawa Wave by default; `high_contrast` swaps in the terminal's basic colors.

use ratatui::style::{Color, Modifier, Style};

/// Display preferences resolved from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_popup: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub peach: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
}

impl Palette {
    /// Kanagawa Wave.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: Color::Rgb(22, 22, 29),
            bg_panel: Color::Rgb(31, 31, 40),
            bg_highlight: Color::Rgb(42, 42, 55),
            bg_popup: Color::Rgb(54, 54, 70),
            bg_border: Color::Rgb(84, 84, 109),
            text_primary: Color::Rgb(220, 215, 186),
            text_secondary: Color::Rgb(200, 192, 147),
            text_muted: Color::Rgb(114, 113, 105),
            primary: Color::Rgb(149, 127, 184),
            accent: Color::Rgb(127, 180, 202),
            peach: Color::Rgb(255, 160, 102),
            green: Color::Rgb(152, 187, 108),
            yellow: Color::Rgb(230, 195, 132),
            red: Color::Rgb(255, 93, 98),
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_popup: Color::Black,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,
            primary: Color::White,
            accent: Color::Cyan,
            peach: Color::Yellow,
            green: Color::Green,
            yellow: Color::Yellow,
            red: Color::Red,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for row markers and the photo area.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub selected: &'static str,
    pub more_to_explore: &'static str,
    pub photo: &'static str,
    pub photo_placeholder: &'static str,
    pub photo_missing: &'static str,
    pub delete_mark: &'static str,
    pub bullet: &'static str,
    pub locked: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            selected: ">",
            more_to_explore: "*",
            photo: "[p]",
            photo_placeholder: "[ ]",
            photo_missing: "[!]",
            delete_mark: "X",
            bullet: "-",
            locked: "#",
        }
    } else {
        Glyphs {
            selected: "▸",
            more_to_explore: "✦",
            photo: "▣",
            photo_placeholder: "□",
            photo_missing: "⚠",
            delete_mark: "✗",
            bullet: "•",
            locked: "🔒",
        }
    }
}

/// Styles shared by the list, description and status bar.
pub mod styles {
    use super::{Color, Modifier, Palette, Style};

    fn badge(palette: &Palette, bg: Color) -> Style {
        Style::default()
            .fg(palette.bg_dark)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn mode_browse(palette: &Palette) -> Style {
        badge(palette, palette.text_secondary)
    }

    #[must_use]
    pub fn mode_edit(palette: &Palette) -> Style {
        badge(palette, palette.green)
    }

    #[must_use]
    pub fn mode_delete(palette: &Palette) -> Style {
        badge(palette, palette.red)
    }

    #[must_use]
    pub fn mode_photo(palette: &Palette) -> Style {
        badge(palette, palette.primary)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn more_to_explore(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::ITALIC)
    }

    #[must_use]
    pub fn error(palette: &Palette) -> Style {
        Style::default().fg(palette.red)
    }
}
