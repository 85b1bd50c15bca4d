use colored::{Color, Colorize};

/// How tiles and chrome are styled in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Coloured tiles, one colour per tile value.
    Default,
    /// No escape codes at all; the board looks exactly like its `Display`.
    Plain,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Theme::Default),
            "plain" => Some(Theme::Plain),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Plain => "plain",
        }
    }

    /// A 4-character, right-aligned cell; blank for an empty tile.
    pub fn paint_tile(self, value: u32) -> String {
        let text = if value == 0 {
            "    ".to_string()
        } else {
            format!("{value:>4}")
        };

        match self {
            Theme::Plain => text,
            Theme::Default if value == 0 => text,
            Theme::Default => {
                let (foreground, background) = tile_colors(value);
                text.color(foreground).on_color(background).bold().to_string()
            }
        }
    }

    pub fn apply_style(self, text: &str, style_name: &str) -> String {
        if self == Theme::Plain {
            return text.to_string();
        }
        match style_name {
            "title" => text.cyan().bold().to_string(),
            "score" => text.yellow().bold().to_string(),
            "help" => text.dimmed().to_string(),
            "game_over" => text.red().bold().to_string(),
            _ => text.to_string(),
        }
    }
}

fn tile_colors(value: u32) -> (Color, Color) {
    match value {
        2 => (Color::Black, Color::White),
        4 => (Color::Black, Color::BrightWhite),
        8 => (Color::BrightWhite, Color::Yellow),
        16 => (Color::BrightWhite, Color::BrightYellow),
        32 => (Color::BrightWhite, Color::Red),
        64 => (Color::BrightWhite, Color::BrightRed),
        128 => (Color::Black, Color::Green),
        256 => (Color::Black, Color::BrightGreen),
        512 => (Color::BrightWhite, Color::Blue),
        1024 => (Color::BrightWhite, Color::BrightBlue),
        2048 => (Color::BrightWhite, Color::Magenta),
        _ => (Color::BrightWhite, Color::BrightMagenta),
    }
}
