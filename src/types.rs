// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Escape sequence that resets all terminal attributes.
pub const RESET: &str = "\x1b[0m";

/// Symbolic color assigned to a command's label.
///
/// The set is fixed; any name outside it resolves to [`Color::White`] rather
/// than failing, so a typo in the config only costs the color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    Orange,
    Pink,
    Lime,
    #[default]
    White,
}

impl Color {
    /// Every color, in the order they are documented.
    pub const ALL: [Color; 11] = [
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::Orange,
        Color::Pink,
        Color::Lime,
        Color::White,
    ];

    /// Resolve a color name, falling back to `white` for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.parse() {
            Ok(color) => color,
            Err(unknown) => {
                tracing::debug!(color = %unknown, "unrecognised color name; using white");
                Color::White
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::Gray => "gray",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::Lime => "lime",
            Color::White => "white",
        }
    }

    /// ANSI escape sequence that switches the terminal to this color.
    pub fn escape(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::Gray => "\x1b[90m",
            Color::Orange => "\x1b[38;5;214m",
            Color::Pink => "\x1b[38;5;207m",
            Color::Lime => "\x1b[38;5;10m",
            Color::White => "\x1b[37m",
        }
    }

    /// Wrap `text` in this color, followed by a reset.
    pub fn paint(self, text: &str) -> String {
        format!("{}{}{}", self.escape(), text, RESET)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Color::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or(wanted)
    }
}

impl From<String> for Color {
    fn from(name: String) -> Self {
        Color::from_name(&name)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.name().to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve_case_insensitively() {
        assert_eq!(Color::from_name("red"), Color::Red);
        assert_eq!(Color::from_name(" Cyan "), Color::Cyan);
        assert_eq!(Color::from_name("ORANGE"), Color::Orange);
    }

    #[test]
    fn unknown_name_falls_back_to_white() {
        assert_eq!(Color::from_name("chartreuse"), Color::White);
        assert_eq!(Color::from_name(""), Color::White);
        assert!("chartreuse".parse::<Color>().is_err());
    }

    #[test]
    fn paint_wraps_text_and_resets() {
        assert_eq!(Color::Green.paint("[A]"), "\x1b[32m[A]\x1b[0m");
        assert_eq!(Color::Orange.paint("x"), "\x1b[38;5;214mx\x1b[0m");
    }

    #[test]
    fn every_name_round_trips() {
        for color in Color::ALL {
            assert_eq!(color.name().parse::<Color>(), Ok(color));
        }
    }
}
