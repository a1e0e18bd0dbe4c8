//! Console color styles
//!
//! Colors are given as strings: either an xterm 256-palette index (`"214"`)
//! or a color name understood by `colored` (`"white"`, `"bright red"`).
//! Anything else renders uncolored instead of failing.

use colored::{Color, ColoredString, Colorize};
use serde::Deserialize;
use std::collections::HashMap;

/// Fields of the rendered line that carry their own style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    LevelName,
    Asctime,
    Msecs,
    Name,
    ShortenedPath,
    Function,
    Line,
    Process,
    Thread,
    Message,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub color: Option<String>,
    pub bold: bool,
    pub background: Option<String>,
}

impl TextStyle {
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn on(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn apply(&self, text: &str) -> ColoredString {
        let mut styled = text.normal();
        if let Some(fg) = self.color.as_deref().and_then(parse_color) {
            styled = styled.color(fg);
        }
        if let Some(bg) = self.background.as_deref().and_then(parse_color) {
            styled = styled.on_color(bg);
        }
        if self.bold {
            styled = styled.bold();
        }
        styled
    }
}

/// Resolve a color string, `None` if it is neither a palette index nor a known name.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    match value.parse::<u8>() {
        Ok(index) => Some(palette_color(index)),
        Err(_) if value.chars().all(|c| c.is_ascii_digit()) => None,
        Err(_) => value.parse::<Color>().ok(),
    }
}

/// Map an xterm 256-color palette index onto a `colored` color.
fn palette_color(index: u8) -> Color {
    const BASIC: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::BrightBlack,
        Color::BrightRed,
        Color::BrightGreen,
        Color::BrightYellow,
        Color::BrightBlue,
        Color::BrightMagenta,
        Color::BrightCyan,
        Color::BrightWhite,
    ];

    match index {
        0..=15 => BASIC[index as usize],
        16..=231 => {
            let cube = index - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            Color::TrueColor {
                r: level(cube / 36),
                g: level((cube / 6) % 6),
                b: level(cube % 6),
            }
        }
        232..=255 => {
            let gray = 8 + (index - 232) * 10;
            Color::TrueColor {
                r: gray,
                g: gray,
                b: gray,
            }
        }
    }
}

/// Per-field and per-level styles used by the colored formatter.
///
/// Level styles are keyed by lowercase level name and color the message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    pub fields: HashMap<Field, TextStyle>,
    pub levels: HashMap<String, TextStyle>,
}

impl StyleTable {
    pub fn field(&self, field: Field) -> Option<&TextStyle> {
        self.fields.get(&field)
    }

    pub fn level(&self, level_name: &str) -> Option<&TextStyle> {
        self.levels.get(&level_name.to_ascii_lowercase())
    }

    /// Overlay `other` on top of this table, entry by entry.
    #[must_use]
    pub fn merged(mut self, other: StyleTable) -> Self {
        self.fields.extend(other.fields);
        self.levels.extend(
            other
                .levels
                .into_iter()
                .map(|(name, style)| (name.to_ascii_lowercase(), style)),
        );
        self
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        let fields = HashMap::from([
            (Field::Line, TextStyle::color("127")),
            (Field::Name, TextStyle::color("103")),
            (Field::LevelName, TextStyle::color("214").bold()),
            (Field::Function, TextStyle::color("103")),
            (Field::Asctime, TextStyle::color("103").bold()),
            (Field::Message, TextStyle::color("white")),
            (Field::Msecs, TextStyle::color("103").bold()),
            (Field::Process, TextStyle::color("103")),
            (Field::ShortenedPath, TextStyle::color("103")),
        ]);

        let levels = HashMap::from([
            ("debug".to_string(), TextStyle::color("27").bold()),
            ("user".to_string(), TextStyle::color("200").bold()),
            ("info".to_string(), TextStyle::color("34")),
            ("alert".to_string(), TextStyle::color("166").bold()),
            ("warning".to_string(), TextStyle::color("226").bold()),
            ("error".to_string(), TextStyle::color("196")),
            ("critical".to_string(), TextStyle::color("white").bold().on("red")),
            ("exception".to_string(), TextStyle::color("196").bold()),
        ]);

        Self { fields, levels }
    }
}
