use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Deepest indent level a paragraph can reach.
pub const MAX_INDENT: u8 = 8;

/// Default size factor for subscript and superscript text.
pub const DEFAULT_RELATIVE_SIZE: f32 = 0.5;

/// 24-bit colour parsed from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, ignoring surrounding whitespace.
    pub fn parse_hex(input: &str) -> Result<Self, Error> {
        let trimmed = input.trim();
        if trimmed.len() != 7 || !trimmed.starts_with('#') {
            return Err(Error::malformed_color(trimmed));
        }
        let digits = &trimmed[1..];
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::malformed_color(trimmed));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| Error::malformed_color(trimmed))?;
        Ok(Self::rgb(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Perceived brightness on a 0-255 scale.
    pub fn luma(self) -> f32 {
        f32::from(self.r) * 0.299
            + f32::from(self.g) * 0.587
            + f32::from(self.b) * 0.114
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A formatting attribute carried by a styled range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    Bold,
    Italic,
    /// User underline. Kept apart from any spell-check decoration.
    Underline,
    Strikethrough,
    Subscript,
    Superscript,
    /// Size factor applied alongside sub/superscript.
    RelativeSize(f32),
    ForegroundColor(Color),
    BackgroundColor(Color),
    /// Paragraph indent level, `1..=MAX_INDENT`.
    Indent(u8),
}

impl Style {
    /// True when both styles are the same variant, ignoring payloads.
    pub fn same_kind(&self, other: &Style) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Style::Bold => "bold",
            Style::Italic => "italic",
            Style::Underline => "underline",
            Style::Strikethrough => "strikethrough",
            Style::Subscript => "subscript",
            Style::Superscript => "superscript",
            Style::RelativeSize(_) => "relative-size",
            Style::ForegroundColor(_) => "text-color",
            Style::BackgroundColor(_) => "background-color",
            Style::Indent(_) => "indent",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::RelativeSize(size) => write!(f, "{} {size}", self.name()),
            Style::ForegroundColor(c) | Style::BackgroundColor(c) => {
                write!(f, "{} {c}", self.name())
            }
            Style::Indent(level) => write!(f, "{} {level}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse_hex("#FF69B4").unwrap(), Color::rgb(255, 105, 180));
        assert_eq!(Color::parse_hex("  #00fff9 ").unwrap(), Color::rgb(0, 255, 249));
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
    }

    #[test]
    fn test_parse_hex_rejects_malformed() {
        for bad in ["FFFFFF", "#FFF", "#FFFFFFF", "#GGGGGG", "", "#+1234A"] {
            let err = Color::parse_hex(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedColor, "{bad}");
        }
    }

    #[test]
    fn test_to_hex_uppercase() {
        assert_eq!(Color::rgb(165, 42, 42).to_hex(), "#A52A2A");
    }

    #[test]
    fn test_same_kind_ignores_payload() {
        let red = Style::ForegroundColor(Color::rgb(255, 0, 0));
        let blue = Style::ForegroundColor(Color::rgb(0, 0, 255));
        assert!(red.same_kind(&blue));
        assert!(!red.same_kind(&Style::BackgroundColor(Color::BLACK)));
        assert!(Style::Indent(1).same_kind(&Style::Indent(3)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Style::Bold.to_string(), "bold");
        assert_eq!(Style::Indent(2).to_string(), "indent 2");
        assert_eq!(
            Style::BackgroundColor(Color::WHITE).to_string(),
            "background-color #FFFFFF"
        );
    }
}
