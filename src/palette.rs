use std::fmt;

use crate::error::Error;
use crate::style::Color;

/// Colours offered by the text and background colour choosers, in order.
const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("Black", "#000000"),
    ("White", "#FFFFFF"),
    ("Green", "#008000"),
    ("Blue", "#0000FF"),
    ("Purple", "#800080"),
    ("Red", "#FF0000"),
    ("Orange", "#FFA500"),
    ("Yellow", "#FFFF00"),
    ("Hot Pink", "#FF69B4"),
    ("Light Blue", "#00FFF9"),
    ("Brown", "#A52A2A"),
];

/// Swatch text flips from white to black above this luma.
const CONTRAST_THRESHOLD: f32 = 186.0;

/// A titled colour, e.g. `Hot Pink - #FF69B4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedColor {
    title: String,
    color: Color,
}

impl NamedColor {
    /// Build from user input; the hex must be `#RRGGBB`.
    pub fn parse(title: &str, hex: &str) -> Result<Self, Error> {
        let color = Color::parse_hex(hex)?;
        Ok(Self { title: title.trim().to_string(), color })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.color)
    }
}

/// Most-recently-used list of named colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<NamedColor>,
}

impl Default for Palette {
    fn default() -> Self {
        let entries = DEFAULT_COLORS
            .iter()
            .filter_map(|(title, hex)| NamedColor::parse(title, hex).ok())
            .collect();
        Self { entries }
    }
}

impl Palette {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[NamedColor] {
        &self.entries
    }

    /// Case-insensitive lookup by title.
    pub fn find(&self, title: &str) -> Option<&NamedColor> {
        let needle = title.trim();
        self.entries.iter().find(|c| c.title.eq_ignore_ascii_case(needle))
    }

    pub fn position(&self, title: &str) -> Option<usize> {
        let needle = title.trim();
        self.entries.iter().position(|c| c.title.eq_ignore_ascii_case(needle))
    }

    /// Pick the entry at `index` and move it to the front.
    pub fn choose(&mut self, index: usize) -> Option<Color> {
        if index >= self.entries.len() {
            return None;
        }
        let chosen = self.entries.remove(index);
        let color = chosen.color;
        self.entries.insert(0, chosen);
        Some(color)
    }

    /// Pick by title, moving the entry to the front.
    pub fn choose_named(&mut self, title: &str) -> Result<Color, Error> {
        self.position(title)
            .and_then(|idx| self.choose(idx))
            .ok_or_else(|| Error::unknown_color(title))
    }

    /// Validate and add a custom colour at the front. A malformed hex leaves
    /// the palette unchanged.
    pub fn add_custom(&mut self, title: &str, hex: &str) -> Result<Color, Error> {
        let entry = NamedColor::parse(title, hex)?;
        let color = entry.color;
        self.entries.insert(0, entry);
        Ok(color)
    }

    /// Prepend entries parsed from `Title=#RRGGBB,...`. Returns the entries
    /// that could not be parsed.
    pub fn extend_from_list(&mut self, list: &str) -> Vec<String> {
        let mut rejected = Vec::new();
        let mut parsed = Vec::new();
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match item.split_once('=') {
                Some((title, hex)) if !title.trim().is_empty() => {
                    match NamedColor::parse(title, hex) {
                        Ok(entry) => parsed.push(entry),
                        Err(_) => rejected.push(item.to_string()),
                    }
                }
                _ => rejected.push(item.to_string()),
            }
        }
        parsed.append(&mut self.entries);
        self.entries = parsed;
        rejected
    }
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: Color) -> Color {
    if background.luma() > CONTRAST_THRESHOLD {
        Color::BLACK
    } else {
        Color::WHITE
    }
}
