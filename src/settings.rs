use tracing::warn;

use crate::error::Error;
use crate::palette::Palette;
use crate::style::DEFAULT_RELATIVE_SIZE;

pub const DEFAULT_TAB_WIDTH: usize = 4;
const MAX_TAB_WIDTH: usize = 16;

/// Editor settings, normally read once from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Spaces inserted by the tab button and per indent level.
    pub tab_width: usize,
    /// Size factor for subscript and superscript, in `(0, 1]`.
    pub relative_size: f32,
    pub palette: Palette,
    pub use_color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            relative_size: DEFAULT_RELATIVE_SIZE,
            palette: Palette::default(),
            use_color: true,
        }
    }
}

impl Settings {
    /// Read `JOURNAL_*` and `NO_COLOR`. Bad values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = lookup("JOURNAL_TAB_WIDTH") {
            match parse_tab_width(&raw) {
                Ok(width) => settings.tab_width = width,
                Err(err) => warn!("{err}; using {DEFAULT_TAB_WIDTH}"),
            }
        }
        if let Some(raw) = lookup("JOURNAL_RELATIVE_SIZE") {
            match parse_relative_size(&raw) {
                Ok(size) => settings.relative_size = size,
                Err(err) => warn!("{err}; using {DEFAULT_RELATIVE_SIZE}"),
            }
        }
        if let Some(list) = lookup("JOURNAL_COLORS") {
            for rejected in settings.palette.extend_from_list(&list) {
                warn!(entry = %rejected, "skipping malformed JOURNAL_COLORS entry");
            }
        }
        settings.use_color = lookup("NO_COLOR").is_none();
        settings
    }
}

pub fn parse_tab_width(raw: &str) -> Result<usize, Error> {
    match raw.trim().parse::<usize>() {
        Ok(width) if (1..=MAX_TAB_WIDTH).contains(&width) => Ok(width),
        _ => Err(Error::invalid_setting("JOURNAL_TAB_WIDTH", raw)),
    }
}

pub fn parse_relative_size(raw: &str) -> Result<f32, Error> {
    match raw.trim().parse::<f32>() {
        Ok(size) if size > 0.0 && size <= 1.0 => Ok(size),
        _ => Err(Error::invalid_setting("JOURNAL_RELATIVE_SIZE", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Settings {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]);
        assert_eq!(settings.tab_width, 4);
        assert_eq!(settings.relative_size, 0.5);
        assert_eq!(settings.palette.len(), 11);
        assert!(settings.use_color);
    }

    #[test]
    fn test_env_overrides() {
        let settings = settings_from(&[
            ("JOURNAL_TAB_WIDTH", "2"),
            ("JOURNAL_RELATIVE_SIZE", "0.75"),
            ("JOURNAL_COLORS", "Teal=#008080"),
            ("NO_COLOR", "1"),
        ]);
        assert_eq!(settings.tab_width, 2);
        assert_eq!(settings.relative_size, 0.75);
        assert_eq!(settings.palette.entries()[0].title(), "Teal");
        assert!(!settings.use_color);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let settings = settings_from(&[
            ("JOURNAL_TAB_WIDTH", "0"),
            ("JOURNAL_RELATIVE_SIZE", "1.5"),
            ("JOURNAL_COLORS", "Nope=#XYZ"),
        ]);
        assert_eq!(settings.tab_width, DEFAULT_TAB_WIDTH);
        assert_eq!(settings.relative_size, DEFAULT_RELATIVE_SIZE);
        assert_eq!(settings.palette.len(), 11);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_tab_width(" 8 ").unwrap(), 8);
        assert!(parse_tab_width("17").is_err());
        assert!(parse_tab_width("four").is_err());
        assert!(parse_relative_size("0").is_err());
        assert_eq!(parse_relative_size("1").unwrap(), 1.0);
    }
}
