use std::fmt;

use crate::toolbar::Button;

/// Error type for editor, palette and settings operations.
///
/// Carries an [`ErrorKind`] plus the offending range or input so callers can
/// report something more useful than the kind alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    start: usize,
    end: usize,
    len: usize,
    detail: Option<String>,
}

/// The category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The range had `start > end`.
    InvalidRange,
    /// The range reached past the end of the text.
    InvalidBounds,
    /// An endpoint fell inside a multi-byte character.
    NotOnCharBoundary,
    /// A colour was not in `#RRGGBB` form.
    MalformedColor,
    /// A colour name was not in the palette.
    UnknownColor,
    /// A toolbar button was clicked that was never attached.
    ButtonNotAttached,
    /// A settings value could not be used.
    InvalidSetting,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Start of the range provided by the caller (0 for non-range errors).
    pub fn start(&self) -> usize {
        self.start
    }

    /// End of the range provided by the caller (0 for non-range errors).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Text length in bytes at the time of the error.
    pub fn text_len(&self) -> usize {
        self.len
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::ranged(ErrorKind::InvalidRange, start, end, len)
    }

    pub(crate) fn invalid_bounds(start: usize, end: usize, len: usize) -> Self {
        Self::ranged(ErrorKind::InvalidBounds, start, end, len)
    }

    pub(crate) fn not_on_char_boundary(
        start: usize,
        end: usize,
        len: usize,
        index: usize,
    ) -> Self {
        Self {
            detail: Some(index.to_string()),
            ..Self::ranged(ErrorKind::NotOnCharBoundary, start, end, len)
        }
    }

    pub(crate) fn malformed_color(input: &str) -> Self {
        Self::with_detail(ErrorKind::MalformedColor, input)
    }

    pub(crate) fn unknown_color(name: &str) -> Self {
        Self::with_detail(ErrorKind::UnknownColor, name)
    }

    pub(crate) fn button_not_attached(button: Button) -> Self {
        Self::with_detail(ErrorKind::ButtonNotAttached, button.label())
    }

    pub(crate) fn invalid_setting(name: &str, value: &str) -> Self {
        Self::with_detail(ErrorKind::InvalidSetting, &format!("{name}={value}"))
    }

    fn ranged(kind: ErrorKind, start: usize, end: usize, len: usize) -> Self {
        Self { kind, start, end, len, detail: None }
    }

    fn with_detail(kind: ErrorKind, detail: &str) -> Self {
        Self { kind, start: 0, end: 0, len: 0, detail: Some(detail.to_string()) }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.detail.as_deref().unwrap_or_default();
        match self.kind {
            ErrorKind::InvalidRange => write!(
                f,
                "invalid range {}..{}: start > end",
                self.start, self.end
            ),
            ErrorKind::InvalidBounds => write!(
                f,
                "range {}..{} out of bounds for len {}",
                self.start, self.end, self.len
            ),
            ErrorKind::NotOnCharBoundary => write!(
                f,
                "range {}..{}: index {} not on a character boundary",
                self.start, self.end, detail
            ),
            ErrorKind::MalformedColor => write!(
                f,
                "incorrect colour format `{detail}`; expected #RRGGBB"
            ),
            ErrorKind::UnknownColor => {
                write!(f, "no colour named `{detail}` in the palette")
            }
            ErrorKind::ButtonNotAttached => {
                write!(f, "the {detail} button is not attached to the editor")
            }
            ErrorKind::InvalidSetting => write!(f, "invalid setting {detail}"),
        }
    }
}

impl std::error::Error for Error {}
