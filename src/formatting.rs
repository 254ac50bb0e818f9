use yansi::Paint;

use crate::editor::RichEditor;
use crate::palette::{NamedColor, contrast_text};
use crate::shared::table::{render_table, truncate_with_ellipsis};
use crate::style::Color;
use crate::toolbar::Button;

const SPAN_PREVIEW_WIDTH: usize = 40;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub muted: (u8, u8, u8),     // Offsets, unchecked buttons
    pub secondary: (u8, u8, u8), // Headers, emphasis
    pub active: (u8, u8, u8),    // Checked buttons
    pub error: (u8, u8, u8),     // Rejected commands
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        muted: (108, 112, 134),     // Gray
        secondary: (148, 226, 213), // Teal
        active: (166, 227, 161),    // Green
        error: (243, 139, 168),     // Pink
    };
}

/// Formatting context passed through the session output
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    pub fn format_header(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.secondary;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_muted(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.muted;
            Paint::rgb(text, r, g, b).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_error(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.error;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// One toolbar cell: `[BOLD]` when checked, `bold` when not, `bold:-`
    /// when the button was never attached.
    pub fn format_button(&self, button: Button, editor: &RichEditor) -> String {
        let label = button.label();
        if !editor.toolbar().is_attached(button) {
            return format!("{label}:-");
        }
        if editor.is_checked(button) {
            let cell = format!("[{}]", label.to_uppercase());
            if self.use_color {
                let (r, g, b) = self.palette.active;
                Paint::rgb(&cell, r, g, b).bold().to_string()
            } else {
                cell
            }
        } else {
            self.format_muted(label)
        }
    }

    /// The toggle row plus the active colour pens.
    pub fn format_toolbar(&self, editor: &RichEditor) -> String {
        let mut cells: Vec<String> = Button::TOGGLES
            .into_iter()
            .map(|b| self.format_button(b, editor))
            .collect();
        let toolbar = editor.toolbar();
        cells.push(self.format_pen("color", toolbar.text_color));
        cells.push(self.format_pen("bg", toolbar.background_color));
        cells.join(" ")
    }

    fn format_pen(&self, label: &str, pen: Option<Color>) -> String {
        match pen {
            Some(color) => format!("{label}:{}", self.format_swatch(&color.to_hex(), color)),
            None => format!("{label}:{}", self.format_muted("none")),
        }
    }

    /// `text` drawn on `color` with readable contrast.
    pub fn format_swatch(&self, text: &str, color: Color) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b) = color.as_tuple();
        let (fr, fg, fb) = contrast_text(color).as_tuple();
        Paint::rgb(text, fr, fg, fb).on_rgb(r, g, b).to_string()
    }

    /// Table of every styled range, offsets in characters.
    pub fn format_spans(&self, editor: &RichEditor) -> String {
        if editor.spans().is_empty() {
            return self.format_muted("no styled ranges");
        }
        let text = editor.text();
        let headers = vec![
            self.format_header("from"),
            self.format_header("to"),
            self.format_header("style"),
            self.format_header("text"),
        ];
        let rows: Vec<Vec<String>> = editor
            .spans()
            .iter()
            .map(|range| {
                vec![
                    text[..range.start].chars().count().to_string(),
                    text[..range.end].chars().count().to_string(),
                    range.style.to_string(),
                    truncate_with_ellipsis(
                        &text[range.as_range()].replace('\n', "\\n"),
                        SPAN_PREVIEW_WIDTH,
                    ),
                ]
            })
            .collect();
        render_table(&headers, &rows)
    }

    /// Text with the selection bracketed, e.g. `Hello [Wor]ld` or `Hi|`.
    pub fn format_entry(&self, editor: &RichEditor) -> String {
        let text = editor.text();
        let (start, end) = editor.selection();
        if start == end {
            format!("{}|{}", &text[..start], &text[start..])
        } else {
            format!(
                "{}[{}]{}",
                &text[..start],
                &text[start..end],
                &text[end..]
            )
        }
    }

    /// Palette rows with index, swatch and hex code.
    pub fn format_palette(&self, colors: &[NamedColor]) -> String {
        let headers = vec![
            self.format_header("#"),
            self.format_header("name"),
            self.format_header("hex"),
        ];
        let rows: Vec<Vec<String>> = colors
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                vec![
                    idx.to_string(),
                    self.format_swatch(entry.title(), entry.color()),
                    entry.color().to_hex(),
                ]
            })
            .collect();
        render_table(&headers, &rows)
    }
}
