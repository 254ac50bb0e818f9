//! The rich-text editing engine behind a journal entry.
//!
//! `RichEditor` owns the text, its styled ranges, the selection and the
//! formatting toolbar. Two flows drive everything:
//!
//! - a selection change scans the ranges touching the new selection once
//!   and sets every attached toggle to match what it found;
//! - an insertion or toggle click adds or strips ranges over exactly the
//!   affected bytes.
//!
//! All offsets are byte offsets into the UTF-8 text.

use std::fmt::Display;
use std::ops::Range;

use chrono::{DateTime, Local, TimeZone};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use tracing::{debug, warn};

use crate::error::Error;
use crate::palette::Palette;
use crate::settings::Settings;
use crate::span::{SpanSet, validate_range};
use crate::style::{Color, MAX_INDENT, Style};
use crate::toolbar::{Button, Toolbar};

pub type SelectionListener = Box<dyn FnMut(usize, usize)>;

pub struct RichEditor {
    text: String,
    spans: SpanSet,
    selection: (usize, usize),
    toolbar: Toolbar,
    settings: Settings,
    on_selection_change: Option<SelectionListener>,
}

impl Default for RichEditor {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl RichEditor {
    /// An empty editor with no toolbar buttons attached.
    pub fn new(settings: Settings) -> Self {
        Self {
            text: String::new(),
            spans: SpanSet::new(),
            selection: (0, 0),
            toolbar: Toolbar::new(),
            settings,
            on_selection_change: None,
        }
    }

    pub fn with_all_buttons(mut self) -> Self {
        self.toolbar.attach_all();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &SpanSet {
        &self.spans
    }

    /// Current selection as `(start, end)` with `start <= end`.
    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut Toolbar {
        &mut self.toolbar
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn palette(&self) -> &Palette {
        &self.settings.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.settings.palette
    }

    pub fn is_checked(&self, button: Button) -> bool {
        self.toolbar.is_checked(button)
    }

    /// Styles covering the byte at `index`, in the order they were applied.
    pub fn styles_at(&self, index: usize) -> Vec<Style> {
        self.spans.styles_at(index).copied().collect()
    }

    /// Register the callback run on every selection change, before the
    /// toolbar is synced.
    pub fn set_on_selection_change(&mut self, listener: SelectionListener) {
        self.on_selection_change = Some(listener);
    }

    /// Convert a character index into a byte offset. Errors report the
    /// length in characters.
    pub fn byte_index(&self, char_index: usize) -> Result<usize, Error> {
        let chars = self.text.chars().count();
        if char_index == chars {
            return Ok(self.text.len());
        }
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(byte, _)| byte)
            .ok_or_else(|| Error::invalid_bounds(char_index, char_index, chars))
    }

    /// Replace the whole text. Every styled range is dropped and the cursor
    /// moves to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.spans.clear();
        let end = self.text.len();
        self.selection = (end, end);
        self.selection_changed();
    }

    /// Select `start..end`; reversed endpoints are swapped.
    pub fn set_selection(&mut self, start: usize, end: usize) -> Result<(), Error> {
        let range = start.min(end)..start.max(end);
        validate_range(&self.text, &range)?;
        self.selection = (range.start, range.end);
        self.selection_changed();
        Ok(())
    }

    pub fn set_cursor(&mut self, at: usize) -> Result<(), Error> {
        self.set_selection(at, at)
    }

    /// Replace the selection with `text`, styling the new bytes with every
    /// checked toggle and active colour.
    pub fn insert(&mut self, text: &str) {
        let (start, end) = self.selection;
        self.replace(start..end, text);
        self.text_changed(start, text.len());
        let cursor = start + text.len();
        self.selection = (cursor, cursor);
        self.selection_changed();
    }

    /// Delete the selection, or the character before the cursor.
    pub fn delete_backward(&mut self) {
        let (start, end) = self.selection;
        let range = if start != end {
            start..end
        } else {
            match self.text[..start].chars().next_back() {
                Some(ch) => start - ch.len_utf8()..start,
                None => return,
            }
        };
        let cursor = range.start;
        self.replace(range, "");
        self.selection = (cursor, cursor);
        self.selection_changed();
    }

    /// Empty the entry and destroy every styled range.
    pub fn clear(&mut self) {
        debug!(len = self.text.len(), "clear entry");
        self.text.clear();
        self.spans.clear();
        self.selection = (0, 0);
        self.selection_changed();
    }

    /// Dispatch a toolbar click.
    pub fn click(&mut self, button: Button) -> Result<(), Error> {
        if !self.toolbar.is_attached(button) {
            warn!(button = button.label(), "click on a button that was never attached");
            return Err(Error::button_not_attached(button));
        }
        match button {
            Button::Bold
            | Button::Italic
            | Button::Underline
            | Button::Strikethrough
            | Button::Subscript
            | Button::Superscript => self.toggle_style(button),
            Button::Indent => self.indent(),
            Button::Unindent => self.unindent(),
            Button::Tab => self.insert_tab(),
            Button::Time => self.insert_time(&Local::now()),
            Button::Date => self.insert_date(&Local::now()),
            Button::PageUp => self.page_up(),
            Button::PageDown => self.page_down(),
            Button::TextColor => {
                if let Some(color) = self.toolbar.text_color {
                    self.apply_text_color(color);
                }
            }
            Button::BackgroundColor => {
                if let Some(color) = self.toolbar.background_color {
                    self.apply_background_color(color);
                }
            }
        }
        Ok(())
    }

    /// Put `style` on the selection, replacing ranges of the same kind.
    pub fn apply_style(&mut self, style: Style) {
        let (start, end) = self.selection;
        if start == end {
            return;
        }
        self.spans.remove_within(start, end, |s| s.same_kind(&style));
        self.spans.add(start, end, style);
        self.selection_changed();
    }

    /// Strip every range of `style`'s kind from the selection.
    pub fn remove_style(&mut self, style: Style) {
        let (start, end) = self.selection;
        self.spans.remove_within(start, end, |s| s.same_kind(&style));
        self.selection_changed();
    }

    /// Insert `tab_width` spaces at the cursor.
    pub fn insert_tab(&mut self) {
        let spaces = " ".repeat(self.settings.tab_width);
        self.insert(&spaces);
    }

    /// Insert a `<H:MM:SS>` stamp on a 12-hour clock.
    pub fn insert_time<Tz>(&mut self, now: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let stamp = now.format("<%-I:%M:%S>").to_string();
        self.insert(&stamp);
    }

    /// Insert a `<M-D-YYYY>` stamp.
    pub fn insert_date<Tz>(&mut self, now: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let stamp = now.format("<%-m-%-d-%Y>").to_string();
        self.insert(&stamp);
    }

    pub fn page_up(&mut self) {
        self.selection = (0, 0);
        self.selection_changed();
    }

    pub fn page_down(&mut self) {
        let end = self.text.len();
        self.selection = (end, end);
        self.selection_changed();
    }

    /// Raise the indent level of every paragraph the selection touches.
    pub fn indent(&mut self) {
        self.shift_indent(1);
    }

    /// Lower the indent level of every paragraph the selection touches.
    pub fn unindent(&mut self) {
        self.shift_indent(-1);
    }

    /// Indent level of the paragraph containing `index`.
    pub fn indent_level_at(&self, index: usize) -> u8 {
        let paragraphs = self.paragraphs();
        let idx = paragraph_index(&paragraphs, index);
        self.paragraph_level(&paragraphs[idx])
    }

    /// Pick `title` from the palette and colour the selection with it.
    pub fn choose_text_color(&mut self, title: &str) -> Result<Color, Error> {
        let color = self.settings.palette.choose_named(title)?;
        self.apply_text_color(color);
        Ok(color)
    }

    /// Pick `title` from the palette and highlight the selection with it.
    pub fn choose_background_color(&mut self, title: &str) -> Result<Color, Error> {
        let color = self.settings.palette.choose_named(title)?;
        self.apply_background_color(color);
        Ok(color)
    }

    /// Make `color` the text pen and paint the selection with it.
    pub fn apply_text_color(&mut self, color: Color) {
        self.toolbar.text_color = Some(color);
        self.apply_style(Style::ForegroundColor(color));
    }

    /// Make `color` the highlight pen and paint the selection with it.
    pub fn apply_background_color(&mut self, color: Color) {
        self.toolbar.background_color = Some(color);
        self.apply_style(Style::BackgroundColor(color));
    }

    pub fn clear_text_color(&mut self) {
        self.remove_style(Style::ForegroundColor(Color::BLACK));
        self.toolbar.text_color = None;
    }

    pub fn clear_background_color(&mut self) {
        self.remove_style(Style::BackgroundColor(Color::BLACK));
        self.toolbar.background_color = None;
    }

    /// Paste markdown from the clipboard. Strong, emphasis and
    /// strikethrough become styled ranges; everything else lands as plain
    /// text.
    pub fn paste_markdown(&mut self, markdown: &str) {
        let (plain, ranges) = markdown_to_ranges(markdown);
        let start = self.selection.0;
        self.insert(&plain);
        for (range, style) in ranges {
            self.spans.add(start + range.start, start + range.end, style);
        }
        self.selection_changed();
    }

    /// The text with each paragraph prefixed by its indent as spaces.
    pub fn plain_text_with_indents(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        for paragraph in self.paragraphs() {
            let level = usize::from(self.paragraph_level(&paragraph));
            out.push_str(&" ".repeat(level * self.settings.tab_width));
            out.push_str(&self.text[paragraph]);
        }
        out
    }

    fn replace(&mut self, range: Range<usize>, text: &str) {
        let removed = range.len();
        let start = range.start;
        self.text.replace_range(range, text);
        self.spans.adjust_for_edit(start, removed, text.len());
    }

    fn text_changed(&mut self, start: usize, count: usize) {
        if count == 0 {
            return;
        }
        let end = start + count;
        let styles: Vec<Style> = self.toolbar.checked_styles().collect();
        for style in styles {
            self.spans.add(start, end, style);
            if is_script(&style) {
                self.spans
                    .add(start, end, Style::RelativeSize(self.settings.relative_size));
            }
        }
        if let Some(color) = self.toolbar.text_color {
            self.spans.add(start, end, Style::ForegroundColor(color));
        }
        if let Some(color) = self.toolbar.background_color {
            self.spans.add(start, end, Style::BackgroundColor(color));
        }
    }

    fn selection_changed(&mut self) {
        let (start, end) = self.selection;
        if let Some(listener) = self.on_selection_change.as_mut() {
            listener(start, end);
        }

        let mut found = [false; Button::TOGGLES.len()];
        let mut text_color = None;
        let mut background_color = None;
        for range in self.spans.overlapping(start, end) {
            match range.style {
                Style::ForegroundColor(c) => text_color = Some(c),
                Style::BackgroundColor(c) => background_color = Some(c),
                style => {
                    if let Some(slot) = Button::TOGGLES
                        .iter()
                        .position(|b| b.style() == Some(style))
                    {
                        found[slot] = true;
                    }
                }
            }
        }
        for (button, checked) in Button::TOGGLES.into_iter().zip(found) {
            self.toolbar.set_checked(button, checked);
        }
        if text_color.is_some() {
            self.toolbar.text_color = text_color;
        }
        if background_color.is_some() {
            self.toolbar.background_color = background_color;
        }
    }

    fn toggle_style(&mut self, button: Button) {
        let Some(style) = button.style() else { return };
        let Some(checked) = self.toolbar.flip(button) else { return };
        let (start, end) = self.selection;
        debug!(button = button.label(), checked, start, end, "toggle style");

        if checked && is_script(&style) {
            let other = if style == Style::Subscript {
                Button::Superscript
            } else {
                Button::Subscript
            };
            self.toolbar.set_checked(other, false);
            self.strip_script(other.style(), start, end);
        }

        if !checked {
            self.strip_script(Some(style), start, end);
            return;
        }
        if start == end {
            return;
        }
        self.spans.remove_within(start, end, |s| *s == style);
        self.spans.add(start, end, style);
        if is_script(&style) {
            self.spans.remove_within(start, end, |s| {
                matches!(s, Style::RelativeSize(_))
            });
            self.spans
                .add(start, end, Style::RelativeSize(self.settings.relative_size));
        }
    }

    /// Remove `style` from `start..end`. Sub/superscript take their size
    /// ranges with them, but only over the bytes they covered.
    fn strip_script(&mut self, style: Option<Style>, start: usize, end: usize) {
        let Some(style) = style else { return };
        let covered: Vec<Range<usize>> = if is_script(&style) {
            self.spans
                .iter()
                .filter(|r| r.style == style && r.intersects(start, end))
                .map(|r| r.start.max(start)..r.end.min(end))
                .collect()
        } else {
            Vec::new()
        };
        self.spans.remove_within(start, end, |s| *s == style);
        for range in covered {
            self.spans.remove_within(range.start, range.end, |s| {
                matches!(s, Style::RelativeSize(_))
            });
        }
    }

    fn shift_indent(&mut self, delta: i8) {
        let (start, end) = self.selection;
        let paragraphs = self.paragraphs();
        let first = paragraph_index(&paragraphs, start);
        let last_pos = if end > start { end - 1 } else { start };
        let last = paragraph_index(&paragraphs, last_pos);

        for paragraph in &paragraphs[first..=last] {
            if paragraph.is_empty() {
                continue;
            }
            let level = self.paragraph_level(paragraph);
            let next = level.saturating_add_signed(delta).min(MAX_INDENT);
            if next == level {
                continue;
            }
            debug!(start = paragraph.start, level, next, "indent paragraph");
            self.spans.remove_within(paragraph.start, paragraph.end, |s| {
                matches!(s, Style::Indent(_))
            });
            if next > 0 {
                self.spans.add(paragraph.start, paragraph.end, Style::Indent(next));
            }
        }
        self.selection_changed();
    }

    fn paragraph_level(&self, paragraph: &Range<usize>) -> u8 {
        self.spans
            .iter()
            .filter(|r| r.intersects(paragraph.start, paragraph.end))
            .filter_map(|r| match r.style {
                Style::Indent(level) => Some(level),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Paragraph ranges, each including its trailing newline. The last one
    /// may be empty.
    fn paragraphs(&self) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        let mut start = 0;
        for (idx, ch) in self.text.char_indices() {
            if ch == '\n' {
                out.push(start..idx + 1);
                start = idx + 1;
            }
        }
        out.push(start..self.text.len());
        out
    }
}

fn is_script(style: &Style) -> bool {
    matches!(style, Style::Subscript | Style::Superscript)
}

fn paragraph_index(paragraphs: &[Range<usize>], pos: usize) -> usize {
    paragraphs
        .iter()
        .position(|p| pos < p.end)
        .unwrap_or(paragraphs.len().saturating_sub(1))
}

/// Flatten markdown into plain text plus the inline styles it carried.
fn markdown_to_ranges(markdown: &str) -> (String, Vec<(Range<usize>, Style)>) {
    let mut plain = String::new();
    let mut ranges = Vec::new();
    let mut open: Vec<(Style, usize)> = Vec::new();

    let close = |open: &mut Vec<(Style, usize)>,
                 ranges: &mut Vec<(Range<usize>, Style)>,
                 style: Style,
                 end: usize| {
        if let Some(pos) = open.iter().rposition(|(s, _)| *s == style) {
            let (style, start) = open.remove(pos);
            if start < end {
                ranges.push((start..end, style));
            }
        }
    };

    for event in Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::Strong) => open.push((Style::Bold, plain.len())),
            Event::Start(Tag::Emphasis) => open.push((Style::Italic, plain.len())),
            Event::Start(Tag::Strikethrough) => {
                open.push((Style::Strikethrough, plain.len()))
            }
            Event::End(TagEnd::Strong) => {
                close(&mut open, &mut ranges, Style::Bold, plain.len())
            }
            Event::End(TagEnd::Emphasis) => {
                close(&mut open, &mut ranges, Style::Italic, plain.len())
            }
            Event::End(TagEnd::Strikethrough) => {
                close(&mut open, &mut ranges, Style::Strikethrough, plain.len())
            }
            Event::Text(text) | Event::Code(text) => plain.push_str(&text),
            Event::SoftBreak | Event::HardBreak => plain.push('\n'),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item) => plain.push('\n'),
            _ => {}
        }
    }

    let trimmed = plain.trim_end_matches('\n').len();
    plain.truncate(trimmed);
    for (range, _) in ranges.iter_mut() {
        range.end = range.end.min(trimmed);
    }
    ranges.retain(|(range, _)| range.start < range.end);
    (plain, ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::{FixedOffset, TimeZone};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn editor_with(text: &str) -> RichEditor {
        let mut editor = RichEditor::default().with_all_buttons();
        editor.set_text(text);
        editor
    }

    fn ranges(editor: &RichEditor) -> Vec<(usize, usize, Style)> {
        editor.spans().iter().map(|r| (r.start, r.end, r.style)).collect()
    }

    #[test]
    fn test_bold_toggle_covers_exact_selection() {
        let mut editor = editor_with("Hello World");
        editor.set_selection(0, 5).unwrap();
        editor.click(Button::Bold).unwrap();
        assert_eq!(ranges(&editor), vec![(0, 5, Style::Bold)]);
        assert!(editor.is_checked(Button::Bold));
    }

    #[test]
    fn test_bold_off_leaves_other_styles() {
        let mut editor = editor_with("Hello World");
        editor.set_selection(0, 5).unwrap();
        editor.click(Button::Bold).unwrap();
        editor.click(Button::Italic).unwrap();
        editor.click(Button::Bold).unwrap();
        assert_eq!(ranges(&editor), vec![(0, 5, Style::Italic)]);
        assert!(!editor.is_checked(Button::Bold));
        assert!(editor.is_checked(Button::Italic));
    }

    #[test]
    fn test_selection_change_syncs_toggles() {
        let mut editor = editor_with("Hello World");
        editor.set_selection(6, 11).unwrap();
        editor.click(Button::Underline).unwrap();

        editor.set_selection(0, 5).unwrap();
        assert!(!editor.is_checked(Button::Underline));
        editor.set_selection(4, 8).unwrap();
        assert!(editor.is_checked(Button::Underline));
        // Selection that only abuts the range.
        editor.set_selection(0, 6).unwrap();
        assert!(!editor.is_checked(Button::Underline));
        // Collapsed cursor at the range's end.
        editor.set_cursor(11).unwrap();
        assert!(editor.is_checked(Button::Underline));
    }

    #[test]
    fn test_typing_with_checked_toggle() {
        let mut editor = RichEditor::default().with_all_buttons();
        editor.click(Button::Bold).unwrap();
        editor.insert("Dear");
        assert_eq!(ranges(&editor), vec![(0, 4, Style::Bold)]);
        // The cursor still touches bold, so the toggle stays on.
        assert!(editor.is_checked(Button::Bold));
        editor.insert(" diary");
        assert_eq!(
            ranges(&editor),
            vec![(0, 4, Style::Bold), (4, 10, Style::Bold)]
        );
    }

    #[test]
    fn test_unchecking_before_typing_stops_style() {
        let mut editor = RichEditor::default().with_all_buttons();
        editor.click(Button::Bold).unwrap();
        editor.insert("Bold");
        editor.click(Button::Bold).unwrap();
        editor.insert(" plain");
        assert_eq!(editor.text(), "Bold plain");
        assert_eq!(ranges(&editor), vec![(0, 4, Style::Bold)]);
        assert!(!editor.is_checked(Button::Bold));
    }

    #[test]
    fn test_missing_button_is_guarded() {
        let mut editor = RichEditor::default();
        editor.toolbar_mut().attach(Button::Italic);
        editor.set_text("abc");
        let err = editor.click(Button::Bold).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ButtonNotAttached);
        // Selection sync skips unattached buttons without failing.
        editor.set_selection(0, 3).unwrap();
        assert!(!editor.is_checked(Button::Bold));
    }

    #[test]
    fn test_subscript_brings_relative_size() {
        let mut editor = editor_with("H2O");
        editor.set_selection(1, 2).unwrap();
        editor.click(Button::Subscript).unwrap();
        assert_eq!(
            ranges(&editor),
            vec![(1, 2, Style::Subscript), (1, 2, Style::RelativeSize(0.5))]
        );
        editor.click(Button::Subscript).unwrap();
        assert!(editor.spans().is_empty());
    }

    #[test]
    fn test_unsubscript_keeps_superscript_size() {
        let mut editor = editor_with("x2y3");
        editor.set_selection(1, 2).unwrap();
        editor.click(Button::Subscript).unwrap();
        editor.set_selection(3, 4).unwrap();
        editor.click(Button::Superscript).unwrap();

        editor.set_selection(0, 4).unwrap();
        assert!(editor.is_checked(Button::Subscript));
        editor.click(Button::Subscript).unwrap();
        assert_eq!(
            ranges(&editor),
            vec![(3, 4, Style::Superscript), (3, 4, Style::RelativeSize(0.5))]
        );
    }

    #[test]
    fn test_typing_subscript_adds_relative_size() {
        let mut editor = RichEditor::default().with_all_buttons();
        editor.click(Button::Subscript).unwrap();
        editor.insert("2");
        assert_eq!(
            ranges(&editor),
            vec![(0, 1, Style::Subscript), (0, 1, Style::RelativeSize(0.5))]
        );
    }

    #[test]
    fn test_typing_superscript_uses_configured_size() {
        let settings = Settings { relative_size: 0.75, ..Settings::default() };
        let mut editor = RichEditor::new(settings).with_all_buttons();
        editor.insert("E=mc");
        editor.click(Button::Superscript).unwrap();
        editor.insert("2");
        assert_eq!(
            ranges(&editor),
            vec![(4, 5, Style::Superscript), (4, 5, Style::RelativeSize(0.75))]
        );
    }

    #[test]
    fn test_sub_and_superscript_exclusive() {
        let mut editor = editor_with("x2");
        editor.set_selection(1, 2).unwrap();
        editor.click(Button::Subscript).unwrap();
        editor.click(Button::Superscript).unwrap();
        assert!(!editor.is_checked(Button::Subscript));
        assert!(editor.is_checked(Button::Superscript));
        assert_eq!(
            ranges(&editor),
            vec![(1, 2, Style::Superscript), (1, 2, Style::RelativeSize(0.5))]
        );
    }

    #[test]
    fn test_delete_backward_multibyte() {
        let mut editor = editor_with("café");
        editor.delete_backward();
        assert_eq!(editor.text(), "caf");
        assert_eq!(editor.selection(), (3, 3));
        editor.set_cursor(0).unwrap();
        editor.delete_backward();
        assert_eq!(editor.text(), "caf");
    }

    #[test]
    fn test_delete_selection_shrinks_ranges() {
        let mut editor = editor_with("Hello World");
        editor.set_selection(6, 11).unwrap();
        editor.click(Button::Bold).unwrap();
        editor.set_selection(0, 6).unwrap();
        editor.delete_backward();
        assert_eq!(editor.text(), "World");
        assert_eq!(ranges(&editor), vec![(0, 5, Style::Bold)]);
    }

    #[test]
    fn test_selection_rejects_bad_offsets() {
        let mut editor = editor_with("éa");
        let err = editor.set_selection(1, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotOnCharBoundary);
        let err = editor.set_selection(0, 9).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        // Reversed endpoints are normalised.
        editor.set_selection(3, 0).unwrap();
        assert_eq!(editor.selection(), (0, 3));
    }

    #[test]
    fn test_selection_listener_runs() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut editor = editor_with("abc");
        editor.set_on_selection_change(Box::new(move |s: usize, e: usize| {
            sink.borrow_mut().push((s, e))
        }));
        editor.set_selection(1, 2).unwrap();
        editor.page_up();
        assert_eq!(*seen.borrow(), vec![(1, 2), (0, 0)]);
    }

    #[test]
    fn test_clear_destroys_ranges() {
        let mut editor = editor_with("Hello");
        editor.set_selection(0, 5).unwrap();
        editor.click(Button::Italic).unwrap();
        editor.clear();
        assert_eq!(editor.text(), "");
        assert!(editor.spans().is_empty());
        assert!(!editor.is_checked(Button::Italic));
    }

    #[test]
    fn test_indent_and_unindent() {
        let mut editor = editor_with("one\ntwo\nthree");
        editor.set_selection(0, 5).unwrap();
        editor.click(Button::Indent).unwrap();
        editor.click(Button::Indent).unwrap();
        assert_eq!(editor.indent_level_at(0), 2);
        assert_eq!(editor.indent_level_at(4), 2);
        assert_eq!(editor.indent_level_at(8), 0);
        assert_eq!(
            editor.plain_text_with_indents(),
            "        one\n        two\nthree"
        );

        editor.set_cursor(4).unwrap();
        editor.click(Button::Unindent).unwrap();
        editor.click(Button::Unindent).unwrap();
        editor.click(Button::Unindent).unwrap();
        assert_eq!(editor.indent_level_at(4), 0);
        assert_eq!(editor.indent_level_at(0), 2);
    }

    #[test]
    fn test_indent_is_capped() {
        let mut editor = editor_with("deep");
        for _ in 0..20 {
            editor.indent();
        }
        assert_eq!(editor.indent_level_at(0), MAX_INDENT);
        assert_eq!(editor.spans().len(), 1);
    }

    #[test]
    fn test_tab_uses_tab_width() {
        let settings = Settings { tab_width: 2, ..Settings::default() };
        let mut editor = RichEditor::new(settings).with_all_buttons();
        editor.insert("a");
        editor.click(Button::Tab).unwrap();
        editor.insert("b");
        assert_eq!(editor.text(), "a  b");
    }

    #[test]
    fn test_time_and_date_stamps() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let now = tz.with_ymd_and_hms(2024, 3, 7, 15, 4, 9).unwrap();
        let mut editor = RichEditor::default();
        editor.insert_date(&now);
        editor.insert(" ");
        editor.insert_time(&now);
        assert_eq!(editor.text(), "<3-7-2024> <3:04:09>");
    }

    #[test]
    fn test_page_up_and_down() {
        let mut editor = editor_with("abc");
        editor.page_up();
        assert_eq!(editor.selection(), (0, 0));
        editor.page_down();
        assert_eq!(editor.selection(), (3, 3));
    }

    #[test]
    fn test_text_color_pen() {
        let mut editor = editor_with("red text");
        editor.set_selection(0, 3).unwrap();
        let red = editor.choose_text_color("Red").unwrap();
        assert_eq!(ranges(&editor), vec![(0, 3, Style::ForegroundColor(red))]);
        assert_eq!(editor.palette().entries()[0].title(), "Red");

        // The pen colours typed text too.
        editor.page_down();
        editor.insert("!");
        assert!(editor.styles_at(8).contains(&Style::ForegroundColor(red)));

        // With a bare cursor only the pen goes.
        editor.clear_text_color();
        assert_eq!(editor.toolbar().text_color, None);
        assert_eq!(editor.spans().len(), 2);

        editor.set_selection(0, 9).unwrap();
        editor.clear_text_color();
        assert!(editor.spans().is_empty());
        assert_eq!(editor.toolbar().text_color, None);
    }

    #[test]
    fn test_recolor_replaces_overlap() {
        let mut editor = editor_with("abcdef");
        editor.set_selection(0, 6).unwrap();
        editor.choose_background_color("Yellow").unwrap();
        editor.set_selection(2, 4).unwrap();
        let green = editor.choose_background_color("Green").unwrap();
        let yellow = Color::rgb(255, 255, 0);
        assert_eq!(
            ranges(&editor),
            vec![
                (0, 2, Style::BackgroundColor(yellow)),
                (4, 6, Style::BackgroundColor(yellow)),
                (2, 4, Style::BackgroundColor(green)),
            ]
        );
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let mut editor = editor_with("abc");
        let err = editor.choose_text_color("Mauve").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownColor);
        assert!(editor.spans().is_empty());
    }

    #[test]
    fn test_paste_markdown() {
        let mut editor = editor_with("> ");
        editor.paste_markdown("**bold** and *soft* and ~~gone~~");
        assert_eq!(editor.text(), "> bold and soft and gone");
        assert_eq!(
            ranges(&editor),
            vec![
                (2, 6, Style::Bold),
                (11, 15, Style::Italic),
                (20, 24, Style::Strikethrough),
            ]
        );
    }

    #[test]
    fn test_byte_index() {
        let editor = editor_with("héllo");
        assert_eq!(editor.byte_index(0).unwrap(), 0);
        assert_eq!(editor.byte_index(2).unwrap(), 3);
        assert_eq!(editor.byte_index(5).unwrap(), 6);
        let err = editor.byte_index(9).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert_eq!(err.text_len(), 5);
        assert_eq!(err.to_string(), "range 9..9 out of bounds for len 5");
    }
}
