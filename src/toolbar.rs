//! Formatting toolbar state.
//!
//! Buttons are optional: a host attaches whichever subset it shows, and any
//! read or write against a missing button is a no-op.

use crate::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Subscript,
    Superscript,
    Indent,
    Unindent,
    Tab,
    Time,
    Date,
    PageUp,
    PageDown,
    TextColor,
    BackgroundColor,
}

impl Button {
    /// Buttons with a checked state, in toolbar order.
    pub const TOGGLES: [Button; 6] = [
        Button::Bold,
        Button::Italic,
        Button::Underline,
        Button::Strikethrough,
        Button::Subscript,
        Button::Superscript,
    ];

    pub const ALL: [Button; 15] = [
        Button::Bold,
        Button::Italic,
        Button::Underline,
        Button::Strikethrough,
        Button::Subscript,
        Button::Superscript,
        Button::Indent,
        Button::Unindent,
        Button::Tab,
        Button::Time,
        Button::Date,
        Button::PageUp,
        Button::PageDown,
        Button::TextColor,
        Button::BackgroundColor,
    ];

    /// The style a toggle button controls.
    pub fn style(self) -> Option<Style> {
        match self {
            Button::Bold => Some(Style::Bold),
            Button::Italic => Some(Style::Italic),
            Button::Underline => Some(Style::Underline),
            Button::Strikethrough => Some(Style::Strikethrough),
            Button::Subscript => Some(Style::Subscript),
            Button::Superscript => Some(Style::Superscript),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Button::Bold => "bold",
            Button::Italic => "italic",
            Button::Underline => "underline",
            Button::Strikethrough => "strike",
            Button::Subscript => "sub",
            Button::Superscript => "sup",
            Button::Indent => "indent",
            Button::Unindent => "unindent",
            Button::Tab => "tab",
            Button::Time => "time",
            Button::Date => "date",
            Button::PageUp => "top",
            Button::PageDown => "bottom",
            Button::TextColor => "color",
            Button::BackgroundColor => "bg",
        }
    }

    pub fn from_label(label: &str) -> Option<Button> {
        Button::ALL.into_iter().find(|b| b.label() == label)
    }

    fn toggle_slot(self) -> Option<usize> {
        Button::TOGGLES.iter().position(|b| *b == self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleButton {
    checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toolbar {
    toggles: [Option<ToggleButton>; 6],
    actions: Vec<Button>,
    /// Colour applied to typed text while set.
    pub text_color: Option<Color>,
    /// Highlight applied to typed text while set.
    pub background_color: Option<Color>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toolbar with every button attached and unchecked.
    pub fn with_all_buttons() -> Self {
        let mut toolbar = Self::new();
        toolbar.attach_all();
        toolbar
    }

    pub fn attach(&mut self, button: Button) {
        match button.toggle_slot() {
            Some(slot) => {
                self.toggles[slot].get_or_insert_with(ToggleButton::default);
            }
            None => {
                if !self.actions.contains(&button) {
                    self.actions.push(button);
                }
            }
        }
    }

    pub fn attach_all(&mut self) {
        for button in Button::ALL {
            self.attach(button);
        }
    }

    pub fn detach(&mut self, button: Button) {
        match button.toggle_slot() {
            Some(slot) => self.toggles[slot] = None,
            None => self.actions.retain(|b| *b != button),
        }
    }

    pub fn is_attached(&self, button: Button) -> bool {
        match button.toggle_slot() {
            Some(slot) => self.toggles[slot].is_some(),
            None => self.actions.contains(&button),
        }
    }

    /// False for unattached and non-toggle buttons.
    pub fn is_checked(&self, button: Button) -> bool {
        self.toggle(button).is_some_and(|t| t.checked)
    }

    pub fn set_checked(&mut self, button: Button, checked: bool) {
        if let Some(toggle) = self.toggle_mut(button) {
            toggle.checked = checked;
        }
    }

    /// Flip a toggle, returning its new state, or `None` when it is missing.
    pub fn flip(&mut self, button: Button) -> Option<bool> {
        let toggle = self.toggle_mut(button)?;
        toggle.checked = !toggle.checked;
        Some(toggle.checked)
    }

    /// Styles of every checked toggle, in toolbar order.
    pub fn checked_styles(&self) -> impl Iterator<Item = Style> + '_ {
        Button::TOGGLES
            .into_iter()
            .filter(|b| self.is_checked(*b))
            .filter_map(Button::style)
    }

    fn toggle(&self, button: Button) -> Option<&ToggleButton> {
        self.toggles[button.toggle_slot()?].as_ref()
    }

    fn toggle_mut(&mut self, button: Button) -> Option<&mut ToggleButton> {
        self.toggles[button.toggle_slot()?].as_mut()
    }
}
