//! Terminal host for writing one journal entry.
//!
//! Each input line is a command standing in for a toolbar button or menu
//! item. Offsets typed by the user are character indices; the editor works
//! in bytes, so they are converted on the way in.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::editor::RichEditor;
use crate::formatting::FormatContext;
use crate::settings::Settings;
use crate::style::Color;
use crate::toolbar::Button;

const COMMANDS_HELP: &str = "\
Editing:   type <text> | newline | backspace | paste <markdown> | tab | time | date
Selection: select <from> <to> | cursor <at> | top | bottom
Styles:    bold | italic | underline | strike | sub | sup | indent | unindent
Colours:   color <name|#hex> | bg <name|#hex> | nocolor | nobg | colors
           custom-color <title> <#hex>
Inspect:   show | toolbar | spans | export
Menu:      clear | save | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert(String),
    Backspace,
    Paste(String),
    Select(usize, usize),
    Cursor(usize),
    Click(Button),
    TextColor(String),
    BackgroundColor(String),
    ClearTextColor,
    ClearBackgroundColor,
    CustomColor { title: String, hex: String },
    Colors,
    Show,
    Toolbar,
    Spans,
    Export,
    Clear,
    Save,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        let (name, rest) = match trimmed.split_once(' ') {
            Some((name, rest)) => (name, rest),
            None => (trimmed, ""),
        };

        let command = match name {
            "type" => Command::Insert(rest.to_string()),
            "newline" => Command::Insert("\n".to_string()),
            "backspace" => Command::Backspace,
            "paste" => Command::Paste(rest.to_string()),
            "select" => {
                let mut parts = rest.split_whitespace();
                let from = parse_index(parts.next(), "select <from> <to>")?;
                let to = parse_index(parts.next(), "select <from> <to>")?;
                Command::Select(from, to)
            }
            "cursor" => {
                Command::Cursor(parse_index(rest.split_whitespace().next(), "cursor <at>")?)
            }
            "color" => Command::TextColor(required(rest, "color <name|#hex>")?),
            "bg" => Command::BackgroundColor(required(rest, "bg <name|#hex>")?),
            "nocolor" => Command::ClearTextColor,
            "nobg" => Command::ClearBackgroundColor,
            "custom-color" => {
                let usage = "custom-color <title> <#hex>";
                let (title, hex) = rest
                    .trim()
                    .rsplit_once(' ')
                    .ok_or_else(|| format!("Usage: {usage}"))?;
                Command::CustomColor {
                    title: required(title, usage)?,
                    hex: hex.to_string(),
                }
            }
            "colors" => Command::Colors,
            "show" => Command::Show,
            "toolbar" => Command::Toolbar,
            "spans" => Command::Spans,
            "export" => Command::Export,
            "clear" => Command::Clear,
            "save" => Command::Save,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => match Button::from_label(other) {
                Some(button) => Command::Click(button),
                None => return Err(format!("Unknown command: {other}")),
            },
        };
        Ok(Some(command))
    }
}

fn parse_index(raw: Option<&str>, usage: &str) -> Result<usize, String> {
    raw.and_then(|v| v.parse::<usize>().ok())
        .ok_or_else(|| format!("Usage: {usage}"))
}

fn required(raw: &str, usage: &str) -> Result<String, String> {
    let value = raw.trim();
    if value.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// One new-entry screen: the editor plus menu state.
pub struct EntrySession {
    editor: RichEditor,
    ctx: FormatContext,
    echo: bool,
    confirming_clear: bool,
}

impl EntrySession {
    pub fn new(settings: Settings) -> Self {
        let ctx = FormatContext::new(settings.use_color);
        Self {
            editor: RichEditor::new(settings).with_all_buttons(),
            ctx,
            echo: false,
            confirming_clear: false,
        }
    }

    /// Print the entry and toolbar after every command.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn editor(&self) -> &RichEditor {
        &self.editor
    }

    /// Feed every line of `input` through the session until `quit` or EOF.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> io::Result<()> {
        info!(echo = self.echo, "entry session started");
        if self.echo {
            writeln!(out, "{}", self.ctx.format_header("New entry"))?;
            writeln!(out, "{}", self.ctx.format_muted("Type `help` for commands."))?;
        }
        for line in input.lines() {
            let line = line?;
            if self.execute(&line, out)? == Outcome::Quit {
                break;
            }
        }
        info!(chars = self.editor.text().chars().count(), "entry session ended");
        Ok(())
    }

    /// Run one input line.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Outcome> {
        if self.confirming_clear {
            self.confirming_clear = false;
            let answer = line.trim().to_ascii_lowercase();
            if answer == "y" || answer == "yes" {
                self.editor.clear();
                writeln!(out, "Entry cleared.")?;
            } else {
                writeln!(out, "Entry kept.")?;
            }
            return Ok(Outcome::Continue);
        }

        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Outcome::Continue),
            Err(msg) => {
                writeln!(out, "{}", self.ctx.format_error(&msg))?;
                return Ok(Outcome::Continue);
            }
        };
        debug!(?command, "execute");

        let mutates = !matches!(
            command,
            Command::Colors
                | Command::Show
                | Command::Toolbar
                | Command::Spans
                | Command::Export
                | Command::Help
                | Command::Save
                | Command::Clear
                | Command::Quit
        );
        match self.apply(command, out) {
            Ok(Outcome::Quit) => return Ok(Outcome::Quit),
            Ok(Outcome::Continue) => {}
            Err(SessionError::Io(err)) => return Err(err),
            Err(SessionError::Rejected(msg)) => {
                writeln!(out, "{}", self.ctx.format_error(&format!("error: {msg}")))?;
                return Ok(Outcome::Continue);
            }
        }
        if self.echo && mutates {
            writeln!(out, "{}", self.ctx.format_entry(&self.editor))?;
            writeln!(out, "{}", self.ctx.format_toolbar(&self.editor))?;
        }
        Ok(Outcome::Continue)
    }

    fn apply<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Outcome, SessionError> {
        match command {
            Command::Insert(text) => self.editor.insert(&text),
            Command::Backspace => self.editor.delete_backward(),
            Command::Paste(markdown) => self.editor.paste_markdown(&markdown),
            Command::Select(from, to) => {
                let start = self.editor.byte_index(from)?;
                let end = self.editor.byte_index(to)?;
                self.editor.set_selection(start, end)?;
            }
            Command::Cursor(at) => {
                let at = self.editor.byte_index(at)?;
                self.editor.set_cursor(at)?;
            }
            Command::Click(button) => self.editor.click(button)?,
            Command::TextColor(choice) => match choice.strip_prefix('#') {
                Some(_) => self.editor.apply_text_color(Color::parse_hex(&choice)?),
                None => {
                    self.editor.choose_text_color(&choice)?;
                }
            },
            Command::BackgroundColor(choice) => match choice.strip_prefix('#') {
                Some(_) => self
                    .editor
                    .apply_background_color(Color::parse_hex(&choice)?),
                None => {
                    self.editor.choose_background_color(&choice)?;
                }
            },
            Command::ClearTextColor => self.editor.clear_text_color(),
            Command::ClearBackgroundColor => self.editor.clear_background_color(),
            Command::CustomColor { title, hex } => {
                let color = self.editor.palette_mut().add_custom(&title, &hex)?;
                writeln!(out, "Added {} - {}", title, color)?;
            }
            Command::Colors => {
                writeln!(out, "{}", self.ctx.format_palette(self.editor.palette().entries()))?;
            }
            Command::Show => writeln!(out, "{}", self.ctx.format_entry(&self.editor))?,
            Command::Toolbar => writeln!(out, "{}", self.ctx.format_toolbar(&self.editor))?,
            Command::Spans => writeln!(out, "{}", self.ctx.format_spans(&self.editor))?,
            Command::Export => {
                writeln!(out, "{}", self.editor.plain_text_with_indents())?
            }
            Command::Clear => {
                self.confirming_clear = true;
                write!(out, "Clear entry? [y/N] ")?;
                out.flush()?;
            }
            Command::Save => {
                writeln!(out, "Saving journal entries is not supported yet.")?
            }
            Command::Help => writeln!(out, "{COMMANDS_HELP}")?,
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Continue)
    }
}

enum SessionError {
    Io(io::Error),
    Rejected(String),
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        SessionError::Io(err)
    }
}

impl From<crate::error::Error> for SessionError {
    fn from(err: crate::error::Error) -> Self {
        SessionError::Rejected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn session() -> EntrySession {
        let settings = Settings { use_color: false, ..Settings::default() };
        EntrySession::new(settings)
    }

    fn run_script(session: &mut EntrySession, script: &str) -> String {
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("type  two spaces").unwrap(),
            Some(Command::Insert(" two spaces".to_string()))
        );
        assert_eq!(Command::parse("select 1 4").unwrap(), Some(Command::Select(1, 4)));
        assert_eq!(Command::parse("bold").unwrap(), Some(Command::Click(Button::Bold)));
        assert_eq!(
            Command::parse("custom-color Sea Green #2E8B57").unwrap(),
            Some(Command::CustomColor {
                title: "Sea Green".to_string(),
                hex: "#2E8B57".to_string()
            })
        );
        assert_eq!(Command::parse("# comment").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert!(Command::parse("select 1").is_err());
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("color").is_err());
    }

    #[test]
    fn test_script_builds_styled_entry() {
        let mut session = session();
        run_script(
            &mut session,
            "type Dear diary\nselect 0 4\nbold\ncursor 10\nitalic\ntype , today\n",
        );
        let editor = session.editor();
        assert_eq!(editor.text(), "Dear diary, today");
        let ranges: Vec<_> =
            editor.spans().iter().map(|r| (r.start, r.end, r.style)).collect();
        assert_eq!(ranges, vec![(0, 4, Style::Bold), (10, 17, Style::Italic)]);
    }

    #[test]
    fn test_rejected_commands_keep_session_alive() {
        let mut session = session();
        let out = run_script(
            &mut session,
            "frobnicate\ncustom-color Teal 008080\ncolor Mauve\ntype ok\n",
        );
        assert!(out.contains("Unknown command: frobnicate"));
        assert!(out.contains("incorrect colour format"));
        assert!(out.contains("no colour named `Mauve`"));
        assert_eq!(session.editor().text(), "ok");
    }

    #[test]
    fn test_clear_asks_for_confirmation() {
        let mut session = session();
        let out = run_script(&mut session, "type keep me\nclear\nn\n");
        assert!(out.contains("Clear entry? [y/N]"));
        assert!(out.contains("Entry kept."));
        assert_eq!(session.editor().text(), "keep me");

        let out = run_script(&mut session, "clear\ny\n");
        assert!(out.contains("Entry cleared."));
        assert_eq!(session.editor().text(), "");
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut session = session();
        run_script(&mut session, "type a\nquit\ntype b\n");
        assert_eq!(session.editor().text(), "a");
    }

    #[test]
    fn test_select_uses_char_indices() {
        let mut session = session();
        let out = run_script(&mut session, "type héllo\nselect 1 2\nshow\n");
        assert!(out.contains("h[é]llo"));
    }

    #[test]
    fn test_out_of_range_select_reports_chars() {
        let mut session = session();
        let out = run_script(&mut session, "type héllo\nselect 0 9\n");
        assert!(out.contains("error: range 9..9 out of bounds for len 5"));
    }

    #[test]
    fn test_save_is_unsupported() {
        let mut session = session();
        let out = run_script(&mut session, "save\n");
        assert!(out.contains("not supported"));
    }
}
