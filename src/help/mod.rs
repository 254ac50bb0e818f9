use crate::{paginate_and_print, terminal_columns};
use std::error::Error;

mod content;

/// Labels longer than this get a line of their own.
const LABEL_WIDTH: usize = 34;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Command,
    Environment,
    Guide,
}

impl Section {
    const ALL: [Section; 3] =
        [Section::Command, Section::Environment, Section::Guide];

    fn label(self) -> &'static str {
        match self {
            Section::Command => "Commands",
            Section::Environment => "Environment",
            Section::Guide => "Guides",
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct HelpFlag<'a> {
    pub name: &'a str,
    pub desc: &'a str,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpTopic<'a> {
    pub name: &'a str,
    pub summary: &'a str,
    pub usage: &'a str,
    pub details: &'a [&'a str],
    pub flags: &'a [HelpFlag<'a>],
    pub aliases: &'a [&'a str],
    pub section: Section,
    pub examples: &'a [&'a str],
}

impl HelpTopic<'_> {
    /// Commands and variables are listed by usage, guides by name.
    fn overview_label(&self) -> &str {
        match self.section {
            Section::Guide => self.name,
            Section::Command | Section::Environment => self.usage,
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.eq_ignore_ascii_case(needle)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(needle))
    }
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub usage: &'a str,
    pub topics: &'a [HelpTopic<'a>],
    pub footer: &'a [&'a str],
}

impl<'a> HelpBook<'a> {
    fn find(&self, name: &str) -> Option<&HelpTopic<'a>> {
        self.topics.iter().find(|topic| topic.matches(name.trim()))
    }
}

pub(crate) fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let book = content::book();
    let width = terminal_columns().unwrap_or(96).clamp(64, 120);

    let lines = match args.first() {
        None => overview(&book, width),
        Some(name) => match book.find(name) {
            Some(topic) => topic_page(&book, topic, width),
            None => {
                eprintln!("Unknown help topic: {name}");
                overview(&book, width)
            }
        },
    };

    paginate_and_print(&lines)?;
    Ok(())
}

fn overview(book: &HelpBook<'_>, width: usize) -> Vec<String> {
    let mut page = Page::new(width);
    page.line(book.title);
    page.line(&format!("usage: {}", book.usage));
    page.blank();
    for section in Section::ALL {
        let rows: Vec<(&str, &str)> = book
            .topics
            .iter()
            .filter(|t| t.section == section)
            .map(|t| (t.overview_label(), t.summary))
            .collect();
        page.rows(section.label(), &rows);
    }
    page.paragraphs(book.footer);
    page.lines
}

fn topic_page(
    book: &HelpBook<'_>,
    topic: &HelpTopic<'_>,
    width: usize,
) -> Vec<String> {
    let mut page = Page::new(width);
    page.line(&format!("{}: {}", topic.name, topic.summary));
    page.line(&format!("usage: {}", topic.usage));
    if !topic.aliases.is_empty() {
        page.line(&format!("aliases: {}", topic.aliases.join(", ")));
    }
    page.blank();

    if !topic.details.is_empty() {
        page.paragraphs(topic.details);
        page.blank();
    }
    let flags: Vec<(&str, &str)> =
        topic.flags.iter().map(|f| (f.name, f.desc)).collect();
    page.rows("Options", &flags);
    if !topic.examples.is_empty() {
        page.line("Examples:");
        for example in topic.examples {
            page.line(&format!("  {example}"));
        }
        page.blank();
    }
    page.paragraphs(book.footer);
    page.lines
}

/// Help output being laid out for a fixed terminal width.
struct Page {
    width: usize,
    lines: Vec<String>,
}

impl Page {
    fn new(width: usize) -> Self {
        Self { width, lines: Vec::new() }
    }

    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn paragraphs(&mut self, texts: &[&str]) {
        for text in texts {
            self.lines.extend(wrap(text, self.width));
        }
    }

    /// A titled two-column block. Empty blocks print nothing.
    fn rows(&mut self, title: &str, rows: &[(&str, &str)]) {
        if rows.is_empty() {
            return;
        }
        let label_width = rows
            .iter()
            .map(|(label, _)| label.len())
            .filter(|len| *len <= LABEL_WIDTH)
            .max()
            .unwrap_or(0);
        let indent = 2 + label_width + 2;
        let desc_width = self.width.saturating_sub(indent).max(20);

        self.lines.push(format!("{title}:"));
        for (label, desc) in rows {
            let mut desc_lines = wrap(desc, desc_width).into_iter();
            if label.len() > label_width {
                self.lines.push(format!("  {label}"));
            } else {
                let first = desc_lines.next().unwrap_or_default();
                self.lines.push(format!("  {label:label_width$}  {first}"));
            }
            for rest in desc_lines {
                self.lines.push(format!("{:indent$}{rest}", ""));
            }
        }
        self.blank();
    }
}

/// Greedy word wrap. Always returns at least one line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            out.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || out.is_empty() {
        out.push(line);
    }
    out
}
