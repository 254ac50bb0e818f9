use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::process::{Command, Stdio};

use terminal_size::{Height, Width, terminal_size};
use tracing::debug;

mod args;
pub mod editor;
pub mod entry;
pub mod error;
pub mod formatting;
mod help;
pub mod logging;
pub mod palette;
pub mod settings;
pub mod span;
pub mod style;
pub mod toolbar;

mod shared {
    pub mod table;
}

use args::SessionFlags;
use entry::EntrySession;
use formatting::FormatContext;
use settings::Settings;

pub use editor::RichEditor;
pub use error::ErrorKind;

pub fn entry() -> Result<(), Box<dyn Error>> {
    logging::init();
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return help::run(Vec::new());
    }

    let cmd = args.remove(0);
    match cmd.as_str() {
        "new" => new_entry(args)?,
        "colors" => list_colors(args)?,
        "help" | "--help" | "-h" => help::run(args)?,
        other => {
            eprintln!("Unknown command: {other}");
            help::run(Vec::new())?;
        }
    }

    Ok(())
}

fn load_settings(plain: bool) -> Settings {
    let mut settings = Settings::from_env();
    if plain {
        settings.use_color = false;
    }
    settings
}

fn new_entry(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let flags = SessionFlags::parse(args, "new", true)?;
    let settings = load_settings(flags.plain);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match flags.script {
        Some(path) => {
            let file = File::open(&path).map_err(|err| {
                format!("Could not open script {}: {err}", path.display())
            })?;
            debug!(path = %path.display(), "running entry script");
            EntrySession::new(settings).run(BufReader::new(file), &mut out)?;
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            EntrySession::new(settings)
                .with_echo(interactive)
                .run(stdin.lock(), &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn list_colors(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let flags = SessionFlags::parse(args, "colors", false)?;
    let settings = load_settings(flags.plain);
    let ctx = FormatContext::new(settings.use_color);
    println!("{}", ctx.format_palette(settings.palette.entries()));
    Ok(())
}

pub(crate) fn terminal_columns() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| usize::from(w))
}

fn terminal_rows() -> Option<usize> {
    terminal_size().map(|(_, Height(h))| usize::from(h))
}

/// Print `lines`, through `$PAGER` (default `less -R`) when they overflow an
/// interactive terminal.
pub(crate) fn paginate_and_print(lines: &[String]) -> io::Result<()> {
    let stdout = io::stdout();
    let fits = terminal_rows().is_none_or(|rows| lines.len() < rows);
    if fits || !stdout.is_terminal() {
        return print_lines(lines);
    }

    let pager = env::var("PAGER").unwrap_or_else(|_| "less -R".to_string());
    let mut parts = pager.split_whitespace();
    let Some(program) = parts.next() else {
        return print_lines(lines);
    };
    let spawned = Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn();
    let mut child = match spawned {
        Ok(child) => child,
        Err(err) => {
            debug!(%err, pager = %pager, "pager unavailable");
            return print_lines(lines);
        }
    };
    if let Some(mut input) = child.stdin.take() {
        for line in lines {
            if writeln!(input, "{line}").is_err() {
                break;
            }
        }
    }
    child.wait()?;
    Ok(())
}

fn print_lines(lines: &[String]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
