//! Binary entry point for the subtitle editor.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use srtedit_core::editor::{self, DEFAULT_WRAP_WIDTH};
use srtedit_core::{srt, Entry, EntryCollection, SrtTime, TimeUnit};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command line options for the binary.
#[derive(Parser)]
#[command(name = "srtedit", version, about = "Read, edit and write SRT subtitle files")]
struct Cli {
    /// Enable verbose debug and trace logs.
    #[arg(long, global = true)]
    debug: bool,

    /// Write edits to this file instead of back to the input file.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every subtitle.
    Show {
        input: PathBuf,

        /// Print the subtitles as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Shift subtitle start and end times.
    Shift {
        input: PathBuf,

        #[arg(long, value_enum)]
        unit: Unit,

        /// Amount to add; negative values move subtitles earlier.
        #[arg(long, allow_negative_numbers = true)]
        delta: i32,

        /// Only shift this subtitle.
        #[arg(long)]
        number: Option<u32>,
    },

    /// Re-break subtitle text into lines no wider than `width`.
    Wrap {
        input: PathBuf,

        #[arg(long, default_value_t = DEFAULT_WRAP_WIDTH)]
        width: usize,

        /// Only rewrap this subtitle.
        #[arg(long)]
        number: Option<u32>,
    },

    /// Add a subtitle after the last one.
    Append {
        input: PathBuf,

        #[command(flatten)]
        subtitle: NewSubtitle,
    },

    /// Insert a subtitle at `at`, renumbering the ones after it.
    Insert {
        input: PathBuf,

        #[arg(long)]
        at: u32,

        #[command(flatten)]
        subtitle: NewSubtitle,
    },

    /// Insert a subtitle before the first one.
    Prepend {
        input: PathBuf,

        #[command(flatten)]
        subtitle: NewSubtitle,
    },

    /// Remove a subtitle, renumbering the ones after it.
    Remove { input: PathBuf, number: u32 },

    /// Replace the times and text of an existing subtitle.
    Update {
        input: PathBuf,
        number: u32,

        #[command(flatten)]
        subtitle: NewSubtitle,
    },
}

/// Timing and text for a subtitle given on the command line.
#[derive(Args)]
struct NewSubtitle {
    /// Start time as HH:MM:SS,mmm.
    #[arg(long)]
    start: SrtTime,

    /// End time as HH:MM:SS,mmm.
    #[arg(long)]
    end: SrtTime,

    /// One argument per text line.
    #[arg(required = true)]
    text: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Unit {
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl From<Unit> for TimeUnit {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Hour => TimeUnit::Hour,
            Unit::Minute => TimeUnit::Minute,
            Unit::Second => TimeUnit::Second,
            Unit::Millisecond => TimeUnit::Millisecond,
        }
    }
}

/// Application entry point which parses CLI args and performs actions.
/// This function should initialize logging and delegate to the core library.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.debug {
        EnvFilter::default()
            .add_directive("srtedit=trace".parse()?)
            .add_directive("srtedit_core=trace".parse()?)
            .add_directive("info".parse()?)
    } else {
        EnvFilter::default()
            .add_directive("srtedit=info".parse()?)
            .add_directive("srtedit_core=info".parse()?)
            .add_directive("warn".parse()?)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    run(cli.command, cli.output.as_deref(), &mut io::stdout().lock())
}

/// Execute one command. Editing commands read the input, apply the edit and
/// write the result to `output`, or back to the input when it is `None`.
fn run(command: Command, output: Option<&Path>, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Show { input, json } => {
            let entries = load(&input)?;
            if json {
                let list: Vec<&Entry> = entries.iter().collect();
                serde_json::to_writer_pretty(&mut *out, &list)?;
                writeln!(out)?;
            } else {
                print_entries(&entries, out)?;
            }
        }
        Command::Shift {
            input,
            unit,
            delta,
            number,
        } => edit(&input, output, |entries| {
            match number {
                Some(n) => editor::shift_time_at(entries, n, unit.into(), delta)?,
                None => editor::shift_all_times(entries, unit.into(), delta),
            }
            Ok(())
        })?,
        Command::Wrap {
            input,
            width,
            number,
        } => edit(&input, output, |entries| {
            match number {
                Some(n) => editor::rewrap_text_at(entries, n, width)?,
                None => editor::rewrap_all(entries, width),
            }
            Ok(())
        })?,
        Command::Append { input, subtitle } => edit(&input, output, |entries| {
            let number =
                editor::append_subtitle(entries, subtitle.start, subtitle.end, subtitle.text)?;
            info!("appended subtitle {number}");
            Ok(())
        })?,
        Command::Insert {
            input,
            at,
            subtitle,
        } => edit(&input, output, |entries| {
            editor::insert_subtitle(entries, at, subtitle.start, subtitle.end, subtitle.text)?;
            Ok(())
        })?,
        Command::Prepend { input, subtitle } => edit(&input, output, |entries| {
            editor::prepend_subtitle(entries, subtitle.start, subtitle.end, subtitle.text)?;
            Ok(())
        })?,
        Command::Remove { input, number } => edit(&input, output, |entries| {
            editor::remove_subtitle(entries, number)?;
            Ok(())
        })?,
        Command::Update {
            input,
            number,
            subtitle,
        } => edit(&input, output, |entries| {
            let entry = Entry::new(number, subtitle.start, subtitle.end, subtitle.text);
            editor::update_subtitle(entries, entry)?;
            Ok(())
        })?,
    }
    Ok(())
}

/// Read `input`, apply `change` and write the result.
fn edit<F>(input: &Path, output: Option<&Path>, change: F) -> Result<()>
where
    F: FnOnce(&mut EntryCollection) -> Result<()>,
{
    let mut entries = load(input)?;
    change(&mut entries)?;
    let target = output.unwrap_or(input);
    replace(target, &entries).with_context(|| format!("failed to write {}", target.display()))?;
    info!("wrote {} subtitles to {}", entries.len(), target.display());
    Ok(())
}

/// Write `entries` next to `target` and rename the result over it, so
/// `target` is either left alone or fully replaced.
fn replace(target: &Path, entries: &EntryCollection) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    if let Ok(meta) = std::fs::metadata(target) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    debug!("staging {} in {}", target.display(), tmp.path().display());
    srt::write_to(BufWriter::new(tmp.as_file_mut()), entries)?;
    tmp.persist(target)?;
    Ok(())
}

fn load(path: &Path) -> Result<EntryCollection> {
    info!("reading {}", path.display());
    srt::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// One subtitle per line: number, time range and text joined with ` | `.
fn print_entries(entries: &EntryCollection, out: &mut impl Write) -> Result<()> {
    for entry in entries {
        writeln!(
            out,
            "{:>4}  {} --> {}  {}",
            entry.number,
            entry.start,
            entry.end,
            entry.lines.join(" | ")
        )?;
    }
    Ok(())
}
