//! Minimal CLI: check | normalize | calendar | schema
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use rayon::prelude::*;

use huiswerk_ical::homework::{self, Homework};
use huiswerk_ical::ics::{self, CalendarOptions};
use huiswerk_ical::welcome::{ROOT, WELCOME};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// validate Somtoday homework JSON and turn it into an iCalendar file
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// validate every input against the Welcome schema
    Check(CheckOut),
    /// parse one input and print it back as canonical wire JSON
    Normalize(NormalizeOut),
    /// write homework from the inputs to an .ics calendar
    Calendar(CalendarOut),
    /// print the JSON-schema-ish view of the bundled registry
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct NormalizeOut {
    /// input path or '-' for stdin
    #[arg(long, short)]
    input: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct CalendarOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .ics file
    #[arg(short, long, env = "HUISWERK_ICS_OUT", default_value = "calendar.ics")]
    out: PathBuf,

    /// calendar display name
    #[arg(long, env = "HUISWERK_CALENDAR_NAME", default_value = "Huiswerk")]
    name: String,

    /// IANA zone used for the previous-evening reminder
    #[arg(long, env = "HUISWERK_TIMEZONE", default_value = "Europe/Amsterdam")]
    timezone: String,

    /// local hour of the reminder on the day before
    #[arg(long, default_value_t = 17, value_parser = clap::value_parser!(u32).range(0..24))]
    reminder_hour: u32,

    /// event length
    #[arg(long, default_value_t = 60)]
    duration_minutes: i64,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    /// schema to use as the document root
    #[arg(long, default_value = ROOT)]
    root: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

struct Source {
    label: String,
    text: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Vec<Source>> {
        let mut sources = Vec::new();
        for raw in &self.input {
            if raw == "-" {
                sources.push(read_stdin()?);
                continue;
            }
            for path in resolve_file_path_patterns([raw])? {
                sources.push(read_file(&path)?);
            }
        }
        Ok(sources)
    }
}

impl CalendarOut {
    fn options(&self) -> Result<CalendarOptions> {
        let timezone = self
            .timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|error| anyhow::anyhow!("unknown time zone {:?}: {error}", self.timezone))?;
        Ok(CalendarOptions {
            name: self.name.clone(),
            timezone,
            reminder_hour: self.reminder_hour,
            duration: chrono::Duration::minutes(self.duration_minutes),
        })
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Check(target) => {
                let sources = target.input_settings.load()?;
                let failures = check_sources(&sources);
                tracing::info!(checked = sources.len(), failed = failures.len(), "check finished");
                Ok(if failures.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
            Command::Normalize(target) => {
                let source = if target.input == "-" {
                    read_stdin()?
                } else {
                    read_file(Path::new(&target.input))?
                };
                let welcome = huiswerk_ical::parse(&source.text)
                    .with_context(|| format!("invalid document: {}", source.label))?;
                let text = huiswerk_ical::serialize(&welcome)?;
                emit(target.out.as_deref(), &text)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Calendar(target) => {
                let options = target.options()?;
                let mut all: Vec<Homework> = Vec::new();
                for source in target.input_settings.load()? {
                    let welcome = huiswerk_ical::parse(&source.text)
                        .with_context(|| format!("invalid document: {}", source.label))?;
                    all.extend(homework::collect(&welcome));
                }
                let all = unique_by_identifier(all);
                let ics_src = ics::generate_ics(&all, &options);
                write_file(&target.out, &ics_src)?;
                tracing::info!(events = all.len(), out = %target.out.display(), "calendar written");
                Ok(ExitCode::SUCCESS)
            }
            Command::Schema(target) => {
                let schema = WELCOME.to_json_schema(&target.root)?;
                let schema_src = serde_json::to_string_pretty(&schema)?;
                emit(target.out.as_deref(), &schema_src)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn read_stdin() -> Result<Source> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
    Ok(Source { label: "<stdin>".to_string(), text })
}

fn read_file(path: &Path) -> Result<Source> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))?;
    Ok(Source { label: path.display().to_string(), text })
}

fn write_file(out: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
}

fn emit(out: Option<&Path>, contents: &str) -> Result<()> {
    match out {
        Some(out) => write_file(out, contents),
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}

/// Labels of the sources that do not parse. Uses the same typed `parse` as the other
/// subcommands so a ✅ here means `normalize` and `calendar` accept the file too.
fn check_sources(sources: &[Source]) -> Vec<String> {
    sources
        .par_iter()
        .map(|source| (source, huiswerk_ical::parse(&source.text)))
        .collect::<Vec<_>>()
        .into_iter()
        .filter_map(|(source, result)| match result {
            Ok(_) => {
                eprintln!("{} {}", "✅".green(), source.label);
                None
            }
            Err(error) => {
                eprintln!("{} {}: {error}", "❌".red(), source.label.bold());
                Some(source.label.clone())
            }
        })
        .collect()
}

/// One entry per identifier (first one wins), ordered by date. Identifiers become event UIDs.
fn unique_by_identifier(all: Vec<Homework>) -> Vec<Homework> {
    let mut by_id: IndexMap<String, Homework> = IndexMap::with_capacity(all.len());
    for hw in all {
        if by_id.contains_key(&hw.identifier) {
            tracing::debug!(identifier = %hw.identifier, "dropping duplicate homework");
            continue;
        }
        by_id.insert(hw.identifier.clone(), hw);
    }
    let mut unique: Vec<Homework> = by_id.into_values().collect();
    unique.sort_by(|a, b| (a.date, &a.identifier).cmp(&(b.date, &b.identifier)));
    unique
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
