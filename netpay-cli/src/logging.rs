use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::settings::LoggingSettings;

// --- Formatter ---

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// One line per event: local timestamp, level, target, then the fields.
struct EventLine;

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Writes `text` wrapped in `color` when the writer takes ANSI escapes.
fn paint(
    writer: &mut Writer<'_>,
    color: &str,
    text: impl std::fmt::Display,
) -> std::fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{color}{text}{RESET}")
    } else {
        write!(writer, "{text}")
    }
}

impl<S, N> FormatEvent<S, N> for EventLine
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

        paint(&mut writer, DIM, stamp)?;
        write!(writer, " ")?;
        paint(&mut writer, level_color(meta.level()), format_args!("{:<5}", meta.level()))?;
        write!(writer, " ")?;
        paint(&mut writer, CYAN, format_args!("{}:", meta.target()))?;
        write!(writer, " ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Filter selection ---

/// Builds the level filter.
///
/// Precedence: the `--log-level` flag, then `RUST_LOG`, then the settings file.
pub fn make_filter(
    cli_level: Option<&str>,
    settings_level: &str,
) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{level}'"));
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(settings_level)
        .with_context(|| format!("invalid log level '{settings_level}' in settings"))
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

// --- Public API ---

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped. Reports go
///   to stdout, so log lines never mix into them.
/// - File: enabled when the settings name one; always plain.
/// - Level: see [`make_filter`].
pub fn init_logging(
    cli_level: Option<&str>,
    settings: &LoggingSettings,
) -> Result<()> {
    let filter = make_filter(cli_level, &settings.level)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(EventLine)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = match &settings.file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(EventLine)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}
