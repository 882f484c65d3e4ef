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

/// Filter used when neither the command line, `RUST_LOG` nor the config
/// file name one. Warnings only, so reports stay readable.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// --- Formatter ---

/// `<local time> <LEVEL> <target>: <fields>`, coloured when ANSI is enabled.
struct LocalTimeFormat;

impl<S, N> FormatEvent<S, N> for LocalTimeFormat
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
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if ansi {
            let colour = match *meta.level() {
                Level::ERROR => "1;31",
                Level::WARN => "1;33",
                Level::INFO => "1;32",
                Level::DEBUG => "1;34",
                Level::TRACE => "1;35",
            };
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m \x1b[{colour}m{:>5}\x1b[0m \x1b[36m{}\x1b[0m: ",
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Public API ---

/// Picks the log filter.
///
/// Precedence: `cli_level`, then `RUST_LOG`, then `config_level`, then
/// [`DEFAULT_LOG_LEVEL`]. Accepts bare levels or full `EnvFilter` directives.
pub fn build_filter(
    cli_level: Option<&str>,
    config_level: Option<&str>,
) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"));
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = config_level.unwrap_or(DEFAULT_LOG_LEVEL);
    EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}' in config"))
}

/// Installs the global subscriber. Call once at startup.
///
/// - Stderr: coloured when attached to a terminal, plain when redirected.
///   Stdout is left to the report output.
/// - File: plain text appended to `log_file` when one is given. The directory
///   must already exist.
pub fn init_logging(
    filter: EnvFilter,
    log_file: Option<&Path>,
) -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LocalTimeFormat)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}
