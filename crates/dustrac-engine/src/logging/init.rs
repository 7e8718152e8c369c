use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Once;

use anyhow::{Context, Result};

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "dustrac_game=debug,wgpu=warn").
///
/// When `file` is set every record is appended to it; `echo` additionally
/// mirrors records to stderr.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub file: Option<PathBuf>,
    pub echo: bool,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            file: None,
            echo: true,
            timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// File-backed configuration with console echo and timestamps.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. The log file is opened before the logger is
/// installed so an unwritable path surfaces as an error instead of silently
/// losing records.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let file = match &config.file {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?,
        ),
        None => None,
    };

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        if config.timestamps {
            builder.format_timestamp_millis();
        } else {
            builder.format_timestamp(None);
        }

        match file {
            Some(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(Tee::new(
                    Some(file),
                    config.echo,
                ))));
            }
            None => {
                builder.write_style(config.write_style);
            }
        }

        builder.init();

        log::debug!("logging initialized");
    });

    Ok(())
}

/// Writer fanning out to an optional file and, when `echo` is set, stderr.
struct Tee<W: Write = File> {
    sink: Option<W>,
    echo: bool,
}

impl<W: Write> Tee<W> {
    fn new(sink: Option<W>, echo: bool) -> Self {
        Self { sink, echo }
    }
}

impl<W: Write> Write for Tee<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.echo {
            io::stderr().write_all(buf)?;
        }
        if let Some(sink) = &mut self.sink {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.echo {
            io::stderr().flush()?;
        }
        if let Some(sink) = &mut self.sink {
            sink.flush()?;
        }
        Ok(())
    }
}
