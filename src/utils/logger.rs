use chrono::Local;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Dispatch;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::utils::error::Result;

/// Local wall-clock timestamps with millisecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct MillisTimer;

impl FormatTime for MillisTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("student_roster=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("student_roster=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Build a dispatcher that appends records to `path`.
///
/// The returned [`Dispatch`] is not installed; hand it to
/// [`crate::RosterContext`] or call [`tracing::dispatcher::set_global_default`].
pub fn file_dispatch(path: impl AsRef<Path>, level: &str, format: LogFormat) -> Result<Dispatch> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::new(format!("student_roster={}", level));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_timer(MillisTimer)
        .with_ansi(false)
        .with_target(false);

    let dispatch = match format {
        LogFormat::Compact => Dispatch::new(tracing_subscriber::registry().with(filter).with(layer)),
        LogFormat::Json => {
            Dispatch::new(tracing_subscriber::registry().with(filter).with(layer.json()))
        }
    };
    Ok(dispatch)
}
