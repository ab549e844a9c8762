use std::fs::File;
use std::io::stderr;
use std::path::Path;
use std::sync::{LazyLock, Mutex};

use chrono::Local;
use miette::{Context, IntoDiagnostic};
use tracing::level_filters::LevelFilter;
use tracing::{Level, debug, warn};
use tracing_appender::non_blocking;
use tracing_subscriber::reload;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, reload::Handle, util::SubscriberInitExt,
};

const LOG_DIR: &str = "/tmp/kpk_logs";

pub trait LogHandle: Send + Sync {
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()>;
}

impl<S> LogHandle for Handle<EnvFilter, S>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()> {
        self.modify(|current| *current = new_filter)
            .into_diagnostic()
    }
}

pub struct LogHandles {
    console_handle: Mutex<Box<dyn LogHandle>>,
    /// None when the log file could not be created
    file_handle: Option<Mutex<Box<dyn LogHandle>>>,
}

fn open_log_file() -> miette::Result<File> {
    let log_dir = Path::new(LOG_DIR);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)
            .into_diagnostic()
            .with_context(|| format!("Failed to create log directory {LOG_DIR}"))?;
    }

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let log_filename = log_dir.join(format!("kpk_{timestamp}.log"));
    File::create(&log_filename)
        .into_diagnostic()
        .with_context(|| format!("Failed to create log file: {}", log_filename.display()))
}

static LOG_HANDLES: LazyLock<LogHandles> = LazyLock::new(|| {
    #[cfg(feature = "dev-tools")]
    color_backtrace::install();

    // Console Layer with its own reloadable filter
    let console_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let (console_filter, console_handle) = reload::Layer::new(console_filter);
    let console_layer = fmt::layer()
        .without_time()
        .with_writer(stderr)
        .with_filter(console_filter);

    // File Layer with its own reloadable filter (initially off)
    let file_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();
    let (file_filter, file_handle) = reload::Layer::new(file_filter);

    let log_file = open_log_file();
    let file_layer = log_file.as_ref().ok().and_then(|file| {
        let file = file.try_clone().ok()?;
        let (non_blocking_writer, guard) = non_blocking(file);
        std::mem::forget(guard); // Keep the guard alive.
        Some(
            fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false) // No colors in file
                .with_filter(file_filter),
        )
    });
    let has_file = file_layer.is_some();

    let installed = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if let Err(e) = &log_file {
        warn!("File logging unavailable: {e:?}");
    }
    if installed.is_err() {
        debug!("A global subscriber was already installed");
    }

    LogHandles {
        console_handle: Mutex::new(Box::new(console_handle)),
        file_handle: has_file.then(|| Mutex::new(Box::new(file_handle) as Box<dyn LogHandle>)),
    }
});

pub fn set_log_level(level: Level) -> miette::Result<()> {
    let new_filter = EnvFilter::new(level.to_string());

    LOG_HANDLES
        .console_handle
        .lock()
        .map_err(|e| miette::miette!("Console log handle poisoned: {e}"))?
        .set_filter(new_filter)
        .with_context(|| format!("Failed to modify log filter to level: {level}"))
}

pub fn toggle_file_logging(enable: bool) -> miette::Result<()> {
    let new_filter = if enable {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("off")
    };

    let handle = LOG_HANDLES
        .file_handle
        .as_ref()
        .with_context(|| format!("File logging is unavailable, could not open a file in {LOG_DIR}"))?;

    handle
        .lock()
        .map_err(|e| miette::miette!("File log handle poisoned: {e}"))?
        .set_filter(new_filter)
        .context("Failed to modify log filter")
}

/// Initialize tracing and backtrace
pub fn init() {
    LazyLock::force(&LOG_HANDLES);
}
