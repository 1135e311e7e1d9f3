//! Process-wide `tracing` setup.
//!
//! Logging starts on stderr before anything else runs, so config loading can
//! report problems. The interactive screen then redirects output to the log
//! file, because the terminal belongs to the TUI from that point on.

use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, reload};

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Switches where log output goes after the subscriber is installed.
pub struct LogHandle(reload::Handle<OutputLayer, Registry>);

impl LogHandle {
    /// Append all further output to `path`, creating its directory if needed.
    pub fn redirect_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        let layer: OutputLayer = fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .boxed();
        self.0
            .reload(layer)
            .context("Failed to switch log output")?;
        Ok(())
    }
}

/// Stderr output, as for any CLI tool.
fn stderr_layer() -> OutputLayer {
    fmt::layer().with_writer(std::io::stderr).boxed()
}

/// `RUST_LOG` directives, with `info` as the floor.
fn default_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
}

/// Build a subscriber writing to stderr through a swappable output layer.
pub fn build(filter: EnvFilter) -> (impl Subscriber + Send + Sync + 'static, LogHandle) {
    let (output, handle) = reload::Layer::new(stderr_layer());
    let subscriber = Registry::default().with(output).with(filter);
    (subscriber, LogHandle(handle))
}

/// Install the global subscriber on stderr.
pub fn init_stderr() -> anyhow::Result<LogHandle> {
    let (subscriber, handle) = build(default_filter());
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;
    Ok(handle)
}
