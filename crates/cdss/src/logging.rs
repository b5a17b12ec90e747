use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// A writer factory that produces writers for the shared log file
#[derive(Clone)]
struct LogWriterFactory {
    file: Arc<Mutex<File>>,
}

impl LogWriterFactory {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

/// A writer that holds a reference to the shared file
struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl LogWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            file: self.file.clone(),
        }
    }
}

/// Default filter directive for a given level
fn default_filter(level: &str) -> String {
    format!("cdss={level},cdss_core=warn")
}

/// Initialize logging.
///
/// Logs go to stderr, or are appended to `log_file` when one is given. The
/// level applies to this crate; the engine logs at `warn` unless `RUST_LOG`
/// says otherwise.
pub fn init_logging(log_file: Option<&Path>, level: &str) -> color_eyre::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(LogWriterFactory::new(file))
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .init();

            tracing::info!("logging initialized (log_path={})", path.display());
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(io::stderr).with_target(true))
                .init();
        }
    }

    Ok(())
}
