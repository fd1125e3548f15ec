use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,yearend=info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stderr,
    File(PathBuf),
}

/// The terminal UI owns stdout/stderr, so it only logs when given a file.
pub fn target_for(interactive: bool, log_file: Option<PathBuf>) -> LogTarget {
    match (log_file, interactive) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Off,
        (None, false) => LogTarget::Stderr,
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Keep the returned guard alive until exit so
/// buffered file output is flushed.
pub fn init(target: LogTarget) -> Result<Option<WorkerGuard>> {
    match target {
        LogTarget::Off => Ok(None),
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init();
            Ok(None)
        }
        LogTarget::File(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log path {} has no file name", path.display()))?;
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log dir {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(writer)
                .try_init();
            Ok(Some(guard))
        }
    }
}
