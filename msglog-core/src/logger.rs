//! Tracing initialization: one fmt layer writing the same lines to stdout and an append-only log file.

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{
    fmt::{format::FmtSpan, writer::MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directives` (e.g. `info` or
/// `msglog_api=debug,storage=info`) decides what is recorded. `.env` must be loaded first.
pub fn init_tracing(log_file_path: &str, default_directives: &str) -> anyhow::Result<()> {
    let env_filter = filter_from(env::var(EnvFilter::DEFAULT_ENV).ok(), default_directives)?;
    let file = open_log_file(Path::new(log_file_path))?;
    let writer = io::stdout.and(Arc::new(file));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

fn filter_from(rust_log: Option<String>, default_directives: &str) -> anyhow::Result<EnvFilter> {
    match rust_log.filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => EnvFilter::try_new(&raw).with_context(|| format!("Invalid RUST_LOG {:?}", raw)),
        None => EnvFilter::try_new(default_directives)
            .with_context(|| format!("Invalid log level {:?}", default_directives)),
    }
}

fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Create log directory {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_filter_falls_back_to_default_directives() {
        let filter = filter_from(None, "debug").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = filter_from(Some("  ".to_string()), "warn").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_filter_prefers_rust_log() {
        let filter = filter_from(Some("trace".to_string()), "info").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_filter_rejects_unknown_level() {
        assert!(filter_from(None, "storage=loud").is_err());
    }

    #[test]
    fn test_open_log_file_creates_parent_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("msglog.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
