use anyhow::Result;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc, writer::BoxMakeWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// 0 = warn, 1 = debug (hyper connection chatter suppressed), 2+ = trace
fn default_directives(verbose_level: u8) -> &'static str {
    match verbose_level {
        0 => "warn",
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
        _ => "trace",
    }
}

fn build_filter(verbose_level: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose_level)))
}

/// Daily-rotated appender; `logs/cinenos.log` rotates as `cinenos.YYYY-MM-DD`
fn file_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(log_dir)?;

    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename: {}", log_path.display()))?;
    let log_prefix = log_filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(log_filename);

    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix))
}

pub fn init_logging_with_file(verbose_level: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = build_filter(verbose_level, quiet);

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    // stdout is reserved for command output
    let (writer, ansi) = match log_file {
        Some(path) => (BoxMakeWriter::new(file_appender(&path)?), false),
        None => (BoxMakeWriter::new(io::stderr), io::stderr().is_terminal()),
    };

    let layer = if json {
        fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(ansi)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    };

    Registry::default().with(layer).try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_directives(0), "warn");
        assert!(default_directives(1).starts_with("debug"));
        assert_eq!(default_directives(5), "trace");
    }

    #[test]
    fn test_file_appender_creates_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_path = dir.path().join("logs").join("cinenos.log");

        file_appender(&log_path).unwrap();
        assert!(dir.path().join("logs").is_dir());
    }
}
