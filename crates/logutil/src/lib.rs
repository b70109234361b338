//! Utilities for logging.

use std::str::FromStr;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    HumanReadable,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" | "human_readable" | "text" => Ok(LogFormat::HumanReadable),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format: '{other}'")),
        }
    }
}

/// Configure the global logger.
///
/// `default_level` is used for anything not matched by a directive in
/// `RUST_LOG`. Calling this more than once is a no-op, the first subscriber
/// wins.
pub fn configure_global_logger<W>(default_level: tracing::Level, format: LogFormat, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true);

    let _ = match format {
        LogFormat::HumanReadable => builder.try_init(),
        LogFormat::Json => builder.json().with_ansi(false).try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_log_format() {
        assert_eq!(LogFormat::Json, "json".parse().unwrap());
        assert_eq!(LogFormat::HumanReadable, "human".parse().unwrap());
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn configure_twice_is_noop() {
        configure_global_logger(tracing::Level::DEBUG, LogFormat::HumanReadable, std::io::sink);
        configure_global_logger(tracing::Level::ERROR, LogFormat::Json, std::io::sink);
        tracing::debug!("still alive");
    }
}
