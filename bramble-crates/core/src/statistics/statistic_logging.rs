//! Process-wide configuration of how statistics are written.
//!
//! Nothing is written until [`configure_statistic_logging`] has been called; the first
//! configuration wins.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

/// Every statistic is written as `{prefix} {name}={value}`, optionally followed by a closing
/// line once a block of statistics is complete.
pub struct StatisticOptions {
    statistic_prefix: String,
    after_statistics: Option<String>,
    statistics_casing: Option<Case>,
    statistics_writer: Box<dyn Write + Send>,
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("statistic_prefix", &self.statistic_prefix)
            .field("after_statistics", &self.after_statistics)
            .field("statistics_casing", &self.statistics_casing)
            .field("statistics_writer", &"<Writer>")
            .finish()
    }
}

impl StatisticOptions {
    fn write_line(&mut self, line: impl Display) {
        let _ = writeln!(self.statistics_writer, "{line}");
    }
}

static STATISTIC_OPTIONS: OnceLock<Mutex<StatisticOptions>> = OnceLock::new();

/// Configures the logging of the statistics.
///
/// `prefix` starts every statistic line and `after` is the closing line written by
/// [`log_statistic_postfix`]. Names are converted to `casing` when it is given. Statistics go to
/// stdout unless another `writer` is provided.
pub fn configure_statistic_logging(
    prefix: impl Into<String>,
    after: Option<&str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send>>,
) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        Mutex::new(StatisticOptions {
            statistic_prefix: prefix.into(),
            after_statistics: after.map(ToOwned::to_owned),
            statistics_casing: casing,
            statistics_writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

/// Logs the statistic `name` with `value`, if statistic logging is configured.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(lock) = STATISTIC_OPTIONS.get() else {
        return;
    };
    let Ok(mut options) = lock.lock() else {
        return;
    };

    let name = match options.statistics_casing {
        Some(casing) => name.to_string().to_case(casing),
        None => name.to_string(),
    };
    let line = format!("{} {name}={value}", options.statistic_prefix);
    options.write_line(line);
}

/// Writes the closing line of a block of statistics, if one is configured.
pub fn log_statistic_postfix() {
    let Some(lock) = STATISTIC_OPTIONS.get() else {
        return;
    };
    let Ok(mut options) = lock.lock() else {
        return;
    };

    if let Some(after) = options.after_statistics.clone() {
        options.write_line(after);
    }
}

/// Whether [`configure_statistic_logging`] has been called.
pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
