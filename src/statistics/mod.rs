//! Logging of statistics as `<prefix><name>=<value>` lines on standard
//! output, in the comment style solver front-ends expect.

use std::fmt::Display;

use once_cell::sync::OnceCell;

static CONFIG: OnceCell<StatisticConfig> = OnceCell::new();

#[derive(Clone, Debug)]
struct StatisticConfig {
    enabled: bool,
    prefix: String,
}

/// Configure statistic logging. The first call wins; later calls are
/// ignored.
pub fn configure(enabled: bool, prefix: &str) {
    let _ = CONFIG.set(StatisticConfig {
        enabled,
        prefix: prefix.to_owned(),
    });
}

/// Print a single statistic when logging is configured and enabled.
pub fn log_statistic(name: &str, value: impl Display) {
    if let Some(config) = CONFIG.get() {
        if config.enabled {
            println!("{}{name}={value}", config.prefix);
        }
    }
}
