use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install the `env_logger` backend once per process.
///
/// `level` applies to this crate; `RUST_LOG` still overrides it.
pub fn initialize_logger(level: LevelFilter) {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("hashchain", level)
            .format_timestamp_millis()
            .parse_default_env();

        // Another logger may already be installed by a test harness
        let _ = builder.try_init();
    });
}

#[cfg(test)]
mod tests {
    use log::{debug, info};

    use super::*;

    #[test]
    fn test_logging_levels() {
        initialize_logger(LevelFilter::Debug);
        // Second call is a no-op
        initialize_logger(LevelFilter::Error);
        debug!("Debug message in test");
        info!("Info message in test");
    }
}
