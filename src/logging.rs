// In: src/logging.rs

//! Opt-in diagnostic logging for the bridge.
//!
//! The library only emits through the `log` facade. Front ends that want to see
//! those records call `enable_verbose_logging` once, which installs an
//! `env_logger` backend. Later calls are no-ops.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

static INIT_LOGGER: Once = Once::new();

/// Installs the logger at `Trace` level, writing to stderr or, if `log_file` is
/// given, appending to that file.
///
/// # Errors
/// Returns the I/O error if `log_file` cannot be opened for appending. No
/// logger is installed in that case.
pub fn enable_verbose_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(move || {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Trace);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        // Another logger may already own the facade; that is not our error.
        let _ = builder.try_init();
    });
    Ok(())
}
