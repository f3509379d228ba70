//! Stdout backend for the `log` facade.
//!
//! Lines carry the wall-clock milliseconds since `init`, the level and the
//! target module:
//!
//! ```text
//! [   1520 INFO  corner_pilot_sitl::runner] corner LeftBack, pose (-5.0, -10.0, 0.0)
//! ```

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

use crate::error::SimulatorError;

struct StdoutLogger {
    start: OnceLock<Instant>,
}

static LOGGER: StdoutLogger = StdoutLogger {
    start: OnceLock::new(),
};

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.start.get_or_init(Instant::now).elapsed().as_millis();
        let mut out = std::io::stdout().lock();
        // A closed stdout is not worth failing the simulation over
        let _ = writeln!(
            out,
            "[{:>7} {:<5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// Install the stdout logger with the given maximum level.
pub fn init(level: LevelFilter) -> Result<(), SimulatorError> {
    LOGGER.start.get_or_init(Instant::now);
    log::set_logger(&LOGGER).map_err(|e| SimulatorError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
