//! Logger setup.
//!
//! Everything in the crate logs through the `log` facade; this installs the
//! `fern` backend that prints it.

use log::LevelFilter;

/// Installs a stdout logger filtering at `level`.
///
/// Fails if a global logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()?;

    log::debug!("logging initialized at {level}");
    Ok(())
}

/// Level used by the binary: verbose for debug builds, `Info` otherwise.
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
