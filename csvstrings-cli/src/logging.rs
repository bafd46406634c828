use std::path::Path;

use fern::Dispatch;
use log::LevelFilter;

/// Routes `log` records to stderr and, optionally, to an appended log file.
///
/// Progress is logged at `Info`; `verbose` adds per-row `Debug` records and
/// prefixes terminal lines with the record target.
pub fn setup_logger(verbose: bool, logfile: Option<&Path>) -> Result<(), fern::InitError> {
    let terminal = Dispatch::new()
        .format(move |out, message, record| {
            let (color, reset) = match record.level() {
                log::Level::Error => ("\x1b[31m", "\x1b[0m"), // Red
                log::Level::Warn => ("\x1b[33m", "\x1b[0m"),  // Yellow
                log::Level::Info | log::Level::Debug | log::Level::Trace => ("", ""),
            };
            out.finish(format_args!(
                "{}{}: {}{}",
                color,
                record.level(),
                if verbose {
                    format!("({}) {}", record.target(), message)
                } else {
                    message.to_string()
                },
                reset
            ))
        })
        .chain(std::io::stderr());

    let mut logger = Dispatch::new()
        .level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .chain(terminal);

    if let Some(path) = logfile {
        let file = Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} [{}] {}",
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .chain(fern::log_file(path)?);
        logger = logger.chain(file);
    }

    logger.apply()?;
    Ok(())
}
