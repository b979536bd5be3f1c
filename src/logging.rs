use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;

/// Maps the `-v` count of the command line to a level; 0 means "not requested"
pub fn level_from_verbosity(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// Installs the global logger on stderr.
///
/// The level is `level` when given, else `RUST_LOG`, else warnings only.
pub fn init_logging(level: Option<LevelFilter>) {
    let log_level = level
        .or_else(|| {
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|v| v.parse::<LevelFilter>().ok())
        })
        .unwrap_or(LevelFilter::Warn);

    Builder::new()
        .filter_level(log_level)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
