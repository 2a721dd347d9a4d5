//! Logger setup, done once from `main`.

/// Log level for a run: everything with `--debug`, warnings only otherwise.
pub fn level_filter(debug: bool) -> log::LevelFilter {
    if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    }
}

pub fn init_logger(debug: bool) {
    env_logger::Builder::new().filter_level(level_filter(debug)).init();
}
