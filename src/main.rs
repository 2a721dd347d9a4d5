//! envp's main application entry point.
//! Parses the command line, sets up logging and hands the run to the library.

use envp::{
    cli::get_args,
    config::Config,
    error::{default_error_handler, Result},
    logger::init_logger,
    run,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.debug);

    if let Err(err) = Config::from_args(&args).and_then(|config| start(&config)) {
        default_error_handler(err);
    }
}

fn start(config: &Config) -> Result<()> {
    log::debug!("Starting with {:?}.", config);
    run(config)
}
