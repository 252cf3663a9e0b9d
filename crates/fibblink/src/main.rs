//! fibblink — blink the Fibonacci sequence on the board's status LEDs.

use clap::Parser;

mod cli;

fn main() {
    // `-?` predates clap's flags and must win before any parsing or LED I/O.
    if cli::is_usage_request(std::env::args().skip(1)) {
        print!("{}", cli::USAGE);
        return;
    }

    let args = cli::Args::parse();
    let (config, warnings) = args.resolve_config();

    let default_filter = if config.verbosity.is_all() {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    for w in warnings.iter().chain(config.warnings().iter()) {
        log::warn!("[config] {w}");
    }

    // Every run exits 0, including a failed LED setup.
    cli::run(&config);
}
