//! Command-line surface — positional flags, usage text, run entry point.

use std::path::PathBuf;

use clap::Parser;

use fibblink_lib::config::Config;
use fibblink_lib::driver::{self, RunOutcome};
use fibblink_lib::led::{LedController, SysfsBackend};
use fibblink_lib::timing::ThreadSleeper;

/// Fixed text printed for `-?`.
pub const USAGE: &str = "\n\
\tARGV1 = Use ACT (0=False, 1=True) else use PWR LED for Spacing Blink.\n\
\tARGV2 = Use ACT (0=False, 1=True) else use PWR LED for Counting Blink.\n\
\tARGV3 = Enable Logging (0=None, 1=Minimal, 2=Detailed, 3=All)\n\
\tARGV4 = Sleep multiplier.\n\
\tARGV5 = Fibonacci Count.\n\
\n\n";

/// True when the first argument is exactly `-?`.
pub fn is_usage_request<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .next()
        .is_some_and(|first| first.as_ref() == "-?")
}

#[derive(Parser, Debug)]
#[command(
    name = "fibblink",
    version,
    about = "Blink the Fibonacci sequence on the ACT and PWR status LEDs",
    allow_negative_numbers = true
)]
pub struct Args {
    /// TOML file with default values (default: <config dir>/fibblink/config.toml).
    /// Must come before the positionals; after them every word is a value.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Nonzero: use the ACT LED for spacing blinks, zero: PWR [default: 0]
    #[arg(allow_hyphen_values = true)]
    pub spacing: Option<String>,

    /// Nonzero: use the ACT LED for counting blinks, zero: PWR [default: 0]
    #[arg(allow_hyphen_values = true)]
    pub counting: Option<String>,

    /// Logging: 0=none, 1=minimal, 2=detailed, 3=all [default: 0]
    #[arg(allow_hyphen_values = true)]
    pub verbosity: Option<String>,

    /// Sleep multiplier [default: 1]
    #[arg(allow_hyphen_values = true)]
    pub multiplier: Option<String>,

    /// Largest Fibonacci number to blink [default: 300]
    #[arg(allow_hyphen_values = true)]
    pub bound: Option<String>,

    #[arg(hide = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

impl Args {
    /// Positional values in order, stopping at the first absent one.
    pub fn positionals(&self) -> Vec<&str> {
        [
            &self.spacing,
            &self.counting,
            &self.verbosity,
            &self.multiplier,
            &self.bound,
        ]
        .into_iter()
        .map_while(|v| v.as_deref())
        .collect()
    }

    /// File defaults (explicit `--config` or the platform path) overridden by
    /// positionals. Returns the config and any file parse warnings.
    pub fn resolve_config(&self) -> (Config, Vec<String>) {
        let (base, warnings) = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load_with_warnings(),
        };
        (base.with_positionals(self.positionals().as_slice()), warnings)
    }
}

/// Drive the real LEDs through one full sequence.
pub fn run(config: &Config) {
    log::debug!(
        "spacing={} counting={} verbosity={} multiplier={} bound={}",
        config.spacing_led,
        config.counting_led,
        config.verbosity,
        config.multiplier,
        config.bound
    );

    let leds = LedController::with_default_paths(SysfsBackend);
    match driver::run(config, &leds, &ThreadSleeper) {
        RunOutcome::Completed { groups } => {
            log::info!("blinked {} Fibonacci groups", groups.len());
        }
        RunOutcome::AcquireFailed(e) => {
            log::debug!("LED setup failed, nothing blinked: {e}");
        }
    }
}
