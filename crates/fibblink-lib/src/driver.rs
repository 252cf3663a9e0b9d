//! Sequence driver — acquire, start marker, Fibonacci loop, end marker, release.

use std::io::Write;

use crate::config::Config;
use crate::fibonacci::terms_up_to;
use crate::led::{LedBackend, LedController, LedError};
use crate::timing::{Sequencer, Sleeper};

/// Spacing blinks framing the whole run.
pub const MARKER_BLINKS: u32 = 5;

/// Spacing blinks before each counting group.
pub const GROUP_SEPARATOR_BLINKS: u32 = 2;

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Full sequence ran; `groups` holds each counting group's size in order.
    Completed { groups: Vec<u64> },
    /// LED setup failed; nothing blinked and nothing was released.
    AcquireFailed(LedError),
}

/// Run the full blink sequence, printing diagnostics to stdout.
///
/// `START → acquire → 5 spacing → loop { 2 spacing, N counting } → 5 spacing → release`.
/// A failed acquire skips straight to the end. Release failures are logged only.
pub fn run<B: LedBackend, S: Sleeper>(
    config: &Config,
    leds: &LedController<B>,
    sleeper: &S,
) -> RunOutcome {
    run_with_output(config, leds, sleeper, std::io::stdout())
}

/// [`run`] with verbosity-gated diagnostics written to `out`.
pub fn run_with_output<B: LedBackend, S: Sleeper, W: Write>(
    config: &Config,
    leds: &LedController<B>,
    sleeper: &S,
    out: W,
) -> RunOutcome {
    if let Err(e) = leds.acquire() {
        log::debug!("acquire failed, skipping sequence: {e}");
        return RunOutcome::AcquireFailed(e);
    }

    let mut seq = Sequencer::new(leds, sleeper, config, out);
    let mut groups = Vec::new();

    seq.spacing_group(MARKER_BLINKS);

    for term in terms_up_to(config.bound) {
        seq.spacing_group(GROUP_SEPARATOR_BLINKS);
        seq.counting_group(term);
        groups.push(term);
    }

    seq.spacing_group(MARKER_BLINKS);

    if let Err(e) = leds.release() {
        log::warn!("LED release incomplete: {e}");
    }

    RunOutcome::Completed { groups }
}
