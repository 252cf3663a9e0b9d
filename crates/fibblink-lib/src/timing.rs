//! Blink timing — sleep primitive, counting/spacing blinks, blink groups.

use std::io::Write;
use std::time::Duration;

use crate::config::Config;
use crate::led::{Brightness, Indicator, LedBackend, LedController};
use crate::timestamp::Timestamp;

/// Nominal on/off hold of a counting blink.
pub const COUNTING_HOLD_MS: i64 = 200;

/// Nominal on/off hold of a spacing blink.
pub const SPACING_HOLD_MS: i64 = 1000;

// ── Sleeper ──

/// Blocking delay source.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the calling thread for the full duration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Recording sleeper for tests. Always compiled, hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct RecordingSleeper {
        pub sleeps: RefCell<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn total(&self) -> Duration {
            self.sleeps.borrow().iter().sum()
        }
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
        }
    }
}

/// Scale `ms` by `multiplier` and split into whole seconds plus remainder
/// milliseconds. Non-positive products mean no wait.
pub fn scaled_hold(ms: i64, multiplier: i64) -> (u64, u32) {
    let total = u64::try_from(ms.saturating_mul(multiplier)).unwrap_or(0);
    (total / 1000, (total % 1000) as u32)
}

fn sleep_line(secs: u64, msecs: u32) -> String {
    format!("sec={secs}, msec={msecs}")
}

fn label_line(label: &str, timestamp: &Timestamp) -> String {
    format!("{label}\t\t\t{timestamp}")
}

// ── Sequencer ──

/// Turns blink requests into LED writes and delays.
///
/// Verbosity-gated diagnostics go to `out` (stdout in the binary). A failed
/// diagnostic write never interrupts the sequence.
pub struct Sequencer<'a, B, S, W> {
    leds: &'a LedController<B>,
    sleeper: &'a S,
    config: &'a Config,
    out: W,
}

impl<'a, B: LedBackend, S: Sleeper, W: Write> Sequencer<'a, B, S, W> {
    pub fn new(leds: &'a LedController<B>, sleeper: &'a S, config: &'a Config, out: W) -> Self {
        Sequencer {
            leds,
            sleeper,
            config,
            out,
        }
    }

    /// Block for `ms * multiplier` milliseconds.
    pub fn sleep_ms(&mut self, ms: i64) {
        let (secs, msecs) = scaled_hold(ms, self.config.multiplier);
        if self.config.verbosity.logs_sleeps() {
            let _ = writeln!(self.out, "{}", sleep_line(secs, msecs));
        }
        self.sleeper
            .sleep(Duration::from_secs(secs) + Duration::from_millis(u64::from(msecs)));
    }

    /// Print a blink-group label with the current time (detailed verbosity).
    pub fn log_label(&mut self, label: &str) {
        if self.config.verbosity.logs_labels() {
            let _ = writeln!(self.out, "{}", label_line(label, &Timestamp::now()));
        }
    }

    fn blink(&mut self, indicator: Indicator, hold_ms: i64) {
        self.leds.set_brightness(indicator, Brightness::On);
        self.sleep_ms(hold_ms);
        self.leds.set_brightness(indicator, Brightness::Off);
        self.sleep_ms(hold_ms);
    }

    /// One short pulse on the counting LED.
    pub fn counting_blink(&mut self) {
        self.blink(self.config.counting_led, COUNTING_HOLD_MS);
    }

    /// One long pulse on the spacing LED.
    pub fn spacing_blink(&mut self) {
        self.blink(self.config.spacing_led, SPACING_HOLD_MS);
    }

    /// `n` spacing blinks, each labelled `Spacing blink: <i>`.
    pub fn spacing_group(&mut self, n: u32) {
        for i in 1..=n {
            self.log_label(&format!("Spacing blink: {i}"));
            self.spacing_blink();
        }
    }

    /// `count` counting blinks under a single `Counting blink: <count>` label.
    pub fn counting_group(&mut self, count: u64) {
        self.log_label(&format!("Counting blink: {count}"));
        for _ in 0..count {
            self.counting_blink();
        }
    }
}
