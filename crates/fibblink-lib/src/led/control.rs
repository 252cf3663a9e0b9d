//! LED controller — trigger setup on acquire, restore on release.

use std::path::Path;

use super::backend::{LedBackend, Result};
use super::paths::{Brightness, Indicator, LedPaths, Trigger};

/// Fixed stderr line for every failed control write, printed whatever the log level.
pub const OPEN_FAILURE_MESSAGE: &str = "Failed to open LED port for writing!";

/// Owns a backend and the control paths of both indicators.
pub struct LedController<B> {
    backend: B,
    paths: LedPaths,
}

impl<B: LedBackend> LedController<B> {
    pub fn new(backend: B, paths: LedPaths) -> Self {
        LedController { backend, paths }
    }

    /// Controller over the fixed sysfs paths.
    pub fn with_default_paths(backend: B) -> Self {
        Self::new(backend, LedPaths::default())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn paths(&self) -> &LedPaths {
        &self.paths
    }

    /// Single write of `value` to `path`. Failures are reported on stderr and
    /// returned; the caller decides whether they matter.
    pub fn set_value(&self, path: &Path, value: &str) -> Result<()> {
        log::trace!("write {:?} -> {}", value, path.display());
        self.backend.set_value(path, value).inspect_err(|e| {
            eprintln!("{OPEN_FAILURE_MESSAGE}");
            log::debug!("{e}");
        })
    }

    fn set_trigger(&self, indicator: Indicator, trigger: Trigger) -> Result<()> {
        self.set_value(&self.paths.get(indicator).trigger, trigger.as_str())
    }

    /// Best-effort brightness write; a failure is logged by [`Self::set_value`] only.
    pub fn set_brightness(&self, indicator: Indicator, brightness: Brightness) {
        let _ = self.set_value(&self.paths.get(indicator).brightness, brightness.as_str());
    }

    /// Take manual control of both LEDs.
    ///
    /// ACT is switched to the `cpu0` trigger and PWR to `gpio`. The first
    /// failing write aborts the rest without rolling back. On success both
    /// LEDs are turned off as a known starting state.
    pub fn acquire(&self) -> Result<()> {
        self.set_trigger(Indicator::Act, Trigger::Cpu0)?;
        self.set_trigger(Indicator::Pwr, Trigger::Gpio)?;
        self.set_brightness(Indicator::Act, Brightness::Off);
        self.set_brightness(Indicator::Pwr, Brightness::Off);
        log::debug!("LEDs acquired");
        Ok(())
    }

    /// Hand the LEDs back: ACT to `mmc0` disk activity, PWR to `off` and lit.
    ///
    /// Brightness is only touched when both trigger writes succeed.
    pub fn release(&self) -> Result<()> {
        self.set_trigger(Indicator::Act, Trigger::Mmc0)?;
        self.set_trigger(Indicator::Pwr, Trigger::Off)?;
        self.set_brightness(Indicator::Act, Brightness::Off);
        self.set_brightness(Indicator::Pwr, Brightness::On);
        log::debug!("LEDs released");
        Ok(())
    }
}
