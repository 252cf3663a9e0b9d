//! Fixed sysfs control paths and the values written to them.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const ACT_LED_TRIGGER: &str = "/sys/class/leds/led0/trigger";
pub const PWR_LED_TRIGGER: &str = "/sys/class/leds/led1/trigger";

pub const ACT_LED_BRIGHTNESS: &str = "/sys/class/leds/led0/brightness";
pub const PWR_LED_BRIGHTNESS: &str = "/sys/class/leds/led1/brightness";

/// One of the two board status LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    /// Activity LED (`led0`, green on a Raspberry Pi).
    Act,
    /// Power LED (`led1`, red on a Raspberry Pi).
    Pwr,
}

impl Indicator {
    /// Map a C-style boolean flag: nonzero selects ACT, zero selects PWR.
    pub fn from_flag(flag: i64) -> Self {
        if flag != 0 { Indicator::Act } else { Indicator::Pwr }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::Act => write!(f, "ACT"),
            Indicator::Pwr => write!(f, "PWR"),
        }
    }
}

/// Kernel LED trigger names used by this program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Blink with CPU 0 activity.
    Cpu0,
    /// Blink with SD card (mmc0) activity, the stock ACT LED trigger.
    Mmc0,
    /// Manual control through `brightness`.
    Gpio,
    /// No trigger; LED held at its brightness.
    Off,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::Cpu0 => "cpu0",
            Trigger::Mmc0 => "mmc0",
            Trigger::Gpio => "gpio",
            Trigger::Off => "off",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brightness {
    On,
    Off,
}

impl Brightness {
    pub fn as_str(self) -> &'static str {
        match self {
            Brightness::On => "1",
            Brightness::Off => "0",
        }
    }
}

/// Trigger and brightness control files of a single indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorPaths {
    pub trigger: PathBuf,
    pub brightness: PathBuf,
}

/// Control files of both indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedPaths {
    pub act: IndicatorPaths,
    pub pwr: IndicatorPaths,
}

impl Default for LedPaths {
    fn default() -> Self {
        LedPaths {
            act: IndicatorPaths {
                trigger: PathBuf::from(ACT_LED_TRIGGER),
                brightness: PathBuf::from(ACT_LED_BRIGHTNESS),
            },
            pwr: IndicatorPaths {
                trigger: PathBuf::from(PWR_LED_TRIGGER),
                brightness: PathBuf::from(PWR_LED_BRIGHTNESS),
            },
        }
    }
}

impl LedPaths {
    /// Relocate the fixed paths under `root`, e.g. a temp dir standing in for `/`.
    ///
    /// `LedPaths::under("/tmp/x")` yields `/tmp/x/sys/class/leds/led0/trigger`, etc.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let rebase = |p: &str| root.join(p.trim_start_matches('/'));
        LedPaths {
            act: IndicatorPaths {
                trigger: rebase(ACT_LED_TRIGGER),
                brightness: rebase(ACT_LED_BRIGHTNESS),
            },
            pwr: IndicatorPaths {
                trigger: rebase(PWR_LED_TRIGGER),
                brightness: rebase(PWR_LED_BRIGHTNESS),
            },
        }
    }

    pub fn get(&self, indicator: Indicator) -> &IndicatorPaths {
        match indicator {
            Indicator::Act => &self.act,
            Indicator::Pwr => &self.pwr,
        }
    }
}
