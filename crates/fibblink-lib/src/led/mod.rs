//! LED control — sysfs trigger/brightness writes, acquire and release.

mod backend;
mod control;
mod paths;

pub use backend::{LedBackend, LedError, Result, SysfsBackend, mock};
pub use control::{LedController, OPEN_FAILURE_MESSAGE};
pub use paths::{
    ACT_LED_BRIGHTNESS, ACT_LED_TRIGGER, Brightness, Indicator, IndicatorPaths, LedPaths,
    PWR_LED_BRIGHTNESS, PWR_LED_TRIGGER, Trigger,
};
