//! fibblink — encode the Fibonacci sequence as blinks on status LEDs.

pub mod config;
pub mod driver;
pub mod error;
pub mod fibonacci;
pub mod led;
pub mod timestamp;
pub mod timing;

pub use error::FibblinkError;
