//! Run configuration — positional arguments over optional TOML defaults.
//!
//! The five values are resolved once at startup (file defaults, then
//! positional overrides) and the resulting [`Config`] is never mutated.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FibblinkError, Result};
use crate::led::Indicator;

/// Logging verbosity: 0 = none, 1 = minimal, 2 = detailed, 3+ = all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verbosity(pub i64);

impl Verbosity {
    /// Per-sleep `sec=…, msec=…` lines (minimal and all).
    pub fn logs_sleeps(self) -> bool {
        self.0 == 1 || self.0 > 2
    }

    /// Blink-group labels with timestamps (detailed and all).
    pub fn logs_labels(self) -> bool {
        self.0 >= 2
    }

    pub fn is_all(self) -> bool {
        self.0 >= 3
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.0 {
            i64::MIN..=0 => "none",
            1 => "minimal",
            2 => "detailed",
            _ => "all",
        };
        write!(f, "{} ({name})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LED used for spacing blinks. Default: PWR.
    pub spacing_led: Indicator,

    /// LED used for counting blinks. Default: PWR.
    pub counting_led: Indicator,

    pub verbosity: Verbosity,

    /// Scales every sleep. Default: 1. Zero or negative disables delays.
    pub multiplier: i64,

    /// Largest Fibonacci term to blink. Default: 300.
    pub bound: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            spacing_led: Indicator::Pwr,
            counting_led: Indicator::Pwr,
            verbosity: Verbosity(0),
            multiplier: 1,
            bound: 300,
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fibblink"))
    }

    /// Full path to the defaults file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Read and parse the defaults file at `path`.
    ///
    /// `Ok(None)` when the file doesn't exist; other read failures are
    /// [`FibblinkError::Io`], malformed TOML is [`FibblinkError::Config`].
    pub fn read_from(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&contents)
            .map(Some)
            .map_err(|e| FibblinkError::Config(e.to_string()))
    }

    /// Load defaults from an arbitrary path, returning the config and any warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file can't be read or parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match Self::read_from(path) {
            Ok(config) => (config.unwrap_or_default(), vec![]),
            Err(e) => {
                let kind = match &e {
                    FibblinkError::Config(_) => "parse",
                    FibblinkError::Io(_) => "read",
                };
                let warning = format!(
                    "config {kind} error ({}), using defaults: {e}",
                    path.display()
                );
                (Self::default(), vec![warning])
            }
        }
    }

    /// Load defaults from the platform path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Override fields with positional arguments, in order: spacing LED flag,
    /// counting LED flag, verbosity, multiplier, bound. Missing positions keep
    /// their current value; extra positions are ignored.
    pub fn with_positionals<S: AsRef<str>>(self, args: &[S]) -> Self {
        let mut values = args.iter().map(|a| parse_c_int(a.as_ref()));
        let mut config = self;
        if let Some(v) = values.next() {
            config.spacing_led = Indicator::from_flag(v);
        }
        if let Some(v) = values.next() {
            config.counting_led = Indicator::from_flag(v);
        }
        if let Some(v) = values.next() {
            config.verbosity = Verbosity(v);
        }
        if let Some(v) = values.next() {
            config.multiplier = v;
        }
        if let Some(v) = values.next() {
            config.bound = v;
        }
        config
    }

    /// Non-fatal oddities worth a warning before the run starts.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.multiplier <= 0 {
            warnings.push(format!(
                "sleep multiplier {} disables all blink delays",
                self.multiplier
            ));
        }
        if self.bound < 0 {
            warnings.push(format!(
                "Fibonacci bound {} is negative; only the start and end markers will blink",
                self.bound
            ));
        }
        warnings
    }
}

/// Parse an integer the way C `atoi` does: skip leading whitespace, accept an
/// optional sign, then read leading decimal digits. Anything unparsable is 0.
/// Out-of-range values saturate.
pub fn parse_c_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_c_int ──

    #[test]
    fn parse_plain_numbers() {
        assert_eq!(parse_c_int("0"), 0);
        assert_eq!(parse_c_int("300"), 300);
        assert_eq!(parse_c_int("-7"), -7);
        assert_eq!(parse_c_int("+12"), 12);
    }

    #[test]
    fn parse_leading_whitespace_and_trailing_garbage() {
        assert_eq!(parse_c_int("  42abc"), 42);
        assert_eq!(parse_c_int("\t5 6"), 5);
    }

    #[test]
    fn parse_garbage_is_zero() {
        assert_eq!(parse_c_int("abc"), 0);
        assert_eq!(parse_c_int(""), 0);
        assert_eq!(parse_c_int("-"), 0);
        assert_eq!(parse_c_int("-?"), 0);
    }

    #[test]
    fn parse_saturates() {
        assert_eq!(parse_c_int("99999999999999999999999"), i64::MAX);
        assert_eq!(parse_c_int("-99999999999999999999999"), i64::MIN);
    }

    // ── positionals ──

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.spacing_led, Indicator::Pwr);
        assert_eq!(c.counting_led, Indicator::Pwr);
        assert_eq!(c.verbosity, Verbosity(0));
        assert_eq!(c.multiplier, 1);
        assert_eq!(c.bound, 300);
    }

    #[test]
    fn no_positionals_keeps_defaults() {
        let args: [&str; 0] = [];
        assert_eq!(Config::default().with_positionals(&args), Config::default());
    }

    #[test]
    fn all_positionals() {
        let c = Config::default().with_positionals(&["1", "0", "2", "3", "50"]);
        assert_eq!(c.spacing_led, Indicator::Act);
        assert_eq!(c.counting_led, Indicator::Pwr);
        assert_eq!(c.verbosity, Verbosity(2));
        assert_eq!(c.multiplier, 3);
        assert_eq!(c.bound, 50);
    }

    #[test]
    fn partial_positionals_keep_rest() {
        let c = Config::default().with_positionals(&["0", "1"]);
        assert_eq!(c.counting_led, Indicator::Act);
        assert_eq!(c.multiplier, 1);
        assert_eq!(c.bound, 300);
    }

    #[test]
    fn extra_positionals_ignored() {
        let c = Config::default().with_positionals(&["0", "0", "0", "1", "10", "99", "x"]);
        assert_eq!(c.bound, 10);
    }

    #[test]
    fn positionals_override_file_values() {
        let file = Config {
            bound: 1000,
            multiplier: 5,
            ..Config::default()
        };
        let c = file.with_positionals(&["0", "0", "0", "2"]);
        assert_eq!(c.multiplier, 2);
        assert_eq!(c.bound, 1000);
    }

    // ── verbosity ──

    #[test]
    fn verbosity_levels() {
        assert!(!Verbosity(0).logs_sleeps());
        assert!(!Verbosity(0).logs_labels());
        assert!(Verbosity(1).logs_sleeps());
        assert!(!Verbosity(1).logs_labels());
        assert!(!Verbosity(2).logs_sleeps());
        assert!(Verbosity(2).logs_labels());
        assert!(Verbosity(3).logs_sleeps());
        assert!(Verbosity(3).logs_labels());
        assert!(Verbosity(7).is_all());
    }

    #[test]
    fn verbosity_display() {
        assert_eq!(Verbosity(0).to_string(), "0 (none)");
        assert_eq!(Verbosity(2).to_string(), "2 (detailed)");
        assert_eq!(Verbosity(9).to_string(), "9 (all)");
    }

    // ── file loading ──

    #[test]
    fn partial_toml_fills_defaults() {
        let c: Config = toml::from_str("bound = 21\nspacing_led = \"act\"").unwrap();
        assert_eq!(c.bound, 21);
        assert_eq!(c.spacing_led, Indicator::Act);
        assert_eq!(c.multiplier, 1);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn load_from_missing_file_gives_defaults_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let (c, warnings) = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(c, Config::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn load_from_malformed_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "bound = \"lots\"").unwrap();
        let (c, warnings) = Config::load_from(&path);
        assert_eq!(c, Config::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("config parse error"));
    }

    #[test]
    fn read_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::read_from(&dir.path().join("nope.toml")).unwrap().is_none());
    }

    #[test]
    fn read_from_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "multiplier = [").unwrap();
        let err = Config::read_from(&path).unwrap_err();
        assert!(matches!(err, FibblinkError::Config(_)));
        assert!(err.to_string().starts_with("Config error: "));
    }

    #[test]
    fn read_from_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::read_from(dir.path()).unwrap_err();
        assert!(matches!(err, FibblinkError::Io(_)));
    }

    #[test]
    fn load_from_unreadable_path_warns() {
        let dir = tempfile::tempdir().unwrap();
        let (c, warnings) = Config::load_from(dir.path());
        assert_eq!(c, Config::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("config read error ("));
        assert!(warnings[0].contains("I/O error: "));
    }

    #[test]
    fn load_from_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "verbosity = 2\nmultiplier = 3\ncounting_led = \"act\"\n").unwrap();
        let (c, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(c.verbosity, Verbosity(2));
        assert_eq!(c.multiplier, 3);
        assert_eq!(c.counting_led, Indicator::Act);
    }

    #[test]
    fn config_path_ends_with_toml() {
        if let Some(p) = Config::path() {
            assert!(p.ends_with("fibblink/config.toml"));
        }
    }

    // ── warnings ──

    #[test]
    fn default_has_no_warnings() {
        assert!(Config::default().warnings().is_empty());
    }

    #[test]
    fn zero_multiplier_and_negative_bound_warn() {
        let c = Config {
            multiplier: 0,
            bound: -1,
            ..Config::default()
        };
        assert_eq!(c.warnings().len(), 2);
    }
}
