//! Rounding-mode configuration and its process-wide, lazily resolved selector.

use crate::error::RescaleError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Environment variable selecting the rounding mode. `EV` picks [`RoundingMode::EvenRound`].
pub const MODE_ENV: &str = "TF_QUANTIZED_ROUND";
/// Environment variable enabling trace output when set to any non-empty value.
pub const TRACE_ENV: &str = "TF_SHOW_DATA";

/// The setting value recognized as [`RoundingMode::EvenRound`].
pub const EVEN_ROUND_SETTING: &str = "EV";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Single rounding shift, ties toward +inf.
    #[default]
    Baseline,
    /// Round-to-even path.
    EvenRound,
}

impl RoundingMode {
    /// Lenient resolution of a raw environment setting.
    ///
    /// Unset or empty selects `Baseline` silently. Anything other than `EV` also selects
    /// `Baseline` but logs a warning; callers that memoize the result warn only once.
    pub fn from_setting(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => RoundingMode::Baseline,
            Some(EVEN_ROUND_SETTING) => RoundingMode::EvenRound,
            Some(other) => {
                warn!("Unrecognized rounding mode {:?}, using baseline", other);
                RoundingMode::Baseline
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::Baseline => "baseline",
            RoundingMode::EvenRound => "even",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Strict parsing for command lines and config files.
impl FromStr for RoundingMode {
    type Err = RescaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ev" | "even" | "even_round" => Ok(RoundingMode::EvenRound),
            "baseline" | "base" | "default" => Ok(RoundingMode::Baseline),
            _ => Err(RescaleError::UnknownMode(s.to_string())),
        }
    }
}

/// Trace flag semantics: any non-empty value enables.
pub fn trace_from_setting(raw: Option<&str>) -> bool {
    matches!(raw, Some(v) if !v.is_empty())
}

fn read_env(name: &str) -> Option<String> {
    // A value that is not valid unicode is still "set".
    std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
}

/// One-shot resolution of the rounding mode.
///
/// The first `get*` call reads the setting; every later call returns the cached mode
/// without consulting the source again. Concurrent first calls resolve exactly once.
pub struct ModeSelector {
    cell: OnceLock<RoundingMode>,
}

impl ModeSelector {
    pub const fn new() -> Self { Self { cell: OnceLock::new() } }

    /// Resolve from `TF_QUANTIZED_ROUND` on first use.
    pub fn get(&self) -> RoundingMode { self.get_or_resolve(|| read_env(MODE_ENV)) }

    /// Resolve from an arbitrary source on first use. `read` runs at most once.
    pub fn get_or_resolve<F>(&self, read: F) -> RoundingMode
    where
        F: FnOnce() -> Option<String>,
    {
        *self.cell.get_or_init(|| {
            let mode = RoundingMode::from_setting(read().as_deref());
            debug!("rounding mode resolved to {}", mode);
            mode
        })
    }

    /// The cached mode, if resolution already happened.
    pub fn resolved(&self) -> Option<RoundingMode> { self.cell.get().copied() }
}

impl Default for ModeSelector {
    fn default() -> Self { Self::new() }
}

static PROCESS_MODE: ModeSelector = ModeSelector::new();

/// The process-wide rounding mode, resolved from the environment on first use.
pub fn process_mode() -> RoundingMode { PROCESS_MODE.get() }

/// Explicit rescaling configuration, injectable instead of the process-wide settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescaleConfig {
    pub mode: RoundingMode,
    pub trace: bool,
}

impl RescaleConfig {
    pub fn new(mode: RoundingMode, trace: bool) -> Self { Self { mode, trace } }

    /// Read the environment now, without memoizing.
    pub fn from_env() -> Self {
        Self {
            mode: RoundingMode::from_setting(read_env(MODE_ENV).as_deref()),
            trace: trace_from_setting(read_env(TRACE_ENV).as_deref()),
        }
    }

    /// The memoized process-wide configuration.
    pub fn process() -> Self {
        Self { mode: process_mode(), trace: crate::trace::process_trace_enabled() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn setting_resolution() {
        assert_eq!(RoundingMode::from_setting(None), RoundingMode::Baseline);
        assert_eq!(RoundingMode::from_setting(Some("")), RoundingMode::Baseline);
        assert_eq!(RoundingMode::from_setting(Some("EV")), RoundingMode::EvenRound);
        // Case-sensitive, like the environment contract.
        assert_eq!(RoundingMode::from_setting(Some("ev")), RoundingMode::Baseline);
        assert_eq!(RoundingMode::from_setting(Some("nearest")), RoundingMode::Baseline);
    }

    #[test]
    fn strict_parse() {
        assert_eq!("EV".parse::<RoundingMode>().unwrap(), RoundingMode::EvenRound);
        assert_eq!("even".parse::<RoundingMode>().unwrap(), RoundingMode::EvenRound);
        assert_eq!("Baseline".parse::<RoundingMode>().unwrap(), RoundingMode::Baseline);
        assert_eq!(
            "nearest".parse::<RoundingMode>(),
            Err(RescaleError::UnknownMode("nearest".to_string()))
        );
    }

    #[test]
    fn trace_setting() {
        assert!(!trace_from_setting(None));
        assert!(!trace_from_setting(Some("")));
        assert!(trace_from_setting(Some("1")));
        assert!(trace_from_setting(Some("0")));
    }

    #[test]
    fn selector_reads_source_once() {
        let sel = ModeSelector::new();
        assert_eq!(sel.resolved(), None);
        let reads = Cell::new(0);
        let first = sel.get_or_resolve(|| { reads.set(reads.get() + 1); Some("EV".to_string()) });
        let second = sel.get_or_resolve(|| { reads.set(reads.get() + 1); None });
        assert_eq!(first, RoundingMode::EvenRound);
        assert_eq!(second, RoundingMode::EvenRound);
        assert_eq!(reads.get(), 1);
        assert_eq!(sel.resolved(), Some(RoundingMode::EvenRound));
    }

    #[test]
    fn config_serializes_snake_case() {
        let cfg = RescaleConfig::new(RoundingMode::EvenRound, true);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"mode":"even_round","trace":true}"#);
        let back: RescaleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
