use serde::Deserialize;
use serde_json::{Number, Value};

/// Top-level shape of a Biome `--reporter=json` dump.
///
/// Individual diagnostics stay as raw JSON so that a malformed entry only
/// loses the fields it got wrong instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagnosticsDump {
    /// Counters reported by the linter for the whole run
    #[serde(default)]
    pub summary: ScanSummary,
    /// One entry per reported rule violation
    #[serde(default)]
    pub diagnostics: Vec<Value>,
}

/// Run-level counters, passed through to the report untouched.
///
/// Kept as JSON numbers so that whatever the linter wrote (`2`, `2.0`,
/// `0.42`) renders exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanSummary {
    #[serde(default = "zero")]
    pub errors: Number,
    #[serde(default = "zero")]
    pub warnings: Number,
    /// Files the linter visited without changing
    #[serde(default = "zero")]
    pub unchanged: Number,
    #[serde(default)]
    pub duration: ScanDuration,
}

impl Default for ScanSummary {
    fn default() -> Self {
        Self {
            errors: zero(),
            warnings: zero(),
            unchanged: zero(),
            duration: ScanDuration::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanDuration {
    #[serde(default = "zero")]
    pub secs: Number,
}

impl Default for ScanDuration {
    fn default() -> Self {
        Self { secs: zero() }
    }
}

fn zero() -> Number {
    Number::from(0u64)
}
