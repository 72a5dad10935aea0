use serde::{Deserialize, Serialize};

/// Shown instead of the real value for password fields.
pub const PASSWORD_MASK: &str = "***";

/// Events dispatched after a fill so client-side validation reacts.
pub const VALIDATION_EVENTS: &[&str] = &["change", "blur"];

/// Click count that selects the whole existing value before typing.
pub const SELECT_ALL_CLICKS: u32 = 3;

/// One field that was successfully filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillResult {
    pub selector: String,
    /// Semantic type (generic path) or matched data key (site handlers).
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No data resolved for the field
    NoValue,
    /// File inputs are never filled by the generic path
    FileInput,
    /// Checkbox/radio value is falsy, so it stays unchecked
    Falsy,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoValue => "no_value",
            SkipReason::FileInput => "file_input",
            SkipReason::Falsy => "falsy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    /// Field was filled; carries the value as it should be displayed
    Filled(String),
    Skipped(SkipReason),
}

/// Timing knobs for one automation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillConfig {
    /// Lower bound of the per-keystroke delay
    #[serde(default = "default_delay_min")]
    pub typing_delay_min_ms: u64,

    /// Upper bound of the per-keystroke delay (inclusive)
    #[serde(default = "default_delay_max")]
    pub typing_delay_max_ms: u64,

    /// How long to wait for each field to become available
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_ms: u64,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            typing_delay_min_ms: default_delay_min(),
            typing_delay_max_ms: default_delay_max(),
            wait_timeout_ms: default_wait_timeout(),
        }
    }
}

impl FillConfig {
    /// No typing delay; for tests and fast local runs.
    pub fn instant() -> Self {
        Self {
            typing_delay_min_ms: 0,
            typing_delay_max_ms: 0,
            ..Self::default()
        }
    }

    /// Draw a keystroke delay from the configured range.
    pub fn typing_delay(&self) -> u64 {
        use rand::Rng;

        if self.typing_delay_max_ms <= self.typing_delay_min_ms {
            return self.typing_delay_min_ms;
        }
        rand::thread_rng().gen_range(self.typing_delay_min_ms..=self.typing_delay_max_ms)
    }
}

fn default_delay_min() -> u64 { 50 }
fn default_delay_max() -> u64 { 150 }
fn default_wait_timeout() -> u64 { 5000 }
