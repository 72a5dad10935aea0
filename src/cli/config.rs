use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::autofill::fill_model::FillConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-autofill",
    version,
    about = "Detect job-application forms and autofill them from a profile"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format: console or json
    #[arg(long, default_value = "console", global = true)]
    pub format: String,

    /// Path to config file (default: form-autofill.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect forms in an HTML file and classify their fields
    Scan {
        /// HTML file to scan
        #[arg(long)]
        html: String,
    },

    /// Check whether a profile covers every required field
    Analyze {
        /// HTML file to scan
        #[arg(long)]
        html: String,

        /// Profile JSON/YAML file or backend URL
        #[arg(long)]
        profile: String,
    },

    /// Open a page in the driver and autofill it
    Fill {
        /// Page to fill
        #[arg(long)]
        url: String,

        /// Profile JSON/YAML file or backend URL
        #[arg(long)]
        profile: String,

        /// Fill even when required profile data is missing
        #[arg(long, default_value_t = false)]
        force: bool,

        /// Site handler to use regardless of host (e.g. synonym)
        #[arg(long)]
        handler: Option<String>,

        /// Minimum per-keystroke typing delay in ms
        #[arg(long)]
        typing_delay_min: Option<u64>,

        /// Maximum per-keystroke typing delay in ms
        #[arg(long)]
        typing_delay_max: Option<u64>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-autofill.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub autofill: FillConfig,
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    /// Host → site handler name, e.g. `boards.example.com: synonym`
    #[serde(default)]
    pub site_handlers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    #[serde(default = "default_node")]
    pub node: String,

    #[serde(default = "default_script")]
    pub script: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            node: default_node(),
            script: default_script(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Bearer token sent when the profile is fetched over HTTP
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_trace_path")]
    pub path: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_trace_path(),
        }
    }
}

// Serde default helpers
fn default_node() -> String { "node".to_string() }
fn default_script() -> String { "driver/autofill_driver.js".to_string() }
fn default_true() -> bool { true }
fn default_trace_path() -> String { "autofill_trace.jsonl".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-autofill.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

/// Merge CLI typing-delay overrides over the configured fill timings.
pub fn build_fill_config(
    base: &FillConfig,
    typing_delay_min: Option<u64>,
    typing_delay_max: Option<u64>,
) -> FillConfig {
    let mut config = base.clone();
    if let Some(min) = typing_delay_min {
        config.typing_delay_min_ms = min;
    }
    if let Some(max) = typing_delay_max {
        config.typing_delay_max_ms = max;
    }
    if config.typing_delay_max_ms < config.typing_delay_min_ms {
        config.typing_delay_max_ms = config.typing_delay_min_ms;
    }
    config
}
