use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::autofill::fill_model::FillOutcome;
use crate::form::form_model::{FieldDescriptor, FormDescriptor};

/// One fill decision, written as a JSONL line.
#[derive(Debug, Serialize)]
pub struct FillTraceEvent {
    pub timestamp_ms: u128,
    pub handler: String,

    pub form_index: i64,
    pub form_fingerprint: String,
    pub selector: String,

    pub matched: Option<String>,
    pub outcome: String,
    pub error: Option<String>,
}

impl FillTraceEvent {
    pub fn now(handler: &str, form: &FormDescriptor, field: &FieldDescriptor) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            handler: handler.to_string(),
            form_index: form.index,
            form_fingerprint: form.fingerprint(),
            selector: field.selector.clone(),
            matched: None,
            outcome: "pending".to_string(),
            error: None,
        }
    }

    pub fn with_match(mut self, matched: impl ToString) -> Self {
        self.matched = Some(matched.to_string());
        self
    }

    pub fn with_outcome(mut self, outcome: &FillOutcome) -> Self {
        self.outcome = match outcome {
            FillOutcome::Filled(_) => "filled".to_string(),
            FillOutcome::Skipped(reason) => format!("skipped:{}", reason.as_str()),
        };
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.outcome = "failed".to_string();
        self.error = Some(error.to_string());
        self
    }
}
