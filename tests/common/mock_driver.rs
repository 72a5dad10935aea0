use std::collections::HashSet;

use form_autofill::driver::page_driver::PageDriver;
use form_autofill::error::AutofillError;

#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    Wait(String),
    Fill(String, String),
    Type(String, String, u64),
    Click(String, u32),
    Check(String),
    Select(String, String),
    Events(String, Vec<String>),
    Upload(String, String),
}

/// Records every primitive call. Selectors in `missing` time out; selectors in
/// `broken` fail every action after the wait.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub calls: Vec<DriverCall>,
    pub missing: HashSet<String>,
    pub broken: HashSet<String>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(mut self, selector: &str) -> Self {
        self.missing.insert(selector.to_string());
        self
    }

    pub fn with_broken(mut self, selector: &str) -> Self {
        self.broken.insert(selector.to_string());
        self
    }

    /// Calls made against one selector, in order.
    pub fn calls_for(&self, selector: &str) -> Vec<DriverCall> {
        self.calls
            .iter()
            .filter(|c| call_selector(c) == selector)
            .cloned()
            .collect()
    }

    pub fn touched(&self, selector: &str) -> bool {
        !self.calls_for(selector).is_empty()
    }

    fn act(&mut self, action: &str, selector: &str, call: DriverCall) -> Result<(), AutofillError> {
        if self.broken.contains(selector) {
            return Err(AutofillError::DriverAction {
                action: action.to_string(),
                selector: selector.to_string(),
                error: "element detached".to_string(),
            });
        }
        self.calls.push(call);
        Ok(())
    }
}

fn call_selector(call: &DriverCall) -> &str {
    match call {
        DriverCall::Wait(s)
        | DriverCall::Fill(s, _)
        | DriverCall::Type(s, _, _)
        | DriverCall::Click(s, _)
        | DriverCall::Check(s)
        | DriverCall::Select(s, _)
        | DriverCall::Events(s, _)
        | DriverCall::Upload(s, _) => s,
    }
}

impl PageDriver for RecordingDriver {
    fn wait_for_selector(&mut self, selector: &str, timeout_ms: u64) -> Result<(), AutofillError> {
        if self.missing.contains(selector) {
            return Err(AutofillError::SelectorTimeout {
                selector: selector.to_string(),
                timeout_ms,
            });
        }
        self.calls.push(DriverCall::Wait(selector.to_string()));
        Ok(())
    }

    fn fill(&mut self, selector: &str, value: &str) -> Result<(), AutofillError> {
        self.act("fill", selector, DriverCall::Fill(selector.into(), value.into()))
    }

    fn type_text(&mut self, selector: &str, value: &str, delay_ms: u64) -> Result<(), AutofillError> {
        self.act(
            "type",
            selector,
            DriverCall::Type(selector.into(), value.into(), delay_ms),
        )
    }

    fn click(&mut self, selector: &str, click_count: u32) -> Result<(), AutofillError> {
        self.act("click", selector, DriverCall::Click(selector.into(), click_count))
    }

    fn check(&mut self, selector: &str) -> Result<(), AutofillError> {
        self.act("check", selector, DriverCall::Check(selector.into()))
    }

    fn select_option(&mut self, selector: &str, value: &str) -> Result<(), AutofillError> {
        self.act(
            "select_option",
            selector,
            DriverCall::Select(selector.into(), value.into()),
        )
    }

    fn dispatch_events(&mut self, selector: &str, events: &[&str]) -> Result<(), AutofillError> {
        self.act(
            "dispatch_events",
            selector,
            DriverCall::Events(
                selector.into(),
                events.iter().map(|e| e.to_string()).collect(),
            ),
        )
    }

    fn upload_file(&mut self, selector: &str, path: &str) -> Result<(), AutofillError> {
        self.act(
            "upload_file",
            selector,
            DriverCall::Upload(selector.into(), path.into()),
        )
    }
}
