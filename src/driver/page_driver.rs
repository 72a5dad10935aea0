use crate::error::AutofillError;

/// Primitives the autofill path needs from a page-automation driver.
///
/// Calls block until the driver has settled the action. Selectors are the
/// strings produced by the scanner.
pub trait PageDriver {
    fn wait_for_selector(&mut self, selector: &str, timeout_ms: u64) -> Result<(), AutofillError>;

    /// Set the value directly, replacing what was there.
    fn fill(&mut self, selector: &str, value: &str) -> Result<(), AutofillError>;

    /// Type keystroke by keystroke with `delay_ms` between keys.
    fn type_text(&mut self, selector: &str, value: &str, delay_ms: u64) -> Result<(), AutofillError>;

    fn click(&mut self, selector: &str, click_count: u32) -> Result<(), AutofillError>;

    fn check(&mut self, selector: &str) -> Result<(), AutofillError>;

    fn select_option(&mut self, selector: &str, value: &str) -> Result<(), AutofillError>;

    /// Dispatch synthetic DOM events (e.g. `change`, `blur`) on the element.
    fn dispatch_events(&mut self, selector: &str, events: &[&str]) -> Result<(), AutofillError>;

    /// Attach a local file to a file input. The built-in fill paths never
    /// call this (file inputs are skipped); it exists for site handlers that
    /// upload a resume themselves.
    fn upload_file(&mut self, selector: &str, path: &str) -> Result<(), AutofillError>;
}
