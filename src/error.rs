use std::fmt;

#[derive(Debug)]
pub enum AutofillError {
    /// Driver subprocess failed to spawn
    SubprocessSpawn { script: String, source: std::io::Error },

    /// Reading from or writing to the driver subprocess failed
    SessionIO(String),

    /// Driver answered, but not with what the protocol expects
    SessionProtocol { command: String, error: String },

    /// JSON parsing failed (driver output, profile payload)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (driver request)
    JsonSerialize { context: String, source: serde_json::Error },

    /// Field did not appear within the wait timeout
    SelectorTimeout { selector: String, timeout_ms: u64 },

    /// Driver reported failure for a fill/select/check action
    DriverAction { action: String, selector: String, error: String },

    /// Profile file could not be read
    ProfileIO { path: String, source: std::io::Error },

    /// Profile could not be fetched from the backend
    ProfileHttp { url: String, error: String },

    /// Profile file is neither valid JSON nor valid YAML
    ProfileFormat { path: String, error: String },

    /// A site handler gave up on a whole form
    SiteHandler { handler: String, error: String },
}

impl fmt::Display for AutofillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutofillError::SubprocessSpawn { script, source } => {
                write!(f, "Failed to spawn {} (is Node.js installed?): {}", script, source)
            }
            AutofillError::SessionIO(msg) => {
                write!(f, "Driver session I/O error: {}", msg)
            }
            AutofillError::SessionProtocol { command, error } => {
                write!(f, "Driver command '{}' failed: {}", command, error)
            }
            AutofillError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            AutofillError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            AutofillError::SelectorTimeout { selector, timeout_ms } => {
                write!(f, "Field '{}' not available after {}ms", selector, timeout_ms)
            }
            AutofillError::DriverAction { action, selector, error } => {
                write!(f, "Driver action '{}' on '{}' failed: {}", action, selector, error)
            }
            AutofillError::ProfileIO { path, source } => {
                write!(f, "Failed to read profile '{}': {}", path, source)
            }
            AutofillError::ProfileHttp { url, error } => {
                write!(f, "Failed to fetch profile from {}: {}", url, error)
            }
            AutofillError::ProfileFormat { path, error } => {
                write!(f, "Invalid profile data in '{}': {}", path, error)
            }
            AutofillError::SiteHandler { handler, error } => {
                write!(f, "Site handler '{}' failed: {}", handler, error)
            }
        }
    }
}

impl std::error::Error for AutofillError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AutofillError::SubprocessSpawn { source, .. } => Some(source),
            AutofillError::JsonParse { source, .. } => Some(source),
            AutofillError::JsonSerialize { source, .. } => Some(source),
            AutofillError::ProfileIO { source, .. } => Some(source),
            _ => None,
        }
    }
}
