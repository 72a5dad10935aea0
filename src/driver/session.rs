use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::driver::page_driver::PageDriver;
use crate::error::AutofillError;

/// Request sent to the driver script over stdin (one JSON line).
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DriverRequest {
    Navigate {
        url: String,
    },
    Content,
    WaitForSelector {
        selector: String,
        timeout_ms: u64,
    },
    Fill {
        selector: String,
        value: String,
    },
    Type {
        selector: String,
        value: String,
        delay_ms: u64,
    },
    Click {
        selector: String,
        click_count: u32,
    },
    Check {
        selector: String,
    },
    SelectOption {
        selector: String,
        value: String,
    },
    DispatchEvents {
        selector: String,
        events: Vec<String>,
    },
    UploadFile {
        selector: String,
        path: String,
    },
    Quit,
}

impl DriverRequest {
    /// Protocol name of the command, used in error messages.
    pub fn command_name(&self) -> &'static str {
        match self {
            DriverRequest::Navigate { .. } => "navigate",
            DriverRequest::Content => "content",
            DriverRequest::WaitForSelector { .. } => "wait_for_selector",
            DriverRequest::Fill { .. } => "fill",
            DriverRequest::Type { .. } => "type",
            DriverRequest::Click { .. } => "click",
            DriverRequest::Check { .. } => "check",
            DriverRequest::SelectOption { .. } => "select_option",
            DriverRequest::DispatchEvents { .. } => "dispatch_events",
            DriverRequest::UploadFile { .. } => "upload_file",
            DriverRequest::Quit => "quit",
        }
    }
}

/// Response received from the driver script over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct DriverResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub timeout: Option<bool>,
}

/// A live page behind a long-lived Node.js/Playwright process.
///
/// Commands go out as NDJSON on stdin, responses come back on stdout.
pub struct DriverSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
}

impl DriverSession {
    /// Spawn `node <script>` and wait for its ready line.
    pub fn launch(node: &str, script: &str) -> Result<Self, AutofillError> {
        let mut child = Command::new(node)
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| AutofillError::SubprocessSpawn {
                script: script.to_string(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            AutofillError::SessionIO(format!("Failed to capture stdin of {}", script))
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            AutofillError::SessionIO(format!("Failed to capture stdout of {}", script))
        })?;

        let mut reader = BufReader::new(stdout);

        let mut line = String::new();
        reader.read_line(&mut line).map_err(|e| {
            AutofillError::SessionIO(format!("Failed to read ready signal: {}", e))
        })?;

        let response = parse_response(&line, "driver ready signal")?;
        if !response.ok || response.ready != Some(true) {
            return Err(AutofillError::SessionProtocol {
                command: "launch".into(),
                error: format!("Did not receive ready signal from {}", script),
            });
        }

        debug!(script, "driver session ready");

        Ok(DriverSession {
            child,
            stdin,
            reader,
        })
    }

    fn send(&mut self, request: &DriverRequest) -> Result<DriverResponse, AutofillError> {
        let json = serde_json::to_string(request).map_err(|e| AutofillError::JsonSerialize {
            context: "DriverRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json).map_err(|e| {
            AutofillError::SessionIO(format!("Failed to write to driver stdin: {}", e))
        })?;

        self.stdin.flush().map_err(|e| {
            AutofillError::SessionIO(format!("Failed to flush driver stdin: {}", e))
        })?;

        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(|e| {
            AutofillError::SessionIO(format!("Failed to read from driver stdout: {}", e))
        })?;

        if line.trim().is_empty() {
            return Err(AutofillError::SessionIO(
                "Empty response from driver (process may have died)".into(),
            ));
        }

        parse_response(&line, "driver response")
    }

    fn send_ok(&mut self, request: &DriverRequest) -> Result<DriverResponse, AutofillError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(AutofillError::SessionProtocol {
                command: request.command_name().into(),
                error: response.error.unwrap_or_else(|| "Unknown error".into()),
            });
        }
        Ok(response)
    }

    /// Run a page action; a driver-side failure becomes `DriverAction`.
    fn act(&mut self, request: DriverRequest, selector: &str) -> Result<(), AutofillError> {
        let response = self.send(&request)?;
        if response.ok {
            Ok(())
        } else {
            Err(AutofillError::DriverAction {
                action: request.command_name().into(),
                selector: selector.to_string(),
                error: response.error.unwrap_or_else(|| "Unknown error".into()),
            })
        }
    }

    pub fn navigate(&mut self, url: &str) -> Result<(), AutofillError> {
        self.send_ok(&DriverRequest::Navigate { url: url.to_string() })?;
        debug!(url, "navigated");
        Ok(())
    }

    /// Serialized HTML of the current page, the input to the scanner.
    pub fn content(&mut self) -> Result<String, AutofillError> {
        let response = self.send_ok(&DriverRequest::Content)?;
        response.html.ok_or_else(|| AutofillError::SessionProtocol {
            command: "content".into(),
            error: "No html in content response".into(),
        })
    }

    pub fn quit(&mut self) -> Result<(), AutofillError> {
        // Process may already be gone
        let _ = self.send(&DriverRequest::Quit);
        let _ = self.child.wait();
        Ok(())
    }
}

impl PageDriver for DriverSession {
    fn wait_for_selector(&mut self, selector: &str, timeout_ms: u64) -> Result<(), AutofillError> {
        let response = self.send(&DriverRequest::WaitForSelector {
            selector: selector.to_string(),
            timeout_ms,
        })?;

        if response.ok {
            return Ok(());
        }

        if response.timeout == Some(true) {
            return Err(AutofillError::SelectorTimeout {
                selector: selector.to_string(),
                timeout_ms,
            });
        }

        Err(AutofillError::DriverAction {
            action: "wait_for_selector".into(),
            selector: selector.to_string(),
            error: response.error.unwrap_or_else(|| "Unknown error".into()),
        })
    }

    fn fill(&mut self, selector: &str, value: &str) -> Result<(), AutofillError> {
        self.act(
            DriverRequest::Fill {
                selector: selector.to_string(),
                value: value.to_string(),
            },
            selector,
        )
    }

    fn type_text(&mut self, selector: &str, value: &str, delay_ms: u64) -> Result<(), AutofillError> {
        self.act(
            DriverRequest::Type {
                selector: selector.to_string(),
                value: value.to_string(),
                delay_ms,
            },
            selector,
        )
    }

    fn click(&mut self, selector: &str, click_count: u32) -> Result<(), AutofillError> {
        self.act(
            DriverRequest::Click {
                selector: selector.to_string(),
                click_count,
            },
            selector,
        )
    }

    fn check(&mut self, selector: &str) -> Result<(), AutofillError> {
        self.act(
            DriverRequest::Check {
                selector: selector.to_string(),
            },
            selector,
        )
    }

    fn select_option(&mut self, selector: &str, value: &str) -> Result<(), AutofillError> {
        self.act(
            DriverRequest::SelectOption {
                selector: selector.to_string(),
                value: value.to_string(),
            },
            selector,
        )
    }

    fn dispatch_events(&mut self, selector: &str, events: &[&str]) -> Result<(), AutofillError> {
        self.act(
            DriverRequest::DispatchEvents {
                selector: selector.to_string(),
                events: events.iter().map(|e| e.to_string()).collect(),
            },
            selector,
        )
    }

    fn upload_file(&mut self, selector: &str, path: &str) -> Result<(), AutofillError> {
        self.act(
            DriverRequest::UploadFile {
                selector: selector.to_string(),
                path: path.to_string(),
            },
            selector,
        )
    }
}

impl Drop for DriverSession {
    fn drop(&mut self) {
        if let Err(e) = self.quit() {
            warn!("driver shutdown failed: {}", e);
        }
    }
}

/// Decode one response line from the driver.
pub fn parse_response(line: &str, context: &str) -> Result<DriverResponse, AutofillError> {
    serde_json::from_str(line.trim()).map_err(|e| AutofillError::JsonParse {
        context: context.to_string(),
        source: e,
    })
}
