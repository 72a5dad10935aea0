use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{debug, warn};

use crate::trace::trace::FillTraceEvent;

/// Trace line as written: the run it belongs to plus the decision itself.
#[derive(Serialize)]
struct TraceLine<'a> {
    run_id: &'a str,
    #[serde(flatten)]
    event: &'a FillTraceEvent,
}

struct RunWriter {
    out: BufWriter<File>,
    written: usize,
}

/// Fill-decision trace for one automation run, appended to a JSONL file.
///
/// Every line carries the run id so several runs can share a file. The
/// writer is buffered and flushed when the logger is dropped. A file that
/// cannot be opened disables tracing instead of aborting the run.
pub struct TraceLogger {
    run_id: String,
    writer: Option<Mutex<RunWriter>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        let run_id = new_run_id();
        let writer = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                debug!(path, run_id = %run_id, "fill trace opened");
                Some(Mutex::new(RunWriter {
                    out: BufWriter::new(file),
                    written: 0,
                }))
            }
            Err(e) => {
                warn!("could not open trace file '{}': {}", path, e);
                None
            }
        };

        Self { run_id, writer }
    }

    pub fn disabled() -> Self {
        Self {
            run_id: new_run_id(),
            writer: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Decisions recorded so far in this run.
    pub fn written(&self) -> usize {
        self.writer
            .as_ref()
            .and_then(|w| w.lock().ok().map(|w| w.written))
            .unwrap_or(0)
    }

    pub fn log(&self, event: &FillTraceEvent) {
        let Some(writer) = &self.writer else {
            return;
        };

        let line = TraceLine {
            run_id: &self.run_id,
            event,
        };
        let json = match serde_json::to_string(&line) {
            Ok(j) => j,
            Err(e) => {
                warn!("failed to serialize trace event: {}", e);
                return;
            }
        };

        let mut writer = match writer.lock() {
            Ok(w) => w,
            Err(e) => {
                warn!("trace logger lock poisoned: {}", e);
                return;
            }
        };

        match writeln!(writer.out, "{}", json) {
            Ok(()) => writer.written += 1,
            Err(e) => warn!("failed to write trace event: {}", e),
        }
    }

    /// Push buffered lines to disk.
    pub fn flush(&self) {
        if let Some(Ok(mut writer)) = self.writer.as_ref().map(|w| w.lock()) {
            if let Err(e) = writer.out.flush() {
                warn!("failed to flush trace file: {}", e);
            }
        }
    }
}

impl Drop for TraceLogger {
    fn drop(&mut self) {
        self.flush();
    }
}

fn new_run_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{}-{}", millis, std::process::id())
}
