//! Line-delimited JSON request router.
//!
//! Reads one JSON object per input line, dispatches on its `type` field, and
//! writes one JSON object per output line. This is plumbing around the
//! extractor for callers in other processes; it holds no extraction state of
//! its own and uses a fresh [`Extractor`] per request.
//!
//! | `type` | request fields | response |
//! |--------|----------------|----------|
//! | `hello` | `count` (optional) | `{"response", "status": "ok"}` |
//! | `extract` | `path` | `{"status": "ok", "file", "relationships"}` |
//! | other | | `{"status": "error", "error"}` |
//!
//! Every response carries the request's `_id` (null if absent).

use std::io::{BufRead, Write};
use std::path::Path;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::SkeinConfig;
use crate::error::Result;
use crate::Extractor;

/// Dispatches decoded requests to handlers.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: SkeinConfig,
}

impl Router {
    /// Create a router whose extractors use `config`.
    #[must_use]
    pub fn new(config: SkeinConfig) -> Self {
        Self { config }
    }

    /// Handle one decoded request. The `_id` field is copied into the response.
    #[must_use]
    pub fn handle(&self, request: &Value) -> Value {
        let mut response = match request.get("type").and_then(Value::as_str) {
            Some("hello") => hello(request),
            Some("extract") => self.extract(request),
            Some(other) => error_response(&format!("Unknown message type: {other}")),
            None => error_response("Unknown message type: null"),
        };
        response["_id"] = request.get("_id").cloned().unwrap_or(Value::Null);
        response
    }

    /// Handle one raw input line. Returns `None` for blank lines.
    ///
    /// Lines that are not UTF-8 or not JSON get an error response.
    #[must_use]
    pub fn handle_line(&self, line: &[u8]) -> Option<Value> {
        if line.trim_ascii().is_empty() {
            return None;
        }
        match serde_json::from_slice::<Value>(line) {
            Ok(request) => Some(self.handle(&request)),
            Err(e) => {
                warn!(error = %e, "Discarding malformed request line");
                let mut response = error_response(&format!("invalid JSON: {e}"));
                response["_id"] = Value::Null;
                Some(response)
            }
        }
    }

    /// Serve requests from `input` until end of stream.
    ///
    /// Each response is written as a single line and flushed immediately.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading input or writing output fails, or
    /// `Error::Json` if a response cannot be encoded.
    pub fn serve<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            let Some(response) = self.handle_line(&line) else {
                continue;
            };
            serde_json::to_writer(&mut output, &response)?;
            output.write_all(b"\n")?;
            output.flush()?;
        }
        debug!("Input closed, router stopping");
        Ok(())
    }

    fn extract(&self, request: &Value) -> Value {
        let Some(path) = request.get("path").and_then(Value::as_str) else {
            return error_response("extract request requires a string `path`");
        };

        let mut extractor = Extractor::with_config(self.config.clone());
        let file = match extractor.parse(Path::new(path)) {
            Ok(tree) => tree.file_name().to_string(),
            Err(e) => return error_response(&e.to_string()),
        };

        match serde_json::to_value(extractor.extract_relationships()) {
            Ok(relationships) => json!({
                "status": "ok",
                "file": file,
                "relationships": relationships,
            }),
            Err(e) => error_response(&e.to_string()),
        }
    }
}

fn hello(request: &Value) -> Value {
    let count = match request.get("count") {
        None => "0".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    };
    json!({
        "response": format!("hello from skein {count}"),
        "status": "ok",
    })
}

fn error_response(message: &str) -> Value {
    json!({
        "error": message,
        "status": "error",
    })
}
