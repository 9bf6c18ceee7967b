use std::io::{self, Write};

use serde::Serialize;

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(json: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// One result per command: the text line, or pretty JSON.
    pub fn emit<T: Serialize>(&self, text: &str, value: &T) -> AppResult<()> {
        let payload = match self.mode {
            OutputMode::Text => text.to_string(),
            OutputMode::Json => serde_json::to_string_pretty(value)?,
        };
        write_line(&payload)
    }

    /// Streaming results: one JSON document per line in JSON mode.
    pub fn emit_record<T: Serialize>(&self, text: &str, value: &T) -> AppResult<()> {
        let payload = match self.mode {
            OutputMode::Text => text.to_string(),
            OutputMode::Json => serde_json::to_string(value)?,
        };
        write_line(&payload)
    }
}

fn write_line(payload: &str) -> AppResult<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{payload}")?;
    stdout.flush()?;
    Ok(())
}
