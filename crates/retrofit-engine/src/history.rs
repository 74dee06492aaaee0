//! Tick callback that streams step history as JSON lines.
//!
//! Each completed step becomes one line holding its [`StepHistory`]. The
//! callback interface cannot fail, so the first write error is kept and
//! reported by [`HistoryWriter::finish`]; later steps are not written.
//!
//! [`StepHistory`]: retrofit_core::StepHistory

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use retrofit_core::{RenovationModel, TickCallback, TickSummary};
use tracing::{debug, warn};

use crate::error::EngineError;

/// Writes one JSON line per step.
pub struct HistoryWriter<W: Write> {
    writer: W,
    path: PathBuf,
    lines: u64,
    error: Option<io::Error>,
}

impl HistoryWriter<BufWriter<File>> {
    /// Create (or truncate) the history file at `path`.
    pub fn create(path: &Path) -> Result<Self, EngineError> {
        let file = File::create(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file), path))
    }
}

impl<W: Write> HistoryWriter<W> {
    /// Wrap an existing writer; `path` is used in error messages only.
    pub fn new(writer: W, path: &Path) -> Self {
        Self {
            writer,
            path: path.to_path_buf(),
            lines: 0,
            error: None,
        }
    }

    /// Flush and return the writer with the number of lines written.
    pub fn finish(mut self) -> Result<(W, u64), EngineError> {
        if let Some(source) = self.error.take() {
            return Err(EngineError::Io {
                path: self.path,
                source,
            });
        }
        self.writer.flush().map_err(|source| EngineError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok((self.writer, self.lines))
    }

    fn write_line(&mut self, summary: &TickSummary) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &summary.history)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> TickCallback for HistoryWriter<W> {
    fn on_tick(&mut self, summary: &TickSummary, _model: &RenovationModel) {
        if self.error.is_some() {
            return;
        }
        match self.write_line(summary) {
            Ok(()) => {
                self.lines = self.lines.saturating_add(1);
                debug!(step = summary.step, "History line written");
            }
            Err(e) => {
                warn!(
                    step = summary.step,
                    path = %self.path.display(),
                    error = %e,
                    "Failed to write history, further steps will not be recorded"
                );
                self.error = Some(e);
            }
        }
    }
}
