//! Replay of recorded landmark frames
//!
//! One JSON-encoded [`LandmarkFrame`] per line. Blank lines are skipped. A
//! line that fails to decode is reported as a single failed frame and the
//! replay continues with the next line.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::Path;

use tracing::{debug, info};

use crate::frame::LandmarkFrame;
use crate::{LandmarkError, LandmarkSource};

/// Landmark source reading JSON lines
pub struct ReplaySource<R> {
    name: String,
    lines: Lines<R>,
    line_number: usize,
    closed: bool,
}

impl ReplaySource<BufReader<File>> {
    /// Open a recording on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LandmarkError> {
        let path = path.as_ref();
        info!("Opening landmark recording {}", path.display());
        let file = File::open(path)?;
        Ok(Self::from_reader(path.display().to_string(), BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            lines: reader.lines(),
            line_number: 0,
            closed: false,
        }
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_ready(&self) -> bool {
        !self.closed
    }

    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, LandmarkError> {
        if self.closed {
            return Ok(None);
        }

        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            self.line_number += 1;
            let line = match line {
                Ok(line) => line,
                // Not UTF-8; the bytes are consumed, so the next line still reads
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    return Err(LandmarkError::Decode {
                        line: self.line_number,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            };
            if line.trim().is_empty() {
                continue;
            }

            return serde_json::from_str(&line)
                .map(Some)
                .map_err(|e| LandmarkError::Decode {
                    line: self.line_number,
                    reason: e.to_string(),
                });
        }
    }

    fn close(&mut self) {
        if !self.closed {
            debug!("Closing replay '{}' at line {}", self.name, self.line_number);
            self.closed = true;
        }
    }
}
