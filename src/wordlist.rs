//! Lazy line streaming of wordlist files.
//!
//! A wordlist is opened per enumeration pass, streamed line by line, and
//! dropped when the pass finishes. Entries are whitespace-trimmed; lines that
//! trim to empty are skipped so they never probe the bare target.

use crate::types::{AdfindError, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

/// An open wordlist source yielding trimmed, non-empty candidate segments.
#[derive(Debug)]
pub struct Wordlist {
    lines: Lines<BufReader<File>>,
}

impl Wordlist {
    /// Open a wordlist file. A file that cannot be opened is
    /// [`AdfindError::WordlistUnavailable`], which callers treat as fatal for
    /// the pass.
    pub async fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .await
            .map_err(|source| AdfindError::WordlistUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }

    /// Next candidate segment, or `None` at end of file. Read errors are
    /// returned raw; the enumeration pass reports them without discarding
    /// findings accumulated so far.
    pub async fn next_entry(&mut self) -> std::io::Result<Option<String>> {
        while let Some(line) = self.lines.next_line().await? {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
        Ok(None)
    }
}
