//! mackac-logging: append-only NDJSON game transcripts.
//!
//! One JSON object per line, append-only, meant for post-mortems of finished
//! games. A reader must tolerate a trailing partial line (crashed writer).

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

#[derive(Debug, Clone, Serialize)]
pub struct GameStartEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub starting_health: u8,
    /// Seed of the chance stream, absent when running on OS entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaimEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub round: u32,
    pub claimant: u8,
    pub announced: String,
    /// Recorded for the post-mortem; never shown to the opponent live.
    pub fabricated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolutionEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub round: u32,
    pub outcome: String,
    pub damaged: Option<u8>,
    pub healths: [u8; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct GameOverEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub rounds: u32,
    pub winner: u8,
}

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for NdjsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "transcript io error: {}", e),
            Self::Json(e) => write!(f, "transcript encode error: {}", e),
        }
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use serde_json::Value;

    fn read_ndjson_lenient(path: &Path) -> Vec<Value> {
        let s = fs::read_to_string(path).expect("read");
        let mut out = Vec::new();
        for line in s.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(v) = serde_json::from_str::<Value>(line) {
                out.push(v);
            }
        }
        out
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn writes_one_valid_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ndjson");
        let mut w = NdjsonWriter::open_append(&path).unwrap();

        w.write_event(&ClaimEventV1 {
            event: "claim",
            ts_ms: now_ms(),
            round: 1,
            claimant: 0,
            announced: "[6,6] = 6 natives".to_string(),
            fabricated: true,
        })
        .unwrap();
        w.write_event(&ResolutionEventV1 {
            event: "resolution",
            ts_ms: now_ms(),
            round: 1,
            outcome: "challenge_succeeded".to_string(),
            damaged: Some(0),
            healths: [3, 4],
        })
        .unwrap();
        w.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0]["event"], "claim");
        assert_eq!(vals[0]["fabricated"], true);
        assert_eq!(vals[1]["damaged"], 0);
        assert_eq!(vals[1]["healths"][0], 3);
    }

    #[test]
    fn lenient_reader_tolerates_trailing_partial_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ndjson");

        {
            let mut w = NdjsonWriter::open_append(&path).unwrap();
            w.write_event(&GameOverEventV1 {
                event: "game_over",
                ts_ms: now_ms(),
                rounds: 9,
                winner: 1,
            })
            .unwrap();
            w.flush().unwrap();
        }

        // Simulate a crash: append a partial JSON line (no newline, invalid JSON).
        let mut f = OpenOptions::new().append(true).open(&path).unwrap();
        f.write_all(br#"{"event":"claim","round":"#).unwrap();
        f.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["winner"], 1);
    }
}
