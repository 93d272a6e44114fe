use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the effective header came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderSource {
    /// First record of the target file.
    File,
    /// The file was empty, started with a blank line, or its first record
    /// was not valid UTF-8.
    Generator,
}

/// Result of reconciling the file header against the generator header.
///
/// None of the outcomes is fatal; rows are always aligned by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HeaderCheck {
    Match,
    NamesDiffer,
    WidthDiffers { existing: usize, expected: usize },
}

/// Record terminator detected from the first line of the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::Crlf => b"\r\n",
        }
    }

    pub fn terminator(self) -> csv::Terminator {
        match self {
            LineEnding::Lf => csv::Terminator::Any(b'\n'),
            LineEnding::Crlf => csv::Terminator::CRLF,
        }
    }
}

/// Summary of one append run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendReport {
    pub path: PathBuf,
    pub rows_requested: u64,
    pub rows_appended: u64,
    pub header_width: usize,
    pub generator_width: usize,
    pub header_source: HeaderSource,
    pub header_check: HeaderCheck,
    pub line_ending: LineEnding,
    /// Whether a line break was added before the first appended row.
    pub repaired_trailing_newline: bool,
    pub bytes_written: u64,
}
