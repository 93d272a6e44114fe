use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use realty_core::{Header, Record};
use tracing::{debug, warn};

use crate::errors::GenerationError;
use crate::model::LineEnding;

/// What was learned about a target file before appending to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileState {
    /// First record, or `None` when the file is empty, starts with a blank
    /// line, or is not valid UTF-8.
    pub header: Option<Header>,
    pub line_ending: LineEnding,
    /// Non-empty file whose last byte is not a line break.
    pub missing_trailing_newline: bool,
}

/// Read the header, line ending and tail state of an existing CSV file.
pub fn inspect_file(path: &Path) -> Result<FileState, GenerationError> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(FileState {
            header: None,
            line_ending: LineEnding::default(),
            missing_trailing_newline: false,
        });
    }

    let mut first_line = Vec::new();
    BufReader::new(&file).read_until(b'\n', &mut first_line)?;
    let line_ending = if first_line.ends_with(b"\r\n") {
        LineEnding::Crlf
    } else {
        LineEnding::Lf
    };
    debug!(path = %path.display(), ?line_ending, "line ending detected");

    // The csv reader skips blank lines, so a blank first line would promote
    // the second line to header.
    let header = if is_blank_line(&first_line) {
        debug!(path = %path.display(), "first line is blank");
        None
    } else {
        file.seek(SeekFrom::Start(0))?;
        read_header(&file, path)?
    };

    file.seek(SeekFrom::End(-1))?;
    let mut last = [0_u8; 1];
    file.read_exact(&mut last)?;
    let missing_trailing_newline = !matches!(last[0], b'\n' | b'\r');

    Ok(FileState {
        header,
        line_ending,
        missing_trailing_newline,
    })
}

fn is_blank_line(line: &[u8]) -> bool {
    line.iter().all(|byte| matches!(byte, b'\r' | b'\n'))
}

fn read_header(file: &File, path: &Path) -> Result<Option<Header>, GenerationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));
    let mut record = csv::StringRecord::new();

    match reader.read_record(&mut record) {
        Ok(true) if !record.is_empty() => Ok(Some(Header::new(
            record.iter().map(|name| name.to_string()).collect(),
        ))),
        Ok(_) => Ok(None),
        Err(err) if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) => {
            warn!(path = %path.display(), error = %err, "header is not valid UTF-8");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Append records to `path` without touching existing content.
///
/// Returns the number of bytes written, including a repaired line break.
/// Nothing is written when `records` is empty.
pub fn append_records(
    path: &Path,
    records: &[Record],
    line_ending: LineEnding,
    repair_trailing_newline: bool,
) -> Result<u64, GenerationError> {
    if records.is_empty() {
        return Ok(0);
    }

    let file = OpenOptions::new().append(true).open(path)?;
    let mut counting = CountingWriter::new(BufWriter::new(file));
    if repair_trailing_newline {
        counting.write_all(line_ending.as_bytes())?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(line_ending.terminator())
        .from_writer(counting);

    for record in records {
        writer.write_record(record.fields())?;
    }

    writer.flush()?;
    let mut counting = writer.into_inner().map_err(|err| err.into_error())?;
    counting.flush()?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
