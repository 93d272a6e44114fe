use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rand::RngCore;
use tracing::{info, warn};

use realty_core::{Header, Record};

use crate::errors::GenerationError;
use crate::generator::RowGenerator;
use crate::model::{AppendReport, HeaderCheck, HeaderSource, LineEnding};
use crate::output::csv::{FileState, append_records, inspect_file};

/// An existing CSV file prepared for appending.
#[derive(Debug, Clone)]
pub struct TargetFile {
    path: PathBuf,
    header: Header,
    source: HeaderSource,
    line_ending: LineEnding,
    missing_trailing_newline: bool,
}

impl TargetFile {
    /// Read the existing header of `path`, falling back to `fallback` when
    /// the file is empty, starts with a blank line, or its first record is
    /// not valid UTF-8.
    ///
    /// Fails before touching the filesystem when `path` is not an existing
    /// regular file.
    pub fn open(path: impl AsRef<Path>, fallback: &Header) -> Result<Self, GenerationError> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(GenerationError::NotAFile(path.to_path_buf())),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(GenerationError::FileNotFound(path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        }

        let FileState {
            header,
            line_ending,
            missing_trailing_newline,
        } = inspect_file(path)?;

        let (header, source) = match header {
            Some(header) => (header, HeaderSource::File),
            None => (fallback.clone(), HeaderSource::Generator),
        };

        Ok(Self {
            path: path.to_path_buf(),
            header,
            source,
            line_ending,
            missing_trailing_newline,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Effective header used to align appended rows.
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_source(&self) -> HeaderSource {
        self.source
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn header_check(&self, expected: &Header) -> HeaderCheck {
        if self.header.width() != expected.width() {
            HeaderCheck::WidthDiffers {
                existing: self.header.width(),
                expected: expected.width(),
            }
        } else if self.header.same_names(expected) {
            HeaderCheck::Match
        } else {
            HeaderCheck::NamesDiffer
        }
    }

    /// Align records to the header width and append them.
    ///
    /// Returns the number of rows and bytes written.
    pub fn append(&self, records: Vec<Record>) -> Result<(u64, u64), GenerationError> {
        let width = self.header.width();
        let aligned: Vec<Record> = records
            .into_iter()
            .map(|record| record.aligned(width))
            .collect();

        let bytes = append_records(
            &self.path,
            &aligned,
            self.line_ending,
            self.missing_trailing_newline,
        )?;
        Ok((aligned.len() as u64, bytes))
    }
}

/// Generate `count` rows and append them to an opened target.
///
/// A header width mismatch is logged and never fatal.
pub fn append_synthetic_rows(
    target: &TargetFile,
    count: usize,
    generator: &RowGenerator<'_>,
    rng: &mut dyn RngCore,
) -> Result<AppendReport, GenerationError> {
    let expected = generator.header();
    let header_check = target.header_check(expected);
    if let HeaderCheck::WidthDiffers { existing, expected } = header_check {
        warn!(
            existing,
            expected,
            existing_header = %target.header(),
            generator_header = %generator.header(),
            "existing CSV header length differs from generator header"
        );
    }

    info!(
        path = %target.path().display(),
        rows = count,
        header_width = target.header().width(),
        "generating synthetic rows"
    );
    let records = generator.generate_batch(count, rng);
    let (rows_appended, bytes_written) = target.append(records)?;
    info!(
        path = %target.path().display(),
        rows_appended,
        bytes_written,
        "rows appended"
    );

    Ok(AppendReport {
        path: target.path().to_path_buf(),
        rows_requested: count as u64,
        rows_appended,
        header_width: target.header().width(),
        generator_width: expected.width(),
        header_source: target.header_source(),
        header_check,
        line_ending: target.line_ending(),
        repaired_trailing_newline: target.missing_trailing_newline && rows_appended > 0,
        bytes_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Header {
        Header::new(names.iter().map(|name| name.to_string()).collect())
    }

    fn target(names: &[&str]) -> TargetFile {
        TargetFile {
            path: PathBuf::from("unused.csv"),
            header: header(names),
            source: HeaderSource::File,
            line_ending: LineEnding::Lf,
            missing_trailing_newline: false,
        }
    }

    #[test]
    fn header_check_detects_width_difference() {
        let check = target(&["a", "b"]).header_check(&header(&["a", "b", "c"]));
        assert_eq!(
            check,
            HeaderCheck::WidthDiffers {
                existing: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn header_check_ignores_whitespace() {
        let check = target(&[" a", "b "]).header_check(&header(&["a", "b"]));
        assert_eq!(check, HeaderCheck::Match);
    }

    #[test]
    fn header_check_flags_renamed_columns() {
        let check = target(&["a", "x"]).header_check(&header(&["a", "b"]));
        assert_eq!(check, HeaderCheck::NamesDiffer);
    }
}
