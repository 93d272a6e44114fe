use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of fields in a generated listing record.
pub const RECORD_WIDTH: usize = 11;

/// Positions of the listing fields inside a [`Record`].
pub mod field {
    pub const PROPERTY_TYPE: usize = 0;
    pub const TRANSACTION: usize = 1;
    pub const PROVINCE: usize = 2;
    pub const DISTRICT: usize = 3;
    pub const PRICE: usize = 4;
    pub const AREA: usize = 5;
    pub const DIRECTION: usize = 6;
    pub const FLOORS: usize = 7;
    pub const ROOMS: usize = 8;
    pub const TOILETS: usize = 9;
    pub const LEGAL: usize = 10;
}

/// One delimited row. An empty string marks a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field at `index`, or `None` past the end of the record.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Pad with empty strings or truncate from the right until the record
    /// has exactly `width` fields. Column names are never consulted.
    pub fn aligned(mut self, width: usize) -> Self {
        self.fields.resize(width, String::new());
        self
    }
}

/// Ordered column names of a delimited file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Compare column names ignoring surrounding whitespace.
    pub fn same_names(&self, other: &Header) -> bool {
        self.width() == other.width()
            && self
                .columns
                .iter()
                .zip(&other.columns)
                .all(|(left, right)| left.trim() == right.trim())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[&str]) -> Record {
        Record::new(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn aligned_pads_short_records() {
        let aligned = record(&["a", "b"]).aligned(4);
        assert_eq!(aligned, record(&["a", "b", "", ""]));
    }

    #[test]
    fn aligned_truncates_from_the_right() {
        let aligned = record(&["a", "b", "c"]).aligned(1);
        assert_eq!(aligned, record(&["a"]));
    }

    #[test]
    fn header_names_compare_trimmed() {
        let left = Header::new(vec![" GIÁ ".to_string(), "HƯỚNG".to_string()]);
        let right = Header::new(vec!["GIÁ".to_string(), "HƯỚNG  ".to_string()]);
        assert!(left.same_names(&right));

        let shorter = Header::new(vec!["GIÁ".to_string()]);
        assert!(!left.same_names(&shorter));
    }

    #[test]
    fn header_displays_as_list() {
        let header = Header::new(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(header.to_string(), r#"["A", "B"]"#);
    }
}
