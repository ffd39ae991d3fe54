//! CSV/TSV parser with delimiter detection.

use std::io::{BufRead, BufReader};

use crate::error::{AssayError, Result};
use crate::inference::TypeInferrer;
use crate::schema::Table;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    pub fn without_header(mut self) -> Self {
        self.has_header = false;
        self
    }
}

/// Parses delimited text into typed tables.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
    inferrer: TypeInferrer,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            inferrer: TypeInferrer::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse delimited bytes into a typed table.
    ///
    /// A header with no data rows yields a table with columns and zero rows.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };

        let (headers, rows) = self.read_records(bytes, delimiter)?;

        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<String> = rows.iter().map(|row| row[idx].clone()).collect();
                self.inferrer.build_column(name, &cells)
            })
            .collect();

        Table::new(columns)
    }

    /// Read the header and the records, padding or truncating every record
    /// to the header width.
    fn read_records(&self, bytes: &[u8], delimiter: u8) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect::<Vec<String>>());
        }

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.trim().to_string()).collect()
        } else {
            // Generate column names
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) && rows.is_empty() {
            return Err(AssayError::EmptyData("No columns found".to_string()));
        }

        let headers = dedupe_headers(headers);
        let expected_cols = headers.len();
        for row in &mut rows {
            row.resize(expected_cols, String::new());
        }

        Ok((headers, rows))
    }
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
pub(crate) fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        let mut candidate = header.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", header, n);
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}

/// Detect the delimiter by analyzing the first few lines.
pub fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AssayError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs get a slight bonus.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, Value};

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        let data = b"a;b\n\"1,5\";2\n";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,25,LA";
        let table = parser.parse_bytes(data).unwrap();

        assert_eq!(table.column_names(), vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        let age = table.column("age").unwrap();
        assert_eq!(age.column_type, ColumnType::Integer);
        assert_eq!(age.values[1], Value::Integer(25));
        assert_eq!(table.column("name").unwrap().column_type, ColumnType::Text);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Parser::new().parse_bytes(b"a,b,c\n1,2\n3,4,5,6\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert!(table.column("c").unwrap().values[0].is_null());
        assert_eq!(table.column("c").unwrap().values[1], Value::Integer(5));
    }

    #[test]
    fn test_header_only() {
        let table = Parser::new().parse_bytes(b"id,name\n").unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column("id").unwrap().column_type, ColumnType::Unknown);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            Parser::new().parse_bytes(b""),
            Err(AssayError::EmptyData(_))
        ));
    }

    #[test]
    fn test_bom_and_duplicate_headers() {
        let table = Parser::new()
            .parse_bytes(b"\xEF\xBB\xBFid,id\n1,2\n")
            .unwrap();
        assert_eq!(table.column_names(), vec!["id", "id.1"]);

        let table = Parser::new().parse_bytes(b"a,a.2,a,a\n1,2,3,4\n").unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.2", "a.1", "a.3"]);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig::default().with_max_rows(1));
        let table = parser.parse_bytes(b"a\n1\n2\n3\n").unwrap();
        assert_eq!(table.row_count(), 1);
    }
}
