//! Data source abstraction and metadata.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AssayError, Result};
use crate::schema::Table;

/// File kinds the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Csv,
    Excel,
    Json,
    Parquet,
    Sql,
}

impl SourceKind {
    /// Determine the kind from a file name's extension.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" | "tsv" | "txt" => Ok(SourceKind::Csv),
            "xlsx" | "xls" | "xlsm" | "ods" => Ok(SourceKind::Excel),
            "json" => Ok(SourceKind::Json),
            "parquet" | "pq" => Ok(SourceKind::Parquet),
            "sql" => Ok(SourceKind::Sql),
            "" => Err(AssayError::UnsupportedFormat(format!(
                "'{}' has no file extension",
                file_name
            ))),
            other => Err(AssayError::UnsupportedFormat(format!(
                "'.{}' files are not supported",
                other
            ))),
        }
    }

    /// Kinds whose files can hold several named tables.
    pub fn is_multi_table(&self) -> bool {
        matches!(self, SourceKind::Excel | SourceKind::Sql)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Csv => "csv",
            SourceKind::Excel => "excel",
            SourceKind::Json => "json",
            SourceKind::Parquet => "parquet",
            SourceKind::Sql => "sql",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw bytes of an input file together with its declared name.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// File name without path; its extension declares the kind.
    pub file_name: String,
    /// File contents.
    pub contents: Vec<u8>,
}

impl InputFile {
    /// Wrap bytes received from elsewhere (an upload, a message, a test).
    pub fn new(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }

    /// Read a file from disk.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, contents))
    }

    /// Kind declared by the file extension.
    pub fn kind(&self) -> Result<SourceKind> {
        SourceKind::from_file_name(&self.file_name)
    }

    /// File name without its extension; names the table of single-table files.
    pub fn stem(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name.clone())
    }

    /// Contents decoded as UTF-8 text.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.contents)
            .map_err(|e| AssayError::parse(&self.file_name, format!("not valid UTF-8: {}", e)))
    }
}

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected kind.
    pub kind: SourceKind,
    /// Number of tables (sheets) loaded.
    pub table_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe an input file that has been loaded into `table_count` tables.
    pub fn new(input: &InputFile, kind: SourceKind, table_count: usize) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&input.contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        Self {
            file: input.file_name.clone(),
            hash,
            size_bytes: input.contents.len() as u64,
            kind,
            table_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Every table loaded from one input file, keyed by table or sheet name.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: SourceMetadata,
    pub tables: IndexMap<String, Table>,
}

impl Dataset {
    pub fn kind(&self) -> SourceKind {
        self.source.kind
    }

    pub fn file_name(&self) -> &str {
        &self.source.file
    }

    /// The first table, which is the only one for single-table kinds.
    pub fn primary(&self) -> Option<&Table> {
        self.tables.values().next()
    }

    /// Whether results should be keyed by table name.
    pub fn is_multi_table(&self) -> bool {
        self.kind().is_multi_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(SourceKind::from_file_name("a.CSV").unwrap(), SourceKind::Csv);
        assert_eq!(SourceKind::from_file_name("book.xlsx").unwrap(), SourceKind::Excel);
        assert_eq!(SourceKind::from_file_name("dump.sql").unwrap(), SourceKind::Sql);
        assert_eq!(SourceKind::from_file_name("x.parquet").unwrap(), SourceKind::Parquet);
        assert!(matches!(
            SourceKind::from_file_name("notes.docx"),
            Err(AssayError::UnsupportedFormat(_))
        ));
        assert!(SourceKind::from_file_name("README").is_err());
    }

    #[test]
    fn test_metadata_hash() {
        let input = InputFile::new("data.csv", b"a,b\n1,2\n".to_vec());
        let meta = SourceMetadata::new(&input, SourceKind::Csv, 1);
        assert!(meta.hash.starts_with("sha256:"));
        assert_eq!(meta.size_bytes, 8);
        assert_eq!(input.stem(), "data");
    }

    #[test]
    fn test_invalid_utf8() {
        let input = InputFile::new("dump.sql", vec![0xff, 0xfe]);
        assert!(matches!(input.text(), Err(AssayError::Parse { .. })));
    }
}
