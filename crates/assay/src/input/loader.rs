//! Turning input files into datasets.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{AssayError, Result};
use crate::schema::Table;

use super::json::parse_json_table;
use super::parser::{Parser, ParserConfig};
use super::source::{Dataset, InputFile, SourceKind, SourceMetadata};
use super::sql::load_sql_tables;

/// Loads an input file into one or more named tables.
pub trait TableLoader {
    fn load(&self, input: &InputFile) -> Result<Dataset>;
}

/// The default loader: dispatches on the file extension.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    parser: Parser,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parser_config(config: ParserConfig) -> Self {
        Self {
            parser: Parser::with_config(config),
        }
    }

    fn load_tables(&self, input: &InputFile, kind: SourceKind) -> Result<IndexMap<String, Table>> {
        match kind {
            SourceKind::Csv => {
                let table = self.parser.parse_bytes(&input.contents).map_err(|e| match e {
                    AssayError::Csv(err) => AssayError::parse(&input.file_name, err),
                    other => other,
                })?;
                Ok(single(input, table))
            }
            SourceKind::Json => {
                let table = parse_json_table(&input.file_name, input.text()?)?;
                Ok(single(input, table))
            }
            SourceKind::Sql => load_sql_tables(&input.file_name, input.text()?),
            SourceKind::Excel => load_excel(input),
            SourceKind::Parquet => load_parquet(input),
        }
    }
}

impl TableLoader for FileLoader {
    fn load(&self, input: &InputFile) -> Result<Dataset> {
        let kind = input.kind()?;
        let tables = self.load_tables(input, kind)?;
        debug!(
            file = %input.file_name,
            kind = %kind,
            tables = tables.len(),
            "loaded input file"
        );

        Ok(Dataset {
            source: SourceMetadata::new(input, kind, tables.len()),
            tables,
        })
    }
}

fn single(input: &InputFile, table: Table) -> IndexMap<String, Table> {
    let mut tables = IndexMap::new();
    tables.insert(input.stem(), table);
    tables
}

#[cfg(feature = "excel")]
fn load_excel(input: &InputFile) -> Result<IndexMap<String, Table>> {
    super::excel::load_workbook(&input.file_name, &input.contents)
}

#[cfg(not(feature = "excel"))]
fn load_excel(_input: &InputFile) -> Result<IndexMap<String, Table>> {
    Err(AssayError::FeatureDisabled {
        format: "Excel",
        feature: "excel",
    })
}

#[cfg(feature = "parquet")]
fn load_parquet(input: &InputFile) -> Result<IndexMap<String, Table>> {
    let table = super::parquet::load_parquet(&input.file_name, &input.contents)?;
    Ok(single(input, table))
}

#[cfg(not(feature = "parquet"))]
fn load_parquet(_input: &InputFile) -> Result<IndexMap<String, Table>> {
    Err(AssayError::FeatureDisabled {
        format: "Parquet",
        feature: "parquet",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_keyed_by_stem() {
        let input = InputFile::new("sales.csv", b"a,b\n1,2\n".to_vec());
        let dataset = FileLoader::new().load(&input).unwrap();
        assert_eq!(dataset.kind(), SourceKind::Csv);
        assert!(dataset.tables.contains_key("sales"));
        assert!(!dataset.is_multi_table());
        assert_eq!(dataset.source.table_count, 1);
    }

    #[test]
    fn test_sql_multi_table() {
        let input = InputFile::new(
            "dump.sql",
            b"CREATE TABLE a (x INT); CREATE TABLE b (y TEXT);".to_vec(),
        );
        let dataset = FileLoader::new().load(&input).unwrap();
        assert!(dataset.is_multi_table());
        assert_eq!(dataset.tables.len(), 2);
    }

    #[test]
    fn test_unsupported_extension() {
        let input = InputFile::new("notes.docx", Vec::new());
        assert!(matches!(
            FileLoader::new().load(&input),
            Err(AssayError::UnsupportedFormat(_))
        ));
    }

    #[cfg(not(feature = "parquet"))]
    #[test]
    fn test_parquet_feature_disabled() {
        let input = InputFile::new("x.parquet", Vec::new());
        assert!(matches!(
            FileLoader::new().load(&input),
            Err(AssayError::FeatureDisabled { feature: "parquet", .. })
        ));
    }
}
