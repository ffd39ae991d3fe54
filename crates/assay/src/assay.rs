//! Main Assay struct and public API.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info_span};

use crate::drift::{DriftAnalyzer, DriftFindings};
use crate::error::{AssayError, Result};
use crate::input::{Dataset, FileLoader, InputFile, ParserConfig, SourceKind, TableLoader};
use crate::profile::{BaselineSchema, FieldProfiler, ProfileConfig, ProfileReport};
use crate::readiness::{ReadinessReport, ReadinessScore, ReadinessScorer, ReadinessWeights};
use crate::report::Keyed;
use crate::scan::{SchemaScanner, TableScan};
use crate::schema::Table;

/// Configuration for Assay analysis.
#[derive(Debug, Clone, Default)]
pub struct AssayConfig {
    /// Parser configuration for delimited text.
    pub parser: ParserConfig,
    /// Field profiling configuration.
    pub profile: ProfileConfig,
    /// Weights of the readiness score.
    pub readiness: ReadinessWeights,
}

impl AssayConfig {
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_profile(mut self, profile: ProfileConfig) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_readiness_weights(mut self, weights: ReadinessWeights) -> Self {
        self.readiness = weights;
        self
    }
}

/// Schema scan of one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub file_name: String,
    #[serde(flatten)]
    pub tables: Keyed<TableScan>,
}

/// Drift findings per column, keyed by table for multi-table sources.
pub type DriftReport = Keyed<DriftFindings>;

/// Operations, for error messages about unsupported kinds.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Scan,
    Drift,
    Profile,
    Readiness,
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::Scan => "schema scan",
            Operation::Drift => "drift detection",
            Operation::Profile => "profiling",
            Operation::Readiness => "readiness scoring",
        }
    }

    fn accepts(&self, kind: SourceKind) -> bool {
        match self {
            Operation::Readiness => true,
            Operation::Scan | Operation::Drift | Operation::Profile => kind != SourceKind::Parquet,
        }
    }
}

/// The main Assay analysis engine.
///
/// Holds configuration only; every call loads its inputs afresh, so one
/// instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Assay {
    loader: FileLoader,
    scanner: SchemaScanner,
    analyzer: DriftAnalyzer,
    profiler: FieldProfiler,
    scorer: ReadinessScorer,
}

impl Assay {
    /// Create a new Assay instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(AssayConfig::default())
    }

    /// Create an Assay instance with custom configuration.
    pub fn with_config(config: AssayConfig) -> Self {
        Self {
            loader: FileLoader::with_parser_config(config.parser),
            scanner: SchemaScanner::new(),
            analyzer: DriftAnalyzer::new(),
            profiler: FieldProfiler::with_config(config.profile),
            scorer: ReadinessScorer::with_weights(config.readiness),
        }
    }

    /// Load an input file into its tables.
    pub fn load(&self, input: &InputFile) -> Result<Dataset> {
        self.loader
            .load(input)
            .map_err(|e| e.in_file(&input.file_name))
    }

    /// Summarize the schema of every table in a file.
    pub fn scan(&self, input: &InputFile) -> Result<ScanReport> {
        let _span = info_span!("scan", file = %input.file_name).entered();
        let dataset = self.load_for(Operation::Scan, input)?;

        let tables = per_table(&dataset, |table| self.scanner.scan(table));
        Ok(ScanReport {
            file_name: input.file_name.clone(),
            tables,
        })
    }

    pub fn scan_path(&self, path: impl AsRef<Path>) -> Result<ScanReport> {
        self.scan(&InputFile::read(path)?)
    }

    /// Compare a current file against a baseline of the same kind.
    ///
    /// Multi-table sources compare tables present on both sides; the rest
    /// are skipped.
    pub fn drift(&self, baseline: &InputFile, current: &InputFile) -> Result<DriftReport> {
        let _span = info_span!(
            "drift",
            baseline = %baseline.file_name,
            current = %current.file_name
        )
        .entered();

        let baseline_kind = baseline.kind()?;
        let current_kind = current.kind()?;
        if baseline_kind != current_kind {
            return Err(AssayError::MismatchedSources {
                baseline: baseline_kind.to_string(),
                current: current_kind.to_string(),
            });
        }

        let before = self.load_for(Operation::Drift, baseline)?;
        let after = self.load_for(Operation::Drift, current)?;

        if before.is_multi_table() {
            let mut tables = IndexMap::new();
            for (name, table) in &before.tables {
                match after.tables.get(name) {
                    Some(other) => {
                        tables.insert(name.clone(), self.analyzer.compare(table, other));
                    }
                    None => debug!(table = %name, "table missing from current, skipped"),
                }
            }
            return Ok(Keyed::Tables(tables));
        }

        let empty = Table::empty();
        let a = before.primary().unwrap_or(&empty);
        let b = after.primary().unwrap_or(&empty);
        Ok(Keyed::Single(self.analyzer.compare(a, b)))
    }

    pub fn drift_paths(
        &self,
        baseline: impl AsRef<Path>,
        current: impl AsRef<Path>,
    ) -> Result<DriftReport> {
        self.drift(&InputFile::read(baseline)?, &InputFile::read(current)?)
    }

    /// Profile every field of every table in a file.
    pub fn profile(
        &self,
        input: &InputFile,
        baseline: Option<&BaselineSchema>,
    ) -> Result<ProfileReport> {
        let _span = info_span!("profile", file = %input.file_name).entered();
        let dataset = self.load_for(Operation::Profile, input)?;

        Ok(match per_table(&dataset, |table| self.profiler.profile(table, baseline)) {
            Keyed::Single(profile) => ProfileReport::Single(profile),
            Keyed::Tables(tables) => ProfileReport::Tables { tables },
        })
    }

    pub fn profile_path(
        &self,
        path: impl AsRef<Path>,
        baseline: Option<&BaselineSchema>,
    ) -> Result<ProfileReport> {
        self.profile(&InputFile::read(path)?, baseline)
    }

    /// Score how ready a file is for downstream use.
    ///
    /// SQL scripts are scored on their schema only. Workbooks report the
    /// first sheet at the top level and every sheet under `sheets` when
    /// there is more than one.
    pub fn readiness(&self, input: &InputFile) -> Result<ReadinessReport> {
        let _span = info_span!("readiness", file = %input.file_name).entered();

        if input.kind()? == SourceKind::Sql {
            return Ok(ReadinessReport {
                source_file: input.file_name.clone(),
                readiness_score: self.scorer.score_sql_script(input.text()?),
                total_rows_analyzed: 0,
                sheets: None,
            });
        }

        let dataset = self.load_for(Operation::Readiness, input)?;
        let (readiness_score, total_rows_analyzed) = match dataset.primary() {
            Some(table) => (self.scorer.score(table), table.row_count()),
            None => (ReadinessScore::empty(), 0),
        };

        let sheets = (dataset.is_multi_table() && dataset.tables.len() > 1).then(|| {
            dataset
                .tables
                .iter()
                .map(|(name, table)| (name.clone(), self.scorer.score(table)))
                .collect()
        });

        Ok(ReadinessReport {
            source_file: input.file_name.clone(),
            readiness_score,
            total_rows_analyzed,
            sheets,
        })
    }

    pub fn readiness_path(&self, path: impl AsRef<Path>) -> Result<ReadinessReport> {
        self.readiness(&InputFile::read(path)?)
    }

    fn load_for(&self, operation: Operation, input: &InputFile) -> Result<Dataset> {
        let kind = input.kind()?;
        if !operation.accepts(kind) {
            return Err(AssayError::UnsupportedFormat(format!(
                "{} files are not supported for {}",
                kind,
                operation.name()
            )));
        }
        self.load(input)
    }
}

impl Default for Assay {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `f` over the dataset's tables: a single result for single-table
/// kinds, one per table name otherwise.
fn per_table<T>(dataset: &Dataset, f: impl Fn(&Table) -> T) -> Keyed<T> {
    if dataset.is_multi_table() {
        Keyed::Tables(
            dataset
                .tables
                .iter()
                .map(|(name, table)| (name.clone(), f(table)))
                .collect(),
        )
    } else {
        let empty = Table::empty();
        Keyed::Single(f(dataset.primary().unwrap_or(&empty)))
    }
}
