//! Readiness scoring.

use std::collections::HashSet;

use tracing::debug;

use crate::schema::{ColumnType, Table, Value};

use super::score::{ReadinessScore, ReadinessWeights};
use super::sql_schema::split_statements;

/// Penalty per text column holding values that read as numbers.
const NUMERIC_TEXT_PENALTY: f64 = 5.0;
/// Penalty per column with a single distinct value.
const CONSTANT_COLUMN_PENALTY: f64 = 10.0;
/// Penalty for a SQL script without any table definition.
const NO_CREATE_TABLE_PENALTY: f64 = 50.0;

/// Computes readiness scores.
#[derive(Debug, Clone, Default)]
pub struct ReadinessScorer {
    weights: ReadinessWeights,
}

impl ReadinessScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ReadinessWeights) -> Self {
        Self { weights }
    }

    /// Score a table on completeness, duplicate rows and column health.
    pub fn score(&self, table: &Table) -> ReadinessScore {
        if table.is_empty() {
            return ReadinessScore::empty();
        }

        let completeness = self.completeness(table);
        let consistency = self.consistency(table);
        let schema_health = self.schema_health(table);
        let overall = self.weights.completeness * completeness
            + self.weights.consistency * consistency
            + self.weights.schema_health * schema_health;

        debug!(completeness, consistency, schema_health, overall, "scored table");

        ReadinessScore {
            overall: to_score(overall),
            completeness: to_score(completeness),
            consistency: to_score(consistency),
            schema_health: to_score(schema_health),
            message: None,
        }
    }

    /// Score a SQL script on its schema alone; no data is looked at.
    pub fn score_sql_script(&self, script: &str) -> ReadinessScore {
        let schema_health = if split_statements(script).is_empty() {
            0.0
        } else if !script.to_lowercase().contains("create table") {
            100.0 - NO_CREATE_TABLE_PENALTY
        } else {
            100.0
        };

        ReadinessScore {
            overall: to_score(schema_health * self.weights.schema_health),
            completeness: 100,
            consistency: 100,
            schema_health: to_score(schema_health),
            message: None,
        }
    }

    fn completeness(&self, table: &Table) -> f64 {
        let missing: usize = table.columns().iter().map(|c| c.null_count()).sum();
        (100.0 - missing as f64 / table.cell_count() as f64 * 100.0).max(0.0)
    }

    /// Rows equal to an earlier row count as duplicates; missing equals missing.
    fn consistency(&self, table: &Table) -> f64 {
        let mut seen: HashSet<Vec<&Value>> = HashSet::with_capacity(table.row_count());
        let duplicates = table.rows().filter(|row| !seen.insert(row.clone())).count();
        (100.0 - duplicates as f64 / table.row_count() as f64 * 100.0).max(0.0)
    }

    fn schema_health(&self, table: &Table) -> f64 {
        let mut health = 100.0;
        for column in table.columns() {
            if column.column_type == ColumnType::Text && column.non_null().any(reads_as_number) {
                health -= NUMERIC_TEXT_PENALTY;
            }
        }
        for column in table.columns() {
            if column.distinct_count() == 1 {
                health -= CONSTANT_COLUMN_PENALTY;
            }
        }
        f64::max(health, 0.0)
    }
}

fn reads_as_number(value: &Value) -> bool {
    value
        .as_str()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .is_some_and(|n| !n.is_nan())
}

fn to_score(value: f64) -> i64 {
    value.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    fn csv(data: &str) -> Table {
        Parser::new().parse_bytes(data.as_bytes()).unwrap()
    }

    #[test]
    fn test_empty_table() {
        let score = ReadinessScorer::new().score(&csv("a,b\n"));
        assert_eq!(score, ReadinessScore::empty());
    }

    #[test]
    fn test_clean_table() {
        let score = ReadinessScorer::new().score(&csv("id,name\n1,a\n2,b\n3,c\n"));
        assert_eq!(score.overall, 100);
        assert_eq!(score.completeness, 100);
        assert_eq!(score.consistency, 100);
        assert_eq!(score.schema_health, 100);
        assert!(score.message.is_none());
    }

    #[test]
    fn test_duplicates() {
        let mut data = String::from("id,name\n");
        for i in 0..8 {
            data.push_str(&format!("{},n{}\n", i, i));
        }
        data.push_str("0,n0\n1,n1\n");
        let score = ReadinessScorer::new().score(&csv(&data));
        assert_eq!(score.consistency, 80);
        assert_eq!(score.overall, 92);
    }

    #[test]
    fn test_missing_rows_count_as_duplicates_of_each_other() {
        let score = ReadinessScorer::new().score(&csv("a,b\n1,\n1,\n2,x\n"));
        assert_eq!(score.consistency, 67);
        assert_eq!(score.completeness, 67);
    }

    #[test]
    fn test_schema_health_penalties() {
        // code: text with numeric-looking values (-5); flag: constant (-10)
        let score = ReadinessScorer::new().score(&csv("code,flag\n12,y\nabc,y\n"));
        assert_eq!(score.schema_health, 85);
    }

    #[test]
    fn test_sql_script_scoring() {
        let scorer = ReadinessScorer::new();
        let with_table = scorer.score_sql_script("CREATE TABLE t (a INT);");
        assert_eq!((with_table.schema_health, with_table.overall), (100, 20));
        assert_eq!((with_table.completeness, with_table.consistency), (100, 100));

        let no_table = scorer.score_sql_script("INSERT INTO t VALUES (1);");
        assert_eq!((no_table.schema_health, no_table.overall), (50, 10));

        let nothing = scorer.score_sql_script("   \n");
        assert_eq!((nothing.schema_health, nothing.overall), (0, 0));

        let only_comments = scorer.score_sql_script("-- schema goes here\n");
        assert_eq!((only_comments.schema_health, only_comments.overall), (50, 10));
    }
}
