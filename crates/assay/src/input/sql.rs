//! SQL dumps, replayed into a throwaway in-memory SQLite database.

use indexmap::IndexMap;
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use tracing::debug;

use crate::error::{AssayError, Result};
use crate::inference::TypeInferrer;
use crate::schema::{Table, Value};

/// An in-memory database owned by one load call.
///
/// The connection closes when the workspace is dropped, on success and
/// error paths alike.
pub struct SqlWorkspace {
    conn: Connection,
    file_name: String,
}

impl SqlWorkspace {
    pub fn open(file_name: &str) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            file_name: file_name.to_string(),
        })
    }

    /// Execute every statement of the script.
    pub fn replay(&self, script: &str) -> Result<()> {
        self.conn
            .execute_batch(script)
            .map_err(|e| AssayError::parse(&self.file_name, format!("SQL script failed: {}", e)))
    }

    /// User tables in creation order.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY rowid",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Read a whole table into typed columns.
    pub fn read_table(&self, name: &str) -> Result<Table> {
        let sql = format!("SELECT * FROM {}", quote_identifier(name));
        let mut stmt = self.conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut cells: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            for (idx, column) in cells.iter_mut().enumerate() {
                column.push(to_value(row.get_ref(idx)?));
            }
        }

        let inferrer = TypeInferrer::new();
        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, values)| inferrer.unify(name, values))
            .collect();
        Table::new(columns)
    }
}

/// Replay a SQL dump and read back every user table.
pub fn load_sql_tables(file_name: &str, script: &str) -> Result<IndexMap<String, Table>> {
    let workspace = SqlWorkspace::open(file_name)?;
    workspace.replay(script)?;

    let mut tables = IndexMap::new();
    for name in workspace.table_names()? {
        let table = workspace.read_table(&name)?;
        debug!(table = %name, rows = table.row_count(), "loaded SQL table");
        tables.insert(name, table);
    }
    Ok(tables)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn to_value(cell: ValueRef<'_>) -> Value {
    match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => {
            Value::Text(bytes.iter().map(|b| format!("{:02x}", b)).collect())
        }
    }
}
