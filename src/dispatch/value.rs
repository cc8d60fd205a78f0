/*!
Payload shapes produced by commands.

  CommandValue
    ├── Single(CommandPrimitive)
    └── Many(Vec<CommandPrimitive>)     e.g. header line followed by a table

  CommandPrimitive
    ├── Text(String)                    rendered as a literal block
    └── Table(Table)                    ordered, uniquely named columns

Front ends never inspect payloads at runtime to decide how to render them:
the variant is the contract.
*/

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/* -------------------------------------------------------------------------- */
/* Cells                                                                      */
/* -------------------------------------------------------------------------- */

/// One table cell. Serializes to the bare JSON value (`null` for `Empty`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Empty,
}

impl Cell {
    /// Numeric cells are right-aligned by renderers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(n) => write!(f, "{n}"),
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Cell::Int(i64::from(n))
    }
}

impl From<u16> for Cell {
    fn from(n: u16) -> Self {
        Cell::Int(i64::from(n))
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Cell::Float(x)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Empty)
    }
}

/* -------------------------------------------------------------------------- */
/* Table                                                                      */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("row has {found} cells but the table has {expected} columns")]
    RowArity { expected: usize, found: usize },
}

/// Tabular dataset: ordered, uniquely named columns and ordered rows.
///
/// Every row holds exactly one cell per column; both invariants are checked
/// on construction so renderers can index freely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(columns.len());
        for c in &columns {
            if !seen.insert(c.as_str()) {
                return Err(TableError::DuplicateColumn(c.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowArity {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder-style variant of `push_row` for a whole row set.
    pub fn with_rows<I>(mut self, rows: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = Vec<Cell>>,
    {
        for row in rows {
            self.push_row(row)?;
        }
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

#[cfg(test)]
impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }
}

/* -------------------------------------------------------------------------- */
/* Primitive / Value                                                          */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CommandPrimitive {
    Text(String),
    Table(Table),
}

#[cfg(test)]
impl CommandPrimitive {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CommandPrimitive::Text(s) => Some(s),
            CommandPrimitive::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            CommandPrimitive::Table(t) => Some(t),
            CommandPrimitive::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandValue {
    Single(CommandPrimitive),
    Many(Vec<CommandPrimitive>),
}

impl CommandValue {
    /// Uniform view over both tiers, in emission order.
    pub fn primitives(&self) -> &[CommandPrimitive] {
        match self {
            CommandValue::Single(p) => std::slice::from_ref(p),
            CommandValue::Many(ps) => ps,
        }
    }
}

#[cfg(test)]
impl CommandValue {
    /// The text of a single text primitive.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CommandValue::Single(p) => p.as_text(),
            CommandValue::Many(_) => None,
        }
    }

    /// First table found in emission order.
    pub fn first_table(&self) -> Option<&Table> {
        self.primitives().iter().find_map(CommandPrimitive::as_table)
    }
}

impl From<CommandPrimitive> for CommandValue {
    fn from(p: CommandPrimitive) -> Self {
        CommandValue::Single(p)
    }
}

impl From<Vec<CommandPrimitive>> for CommandValue {
    fn from(ps: Vec<CommandPrimitive>) -> Self {
        CommandValue::Many(ps)
    }
}

impl From<String> for CommandValue {
    fn from(s: String) -> Self {
        CommandValue::Single(CommandPrimitive::Text(s))
    }
}

impl From<&str> for CommandValue {
    fn from(s: &str) -> Self {
        CommandValue::Single(CommandPrimitive::Text(s.to_string()))
    }
}

impl From<Table> for CommandValue {
    fn from(t: Table) -> Self {
        CommandValue::Single(CommandPrimitive::Table(t))
    }
}

/* --------------------------------- Tests ---------------------------------- */
