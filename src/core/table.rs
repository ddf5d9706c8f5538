//! Union-of-keys table built from heterogeneous directive rows

use crate::core::chart::ChartError;
use crate::core::markup::Row;
use serde_json::Value;

/// Rectangular view over directive rows
///
/// The column set is the union of keys across all rows in first-seen order.
/// Cells a row does not provide are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Build a table from parsed rows
    #[must_use]
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            for (key, _) in row {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let cells = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| {
                        row.iter()
                            .find(|(key, _)| key == column)
                            .map(|(_, value)| value.clone())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self {
            columns,
            rows: cells,
        }
    }

    /// Column names in table order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row-major cells
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name of the column at `index`
    ///
    /// # Errors
    /// [`ChartError::MissingColumn`] when the table is narrower than `index + 1`.
    pub fn column_name(&self, index: usize) -> Result<&str, ChartError> {
        self.columns
            .get(index)
            .map(String::as_str)
            .ok_or(ChartError::MissingColumn {
                index,
                available: self.columns.len(),
            })
    }

    /// Position of a column by name
    ///
    /// # Errors
    /// [`ChartError::MissingNamedColumn`] when no such column exists.
    pub fn position(&self, name: &str) -> Result<usize, ChartError> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| ChartError::MissingNamedColumn(name.to_string()))
    }

    /// Raw cells of one column, top to bottom
    ///
    /// # Errors
    /// [`ChartError::MissingColumn`] when the column does not exist.
    pub fn text_column(&self, index: usize) -> Result<Vec<String>, ChartError> {
        self.column_name(index)?;
        Ok(self.rows.iter().map(|row| row[index].clone()).collect())
    }

    /// Cells of one column as JSON values: numbers where they parse, strings otherwise
    ///
    /// # Errors
    /// [`ChartError::MissingColumn`] when the column does not exist.
    pub fn values(&self, index: usize) -> Result<Vec<Value>, ChartError> {
        self.column_name(index)?;
        Ok(self.rows.iter().map(|row| auto_value(&row[index])).collect())
    }

    /// Cells of one column parsed as numbers
    ///
    /// # Errors
    /// [`ChartError::MissingColumn`] when the column does not exist, or
    /// [`ChartError::NotNumeric`] at the first cell that is not a finite number.
    pub fn numbers(&self, index: usize) -> Result<Vec<f64>, ChartError> {
        let column = self.column_name(index)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                parse_number(&cells[index]).ok_or_else(|| ChartError::NotNumeric {
                    column: column.to_string(),
                    row,
                    value: cells[index].clone(),
                })
            })
            .collect()
    }

    /// Whether every cell of a column parses as a number
    #[must_use]
    pub fn is_numeric(&self, index: usize) -> bool {
        index < self.columns.len()
            && self
                .rows
                .iter()
                .all(|row| parse_number(&row[index]).is_some())
    }
}

/// Parse a trimmed cell as a finite `f64`
#[must_use]
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Convert a cell to a JSON number when it parses, a JSON string otherwise
#[must_use]
pub fn auto_value(cell: &str) -> Value {
    parse_number(cell)
        .and_then(serde_json::Number::from_f64)
        .map_or_else(|| Value::String(cell.to_string()), Value::Number)
}
