//! Raw spreadsheet cells, rows, and persisted key names.

/// Position of a record inside the invited or walk-in list.
pub type RecordIndex = usize;

/// Durable key holding the invited list as a JSON array.
pub const INVITED_LIST_KEY: &str = "invitedList";
/// Durable key holding the walk-in list as a JSON array.
pub const WALK_IN_LIST_KEY: &str = "walkInList";
/// Durable key holding the raw event name.
pub const EVENT_NAME_KEY: &str = "eventName";

/// Single spreadsheet cell as produced by the codec.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Blank or error cell.
    #[default]
    Empty,
    /// String cell.
    Text(String),
    /// Numeric cell, including date serials.
    Number(f64),
    /// Boolean cell.
    Bool(bool),
}

impl CellValue {
    /// Returns false for blank, `false`, zero, NaN, and empty-string cells.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Text(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
        }
    }

    /// Textual form of the cell, trimmed.
    pub fn to_trimmed_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One data row of an imported sheet, keyed by header text in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column; later duplicates never shadow earlier ones on lookup.
    pub fn push(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.push((column.into(), value));
    }

    /// Builder form of [`RawRow::push`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(column, value.into());
        self
    }

    /// First cell whose lower-cased column name equals `target`.
    ///
    /// `target` must already be lower-case.
    pub fn find_folded(&self, target: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(column, _)| column.to_lowercase() == target)
            .map(|(_, value)| value)
    }

    /// True when every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| matches!(v, CellValue::Empty))
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, CellValue)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(CellValue::Number(11_987_654_321.0).to_trimmed_text(), "11987654321");
        assert_eq!(CellValue::Number(1.5).to_trimmed_text(), "1.5");
    }

    #[test]
    fn falsy_cells() {
        assert!(!CellValue::Empty.is_truthy());
        assert!(!CellValue::Number(0.0).is_truthy());
        assert!(!CellValue::Bool(false).is_truthy());
        assert!(!CellValue::Text(String::new()).is_truthy());
        assert!(CellValue::Text("0".into()).is_truthy());
    }

    #[test]
    fn first_folded_column_wins() {
        let row = RawRow::new().with("Nome", "Ana").with("NOME", "Bia");
        assert_eq!(row.find_folded("nome"), Some(&CellValue::Text("Ana".into())));
    }
}
