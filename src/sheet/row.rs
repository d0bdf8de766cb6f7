use crate::sheet::{ColumnIndex, Field};

const FULL_WIDTH_SPACE: char = '\u{3000}';

/// Collapses runs of ASCII and full-width spaces into a single space and trims the ends.
/// A cell with nothing left is absent.
pub fn normalize_cell(cell: &str) -> Option<String> {
    let mut normalized = String::with_capacity(cell.len());
    let mut in_space = false;
    for c in cell.chars() {
        if c == ' ' || c == FULL_WIDTH_SPACE {
            if !in_space {
                normalized.push(' ');
            }
            in_space = true;
        } else {
            normalized.push(c);
            in_space = false;
        }
    }
    let normalized = normalized.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

/// One data row, keyed by [`Field`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    cells: [Option<Box<str>>; 7],
}

impl NormalizedRow {
    pub fn from_raw(raw: &[String], columns: &ColumnIndex) -> Self {
        let mut row = Self::default();
        for field in Field::ALL {
            let cell = raw
                .get(columns.column(field))
                .and_then(|cell| normalize_cell(cell));
            row.set(field, cell);
        }
        row
    }

    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.set(field, normalize_cell(value));
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.cells[field as usize].as_deref()
    }

    fn set(&mut self, field: Field, value: Option<String>) {
        self.cells[field as usize] = value.map(|value| value.into());
    }
}

/// Normalizes the data rows below the header. The table ends at the first
/// row without a sequence number, which drops footers and trailing blank rows.
pub fn normalize_rows(table: &[Vec<String>], columns: &ColumnIndex) -> Vec<NormalizedRow> {
    table
        .iter()
        .skip(columns.data_start())
        .map(|raw| NormalizedRow::from_raw(raw, columns))
        .take_while(|row| row.get(Field::No).is_some())
        .collect()
}
