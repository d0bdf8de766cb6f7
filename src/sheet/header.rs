use regex::Regex;
use serde::Serialize;
use std::{fmt::Display, sync::OnceLock};
use tracing::debug;

use crate::{sheet, sheet::row::normalize_cell};

/// Header labels are expected within this many rows from the top of the sheet.
pub const HEADER_SEARCH_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    No,
    Point,
    Direction,
    Road,
    BlockDistance,
    TotalDistance,
    Other,
}

impl Field {
    /// Resolution order. The data rows start right below [`Field::No`].
    pub const ALL: [Field; 7] = [
        Field::No,
        Field::Point,
        Field::Direction,
        Field::Road,
        Field::BlockDistance,
        Field::TotalDistance,
        Field::Other,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Field::No => "NO",
            Field::Point => "通過点",
            Field::Direction => "進路",
            Field::Road => "ルート",
            Field::BlockDistance => "区間",
            Field::TotalDistance => "積算",
            Field::Other => "情報",
        }
    }

    /// Does a (normalized) header cell name this field.
    pub fn matches(&self, cell: &str) -> bool {
        match self {
            Field::No => cell
                .get(..2)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(self.label())),
            _ => cell.starts_with(self.label()),
        }
    }

    const fn position(&self) -> usize {
        *self as usize
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::No => "sequence number",
            Field::Point => "through point",
            Field::Direction => "direction",
            Field::Road => "road",
            Field::BlockDistance => "block distance",
            Field::TotalDistance => "total distance",
            Field::Other => "annotation",
        };
        write!(f, "{name} ({})", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    columns: [usize; 7],
    data_start: usize,
}

impl ColumnIndex {
    /// Locates every header label within the first [`HEADER_SEARCH_ROWS`] rows.
    pub fn resolve(table: &[Vec<String>]) -> Result<Self, sheet::Error> {
        let mut columns = [0; 7];
        let mut data_start = 0;
        for field in Field::ALL {
            let (row, column) = find_header(table, field).ok_or(sheet::Error::HeaderNotFound(field))?;
            debug!("Found {field} at row {row}, column {column}");
            if field == Field::No {
                data_start = row + 1;
            }
            columns[field.position()] = column;
        }
        Ok(Self {
            columns,
            data_start,
        })
    }

    pub fn column(&self, field: Field) -> usize {
        self.columns[field.position()]
    }

    /// Zero based row where the cues begin.
    pub fn data_start(&self) -> usize {
        self.data_start
    }
}

fn find_header(table: &[Vec<String>], field: Field) -> Option<(usize, usize)> {
    table
        .iter()
        .take(HEADER_SEARCH_ROWS)
        .enumerate()
        .find_map(|(row, cells)| {
            cells
                .iter()
                .position(|cell| normalize_cell(cell).is_some_and(|cell| field.matches(&cell)))
                .map(|column| (row, column))
        })
}

/// First cell of the header region that carries a brevet code such as `200BRM`.
pub fn find_title(table: &[Vec<String>]) -> Option<String> {
    static TITLE_RE: OnceLock<Regex> = OnceLock::new();
    let title_re = TITLE_RE.get_or_init(|| Regex::new(r"\d+BRM").expect("valid regex"));

    table
        .iter()
        .take(HEADER_SEARCH_ROWS)
        .flatten()
        .filter_map(|cell| normalize_cell(cell))
        .find(|cell| title_re.is_match(cell))
}
