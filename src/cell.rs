use serde::{Deserialize, Serialize};

use crate::error::GridShapeError;

/// A single untyped cell as read from a source sheet.
///
/// Only the source format's native types survive; nothing is coerced at load time.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    /// Spreadsheet error literal such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric reading of the cell, or `None` when it should not be plotted.
    ///
    /// Text is accepted when it parses as a decimal number after trimming.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Text reading of the cell. Empty cells give an empty string.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }
}

// Integral values print without a fractional part: 2025, not 2025.0
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Rectangular, zero-indexed, row-major grid of cells.
///
/// Every row is data; there is no header interpretation. `cells` always
/// holds exactly `rows * cols` values, deserialized grids included.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(try_from = "RawGrid")]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<CellValue>,
}

#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<CellValue>,
}

impl TryFrom<RawGrid> for CellGrid {
    type Error = GridShapeError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        CellGrid::from_cells(raw.rows, raw.cols, raw.cells)
    }
}

impl CellGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        CellGrid {
            rows,
            cols,
            cells: vec![CellValue::Empty; rows * cols],
        }
    }

    /// Wraps row-major `cells`, checking that they fill `rows x cols` exactly.
    pub fn from_cells(
        rows: usize,
        cols: usize,
        cells: Vec<CellValue>,
    ) -> Result<Self, GridShapeError> {
        match rows.checked_mul(cols) {
            Some(expected) if expected == cells.len() => Ok(CellGrid { rows, cols, cells }),
            _ => Err(GridShapeError {
                rows,
                cols,
                actual: cells.len(),
            }),
        }
    }

    /// Builds a grid from ragged rows, padding short rows with `Empty`.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = CellGrid::new(rows.len(), cols);
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                grid.set(r, c, value);
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Writes a cell, ignoring positions outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if row < self.rows && col < self.cols {
            let index = row * self.cols + col;
            self.cells[index] = value;
        }
    }

    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.cells.get(start..start + self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercion() {
        assert_eq!(CellValue::Number(1.5).as_number(), Some(1.5));
        assert_eq!(CellValue::Text(" 0.25 ".into()).as_number(), Some(0.25));
        assert_eq!(CellValue::Text("n/a".into()).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Error("#DIV/0!".into()).as_number(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_number(), None);
        assert_eq!(CellValue::Text("inf".into()).as_number(), None);
    }

    #[test]
    fn text_of_integral_numbers_has_no_fraction() {
        assert_eq!(CellValue::Number(2025.0).to_text(), "2025");
        assert_eq!(CellValue::Number(0.5).to_text(), "0.5");
        assert_eq!(CellValue::Empty.to_text(), "");
    }

    #[test]
    fn ragged_rows_are_padded() {
        let grid = CellGrid::from_rows(vec![
            vec!["a".into()],
            vec!["b".into(), 1.0.into(), 2.0.into()],
        ]);
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.get(0, 2), Some(&CellValue::Empty));
        assert_eq!(grid.get(1, 2), Some(&CellValue::Number(2.0)));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert_eq!(grid.row(1).map(|r| r.len()), Some(3));
    }

    #[test]
    fn mis_sized_cells_are_rejected() {
        assert!(CellGrid::from_cells(2, 2, vec![CellValue::Empty; 4]).is_ok());

        let err = CellGrid::from_cells(3, 2, Vec::new()).unwrap_err();
        assert_eq!((err.rows, err.cols, err.actual), (3, 2, 0));
        assert!(CellGrid::from_cells(usize::MAX, 2, Vec::new()).is_err());
    }

    #[test]
    fn deserialized_grid_must_be_rectangular() {
        let bad = serde_json::from_str::<CellGrid>(r#"{"rows":3,"cols":2,"cells":[]}"#);
        assert!(bad.is_err());

        let grid = CellGrid::from_rows(vec![vec!["Labour".into(), 0.5.into()]]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<CellGrid>(&json).unwrap(), grid);
    }
}
