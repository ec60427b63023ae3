//! Slices a [`ChartSeries`] out of a raw [`CellGrid`] according to a [`LayoutContract`].
//!
//! Extraction is a single pure pass. Ranges (title rows, category rows,
//! value columns) are cut down to what the grid holds, since sheet readers
//! trim trailing blank rows and columns. Single positions (the group row and
//! the label column) must exist, otherwise a [`LayoutError`] names the
//! first one that falls outside.

use std::ops::Range;

use crate::cell::{CellGrid, CellValue};
use crate::error::LayoutError;
use crate::layout::LayoutContract;
use crate::series::ChartSeries;

/// Extracts title, group labels, category labels and the value matrix.
///
/// * Title: the non-empty cells of `title_rows` in `title_col`, joined with
///   the contract's separator.
/// * Groups: every cell of `group_row` within `value_cols`, empty ones included.
/// * Categories: one per row of `category_rows`, kept even when the label is empty.
/// * Values: cells that do not read as numbers become `None`.
///
/// # Examples
/// ```
/// use pv_dashboard::cell::CellGrid;
/// use pv_dashboard::extract::extract;
/// use pv_dashboard::layout::COUNTRY_SPLIT;
///
/// let grid = CellGrid::from_rows(vec![
///     vec!["Imported cells".into()],
///     vec!["".into(), "India".into(), "USA".into(), "Germany".into(), "Australia".into()],
///     vec!["Labour".into(), 0.1.into(), 0.3.into(), "n/a".into(), 0.28.into()],
/// ]);
/// let series = extract(&grid, &COUNTRY_SPLIT).unwrap();
/// assert_eq!(series.title, "Imported cells");
/// assert_eq!(series.groups, vec!["India", "USA", "Germany", "Australia"]);
/// assert_eq!(series.values, vec![vec![Some(0.1), Some(0.3), None, Some(0.28)]]);
///
/// // Without a group row there is nothing to anchor the chart to
/// assert!(extract(&CellGrid::from_rows(vec![vec!["title".into()]]), &COUNTRY_SPLIT).is_err());
/// ```
pub fn extract(grid: &CellGrid, contract: &LayoutContract) -> Result<ChartSeries, LayoutError> {
    let cols = clamp(contract.value_cols.resolve(grid.cols()), grid.cols());

    let title = extract_title(grid, contract);
    let groups = row_span(grid, contract.group_row, &cols, "group row")?
        .iter()
        .map(CellValue::to_text)
        .collect();

    let rows = clamp(contract.category_rows.clone(), grid.rows());
    let mut categories = Vec::with_capacity(rows.len());
    let mut values = Vec::with_capacity(rows.len());
    for row in rows {
        let label = grid
            .get(row, contract.label_col)
            .ok_or_else(|| out_of_bounds(grid, "category labels", row, contract.label_col))?;
        categories.push(label.to_text());
        values.push(
            row_span(grid, row, &cols, "category rows")?
                .iter()
                .map(CellValue::as_number)
                .collect(),
        );
    }

    Ok(ChartSeries {
        title,
        groups,
        categories,
        values,
    })
}

/// Joins the non-empty title fragments. Never fails: missing rows are skipped.
pub fn extract_title(grid: &CellGrid, contract: &LayoutContract) -> String {
    contract
        .title_rows
        .clone()
        .filter_map(|row| grid.get(row, contract.title_col))
        .map(|cell| cell.to_text().trim().to_string())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(contract.title_separator)
}

fn clamp(range: Range<usize>, limit: usize) -> Range<usize> {
    let end = range.end.min(limit);
    range.start.min(end)..end
}

fn out_of_bounds(grid: &CellGrid, region: &'static str, row: usize, col: usize) -> LayoutError {
    LayoutError {
        region,
        row,
        col,
        height: grid.rows(),
        width: grid.cols(),
    }
}

// `cols` must already be clamped to the grid width.
fn row_span<'a>(
    grid: &'a CellGrid,
    row: usize,
    cols: &Range<usize>,
    region: &'static str,
) -> Result<&'a [CellValue], LayoutError> {
    let cells = grid
        .row(row)
        .ok_or_else(|| out_of_bounds(grid, region, row, cols.start))?;
    Ok(&cells[cols.clone()])
}
