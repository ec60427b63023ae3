use std::ops::Range;

/// Contiguous column span, either bounded or running to the grid's last column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnSpan {
    Bounded(Range<usize>),
    ToEnd { start: usize },
}

impl ColumnSpan {
    /// Concrete column range for a grid `width` columns wide.
    pub fn resolve(&self, width: usize) -> Range<usize> {
        match self {
            ColumnSpan::Bounded(range) => range.clone(),
            ColumnSpan::ToEnd { start } => *start..width.max(*start),
        }
    }
}

/// Fixed offsets describing where a chart's data lives inside a sheet.
///
/// All indices are zero-based. Category labels are read from `label_col`
/// of every row in `category_rows`; the values of that row come from
/// `value_cols`, which is also the span the group labels are read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutContract {
    pub name: &'static str,
    /// Rows whose `title_col` cells form the title.
    pub title_rows: Range<usize>,
    pub title_col: usize,
    /// Joins the non-empty title fragments.
    pub title_separator: &'static str,
    /// Row holding the group (x axis) labels.
    pub group_row: usize,
    pub category_rows: Range<usize>,
    pub label_col: usize,
    pub value_cols: ColumnSpan,
}

impl LayoutContract {
    /// Rows a sheet needs for every region of the contract to be filled.
    pub fn full_height(&self) -> usize {
        self.category_rows.end.max(self.group_row + 1)
    }
}

/// Scenario workbook: four title rows, countries on row 6, components on rows 7 to 18.
pub const SCENARIO: LayoutContract = LayoutContract {
    name: "scenario",
    title_rows: 0..4,
    title_col: 0,
    title_separator: " | ",
    group_row: 5,
    category_rows: 6..18,
    label_col: 0,
    value_cols: ColumnSpan::ToEnd { start: 1 },
};

/// Country-split workbooks: title in A1, countries in B2:E2, components on rows 3 to 14.
pub const COUNTRY_SPLIT: LayoutContract = LayoutContract {
    name: "country split",
    title_rows: 0..1,
    title_col: 0,
    title_separator: " | ",
    group_row: 1,
    category_rows: 2..14,
    label_col: 0,
    value_cols: ColumnSpan::Bounded(1..5),
};
