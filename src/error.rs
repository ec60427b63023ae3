use std::path::PathBuf;

/// Failure raised when a layout contract reaches outside the grid it is applied to.
///
/// Carries the region that was being read and the grid's real bounds, so a
/// drifted source sheet can be diagnosed from the message alone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{region} expects cell ({row}, {col}) but the grid is only {height}x{width}")]
pub struct LayoutError {
    /// Region of the contract being read (`"group row"`, `"category rows"`, ...)
    pub region: &'static str,
    /// Zero-based row the contract expected
    pub row: usize,
    /// Zero-based column the contract expected
    pub col: usize,
    /// Actual number of rows in the grid
    pub height: usize,
    /// Actual number of columns in the grid
    pub width: usize,
}

/// A grid whose cell count does not fill its declared shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("a {rows}x{cols} grid cannot hold {actual} cells")]
pub struct GridShapeError {
    pub rows: usize,
    pub cols: usize,
    pub actual: usize,
}

/// Inconsistency in one of the static lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("duplicate category {0:?}")]
    DuplicateCategory(String),

    #[error("empty sheet for {category:?} / {label:?}")]
    EmptySheet { category: String, label: String },

    #[error("duplicate label {label:?} in {category:?}")]
    DuplicateLabel { category: String, label: String },

    #[error("sheet {sheet:?} listed under both {first:?} and {second:?}")]
    SharedSheet {
        sheet: String,
        first: String,
        second: String,
    },

    #[error("bad colour {hex:?} for {label:?}")]
    BadColor { label: String, hex: String },
}

/// Every way a single chart interaction can fail.
///
/// None of these are retried. They terminate the one render they belong to
/// and are reported in place of that chart.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// A selection that is not part of the static configuration.
    #[error("no source configured for {first:?} / {second:?}")]
    Configuration { first: String, second: String },

    /// A backing file or sheet could not be located or read.
    #[error("cannot read {}{}: {reason}", .file.display(), sheet_suffix(.sheet))]
    SourceNotFound {
        file: PathBuf,
        sheet: Option<String>,
        reason: String,
    },

    /// The sheet's shape no longer matches the layout contract.
    #[error("layout mismatch in {} [{sheet}]: {source}", .file.display())]
    LayoutMismatch {
        file: PathBuf,
        sheet: String,
        #[source]
        source: LayoutError,
    },
}

fn sheet_suffix(sheet: &Option<String>) -> String {
    match sheet {
        Some(name) => format!(" [{}]", name),
        None => String::new(),
    }
}

impl DashboardError {
    pub fn configuration(first: impl Into<String>, second: impl Into<String>) -> Self {
        DashboardError::Configuration {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn source_not_found(
        file: impl Into<PathBuf>,
        sheet: Option<&str>,
        reason: impl ToString,
    ) -> Self {
        DashboardError::SourceNotFound {
            file: file.into(),
            sheet: sheet.map(str::to_string),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_file_and_sheet() {
        let err = DashboardError::source_not_found("data/graph1.xlsx", Some("Sheet9"), "missing");
        assert_eq!(err.to_string(), "cannot read data/graph1.xlsx [Sheet9]: missing");

        let err = DashboardError::source_not_found("data/graph1.xlsx", None, "missing");
        assert_eq!(err.to_string(), "cannot read data/graph1.xlsx: missing");
    }

    #[test]
    fn layout_mismatch_carries_offsets() {
        let err = DashboardError::LayoutMismatch {
            file: PathBuf::from("graph1.xlsx"),
            sheet: "Domestic manufacturing in 2025".to_string(),
            source: LayoutError {
                region: "group row",
                row: 5,
                col: 0,
                height: 3,
                width: 4,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("Domestic manufacturing in 2025"));
        assert!(msg.contains("group row expects cell (5, 0) but the grid is only 3x4"));
    }
}
