use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result, TableError};

/// Concrete data source a selection resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SourceId {
    pub file: PathBuf,
    pub sheet: String,
}

impl SourceId {
    pub fn new(file: impl Into<PathBuf>, sheet: impl Into<String>) -> Self {
        SourceId {
            file: file.into(),
            sheet: sheet.into(),
        }
    }
}

/// One first-level choice and its ordered `display label -> sheet` entries.
#[derive(Clone, Debug)]
struct Category {
    name: String,
    entries: Vec<(String, String)>,
}

/// Two-level mapping `category -> display label -> sheet identifier`.
///
/// Order is kept as configured since it is the order the choices are offered in.
#[derive(Clone, Debug, Default)]
pub struct ScenarioCatalog {
    categories: Vec<Category>,
}

impl ScenarioCatalog {
    pub fn new() -> Self {
        ScenarioCatalog::default()
    }

    /// Adds a category with its entries, builder style.
    pub fn with_category<C, L, S>(
        mut self,
        name: C,
        entries: impl IntoIterator<Item = (L, S)>,
    ) -> Self
    where
        C: Into<String>,
        L: Into<String>,
        S: Into<String>,
    {
        self.categories.push(Category {
            name: name.into(),
            entries: entries
                .into_iter()
                .map(|(label, sheet)| (label.into(), sheet.into()))
                .collect(),
        });
        self
    }

    /// Resolves a selection to its sheet identifier.
    ///
    /// # Examples
    /// ```
    /// use pv_dashboard::scenario::SCENARIO_CATALOG;
    ///
    /// let sheet = SCENARIO_CATALOG
    ///     .resolve("Imported from China", "Imported - China - Wafer")
    ///     .unwrap();
    /// assert_eq!(sheet, "Imported Wafer from China");
    /// ```
    pub fn resolve(&self, category: &str, choice: &str) -> Result<&str> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .and_then(|c| c.entries.iter().find(|(label, _)| label == choice))
            .map(|(_, sheet)| sheet.as_str())
            .ok_or_else(|| DashboardError::configuration(category, choice))
    }

    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Display labels offered under `category`.
    pub fn choices(&self, category: &str) -> Result<Vec<&str>> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.entries.iter().map(|(label, _)| label.as_str()).collect())
            .ok_or_else(|| DashboardError::configuration(category, ""))
    }

    /// Every `(category, label, sheet)` triple in configured order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.categories.iter().flat_map(|c| {
            c.entries
                .iter()
                .map(move |(label, sheet)| (c.name.as_str(), label.as_str(), sheet.as_str()))
        })
    }

    /// Checks the catalog invariants: labels are unique within a category,
    /// and no sheet is reachable from two different categories.
    pub fn validate(&self) -> std::result::Result<(), TableError> {
        let mut seen_categories = HashSet::new();
        let mut sheet_owner: Vec<(&str, &str)> = Vec::new();

        for category in &self.categories {
            if !seen_categories.insert(category.name.as_str()) {
                return Err(TableError::DuplicateCategory(category.name.clone()));
            }
            let mut labels = HashSet::new();
            for (label, sheet) in &category.entries {
                if sheet.is_empty() {
                    return Err(TableError::EmptySheet {
                        category: category.name.clone(),
                        label: label.clone(),
                    });
                }
                if !labels.insert(label.as_str()) {
                    return Err(TableError::DuplicateLabel {
                        category: category.name.clone(),
                        label: label.clone(),
                    });
                }
                match sheet_owner.iter().find(|(s, _)| *s == sheet.as_str()) {
                    Some((_, owner)) if *owner != category.name => {
                        return Err(TableError::SharedSheet {
                            sheet: sheet.clone(),
                            first: owner.to_string(),
                            second: category.name.clone(),
                        });
                    }
                    Some(_) => {}
                    None => sheet_owner.push((sheet.as_str(), category.name.as_str())),
                }
            }
        }
        Ok(())
    }
}

/// Ordered mapping from a first-level choice to the file that backs it.
#[derive(Clone, Debug, Default)]
pub struct ImportFileMap {
    files: Vec<(String, PathBuf)>,
}

impl ImportFileMap {
    pub fn new<K: Into<String>, P: Into<PathBuf>>(files: impl IntoIterator<Item = (K, P)>) -> Self {
        ImportFileMap {
            files: files.into_iter().map(|(k, p)| (k.into(), p.into())).collect(),
        }
    }

    pub fn resolve(&self, key: &str) -> Result<&Path> {
        self.files
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p.as_path())
            .ok_or_else(|| DashboardError::configuration(key, ""))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.files.iter().map(|(k, _)| k.as_str()).collect()
    }
}

pub const SCENARIO_FILE: &str = "graph1.xlsx";

lazy_static! {
    /// Scenario catalog of the comparative-scenario chart, backed by [`SCENARIO_FILE`].
    pub static ref SCENARIO_CATALOG: ScenarioCatalog = {
        let catalog = ScenarioCatalog::new()
            .with_category(
                "Domestic",
                [
                    ("Domestic - Manufacturing 2025", "Domestic manufacturing in 2025"),
                    ("Domestic - Manufacturing 2030", "Domestic manufacturing in 2030"),
                ],
            )
            .with_category(
                "Imported from China",
                [
                    ("Imported - China - Polysilicon", "Imported Polysilicon from China"),
                    ("Imported - China - Wafer", "Imported Wafer from China"),
                    ("Imported - China - Cell", "Imported Cell from China"),
                ],
            )
            .with_category(
                "Imported from Vietnam",
                [
                    ("Imported - Vietnam - Wafer", "Imported Wafer from Vietnam"),
                    ("Imported - Vietnam - Cell", "Imported Cell from Vietnam"),
                ],
            );
        catalog.validate().expect("scenario catalog is consistent");
        catalog
    };

    /// Country of import -> workbook whose sheets are the countries of manufacture.
    pub static ref IMPORT_FILES: ImportFileMap = ImportFileMap::new([
        ("China", "graph2_China.xlsx"),
        ("Vietnam", "graph2_Vietnam.xlsx"),
    ]);
}
