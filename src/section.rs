use log::warn;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::colors::{COMPONENT_COLORS, ColorMap};
use crate::error::{DashboardError, Result};
use crate::extract::extract;
use crate::layout::{COUNTRY_SPLIT, LayoutContract, SCENARIO};
use crate::loader::{CalamineSource, SheetLoader, SheetSource};
use crate::scenario::{
    IMPORT_FILES, ImportFileMap, SCENARIO_CATALOG, SCENARIO_FILE, ScenarioCatalog, SourceId,
};
use crate::series::ChartSeries;

/// How a section turns its two selections into a sheet.
#[derive(Clone, Debug)]
pub enum SectionSource {
    /// One workbook; `first` is a catalog category and `second` one of its labels.
    Catalog {
        file: PathBuf,
        catalog: ScenarioCatalog,
    },
    /// `first` picks a workbook; `second` is any sheet listed in it.
    SheetPerFile { files: ImportFileMap },
}

/// One chart of the dashboard with its data source and layout.
#[derive(Clone, Debug)]
pub struct Section {
    pub id: &'static str,
    pub heading: &'static str,
    pub first_prompt: &'static str,
    pub second_prompt: &'static str,
    pub source: SectionSource,
    pub layout: LayoutContract,
    /// Use the resolved sheet identifier as the chart caption.
    pub sheet_as_caption: bool,
}

impl Section {
    /// Comparative scenario analysis for the major markets.
    pub fn scenarios() -> Self {
        Section {
            id: "scenarios",
            heading: "Comparative Scenario Analysis for the Major Markets",
            first_prompt: "Select Scenario Type",
            second_prompt: "Select Sub-scenario",
            source: SectionSource::Catalog {
                file: PathBuf::from(SCENARIO_FILE),
                catalog: SCENARIO_CATALOG.clone(),
            },
            layout: SCENARIO,
            sheet_as_caption: true,
        }
    }

    /// Domestic against imported components, one workbook per country of import.
    pub fn imports() -> Self {
        Section {
            id: "imports",
            heading: "Comparative Analysis between Domestic and Imported at Country Level",
            first_prompt: "Select the Country of Import",
            second_prompt: "Select Country of Manufacturing",
            source: SectionSource::SheetPerFile {
                files: IMPORT_FILES.clone(),
            },
            layout: COUNTRY_SPLIT,
            sheet_as_caption: false,
        }
    }
}

/// A fully rendered selection.
#[derive(Clone, Debug, Serialize)]
pub struct SectionView {
    pub section: &'static str,
    pub source: SourceId,
    /// Caption above the bars; empty when the section has none.
    pub caption: String,
    pub series: ChartSeries,
}

/// Sections plus the shared sheet cache.
///
/// Runs the resolve, load and extract pipeline for one selection at a time.
/// Sections are independent: an error in one never touches another.
pub struct Dashboard<S = CalamineSource> {
    data_dir: PathBuf,
    sections: Vec<Section>,
    loader: SheetLoader<S>,
    colors: ColorMap,
}

impl Dashboard<CalamineSource> {
    /// The two stock sections reading workbooks from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Dashboard::with_loader(
            data_dir,
            vec![Section::scenarios(), Section::imports()],
            SheetLoader::new(),
        )
    }
}

impl<S: SheetSource> Dashboard<S> {
    pub fn with_loader(
        data_dir: impl Into<PathBuf>,
        sections: Vec<Section>,
        loader: SheetLoader<S>,
    ) -> Self {
        for section in &sections {
            if let SectionSource::Catalog { catalog, .. } = &section.source {
                if let Err(e) = catalog.validate() {
                    warn!("section {}: {}", section.id, e);
                }
            }
        }
        Dashboard {
            data_dir: data_dir.into(),
            sections,
            loader,
            colors: COMPONENT_COLORS.clone(),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn loader(&self) -> &SheetLoader<S> {
        &self.loader
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn section(&self, id: &str) -> Result<&Section> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| DashboardError::configuration(id, ""))
    }

    /// First-level choices of a section.
    pub fn first_choices(&self, id: &str) -> Result<Vec<String>> {
        let section = self.section(id)?;
        let choices = match &section.source {
            SectionSource::Catalog { catalog, .. } => catalog.categories(),
            SectionSource::SheetPerFile { files } => files.keys(),
        };
        Ok(choices.into_iter().map(str::to_string).collect())
    }

    /// Second-level choices under `first`.
    ///
    /// For workbook-per-choice sections this lists the workbook's sheets.
    pub fn second_choices(&self, id: &str, first: &str) -> Result<Vec<String>> {
        let section = self.section(id)?;
        match &section.source {
            SectionSource::Catalog { catalog, .. } => {
                Ok(catalog.choices(first)?.into_iter().map(str::to_string).collect())
            }
            SectionSource::SheetPerFile { files } => {
                let path = self.data_dir.join(files.resolve(first)?);
                Ok(self.loader.sheet_names(&path)?.as_ref().clone())
            }
        }
    }

    /// Resolves a two-level selection to the file and sheet that back it.
    pub fn resolve(&self, id: &str, first: &str, second: &str) -> Result<SourceId> {
        let section = self.section(id)?;
        match &section.source {
            SectionSource::Catalog { file, catalog } => {
                let sheet = catalog.resolve(first, second)?;
                Ok(SourceId::new(self.data_dir.join(file), sheet))
            }
            SectionSource::SheetPerFile { files } => {
                let file = files
                    .resolve(first)
                    .map_err(|_| DashboardError::configuration(first, second))?;
                Ok(SourceId::new(self.data_dir.join(file), second))
            }
        }
    }

    /// Resolve, load and extract one selection.
    pub fn render(&self, id: &str, first: &str, second: &str) -> Result<SectionView> {
        let section = self.section(id)?;
        let source = self.resolve(id, first, second)?;
        let grid = self.loader.load(&source.file, &source.sheet)?;

        let series =
            extract(&grid, &section.layout).map_err(|e| DashboardError::LayoutMismatch {
                file: source.file.clone(),
                sheet: source.sheet.clone(),
                source: e,
            })?;
        self.check_categories(&source, &series);

        let caption = if section.sheet_as_caption {
            source.sheet.clone()
        } else {
            String::new()
        };

        Ok(SectionView {
            section: section.id,
            source,
            caption,
            series,
        })
    }

    // Row positions carry meaning; flag labels that look like the sheet has drifted.
    fn check_categories(&self, source: &SourceId, series: &ChartSeries) {
        for label in series.categories.iter().filter(|l| !l.is_empty()) {
            if !self.colors.contains(label) {
                warn!(
                    "{} [{}]: no colour for component {:?}",
                    source.file.display(),
                    source.sheet,
                    label
                );
            }
        }
        for label in series.duplicate_categories() {
            warn!(
                "{} [{}]: component {:?} appears more than once",
                source.file.display(),
                source.sheet,
                label
            );
        }
    }
}
