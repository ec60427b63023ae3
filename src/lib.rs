/*!
# Solar PV Supply Chain Cost Dashboard

A browser-rendered dashboard for pre-computed solar PV module manufacturing
costs, built in Rust.

## Overview

All cost figures are calculated outside this application and delivered as
spreadsheet workbooks. The dashboard locates the relevant regions inside
those sheets (title, cost components, countries, cost matrix), reshapes them
into chart series and draws them as stacked bar charts, driven by two
cascading selections per chart.

## Architecture

A selection flows through three stateless stages:

1. **Selection Resolver** (`scenario`, `section`) - maps a two-level choice
   (scenario type and sub-scenario, or country of import and country of
   manufacture) to a workbook file and sheet name
2. **Sheet Loader** (`loader`) - reads the sheet into a raw cell grid through
   calamine, memoised per `(file, sheet)`
3. **Series Extractor** (`extract`, `layout`) - slices title, category labels,
   group labels and the value matrix out of the grid at fixed offsets

The result is rendered by the `graph` module (plotters) and served by the
`app` module (axum), both behind the `web` feature.

## Modules

- **cell**: untyped cell values and the raw grid
- **error**: error taxonomy (configuration, missing source, layout mismatch)
- **scenario**: scenario catalog and import-country workbook map
- **loader**: spreadsheet reading and the sheet cache
- **layout**: fixed-offset layout contracts of each chart
- **extract**: grid to chart series extraction
- **series**: chart series and stacking arithmetic
- **colors**: component colour table
- **section**: chart sections and the resolve, load, extract pipeline
- **config**: runtime configuration
- **downloader**: CSV and XLSX export of a chart series
- **graph**: stacked bar rendering (`web`)
- **app**: HTTP routes (`web`)

## REST API Endpoints

- `/api/sections` - Sections and their first-level choices
- `/api/sections/{id}/choices?first=` - Second-level choices
- `/api/sections/{id}/series?first=&second=` - Extracted chart series
- `/api/sections/{id}/chart.png?first=&second=` - Rendered chart
- `/api/sections/{id}/export.csv`, `/export.xlsx` - Downloads
*/

pub mod cell;
pub mod colors;
pub mod config;
pub mod downloader;
pub mod error;
pub mod extract;
pub mod layout;
pub mod loader;
pub mod scenario;
pub mod section;
pub mod series;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod graph;

pub use cell::{CellGrid, CellValue};
pub use colors::{COMPONENT_COLORS, ColorMap, FALLBACK_COLOR, Rgb};
pub use config::DashboardConfig;
pub use error::{DashboardError, GridShapeError, LayoutError};
pub use extract::extract;
pub use layout::{COUNTRY_SPLIT, ColumnSpan, LayoutContract, SCENARIO};
pub use loader::{CalamineSource, SheetLoader, SheetSource};
pub use scenario::{ImportFileMap, SCENARIO_CATALOG, ScenarioCatalog, SourceId};
pub use section::{Dashboard, Section, SectionSource, SectionView};
pub use series::{ChartSeries, Segment};
