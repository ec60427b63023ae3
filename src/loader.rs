use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use calamine::{Data, Range, Reader, open_workbook_auto};
use log::{debug, info};

use crate::cell::{CellGrid, CellValue};
use crate::error::{DashboardError, Result};

/// Where raw sheets come from.
///
/// The dashboard reads spreadsheet files through [`CalamineSource`]; tests can
/// substitute an in-memory source to observe how often parsing happens.
pub trait SheetSource: Send + Sync {
    /// Sheet identifiers of `path`, in workbook order.
    fn sheet_names(&self, path: &Path) -> Result<Vec<String>>;

    /// Parses one sheet into a grid. No header row is assumed.
    fn read_sheet(&self, path: &Path, sheet: &str) -> Result<CellGrid>;
}

/// Reads xlsx / xls / xlsb / ods workbooks from disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct CalamineSource;

impl SheetSource for CalamineSource {
    fn sheet_names(&self, path: &Path) -> Result<Vec<String>> {
        let workbook =
            open_workbook_auto(path).map_err(|e| DashboardError::source_not_found(path, None, e))?;
        Ok(workbook.sheet_names())
    }

    fn read_sheet(&self, path: &Path, sheet: &str) -> Result<CellGrid> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| DashboardError::source_not_found(path, None, e))?;
        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| DashboardError::source_not_found(path, Some(sheet), e))?;
        Ok(grid_from_range(&range))
    }
}

/// Converts a calamine range into a grid anchored at A1.
///
/// Calamine ranges start at the first used cell, so leading blank rows and
/// columns are restored here to keep absolute positions stable.
pub fn grid_from_range(range: &Range<Data>) -> CellGrid {
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return CellGrid::default();
    };
    let (row0, col0) = (start.0 as usize, start.1 as usize);
    let mut grid = CellGrid::new(end.0 as usize + 1, end.1 as usize + 1);

    for (r, c, data) in range.cells() {
        grid.set(row0 + r, col0 + c, cell_from_data(data));
    }
    grid
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

type SheetKey = (PathBuf, String);

/// Read-through cache in front of a [`SheetSource`].
///
/// Sheet listings are cached per file and grids per `(file, sheet)`. Entries
/// are never evicted or invalidated; the source files are read-only for the
/// life of the process. Two threads missing on the same key may both parse,
/// and the first stored grid wins.
pub struct SheetLoader<S = CalamineSource> {
    source: S,
    sheet_names: RwLock<HashMap<PathBuf, Arc<Vec<String>>>>,
    grids: RwLock<HashMap<SheetKey, Arc<CellGrid>>>,
    parse_count: AtomicUsize,
}

impl SheetLoader<CalamineSource> {
    pub fn new() -> Self {
        SheetLoader::with_source(CalamineSource)
    }
}

impl Default for SheetLoader<CalamineSource> {
    fn default() -> Self {
        SheetLoader::new()
    }
}

impl<S: SheetSource> SheetLoader<S> {
    pub fn with_source(source: S) -> Self {
        SheetLoader {
            source,
            sheet_names: RwLock::new(HashMap::new()),
            grids: RwLock::new(HashMap::new()),
            parse_count: AtomicUsize::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sheet identifiers available in `path`, enumerated once per file.
    pub fn sheet_names(&self, path: &Path) -> Result<Arc<Vec<String>>> {
        if let Some(names) = read_lock(&self.sheet_names).get(path) {
            return Ok(Arc::clone(names));
        }

        let names = Arc::new(self.source.sheet_names(path)?);
        debug!("{} lists {} sheets", path.display(), names.len());
        let mut cache = write_lock(&self.sheet_names);
        Ok(Arc::clone(cache.entry(path.to_path_buf()).or_insert(names)))
    }

    /// Returns the grid of `sheet` in `path`, parsing it on first request only.
    ///
    /// # Errors
    /// `SourceNotFound` when the file cannot be opened or does not list `sheet`.
    pub fn load(&self, path: &Path, sheet: &str) -> Result<Arc<CellGrid>> {
        let key = (path.to_path_buf(), sheet.to_string());
        if let Some(grid) = read_lock(&self.grids).get(&key) {
            debug!("cache hit for {} [{}]", path.display(), sheet);
            return Ok(Arc::clone(grid));
        }

        let names = self.sheet_names(path)?;
        if !names.iter().any(|name| name == sheet) {
            return Err(DashboardError::source_not_found(
                path,
                Some(sheet),
                "no such sheet",
            ));
        }

        let grid = Arc::new(self.source.read_sheet(path, sheet)?);
        self.parse_count.fetch_add(1, Ordering::Relaxed);
        info!(
            "parsed {} [{}]: {} rows x {} cols",
            path.display(),
            sheet,
            grid.rows(),
            grid.cols()
        );

        let mut cache = write_lock(&self.grids);
        Ok(Arc::clone(cache.entry(key).or_insert(grid)))
    }

    /// Number of sheets parsed so far.
    pub fn parse_count(&self) -> usize {
        self.parse_count.load(Ordering::Relaxed)
    }

    pub fn cached_sheets(&self) -> usize {
        read_lock(&self.grids).len()
    }

    /// Drops every cached listing and grid.
    pub fn clear(&self) {
        write_lock(&self.sheet_names).clear();
        write_lock(&self.grids).clear();
    }
}

// The caches hold immutable values only, so a poisoned lock still guards consistent data.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}
