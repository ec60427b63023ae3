#![allow(dead_code)]

use pv_dashboard::cell::CellValue;
use pv_dashboard::error::Result;
use pv_dashboard::{CellGrid, DashboardError, SheetSource};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

pub type Components<'a> = [(&'a str, Vec<CellValue>)];

pub type Rows = Vec<Vec<CellValue>>;

pub fn text(s: &str) -> CellValue {
    CellValue::from(s)
}

pub fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

/// Writes one workbook with the given sheets, in order.
pub fn write_workbook(path: &Path, sheets: &[(&str, Rows)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("valid sheet name");
        for (r, row) in rows.iter().enumerate() {
            let r = r as u32;
            for (c, cell) in row.iter().enumerate() {
                let c = c as u16;
                match cell {
                    CellValue::Number(n) => {
                        worksheet.write_number(r, c, *n).expect("write number");
                    }
                    CellValue::Text(s) => {
                        worksheet.write_string(r, c, s).expect("write string");
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(r, c, *b).expect("write boolean");
                    }
                    CellValue::Empty | CellValue::Error(_) => {}
                }
            }
        }
    }
    workbook.save(path).expect("save workbook");
}

/// Sheet in the scenario layout: title in A1:A4, countries on row 6, components from row 7.
pub fn scenario_sheet(title: [&str; 4], groups: &[&str], components: &Components) -> Rows {
    let mut rows: Rows = title.iter().map(|t| vec![text(t)]).collect();
    rows.push(vec![]);
    rows.push(std::iter::once(CellValue::Empty).chain(groups.iter().map(|g| text(g))).collect());
    for (label, values) in components {
        let mut row = vec![text(label)];
        row.extend(values.iter().cloned());
        rows.push(row);
    }
    rows
}

/// Sheet in the country-split layout: title in A1, countries in B2:E2, components from row 3.
pub fn country_split_sheet(title: &str, groups: &[&str], components: &Components) -> Rows {
    let mut rows: Rows = vec![vec![text(title)]];
    rows.push(std::iter::once(CellValue::Empty).chain(groups.iter().map(|g| text(g))).collect());
    for (label, values) in components {
        let mut row = vec![text(label)];
        row.extend(values.iter().cloned());
        rows.push(row);
    }
    rows
}

/// The worked example: USA and China, three components.
pub fn domestic_2025() -> Rows {
    scenario_sheet(
        ["Total module cost", "", "TOPCon, 2025", "USD/Wp"],
        &["USA", "China"],
        &[
            ("Labour", vec![num(1.0), num(0.5)]),
            ("Electricity", vec![num(0.3), num(0.2)]),
            ("Wafer", vec![num(2.1), num(1.8)]),
        ],
    )
}

/// Writes `graph1.xlsx` covering every catalog sheet into `dir`.
pub fn write_scenario_workbook(dir: &Path) {
    let other = |year: &str| {
        scenario_sheet(
            ["Total module cost", year, "", ""],
            &["USA", "Germany", "India"],
            &[
                ("Polysilicon", vec![num(0.05), num(0.06), num(0.04)]),
                ("Labour", vec![num(0.4), num(0.35), text("-")]),
            ],
        )
    };
    write_workbook(
        &dir.join("graph1.xlsx"),
        &[
            ("Domestic manufacturing in 2025", domestic_2025()),
            ("Domestic manufacturing in 2030", other("2030")),
            ("Imported Polysilicon from China", other("2025")),
            ("Imported Wafer from China", other("2025")),
            ("Imported Cell from China", other("2025")),
            ("Imported Wafer from Vietnam", other("2025")),
            ("Imported Cell from Vietnam", other("2025")),
        ],
    );
}

/// Writes `graph2_China.xlsx` with two countries of manufacture.
pub fn write_china_workbook(dir: &Path) {
    let groups = ["Domestic", "Imported wafer", "Imported cell", "Imported polysilicon"];
    write_workbook(
        &dir.join("graph2_China.xlsx"),
        &[
            (
                "India",
                country_split_sheet(
                    "India: domestic against imports from China",
                    &groups,
                    &[
                        (
                            "Wafer (excl. polysilicon)",
                            vec![num(0.04), num(0.03), num(0.0), num(0.04)],
                        ),
                        ("Labour", vec![num(0.02), num(0.02), num(0.01), num(0.02)]),
                        (
                            "Imported Cell (incl. polysilicon and wafer)",
                            vec![CellValue::Empty, CellValue::Empty, num(0.09), CellValue::Empty],
                        ),
                    ],
                ),
            ),
            (
                "USA",
                country_split_sheet(
                    "USA: domestic against imports from China",
                    &groups,
                    &[("Labour", vec![num(0.08), num(0.07), num(0.05), num(0.08)])],
                ),
            ),
        ],
    );
}

/// In-memory workbooks that count how often a sheet is actually read.
#[derive(Default)]
pub struct MemorySource {
    workbooks: Vec<(PathBuf, Vec<(String, CellGrid)>)>,
    reads: AtomicUsize,
}

impl MemorySource {
    pub fn with_sheet(mut self, path: &Path, sheet: &str, grid: CellGrid) -> Self {
        match self.workbooks.iter_mut().find(|(p, _)| p == path) {
            Some((_, sheets)) => sheets.push((sheet.to_string(), grid)),
            None => self
                .workbooks
                .push((path.to_path_buf(), vec![(sheet.to_string(), grid)])),
        }
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn workbook(&self, path: &Path) -> Result<&[(String, CellGrid)]> {
        self.workbooks
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, sheets)| sheets.as_slice())
            .ok_or_else(|| DashboardError::source_not_found(path, None, "not in memory"))
    }
}

impl SheetSource for MemorySource {
    fn sheet_names(&self, path: &Path) -> Result<Vec<String>> {
        Ok(self.workbook(path)?.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read_sheet(&self, path: &Path, sheet: &str) -> Result<CellGrid> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.workbook(path)?
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| DashboardError::source_not_found(path, Some(sheet), "not in memory"))
    }
}
