mod common;

use common::*;
use pv_dashboard::downloader::{to_csv, to_xlsx};
use pv_dashboard::{COUNTRY_SPLIT, CalamineSource, Dashboard, SheetSource, extract};
use tempfile::TempDir;

#[test]
fn xlsx_export_reads_back_in_the_country_split_layout() {
    let dir = TempDir::new().unwrap();
    write_china_workbook(dir.path());
    let dashboard = Dashboard::new(dir.path());
    let view = dashboard.render("imports", "China", "India").unwrap();

    let bytes = to_xlsx(&view.series).unwrap();
    let exported = dir.path().join("export.xlsx");
    std::fs::write(&exported, bytes).unwrap();

    let source = CalamineSource;
    let sheets = source.sheet_names(&exported).unwrap();
    assert_eq!(sheets.len(), 1);
    let grid = source.read_sheet(&exported, &sheets[0]).unwrap();

    assert_eq!(extract(&grid, &COUNTRY_SPLIT).unwrap(), view.series);
}

#[test]
fn csv_export_of_the_worked_example() {
    let dir = TempDir::new().unwrap();
    write_scenario_workbook(dir.path());
    let dashboard = Dashboard::new(dir.path());
    let view = dashboard
        .render("scenarios", "Domestic", "Domestic - Manufacturing 2025")
        .unwrap();

    assert_eq!(
        to_csv(&view.series),
        "Component,USA,China\nLabour,1,0.5\nElectricity,0.3,0.2\nWafer,2.1,1.8\n"
    );
}
