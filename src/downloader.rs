use crate::series::ChartSeries;
use std::error::Error;

/// Convert a chart series to CSV format
///
/// The first line is `Component` followed by the group labels; every
/// following line is one category and its values. Absent values are left
/// as empty fields. Fields containing commas, quotes or newlines are quoted.
///
/// # Examples
/// ```
/// use pv_dashboard::series::ChartSeries;
/// use pv_dashboard::downloader::to_csv;
///
/// let series = ChartSeries {
///     title: String::new(),
///     groups: vec!["USA".into(), "China".into()],
///     categories: vec!["Labour".into()],
///     values: vec![vec![Some(1.0), None]],
/// };
/// assert_eq!(to_csv(&series), "Component,USA,China\nLabour,1,\n");
/// ```
pub fn to_csv(series: &ChartSeries) -> String {
    let mut csv_content = String::new();

    csv_content.push_str("Component");
    for group in &series.groups {
        csv_content.push(',');
        csv_content.push_str(&escape_field(group));
    }
    csv_content.push('\n');

    for (i, category) in series.categories.iter().enumerate() {
        csv_content.push_str(&escape_field(category));
        for g in 0..series.groups.len() {
            csv_content.push(',');
            if let Some(v) = series.value(i, g) {
                csv_content.push_str(&v.to_string());
            }
        }
        csv_content.push('\n');
    }

    csv_content
}

fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Convert a chart series to XLSX format
///
/// Writes a single worksheet: the title in A1, the group labels on row 2
/// from column B, then one row per category with its label in column A.
/// Absent values stay blank.
///
/// # Returns
/// * `Result<Vec<u8>, Box<dyn Error>>` - XLSX file content as bytes or an error
pub fn to_xlsx(series: &ChartSeries) -> Result<Vec<u8>, Box<dyn Error>> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name(sheet_name_for(&series.title))?;

    if !series.title.is_empty() {
        worksheet.write_string(0, 0, &series.title)?;
    }
    for (g, group) in series.groups.iter().enumerate() {
        worksheet.write_string(1, (g + 1) as u16, group)?;
    }
    for (i, category) in series.categories.iter().enumerate() {
        let row = (i + 2) as u32;
        if !category.is_empty() {
            worksheet.write_string(row, 0, category)?;
        }
        for g in 0..series.groups.len() {
            if let Some(v) = series.value(i, g) {
                worksheet.write_number(row, (g + 1) as u16, v)?;
            }
        }
    }

    workbook.push_worksheet(worksheet);
    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

// Excel sheet names: at most 31 chars, none of []:*?/\
fn sheet_name_for(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        "Chart data".to_string()
    } else {
        cleaned
    }
}
