use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::analysis::{MergedTable, outer_join};
use crate::config::DF;
use crate::data::ResultStore;
use crate::export::{ExportError, ExportFormat};
use crate::utils::format_date;

const DATE_HEADER: &str = "Date";
const XLSX_DATE_FORMAT: &str = "yyyy-mm-dd";

/// Writes the outer join of every stored series. The format follows the path's extension.
pub fn write_spreadsheet(store: &ResultStore, path: &Path) -> Result<ExportFormat, ExportError> {
    if store.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    if path.as_os_str().is_empty() {
        return Err(ExportError::EmptyPath);
    }

    let table = outer_join(store.iter());
    let format = ExportFormat::spreadsheet_for(path);
    match format {
        ExportFormat::Csv => write_csv(&table, path)?,
        _ => write_xlsx(&table, path)?,
    }

    if DF.log_exports {
        log::info!(
            "Exported {} rows x {} series to {} ({})",
            table.rows.len(),
            table.columns.len(),
            path.display(),
            format
        );
    }
    Ok(format)
}

pub fn write_xlsx(table: &MergedTable, path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = Format::new().set_bold();
    let date_fmt = Format::new().set_num_format(XLSX_DATE_FORMAT);

    sheet.write_string_with_format(0, 0, DATE_HEADER, &header)?;
    for (col, name) in table.columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16 + 1, name, &header)?;
    }
    sheet.set_column_width(0, 12)?;

    for (i, (date, cells)) in table.rows.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_datetime_with_format(row, 0, date, &date_fmt)?;
        for (col, cell) in cells.iter().enumerate() {
            // Missing observations stay blank
            if let Some(value) = cell {
                sheet.write_number(row, col as u16 + 1, *value)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

pub fn write_csv(table: &MergedTable, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = Vec::with_capacity(table.columns.len() + 1);
    header.push(DATE_HEADER.to_string());
    header.extend(table.columns.iter().cloned());
    writer.write_record(&header)?;

    for (date, cells) in &table.rows {
        let mut record = Vec::with_capacity(cells.len() + 1);
        record.push(format_date(*date));
        record.extend(
            cells
                .iter()
                .map(|cell| cell.map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
