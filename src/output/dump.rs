//! Raw dump of every sheet as an array of row objects.
use crate::config::dump_file_name;
use crate::config::ALL_SHEETS_FILE;
use crate::config::DUMP_SAMPLE_ROWS;
use crate::error::SkillMatrixError;
use crate::output::writer::write_json;
use crate::output::writer::JsonStyle;
use crate::spreadsheet::filter::SheetFilter;
use crate::spreadsheet::Workbook;
use crate::table::CellValue;
use crate::table::Table;
use indexmap::IndexMap;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

/// Outcome of one dump pass.
#[derive(Debug, Default, PartialEq)]
pub struct DumpSummary {
    /// Sheets written, in workbook order
    pub written: Vec<String>,
    /// Sheets that failed to load, with the cause
    pub failed: Vec<(String, String)>,
}

/// Dumps every accepted sheet to `<dump_dir>/<sheet>.json` and all of them to `all_sheets.json`.
///
/// A sheet that fails to load is reported and left out; write failures abort.
pub fn dump_sheets<R: Read + Seek>(
    workbook: &mut Workbook<R>,
    filter: &SheetFilter,
    dump_dir: &Path,
) -> Result<DumpSummary, SkillMatrixError> {
    let sheet_names = workbook.sheet_names();
    log::info!("Available sheets in '{}':", workbook.name());
    for (index, name) in sheet_names.iter().enumerate() {
        log::info!("{}. {}", index + 1, name);
    }

    let mut summary = DumpSummary::default();
    let mut all_sheets = IndexMap::<String, Vec<IndexMap<String, CellValue>>>::new();
    for name in sheet_names.iter().filter(|name| filter.accept(name)) {
        log::info!("Processing sheet: {}", name);
        let table = match workbook.load_table(name) {
            Ok(table) => table,
            Err(error) => {
                log::error!("Error processing sheet '{}': {}", name, error);
                summary.failed.push((name.to_owned(), error.to_string()));
                continue;
            }
        };
        let records = table.records();
        write_json(&dump_dir.join(dump_file_name(name)), &records, JsonStyle::Compact)?;
        log_sample(&table);
        all_sheets.insert(name.to_owned(), records);
        summary.written.push(name.to_owned());
    }

    write_json(&dump_dir.join(ALL_SHEETS_FILE), &all_sheets, JsonStyle::Compact)?;
    log::info!(
        "{} sheets converted to JSON and saved in '{}'",
        summary.written.len(),
        dump_dir.display()
    );
    Ok(summary)
}

/// Logs the first rows, the shape and the column labels of a table.
fn log_sample(table: &Table) {
    log::info!("Sample data from '{}':", table.name);
    log::info!("{}", table.columns.join(" | "));
    for row in table.rows.iter().take(DUMP_SAMPLE_ROWS) {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.text().unwrap_or_else(|| "-".to_owned()))
            .collect();
        log::info!("{}", cells.join(" | "));
    }
    log::info!("Shape: {:?}", table.shape());
    log::info!("Columns: {:?}", table.columns);
}
