//! # Spreadsheet Module
//!
//! Reads Office Open XML workbooks (`.xlsx`, `.xlsm`): enumerates sheet names
//! in workbook order and loads a sheet as a rectangular [`Table`].
use crate::config::is_workbook_path;
use crate::error::ResultMessage;
use crate::error::SkillMatrixError;
use crate::spreadsheet::xlsx::XlsxParts;
use crate::table::Table;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use thiserror::Error;

pub(crate) mod cell;
pub mod filter;
pub(crate) mod reference;
pub(crate) mod sheet;
pub(crate) mod xlsx;

/// Errors raised while opening a workbook or reading one of its sheets.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// Unsupported or unrecognized file format
    #[error("Cannot detect file format for '{0}', expected .xlsx or .xlsm")]
    InvalidFileFormat(String),

    /// A required part is missing from the package
    #[error("Missing part '{0}' in workbook package")]
    FileError(String),

    /// The workbook lists no sheets
    #[error("Spreadsheet '{0}' contains no sheets")]
    SpreadsheetEmptyError(String),

    /// Requested sheet is not in the workbook
    #[error("Sheet '{sheet}' not found in '{file}'")]
    SheetNotFound { file: String, sheet: String },

    /// A shared string reference points past the string table
    #[error("Sheet '{0}' references missing shared string #{1}")]
    SharedStringError(String, usize),
}

/// An opened workbook.
pub struct Workbook<R: Read + Seek = BufReader<File>> {
    /// File name of the workbook
    name: String,
    parts: XlsxParts<R>,
}

impl Workbook<BufReader<File>> {
    /// Opens a workbook file.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not `.xlsx`/`.xlsm`, the file cannot
    /// be read, or the package lacks a workbook part.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SkillMatrixError> {
        let path = path.as_ref();
        let name = path.to_string_lossy().to_string();
        if !is_workbook_path(path) {
            return Err(SpreadsheetError::InvalidFileFormat(name).into());
        }
        let file = File::open(path).map_err(SkillMatrixError::from).with_prefix(&name)?;
        Workbook::from_reader(&name, BufReader::new(file))
    }
}

impl<R: Read + Seek> Workbook<R> {
    /// Reads a workbook package from any seekable reader.
    pub fn from_reader(name: &str, reader: R) -> Result<Self, SkillMatrixError> {
        let parts = xlsx::open(name, reader).with_prefix(name)?;
        Ok(Self {
            name: name.to_owned(),
            parts,
        })
    }

    /// File name of the workbook.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the names of all sheets in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.parts.sheets.iter().map(|(name, _)| name.to_owned()).collect()
    }

    /// Loads a sheet by exact name.
    pub(crate) fn read_sheet(&mut self, sheet_name: &str) -> Result<sheet::Sheet, SkillMatrixError> {
        let zip_path = self
            .parts
            .sheets
            .iter()
            .find(|(name, _)| name == sheet_name)
            .map(|(_, path)| path.to_owned())
            .ok_or_else(|| SpreadsheetError::SheetNotFound {
                file: self.name.to_owned(),
                sheet: sheet_name.to_owned(),
            })?;
        xlsx::read_sheet(&mut self.parts, &self.name, sheet_name, &zip_path)
    }

    /// Loads a sheet by exact name as a [`Table`].
    pub fn load_table(&mut self, sheet_name: &str) -> Result<Table, SkillMatrixError> {
        let sheet = self.read_sheet(sheet_name)?;
        if sheet.is_empty() {
            log::warn!("Sheet '{}' of '{}' has no populated cells", sheet.name, sheet.file_name);
        }
        log::debug!(
            "Loaded {} cells from sheet '{}' of '{}'",
            sheet.cells.len(),
            sheet.name,
            sheet.file_name
        );
        Ok(Table::from_sheet(&sheet))
    }
}
