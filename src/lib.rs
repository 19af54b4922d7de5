//! # Skill Matrix Extractor
//!
//! Converts a team skill-matrix workbook into structured JSON documents for a
//! web front end.
//!
//! ## Passes
//!
//! - **Extract**: project the `Criteria`, upgrade guide, team overview and
//!   developer profile sheets into typed records, one file per sheet plus a
//!   combined document
//! - **Dump**: write every sheet, untyped, as an array of row objects
//! - **Patch**: replace bare `NaN` / `Infinity` tokens in a JSON file with `null`
//!
//! The workbook is read directly from its Office Open XML parts (`.xlsx`, `.xlsm`).
//! A sheet that cannot be read is reported and skipped; the other sheets are
//! still processed.
pub mod config;
pub mod error;
pub mod output;
pub mod patch;
pub mod pipeline;
pub mod spreadsheet;
pub mod table;
pub mod transform;

mod helpers;

pub use crate::config::Settings;
pub use crate::error::SkillMatrixError;
pub use crate::pipeline::ExtractReport;
pub use crate::pipeline::Pipeline;
pub use crate::spreadsheet::Workbook;
pub use crate::table::CellValue;
pub use crate::table::Table;
