//! Workbook layout and output locations.
//!
//! Sheet names are spelled exactly as they appear in the workbook, including
//! the typo in the upgrade guide and the leading space of the roster sheet.
use std::path::Path;
use std::path::PathBuf;

/// Default workbook location.
pub const WORKBOOK_PATH: &str = "Team Skill Matrix Guide 1.xlsx";
/// Directory receiving the structured documents.
pub const DATA_DIR: &str = "src/data";
/// Directory receiving the raw per-sheet dumps.
pub const DUMP_DIR: &str = "json_data";

pub const CRITERIA_SHEET: &str = "Criteria";
pub const SKILL_UPGRADE_GUIDE_SHEET: &str = "Skill upgrage guide";
pub const TEAM_OVERVIEW_SHEET: &str = " Team overview";
pub const DEVELOPER_PROFILE_SHEETS: [&str; 3] = [
    "Product Developer",
    "Senior Developer Sample",
    "Junior Developer",
];

pub const CRITERIA_FILE: &str = "criteria.json";
pub const SKILL_UPGRADE_GUIDE_FILE: &str = "skill_upgrade_guide.json";
pub const TEAM_OVERVIEW_FILE: &str = "team_overview.json";
pub const COMBINED_FILE: &str = "combined_data.json";
pub const ALL_SHEETS_FILE: &str = "all_sheets.json";

/// Criteria sheet: labels of the low/high boundary columns.
pub const CRITERIA_LOW_COLUMN: &str = "Low";
pub const CRITERIA_HIGH_COLUMN: &str = "High";
/// Criteria sheet: positional indexes of the five level columns; level = index - 4.
pub const CRITERIA_LEVEL_COLUMNS: std::ops::RangeInclusive<usize> = 5..=9;
pub const CRITERIA_LEVEL_OFFSET: usize = 4;

/// Roster sheet: fixed field mapping, output field name to column label.
pub const ROSTER_ID_COLUMN: &str = "Unnamed: 0";
pub const ROSTER_FIELD_COLUMNS: [(&str, &str); 8] = [
    ("position", "Position"),
    ("skill_expertise", "skill expertise"),
    ("risk", "Risk"),
    ("value", "Value"),
    ("potential", "Potential"),
    ("salary_increase_plan", "Salary Increase plan"),
    ("salary_comment", "Salary comment"),
    ("free_comment", "Free comment"),
];
/// Roster sheet: positional indexes of the competency rating columns.
pub const ROSTER_COMPETENCY_COLUMNS: std::ops::RangeInclusive<usize> = 16..=22;

/// Number of proficiency levels in the upgrade guide.
pub const SKILL_LEVELS: u8 = 5;
pub const SKILL_UPGRADE_GUIDE_TITLE: &str = "Skill Upgrade Guide";

/// Number of rows logged as a sample for each dumped sheet.
pub const DUMP_SAMPLE_ROWS: usize = 5;

/// Locations used by one run.
#[derive(Clone, Debug)]
pub struct Settings {
    pub workbook: PathBuf,
    pub data_dir: PathBuf,
    pub dump_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from(WORKBOOK_PATH),
            data_dir: PathBuf::from(DATA_DIR),
            dump_dir: PathBuf::from(DUMP_DIR),
        }
    }
}

impl Settings {
    /// Path of a document inside the data directory.
    pub fn data_file(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

/// `Product Developer` -> `product_developer.json`
pub fn profile_file_name(sheet_name: &str) -> String {
    format!("{}.json", sheet_name.to_lowercase().replace(' ', "_"))
}

/// `Skill upgrage guide` -> `Skill_upgrage_guide.json`
pub fn dump_file_name(sheet_name: &str) -> String {
    format!("{}.json", sheet_name.replace(' ', "_"))
}

/// Whether a path points at one of the workbook formats this crate reads.
pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| matches!(extension.to_ascii_lowercase().as_str(), "xlsx" | "xlsm"))
        .unwrap_or(false)
}
