//! The extraction run: one pass per sheet, then the combined document.
//!
//! Failures are caught per sheet. A sheet that cannot be loaded or projected
//! is reported and contributes an empty result; the other sheets still run.
//! Only output write failures abort the run.
use crate::config::profile_file_name;
use crate::config::Settings;
use crate::config::COMBINED_FILE;
use crate::config::CRITERIA_FILE;
use crate::config::CRITERIA_SHEET;
use crate::config::DEVELOPER_PROFILE_SHEETS;
use crate::config::SKILL_UPGRADE_GUIDE_FILE;
use crate::config::SKILL_UPGRADE_GUIDE_SHEET;
use crate::config::TEAM_OVERVIEW_FILE;
use crate::config::TEAM_OVERVIEW_SHEET;
use crate::error::SkillMatrixError;
use crate::output::writer::write_json;
use crate::output::writer::JsonStyle;
use crate::spreadsheet::Workbook;
use crate::table::Table;
use crate::transform::criteria;
use crate::transform::criteria::CategoryEntry;
use crate::transform::document::CombinedDocument;
use crate::transform::profile;
use crate::transform::profile::DeveloperProfile;
use crate::transform::profile::SkillUpgradeGuide;
use crate::transform::roster;
use crate::transform::roster::EmployeeRecord;
use indexmap::IndexMap;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;

/// A sheet that was skipped, with the cause.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetFailure {
    pub sheet: String,
    pub cause: String,
}

/// Outcome of a full extraction run.
#[derive(Debug)]
pub struct ExtractReport {
    pub document: CombinedDocument,
    pub failures: Vec<SheetFailure>,
}

pub struct Pipeline<R: Read + Seek = BufReader<File>> {
    /// The opened workbook, or why it could not be opened
    workbook: Result<Workbook<R>, String>,
    settings: Settings,
    failures: Vec<SheetFailure>,
}

impl Pipeline<BufReader<File>> {
    /// Opens the configured workbook; an unreadable workbook fails every sheet.
    pub fn open(settings: &Settings) -> Self {
        Self::new(Workbook::open(&settings.workbook), settings.clone())
    }
}

impl<R: Read + Seek> Pipeline<R> {
    pub fn new(workbook: Result<Workbook<R>, SkillMatrixError>, settings: Settings) -> Self {
        let workbook = workbook.map_err(|error| {
            log::error!("Cannot open workbook: {}", error);
            error.to_string()
        });
        Self {
            workbook,
            settings,
            failures: Vec::new(),
        }
    }

    fn fail(&mut self, sheet: &str, cause: String) {
        log::error!("Error processing sheet '{}': {}", sheet, cause);
        self.failures.push(SheetFailure {
            sheet: sheet.to_owned(),
            cause,
        });
    }

    /// Loads a sheet, recording the failure when it cannot be read.
    fn load(&mut self, sheet: &str) -> Option<Table> {
        let result = match &mut self.workbook {
            Ok(workbook) => workbook.load_table(sheet).map_err(|error| error.to_string()),
            Err(cause) => Err(cause.to_owned()),
        };
        match result {
            Ok(table) => Some(table),
            Err(cause) => {
                self.fail(sheet, cause);
                None
            }
        }
    }

    /// Criteria sheet (master data) to `criteria.json`.
    pub fn process_criteria(&mut self) -> Result<Vec<CategoryEntry>, SkillMatrixError> {
        log::info!("Processing {} sheet (master data)...", CRITERIA_SHEET);
        let categories = match self.load(CRITERIA_SHEET).map(|table| criteria::extract(&table)) {
            Some(Ok(categories)) => categories,
            Some(Err(error)) => {
                self.fail(CRITERIA_SHEET, error.to_string());
                Vec::new()
            }
            None => Vec::new(),
        };
        write_json(&self.settings.data_file(CRITERIA_FILE), &categories, JsonStyle::Pretty)?;
        log::info!("Criteria data saved with {} categories", categories.len());
        Ok(categories)
    }

    /// Skill upgrade guide sheet (presentation layer) to `skill_upgrade_guide.json`.
    pub fn process_skill_upgrade_guide(&mut self) -> Result<SkillUpgradeGuide, SkillMatrixError> {
        log::info!("Processing {} sheet (presentation layer)...", SKILL_UPGRADE_GUIDE_SHEET);
        let guide = self
            .load(SKILL_UPGRADE_GUIDE_SHEET)
            .map(|table| profile::extract_skill_upgrade_guide(&table))
            .unwrap_or_default();
        write_json(&self.settings.data_file(SKILL_UPGRADE_GUIDE_FILE), &guide, JsonStyle::Pretty)?;
        log::info!("Skill upgrade guide data saved");
        Ok(guide)
    }

    /// Team overview sheet to `team_overview.json`.
    pub fn process_team_overview(&mut self) -> Result<Vec<EmployeeRecord>, SkillMatrixError> {
        log::info!("Processing {} sheet...", TEAM_OVERVIEW_SHEET.trim());
        let employees = match self.load(TEAM_OVERVIEW_SHEET).map(|table| roster::extract(&table)) {
            Some(Ok(employees)) => employees,
            Some(Err(error)) => {
                self.fail(TEAM_OVERVIEW_SHEET, error.to_string());
                Vec::new()
            }
            None => Vec::new(),
        };
        write_json(&self.settings.data_file(TEAM_OVERVIEW_FILE), &employees, JsonStyle::Pretty)?;
        log::info!("Team overview data saved with {} employees", employees.len());
        Ok(employees)
    }

    /// Each developer profile sheet to its own file.
    pub fn process_developer_profiles(&mut self) -> Result<IndexMap<String, DeveloperProfile>, SkillMatrixError> {
        let mut profiles = IndexMap::new();
        for sheet in DEVELOPER_PROFILE_SHEETS {
            log::info!("Processing {} sheet...", sheet);
            let profile = self
                .load(sheet)
                .map(|table| profile::extract_profile(&table))
                .unwrap_or_else(|| DeveloperProfile::empty(sheet));
            write_json(&self.settings.data_file(&profile_file_name(sheet)), &profile, JsonStyle::Pretty)?;
            log::info!("{} data saved with {} skills", sheet, profile.skills.len());
            profiles.insert(sheet.to_owned(), profile);
        }
        Ok(profiles)
    }

    /// Runs every pass and writes `combined_data.json`.
    pub fn run(mut self) -> Result<ExtractReport, SkillMatrixError> {
        let criteria = self.process_criteria()?;
        let skill_upgrade_guide = self.process_skill_upgrade_guide()?;
        let team_overview = self.process_team_overview()?;
        let developer_profiles = self.process_developer_profiles()?;

        let document = CombinedDocument {
            criteria,
            skill_upgrade_guide,
            team_overview,
            developer_profiles,
        };
        write_json(&self.settings.data_file(COMBINED_FILE), &document, JsonStyle::Pretty)?;
        log::info!("Combined data saved");
        log::info!(
            "All data has been extracted and saved as structured JSON in '{}'",
            self.settings.data_dir.display()
        );
        if !self.failures.is_empty() {
            log::warn!("{} sheets could not be processed", self.failures.len());
        }
        Ok(ExtractReport {
            document,
            failures: self.failures,
        })
    }
}
