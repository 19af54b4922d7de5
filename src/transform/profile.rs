//! Developer profile sheets and the skill upgrade guide.
use crate::config::SKILL_LEVELS;
use crate::config::SKILL_UPGRADE_GUIDE_TITLE;
use crate::table::CellValue;
use crate::table::Table;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// One developer profile template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeveloperProfile {
    pub title: String,
    /// One object per named row, `label -> value`, absent cells omitted
    pub skills: Vec<IndexMap<String, CellValue>>,
}

impl DeveloperProfile {
    /// A profile without skills, used when the sheet cannot be read.
    pub fn empty(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            skills: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub level: u8,
    pub description: Option<String>,
}

/// Presentation skeleton of the upgrade guide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillUpgradeGuide {
    pub title: String,
    pub skill_levels: Vec<SkillLevel>,
    pub categories: Vec<serde_json::Value>,
}

impl Default for SkillUpgradeGuide {
    fn default() -> Self {
        Self {
            title: SKILL_UPGRADE_GUIDE_TITLE.to_owned(),
            skill_levels: (1..=SKILL_LEVELS)
                .map(|level| SkillLevel {
                    level,
                    description: None,
                })
                .collect(),
            categories: Vec::new(),
        }
    }
}

/// Projects a profile sheet: every row whose first cell is populated becomes a skill.
pub fn extract_profile(table: &Table) -> DeveloperProfile {
    let skills = table
        .rows
        .iter()
        .filter(|row| row.first().map(|cell| !cell.is_empty()).unwrap_or(false))
        .map(|row| {
            table
                .columns
                .iter()
                .zip(row)
                .filter_map(|(label, value)| value.present().map(|value| (label.to_owned(), value.clone())))
                .collect::<IndexMap<_, _>>()
        })
        .collect();
    DeveloperProfile {
        title: table.name.to_owned(),
        skills,
    }
}

/// The guide sheet only has to exist; its layout is rendered by the presentation layer.
pub fn extract_skill_upgrade_guide(table: &Table) -> SkillUpgradeGuide {
    let (rows, columns) = table.shape();
    log::debug!("Sheet '{}' holds {} rows x {} columns", table.name, rows, columns);
    SkillUpgradeGuide::default()
}
