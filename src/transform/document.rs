use crate::transform::criteria::CategoryEntry;
use crate::transform::profile::DeveloperProfile;
use crate::transform::profile::SkillUpgradeGuide;
use crate::transform::roster::EmployeeRecord;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// Every derived structure under its fixed top-level key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombinedDocument {
    pub criteria: Vec<CategoryEntry>,
    pub skill_upgrade_guide: SkillUpgradeGuide,
    pub team_overview: Vec<EmployeeRecord>,
    /// Profile sheet name to profile, in processing order
    pub developer_profiles: IndexMap<String, DeveloperProfile>,
}
