//! Category/subcategory tree of the `Criteria` sheet.
//!
//! The sheet has no type column: a row with a `Low` or `High` description opens
//! a category, any other row with a name is a subcategory of the latest
//! category. Rows are first classified into [`RowKind`], then folded into the
//! tree.
use crate::config::CRITERIA_HIGH_COLUMN;
use crate::config::CRITERIA_LEVEL_COLUMNS;
use crate::config::CRITERIA_LEVEL_OFFSET;
use crate::config::CRITERIA_LOW_COLUMN;
use crate::table::CellValue;
use crate::table::Table;
use crate::table::TableError;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// One category with its descriptions and subcategories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category: String,
    pub description: Option<String>,
    pub high_description: Option<String>,
    /// Level (1..=5) to description
    pub level_descriptions: BTreeMap<u8, String>,
    pub subcategories: Vec<SubcategoryEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryEntry {
    pub name: String,
    pub skills: Vec<String>,
}

/// Role of one row in the tree.
#[derive(Clone, Debug, PartialEq)]
pub enum RowKind {
    Empty,
    Category {
        name: String,
        low: Option<String>,
        high: Option<String>,
        levels: BTreeMap<u8, String>,
    },
    Subcategory {
        name: String,
    },
}

/// Positions of the columns the classification reads.
#[derive(Clone, Copy, Debug)]
pub struct CriteriaColumns {
    pub primary: usize,
    pub low: usize,
    pub high: usize,
}

impl CriteriaColumns {
    /// Resolves `Low` and `High` by label; the primary column is the first one.
    pub fn resolve(table: &Table) -> Result<Self, TableError> {
        Ok(Self {
            primary: 0,
            low: table.require_column(CRITERIA_LOW_COLUMN)?,
            high: table.require_column(CRITERIA_HIGH_COLUMN)?,
        })
    }
}

fn cell_text(row: &[CellValue], index: usize) -> Option<String> {
    row.get(index).and_then(CellValue::text)
}

/// Classifies one row.
pub fn classify(row: &[CellValue], columns: &CriteriaColumns) -> RowKind {
    let Some(name) = cell_text(row, columns.primary) else {
        return RowKind::Empty;
    };
    let low = cell_text(row, columns.low);
    let high = cell_text(row, columns.high);
    if low.is_none() && high.is_none() {
        return RowKind::Subcategory { name };
    }
    let levels = CRITERIA_LEVEL_COLUMNS
        .filter_map(|index| {
            let level = (index - CRITERIA_LEVEL_OFFSET) as u8;
            cell_text(row, index).map(|description| (level, description))
        })
        .collect();
    RowKind::Category {
        name,
        low,
        high,
        levels,
    }
}

/// Folds classified rows into the category tree.
///
/// A subcategory goes to the first category carrying the latest category's
/// name; subcategories seen before any category are dropped.
pub fn fold<I: IntoIterator<Item = RowKind>>(kinds: I) -> Vec<CategoryEntry> {
    let mut categories = Vec::<CategoryEntry>::new();
    let mut current_category: Option<String> = None;
    for kind in kinds {
        match kind {
            RowKind::Empty => (),
            RowKind::Category {
                name,
                low,
                high,
                levels,
            } => {
                current_category = Some(name.clone());
                categories.push(CategoryEntry {
                    category: name,
                    description: low,
                    high_description: high,
                    level_descriptions: levels,
                    subcategories: Vec::new(),
                });
            }
            RowKind::Subcategory { name } => {
                let parent = current_category
                    .as_ref()
                    .and_then(|current| categories.iter_mut().find(|entry| &entry.category == current));
                match parent {
                    Some(parent) => {
                        log::debug!("Subcategory '{}' under '{}'", name, parent.category);
                        parent.subcategories.push(SubcategoryEntry {
                            name,
                            skills: Vec::new(),
                        });
                    }
                    None => log::warn!("Dropping subcategory '{}' found before any category", name),
                }
            }
        }
    }
    categories
}

/// Extracts the category tree from the `Criteria` table.
pub fn extract(table: &Table) -> Result<Vec<CategoryEntry>, TableError> {
    let columns = CriteriaColumns::resolve(table)?;
    Ok(fold(table.rows.iter().map(|row| classify(row, &columns))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_owned())
    }

    /// Columns: name, Low, High, 3 unnamed, then level columns 5..=9
    fn criteria_table(rows: Vec<Vec<CellValue>>) -> Table {
        Table::new(
            "Criteria",
            vec![text("Skill"), text("Low"), text("High")],
            rows.into_iter()
                .map(|mut row| {
                    row.resize(10, CellValue::Empty);
                    row
                })
                .collect(),
        )
    }

    fn row(name: &str, low: &str, high: &str) -> Vec<CellValue> {
        let cell = |value: &str| if value.is_empty() { CellValue::Empty } else { text(value) };
        vec![cell(name), cell(low), cell(high)]
    }

    #[test]
    fn classify_rows() {
        let columns = CriteriaColumns {
            primary: 0,
            low: 1,
            high: 2,
        };
        assert_eq!(classify(&row("", "basic", ""), &columns), RowKind::Empty);
        assert_eq!(
            classify(&row("Git", "", ""), &columns),
            RowKind::Subcategory { name: "Git".to_owned() }
        );
        let mut category = row("SDLC", "", "expert");
        category.resize(10, CellValue::Empty);
        category[5] = text("aware");
        category[9] = CellValue::Number(5.0);
        category[7] = CellValue::Number(f64::NAN);
        assert_eq!(
            classify(&category, &columns),
            RowKind::Category {
                name: "SDLC".to_owned(),
                low: None,
                high: Some("expert".to_owned()),
                levels: BTreeMap::from([(1, "aware".to_owned()), (5, "5".to_owned())]),
            }
        );
    }

    #[test]
    fn builds_tree_in_row_order() {
        let table = criteria_table(vec![
            row("SDLC", "knows basics", "drives process"),
            row("Planning", "", ""),
            row("", "", ""),
            row("Review", "", ""),
            row("Testing", "writes tests", ""),
            row("Unit", "", ""),
        ]);
        let categories = extract(&table).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].category, "SDLC");
        assert_eq!(categories[0].description.as_deref(), Some("knows basics"));
        assert_eq!(categories[0].high_description.as_deref(), Some("drives process"));
        let names: Vec<&str> = categories[0].subcategories.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Planning", "Review"]);
        assert_eq!(categories[1].category, "Testing");
        assert_eq!(categories[1].high_description, None);
        assert_eq!(categories[1].subcategories[0].name, "Unit");
        assert!(categories[1].subcategories[0].skills.is_empty());
    }

    #[test]
    fn category_count_matches_boundary_rows() {
        let table = criteria_table(vec![
            row("A", "x", ""),
            row("B", "", "y"),
            row("", "z", "z"),
            row("c", "", ""),
            row("D", "x", "y"),
        ]);
        let boundary_rows = table
            .rows
            .iter()
            .filter(|row| !row[0].is_empty() && (!row[1].is_empty() || !row[2].is_empty()))
            .count();
        assert_eq!(extract(&table).unwrap().len(), boundary_rows);
    }

    #[test]
    fn drops_subcategories_before_first_category() {
        let table = criteria_table(vec![row("Orphan", "", ""), row("SDLC", "low", "")]);
        let categories = extract(&table).unwrap();
        assert_eq!(categories.len(), 1);
        assert!(categories[0].subcategories.is_empty());
    }

    #[test]
    fn repeated_category_name_attaches_to_first() {
        let table = criteria_table(vec![
            row("SDLC", "low", ""),
            row("SDLC", "", "high"),
            row("Planning", "", ""),
        ]);
        let categories = extract(&table).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].subcategories.len(), 1);
        assert!(categories[1].subcategories.is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let table = criteria_table(vec![row("SDLC", "low", "high"), row("Planning", "", "")]);
        let first = serde_json::to_string_pretty(&extract(&table).unwrap()).unwrap();
        let second = serde_json::to_string_pretty(&extract(&table).unwrap()).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("\"level_descriptions\": {}"));
    }

    #[test]
    fn whitespace_cells_count_as_blank() {
        let columns = CriteriaColumns {
            primary: 0,
            low: 1,
            high: 2,
        };
        assert_eq!(classify(&row("  ", "basic", "expert"), &columns), RowKind::Empty);
        assert_eq!(
            classify(&row("Testing", " ", "\t"), &columns),
            RowKind::Subcategory { name: "Testing".to_owned() }
        );
        let categories = extract(&criteria_table(vec![
            row("SDLC", "low", ""),
            row(" ", "ignored", ""),
            row("Planning", "  ", " "),
        ]))
        .unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].subcategories.len(), 1);
        assert_eq!(categories[0].subcategories[0].name, "Planning");
    }

    #[test]
    fn missing_boundary_column() {
        let table = Table::new("Criteria", vec![text("Skill"), text("Low")], vec![]);
        assert!(extract(&table).is_err());
    }
}
