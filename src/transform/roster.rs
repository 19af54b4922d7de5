//! Employee records of the team overview sheet.
//!
//! The sheet carries two header rows: the table header (field labels) and a
//! first data row holding the competency names above the rating columns.
use crate::config::ROSTER_COMPETENCY_COLUMNS;
use crate::config::ROSTER_FIELD_COLUMNS;
use crate::config::ROSTER_ID_COLUMN;
use crate::table::CellValue;
use crate::table::Table;
use crate::table::TableError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: CellValue,
    pub position: CellValue,
    pub skill_expertise: CellValue,
    pub risk: CellValue,
    pub value: CellValue,
    pub potential: CellValue,
    pub salary_increase_plan: CellValue,
    pub salary_comment: CellValue,
    pub free_comment: CellValue,
    /// Competency name to rating
    pub competencies: IndexMap<String, CellValue>,
}

impl EmployeeRecord {
    fn field_mut(&mut self, field: &str) -> Option<&mut CellValue> {
        match field {
            "position" => Some(&mut self.position),
            "skill_expertise" => Some(&mut self.skill_expertise),
            "risk" => Some(&mut self.risk),
            "value" => Some(&mut self.value),
            "potential" => Some(&mut self.potential),
            "salary_increase_plan" => Some(&mut self.salary_increase_plan),
            "salary_comment" => Some(&mut self.salary_comment),
            "free_comment" => Some(&mut self.free_comment),
            _ => None,
        }
    }
}

/// The roster split into its header-of-headers and employee rows.
#[derive(Debug)]
pub struct RosterSheet<'a> {
    table: &'a Table,
    id_column: usize,
    /// Field name to column position; fields whose column is missing are absent
    field_columns: Vec<(&'static str, usize)>,
    /// Rating column position to competency name
    competency_names: Vec<(usize, String)>,
    rows: &'a [Vec<CellValue>],
}

impl<'a> RosterSheet<'a> {
    /// Splits the table; the id column is required, the other fields are optional.
    pub fn new(table: &'a Table) -> Result<Self, TableError> {
        let id_column = table.require_column(ROSTER_ID_COLUMN)?;
        let field_columns = ROSTER_FIELD_COLUMNS
            .iter()
            .filter_map(|(field, label)| match table.column_index(label) {
                Some(index) => Some((*field, index)),
                None => {
                    log::debug!("Sheet '{}' has no column '{}'", table.name, label);
                    None
                }
            })
            .collect();
        let (competency_names, rows) = match table.rows.split_first() {
            Some((header, rows)) => {
                let names = ROSTER_COMPETENCY_COLUMNS
                    .filter_map(|index| header.get(index).and_then(CellValue::text).map(|name| (index, name)))
                    .collect();
                (names, rows)
            }
            None => (Vec::new(), &table.rows[..]),
        };
        Ok(Self {
            table,
            id_column,
            field_columns,
            competency_names,
            rows,
        })
    }

    /// Competency names in column order.
    pub fn competency_names(&self) -> impl Iterator<Item = &str> {
        self.competency_names.iter().map(|(_, name)| name.as_str())
    }

    /// One record per row with a populated id; values pass through unparsed.
    pub fn project(&self) -> Vec<EmployeeRecord> {
        self.rows
            .iter()
            .filter_map(|row| self.project_row(row))
            .collect()
    }

    fn project_row(&self, row: &[CellValue]) -> Option<EmployeeRecord> {
        let id = row.get(self.id_column)?.present()?.clone();
        let mut record = EmployeeRecord {
            id,
            ..EmployeeRecord::default()
        };
        for (field, index) in &self.field_columns {
            if let (Some(slot), Some(value)) = (record.field_mut(field), row.get(*index)) {
                *slot = value.normalized();
            }
        }
        for (index, name) in &self.competency_names {
            if let Some(rating) = row.get(*index).and_then(CellValue::present) {
                record.competencies.insert(name.to_owned(), rating.clone());
            }
        }
        log::debug!(
            "Employee '{}' in '{}' with {} competencies",
            record.id,
            self.table.name,
            record.competencies.len()
        );
        Some(record)
    }
}

/// Projects the team overview table into employee records.
pub fn extract(table: &Table) -> Result<Vec<EmployeeRecord>, TableError> {
    Ok(RosterSheet::new(table)?.project())
}
