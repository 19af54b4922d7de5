use pretty_assertions::assert_eq;
use rust_xlsxwriter::Format;
use rust_xlsxwriter::Workbook as XlsxWriter;
use rust_xlsxwriter::XlsxError;
use serde_json::json;
use serde_json::Value;
use skill_matrix::config::Settings;
use skill_matrix::output::dump::dump_sheets;
use skill_matrix::patch::patch_file;
use skill_matrix::spreadsheet::filter::SheetFilter;
use skill_matrix::Pipeline;
use skill_matrix::Workbook;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_criteria(book: &mut XlsxWriter) -> Result<(), XlsxError> {
    let sheet = book.add_worksheet().set_name("Criteria")?;
    for (col, label) in ["Category", "Low", "High", "", "", "L1", "L2", "L3", "L4", "L5"]
        .iter()
        .enumerate()
    {
        if !label.is_empty() {
            sheet.write_string(0, col as u16, *label)?;
        }
    }
    sheet.write_string(1, 0, "Technical")?;
    sheet.write_string(1, 1, "basic")?;
    sheet.write_string(1, 2, "expert")?;
    sheet.write_string(1, 5, "novice")?;
    sheet.write_string(1, 9, "master")?;
    sheet.write_string(2, 0, "Rust")?;
    sheet.write_string(3, 0, "Communication")?;
    sheet.write_string(3, 1, "quiet")?;
    sheet.write_string(5, 0, "Writing")?;
    Ok(())
}

fn write_roster(book: &mut XlsxWriter) -> Result<(), XlsxError> {
    let sheet = book.add_worksheet().set_name(" Team overview")?;
    let labels = [
        "Position",
        "skill expertise",
        "Risk",
        "Value",
        "Potential",
        "Salary Increase plan",
        "Salary comment",
        "Free comment",
    ];
    for (offset, label) in labels.iter().enumerate() {
        sheet.write_string(0, offset as u16 + 1, *label)?;
    }
    sheet.write_string(1, 16, "Rust")?;
    sheet.write_string(1, 17, "SQL")?;
    sheet.write_string(2, 0, "alice")?;
    sheet.write_string(2, 1, "Engineer")?;
    sheet.write_number(2, 3, 2)?;
    sheet.write_number(2, 16, 4)?;
    Ok(())
}

fn write_profile(book: &mut XlsxWriter, name: &str) -> Result<(), XlsxError> {
    let sheet = book.add_worksheet().set_name(name)?;
    sheet.write_string(0, 0, "Skill")?;
    sheet.write_string(0, 1, "Level")?;
    sheet.write_string(1, 0, "Git")?;
    sheet.write_number(1, 1, 3)?;
    sheet.write_number(2, 1, 1)?;
    Ok(())
}

/// A workbook holding every sheet except `Senior Developer Sample`.
fn build_workbook(path: &Path) -> Result<(), XlsxError> {
    let mut book = XlsxWriter::new();
    write_criteria(&mut book)?;
    book.add_worksheet().set_name("Skill upgrage guide")?.write_string(0, 0, "Guide")?;
    write_roster(&mut book)?;
    write_profile(&mut book, "Product Developer")?;
    write_profile(&mut book, "Junior Developer")?;
    book.save(path)
}

fn settings(directory: &TempDir) -> Settings {
    let root = directory.path();
    Settings {
        workbook: root.join("matrix.xlsx"),
        data_dir: root.join("data"),
        dump_dir: root.join("dump"),
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn extract_writes_every_document() {
    let directory = tempfile::tempdir().unwrap();
    let settings = settings(&directory);
    build_workbook(&settings.workbook).unwrap();

    let report = Pipeline::open(&settings).run().unwrap();
    let failed: Vec<&str> = report.failures.iter().map(|failure| failure.sheet.as_str()).collect();
    assert_eq!(failed, vec!["Senior Developer Sample"]);

    let criteria = read_json(&settings.data_file("criteria.json"));
    assert_eq!(
        criteria,
        json!([
            {
                "category": "Technical",
                "description": "basic",
                "high_description": "expert",
                "level_descriptions": {"1": "novice", "5": "master"},
                "subcategories": [{"name": "Rust", "skills": []}]
            },
            {
                "category": "Communication",
                "description": "quiet",
                "high_description": null,
                "level_descriptions": {},
                "subcategories": [{"name": "Writing", "skills": []}]
            }
        ])
    );

    let roster = read_json(&settings.data_file("team_overview.json"));
    assert_eq!(roster.as_array().unwrap().len(), 1);
    assert_eq!(roster[0]["id"], json!("alice"));
    assert_eq!(roster[0]["position"], json!("Engineer"));
    assert_eq!(roster[0]["risk"], json!(2));
    assert_eq!(roster[0]["free_comment"], Value::Null);
    assert_eq!(roster[0]["competencies"], json!({"Rust": 4}));

    let junior = read_json(&settings.data_file("junior_developer.json"));
    assert_eq!(
        junior,
        json!({"title": "Junior Developer", "skills": [{"Skill": "Git", "Level": 3}]})
    );
    let senior = read_json(&settings.data_file("senior_developer_sample.json"));
    assert_eq!(senior, json!({"title": "Senior Developer Sample", "skills": []}));

    let guide = read_json(&settings.data_file("skill_upgrade_guide.json"));
    assert_eq!(guide["title"], json!("Skill Upgrade Guide"));
    assert_eq!(guide["skill_levels"].as_array().unwrap().len(), 5);

    let combined = read_json(&settings.data_file("combined_data.json"));
    assert_eq!(combined["criteria"], criteria);
    assert_eq!(combined["team_overview"], roster);
    let profiles: Vec<&String> = combined["developer_profiles"].as_object().unwrap().keys().collect();
    assert_eq!(
        profiles,
        vec!["Product Developer", "Senior Developer Sample", "Junior Developer"]
    );
}

#[test]
fn missing_workbook_still_writes_empty_documents() {
    let directory = tempfile::tempdir().unwrap();
    let settings = settings(&directory);

    let report = Pipeline::open(&settings).run().unwrap();
    assert_eq!(report.failures.len(), 6);
    assert!(report.document.criteria.is_empty());
    assert!(report.document.team_overview.is_empty());
    assert_eq!(read_json(&settings.data_file("criteria.json")), json!([]));
    assert_eq!(read_json(&settings.data_file("team_overview.json")), json!([]));
    assert_eq!(
        read_json(&settings.data_file("combined_data.json"))["developer_profiles"]["Junior Developer"],
        json!({"title": "Junior Developer", "skills": []})
    );
}

#[test]
fn dump_writes_selected_sheets() {
    let directory = tempfile::tempdir().unwrap();
    let settings = settings(&directory);
    build_workbook(&settings.workbook).unwrap();

    let mut workbook = Workbook::open(&settings.workbook).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec![
            "Criteria",
            "Skill upgrage guide",
            " Team overview",
            "Product Developer",
            "Junior Developer"
        ]
    );
    let filter = SheetFilter::new(&["*Developer", "Criteria"]).unwrap();
    let summary = dump_sheets(&mut workbook, &filter, &settings.dump_dir).unwrap();
    assert_eq!(summary.written, vec!["Criteria", "Product Developer", "Junior Developer"]);
    assert!(summary.failed.is_empty());

    let junior = read_json(&settings.dump_dir.join("Junior_Developer.json"));
    assert_eq!(
        junior,
        json!([{"Skill": "Git", "Level": 3}, {"Skill": null, "Level": 1}])
    );
    let all = read_json(&settings.dump_dir.join("all_sheets.json"));
    let names: Vec<&String> = all.as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["Criteria", "Product Developer", "Junior Developer"]);
    assert_eq!(all["Junior Developer"], junior);
    assert!(!settings.dump_dir.join("_Team_overview.json").exists());
}

#[test]
fn patch_after_extract_leaves_valid_json() {
    let directory = tempfile::tempdir().unwrap();
    let settings = settings(&directory);
    build_workbook(&settings.workbook).unwrap();
    Pipeline::open(&settings).run().unwrap();

    let path = settings.data_file("criteria.json");
    let before = fs::read_to_string(&path).unwrap();
    assert_eq!(patch_file(&path).unwrap().replacements, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn rejects_unsupported_extension() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("matrix.ods");
    fs::write(&path, b"not a workbook").unwrap();
    let error = Workbook::open(&path).err().unwrap();
    assert!(error.to_string().contains("expected .xlsx or .xlsm"), "{error}");
}

#[test]
fn missing_required_columns_skip_only_those_sheets() {
    let directory = tempfile::tempdir().unwrap();
    let settings = settings(&directory);
    let mut book = XlsxWriter::new();
    let criteria = book.add_worksheet().set_name("Criteria").unwrap();
    criteria.write_string(0, 0, "Category").unwrap();
    criteria.write_string(0, 1, "Low").unwrap();
    criteria.write_string(1, 0, "Technical").unwrap();
    criteria.write_string(1, 1, "basic").unwrap();
    let roster = book.add_worksheet().set_name(" Team overview").unwrap();
    roster.write_string(0, 0, "Name").unwrap();
    roster.write_string(0, 1, "Position").unwrap();
    roster.write_string(2, 0, "alice").unwrap();
    write_profile(&mut book, "Product Developer").unwrap();
    book.save(&settings.workbook).unwrap();

    let report = Pipeline::open(&settings).run().unwrap();
    let failed: Vec<&str> = report.failures.iter().map(|failure| failure.sheet.as_str()).collect();
    assert_eq!(
        failed,
        vec![
            "Criteria",
            "Skill upgrage guide",
            " Team overview",
            "Senior Developer Sample",
            "Junior Developer"
        ]
    );
    assert!(report.failures[0].cause.contains("High"), "{}", report.failures[0].cause);
    assert!(report.failures[2].cause.contains("Unnamed: 0"), "{}", report.failures[2].cause);

    assert_eq!(read_json(&settings.data_file("criteria.json")), json!([]));
    assert_eq!(read_json(&settings.data_file("team_overview.json")), json!([]));
    assert_eq!(
        read_json(&settings.data_file("product_developer.json")),
        json!({"title": "Product Developer", "skills": [{"Skill": "Git", "Level": 3}]})
    );
    assert!(settings.data_file("junior_developer.json").exists());
    assert!(settings.data_file("combined_data.json").exists());
}

#[test]
fn out_of_range_date_keeps_raw_value() {
    let directory = tempfile::tempdir().unwrap();
    let settings = settings(&directory);
    let mut book = XlsxWriter::new();
    write_criteria(&mut book).unwrap();
    let date = Format::new().set_num_format("yyyy-mm-dd");
    let criteria = book.worksheet_from_name("Criteria").unwrap();
    criteria.write_number_with_format(1, 1, 1e10, &date).unwrap();
    criteria.write_number_with_format(3, 2, 45292, &date).unwrap();
    write_roster(&mut book).unwrap();
    book.save(&settings.workbook).unwrap();

    let report = Pipeline::open(&settings).run().unwrap();
    assert_eq!(report.document.criteria.len(), 2);
    assert_eq!(report.document.criteria[0].description.as_deref(), Some("10000000000"));
    assert_eq!(report.document.criteria[1].high_description.as_deref(), Some("2024-01-01"));
    assert_eq!(report.document.team_overview.len(), 1);
    assert!(settings.data_file("team_overview.json").exists());
}
