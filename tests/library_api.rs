use std::fs;

use costdraft::{AppError, PromptOptions, ReportOptions, templates};
use serial_test::serial;
use tempfile::TempDir;

#[test]
#[serial]
fn prompt_uses_dataset_from_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("prices.yml"),
        concat!(
            "rows:\n",
            "  - Category: Groundworks\n",
            "    Sub Category: Trench fill\n",
            "    Unit: m3\n",
            "    Rate (£): 145\n",
        ),
    )
    .unwrap();
    let config_path = dir.path().join("costdraft.toml");
    fs::write(&config_path, "[historical]\npath = \"prices.yml\"\n").unwrap();
    let data_path = dir.path().join("payload.json");
    fs::write(&data_path, "{}").unwrap();

    let question = costdraft::prompt(PromptOptions {
        data_path: Some(data_path),
        config_path: Some(config_path),
    })
    .unwrap();

    assert!(question.contains("Category: Groundworks"));
    assert!(question.contains("Sub-category: Trench fill | Unit: m3 | Price: 145"));
    assert!(!question.contains("Demolition"));
    assert!(question.contains("Project Type: N/A"));
}

#[test]
#[serial]
fn report_without_documents_is_an_input_error() {
    let err = costdraft::report(ReportOptions { mock: true, ..ReportOptions::default() })
        .unwrap_err();

    assert!(matches!(err, AppError::NoValidDocuments));
    assert_eq!(err.status_code(), 400);
}

#[test]
#[serial]
fn templates_reports_both_bundled_names() {
    let names: Vec<String> = templates(None).unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["feasibility-v1", "feasibility-v2"]);
}
