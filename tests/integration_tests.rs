//! Integration tests for the pcat CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd. Every
//! test works on its own catalog file inside a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a pcat command bound to the catalog in `tmp`
fn pcat(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pcat").unwrap();
    cmd.current_dir(tmp.path())
        .env("PCAT_CONFIG", tmp.path().join("no-config.yaml"))
        .env_remove("PCAT_DB")
        .env_remove("PCAT_FORMAT")
        .env_remove("PCAT_LOG")
        .arg("--db")
        .arg(db_path(tmp));
    cmd
}

fn db_path(tmp: &TempDir) -> PathBuf {
    tmp.path().join("catalog.json")
}

/// Helper to create a catalog holding the sample data
fn setup_catalog() -> TempDir {
    let tmp = TempDir::new().unwrap();
    pcat(&tmp).arg("init").assert().success();
    tmp
}

fn read_db(tmp: &TempDir) -> Value {
    let content = fs::read_to_string(db_path(tmp)).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn project_names(doc: &Value) -> Vec<String> {
    doc["bddTb1_Projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nomProjet"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    Command::cargo_bin("pcat")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Keeps a catalog of projects"))
        .stdout(predicate::str::contains("dim"))
        .stdout(predicate::str::contains("dest"))
        .stdout(predicate::str::contains("proj"));
}

#[test]
fn test_short_help_shows_about() {
    Command::cargo_bin("pcat")
        .unwrap()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project catalog with relational integrity"));
}

#[test]
fn test_version_displays() {
    Command::cargo_bin("pcat")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pcat"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    pcat(&tmp).arg("frobnicate").assert().failure();
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_writes_sample_catalog() {
    let tmp = TempDir::new().unwrap();
    pcat(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized catalog"));

    let doc = read_db(&tmp);
    assert_eq!(project_names(&doc), vec!["Alpha", "Beta"]);
    assert_eq!(doc["bddTb2_Destinations"].as_array().unwrap().len(), 3);
    assert_eq!(doc["bdd1_TypeProjet"][0], "Type A");
}

#[test]
fn test_init_twice_keeps_existing_catalog() {
    let tmp = setup_catalog();
    pcat(&tmp).args(["dim", "add", "type", "Audit"]).assert().success();

    pcat(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let doc = read_db(&tmp);
    assert!(doc["bdd1_TypeProjet"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v == "Audit"));
}

#[test]
fn test_init_force_requires_confirmation_when_piped() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["init", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    pcat(&tmp).args(["init", "--force", "--yes"]).assert().success();
}

#[test]
fn test_missing_catalog_is_seeded_on_first_use() {
    let tmp = TempDir::new().unwrap();
    pcat(&tmp)
        .args(["proj", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"));
    assert!(db_path(&tmp).exists());
}

#[test]
fn test_corrupt_catalog_falls_back_to_seed() {
    let tmp = TempDir::new().unwrap();
    fs::write(db_path(&tmp), "{ not json").unwrap();

    pcat(&tmp)
        .args(["proj", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Beta"))
        .stderr(predicate::str::contains("sample catalog was restored"));

    let doc = read_db(&tmp);
    assert_eq!(project_names(&doc), vec!["Alpha", "Beta"]);
}

// ============================================================================
// Dimension Tests
// ============================================================================

#[test]
fn test_dim_list_shows_usage_counts() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dim", "list", "type", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value,projects"))
        .stdout(predicate::str::contains("Type A,1"))
        .stdout(predicate::str::contains("Urgent,0"));
}

#[test]
fn test_dim_add_keeps_list_sorted_and_unique() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dim", "add", "name", "  Delta  "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));
    pcat(&tmp)
        .args(["dim", "add", "name", "Delta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let doc = read_db(&tmp);
    assert_eq!(
        doc["bdd2_NomProjet"],
        serde_json::json!(["Alpha", "Beta", "Delta", "Gamma"])
    );
}

#[test]
fn test_dim_add_blank_value_fails() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dim", "add", "type", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no project type was written"));
}

#[test]
fn test_dim_add_due_date_normalizes_month() {
    let tmp = setup_catalog();
    pcat(&tmp).args(["dim", "add", "due", "2026-09"]).assert().success();
    pcat(&tmp)
        .args(["dim", "add", "due", "september"])
        .assert()
        .failure();

    let doc = read_db(&tmp);
    assert!(doc["bdd4_DateEcheance"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v == "09/2026"));
}

#[test]
fn test_dim_rm_type_cascades_to_projects() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dim", "rm", "type", "Type A", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project type"))
        .stdout(predicate::str::contains("1 project(s) removed"));

    let doc = read_db(&tmp);
    assert_eq!(project_names(&doc), vec!["Beta"]);
    assert_eq!(doc["bdd1_TypeProjet"], serde_json::json!(["Type B", "Urgent"]));
}

#[test]
fn test_dim_rm_global_removes_links_too() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dim", "rm", "global", "Europe", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 destination link(s) removed"));

    let doc = read_db(&tmp);
    assert_eq!(project_names(&doc), vec!["Beta"]);
    let links = doc["bddTb2_Destinations"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["destinationPrecise"], "Tokyo");
}

#[test]
fn test_dim_rm_without_yes_is_refused_when_piped() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dim", "rm", "type", "Type A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    let doc = read_db(&tmp);
    assert_eq!(project_names(&doc), vec!["Alpha", "Beta"]);
}

#[test]
fn test_dim_rm_due_date_is_not_deletable() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dim", "rm", "due", "12/2024", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be deleted"));
}

#[test]
fn test_dim_rm_unknown_value_changes_nothing() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dim", "rm", "name", "Omega", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No project name 'Omega'"));
}

// ============================================================================
// Destination Tests
// ============================================================================

#[test]
fn test_dest_add_with_flags_then_contact() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args([
            "dest",
            "add",
            "Lyon",
            "--global",
            "Europe",
            "--contact-name",
            "Claire Martin",
            "--contact-info",
            "claire@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked Lyon to Europe"));

    pcat(&tmp)
        .args(["dest", "contact", "Lyon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Claire Martin"))
        .stdout(predicate::str::contains("claire@example.com"));

    pcat(&tmp)
        .args(["dest", "list", "--global", "Europe", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Europe,Lyon,Claire Martin"))
        .stdout(predicate::str::contains("Tokyo").not());
}

#[test]
fn test_dest_add_without_contact() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dest", "add", "Osaka", "--global", "Asie"])
        .assert()
        .success();

    pcat(&tmp)
        .args(["dest", "values", "--global", "Asie", "--format", "id"])
        .assert()
        .success()
        .stdout("Osaka\nTokyo\n");
}

#[test]
fn test_dest_add_without_global_fails_when_piped() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dest", "add", "Lyon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("global destination is required"));

    let doc = read_db(&tmp);
    assert_eq!(doc["bddTb2_Destinations"].as_array().unwrap().len(), 3);
}

#[test]
fn test_dest_add_unlisted_global_fails() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dest", "add", "Lyon", "--global", "Atlantis", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown global destination 'Atlantis'"));

    let doc = read_db(&tmp);
    assert_eq!(doc["bddTb2_Destinations"].as_array().unwrap().len(), 3);
    assert_eq!(doc["bdd3_DestinationGlobale"], serde_json::json!(["Amérique", "Asie", "Europe"]));
}

#[test]
fn test_dest_add_blank_precise_fails() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dest", "add", "  ", "--global", "Europe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no precise destination was written"));
}

#[test]
fn test_dest_add_duplicate_pair_warns() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dest", "add", "Paris", "--global", "Europe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already linked"));
}

#[test]
fn test_dest_contact_unknown_fails() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dest", "contact", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No destination link"));
}

#[test]
fn test_dest_rm_cascades_to_projects_and_links() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dest", "rm", "Paris", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted precise destination"));

    let doc = read_db(&tmp);
    assert_eq!(project_names(&doc), vec!["Beta"]);
    let links: Vec<&str> = doc["bddTb2_Destinations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["destinationPrecise"].as_str().unwrap())
        .collect();
    assert_eq!(links, vec!["Tokyo", "Berlin"]);
}

#[test]
fn test_dest_rm_scoped_to_other_global_keeps_everything() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["dest", "rm", "Paris", "--global", "Asie", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing references"));

    let doc = read_db(&tmp);
    assert_eq!(project_names(&doc), vec!["Alpha", "Beta"]);
}

// ============================================================================
// Project Tests
// ============================================================================

#[test]
fn test_proj_list_filters() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["proj", "list", "--global", "Asie", "--format", "id"])
        .assert()
        .success()
        .stdout("proj2\n");

    pcat(&tmp)
        .args(["proj", "list", "--due", "2024-12", "--format", "id"])
        .assert()
        .success()
        .stdout("proj1\n");

    pcat(&tmp)
        .args(["proj", "list", "--type", "Urgent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 project(s) found."));
}

#[test]
fn test_proj_list_precise_filter_shows_contact() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["proj", "list", "--precise", "Paris"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("Jean Dupont"))
        .stdout(predicate::str::contains("jean.dupont@example.com"));
}

#[test]
fn test_proj_show_json() {
    let tmp = setup_catalog();
    let output = pcat(&tmp)
        .args(["proj", "show", "proj1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let project: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(project["nomProjet"], "Alpha");
    assert_eq!(project["destinationPrecise"], "Paris");
}

#[test]
fn test_proj_show_yaml_by_default() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["proj", "show", "proj2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nomProjet: Beta"));
}

#[test]
fn test_proj_new_appends_and_records_due_date() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args([
            "proj",
            "new",
            "--name",
            "Gamma",
            "--type",
            "Urgent",
            "--global",
            "Europe",
            "--precise",
            "Berlin",
            "--due",
            "2026-01",
            "--description",
            "Audit",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project Gamma"));

    let doc = read_db(&tmp);
    assert_eq!(project_names(&doc), vec!["Alpha", "Beta", "Gamma"]);
    let gamma = &doc["bddTb1_Projects"][2];
    assert_eq!(gamma["dateEcheance"], "01/2026");
    assert_eq!(gamma["travailEnCours"], "");
    assert!(doc["bdd4_DateEcheance"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v == "01/2026"));
}

#[test]
fn test_proj_new_missing_required_fields_fails() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["proj", "new", "--name", "Gamma", "--type", "Urgent", "--no-input"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field"));

    let doc = read_db(&tmp);
    assert_eq!(project_names(&doc).len(), 2);
}

#[test]
fn test_proj_new_unknown_reference_fails() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args([
            "proj", "new", "--name", "Gamma", "--type", "Secret", "--global", "Europe",
            "--precise", "Paris", "--due", "12/2024",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown project type 'Secret'"));
}

#[test]
fn test_proj_edit_changes_only_given_fields() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["proj", "edit", "proj1", "--comments", "Livré", "--wip", "Phase 2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated project Alpha"));

    let doc = read_db(&tmp);
    let alpha = &doc["bddTb1_Projects"][0];
    assert_eq!(alpha["id"], "proj1");
    assert_eq!(alpha["commentaires"], "Livré");
    assert_eq!(alpha["travailEnCours"], "Phase 2");
    assert_eq!(alpha["typeProjet"], "Type A");
    assert_eq!(project_names(&doc).len(), 2);
}

#[test]
fn test_proj_edit_global_alone_rejects_stale_precise() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["proj", "edit", "proj1", "--global", "Asie"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "precise destination 'Paris' under 'Asie'",
        ));

    let doc = read_db(&tmp);
    let alpha = &doc["bddTb1_Projects"][0];
    assert_eq!(alpha["destinationGlobale"], "Europe");
    assert_eq!(alpha["destinationPrecise"], "Paris");
}

#[test]
fn test_proj_edit_global_with_matching_precise() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["proj", "edit", "proj1", "--global", "Europe", "--precise", "Berlin"])
        .assert()
        .success();

    let doc = read_db(&tmp);
    assert_eq!(doc["bddTb1_Projects"][0]["destinationPrecise"], "Berlin");
}

#[test]
fn test_proj_edit_requires_a_field() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["proj", "edit", "proj1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_proj_rm() {
    let tmp = setup_catalog();
    pcat(&tmp)
        .args(["proj", "rm", "proj2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project Beta"));

    let doc = read_db(&tmp);
    assert_eq!(project_names(&doc), vec!["Alpha"]);

    pcat(&tmp)
        .args(["proj", "rm", "proj2", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project matches"));
}

// ============================================================================
// Export / Import Tests
// ============================================================================

#[test]
fn test_export_import_round_trip() {
    let tmp = setup_catalog();
    let backup = tmp.path().join("backup.json");
    pcat(&tmp)
        .args(["export", "db", "--out"])
        .arg(&backup)
        .assert()
        .success();

    pcat(&tmp)
        .args(["dim", "rm", "type", "Type B", "--yes"])
        .assert()
        .success();
    assert_eq!(project_names(&read_db(&tmp)), vec!["Alpha"]);

    pcat(&tmp)
        .arg("import")
        .arg(&backup)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 project(s)"));
    assert_eq!(project_names(&read_db(&tmp)), vec!["Alpha", "Beta"]);
}

#[test]
fn test_export_db_to_stdout_is_valid_json() {
    let tmp = setup_catalog();
    let output = pcat(&tmp).args(["export", "db"]).output().unwrap();
    assert!(output.status.success());
    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["bddTb1_Projects"].as_array().unwrap().len(), 2);
}

#[test]
fn test_import_invalid_document_changes_nothing() {
    let tmp = setup_catalog();
    let bad = tmp.path().join("bad.json");
    fs::write(&bad, r#"{ "bdd1_TypeProjet": ["X"], "bddTb1_Projects": "oops" }"#).unwrap();

    pcat(&tmp)
        .arg("import")
        .arg(&bad)
        .arg("--yes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid catalog document"));

    assert_eq!(project_names(&read_db(&tmp)), vec!["Alpha", "Beta"]);
}

#[test]
fn test_import_malformed_json_fails() {
    let tmp = setup_catalog();
    let bad = tmp.path().join("bad.json");
    fs::write(&bad, "{ \"bdd1_TypeProjet\": [").unwrap();

    pcat(&tmp).arg("import").arg(&bad).arg("--yes").assert().failure();
    assert_eq!(project_names(&read_db(&tmp)), vec!["Alpha", "Beta"]);
}

#[test]
fn test_export_table_writes_document() {
    let tmp = setup_catalog();
    let out = tmp.path().join("projects.doc");
    pcat(&tmp)
        .args(["export", "table", "--global", "Europe", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 project(s)"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("landscape"));
    assert!(html.contains("Alpha"));
    assert!(!html.contains("Tokyo"));
}

#[test]
fn test_export_table_empty_result_fails() {
    let tmp = setup_catalog();
    let out = tmp.path().join("projects.doc");
    pcat(&tmp)
        .args(["export", "table", "--type", "Urgent", "--out"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("the project table is empty"));
    assert!(!out.exists());
}

// ============================================================================
// Config & Completions Tests
// ============================================================================

#[test]
fn test_config_path_reports_catalog() {
    let tmp = TempDir::new().unwrap();
    pcat(&tmp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog.json"));
}

#[test]
fn test_config_file_sets_default_format() {
    let tmp = setup_catalog();
    let config = tmp.path().join("config.yaml");
    fs::write(&config, "default_format: id\n").unwrap();

    pcat(&tmp)
        .env("PCAT_CONFIG", &config)
        .args(["proj", "list", "--global", "Europe"])
        .assert()
        .success()
        .stdout("proj1\n");
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    pcat(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pcat"));
}
