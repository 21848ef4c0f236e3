//! End-to-end tests of the evwh binary against local CSV input

use evwh_db::{DuckDbBackend, Warehouse};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const REGISTRATIONS: &str = "\
VIN (1-10),County,City,State,Postal Code,Model Year,Make,Model,Electric Vehicle Type,Clean Alternative Fuel Vehicle (CAFV) Eligibility,Electric Range,Base MSRP,Legislative District,DOL Vehicle ID,2020 Census Tract
5YJ3E1EA7K,King,Seattle,WA,98122,2019,TESLA,MODEL 3,Battery Electric Vehicle (BEV),Clean Alternative Fuel Vehicle Eligible,220,0,37,477309682,53033007800
1N4AZ0CP8D,Pierce,Tacoma,WA,98407,2013,NISSAN,LEAF,Battery Electric Vehicle (BEV),Clean Alternative Fuel Vehicle Eligible,75,0,27,104542000,53053060400
KNDCC3LG4L,,,,,,KIA,NIRO,Plug-in Hybrid Electric Vehicle (PHEV),,,,,217962530,
,King,Seattle,WA,98122,2021,FORD,MUSTANG MACH-E,Battery Electric Vehicle (BEV),,0,0,43,1234,53033006500
";

/// Path to the compiled evwh binary
fn evwh_bin() -> String {
    env!("CARGO_BIN_EXE_evwh").to_string()
}

/// Run an `evwh` CLI command and return (stdout, stderr, success).
fn run_evwh(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(evwh_bin())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute evwh with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn write_input(dir: &Path) -> String {
    let path = dir.join("ev.csv");
    std::fs::write(&path, REGISTRATIONS).unwrap();
    path.display().to_string()
}

#[test]
fn test_run_loads_star_schema() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let db_path = dir.path().join("ev_warehouse.duckdb");
    let db_arg = db_path.display().to_string();
    let project = dir.path().display().to_string();

    let (stdout, stderr, ok) = run_evwh(&[
        "run",
        "--input",
        &input,
        "--database",
        &db_arg,
        "--project-dir",
        &project,
    ]);
    assert!(ok, "run failed: {stderr}");
    assert!(stdout.contains("✓ dim_vehicle (3 rows)"), "{stdout}");
    assert!(stdout.contains("✓ fact_ev_registration (3 rows)"), "{stdout}");
    assert!(stdout.contains("Dropped:   1 records"), "{stdout}");

    let db = DuckDbBackend::from_path(&db_path).unwrap();
    for table in ["dim_vehicle", "dim_location", "dim_cafv", "fact_ev_registration"] {
        assert!(db.table_exists(table).unwrap(), "missing {table}");
    }
    assert_eq!(db.row_count("fact_ev_registration").unwrap(), 3);
}

#[test]
fn test_run_twice_replaces_tables() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let db_path = dir.path().join("ev.duckdb");
    let db_arg = db_path.display().to_string();
    let project = dir.path().display().to_string();
    let args = [
        "run", "--input", &input, "--database", &db_arg, "-p", &project,
    ];

    assert!(run_evwh(&args).2);
    assert!(run_evwh(&args).2);

    let db = DuckDbBackend::from_path(&db_path).unwrap();
    assert_eq!(db.row_count("fact_ev_registration").unwrap(), 3);
    assert_eq!(db.row_count("dim_cafv").unwrap(), 2);
}

#[test]
fn test_run_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.csv").display().to_string();
    let project = dir.path().display().to_string();

    let (_, stderr, ok) = run_evwh(&[
        "run",
        "--input",
        &missing,
        "--database",
        ":memory:",
        "-p",
        &project,
    ]);
    assert!(!ok);
    assert!(stderr.contains("[X004]"), "{stderr}");
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("evwh.yml"), "name: ev\nsurprise: true\n").unwrap();
    let input = write_input(dir.path());
    let project = dir.path().display().to_string();

    let (_, stderr, ok) = run_evwh(&["run", "--input", &input, "-p", &project]);
    assert!(!ok);
    assert!(stderr.contains("Failed to load project config"), "{stderr}");
}

#[test]
fn test_profile_prints_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let project = dir.path().display().to_string();

    let (stdout, stderr, ok) =
        run_evwh(&["profile", "--input", &input, "--top", "2", "-p", &project]);
    assert!(ok, "profile failed: {stderr}");
    assert!(stdout.starts_with("Rows: 4\n"), "{stdout}");
    assert!(stdout.contains("Most common model years:"));
}

#[test]
fn test_init_then_refuse_overwrite() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().display().to_string();

    let (_, _, ok) = run_evwh(&["init", "--dir", &target]);
    assert!(ok);
    assert!(dir.path().join("evwh.yml").exists());

    let (_, stderr, ok) = run_evwh(&["init", "--dir", &target]);
    assert!(!ok);
    assert!(stderr.contains("--force"));
}
