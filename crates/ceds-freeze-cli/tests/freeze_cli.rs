use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent directory should be created");
    }
    fs::write(path, content).expect("file should be written");
}

fn stage_species(input: &Path, species: &str) {
    write_file(
        &input.join(format!("H.{species}_total_EFs_extended.csv")),
        "iso,sector,fuel,units,X1970,X1971,X1972\n\
         usa,1A3b_Road,diesel_oil,kt/kt,2,10,4\n\
         can,1A3b_Road,diesel_oil,kt/kt,2,10,4\n\
         fra,1A3b_Road,diesel_oil,kt/kt,2,10,4\n\
         deu,1A3b_Road,diesel_oil,kt/kt,2,10,4\n\
         jpn,1A3b_Road,diesel_oil,kt/kt,2,100,4\n\
         mex,2A1_Cement-production,process,kt/kt,9,9,9\n",
    );
    write_file(
        &input.join(format!("H.{species}_total_activity_extended.csv")),
        "iso,sector,fuel,units,X1970,X1971,X1972\n\
         usa,1A3b_Road,diesel_oil,kt/kt,3,3,3\n\
         can,1A3b_Road,diesel_oil,kt/kt,3,3,3\n\
         fra,1A3b_Road,diesel_oil,kt/kt,3,3,3\n\
         deu,1A3b_Road,diesel_oil,kt/kt,3,3,3\n\
         jpn,1A3b_Road,diesel_oil,kt/kt,3,3,3\n\
         mex,2A1_Cement-production,process,kt/kt,2,2,2\n",
    );
}

fn stage_config(temp: &TempDir, species: &[&str]) -> (PathBuf, PathBuf, PathBuf) {
    let input = temp.path().join("input");
    let output = temp.path().join("output");
    fs::create_dir_all(&input).expect("input dir should be created");

    let species_json = species
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let config = temp.path().join("config.json");
    write_file(
        &config,
        &format!(
            r#"{{
              "freeze": {{ "year": 1971, "isos": "all", "species": [{species_json}] }},
              "ceds": {{ "year_first": 1970, "year_last": 1972 }},
              "dirs": {{ "input": "{}", "output": "{}" }}
            }}"#,
            input.display(),
            output.display(),
        ),
    );
    (config, input, output)
}

fn run_cli(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_ceds-freeze");
    Command::new(binary_path)
        .args(args)
        .output()
        .expect("command should run")
}

#[test]
fn all_command_freezes_and_writes_emissions() {
    let temp = TempDir::new().expect("tempdir should be created");
    let (config, input, output) = stage_config(&temp, &["SO2"]);
    stage_species(&input, "SO2");

    let result = run_cli(&["all", "--config", config.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&result.stdout);

    assert!(
        result.status.success(),
        "stdout: {stdout}\nstderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert!(stdout.contains("2 file(s) written, all species succeeded"));
    assert!(output.join("H.SO2_total_EFs_extended.csv").is_file());

    let emissions = fs::read_to_string(output.join("SO2_total_CEDS_emissions.csv"))
        .expect("emissions output should exist");
    // The repaired outlier row: median 10 frozen forward, activity 3.
    let jpn = emissions
        .lines()
        .find(|line| line.starts_with("jpn"))
        .expect("jpn row should be present");
    assert_eq!(jpn, "jpn,1A3b_Road,diesel_oil,kt/kt,6,30,30");
    // Non-combustion rows only get the multiplication.
    let mex = emissions
        .lines()
        .find(|line| line.starts_with("mex"))
        .expect("mex row should be present");
    assert_eq!(mex, "mex,2A1_Cement-production,process,kt/kt,18,18,18");
}

#[test]
fn failing_species_yields_exit_code_one_and_names_it() {
    let temp = TempDir::new().expect("tempdir should be created");
    let (config, input, output) = stage_config(&temp, &["SO2", "CO"]);
    stage_species(&input, "SO2");
    // CO has no input files at all.

    let result = run_cli(&["freeze", "--config", config.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&result.stdout);

    assert_eq!(result.status.code(), Some(1));
    assert!(stdout.contains("FAILED CO at discovery"));
    assert!(stdout.contains("1 file(s) written, 1 species failed"));
    assert!(output.join("H.SO2_total_EFs_extended.csv").is_file());
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let missing = temp.path().join("absent.json");

    let result = run_cli(&["freeze", "--config", missing.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&result.stderr);

    assert_eq!(result.status.code(), Some(2));
    assert!(stderr.contains("CONFIG.READ"), "stderr: {stderr}");
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let result = run_cli(&["thaw"]);
    assert_eq!(result.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&result.stderr).contains("CONFIG.CLI_USAGE")
    );
}

#[test]
fn diagnostics_flag_writes_the_percent_change_file() {
    let temp = TempDir::new().expect("tempdir should be created");
    let (config, input, output) = stage_config(&temp, &["SO2"]);
    stage_species(&input, "SO2");

    let result = run_cli(&[
        "freeze",
        "--config",
        config.to_str().unwrap(),
        "--diagnostics",
    ]);
    assert!(result.status.success());

    let diagnostic = output.join("diagnostic").join("SO2_frozen_ef_pchange.csv");
    assert!(diagnostic.is_file());
    let body = fs::read_to_string(&diagnostic).expect("diagnostic should be readable");
    assert!(body.starts_with("iso,sector,fuel,units,X1971"));
    // The repaired row moved from 100 to 10: a -90% change.
    let jpn = body
        .lines()
        .find(|line| line.starts_with("jpn"))
        .expect("jpn diagnostic row should be present");
    assert!(jpn.ends_with("-0.9"), "row: {jpn}");
}

#[test]
fn help_exits_cleanly() {
    let result = run_cli(&["--help"]);
    assert!(result.status.success());
    assert!(String::from_utf8_lossy(&result.stdout).contains("ceds-freeze"));
}
