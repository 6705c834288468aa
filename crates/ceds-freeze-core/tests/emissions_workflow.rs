//! Full freeze-then-calculate workflow through the filesystem entry
//! points, staged in temporary directories.

use std::fs;
use std::path::Path;

use ceds_freeze_core::modules::emissions::calculate_emissions;
use ceds_freeze_core::modules::table::parse_table;
use ceds_freeze_core::{FreezeErrorCategory, FreezeParameters, calc_all_emissions, freeze_all_species};
use tempfile::TempDir;

fn write_config(dir: &Path, input: &Path, output: &Path, species: &[&str]) -> std::path::PathBuf {
    let species_json = species
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let body = format!(
        r#"{{
  "freeze": {{ "year": 1971, "isos": "all", "species": [{species_json}] }},
  "ceds": {{ "year_first": 1969, "year_last": 1973 }},
  "dirs": {{ "input": {input:?}, "output": {output:?} }}
}}"#
    );
    let path = dir.join("config.json");
    fs::write(&path, body).expect("config should be writable");
    path
}

fn stage_species(input: &Path, species: &str) {
    let ef = "iso,sector,fuel,units,X1969,X1970,X1971,X1972,X1973\n\
              usa,1A3b_Road,diesel_oil,kt/kt,1,2,10,4,5\n\
              can,1A3b_Road,diesel_oil,kt/kt,1,2,10,4,5\n\
              fra,1A3b_Road,diesel_oil,kt/kt,1,2,10,4,5\n\
              deu,1A3b_Road,diesel_oil,kt/kt,1,2,10,4,5\n\
              jpn,1A3b_Road,diesel_oil,kt/kt,1,2,100,4,5\n\
              usa,2A1_Cement-production,process,kt/kt,7,7,7,7,7\n";
    let activity = "iso,sector,fuel,units,X1969,X1970,X1971,X1972,X1973\n\
                    usa,1A3b_Road,diesel_oil,kt/kt,3,3,3,3,3\n\
                    can,1A3b_Road,diesel_oil,kt/kt,3,3,3,3,3\n\
                    fra,1A3b_Road,diesel_oil,kt/kt,3,3,3,3,3\n\
                    deu,1A3b_Road,diesel_oil,kt/kt,3,3,3,3,3\n\
                    jpn,1A3b_Road,diesel_oil,kt/kt,3,3,3,3,3\n\
                    usa,2A1_Cement-production,process,kt/kt,2,2,2,2,2\n";
    fs::write(
        input.join(format!("H.{species}_total_EFs_extended.csv")),
        ef,
    )
    .expect("EF fixture should be writable");
    fs::write(
        input.join(format!("H.{species}_total_activity_extended.csv")),
        activity,
    )
    .expect("activity fixture should be writable");
}

#[test]
fn freeze_then_calculate_produces_frozen_emissions() {
    let workspace = TempDir::new().expect("tempdir");
    let input = workspace.path().join("intermediate-output");
    let output = workspace.path().join("frozen");
    fs::create_dir_all(&input).expect("input dir");
    stage_species(&input, "SO2");
    let config = write_config(workspace.path(), &input, &output, &["SO2"]);

    let params = FreezeParameters::from_file(&config).expect("config should load");
    let freeze_summary = freeze_all_species(&params).expect("freeze run should succeed");
    assert!(freeze_summary.failures.is_empty());

    let calc_summary = calc_all_emissions(&params).expect("calc run should succeed");
    assert!(calc_summary.failures.is_empty());

    let emissions_path = output.join("SO2_total_CEDS_emissions.csv");
    let emissions = parse_table(
        &fs::read_to_string(&emissions_path).expect("emissions output should exist"),
    )
    .expect("emissions output should parse");

    // The repaired outlier row: median 10 replaces 100, frozen forward,
    // then multiplied by a constant activity of 3.
    let repaired = emissions.rows.iter().find(|row| row.iso == "jpn").unwrap();
    let index_1971 = emissions.year_index(1971).unwrap();
    assert_eq!(repaired.values[index_1971], 30.0);
    assert_eq!(repaired.values[index_1971 + 1], 30.0);

    // The non-combustion row passes through unfrozen: 7 * 2.
    let cement = emissions
        .rows
        .iter()
        .find(|row| row.sector == "2A1_Cement-production")
        .unwrap();
    assert!(cement.values.iter().all(|value| *value == 14.0));
}

#[test]
fn a_failing_species_does_not_abort_the_others() {
    let workspace = TempDir::new().expect("tempdir");
    let input = workspace.path().join("intermediate-output");
    let output = workspace.path().join("frozen");
    fs::create_dir_all(&input).expect("input dir");
    stage_species(&input, "SO2");
    stage_species(&input, "NOx");
    // NOx loses its EF file, so freezing it cannot start.
    fs::remove_file(input.join("H.NOx_total_EFs_extended.csv")).expect("remove fixture");
    let config = write_config(workspace.path(), &input, &output, &["SO2", "NOx"]);

    let params = FreezeParameters::from_file(&config).expect("config should load");
    let summary = freeze_all_species(&params).expect("run should complete");

    assert_eq!(summary.failed_species(), vec!["NOx"]);
    assert!(output.join("H.SO2_total_EFs_extended.csv").exists());
    assert!(!output.join("H.NOx_total_EFs_extended.csv").exists());
}

#[test]
fn misaligned_activity_is_reported_as_an_alignment_error() {
    let ef = parse_table(
        "iso,sector,fuel,units,X1971,X1972\nusa,1A3b_Road,diesel_oil,kt/kt,10,10\n",
    )
    .expect("ef fixture");
    let activity = parse_table(
        "iso,sector,fuel,units,X1971,X1972\ncan,1A3b_Road,diesel_oil,kt/kt,3,3\n",
    )
    .expect("activity fixture");

    let error = calculate_emissions(&ef, &activity).expect_err("keys differ");
    assert_eq!(error.category(), FreezeErrorCategory::Alignment);
}

#[test]
fn disjoint_year_ranges_are_rejected() {
    let ef = parse_table("iso,sector,fuel,units,X1971\nusa,1A3b_Road,diesel_oil,kt/kt,10\n")
        .expect("ef fixture");
    let activity = parse_table("iso,sector,fuel,units,X1980\nusa,1A3b_Road,diesel_oil,kt/kt,3\n")
        .expect("activity fixture");

    let error = calculate_emissions(&ef, &activity).expect_err("no shared years");
    assert_eq!(error.category(), FreezeErrorCategory::Alignment);
}
