//! CLI integration tests for ingredient-groups.
//!
//! Uses assert_cmd for end-to-end runs of the real binary.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin still works, just deprecated for custom build-dir

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn ingredient_groups() -> Command {
    Command::cargo_bin("ingredient-groups").expect("Failed to find ingredient-groups binary")
}

/// 30 recipes: 15 with basil, tomato and garlic, 12 with cumin and lime,
/// 3 with nothing. "gourmet" tags every third row.
fn write_recipes(dir: &Path) -> PathBuf {
    let mut csv = String::from("title,rating,basil,tomato,garlic,cumin,lime,gourmet\n");
    for row in 0..30 {
        let italian = u8::from(row < 15);
        let mexican = u8::from((15..27).contains(&row));
        let gourmet = u8::from(row % 3 == 0);
        csv.push_str(&format!(
            "Recipe {row},4.5,{italian},{italian},{italian},{mexican},{mexican},{gourmet}\n"
        ));
    }
    let path = dir.join("recipes.csv");
    fs::write(&path, csv).expect("Failed to write CSV");
    path
}

/// Mines the sample recipes into `groups.igrp` and returns its path.
fn mined_groups(dir: &Path) -> PathBuf {
    let data = write_recipes(dir);
    let output = dir.join("groups.igrp");
    ingredient_groups()
        .arg("mine")
        .arg("--data")
        .arg(&data)
        .arg("--output")
        .arg(&output)
        .args(["--min-support", "5", "--min-score", "1.5"])
        .assert()
        .success();
    output
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_flag() {
    ingredient_groups()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ingredient-groups"))
        .stdout(predicate::str::contains("mine"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("columns"));
}

#[test]
fn test_version_flag() {
    ingredient_groups()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand_fails() {
    ingredient_groups().assert().failure();
}

// ============================================================================
// Mine
// ============================================================================

#[test]
fn test_mine_prints_level_summary() {
    let dir = TempDir::new().unwrap();
    let data = write_recipes(dir.path());
    let output = dir.path().join("groups.igrp");
    let tags = dir.path().join("tags.txt");
    fs::write(&tags, "gourmet\n").unwrap();

    ingredient_groups()
        .args(["mine", "--min-support", "5", "--min-score", "1.5"])
        .arg("--data")
        .arg(&data)
        .arg("--output")
        .arg(&output)
        .arg("--exclude-file")
        .arg(&tags)
        .assert()
        .success()
        .stdout(predicate::str::contains("|F_1| = 5"))
        .stdout(predicate::str::contains("|F_2| = 4"))
        .stdout(predicate::str::contains("|F_3| = 1"))
        .stdout(predicate::str::contains("Saved 5 groups"));

    assert!(output.exists());
}

#[test]
fn test_mine_with_config_file() {
    let dir = TempDir::new().unwrap();
    let data = write_recipes(dir.path());
    let config = dir.path().join("mining.toml");
    fs::write(
        &config,
        "min_support = 5\nmin_score = 1.5\nmax_size = 2\nexclude = [\"gourmet\"]\n",
    )
    .unwrap();

    ingredient_groups()
        .arg("mine")
        .arg("--data")
        .arg(&data)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(dir.path().join("pairs.igrp"))
        .assert()
        .success()
        .stdout(predicate::str::contains("|F_2| = 4"))
        .stdout(predicate::str::contains("|F_3|").not());
}

#[test]
fn test_mine_missing_data_file() {
    let dir = TempDir::new().unwrap();
    ingredient_groups()
        .arg("mine")
        .arg("--data")
        .arg(dir.path().join("missing.csv"))
        .arg("--output")
        .arg(dir.path().join("groups.igrp"))
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_mine_rejects_zero_min_support() {
    let dir = TempDir::new().unwrap();
    let data = write_recipes(dir.path());
    ingredient_groups()
        .arg("mine")
        .arg("--data")
        .arg(&data)
        .args(["--min-support", "0"])
        .arg("--output")
        .arg(dir.path().join("groups.igrp"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("min_support"));
}

#[test]
fn test_mine_rejects_unknown_config_key() {
    let dir = TempDir::new().unwrap();
    let data = write_recipes(dir.path());
    let config = dir.path().join("bad.toml");
    fs::write(&config, "min_supprot = 5\n").unwrap();

    ingredient_groups()
        .arg("mine")
        .arg("--data")
        .arg(&data)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(dir.path().join("groups.igrp"))
        .assert()
        .failure()
        .code(2);
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_single_query() {
    let dir = TempDir::new().unwrap();
    let groups = mined_groups(dir.path());

    ingredient_groups()
        .arg("search")
        .arg("--groups")
        .arg(&groups)
        .args(["--query", "Basil"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 pairings found:"))
        .stdout(predicate::str::contains("  tomato (score "))
        .stdout(predicate::str::contains("1 combinations found:"))
        .stdout(predicate::str::contains("  tomato, garlic (score "));
}

#[test]
fn test_search_unknown_ingredient() {
    let dir = TempDir::new().unwrap();
    let groups = mined_groups(dir.path());

    ingredient_groups()
        .arg("search")
        .arg("--groups")
        .arg(&groups)
        .args(["--query", "saffron"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ingredient not found: saffron"));
}

#[test]
fn test_search_interactive_until_exit() {
    let dir = TempDir::new().unwrap();
    let groups = mined_groups(dir.path());

    ingredient_groups()
        .arg("search")
        .arg("--groups")
        .arg(&groups)
        .write_stdin("cumin\nexit\nbasil\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting search mode."))
        .stdout(predicate::str::contains("Search for ingredient: "))
        .stdout(predicate::str::contains("1 pairings found:"))
        .stdout(predicate::str::contains("2 pairings found:").not());
}

#[test]
fn test_search_corrupt_groups_file() {
    let dir = TempDir::new().unwrap();
    let groups = mined_groups(dir.path());
    let mut bytes = fs::read(&groups).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;
    fs::write(&groups, bytes).unwrap();

    ingredient_groups()
        .arg("search")
        .arg("--groups")
        .arg(&groups)
        .args(["--query", "basil"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Checksum mismatch"));
}

// ============================================================================
// Columns
// ============================================================================

#[test]
fn test_columns_to_stdout() {
    let dir = TempDir::new().unwrap();
    let data = write_recipes(dir.path());

    ingredient_groups()
        .arg("columns")
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("0\tbasil\n"))
        .stdout(predicate::str::contains("5\tgourmet\n"))
        .stdout(predicate::str::contains("rating").not());
}

#[test]
fn test_columns_to_file() {
    let dir = TempDir::new().unwrap();
    let data = write_recipes(dir.path());
    let index = dir.path().join("columns.tsv");

    ingredient_groups()
        .arg("columns")
        .arg("--data")
        .arg(&data)
        .arg("--output")
        .arg(&index)
        .assert()
        .success();

    let text = fs::read_to_string(&index).unwrap();
    assert_eq!(text.lines().count(), 6);
    assert!(text.starts_with("0\tbasil\n1\ttomato\n"));
}
