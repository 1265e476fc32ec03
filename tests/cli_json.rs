#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;

#[test]
fn types_json_lists_every_published_entry() {
	let json = run_json(vec![
		"types".to_owned(),
		fixture_path("shapes.json").display().to_string(),
		"--json".to_owned(),
	]);

	let entries = json.as_array().expect("entries array");
	let names: Vec<&str> = entries.iter().filter_map(|item| item["name"].as_str()).collect();
	assert!(names.contains(&"op_id"), "expected simple sum entry");
	assert!(names.contains(&"shape"), "expected sum entry");
	assert!(names.contains(&"shape_e"), "expected tag table entry");
	assert!(names.contains(&"Circle") && names.contains(&"Square"), "expected constructor entries");
	assert!(names.contains(&"point"), "expected product entry");
}

#[test]
fn constructor_detail_reports_declaration_order_tag_and_fields() {
	let json = run_json(vec![
		"types".to_owned(),
		fixture_path("shapes.json").display().to_string(),
		"--type".to_owned(),
		"Square".to_owned(),
		"--json".to_owned(),
	]);

	assert_eq!(json["kind"], "record");
	assert_eq!(json["tag"], 2);
	assert_eq!(json["fields"][0]["name"], "side");
	assert_eq!(json["fields"][0]["type"], "int");
}

#[test]
fn tag_table_detail_maps_constructor_names_to_tags() {
	let json = run_json(vec![
		"types".to_owned(),
		fixture_path("shapes.json").display().to_string(),
		"--type".to_owned(),
		"shape_e".to_owned(),
		"--json".to_owned(),
	]);

	assert_eq!(json["kind"], "tags");
	assert_eq!(json["variants"][0]["name"], "Circle");
	assert_eq!(json["variants"][0]["tag"], 1);
	assert_eq!(json["variants"][1]["name"], "Square");
	assert_eq!(json["variants"][1]["tag"], 2);
}

#[test]
fn complete_circle_value_passes_the_check() {
	let json = run_json(vec![
		"check".to_owned(),
		fixture_path("shapes.json").display().to_string(),
		"--type".to_owned(),
		"Circle".to_owned(),
		fixture_path("circle_ok.json").display().to_string(),
		"--json".to_owned(),
	]);

	assert_eq!(json["type"], "Circle");
	assert_eq!(json["tag"], 1);
	assert_eq!(json["complete"], true);
	assert_eq!(json["fields"][0]["name"], "radius");
	assert_eq!(json["fields"][0]["value"], "5");
}

#[test]
fn nested_compound_sum_value_is_built_and_complete() {
	let json = run_json(vec![
		"check".to_owned(),
		fixture_path("expr.json").display().to_string(),
		"--type".to_owned(),
		"Binary".to_owned(),
		fixture_path("binary_ok.json").display().to_string(),
		"--json".to_owned(),
	]);

	assert_eq!(json["type"], "Binary");
	assert_eq!(json["tag"], 2);
	assert_eq!(json["complete"], true);
	assert_eq!(json["fields"][0]["value"], "Plus");
}

fn run_json(args: Vec<String>) -> Value {
	let output = Command::new(env!("CARGO_BIN_EXE_adtkit")).args(&args).output().expect("command executes");

	assert!(
		output.status.success(),
		"command should succeed: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}
