#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[test]
fn wrong_typed_field_fails_naming_the_field_and_descriptor() {
	let output = run_check("shapes.json", "Circle", "circle_bad_type.json");

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("radius"), "stderr should name the field: {stderr}");
	assert!(stderr.contains("int"), "stderr should name the expected descriptor: {stderr}");
}

#[test]
fn empty_value_fails_completeness_naming_the_missing_field() {
	let output = run_check("shapes.json", "Circle", "circle_empty.json");

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("incomplete"), "stderr should report incompleteness: {stderr}");
	assert!(stderr.contains("radius"), "stderr should name the missing field: {stderr}");
}

#[test]
fn unknown_enum_variant_is_rejected() {
	let output = run_check("expr.json", "Binary", "binary_bad_op.json");

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("Times"), "stderr should name the unknown variant: {stderr}");
}

#[test]
fn undeclared_value_keys_are_rejected() {
	let output = run_check("shapes.json", "Circle", "circle_extra_key.json");

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("bogus"), "stderr should name the undeclared key: {stderr}");
	assert!(stderr.contains("Circle"), "stderr should name the record type: {stderr}");
}

#[test]
fn unknown_record_type_is_rejected() {
	let output = run_check("shapes.json", "Triangle", "circle_ok.json");

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("Triangle"), "stderr should name the missing type: {stderr}");
}

fn run_check(schema: &str, type_name: &str, value: &str) -> Output {
	Command::new(env!("CARGO_BIN_EXE_adtkit"))
		.args([
			"check",
			&fixture_path(schema).display().to_string(),
			"--type",
			type_name,
			&fixture_path(value).display().to_string(),
		])
		.output()
		.expect("command executes")
}

fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}
