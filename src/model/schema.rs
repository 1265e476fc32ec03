use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::Result;

/// One schema module handed to the compiler by an external front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
	/// Module name, used for diagnostics only.
	pub name: Box<str>,
	/// Top-level definitions in declaration order.
	pub defs: Vec<Def>,
}

impl Module {
	/// Load a schema module from a JSON file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let text = fs::read_to_string(path)?;
		Self::from_json(&text)
	}

	/// Parse a schema module from JSON text.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}
}

/// One top-level schema definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Def {
	/// Name the compiled type is published under.
	pub name: Box<str>,
	/// Sum or product body.
	#[serde(flatten)]
	pub body: DefBody,
}

/// Body of a definition: a tagged union or a fixed-field record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefBody {
	/// Tagged union with one constructor per variant.
	Sum(Vec<ConsDecl>),
	/// Fixed-field record with no variant tag.
	Product(Vec<FieldDecl>),
}

/// One declared variant of a sum definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsDecl {
	/// Constructor name; compound variants are published under it.
	pub name: Box<str>,
	/// Per-variant fields, empty for enumeration variants.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub fields: Vec<FieldDecl>,
}

/// One declared field of a constructor or product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
	/// Field name.
	pub name: Box<str>,
	/// Declared type name: a primitive, another definition, or an app-supplied type.
	#[serde(rename = "type")]
	pub type_name: Box<str>,
	/// Value may be absent.
	#[serde(default, skip_serializing_if = "is_false")]
	pub opt: bool,
	/// Value is an ordered sequence of the declared type.
	#[serde(default, skip_serializing_if = "is_false")]
	pub seq: bool,
	/// Exclude this field from record equality.
	#[serde(default, skip_serializing_if = "is_false")]
	pub no_eq: bool,
}

/// Whether a sum with these constructors is a pure enumeration.
pub fn is_simple(constructors: &[ConsDecl]) -> bool {
	constructors.iter().all(|cons| cons.fields.is_empty())
}

fn is_false(value: &bool) -> bool {
	!*value
}
