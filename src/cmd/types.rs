use std::path::PathBuf;

use adtkit::model::{AppTypes, Entry, Module, Namespace, Result, compile};

pub fn run(schema: PathBuf, type_name: Option<String>, json: bool) -> Result<()> {
	let module = Module::load(&schema)?;
	let ns = compile(&module, &AppTypes::new())?;

	if let Some(name) = type_name {
		return show_type(&ns, &name, json);
	}

	if json {
		let entries: Vec<EntryJson> = ns
			.entries()
			.map(|(name, entry)| EntryJson {
				name: name.to_owned(),
				kind: entry_kind(entry),
			})
			.collect();
		println!("{}", serde_json::to_string_pretty(&entries)?);
		return Ok(());
	}

	for (name, entry) in ns.entries() {
		println!("{} {}", entry_kind(entry), name);
	}
	Ok(())
}

fn show_type(ns: &Namespace, name: &str, json: bool) -> Result<()> {
	let detail = match ns.get(name) {
		Some(Entry::Record(ty)) => TypeJson {
			name: name.to_owned(),
			kind: "record",
			tag: ty.tag,
			fields: ty
				.fields()
				.iter()
				.map(|field| FieldJson {
					name: field.name.to_string(),
					r#type: ns.registry().describe(field.desc),
					no_eq: field.no_eq,
				})
				.collect(),
			values: Vec::new(),
			variants: Vec::new(),
		},
		Some(Entry::Enum(ty)) => TypeJson {
			name: name.to_owned(),
			kind: "enum",
			tag: None,
			fields: Vec::new(),
			values: ty
				.values()
				.iter()
				.map(|value| VariantJson {
					name: value.name().to_owned(),
					tag: value.enum_id(),
				})
				.collect(),
			variants: Vec::new(),
		},
		Some(Entry::Sum(sum)) => TypeJson {
			name: name.to_owned(),
			kind: "sum",
			tag: None,
			fields: Vec::new(),
			values: Vec::new(),
			variants: sum
				.variants
				.iter()
				.map(|ty| VariantJson {
					name: ty.name.to_string(),
					tag: ty.tag.unwrap_or(0),
				})
				.collect(),
		},
		Some(Entry::Tags(tags)) => TypeJson {
			name: name.to_owned(),
			kind: "tags",
			tag: None,
			fields: Vec::new(),
			values: Vec::new(),
			variants: tags
				.tags()
				.iter()
				.map(|(cons, tag)| VariantJson {
					name: cons.to_string(),
					tag: *tag,
				})
				.collect(),
		},
		None => {
			return Err(adtkit::model::ModelError::TypeNotFound { name: name.to_owned() });
		}
	};

	if json {
		println!("{}", serde_json::to_string_pretty(&detail)?);
		return Ok(());
	}

	println!("type: {}", detail.name);
	println!("kind: {}", detail.kind);
	if let Some(tag) = detail.tag {
		println!("tag: {tag}");
	}
	for field in &detail.fields {
		let marker = if field.no_eq { " (no_eq)" } else { "" };
		println!("  {} {}{marker}", field.r#type, field.name);
	}
	for variant in detail.values.iter().chain(&detail.variants) {
		println!("  {} = {}", variant.name, variant.tag);
	}
	Ok(())
}

fn entry_kind(entry: &Entry) -> &'static str {
	match entry {
		Entry::Enum(_) => "enum",
		Entry::Record(_) => "record",
		Entry::Sum(_) => "sum",
		Entry::Tags(_) => "tags",
	}
}

#[derive(serde::Serialize)]
struct EntryJson {
	name: String,
	kind: &'static str,
}

#[derive(serde::Serialize)]
struct TypeJson {
	name: String,
	kind: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	tag: Option<u16>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	fields: Vec<FieldJson>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	values: Vec<VariantJson>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	variants: Vec<VariantJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	r#type: String,
	#[serde(skip_serializing_if = "is_false")]
	no_eq: bool,
}

fn is_false(value: &bool) -> bool {
	!*value
}

#[derive(serde::Serialize)]
struct VariantJson {
	name: String,
	tag: u16,
}
