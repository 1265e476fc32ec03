use std::path::PathBuf;

use adtkit::model::{AppTypes, Desc, DescId, ModelError, Module, Namespace, Record, RecordType, Result, Value, compile};

pub fn run(schema: PathBuf, type_name: String, value_path: PathBuf, json: bool) -> Result<()> {
	let module = Module::load(&schema)?;
	let ns = compile(&module, &AppTypes::new())?;
	let ty = ns.record_type(&type_name)?;

	let text = std::fs::read_to_string(&value_path)?;
	let doc: serde_json::Value = serde_json::from_str(&text)?;

	let record = record_from_json(&ns, ty, &doc)?;
	record.check_complete()?;

	if json {
		let report = CheckJson {
			r#type: type_name,
			tag: record.tag(),
			complete: true,
			fields: record
				.fields()
				.map(|(name, value)| FieldJson {
					name: name.to_owned(),
					value: value.map(Value::to_string),
				})
				.collect(),
		};
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	println!("type: {type_name}");
	if let Some(tag) = record.tag() {
		println!("tag: {tag}");
	}
	println!("complete: true");
	for (name, value) in record.fields() {
		match value {
			Some(value) => println!("  {name} = {value}"),
			None => println!("  {name} unassigned"),
		}
	}
	Ok(())
}

/// Build a record of `ty` from a JSON object, key by key.
///
/// Keys the type does not declare are an error; missing declared keys are
/// left at their default/unassigned state so the caller's completeness
/// check reports them. A tagged constructor's object may carry a `"type"`
/// discriminator naming the constructor.
fn record_from_json(ns: &Namespace, ty: &std::sync::Arc<RecordType>, doc: &serde_json::Value) -> Result<Record> {
	let serde_json::Value::Object(map) = doc else {
		return Err(ModelError::ValueJsonMismatch {
			expected: format!("record {}", ty.name),
			got: json_kind(doc).to_owned(),
		});
	};

	let mut record = ty.instantiate();
	for (key, raw) in map {
		if key.as_str() == "type" && ty.tag.is_some() && !ty.field_names().any(|name| name == key.as_str()) {
			if raw.as_str() == Some(ty.name.as_ref()) {
				continue;
			}
			return Err(ModelError::ValueJsonMismatch {
				expected: format!("constructor {}", ty.name),
				got: raw.to_string(),
			});
		}
		let Some(field) = ty.fields().iter().find(|field| field.name.as_ref() == key.as_str()) else {
			return Err(ModelError::UnknownField {
				type_name: ty.name.to_string(),
				field: key.clone(),
			});
		};
		let value = value_from_json(ns, field.desc, raw)?;
		record.set(key, value)?;
	}
	Ok(record)
}

fn value_from_json(ns: &Namespace, expected: DescId, raw: &serde_json::Value) -> Result<Value> {
	let reg = ns.registry();
	match reg.get(expected) {
		Desc::Str => match raw.as_str() {
			Some(text) => Ok(Value::Str(text.into())),
			None => Err(mismatch(ns, expected, raw)),
		},
		Desc::Int => match raw.as_i64() {
			Some(number) => Ok(Value::Int(number)),
			None => Err(mismatch(ns, expected, raw)),
		},
		Desc::Bool => match raw.as_bool() {
			Some(flag) => Ok(Value::Bool(flag)),
			None => Err(mismatch(ns, expected, raw)),
		},
		Desc::Opaque { .. } => Err(mismatch(ns, expected, raw)),
		Desc::Optional(inner) => {
			if raw.is_null() {
				Ok(Value::Absent)
			} else {
				value_from_json(ns, *inner, raw)
			}
		}
		Desc::Sequence(inner) => {
			let Some(items) = raw.as_array() else {
				return Err(mismatch(ns, expected, raw));
			};
			let mut out = Vec::with_capacity(items.len());
			for item in items {
				out.push(value_from_json(ns, *inner, item)?);
			}
			Ok(Value::Seq(out))
		}
		Desc::Product { name, .. } => {
			let ty = ns.record_type(name)?;
			Ok(Value::Record(record_from_json(ns, ty, raw)?))
		}
		Desc::Sum { name, variants, simple } => {
			if *simple {
				let Some(variant) = raw.as_str() else {
					return Err(mismatch(ns, expected, raw));
				};
				let enum_ty = ns.enum_type(name)?;
				let Some(value) = enum_ty.value(variant) else {
					return Err(ModelError::UnknownVariant {
						sum: name.to_string(),
						name: variant.to_owned(),
					});
				};
				return Ok(Value::Enum(value.clone()));
			}

			// Compound-sum positions select the variant with a "type" key.
			let cons_name = raw.get("type").and_then(serde_json::Value::as_str).ok_or_else(|| mismatch(ns, expected, raw))?;
			let ty = ns.record_type(cons_name).map_err(|_| ModelError::UnknownVariant {
				sum: name.to_string(),
				name: cons_name.to_owned(),
			})?;
			if !variants.contains(&ty.desc) {
				return Err(ModelError::UnknownVariant {
					sum: name.to_string(),
					name: cons_name.to_owned(),
				});
			}
			Ok(Value::Record(record_from_json(ns, ty, raw)?))
		}
		Desc::Constructor { name, .. } => Err(ModelError::VariantAsFieldType { name: name.to_string() }),
	}
}

fn mismatch(ns: &Namespace, expected: DescId, raw: &serde_json::Value) -> ModelError {
	ModelError::ValueJsonMismatch {
		expected: ns.registry().describe(expected),
		got: json_kind(raw).to_owned(),
	}
}

fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "bool",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}

#[derive(serde::Serialize)]
struct CheckJson {
	r#type: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	tag: Option<u16>,
	complete: bool,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	value: Option<String>,
}
