use crate::model::descriptor::{Desc, DescId, Registry};
use crate::model::value::Value;
use crate::model::{ModelError, Result};

/// Decide whether `value` structurally conforms to the descriptor `expected`.
///
/// Pure and total for every descriptor that can legally appear as a field
/// type; fails only when `expected` is a constructor, which fields must
/// never declare directly (the owning sum is the declarable type).
///
/// Record and enumeration values match by descriptor identity, not by
/// structure: a record conforms to a product only if it was instantiated
/// from that exact descriptor, and to a compound sum only if its descriptor
/// is one of the sum's declared constructors.
pub fn conforms(reg: &Registry, value: &Value, expected: DescId) -> Result<bool> {
	match reg.get(expected) {
		Desc::Constructor { name, .. } => Err(ModelError::VariantAsFieldType { name: name.to_string() }),
		Desc::Optional(inner) => {
			if matches!(value, Value::Absent) {
				return Ok(true);
			}
			conforms(reg, value, *inner)
		}
		Desc::Sequence(inner) => {
			let Value::Seq(items) = value else {
				return Ok(false);
			};
			for item in items {
				if !conforms(reg, item, *inner)? {
					return Ok(false);
				}
			}
			Ok(true)
		}
		Desc::Str => Ok(matches!(value, Value::Str(_))),
		Desc::Int => Ok(matches!(value, Value::Int(_))),
		Desc::Bool => Ok(matches!(value, Value::Bool(_))),
		Desc::Opaque { type_id, .. } => Ok(match value {
			Value::Opaque(inner) => inner.type_id() == *type_id,
			_ => false,
		}),
		Desc::Product { .. } => Ok(match value {
			Value::Record(record) => record.desc() == expected,
			_ => false,
		}),
		Desc::Sum { variants, simple, .. } => Ok(match value {
			Value::Enum(inner) if *simple => inner.sum() == expected,
			Value::Record(record) if !*simple => variants.contains(&record.desc()),
			_ => false,
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::conforms;
	use crate::model::compile::{AppTypes, compile};
	use crate::model::schema::Module;
	use crate::model::value::{OpaqueValue, Value};

	const SCHEMA: &str = r#"{
		"name": "checker",
		"defs": [
			{"name": "op_id", "sum": [{"name": "Plus"}, {"name": "Minus"}]},
			{"name": "shape", "sum": [
				{"name": "Circle", "fields": [{"name": "radius", "type": "int"}]},
				{"name": "Square", "fields": [{"name": "side", "type": "int"}]}
			]},
			{"name": "point", "product": [
				{"name": "x", "type": "int"},
				{"name": "y", "type": "int"}
			]},
			{"name": "holder", "product": [
				{"name": "label", "type": "string", "opt": true},
				{"name": "sizes", "type": "int", "seq": true},
				{"name": "shape", "type": "shape"},
				{"name": "raw", "type": "blob"}
			]}
		]
	}"#;

	struct Blob;

	fn checker_namespace() -> crate::model::Namespace {
		let module = Module::from_json(SCHEMA).expect("schema parses");
		let mut app = AppTypes::new();
		app.register::<Blob>("blob");
		compile(&module, &app).expect("schema compiles")
	}

	fn field_desc(ns: &crate::model::Namespace, type_name: &str, field: &str) -> crate::model::DescId {
		let ty = ns.record_type(type_name).expect("record type exists");
		ty.fields()
			.iter()
			.find(|item| item.name.as_ref() == field)
			.expect("field exists")
			.desc
	}

	#[test]
	fn scalars_require_an_exact_kind_match() {
		let ns = checker_namespace();
		let reg = ns.registry();
		let int_desc = field_desc(&ns, "point", "x");

		assert!(conforms(reg, &Value::Int(3), int_desc).unwrap());
		assert!(!conforms(reg, &Value::Bool(true), int_desc).unwrap());
		assert!(!conforms(reg, &Value::Str("3".into()), int_desc).unwrap());
	}

	#[test]
	fn compound_sum_accepts_own_variants_and_rejects_everything_else() {
		let ns = checker_namespace();
		let reg = ns.registry();
		let shape_desc = field_desc(&ns, "holder", "shape");

		let circle = ns
			.record_type("Circle")
			.unwrap()
			.construct(vec![Value::Int(5)], vec![])
			.unwrap();
		let point = ns
			.record_type("point")
			.unwrap()
			.construct(vec![Value::Int(1), Value::Int(2)], vec![])
			.unwrap();

		assert!(conforms(reg, &Value::Record(circle), shape_desc).unwrap());
		assert!(!conforms(reg, &Value::Record(point), shape_desc).unwrap());
		assert!(!conforms(reg, &Value::Int(0), shape_desc).unwrap());
	}

	#[test]
	fn sibling_constructor_is_rejected_at_a_product_position() {
		let ns = checker_namespace();
		let reg = ns.registry();
		let point_ty = ns.record_type("point").unwrap();

		let circle = ns
			.record_type("Circle")
			.unwrap()
			.construct(vec![Value::Int(5)], vec![])
			.unwrap();

		assert!(!conforms(reg, &Value::Record(circle), point_ty.desc).unwrap());
	}

	#[test]
	fn optional_accepts_absent_and_the_inner_type() {
		let ns = checker_namespace();
		let reg = ns.registry();
		let label_desc = field_desc(&ns, "holder", "label");

		assert!(conforms(reg, &Value::Absent, label_desc).unwrap());
		assert!(conforms(reg, &Value::Str("x".into()), label_desc).unwrap());
		assert!(!conforms(reg, &Value::Int(1), label_desc).unwrap());
	}

	#[test]
	fn sequence_rejects_one_bad_element() {
		let ns = checker_namespace();
		let reg = ns.registry();
		let sizes_desc = field_desc(&ns, "holder", "sizes");

		let good = Value::Seq(vec![Value::Int(1), Value::Int(2)]);
		let bad = Value::Seq(vec![Value::Int(1), Value::Str("2".into())]);

		assert!(conforms(reg, &good, sizes_desc).unwrap());
		assert!(!conforms(reg, &bad, sizes_desc).unwrap());
		assert!(!conforms(reg, &Value::Int(1), sizes_desc).unwrap());
	}

	#[test]
	fn opaque_matches_on_runtime_type_only() {
		let ns = checker_namespace();
		let reg = ns.registry();
		let raw_desc = field_desc(&ns, "holder", "raw");

		assert!(conforms(reg, &Value::Opaque(OpaqueValue::new(Blob)), raw_desc).unwrap());
		assert!(!conforms(reg, &Value::Opaque(OpaqueValue::new(7_u32)), raw_desc).unwrap());
	}

	#[test]
	fn simple_sum_accepts_only_its_own_enum_values() {
		let ns = checker_namespace();
		let reg = ns.registry();
		let op_ty = ns.enum_type("op_id").unwrap();

		let plus = Value::Enum(op_ty.value("Plus").unwrap().clone());
		assert!(conforms(reg, &plus, op_ty.desc).unwrap());
		assert!(!conforms(reg, &Value::Int(1), op_ty.desc).unwrap());
	}

	#[test]
	fn constructor_as_expected_type_is_an_authoring_error() {
		let ns = checker_namespace();
		let reg = ns.registry();
		let circle_ty = ns.record_type("Circle").unwrap();

		let err = conforms(reg, &Value::Int(1), circle_ty.desc).unwrap_err();
		assert!(matches!(err, crate::model::ModelError::VariantAsFieldType { .. }));
	}
}
