use std::collections::HashMap;
use std::sync::Arc;

use crate::model::check::conforms;
use crate::model::descriptor::{Desc, DescId, FieldDesc, Registry};
use crate::model::value::Value;
use crate::model::{ModelError, Result};

/// Singleton enumeration value of a simple sum.
///
/// Pre-created once per variant at compile time; equality on
/// `(sum, enum_id)` is identity, since ids never collide across sums.
/// Fields stay private so [`EnumType`] is the only source of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
	sum: DescId,
	enum_id: u16,
	name: Box<str>,
}

impl EnumValue {
	/// Descriptor id of the owning sum.
	pub fn sum(&self) -> DescId {
		self.sum
	}

	/// 1-based variant id in declaration order; 0 is reserved.
	pub fn enum_id(&self) -> u16 {
		self.enum_id
	}

	/// Variant name.
	pub fn name(&self) -> &str {
		&self.name
	}
}

/// Enumeration type synthesized for a simple sum.
#[derive(Debug)]
pub struct EnumType {
	/// Published type name.
	pub name: Box<str>,
	/// Descriptor id of the sum.
	pub desc: DescId,
	values: Vec<EnumValue>,
}

impl EnumType {
	pub(crate) fn new(name: Box<str>, desc: DescId, variant_names: Vec<Box<str>>) -> Result<Self> {
		if u16::try_from(variant_names.len()).is_err() {
			return Err(ModelError::TooManyVariants {
				sum: name.to_string(),
				count: variant_names.len(),
			});
		}
		let values = variant_names
			.into_iter()
			.enumerate()
			.map(|(idx, variant)| EnumValue {
				sum: desc,
				enum_id: (idx + 1) as u16,
				name: variant,
			})
			.collect();
		Ok(Self { name, desc, values })
	}

	/// Canonical value for a named variant.
	pub fn value(&self, name: &str) -> Option<&EnumValue> {
		self.values.iter().find(|item| item.name.as_ref() == name)
	}

	/// All values in declaration order.
	pub fn values(&self) -> &[EnumValue] {
		&self.values
	}
}

/// Record type synthesized for a product or a compound-sum constructor.
#[derive(Debug)]
pub struct RecordType {
	/// Published type name.
	pub name: Box<str>,
	/// Descriptor id this type instantiates.
	pub desc: DescId,
	/// 1-based variant tag; `None` for products and sum bases.
	pub tag: Option<u16>,
	fields: Vec<FieldDesc>,
	index: HashMap<Box<str>, usize>,
	registry: Arc<Registry>,
}

impl RecordType {
	pub(crate) fn new(name: Box<str>, desc: DescId, tag: Option<u16>, fields: Vec<FieldDesc>, registry: Arc<Registry>) -> Self {
		let index = fields
			.iter()
			.enumerate()
			.map(|(idx, field)| (field.name.clone(), idx))
			.collect();
		Self {
			name,
			desc,
			tag,
			fields,
			index,
			registry,
		}
	}

	/// Declared fields in order.
	pub fn fields(&self) -> &[FieldDesc] {
		&self.fields
	}

	/// Ordered declared field names.
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|field| field.name.as_ref())
	}

	/// Number of declared fields.
	pub fn arity(&self) -> usize {
		self.fields.len()
	}

	/// Registry the field descriptors live in.
	pub fn registry(&self) -> &Arc<Registry> {
		&self.registry
	}

	/// Create a record with every field at its default/unassigned state.
	///
	/// Optional fields default to absent and sequence fields to an empty
	/// sequence; both count as assigned. Every other field starts
	/// unassigned and must be set before the record is complete.
	pub fn instantiate(self: &Arc<Self>) -> Record {
		let mut values = Vec::with_capacity(self.fields.len());
		let mut assigned = Vec::with_capacity(self.fields.len());
		for field in &self.fields {
			match self.registry.get(field.desc) {
				Desc::Optional(_) => {
					values.push(Value::Absent);
					assigned.push(true);
				}
				Desc::Sequence(_) => {
					values.push(Value::Seq(Vec::new()));
					assigned.push(true);
				}
				_ => {
					values.push(Value::Absent);
					assigned.push(false);
				}
			}
		}
		Record {
			ty: Arc::clone(self),
			values,
			assigned,
		}
	}

	/// Create a record from positional and keyword field values.
	///
	/// Positional values fill declared fields in order; keyword values may
	/// target any field not already filled positionally. With no values at
	/// all this is [`RecordType::instantiate`]; otherwise every field
	/// without a default must be assigned by the end of construction.
	pub fn construct(self: &Arc<Self>, positional: Vec<Value>, keyword: Vec<(&str, Value)>) -> Result<Record> {
		if positional.is_empty() && keyword.is_empty() {
			return Ok(self.instantiate());
		}
		if positional.len() > self.fields.len() {
			return Err(ModelError::TooManyPositional {
				type_name: self.name.to_string(),
				given: positional.len(),
				arity: self.fields.len(),
			});
		}

		let mut record = self.instantiate();
		let mut supplied = vec![false; self.fields.len()];

		for (idx, value) in positional.into_iter().enumerate() {
			record.set_index(idx, value)?;
			supplied[idx] = true;
		}

		for (name, value) in keyword {
			let Some(idx) = self.index.get(name).copied() else {
				return Err(ModelError::UnknownField {
					type_name: self.name.to_string(),
					field: name.to_owned(),
				});
			};
			if supplied[idx] {
				return Err(ModelError::DuplicateFieldInit {
					type_name: self.name.to_string(),
					field: name.to_owned(),
				});
			}
			record.set_index(idx, value)?;
			supplied[idx] = true;
		}

		let missing: Vec<String> = self
			.fields
			.iter()
			.enumerate()
			.filter(|(idx, _)| !record.assigned[*idx])
			.map(|(_, field)| field.name.to_string())
			.collect();
		if !missing.is_empty() {
			return Err(ModelError::MissingFields {
				type_name: self.name.to_string(),
				fields: missing,
			});
		}

		Ok(record)
	}
}

/// One record instance with per-field assignment tracking.
#[derive(Debug, Clone)]
pub struct Record {
	ty: Arc<RecordType>,
	values: Vec<Value>,
	assigned: Vec<bool>,
}

impl Record {
	/// Type this record instantiates.
	pub fn record_type(&self) -> &Arc<RecordType> {
		&self.ty
	}

	/// Name of this record's type.
	pub fn type_name(&self) -> &str {
		&self.ty.name
	}

	/// Descriptor id of this record's type.
	pub fn desc(&self) -> DescId {
		self.ty.desc
	}

	/// Variant tag, when this record is a compound-sum constructor.
	pub fn tag(&self) -> Option<u16> {
		self.ty.tag
	}

	/// Assign a field, running the structural type check first.
	///
	/// A failed assignment leaves the record untouched.
	pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
		let Some(idx) = self.ty.index.get(name).copied() else {
			return Err(ModelError::UnknownField {
				type_name: self.ty.name.to_string(),
				field: name.to_owned(),
			});
		};
		self.set_index(idx, value)
	}

	fn set_index(&mut self, idx: usize, value: Value) -> Result<()> {
		let field = &self.ty.fields[idx];
		if !conforms(&self.ty.registry, &value, field.desc)? {
			return Err(ModelError::FieldTypeMismatch {
				type_name: self.ty.name.to_string(),
				field: field.name.to_string(),
				expected: self.ty.registry.describe(field.desc),
				value: value.to_string(),
				value_kind: value.kind().to_owned(),
			});
		}
		self.values[idx] = value;
		self.assigned[idx] = true;
		Ok(())
	}

	/// Read a field; `Ok(None)` when a required field is unassigned.
	pub fn get(&self, name: &str) -> Result<Option<&Value>> {
		let Some(idx) = self.ty.index.get(name).copied() else {
			return Err(ModelError::UnknownField {
				type_name: self.ty.name.to_string(),
				field: name.to_owned(),
			});
		};
		if self.assigned[idx] {
			Ok(Some(&self.values[idx]))
		} else {
			Ok(None)
		}
	}

	/// Ordered `(name, value)` pairs for external formatters and encoders.
	pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
		self.ty.fields.iter().enumerate().map(|(idx, field)| {
			let value = self.assigned[idx].then(|| &self.values[idx]);
			(field.name.as_ref(), value)
		})
	}

	/// Check that every non-optional field has been assigned.
	pub fn check_complete(&self) -> Result<()> {
		let missing: Vec<String> = self
			.ty
			.fields
			.iter()
			.enumerate()
			.filter(|(idx, field)| !self.assigned[*idx] && !self.ty.registry.is_optional(field.desc))
			.map(|(_, field)| field.name.to_string())
			.collect();
		if missing.is_empty() {
			Ok(())
		} else {
			Err(ModelError::Incomplete {
				type_name: self.ty.name.to_string(),
				fields: missing,
			})
		}
	}
}

impl PartialEq for Record {
	fn eq(&self, other: &Self) -> bool {
		if self.tag() != other.tag() {
			return false;
		}
		if self.ty.fields.len() != other.ty.fields.len() {
			return false;
		}
		for (idx, field) in self.ty.fields.iter().enumerate() {
			let Some(other_idx) = other.ty.index.get(&field.name).copied() else {
				return false;
			};
			// Skip when either side opts the field out, so equality stays
			// symmetric across types with different markers.
			if field.no_eq || other.ty.fields[other_idx].no_eq {
				continue;
			}
			if self.assigned[idx] != other.assigned[other_idx] {
				return false;
			}
			if self.values[idx] != other.values[other_idx] {
				return false;
			}
		}
		true
	}
}
