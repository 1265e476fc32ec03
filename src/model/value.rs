use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::model::record::{EnumValue, Record};

/// Runtime value checked against descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Unset optional value.
	Absent,
	/// Boolean scalar.
	Bool(bool),
	/// Integer scalar.
	Int(i64),
	/// String scalar.
	Str(Box<str>),
	/// Application-native value.
	Opaque(OpaqueValue),
	/// Ordered sequence of values.
	Seq(Vec<Value>),
	/// Record instance of a product or constructor type.
	Record(Record),
	/// Singleton enumeration value of a simple sum.
	Enum(EnumValue),
}

impl Value {
	/// Short kind name for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Absent => "absent",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Str(_) => "string",
			Value::Opaque(_) => "opaque",
			Value::Seq(_) => "sequence",
			Value::Record(_) => "record",
			Value::Enum(_) => "enum",
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Absent => write!(f, "-"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Str(v) => write!(f, "{v:?}"),
			Value::Opaque(_) => write!(f, "<opaque>"),
			Value::Seq(items) => {
				write!(f, "[")?;
				for (idx, item) in items.iter().enumerate() {
					if idx > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{item}")?;
				}
				write!(f, "]")
			}
			Value::Record(record) => write!(f, "{}(..)", record.type_name()),
			Value::Enum(value) => write!(f, "{}", value.name()),
		}
	}
}

/// Application-native value carried through the object model unchanged.
///
/// Equality is reference identity on the shared allocation; the model never
/// looks inside an opaque value beyond its runtime type.
#[derive(Clone)]
pub struct OpaqueValue {
	inner: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
	/// Wrap a native value.
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self { inner: Arc::new(value) }
	}

	/// Runtime type of the wrapped value.
	pub fn type_id(&self) -> TypeId {
		(*self.inner).type_id()
	}

	/// Borrow the wrapped value if it is a `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.inner.downcast_ref()
	}
}

impl fmt::Debug for OpaqueValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OpaqueValue").finish_non_exhaustive()
	}
}

impl PartialEq for OpaqueValue {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

#[cfg(test)]
mod tests {
	use super::{OpaqueValue, Value};

	#[test]
	fn opaque_equality_is_reference_identity() {
		let first = OpaqueValue::new(7_u32);
		let same = first.clone();
		let other = OpaqueValue::new(7_u32);

		assert_eq!(first, same);
		assert_ne!(first, other);
	}

	#[test]
	fn opaque_downcast_recovers_the_native_value() {
		let value = OpaqueValue::new("token".to_owned());
		assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("token"));
		assert!(value.downcast_ref::<u32>().is_none());
	}

	#[test]
	fn display_renders_nested_sequences() {
		let value = Value::Seq(vec![Value::Int(1), Value::Seq(vec![Value::Str("a".into())])]);
		assert_eq!(value.to_string(), r#"[1, ["a"]]"#);
	}
}
