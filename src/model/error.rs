use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors produced while compiling schemas and validating runtime values.
#[derive(Debug, Error)]
pub enum ModelError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Schema or value JSON could not be parsed.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// A field carried both the optional and the repeated modifier.
	#[error("field {field} on {def} may not be both optional and repeated")]
	FieldOptAndSeq {
		/// Definition or constructor the field belongs to.
		def: String,
		/// Offending field name.
		field: String,
	},
	/// A field's declared type name resolved to nothing.
	#[error("unknown type {type_name} for field {field} on {def}")]
	UnknownFieldType {
		/// Definition or constructor the field belongs to.
		def: String,
		/// Field whose type failed to resolve.
		field: String,
		/// Unresolvable type name.
		type_name: String,
	},
	/// A sum declares more variants than the tag width can number.
	#[error("sum {sum} declares {count} variants; at most 65535 are supported")]
	TooManyVariants {
		/// Sum definition name.
		sum: String,
		/// Number of declared variants.
		count: usize,
	},
	/// A constructor descriptor appeared where a field type is expected.
	#[error("constructor {name} cannot be a field type; declare the owning sum instead")]
	VariantAsFieldType {
		/// Constructor name.
		name: String,
	},
	/// More positional values than declared fields.
	#[error("{type_name} declares {arity} fields, got {given} positional values")]
	TooManyPositional {
		/// Record type being constructed.
		type_name: String,
		/// Number of positional values supplied.
		given: usize,
		/// Number of declared fields.
		arity: usize,
	},
	/// The same field was supplied twice during construction.
	#[error("duplicate assignment of field {field} on {type_name}")]
	DuplicateFieldInit {
		/// Record type being constructed.
		type_name: String,
		/// Field supplied more than once.
		field: String,
	},
	/// Construction supplied arguments but left required fields unassigned.
	#[error("missing required fields on {type_name}: {fields:?}")]
	MissingFields {
		/// Record type being constructed.
		type_name: String,
		/// Required fields that were never assigned.
		fields: Vec<String>,
	},
	/// Assignment to a field the record type does not declare.
	#[error("{type_name} has no field {field}")]
	UnknownField {
		/// Record type being assigned.
		type_name: String,
		/// Undeclared field name.
		field: String,
	},
	/// Assigned value failed the structural type check.
	#[error("field {field} on {type_name} should be {expected}, got {value} ({value_kind})")]
	FieldTypeMismatch {
		/// Record type being assigned.
		type_name: String,
		/// Field that rejected the value.
		field: String,
		/// Rendering of the field's declared descriptor.
		expected: String,
		/// Rendering of the rejected value.
		value: String,
		/// Runtime kind of the rejected value.
		value_kind: String,
	},
	/// Completeness check found unassigned non-optional fields.
	#[error("incomplete {type_name}: unassigned fields {fields:?}")]
	Incomplete {
		/// Record type that failed the check.
		type_name: String,
		/// Non-optional fields still unassigned.
		fields: Vec<String>,
	},
	/// Requested name is not in the compiled namespace.
	#[error("type not found: {name}")]
	TypeNotFound {
		/// Requested type name.
		name: String,
	},
	/// Namespace entry exists but is not of the requested kind.
	#[error("{name} is not a record type")]
	NotARecordType {
		/// Requested entry name.
		name: String,
	},
	/// Namespace entry exists but is not an enumeration type.
	#[error("{name} is not an enumeration type")]
	NotAnEnumType {
		/// Requested entry name.
		name: String,
	},
	/// Requested variant is not declared on the sum.
	#[error("sum {sum} has no variant {name}")]
	UnknownVariant {
		/// Sum definition name.
		sum: String,
		/// Unknown variant name.
		name: String,
	},
	/// A JSON document cannot populate the expected descriptor.
	#[error("cannot build {expected} from json {got}")]
	ValueJsonMismatch {
		/// Rendering of the expected descriptor.
		expected: String,
		/// JSON value kind that was found.
		got: String,
	},
}
