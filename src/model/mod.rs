mod check;
mod compile;
mod descriptor;
mod error;
mod namespace;
mod record;
mod schema;
mod value;

/// Structural type checking entry point.
pub use check::conforms;
/// Schema compilation entry point and app-supplied type registry.
pub use compile::{AppTypes, compile};
/// Descriptor arena and descriptor kinds.
pub use descriptor::{Desc, DescId, FieldDesc, Registry};
/// Error and result aliases.
pub use error::{ModelError, Result};
/// Published type namespace.
pub use namespace::{Entry, Namespace, SumEntry, TagEnum};
/// Runtime record and enumeration types.
pub use record::{EnumType, EnumValue, Record, RecordType};
/// Schema input model and loaders.
pub use schema::{ConsDecl, Def, DefBody, FieldDecl, Module, is_simple};
/// Runtime value types.
pub use value::{OpaqueValue, Value};
