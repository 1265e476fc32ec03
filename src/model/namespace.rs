use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::descriptor::Registry;
use crate::model::record::{EnumType, RecordType};
use crate::model::{ModelError, Result};

/// Tag side table for one compound sum: constructor name to 1-based tag.
#[derive(Debug)]
pub struct TagEnum {
	/// Sum definition name this table belongs to.
	pub sum_name: Box<str>,
	tags: Vec<(Box<str>, u16)>,
}

impl TagEnum {
	pub(crate) fn new(sum_name: Box<str>, tags: Vec<(Box<str>, u16)>) -> Self {
		Self { sum_name, tags }
	}

	/// Tag for a constructor name.
	pub fn tag_of(&self, name: &str) -> Option<u16> {
		self.tags.iter().find(|(cons, _)| cons.as_ref() == name).map(|(_, tag)| *tag)
	}

	/// All `(constructor, tag)` pairs in declaration order.
	pub fn tags(&self) -> &[(Box<str>, u16)] {
		&self.tags
	}
}

/// Compound-sum grouping: the fieldless base plus one type per constructor.
#[derive(Debug)]
pub struct SumEntry {
	/// Base record type standing for "any variant of this sum".
	pub base: Arc<RecordType>,
	/// Constructor record types in declaration order.
	pub variants: Vec<Arc<RecordType>>,
}

/// One published namespace attribute.
#[derive(Debug)]
pub enum Entry {
	/// Simple-sum enumeration type.
	Enum(Arc<EnumType>),
	/// Product or constructor record type.
	Record(Arc<RecordType>),
	/// Compound-sum base with its variants.
	Sum(SumEntry),
	/// Constructor-name-to-tag side table.
	Tags(Arc<TagEnum>),
}

/// Immutable output namespace of one schema compilation.
///
/// Holds one entry per schema definition name, one per compound-sum
/// constructor, and one `<sum>_e` tag table per compound sum. Safe to share
/// read-only across threads once built.
#[derive(Debug)]
pub struct Namespace {
	registry: Arc<Registry>,
	entries: BTreeMap<Box<str>, Entry>,
}

impl Namespace {
	pub(crate) fn new(registry: Arc<Registry>) -> Self {
		Self {
			registry,
			entries: BTreeMap::new(),
		}
	}

	pub(crate) fn insert(&mut self, name: Box<str>, entry: Entry) {
		self.entries.insert(name, entry);
	}

	/// Descriptor arena backing every published type.
	pub fn registry(&self) -> &Arc<Registry> {
		&self.registry
	}

	/// Look up any published entry.
	pub fn get(&self, name: &str) -> Option<&Entry> {
		self.entries.get(name)
	}

	/// Published record type by name.
	pub fn record_type(&self, name: &str) -> Result<&Arc<RecordType>> {
		match self.get(name) {
			Some(Entry::Record(ty)) => Ok(ty),
			Some(_) => Err(ModelError::NotARecordType { name: name.to_owned() }),
			None => Err(ModelError::TypeNotFound { name: name.to_owned() }),
		}
	}

	/// Published enumeration type by name.
	pub fn enum_type(&self, name: &str) -> Result<&Arc<EnumType>> {
		match self.get(name) {
			Some(Entry::Enum(ty)) => Ok(ty),
			Some(_) => Err(ModelError::NotAnEnumType { name: name.to_owned() }),
			None => Err(ModelError::TypeNotFound { name: name.to_owned() }),
		}
	}

	/// Tag table for a compound sum, published under `<sum>_e`.
	pub fn tag_enum(&self, sum_name: &str) -> Option<&Arc<TagEnum>> {
		match self.get(&format!("{sum_name}_e")) {
			Some(Entry::Tags(tags)) => Some(tags),
			_ => None,
		}
	}

	/// All published entries in name order.
	pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
		self.entries.iter().map(|(name, entry)| (name.as_ref(), entry))
	}
}
