use std::any::TypeId;

/// Index of a descriptor inside its [`Registry`].
///
/// Id equality is descriptor identity: two field-identical definitions get
/// distinct ids, so ids act as nominal type tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DescId(pub(crate) u32);

/// One resolved field of a product or constructor descriptor.
#[derive(Debug, Clone)]
pub struct FieldDesc {
	/// Declared field name.
	pub name: Box<str>,
	/// Resolved field type, already wrapped in optional/sequence as declared.
	pub desc: DescId,
	/// Field is excluded from record equality.
	pub no_eq: bool,
}

/// One type descriptor.
#[derive(Debug)]
pub enum Desc {
	/// UTF-8 string scalar.
	Str,
	/// Signed integer scalar.
	Int,
	/// Boolean scalar.
	Bool,
	/// Application-supplied native type.
	Opaque {
		/// Name the application registered the type under.
		name: Box<str>,
		/// Runtime type accepted at this position.
		type_id: TypeId,
	},
	/// Value is absent or conforms to the inner descriptor.
	Optional(DescId),
	/// Ordered collection whose every element conforms to the inner descriptor.
	Sequence(DescId),
	/// Fixed-field record with no variant tag.
	Product {
		/// Definition name.
		name: Box<str>,
		/// Fields in declaration order.
		fields: Vec<FieldDesc>,
	},
	/// Tagged union over constructors.
	Sum {
		/// Definition name.
		name: Box<str>,
		/// Constructor descriptor ids in declaration order.
		variants: Vec<DescId>,
		/// No variant carries fields.
		simple: bool,
	},
	/// One variant of a compound sum.
	Constructor {
		/// Constructor name.
		name: Box<str>,
		/// Owning sum descriptor.
		sum: DescId,
		/// 1-based tag in declaration order; 0 is reserved.
		tag: u16,
		/// Fields in declaration order.
		fields: Vec<FieldDesc>,
	},
}

/// Arena of immutable descriptors for one compiled schema.
///
/// Built once during compilation, then frozen behind an `Arc` and shared
/// read-only by every synthesized type.
#[derive(Debug, Default)]
pub struct Registry {
	descs: Vec<Desc>,
}

impl Registry {
	pub(crate) fn alloc(&mut self, desc: Desc) -> DescId {
		let id = DescId(self.descs.len() as u32);
		self.descs.push(desc);
		id
	}

	pub(crate) fn replace(&mut self, id: DescId, desc: Desc) {
		self.descs[id.0 as usize] = desc;
	}

	/// Look up a descriptor by id.
	pub fn get(&self, id: DescId) -> &Desc {
		&self.descs[id.0 as usize]
	}

	/// Number of descriptors in the arena.
	pub fn len(&self) -> usize {
		self.descs.len()
	}

	/// Whether the arena holds no descriptors.
	pub fn is_empty(&self) -> bool {
		self.descs.is_empty()
	}

	/// Whether the descriptor at `id` is optional-wrapped.
	pub fn is_optional(&self, id: DescId) -> bool {
		matches!(self.get(id), Desc::Optional(_))
	}

	/// Render a descriptor for diagnostics.
	pub fn describe(&self, id: DescId) -> String {
		match self.get(id) {
			Desc::Str => "string".to_owned(),
			Desc::Int => "int".to_owned(),
			Desc::Bool => "bool".to_owned(),
			Desc::Opaque { name, .. } => format!("opaque {name}"),
			Desc::Optional(inner) => format!("{}?", self.describe(*inner)),
			Desc::Sequence(inner) => format!("{}*", self.describe(*inner)),
			Desc::Product { name, .. } => format!("product {name}"),
			Desc::Sum { name, .. } => format!("sum {name}"),
			Desc::Constructor { name, .. } => format!("constructor {name}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{Desc, Registry};

	#[test]
	fn describe_renders_wrapped_descriptors() {
		let mut reg = Registry::default();
		let int_id = reg.alloc(Desc::Int);
		let opt_id = reg.alloc(Desc::Optional(int_id));
		let seq_id = reg.alloc(Desc::Sequence(opt_id));

		assert_eq!(reg.describe(int_id), "int");
		assert_eq!(reg.describe(opt_id), "int?");
		assert_eq!(reg.describe(seq_id), "int?*");
	}

	#[test]
	fn alloc_assigns_distinct_ids_in_order() {
		let mut reg = Registry::default();
		let first = reg.alloc(Desc::Str);
		let second = reg.alloc(Desc::Str);

		assert_ne!(first, second);
		assert_eq!(reg.len(), 2);
	}
}
