use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::model::descriptor::{Desc, DescId, FieldDesc, Registry};
use crate::model::namespace::{Entry, Namespace, SumEntry, TagEnum};
use crate::model::record::{EnumType, RecordType};
use crate::model::schema::{DefBody, FieldDecl, Module, is_simple};
use crate::model::{ModelError, Result};

/// Application-registered opaque types consulted last during field resolution.
#[derive(Debug, Default)]
pub struct AppTypes {
	types: HashMap<Box<str>, TypeId>,
}

impl AppTypes {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register native type `T` under a schema-visible name.
	pub fn register<T: 'static>(&mut self, name: &str) {
		self.types.insert(name.into(), TypeId::of::<T>());
	}

	fn get(&self, name: &str) -> Option<TypeId> {
		self.types.get(name).copied()
	}
}

/// Compile a schema module into a namespace of usable runtime types.
///
/// Simple sums become enumeration types with pre-built singleton values;
/// compound sums become a fieldless base type, one tagged record type per
/// constructor, and a `<name>_e` tag table; products become untagged record
/// types. Tags are 1-based in declaration order, independent per sum.
///
/// Fails on the schema authoring errors (unknown field type, a field marked
/// both optional and repeated); a failed compile publishes nothing.
pub fn compile(module: &Module, app_types: &AppTypes) -> Result<Namespace> {
	let mut builder = DescBuilder::new(app_types);

	// Placeholders first so definitions can reference each other in any
	// declaration order.
	for def in &module.defs {
		let placeholder = match &def.body {
			DefBody::Sum(cons) => Desc::Sum {
				name: def.name.clone(),
				variants: Vec::new(),
				simple: is_simple(cons),
			},
			DefBody::Product(_) => Desc::Product {
				name: def.name.clone(),
				fields: Vec::new(),
			},
		};
		let id = builder.reg.alloc(placeholder);
		builder.local.insert(def.name.clone(), id);
	}

	for def in &module.defs {
		let id = builder.local[&def.name];
		match &def.body {
			DefBody::Sum(cons_decls) => {
				let mut variants = Vec::with_capacity(cons_decls.len());
				for (idx, cons) in cons_decls.iter().enumerate() {
					let tag = u16::try_from(idx + 1).map_err(|_| ModelError::TooManyVariants {
						sum: def.name.to_string(),
						count: cons_decls.len(),
					})?;
					let fields = builder.field_descs(&cons.name, &cons.fields)?;
					variants.push(builder.reg.alloc(Desc::Constructor {
						name: cons.name.clone(),
						sum: id,
						tag,
						fields,
					}));
				}
				builder.reg.replace(
					id,
					Desc::Sum {
						name: def.name.clone(),
						variants,
						simple: is_simple(cons_decls),
					},
				);
			}
			DefBody::Product(field_decls) => {
				let fields = builder.field_descs(&def.name, field_decls)?;
				builder.reg.replace(
					id,
					Desc::Product {
						name: def.name.clone(),
						fields,
					},
				);
			}
		}
	}

	let local = std::mem::take(&mut builder.local);
	let registry = Arc::new(builder.reg);
	let mut namespace = Namespace::new(Arc::clone(&registry));

	for def in &module.defs {
		let id = local[&def.name];
		match &def.body {
			DefBody::Sum(cons_decls) if is_simple(cons_decls) => {
				let names = cons_decls.iter().map(|cons| cons.name.clone()).collect();
				let ty = EnumType::new(def.name.clone(), id, names)?;
				namespace.insert(def.name.clone(), Entry::Enum(Arc::new(ty)));
			}
			DefBody::Sum(_) => {
				let Desc::Sum { variants, .. } = registry.get(id) else {
					continue;
				};

				let base = Arc::new(RecordType::new(def.name.clone(), id, None, Vec::new(), Arc::clone(&registry)));
				let mut variant_types = Vec::with_capacity(variants.len());
				let mut tags = Vec::with_capacity(variants.len());
				for variant_id in variants {
					let Desc::Constructor { name, tag, fields, .. } = registry.get(*variant_id) else {
						continue;
					};
					let ty = Arc::new(RecordType::new(
						name.clone(),
						*variant_id,
						Some(*tag),
						fields.clone(),
						Arc::clone(&registry),
					));
					tags.push((name.clone(), *tag));
					namespace.insert(name.clone(), Entry::Record(Arc::clone(&ty)));
					variant_types.push(ty);
				}

				let tag_table = TagEnum::new(def.name.clone(), tags);
				namespace.insert(format!("{}_e", def.name).into(), Entry::Tags(Arc::new(tag_table)));
				namespace.insert(
					def.name.clone(),
					Entry::Sum(SumEntry {
						base,
						variants: variant_types,
					}),
				);
			}
			DefBody::Product(_) => {
				let Desc::Product { fields, .. } = registry.get(id) else {
					continue;
				};
				let ty = RecordType::new(def.name.clone(), id, None, fields.clone(), Arc::clone(&registry));
				namespace.insert(def.name.clone(), Entry::Record(Arc::new(ty)));
			}
		}
	}

	Ok(namespace)
}

struct DescBuilder<'a> {
	reg: Registry,
	local: HashMap<Box<str>, DescId>,
	opaques: HashMap<Box<str>, DescId>,
	prim_str: DescId,
	prim_int: DescId,
	prim_bool: DescId,
	app: &'a AppTypes,
}

impl<'a> DescBuilder<'a> {
	fn new(app: &'a AppTypes) -> Self {
		let mut reg = Registry::default();
		let prim_str = reg.alloc(Desc::Str);
		let prim_int = reg.alloc(Desc::Int);
		let prim_bool = reg.alloc(Desc::Bool);
		Self {
			reg,
			local: HashMap::new(),
			opaques: HashMap::new(),
			prim_str,
			prim_int,
			prim_bool,
			app,
		}
	}

	fn field_descs(&mut self, owner: &str, decls: &[FieldDecl]) -> Result<Vec<FieldDesc>> {
		let mut out = Vec::with_capacity(decls.len());
		for decl in decls {
			if decl.opt && decl.seq {
				return Err(ModelError::FieldOptAndSeq {
					def: owner.to_owned(),
					field: decl.name.to_string(),
				});
			}

			let Some(base) = self.resolve(&decl.type_name) else {
				return Err(ModelError::UnknownFieldType {
					def: owner.to_owned(),
					field: decl.name.to_string(),
					type_name: decl.type_name.to_string(),
				});
			};

			let desc = if decl.opt {
				self.reg.alloc(Desc::Optional(base))
			} else if decl.seq {
				self.reg.alloc(Desc::Sequence(base))
			} else {
				base
			};
			out.push(FieldDesc {
				name: decl.name.clone(),
				desc,
				no_eq: decl.no_eq,
			});
		}
		Ok(out)
	}

	// Lookup order: primitives, then module definitions, then app types.
	fn resolve(&mut self, name: &str) -> Option<DescId> {
		match name {
			"string" => return Some(self.prim_str),
			"int" => return Some(self.prim_int),
			"bool" => return Some(self.prim_bool),
			_ => {}
		}
		if let Some(id) = self.local.get(name) {
			return Some(*id);
		}
		if let Some(id) = self.opaques.get(name) {
			return Some(*id);
		}
		let type_id = self.app.get(name)?;
		let id = self.reg.alloc(Desc::Opaque {
			name: name.into(),
			type_id,
		});
		self.opaques.insert(name.into(), id);
		Some(id)
	}
}
