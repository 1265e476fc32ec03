use std::path::PathBuf;

use adtkit::model::{AppTypes, DefBody, Module, Result, compile, is_simple};

pub fn run(schema: PathBuf) -> Result<()> {
	let module = Module::load(&schema)?;
	let ns = compile(&module, &AppTypes::new())?;

	let mut simple_sums = 0_usize;
	let mut compound_sums = 0_usize;
	let mut products = 0_usize;
	for def in &module.defs {
		match &def.body {
			DefBody::Sum(cons) if is_simple(cons) => simple_sums += 1,
			DefBody::Sum(_) => compound_sums += 1,
			DefBody::Product(_) => products += 1,
		}
	}

	println!("path: {}", schema.display());
	println!("module: {}", module.name);
	println!("defs: {}", module.defs.len());
	println!("simple_sums: {simple_sums}");
	println!("compound_sums: {compound_sums}");
	println!("products: {products}");
	println!("descriptors: {}", ns.registry().len());
	println!("entries: {}", ns.entries().count());

	Ok(())
}
