#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "adtkit", about = "Schema-driven runtime type tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info {
		schema: PathBuf,
	},
	Types {
		schema: PathBuf,
		#[arg(long = "type")]
		type_name: Option<String>,
		#[arg(long)]
		json: bool,
	},
	Check {
		schema: PathBuf,
		#[arg(long = "type")]
		type_name: String,
		value: PathBuf,
		#[arg(long)]
		json: bool,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> adtkit::model::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info { schema } => cmd::info::run(schema),
		Commands::Types { schema, type_name, json } => cmd::types::run(schema, type_name, json),
		Commands::Check {
			schema,
			type_name,
			value,
			json,
		} => cmd::check::run(schema, type_name, value, json),
	}
}
