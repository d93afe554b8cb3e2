use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cobble")]
#[command(about = "Validate and inspect data-driven content packs")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Log at debug level unless RUST_LOG says otherwise
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Load pack directories in order and report what was registered
	Load {
		/// Pack roots, lowest priority first
		#[arg(required = true)]
		packs: Vec<PathBuf>,

		#[command(flatten)]
		options: LoadOptions,
	},
	/// Decode one effect record and print its canonical form
	Decode {
		/// JSON file holding the record
		file: PathBuf,

		/// Packs to load first, so the record may refer to their content
		#[arg(long = "pack", short = 'p')]
		packs: Vec<PathBuf>,

		/// Print JSON instead of SNBT
		#[arg(long)]
		json: bool,

		#[command(flatten)]
		options: LoadOptions,
	},
	/// List registry families and their built-in entries
	Families,
}

/// Loader settings shared by the subcommands that read packs.
#[derive(clap::Args, Debug)]
pub struct LoadOptions {
	/// Loader settings file (TOML)
	#[arg(long, short = 'c')]
	pub config: Option<PathBuf>,

	/// Skip bad records instead of aborting the reload
	#[arg(long)]
	pub lenient: bool,
}
