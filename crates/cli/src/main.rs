mod cli;
mod commands;
#[cfg(test)]
mod tests;

use clap::Parser;
use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let output = match cli.command {
		Command::Load { packs, options } => commands::load(&packs, &options)?,
		Command::Decode {
			file,
			packs,
			json,
			options,
		} => commands::decode(&file, &packs, json, &options)?,
		Command::Families => commands::families()?,
	};
	print!("{output}");
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("cobble=debug,cobble_schema=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
