use std::fs;
use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use humansize::DECIMAL;
use log::{LevelFilter, info};

use keyglow_rs::conf::{Config, OutputTarget};
use keyglow_rs::keygroups::{KeyColorGroups, Layer};

use crate::commands::{Cli, SeedArg};

mod commands;
mod exit;

fn main() -> ExitCode {
	let cli = Cli::parse();

	match run(&cli) {
		Ok(_) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("{} {err:#}", "error:".red());
			ExitCode::from(exit::exit_code_for(&err))
		}
	}
}

fn run(cli: &Cli) -> anyhow::Result<()> {
	let mut config = Config::load(cli.configuration_file.as_deref())?;
	init_logging(config.log_level(cli.log_level)?);

	let seed = match cli.seed {
		Some(SeedArg::Hex(color)) => color,
		Some(SeedArg::Minimum(minimum)) => config.random_seed(Some(minimum))?,
		None => config.random_seed(None)?,
	};

	let groups = KeyColorGroups::from_config(&config)?;
	info!("generating palettes from {seed} with {} colors per layer", groups.group_count());

	let target = config.output_target(cli.output_file.as_deref());
	let mut out = target.open().with_context(|| format!("cannot open {target}"))?;

	for layer in Layer::ALL {
		let colors = config.palette(seed, groups.group_count(), layer)?;
		for line in groups.led_lines(&colors, layer)? {
			write!(out, "{line}\r\n").with_context(|| format!("cannot write to {target}"))?;
		}
	}
	out.flush().with_context(|| format!("cannot write to {target}"))?;

	if let OutputTarget::File(path) = &target {
		if let Ok(meta) = fs::metadata(path) {
			info!("wrote {} to {}", humansize::format_size(meta.len(), DECIMAL), path.display());
		}
	}

	Ok(())
}

fn init_logging(level: LevelFilter) {
	let mut builder = env_logger::Builder::new();
	builder
		.filter_level(level)
		.format(|buf, record| writeln!(buf, "{}: {}: {}", record.target(), record.level(), record.args()))
		.parse_default_env();
	let _ = builder.try_init();
}
