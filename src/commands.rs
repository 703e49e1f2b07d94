use std::path::PathBuf;

use clap::Parser;
use const_format::formatcp;
use log::LevelFilter;

use keyglow_rs::palettes::MAX_CHANNEL_SUM;
use keyglow_rs::palettes::palette::Color;

const GIT_HASH: &str = env!("GIT_HASH");
const GIT_BRANCH: &str = env!("GIT_BRANCH");
const GIT_VERSION: &str = env!("GIT_VERSION");
const BUILD_DATE: &str = env!("BUILD_DATE");

const CLAP_VERSION: &str = formatcp!("{GIT_VERSION} [{GIT_BRANCH}, {GIT_HASH}, {BUILD_DATE}]");

#[derive(Parser, Debug, Clone)]
#[command(version = CLAP_VERSION, about = "Generates LED backlight palettes for the Kinesis Freestyle Edge")]
pub(crate) struct Cli {
	#[arg(short = 'C', long, help = "The configuration file. Defaults to keyglow/config.ini in the user configuration directory.")]
	pub configuration_file: Option<PathBuf>,

	#[arg(short = 'O', long, help = "The output file. Use - for standard output.")]
	pub output_file: Option<String>,

	#[arg(short = 'L', long, value_parser = parse_log_level, help = "Overrides the configured log level.")]
	pub log_level: Option<LevelFilter>,

	#[arg(value_parser = parse_seed, help = "A 6-digit hex seed color, or a minimum brightness between 0 and 765.")]
	pub seed: Option<SeedArg>,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum SeedArg {
	Minimum(u16),
	Hex(Color),
}

// a value in minimum brightness range always reads as one; everything else
// has to parse as a hex color
fn parse_seed(s: &str) -> Result<SeedArg, String> {
	if let Ok(minimum) = s.parse::<u32>() {
		if minimum <= u32::from(MAX_CHANNEL_SUM) {
			return Ok(SeedArg::Minimum(minimum as u16));
		}
	}

	match Color::from_hex(s) {
		Ok(color) => Ok(SeedArg::Hex(color)),
		Err(_) => Err(format!("\"{s}\" is not a hex color or a minimum brightness (0-{MAX_CHANNEL_SUM})")),
	}
}

fn parse_log_level(s: &str) -> Result<LevelFilter, String> {
	s.parse().map_err(|_| format!("unknown log level \"{s}\""))
}
