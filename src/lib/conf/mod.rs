use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use rand::thread_rng;

use crate::colorapi::{ColorApiClient, ColorApiError};
use crate::conf::ini::Ini;
use crate::keygroups::Layer;
use crate::palettes::MAX_CHANNEL_SUM;
use crate::palettes::palette::Color;

pub mod ini;

const DEFAULT_CONF: &str = r"
[ColorAPI]
mode = analogic
fn mode = monochrome

[Logging]
level = warn

[Output]
path = -

[Palette]
minimum seed = 192

[Keys]
groups = letters numbers modifiers function arrows
line = [{key}]>[{red}][{green}][{blue}]
fn line = [fn {key}]>[{red}][{green}][{blue}]

[KeyGroup letters]
keys = q w e r t y u i o p a s d f g h j k l z x c v b n m

[KeyGroup numbers]
keys = tilde 1 2 3 4 5 6 7 8 9 0 hyphen equals

[KeyGroup modifiers]
keys = escape tab caps lshift lctrl lwin lalt lspace rspace ralt rwin rctrl rshift enter bspace

[KeyGroup function]
keys = f1 f2 f3 f4 f5 f6 f7 f8 f9 f10 f11 f12

[KeyGroup arrows]
keys = up down left right
";

/// Program configuration: built-in defaults overlaid with an optional
/// INI file. Also owns the color API client, built on first use.
pub struct Config {
	ini: Ini,
	client: Option<ColorApiClient>,
}

impl Config {
	pub fn new() -> Self {
		let ini = Ini::parse(DEFAULT_CONF).expect("built-in defaults must parse");
		Self { ini, client: None }
	}

	/// Builds a configuration from the defaults plus `explicit`, or plus the
	/// per-user configuration file when no explicit path is given. An
	/// explicit path must exist; the per-user file is optional.
	pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
		let mut config = Self::new();
		match explicit {
			Some(path) => config.load_file(path)?,
			None => {
				if let Some(path) = Self::default_path() {
					if path.exists() {
						config.load_file(&path)?;
					}
				}
			}
		}
		Ok(config)
	}

	pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
		let text = fs::read_to_string(path)
			.map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
		self.load_str(&text)?;
		debug!("loaded configuration from {}", path.display());
		Ok(())
	}

	pub fn load_str(&mut self, text: &str) -> Result<(), ConfigError> {
		self.ini.merge(Ini::parse(text)?);
		Ok(())
	}

	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("keyglow").join("config.ini"))
	}

	pub fn get(&self, section: &str, option: &str) -> Option<&str> {
		self.ini.get(section, option)
	}

	pub fn has_section(&self, section: &str) -> bool {
		self.ini.has_section(section)
	}

	/// Validates a minimum seed value: an integer in 0..=765.
	pub fn parse_minimum_seed(value: &str, section: &str) -> Result<u16, ConfigError> {
		let parsed = value.trim().parse::<u32>()
			.map_err(|_| ConfigError::option("minimum seed", section, "is not an integer"))?;
		if parsed > u32::from(MAX_CHANNEL_SUM) {
			return Err(ConfigError::option(
				"minimum seed",
				section,
				format!("is not in range 0-{MAX_CHANNEL_SUM}"),
			));
		}
		Ok(parsed as u16)
	}

	pub fn minimum_seed(&self) -> Result<u16, ConfigError> {
		let value = self.get("Palette", "minimum seed").expect("defaulted option");
		Self::parse_minimum_seed(value, "Palette")
	}

	/// Draws a random seed color at least as bright as `minimum_seed`, or as
	/// the configured minimum when no override is given.
	pub fn random_seed(&self, minimum_seed: Option<u16>) -> Result<Color, ConfigError> {
		let minimum_seed = match minimum_seed {
			Some(m) => m,
			None => self.minimum_seed()?,
		};
		Ok(Color::random_with_minimum(&mut thread_rng(), minimum_seed))
	}

	pub fn log_level(&self, cli_level: Option<log::LevelFilter>) -> Result<log::LevelFilter, ConfigError> {
		if let Some(level) = cli_level {
			return Ok(level);
		}
		let value = self.get("Logging", "level").expect("defaulted option");
		value.parse()
			.map_err(|_| ConfigError::option("level", "Logging", format!("unknown log level \"{value}\"")))
	}

	pub fn api_url(&self) -> &str {
		self.get("ColorAPI", "url").unwrap_or(ColorApiClient::URL)
	}

	/// Requests `count` colors grown from `seed` with the layer's configured
	/// generation mode. The client is built on the first request and reused.
	pub fn palette(&mut self, seed: Color, count: usize, layer: Layer) -> Result<Vec<Color>, ColorApiError> {
		let mode = self.get("ColorAPI", layer.mode_option()).expect("defaulted option").to_owned();
		if self.client.is_none() {
			self.client = Some(ColorApiClient::new(self.api_url()));
		}
		let client = self.client.as_ref().expect("client was just built");
		client.scheme(seed, count, &mode)
	}

	/// Resolves where palette lines go: the override if given, the
	/// configured path otherwise. `-` means standard output.
	pub fn output_target(&self, override_path: Option<&str>) -> OutputTarget {
		let path = override_path.unwrap_or_else(|| self.get("Output", "path").expect("defaulted option"));
		if path == "-" {
			OutputTarget::Stdout
		} else {
			OutputTarget::File(PathBuf::from(path))
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
	Stdout,
	File(PathBuf),
}

impl OutputTarget {
	pub fn open(&self) -> io::Result<Box<dyn Write>> {
		match self {
			OutputTarget::Stdout => Ok(Box::new(io::stdout())),
			OutputTarget::File(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
		}
	}
}

impl Display for OutputTarget {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputTarget::Stdout => write!(f, "standard output"),
			OutputTarget::File(path) => write!(f, "{}", path.display()),
		}
	}
}

#[derive(Debug)]
pub enum ConfigError {
	Io { path: PathBuf, source: io::Error },
	Syntax { line: usize, msg: String },
	MissingSection { section: String },
	Option { option: String, section: String, msg: String },
	PaletteMismatch { expected: usize, received: usize },
}

impl ConfigError {
	pub(crate) fn option<M: Into<String>>(option: &str, section: &str, msg: M) -> Self {
		ConfigError::Option {
			option: option.to_owned(),
			section: section.to_owned(),
			msg: msg.into(),
		}
	}
}

impl Display for ConfigError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigError::Io { path, source } => write!(f, "{}: {source}", path.display()),
			ConfigError::Syntax { line, msg } => write!(f, "configuration line {line}: {msg}"),
			ConfigError::MissingSection { section } => write!(f, "configuration section [{section}] is missing"),
			ConfigError::Option { option, section, msg } => write!(f, "\"{option}\" from [{section}] {msg}"),
			ConfigError::PaletteMismatch { expected, received } => {
				write!(f, "palette has {received} colors but the key groups need {expected}")
			}
		}
	}
}

impl std::error::Error for ConfigError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			ConfigError::Io { source, .. } => Some(source),
			_ => None,
		}
	}
}
