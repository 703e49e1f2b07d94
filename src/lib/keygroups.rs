use std::fmt::{Display, Formatter};

use regex::Regex;

use crate::conf::{Config, ConfigError};
use crate::palettes::palette::Color;

/// The two backlight layers of the keyboard. Each layer gets its own
/// palette request and its own line template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
	Base,
	Fn,
}

impl Layer {
	pub const ALL: [Layer; 2] = [Layer::Base, Layer::Fn];

	pub(crate) fn mode_option(self) -> &'static str {
		match self {
			Layer::Base => "mode",
			Layer::Fn => "fn mode",
		}
	}

	fn line_option(self) -> &'static str {
		match self {
			Layer::Base => "line",
			Layer::Fn => "fn line",
		}
	}
}

impl Display for Layer {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Layer::Base => write!(f, "base"),
			Layer::Fn => write!(f, "fn"),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
enum Part {
	Literal(String),
	Key,
	Red,
	Green,
	Blue,
	Hex,
}

/// An output line template, parsed once at startup. Literal text plus the
/// placeholders `{key}`, `{red}`, `{green}`, `{blue}` and `{hex}`.
#[derive(Clone, Debug, PartialEq)]
struct LineTemplate {
	parts: Vec<Part>,
}

impl LineTemplate {
	fn parse(template: &str) -> Result<Self, String> {
		let re = Regex::new(r"\{([a-z]+)\}").unwrap();

		let mut parts: Vec<Part> = Vec::new();
		let mut last = 0;
		for groups in re.captures_iter(template) {
			let m = groups.get(0).unwrap();
			if m.start() > last {
				parts.push(Self::literal(&template[last..m.start()])?);
			}

			let part = match &groups[1] {
				"key" => Part::Key,
				"red" => Part::Red,
				"green" => Part::Green,
				"blue" => Part::Blue,
				"hex" => Part::Hex,
				name => return Err(format!("contains an unknown placeholder {{{name}}}")),
			};
			parts.push(part);
			last = m.end();
		}
		if last < template.len() {
			parts.push(Self::literal(&template[last..])?);
		}

		Ok(Self { parts })
	}

	fn literal(text: &str) -> Result<Part, String> {
		if text.contains('{') || text.contains('}') {
			return Err(format!("contains a stray brace in \"{text}\""));
		}
		if !text.is_ascii() {
			return Err(format!("contains non-ASCII text \"{text}\""));
		}
		Ok(Part::Literal(text.to_owned()))
	}

	fn render(&self, key: &str, color: Color) -> String {
		let mut line = String::new();
		for part in &self.parts {
			match part {
				Part::Literal(text) => line.push_str(text),
				Part::Key => line.push_str(key),
				Part::Red => line.push_str(&color.r.to_string()),
				Part::Green => line.push_str(&color.g.to_string()),
				Part::Blue => line.push_str(&color.b.to_string()),
				Part::Hex => line.push_str(&color.hex_format("")),
			}
		}
		line
	}
}

/// One named group of keys. The group takes `color_count` colors out of the
/// palette and assigns them to its keys round-robin, so the default of one
/// color paints the whole group uniformly.
#[derive(Clone, Debug)]
pub struct KeyGroup {
	pub name: String,
	keys: Vec<String>,
	color_count: usize,
	line: LineTemplate,
	fn_line: LineTemplate,
}

impl KeyGroup {
	fn from_config(config: &Config, name: &str) -> Result<Self, ConfigError> {
		let section = format!("KeyGroup {name}");
		if !config.has_section(&section) {
			return Err(ConfigError::MissingSection { section });
		}

		let keys_value = config.get(&section, "keys")
			.ok_or_else(|| ConfigError::option("keys", &section, "is required"))?;
		let keys: Vec<String> = keys_value.split_whitespace().map(str::to_owned).collect();
		if keys.is_empty() {
			return Err(ConfigError::option("keys", &section, "names no keys"));
		}
		if let Some(key) = keys.iter().find(|k| !k.is_ascii()) {
			return Err(ConfigError::option("keys", &section, format!("contains a non-ASCII key \"{key}\"")));
		}

		let color_count = match config.get(&section, "colors") {
			None => 1,
			Some(value) => value.trim().parse::<usize>().ok().filter(|n| *n >= 1)
				.ok_or_else(|| ConfigError::option("colors", &section, "is not a positive integer"))?,
		};

		let line = Self::template(config, &section, Layer::Base)?;
		let fn_line = Self::template(config, &section, Layer::Fn)?;

		Ok(Self {
			name: name.to_owned(),
			keys,
			color_count,
			line,
			fn_line,
		})
	}

	/// Group sections may override the line templates; the [Keys] defaults
	/// apply otherwise.
	fn template(config: &Config, section: &str, layer: Layer) -> Result<LineTemplate, ConfigError> {
		let option = layer.line_option();
		let (value, found_in) = match config.get(section, option) {
			Some(value) => (value, section),
			None => (config.get("Keys", option).expect("defaulted option"), "Keys"),
		};
		LineTemplate::parse(value).map_err(|msg| ConfigError::option(option, found_in, msg))
	}

	pub fn key_count(&self) -> usize {
		self.keys.len()
	}
}

/// The ordered key groups of the keyboard, built once from configuration.
#[derive(Debug)]
pub struct KeyColorGroups {
	groups: Vec<KeyGroup>,
}

impl KeyColorGroups {
	pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
		let listed = config.get("Keys", "groups").expect("defaulted option");

		let mut groups = Vec::new();
		for name in listed.split_whitespace() {
			groups.push(KeyGroup::from_config(config, name)?);
		}
		if groups.is_empty() {
			return Err(ConfigError::option("groups", "Keys", "names no key groups"));
		}

		Ok(Self { groups })
	}

	/// How many palette colors one layer needs.
	pub fn group_count(&self) -> usize {
		self.groups.iter().map(|g| g.color_count).sum()
	}

	pub fn groups(&self) -> &[KeyGroup] {
		&self.groups
	}

	/// Renders one output line per key, walking the groups in definition
	/// order. The palette length must match [Self::group_count] exactly.
	pub fn led_lines(&self, colors: &[Color], layer: Layer) -> Result<Vec<String>, ConfigError> {
		let expected = self.group_count();
		if colors.len() != expected {
			return Err(ConfigError::PaletteMismatch { expected, received: colors.len() });
		}

		let mut lines = Vec::new();
		let mut consumed = 0;
		for group in &self.groups {
			let group_colors = &colors[consumed..consumed + group.color_count];
			consumed += group.color_count;

			let template = match layer {
				Layer::Base => &group.line,
				Layer::Fn => &group.fn_line,
			};
			for (i, key) in group.keys.iter().enumerate() {
				lines.push(template.render(key, group_colors[i % group.color_count]));
			}
		}

		Ok(lines)
	}
}
