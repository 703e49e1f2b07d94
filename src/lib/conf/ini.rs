use std::collections::HashMap;

use regex::Regex;

use crate::conf::ConfigError;

/// A parsed INI document. Option keys are case-insensitive, section names
/// are not. Later occurrences of a key overwrite earlier ones.
#[derive(Clone, Debug, Default)]
pub struct Ini {
	sections: HashMap<String, HashMap<String, String>>,
}

impl Ini {
	pub fn parse(text: &str) -> Result<Ini, ConfigError> {
		let section_re = Regex::new(r"^\[(?P<name>[^\]]+)\]$").unwrap();
		let option_re = Regex::new(r"^(?P<key>[^=:]+?)\s*[=:]\s*(?P<value>.*)$").unwrap();

		let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
		let mut current: Option<String> = None;

		for (i, raw_line) in text.lines().enumerate() {
			let line = raw_line.trim();
			if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
				continue;
			}

			if let Some(groups) = section_re.captures(line) {
				let name = groups["name"].trim().to_owned();
				sections.entry(name.clone()).or_default();
				current = Some(name);
			} else if let Some(groups) = option_re.captures(line) {
				let Some(section) = &current else {
					return Err(ConfigError::Syntax {
						line: i + 1,
						msg: "option before any section header".to_owned(),
					});
				};
				let key = groups["key"].trim().to_lowercase();
				let value = groups["value"].trim().to_owned();
				sections.entry(section.clone()).or_default().insert(key, value);
			} else {
				return Err(ConfigError::Syntax {
					line: i + 1,
					msg: "not a section header or a key = value option".to_owned(),
				});
			}
		}

		Ok(Ini { sections })
	}

	/// Overlays `other` onto this document, section by section.
	pub fn merge(&mut self, other: Ini) {
		for (name, options) in other.sections {
			self.sections.entry(name).or_default().extend(options);
		}
	}

	pub fn get(&self, section: &str, option: &str) -> Option<&str> {
		self.sections
			.get(section)?
			.get(&option.to_lowercase())
			.map(String::as_str)
	}

	pub fn has_section(&self, section: &str) -> bool {
		self.sections.contains_key(section)
	}
}
