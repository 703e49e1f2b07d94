use keyglow_rs::conf::{Config, ConfigError};
use keyglow_rs::keygroups::{KeyColorGroups, Layer};
use keyglow_rs::palettes::palette::Color;

fn config_with(extra: &str) -> Config {
	let mut config = Config::new();
	config.load_str(extra).unwrap();
	config
}

fn palette(n: usize) -> Vec<Color> {
	(0..n).map(|i| Color::from([(i * 30 + 10) as u8, (i * 30 + 20) as u8, (i * 30 + 30) as u8])).collect()
}

#[test]
fn default_groups_paint_the_whole_board() {
	let groups = KeyColorGroups::from_config(&Config::new()).unwrap();
	assert_eq!(groups.group_count(), 5);

	let total_keys: usize = groups.groups().iter().map(|g| g.key_count()).sum();
	assert_eq!(total_keys, 70);

	let lines = groups.led_lines(&palette(5), Layer::Base).unwrap();
	assert_eq!(lines.len(), 70);

	// letters first, all sharing the first palette color
	assert_eq!(lines[0], "[q]>[10][20][30]");
	assert_eq!(lines[25], "[m]>[10][20][30]");
	// then the number row on the second color
	assert_eq!(lines[26], "[tilde]>[40][50][60]");
	// arrows come last, on the fifth color
	assert_eq!(lines[69], "[right]>[130][140][150]");
}

#[test]
fn fn_layer_uses_the_fn_templates() {
	let groups = KeyColorGroups::from_config(&Config::new()).unwrap();
	let lines = groups.led_lines(&palette(5), Layer::Fn).unwrap();

	assert_eq!(lines.len(), 70);
	assert_eq!(lines[0], "[fn q]>[10][20][30]");
	assert_eq!(lines[69], "[fn right]>[130][140][150]");
}

#[test]
fn multi_color_groups_cycle_their_colors() {
	let config = config_with(concat!(
		"[Keys]\n",
		"groups = pair\n",
		"[KeyGroup pair]\n",
		"keys = a b c\n",
		"colors = 2\n",
	));
	let groups = KeyColorGroups::from_config(&config).unwrap();
	assert_eq!(groups.group_count(), 2);

	let lines = groups.led_lines(&palette(2), Layer::Base).unwrap();
	assert_eq!(lines, vec![
		"[a]>[10][20][30]",
		"[b]>[40][50][60]",
		"[c]>[10][20][30]",
	]);
}

#[test]
fn palette_length_must_match_exactly() {
	let groups = KeyColorGroups::from_config(&Config::new()).unwrap();

	for n in [0, 4, 6] {
		let result = groups.led_lines(&palette(n), Layer::Base);
		assert!(
			matches!(result, Err(ConfigError::PaletteMismatch { expected: 5, received }) if received == n),
			"palette of {n} should mismatch, got {result:?}"
		);
	}
}

#[test]
fn listed_groups_need_a_section() {
	let config = config_with("[Keys]\ngroups = letters ghost\n");
	let result = KeyColorGroups::from_config(&config);
	assert!(
		matches!(result, Err(ConfigError::MissingSection { ref section }) if section == "KeyGroup ghost"),
		"got {result:?}"
	);
}

#[test]
fn groups_need_keys() {
	let config = config_with("[Keys]\ngroups = ghost\n[KeyGroup ghost]\n");
	let result = KeyColorGroups::from_config(&config);
	assert!(matches!(result, Err(ConfigError::Option { ref option, .. }) if option == "keys"), "got {result:?}");

	let config = config_with("[Keys]\ngroups = ghost\n[KeyGroup ghost]\nkeys =\n");
	assert!(KeyColorGroups::from_config(&config).is_err());
}

#[test]
fn color_counts_must_be_positive_integers() {
	for bad in ["0", "-1", "many", "1.5"] {
		let config = config_with(&format!("[KeyGroup letters]\ncolors = {bad}\n"));
		let result = KeyColorGroups::from_config(&config);
		assert!(
			matches!(result, Err(ConfigError::Option { ref option, .. }) if option == "colors"),
			"colors = {bad} should be rejected, got {result:?}"
		);
	}
}

#[test]
fn unknown_placeholders_are_rejected() {
	let config = config_with("[Keys]\nline = [{key}]>[{bogus}]\n");
	let result = KeyColorGroups::from_config(&config);
	match result {
		Err(ConfigError::Option { ref option, ref msg, .. }) => {
			assert_eq!(option, "line");
			assert!(msg.contains("{bogus}"), "got message {msg:?}");
		}
		other => panic!("expected a template error, got {other:?}"),
	}
}

#[test]
fn stray_braces_are_rejected() {
	let config = config_with("[Keys]\nfn line = {key\n");
	let result = KeyColorGroups::from_config(&config);
	assert!(matches!(result, Err(ConfigError::Option { ref option, .. }) if option == "fn line"), "got {result:?}");
}

#[test]
fn group_sections_can_override_templates() {
	let config = config_with("[KeyGroup arrows]\nline = {key}:{hex}\n");
	let groups = KeyColorGroups::from_config(&config).unwrap();

	let lines = groups.led_lines(&palette(5), Layer::Base).unwrap();
	// arrows use the fifth palette color, 0x82_8C_96
	assert_eq!(lines[66], "up:828c96");
	// the fn template still comes from the defaults
	let fn_lines = groups.led_lines(&palette(5), Layer::Fn).unwrap();
	assert_eq!(fn_lines[66], "[fn up]>[130][140][150]");
}

#[test]
fn non_ascii_keys_are_rejected() {
	let config = config_with("[KeyGroup arrows]\nkeys = up down é right\n");
	let result = KeyColorGroups::from_config(&config);
	assert!(matches!(result, Err(ConfigError::Option { ref option, .. }) if option == "keys"), "got {result:?}");
}
