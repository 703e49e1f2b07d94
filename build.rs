use std::env;
use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
	let output = Command::new("git").args(args).output().ok()?;
	if !output.status.success() {
		return None;
	}

	let stdout = String::from_utf8(output.stdout).ok()?;
	let trimmed = stdout.trim();
	if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

fn main() {
	let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_owned());
	let branch = git(&["rev-parse", "--abbrev-ref", "HEAD"]).unwrap_or_else(|| "unknown".to_owned());
	let version = git(&["describe", "--tags", "--always"])
		.or_else(|| env::var("CARGO_PKG_VERSION").ok())
		.unwrap_or_else(|| "unknown".to_owned());
	let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();

	println!("cargo:rustc-env=GIT_HASH={hash}");
	println!("cargo:rustc-env=GIT_BRANCH={branch}");
	println!("cargo:rustc-env=GIT_VERSION={version}");
	println!("cargo:rustc-env=BUILD_DATE={build_date}");
	println!("cargo:rerun-if-changed=build.rs");
}
