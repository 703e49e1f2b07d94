use std::io;

use keyglow_rs::colorapi::ColorApiError;
use keyglow_rs::conf::ConfigError;

// BSD sysexits(3) codes
pub(crate) const EX_UNAVAILABLE: u8 = 69;
pub(crate) const EX_SOFTWARE: u8 = 70;
pub(crate) const EX_IOERR: u8 = 74;
pub(crate) const EX_TEMPFAIL: u8 = 75;
pub(crate) const EX_CONFIG: u8 = 78;

/// Translates a failed run into a process exit code. This is the only
/// place that classifies errors; everything below it just propagates.
pub(crate) fn exit_code_for(err: &anyhow::Error) -> u8 {
	if let Some(api_err) = err.downcast_ref::<ColorApiError>() {
		if api_err.is_transient() { EX_TEMPFAIL } else { EX_UNAVAILABLE }
	} else if let Some(conf_err) = err.downcast_ref::<ConfigError>() {
		match conf_err {
			ConfigError::Io { .. } => EX_IOERR,
			_ => EX_CONFIG,
		}
	} else if err.downcast_ref::<io::Error>().is_some() {
		EX_IOERR
	} else {
		EX_SOFTWARE
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::*;

	fn status_error(status: u16) -> anyhow::Error {
		anyhow::Error::from(ColorApiError::Status {
			url: "http://localhost/scheme".to_owned(),
			status,
			reason: "testing".to_owned(),
		})
	}

	#[test]
	fn server_errors_are_temporary() {
		assert_eq!(exit_code_for(&status_error(500)), EX_TEMPFAIL);
		assert_eq!(exit_code_for(&status_error(503)), EX_TEMPFAIL);
	}

	#[test]
	fn other_statuses_are_unavailable() {
		assert_eq!(exit_code_for(&status_error(404)), EX_UNAVAILABLE);
		assert_eq!(exit_code_for(&status_error(301)), EX_UNAVAILABLE);
	}

	#[test]
	fn unusable_responses_are_temporary() {
		let err = anyhow::Error::from(ColorApiError::Response {
			url: "http://localhost/scheme".to_owned(),
			msg: "expected value at line 1 column 1".to_owned(),
		});
		assert_eq!(exit_code_for(&err), EX_TEMPFAIL);
	}

	#[test]
	fn configuration_errors() {
		let err = anyhow::Error::from(ConfigError::Option {
			option: "minimum seed".to_owned(),
			section: "Palette".to_owned(),
			msg: "is not an integer".to_owned(),
		});
		assert_eq!(exit_code_for(&err), EX_CONFIG);
	}

	#[test]
	fn configuration_io_errors() {
		let err = anyhow::Error::from(ConfigError::Io {
			path: PathBuf::from("/nonexistent/config.ini"),
			source: io::Error::from(io::ErrorKind::NotFound),
		});
		assert_eq!(exit_code_for(&err), EX_IOERR);
	}

	#[test]
	fn io_errors_survive_context() {
		let err = anyhow::Error::from(io::Error::from(io::ErrorKind::PermissionDenied))
			.context("cannot open /dev/lp0");
		assert_eq!(exit_code_for(&err), EX_IOERR);
	}

	#[test]
	fn everything_else_is_a_software_fault() {
		assert_eq!(exit_code_for(&anyhow::anyhow!("carrier lost")), EX_SOFTWARE);
	}
}
