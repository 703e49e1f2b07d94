use std::fmt::{Display, Formatter};

use log::debug;
use serde::Deserialize;
use ureq::Agent;

use crate::palettes::palette::Color;

const USER_AGENT: &str = concat!("keyglow/", env!("CARGO_PKG_VERSION"));

/// Client for a thecolorapi.com-compatible scheme generation endpoint.
pub struct ColorApiClient {
	agent: Agent,
	url: String,
}

impl ColorApiClient {
	pub const URL: &'static str = "https://www.thecolorapi.com/scheme";

	pub fn new<S: Into<String>>(url: S) -> Self {
		let config = Agent::config_builder()
			.user_agent(USER_AGENT)
			.http_status_as_error(false)
			.build();

		Self {
			agent: Agent::new_with_config(config),
			url: url.into(),
		}
	}

	/// Requests a scheme of `count` colors grown from `seed` and returns
	/// the palette in response order.
	pub fn scheme(&self, seed: Color, count: usize, mode: &str) -> Result<Vec<Color>, ColorApiError> {
		debug!("requesting {count} {mode} colors for {seed} from {}", self.url);

		let mut response = self.agent
			.get(&self.url)
			.query("count", &count.to_string())
			.query("format", "json")
			.query("hex", &seed.hex_format(""))
			.query("mode", mode)
			.call()
			.map_err(|source| ColorApiError::Transport { url: self.url.clone(), source })?;

		let status = response.status();
		if !status.is_success() {
			return Err(ColorApiError::Status {
				url: self.url.clone(),
				status: status.as_u16(),
				reason: status.canonical_reason().unwrap_or("unknown status").to_owned(),
			});
		}

		let body = response.body_mut().read_to_string()
			.map_err(|source| ColorApiError::Transport { url: self.url.clone(), source })?;
		let scheme: SchemeResponse = serde_json::from_str(&body)
			.map_err(|e| ColorApiError::Response { url: self.url.clone(), msg: e.to_string() })?;

		Ok(scheme.colors.into_iter().map(|c| Color { r: c.rgb.r, g: c.rgb.g, b: c.rgb.b }).collect())
	}
}

#[derive(Debug, Clone, Deserialize)]
struct SchemeResponse {
	colors: Vec<SchemeColor>,
}

#[derive(Debug, Clone, Deserialize)]
struct SchemeColor {
	rgb: SchemeRgb,
}

#[derive(Debug, Clone, Deserialize)]
struct SchemeRgb {
	r: u8,
	g: u8,
	b: u8,
}

#[derive(Debug)]
pub enum ColorApiError {
	Status { url: String, status: u16, reason: String },
	Transport { url: String, source: ureq::Error },
	Response { url: String, msg: String },
}

impl ColorApiError {
	/// Whether retrying the same request later could plausibly succeed.
	/// Server-side statuses, transport failures and unusable bodies are
	/// transient; every other response status is not.
	pub fn is_transient(&self) -> bool {
		match self {
			ColorApiError::Status { status, .. } => (500..600).contains(status),
			ColorApiError::Transport { .. } => true,
			ColorApiError::Response { .. } => true,
		}
	}
}

impl Display for ColorApiError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ColorApiError::Status { url, status, reason } => write!(f, "HTTP error: GET {url}: {reason} ({status})"),
			ColorApiError::Transport { url, source } => write!(f, "HTTP error on GET {url}: {source}"),
			ColorApiError::Response { url, msg } => write!(f, "unusable response from GET {url}: {msg}"),
		}
	}
}

impl std::error::Error for ColorApiError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			ColorApiError::Transport { source, .. } => Some(source),
			_ => None,
		}
	}
}
