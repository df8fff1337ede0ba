use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// A flake reference, identifying the source of one flake input. References of the recognized kind are parsed into the typed variant. Every other kind is preserved verbatim as an opaque map, so an unrecognized reference round-trips without interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlakeRef {
	GitHub(GitHubRef),
	Other(BTreeMap<String, serde_json::Value>),
}

/// A reference to a GitHub repository, pinned to a revision or a symbolic ref or both.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct GitHubRef {
	pub owner: String,
	pub repo: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub r#ref: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rev: Option<String>,
}

impl FlakeRef {
	/// Parse a flake reference from its raw JSON representation. An object whose `type` is `"github"` and whose fields satisfy [`GitHubRef`] becomes the typed variant. Any other object is preserved as [`FlakeRef::Other`].
	pub fn from_value(value: &serde_json::Value) -> Result<FlakeRef> {
		let serde_json::Value::Object(object) = value else {
			return Err(Error::Schema(
				"expected a flake reference to be an object".to_owned(),
			));
		};
		if object.get("type").and_then(serde_json::Value::as_str) == Some("github") {
			if let Ok(github) = serde_json::from_value::<GitHubRef>(value.clone()) {
				return Ok(FlakeRef::GitHub(github));
			}
		}
		let fields = object
			.iter()
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect();
		Ok(FlakeRef::Other(fields))
	}

	/// The value of the reference's `type` tag.
	#[must_use]
	pub fn kind(&self) -> &str {
		match self {
			FlakeRef::GitHub(_) => "github",
			FlakeRef::Other(fields) => fields
				.get("type")
				.and_then(serde_json::Value::as_str)
				.unwrap_or("unknown"),
		}
	}

	/// Render the reference as a short URI, like `github:owner/repo/rev`. The revision takes precedence over the symbolic ref when both are set. Only the recognized kind has a URI rendering.
	pub fn uri(&self) -> Result<String> {
		match self {
			FlakeRef::GitHub(github) => {
				let mut uri = format!("github:{}/{}", github.owner, github.repo);
				if let Some(rev) = github.rev.as_ref().or(github.r#ref.as_ref()) {
					uri.push('/');
					uri.push_str(rev);
				}
				Ok(uri)
			},
			FlakeRef::Other(_) => Err(Error::UnsupportedReference {
				kind: self.kind().to_owned(),
			}),
		}
	}
}
