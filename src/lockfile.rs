use crate::{
	error::{Error, Result},
	reference::FlakeRef,
};
use anyhow::Context;
use std::{collections::BTreeMap, path::Path};

/// The file name of a flake lockfile.
pub const FILE_NAME: &str = "flake.lock";

/// The lockfile schema version this crate supports.
pub const VERSION: u64 = 7;

/// A parsed flake lockfile: a mapping from node label to node. The root node of the raw format carries metadata rather than a dependency and is excluded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lockfile {
	pub nodes: BTreeMap<String, Node>,
}

/// One dependency entry in a lockfile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	/// The exact reference the input resolved to.
	pub locked: FlakeRef,

	/// The reference the user asked for, possibly unpinned.
	pub original: FlakeRef,
}

#[derive(serde::Deserialize)]
struct RawLockfile {
	version: u64,
	root: String,
	nodes: BTreeMap<String, RawNode>,
}

#[derive(serde::Deserialize)]
struct RawNode {
	#[serde(default)]
	locked: Option<serde_json::Value>,
	#[serde(default)]
	original: Option<serde_json::Value>,
}

impl Lockfile {
	/// Parse a lockfile from its JSON text.
	pub fn parse(text: &str) -> Result<Lockfile> {
		// Validate the overall shape before inspecting individual nodes.
		let raw: RawLockfile =
			serde_json::from_str(text).map_err(|error| Error::Schema(error.to_string()))?;

		// Check the schema version.
		if raw.version != VERSION {
			return Err(Error::Version {
				expected: VERSION,
				found: raw.version,
			});
		}

		// Parse the nodes, skipping the root node.
		let mut nodes = BTreeMap::new();
		for (label, node) in raw.nodes {
			if label == raw.root {
				continue;
			}
			let locked = node.locked.ok_or_else(|| {
				Error::Schema(format!(r#"the node "{label}" is missing the "locked" field"#))
			})?;
			let original = node.original.ok_or_else(|| {
				Error::Schema(format!(
					r#"the node "{label}" is missing the "original" field"#
				))
			})?;
			let node = Node {
				locked: FlakeRef::from_value(&locked)?,
				original: FlakeRef::from_value(&original)?,
			};
			nodes.insert(label, node);
		}

		Ok(Lockfile { nodes })
	}

	/// Read and parse the lockfile at `path`.
	pub async fn read(path: &Path) -> anyhow::Result<Lockfile> {
		let text = tokio::fs::read_to_string(path)
			.await
			.with_context(|| format!(r#"Failed to read "{}"."#, path.display()))?;
		let lockfile = Lockfile::parse(&text)
			.with_context(|| format!(r#"Failed to parse "{}"."#, path.display()))?;
		Ok(lockfile)
	}
}
