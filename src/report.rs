use crate::{
	changes::{Changes, NodeUpdate},
	error::{Error, Result},
	lockfile::Node,
	reference::FlakeRef,
};
use itertools::Itertools;
use std::collections::BTreeMap;

/// A textual report of the changes between two lockfiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
	/// A single line suitable for a commit subject or a pull request title.
	pub title: String,

	/// A Markdown description of every change.
	pub body: String,
}

/// Generate a report mentioning every changed node. The changes must not be empty.
pub fn generate(changes: &Changes) -> Result<Report> {
	if changes.is_empty() {
		return Err(Error::EmptyChanges);
	}
	let title = generate_title(changes);
	let body = generate_body(changes)?;
	Ok(Report { title, body })
}

fn generate_title(changes: &Changes) -> String {
	let labels = changes
		.labels()
		.iter()
		.map(|label| format!("`{label}`"))
		.join(", ");
	let inputs = if changes.len() == 1 { "input" } else { "inputs" };
	format!("bump flake {inputs} {labels}")
}

fn generate_body(changes: &Changes) -> Result<String> {
	let mut body = String::new();
	body.push_str(&updated_section("Updated Inputs", &changes.updated)?);
	body.push_str(&simple_section("Added Inputs", &changes.added)?);
	body.push_str(&simple_section("Removed Inputs", &changes.removed)?);
	Ok(body)
}

fn updated_section(title: &str, nodes: &BTreeMap<String, NodeUpdate>) -> Result<String> {
	let mut items = Vec::new();
	for (label, update) in nodes {
		let old_uri = update.old.locked.uri()?;
		let new_uri = update.new.locked.uri()?;
		let mut description = String::new();
		description.push('\n');
		description.push_str(&format!("  `{old_uri}` →\n"));
		description.push_str(&format!("  `{new_uri}`"));
		if let Some(url) = compare_url(&update.old.locked, &update.new.locked) {
			description.push('\n');
			description.push_str(&format!("  __([view changes]({url}))__"));
		}
		items.push((label.as_str(), description));
	}
	Ok(section(title, &items))
}

fn simple_section(title: &str, nodes: &BTreeMap<String, Node>) -> Result<String> {
	let mut items = Vec::new();
	for (label, node) in nodes {
		let uri = node.locked.uri()?;
		items.push((label.as_str(), format!(" `{uri}`")));
	}
	Ok(section(title, &items))
}

fn section(title: &str, items: &[(&str, String)]) -> String {
	if items.is_empty() {
		return String::new();
	}
	let mut text = String::new();
	text.push_str(&format!("## {title}\n"));
	text.push('\n');
	for (label, description) in items {
		text.push_str(&format!("* __{label}:__{description}\n"));
	}
	text.push('\n');
	text
}

/// Derive a link to the hosted diff between two references. Defined only when both references point at the same GitHub repository and both carry a revision. The link is a best-effort enrichment, never required for a valid report.
#[must_use]
pub fn compare_url(old: &FlakeRef, new: &FlakeRef) -> Option<String> {
	let (FlakeRef::GitHub(old), FlakeRef::GitHub(new)) = (old, new) else {
		return None;
	};
	if old.owner != new.owner || old.repo != new.repo {
		return None;
	}
	let old_rev = old.rev.as_ref()?;
	let new_rev = new.rev.as_ref()?;
	Some(format!(
		"https://github.com/{}/{}/compare/{old_rev}...{new_rev}",
		old.owner, old.repo,
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reference::GitHubRef;
	use indoc::indoc;
	use pretty_assertions::assert_eq;

	fn github(owner: &str, repo: &str, rev: Option<&str>) -> FlakeRef {
		FlakeRef::GitHub(GitHubRef {
			owner: owner.to_owned(),
			repo: repo.to_owned(),
			r#ref: None,
			rev: rev.map(ToOwned::to_owned),
		})
	}

	fn node(owner: &str, repo: &str, rev: &str) -> Node {
		Node {
			locked: github(owner, repo, Some(rev)),
			original: github(owner, repo, None),
		}
	}

	#[test]
	fn test_generate_fails_on_empty_changes() {
		let error = generate(&Changes::default()).unwrap_err();
		assert!(matches!(error, Error::EmptyChanges));
	}

	#[test]
	fn test_title_is_singular_for_one_change() {
		let mut changes = Changes::default();
		changes
			.added
			.insert("nixpkgs".to_owned(), node("o", "r", "abc"));
		let report = generate(&changes).unwrap();
		assert_eq!(report.title, "bump flake input `nixpkgs`");
	}

	#[test]
	fn test_title_is_plural_and_ordered() {
		let mut changes = Changes::default();
		changes.updated.insert(
			"zulu".to_owned(),
			NodeUpdate {
				old: node("o", "r", "abc"),
				new: node("o", "r", "def"),
			},
		);
		changes
			.added
			.insert("alpha".to_owned(), node("x", "y", "111"));
		changes
			.removed
			.insert("mike".to_owned(), node("m", "n", "222"));
		let report = generate(&changes).unwrap();
		assert_eq!(report.title, "bump flake inputs `zulu`, `alpha`, `mike`");
	}

	#[test]
	fn test_body_sections_and_compare_link() {
		let mut changes = Changes::default();
		changes.updated.insert(
			"nixpkgs".to_owned(),
			NodeUpdate {
				old: node("o", "r", "abc"),
				new: node("o", "r", "def"),
			},
		);
		changes
			.added
			.insert("flake-utils".to_owned(), node("x", "y", "111"));

		let report = generate(&changes).unwrap();

		assert_eq!(
			report.title,
			"bump flake inputs `nixpkgs`, `flake-utils`"
		);
		let expected = indoc!(
			"
			## Updated Inputs

			* __nixpkgs:__
			  `github:o/r/abc` →
			  `github:o/r/def`
			  __([view changes](https://github.com/o/r/compare/abc...def))__

			## Added Inputs

			* __flake-utils:__ `github:x/y/111`

			"
		);
		assert_eq!(report.body, expected);
		assert!(!report.body.contains("## Removed Inputs"));
	}

	#[test]
	fn test_body_removed_section_uses_locked_reference() {
		let mut changes = Changes::default();
		changes
			.removed
			.insert("crane".to_owned(), node("ipetkov", "crane", "fff"));
		let report = generate(&changes).unwrap();
		let expected = indoc!(
			"
			## Removed Inputs

			* __crane:__ `github:ipetkov/crane/fff`

			"
		);
		assert_eq!(report.body, expected);
	}

	#[test]
	fn test_generate_propagates_unsupported_references() {
		let opaque = FlakeRef::Other(
			[(
				"type".to_owned(),
				serde_json::Value::String("tarball".to_owned()),
			)]
			.into_iter()
			.collect(),
		);
		let mut changes = Changes::default();
		changes.added.insert(
			"blob".to_owned(),
			Node {
				locked: opaque.clone(),
				original: opaque,
			},
		);
		let error = generate(&changes).unwrap_err();
		assert!(matches!(error, Error::UnsupportedReference { .. }));
	}

	#[test]
	fn test_parse_diff_and_report() {
		let old = indoc!(
			r#"
			{
				"nodes": {
					"nixpkgs": {
						"locked": { "type": "github", "owner": "o", "repo": "r", "rev": "abc" },
						"original": { "type": "github", "owner": "o", "repo": "r" }
					},
					"root": { "inputs": { "nixpkgs": "nixpkgs" } }
				},
				"root": "root",
				"version": 7
			}
			"#
		);
		let new = indoc!(
			r#"
			{
				"nodes": {
					"nixpkgs": {
						"locked": { "type": "github", "owner": "o", "repo": "r", "rev": "def" },
						"original": { "type": "github", "owner": "o", "repo": "r" }
					},
					"flake-utils": {
						"locked": { "type": "github", "owner": "x", "repo": "y", "rev": "111" },
						"original": { "type": "github", "owner": "x", "repo": "y" }
					},
					"root": { "inputs": { "flake-utils": "flake-utils", "nixpkgs": "nixpkgs" } }
				},
				"root": "root",
				"version": 7
			}
			"#
		);

		let old = crate::lockfile::Lockfile::parse(old).unwrap();
		let new = crate::lockfile::Lockfile::parse(new).unwrap();
		let changes = crate::changes::diff(&old, &new);

		assert_eq!(changes.updated.keys().collect::<Vec<_>>(), vec!["nixpkgs"]);
		assert_eq!(
			changes.added.keys().collect::<Vec<_>>(),
			vec!["flake-utils"]
		);
		assert!(changes.removed.is_empty());

		let report = generate(&changes).unwrap();
		assert_eq!(
			report.title,
			"bump flake inputs `nixpkgs`, `flake-utils`"
		);
		let updated_position = report.body.find("## Updated Inputs").unwrap();
		let added_position = report.body.find("## Added Inputs").unwrap();
		assert!(updated_position < added_position);
		assert!(!report.body.contains("## Removed Inputs"));
	}

	#[test]
	fn test_compare_url() {
		// Same repository with both revisions set.
		assert_eq!(
			compare_url(
				&github("o", "r", Some("abc")),
				&github("o", "r", Some("def")),
			),
			Some("https://github.com/o/r/compare/abc...def".to_owned())
		);

		// A missing revision on either side.
		assert_eq!(
			compare_url(&github("o", "r", None), &github("o", "r", Some("def"))),
			None
		);
		assert_eq!(
			compare_url(&github("o", "r", Some("abc")), &github("o", "r", None)),
			None
		);

		// Different repositories.
		assert_eq!(
			compare_url(
				&github("o", "r", Some("abc")),
				&github("o", "other", Some("def")),
			),
			None
		);

		// The opaque variant.
		let opaque = FlakeRef::Other(std::collections::BTreeMap::new());
		assert_eq!(compare_url(&opaque, &github("o", "r", Some("def"))), None);
	}
}
