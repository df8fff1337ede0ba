use crate::lockfile::{Lockfile, Node};
use std::collections::BTreeMap;

/// The set of updated, added, and removed nodes between two lockfiles. A label appears in at most one of the three mappings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
	pub updated: BTreeMap<String, NodeUpdate>,
	pub added: BTreeMap<String, Node>,
	pub removed: BTreeMap<String, Node>,
}

/// The old and new versions of an updated node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeUpdate {
	pub old: Node,
	pub new: Node,
}

impl Changes {
	/// The total number of changed nodes.
	#[must_use]
	pub fn len(&self) -> usize {
		self.updated.len() + self.added.len() + self.removed.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// All changed node labels: updated first, then added, then removed, each group sorted.
	#[must_use]
	pub fn labels(&self) -> Vec<&str> {
		std::iter::empty()
			.chain(self.updated.keys())
			.chain(self.added.keys())
			.chain(self.removed.keys())
			.map(String::as_str)
			.collect()
	}
}

/// Compare two lockfiles and return the set of changes.
///
/// Nodes are matched by label, never by structure: the same label in both lockfiles denotes the same logical dependency. A node present in both counts as updated only when its locked reference differs. A difference confined to the original reference is not a change.
#[must_use]
pub fn diff(old: &Lockfile, new: &Lockfile) -> Changes {
	let mut changes = Changes::default();

	// Check for updated and removed nodes.
	for (label, old_node) in &old.nodes {
		match new.nodes.get(label) {
			None => {
				changes.removed.insert(label.clone(), old_node.clone());
			},
			Some(new_node) if new_node.locked != old_node.locked => {
				let update = NodeUpdate {
					old: old_node.clone(),
					new: new_node.clone(),
				};
				changes.updated.insert(label.clone(), update);
			},
			Some(_) => (),
		}
	}

	// Check for added nodes.
	for (label, new_node) in &new.nodes {
		if !old.nodes.contains_key(label) {
			changes.added.insert(label.clone(), new_node.clone());
		}
	}

	changes
}
