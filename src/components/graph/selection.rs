//! Selection state for nodes and links.
//!
//! Two insertion-ordered id sets with set semantics: duplicate inserts and
//! absent removals are no-ops, and no operation errors. Snapshots taken with
//! [`Selection::freeze`] drive the "selection changed" callback; their
//! equality is positional, so callers that care about change detection must
//! rely on consistent iteration order (which the ordered sets provide).

use indexmap::IndexSet;

/// Mutable selection state owned by a single graph instance.
#[derive(Clone, Debug, Default)]
pub struct Selection {
	nodes: IndexSet<String>,
	links: IndexSet<String>,
}

/// Immutable value snapshot of a [`Selection`].
///
/// Sequences are in insertion order. Equality (via `PartialEq`) compares the
/// sequences element-wise, not as sets: removing and re-adding an id moves it
/// to the back and changes perceived equality even though membership is
/// unchanged. Change-detection callers depend on exactly this behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
	/// Selected node ids, in insertion order.
	pub nodes: Vec<String>,
	/// Selected link ids, in insertion order.
	pub links: Vec<String>,
}

impl Selection {
	/// Creates an empty selection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether the node id is currently selected.
	pub fn node_is_selected(&self, id: &str) -> bool {
		self.nodes.contains(id)
	}

	/// Whether the link id is currently selected.
	pub fn link_is_selected(&self, id: &str) -> bool {
		self.links.contains(id)
	}

	/// Selects a node. Selecting an already-selected node is a no-op.
	pub fn add_node(&mut self, id: impl Into<String>) {
		self.nodes.insert(id.into());
	}

	/// Selects every node id in the iterator.
	pub fn add_nodes<I>(&mut self, ids: I)
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		for id in ids {
			self.add_node(id);
		}
	}

	/// Selects a link. Selecting an already-selected link is a no-op.
	pub fn add_link(&mut self, id: impl Into<String>) {
		self.links.insert(id.into());
	}

	/// Selects every link id in the iterator.
	pub fn add_links<I>(&mut self, ids: I)
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		for id in ids {
			self.add_link(id);
		}
	}

	/// Deselects a node. Removing an absent id is a no-op.
	pub fn remove_node(&mut self, id: &str) {
		// shift_remove keeps the remaining insertion order intact
		self.nodes.shift_remove(id);
	}

	/// Deselects a link. Removing an absent id is a no-op.
	pub fn remove_link(&mut self, id: &str) {
		self.links.shift_remove(id);
	}

	/// Flips a node's membership.
	pub fn toggle_node(&mut self, id: &str) {
		if self.node_is_selected(id) {
			self.remove_node(id);
		} else {
			self.add_node(id);
		}
	}

	/// Flips a link's membership.
	pub fn toggle_link(&mut self, id: &str) {
		if self.link_is_selected(id) {
			self.remove_link(id);
		} else {
			self.add_link(id);
		}
	}

	/// Empties both sets.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.links.clear();
	}

	/// Replaces this selection with a copy of `other`.
	///
	/// The copy is independent: later mutation of either selection does not
	/// affect the other.
	pub fn update(&mut self, other: &Selection) {
		self.nodes = other.nodes.clone();
		self.links = other.links.clone();
	}

	/// Whether nothing is selected.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}

	/// Takes a value snapshot, independent of subsequent mutation.
	pub fn freeze(&self) -> SelectionSnapshot {
		SelectionSnapshot {
			nodes: self.nodes.iter().cloned().collect(),
			links: self.links.iter().cloned().collect(),
		}
	}
}

impl From<&SelectionSnapshot> for Selection {
	fn from(snapshot: &SelectionSnapshot) -> Self {
		let mut selection = Selection::new();
		selection.add_nodes(snapshot.nodes.iter().cloned());
		selection.add_links(snapshot.links.iter().cloned());
		selection
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_and_remove_round_trip() {
		let mut s = Selection::new();
		assert!(!s.node_is_selected("a"));

		s.add_node("a");
		assert!(s.node_is_selected("a"));

		s.remove_node("a");
		assert!(!s.node_is_selected("a"));
	}

	#[test]
	fn duplicate_adds_are_idempotent() {
		let mut s = Selection::new();
		s.add_node("a");
		s.add_node("a");
		assert_eq!(s.freeze().nodes, vec!["a"]);

		s.remove_node("a");
		assert!(!s.node_is_selected("a"));
	}

	#[test]
	fn removing_an_absent_id_is_a_no_op() {
		let mut s = Selection::new();
		s.add_link("l1");
		s.remove_link("missing");
		s.remove_node("missing");
		assert!(s.link_is_selected("l1"));
	}

	#[test]
	fn toggle_twice_is_an_involution() {
		let mut s = Selection::new();
		s.toggle_node("a");
		assert!(s.node_is_selected("a"));
		s.toggle_node("a");
		assert!(!s.node_is_selected("a"));

		s.add_link("l1");
		s.toggle_link("l1");
		s.toggle_link("l1");
		assert!(s.link_is_selected("l1"));
	}

	#[test]
	fn clear_empties_both_sets() {
		let mut s = Selection::new();
		s.add_nodes(["a", "b"]);
		s.add_links(["l1"]);
		s.clear();
		assert!(s.is_empty());
	}

	#[test]
	fn frozen_snapshots_are_independent_of_later_mutation() {
		let mut s = Selection::new();
		s.add_node("a");
		let snapshot = s.freeze();

		s.add_node("b");
		assert_eq!(snapshot.nodes, vec!["a"]);
		assert_ne!(s.freeze(), snapshot);
	}

	#[test]
	fn update_copies_without_aliasing() {
		let mut source = Selection::new();
		source.add_nodes(["a", "b"]);
		source.add_link("l1");

		let mut s = Selection::new();
		s.add_node("stale");
		s.update(&source);
		assert_eq!(s.freeze(), source.freeze());

		// mutating either side must not leak into the other
		source.add_node("c");
		assert!(!s.node_is_selected("c"));
		s.remove_node("a");
		assert!(source.node_is_selected("a"));
	}

	#[test]
	fn snapshot_equality_is_positional() {
		let mut s = Selection::new();
		s.add_nodes(["a", "b"]);
		let original = s.freeze();
		assert_eq!(s.freeze(), original);

		// remove then re-add: membership is unchanged, position is not
		s.remove_node("a");
		s.add_node("a");
		assert!(s.node_is_selected("a"));
		assert_eq!(s.freeze().nodes, vec!["b", "a"]);
		assert_ne!(s.freeze(), original);
	}

	#[test]
	fn removal_preserves_remaining_order() {
		let mut s = Selection::new();
		s.add_nodes(["a", "b", "c", "d"]);
		s.remove_node("b");
		assert_eq!(s.freeze().nodes, vec!["a", "c", "d"]);
	}

	#[test]
	fn snapshot_round_trips_through_from() {
		let mut s = Selection::new();
		s.add_nodes(["a", "b"]);
		s.add_links(["l1", "l2"]);
		let snapshot = s.freeze();

		let rebuilt = Selection::from(&snapshot);
		assert_eq!(rebuilt.freeze(), snapshot);
	}
}
