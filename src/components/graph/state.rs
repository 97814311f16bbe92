//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node metadata, the
//! view transform for pan/zoom, in-progress drag/pan gestures, the selection
//! store, and the set of collapsed subtree roots.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::collapse;
use super::geometry::Point;
use super::selection::{Selection, SelectionSnapshot};
use super::theme::Theme;
use super::types::GraphData;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Node id from the input data.
	pub id: String,
	/// Optional display label.
	pub label: Option<String>,
	/// Resolved CSS fill color.
	pub color: String,
	/// Size multiplier (1.0 = normal, >1.0 = larger/more important)
	pub size: f64,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Horizontal pan offset.
	pub x: f64,
	/// Vertical pan offset.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Whether a drag is active.
	pub active: bool,
	/// Simulation index of the dragged node.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Id of the dragged node, for selection on click-without-movement.
	pub node_id: Option<String>,
	/// Screen position where the drag started.
	pub start_x: f64,
	/// Screen position where the drag started.
	pub start_y: f64,
	/// Node position when the drag started.
	pub node_start_x: f32,
	/// Node position when the drag started.
	pub node_start_y: f32,
}

/// Tracks an in-progress background pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether a pan is active.
	pub active: bool,
	/// Screen position where the pan started.
	pub start_x: f64,
	/// Screen position where the pan started.
	pub start_y: f64,
	/// Transform offset when the pan started.
	pub transform_start_x: f64,
	/// Transform offset when the pan started.
	pub transform_start_y: f64,
}

/// Core graph state combining the physics simulation with interaction,
/// selection, and collapse tracking.
///
/// Created once when the component mounts, then mutated by event handlers
/// and the animation loop. `tick` advances the physics simulation; the
/// render pass reads positions back out each frame.
pub struct GraphState {
	/// Physics simulation carrying node metadata.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Input data, kept for link configuration and collapse queries.
	pub data: GraphData,
	/// Current pan/zoom transform.
	pub transform: ViewTransform,
	/// In-progress node drag.
	pub drag: DragState,
	/// In-progress background pan.
	pub pan: PanState,
	/// Current node/link selection.
	pub selection: Selection,
	/// Viewport width.
	pub width: f64,
	/// Viewport height.
	pub height: f64,
	/// Whether the simulation advances each frame.
	pub animation_running: bool,
	collapsed: HashSet<String>,
	last_emitted: SelectionSnapshot,
}

impl GraphState {
	/// Builds the simulation from graph data, seeding nodes on a circle
	/// around the viewport center.
	pub fn new(data: &GraphData, width: f64, height: f64, theme: &Theme) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();

		// Count edges per node for importance calculation
		let mut edge_counts: HashMap<&String, usize> = HashMap::new();
		for link in &data.links {
			*edge_counts.entry(&link.source).or_insert(0) += 1;
			*edge_counts.entry(&link.target).or_insert(0) += 1;
		}
		let max_edges = edge_counts.values().copied().max().unwrap_or(1).max(1);

		// Groups claim palette slots in first-seen order
		let mut group_slots: HashMap<&String, usize> = HashMap::new();

		for (i, node) in data.nodes.iter().enumerate() {
			// Color precedence: explicit > group slot > palette by index
			let color = node.color.clone().unwrap_or_else(|| {
				let slot = node
					.group
					.as_ref()
					.map(|g| {
						let next = group_slots.len();
						*group_slots.entry(g).or_insert(next)
					})
					.unwrap_or(i);
				theme.palette.get(slot).to_css_rgb()
			});
			let angle = (i as f64) * 2.0 * PI / data.nodes.len().max(1) as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			// Labeled and well-connected nodes render larger
			let has_label = node.label.is_some();
			let node_edges = edge_counts.get(&node.id).copied().unwrap_or(0);
			let edge_factor = (node_edges as f64 / max_edges as f64).sqrt();

			let size = if has_label {
				1.4 + 0.6 * edge_factor
			} else {
				0.7 + 0.5 * edge_factor
			};

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color,
					size,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}

		Self {
			graph,
			data: data.clone(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			selection: Selection::new(),
			width,
			height,
			animation_running: true,
			collapsed: HashSet::new(),
			last_emitted: SelectionSnapshot::default(),
		}
	}

	/// Seeds the selection from an externally supplied snapshot without
	/// firing a change notification for it.
	pub fn seed_selection(&mut self, snapshot: &SelectionSnapshot) {
		self.selection.update(&Selection::from(snapshot));
		self.last_emitted = self.selection.freeze();
	}

	/// Converts screen coordinates to graph (layout) coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Finds the node under a screen position, if any.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		hit_radius: f64,
	) -> Option<(DefaultNodeIdx, String)> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let node_hit_radius = hit_radius * node.data.user_data.size;
			if (dx * dx + dy * dy).sqrt() < node_hit_radius {
				found = Some((node.index(), node.data.user_data.id.clone()));
			}
		});
		found
	}

	/// Snapshot of every node's position and display metadata, in
	/// simulation order.
	pub fn node_snapshots(&self) -> Vec<(Point, NodeInfo)> {
		let mut nodes = Vec::with_capacity(self.data.nodes.len());
		self.graph.visit_nodes(|node| {
			nodes.push((
				Point::new(node.x() as f64, node.y() as f64),
				node.data.user_data.clone(),
			));
		});
		nodes
	}

	/// Advances the physics simulation.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	/// Updates the viewport bounds.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Collapses or expands the subtree rooted at `id`.
	///
	/// Nodes without out-edges are ignored; returns whether anything changed.
	pub fn toggle_collapse(&mut self, id: &str) -> bool {
		if !self.collapsed.contains(id) && !collapse::has_out_edges(&self.data.links, id) {
			return false;
		}
		if !self.collapsed.remove(id) {
			self.collapsed.insert(id.to_string());
		}
		true
	}

	/// Whether the node is a collapsed subtree root.
	pub fn is_collapsed(&self, id: &str) -> bool {
		self.collapsed.contains(id)
	}

	/// Nodes hidden by the current collapsed roots.
	pub fn hidden_nodes(&self) -> HashSet<String> {
		collapse::hidden_nodes(&self.data.links, &self.collapsed)
	}

	/// Returns a fresh selection snapshot if it differs from the last one
	/// this method handed out, and records it as emitted.
	///
	/// The comparison is the snapshot's positional equality, so callers see
	/// a change notification exactly when the frozen sequences differ.
	pub fn take_selection_change(&mut self) -> Option<SelectionSnapshot> {
		let snapshot = self.selection.freeze();
		if snapshot == self.last_emitted {
			return None;
		}
		self.last_emitted = snapshot.clone();
		Some(snapshot)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph::types::{GraphLink, GraphNode};

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.to_string(),
			label: None,
			color: None,
			group: None,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.to_string(),
			target: target.to_string(),
			curve: None,
			break_points: Vec::new(),
			self_direction: None,
		}
	}

	fn sample_state() -> GraphState {
		let data = GraphData {
			nodes: vec![node("a"), node("b"), node("c")],
			links: vec![link("a", "b"), link("b", "c")],
		};
		GraphState::new(&data, 800.0, 600.0, &Theme::default())
	}

	#[test]
	fn selection_change_fires_once_per_observable_change() {
		let mut state = sample_state();
		assert_eq!(state.take_selection_change(), None);

		state.selection.toggle_node("a");
		let snapshot = state.take_selection_change().expect("changed");
		assert_eq!(snapshot.nodes, vec!["a"]);
		assert_eq!(state.take_selection_change(), None);

		// toggle off and back on: single id, so positions also match
		state.selection.toggle_node("a");
		state.selection.toggle_node("a");
		assert_eq!(state.take_selection_change(), None);
	}

	#[test]
	fn reordering_without_membership_change_still_fires() {
		let mut state = sample_state();
		state.selection.add_nodes(["a", "b"]);
		state.take_selection_change().expect("initial emit");

		state.selection.remove_node("a");
		state.selection.add_node("a");
		// same membership, different sequence: positional equality reports a change
		let snapshot = state.take_selection_change().expect("reordered");
		assert_eq!(snapshot.nodes, vec!["b", "a"]);
	}

	#[test]
	fn seeded_selection_does_not_fire() {
		let mut state = sample_state();
		let seed = SelectionSnapshot {
			nodes: vec!["a".to_string()],
			links: Vec::new(),
		};
		state.seed_selection(&seed);
		assert!(state.selection.node_is_selected("a"));
		assert_eq!(state.take_selection_change(), None);

		state.selection.clear();
		assert!(state.take_selection_change().is_some());
	}

	#[test]
	fn collapse_toggle_hides_and_restores_descendants() {
		let mut state = sample_state();
		assert!(state.toggle_collapse("a"));
		assert!(state.is_collapsed("a"));
		let hidden = state.hidden_nodes();
		assert!(hidden.contains("b") && hidden.contains("c"));

		assert!(state.toggle_collapse("a"));
		assert!(state.hidden_nodes().is_empty());
	}

	#[test]
	fn collapsing_a_leaf_is_a_no_op() {
		let mut state = sample_state();
		assert!(!state.toggle_collapse("c"));
		assert!(!state.is_collapsed("c"));
	}

	#[test]
	fn hit_test_honors_the_view_transform() {
		let mut state = sample_state();
		// place node "a" at a known graph position
		state.graph.visit_nodes_mut(|node| {
			if node.data.user_data.id == "a" {
				node.data.x = 0.0;
				node.data.y = 0.0;
			} else {
				node.data.x = 500.0;
				node.data.y = 500.0;
			}
		});
		state.transform = ViewTransform {
			x: 100.0,
			y: 50.0,
			k: 2.0,
		};

		// graph (0,0) maps to screen (100,50)
		let hit = state.node_at_position(100.0, 50.0, 12.0);
		assert_eq!(hit.map(|(_, id)| id), Some("a".to_string()));
		assert!(state.node_at_position(400.0, 400.0, 12.0).is_none());
	}

	#[test]
	fn explicit_colors_win_over_palette() {
		let mut colored = node("a");
		colored.color = Some("#ff0000".to_string());
		let data = GraphData {
			nodes: vec![colored, node("b")],
			links: Vec::new(),
		};
		let state = GraphState::new(&data, 800.0, 600.0, &Theme::default());
		let nodes = state.node_snapshots();
		let a = nodes.iter().find(|(_, info)| info.id == "a").unwrap();
		assert_eq!(a.1.color, "#ff0000");
	}

	#[test]
	fn grouped_nodes_share_a_palette_slot() {
		let mut x = node("x");
		let mut y = node("y");
		x.group = Some("cluster".to_string());
		y.group = Some("cluster".to_string());
		let data = GraphData {
			nodes: vec![x, y],
			links: Vec::new(),
		};
		let state = GraphState::new(&data, 800.0, 600.0, &Theme::default());
		let nodes = state.node_snapshots();
		assert_eq!(nodes[0].1.color, nodes[1].1.color);
	}
}
