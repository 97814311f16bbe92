//! SVG scene construction for the graph view.
//!
//! Translates the current simulation, selection, and collapse state into
//! plain shape descriptions the component maps onto SVG elements. Everything
//! here is pure data so it can be exercised without a DOM: one `LinkShape`
//! per visible link with its computed path string, one `NodeShape` per
//! visible node.

use std::collections::HashMap;

use super::geometry::{self, LinkGeometry, ParallelEdges, Point};
use super::state::GraphState;
use super::theme::Theme;
use super::types::GraphConfig;

/// A renderable link path.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkShape {
	/// Selection key for this link.
	pub key: String,
	/// SVG path description.
	pub d: String,
	/// Stroke color.
	pub stroke: String,
	/// Stroke width.
	pub width: f64,
	/// Whether the link is currently selected.
	pub selected: bool,
}

/// A renderable node circle.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeShape {
	/// Node id.
	pub id: String,
	/// Center position.
	pub x: f64,
	/// Center position.
	pub y: f64,
	/// Circle radius.
	pub radius: f64,
	/// Fill color.
	pub fill: String,
	/// Outline color.
	pub stroke: String,
	/// Outline width.
	pub stroke_width: f64,
	/// Optional label text.
	pub label: Option<String>,
	/// Whether the node is currently selected.
	pub selected: bool,
	/// Whether the node is a collapsed subtree root.
	pub collapsed: bool,
}

/// One frame's worth of renderable shapes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	/// SVG transform for the world-space group.
	pub transform: String,
	/// Visible links, in data order.
	pub links: Vec<LinkShape>,
	/// Visible nodes, in simulation order.
	pub nodes: Vec<NodeShape>,
}

/// Builds the scene for the current state.
///
/// Links whose endpoints are hidden by a collapsed subtree are dropped along
/// with the hidden nodes. Parallel bundles are indexed per unordered
/// endpoint pair so each member gets its own deviation.
pub fn build_scene(state: &GraphState, config: &GraphConfig, theme: &Theme) -> Scene {
	let hidden = state.hidden_nodes();
	let nodes = state.node_snapshots();

	let mut positions: HashMap<&str, Point> = HashMap::with_capacity(nodes.len());
	for (point, info) in &nodes {
		positions.insert(info.id.as_str(), *point);
	}

	let groups = geometry::parallel_groups(&state.data.links);
	let mut links = Vec::with_capacity(state.data.links.len());
	for (link, group) in state.data.links.iter().zip(&groups) {
		if hidden.contains(&link.source) || hidden.contains(&link.target) {
			continue;
		}
		let (Some(&source), Some(&target)) = (
			positions.get(link.source.as_str()),
			positions.get(link.target.as_str()),
		) else {
			// link references a node the data never declared
			continue;
		};

		let d = geometry::link_path(&LinkGeometry {
			source_id: &link.source,
			target_id: &link.target,
			source,
			target,
			curve: link.curve.unwrap_or(config.link_curve),
			break_points: &link.break_points,
			parallel: Some(ParallelEdges {
				index: group.index,
				count: group.count,
				spread: config.parallel_spread,
			}),
			self_direction: link.self_direction.unwrap_or(config.self_link_direction),
		});

		let key = link.key(group.index);
		let selected = state.selection.link_is_selected(&key);
		let (stroke, width) = if selected {
			(theme.link.selected_stroke.to_css(), theme.link.selected_width)
		} else {
			(theme.link.stroke.to_css(), theme.link.width)
		};
		links.push(LinkShape {
			key,
			d,
			stroke,
			width,
			selected,
		});
	}

	let nodes = nodes
		.into_iter()
		.filter(|(_, info)| !hidden.contains(&info.id))
		.map(|(point, info)| {
			let selected = state.selection.node_is_selected(&info.id);
			let (stroke, stroke_width) = if selected {
				(
					theme.node.selected_stroke.to_css(),
					theme.node.selected_stroke_width,
				)
			} else {
				(theme.node.stroke.to_css(), theme.node.stroke_width)
			};
			NodeShape {
				selected,
				stroke,
				stroke_width,
				collapsed: state.is_collapsed(&info.id),
				x: point.x,
				y: point.y,
				radius: config.node_radius * info.size,
				fill: info.color,
				label: info.label,
				id: info.id,
			}
		})
		.collect();

	Scene {
		transform: format!(
			"translate({},{}) scale({})",
			state.transform.x, state.transform.y, state.transform.k
		),
		links,
		nodes,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph::geometry::CurveType;
	use crate::components::graph::types::{GraphData, GraphLink, GraphNode};

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

	fn pin_nodes(state: &mut GraphState) {
		// park every node on a simple grid so path strings are predictable
		let mut i = 0.0;
		state.graph.visit_nodes_mut(|node| {
			node.data.x = i * 100.0;
			node.data.y = 0.0;
			i += 1.0;
		});
	}

	fn scene_for(data: &GraphData) -> (GraphState, Scene) {
		let mut state = GraphState::new(data, 800.0, 600.0, &Theme::default());
		pin_nodes(&mut state);
		let scene = build_scene(&state, &GraphConfig::default(), &Theme::default());
		(state, scene)
	}

	#[test]
	fn single_links_render_straight_between_node_positions() {
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			links: vec![link("a", "b")],
		};
		let (_, scene) = scene_for(&data);
		assert_eq!(scene.links.len(), 1);
		assert_eq!(scene.links[0].d, "M0,0L100,0");
		assert_eq!(scene.links[0].key, "a->b");
	}

	#[test]
	fn parallel_links_get_distinct_keys_and_paths() {
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			links: vec![link("a", "b"), link("a", "b")],
		};
		let (_, scene) = scene_for(&data);
		assert_eq!(scene.links[0].key, "a->b");
		assert_eq!(scene.links[1].key, "a->b#1");
		assert_ne!(scene.links[0].d, scene.links[1].d);
	}

	#[test]
	fn per_link_curve_overrides_reach_the_engine() {
		let mut curved = link("a", "b");
		curved.curve = Some(CurveType::SmoothCurve);
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			links: vec![curved],
		};
		let (_, scene) = scene_for(&data);
		assert_eq!(scene.links[0].d, "M0,0A100,100 0 0,1 100,0");
	}

	#[test]
	fn collapsed_subtrees_drop_nodes_and_their_links() {
		let data = GraphData {
			nodes: vec![node("a"), node("b"), node("c")],
			links: vec![link("a", "b"), link("b", "c")],
		};
		let mut state = GraphState::new(&data, 800.0, 600.0, &Theme::default());
		pin_nodes(&mut state);
		state.toggle_collapse("a");

		let scene = build_scene(&state, &GraphConfig::default(), &Theme::default());
		let ids: Vec<&str> = scene.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["a"]);
		assert!(scene.links.is_empty());
		assert!(scene.nodes[0].collapsed);
	}

	#[test]
	fn selection_flags_flow_into_shapes() {
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			links: vec![link("a", "b")],
		};
		let mut state = GraphState::new(&data, 800.0, 600.0, &Theme::default());
		pin_nodes(&mut state);
		state.selection.add_node("a");
		state.selection.add_link("a->b");

		let theme = Theme::default();
		let scene = build_scene(&state, &GraphConfig::default(), &theme);
		let a = scene.nodes.iter().find(|n| n.id == "a").unwrap();
		let b = scene.nodes.iter().find(|n| n.id == "b").unwrap();
		assert!(a.selected && !b.selected);
		assert_eq!(a.stroke_width, theme.node.selected_stroke_width);
		assert_eq!(b.stroke_width, theme.node.stroke_width);
		assert!(scene.links[0].selected);
		assert_eq!(scene.links[0].width, theme.link.selected_width);
	}

	#[test]
	fn dangling_links_are_skipped() {
		let data = GraphData {
			nodes: vec![node("a")],
			links: vec![link("a", "ghost")],
		};
		let (_, scene) = scene_for(&data);
		assert!(scene.links.is_empty());
		assert_eq!(scene.nodes.len(), 1);
	}

	#[test]
	fn transform_tracks_the_view() {
		let data = GraphData {
			nodes: vec![node("a")],
			links: Vec::new(),
		};
		let (mut state, _) = scene_for(&data);
		state.transform.x = 10.0;
		state.transform.y = 20.0;
		state.transform.k = 2.0;
		let scene = build_scene(&state, &GraphConfig::default(), &Theme::default());
		assert_eq!(scene.transform, "translate(10,20) scale(2)");
	}
}
