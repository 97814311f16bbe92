//! Graph data structures for input to the graph view component.

use serde::Deserialize;

use super::geometry::{CurveType, Point, SelfLinkDirection};

/// A node in the graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Optional display label. Labeled nodes are rendered larger.
	pub label: Option<String>,
	/// Optional CSS color override (e.g., "#ff0000" or "rgb(255, 0, 0)").
	/// If not set, color is derived from the theme palette based on `group`.
	pub color: Option<String>,
	/// Optional group name for shared coloring.
	pub group: Option<String>,
}

/// A directed edge between two nodes.
///
/// Curve and direction tags are plain strings in the JSON payload; unknown
/// tags deserialize to the defaults rather than failing the whole document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Per-link curve override. Falls back to [`GraphConfig::link_curve`].
	#[serde(default)]
	pub curve: Option<CurveType>,
	/// Intermediate points the path is routed through.
	#[serde(default)]
	pub break_points: Vec<Point>,
	/// Quadrant override for self-loops.
	#[serde(default)]
	pub self_direction: Option<SelfLinkDirection>,
}

impl GraphLink {
	/// Stable id for this link, unique within its parallel bundle.
	///
	/// The first link of a pair keeps the plain `source->target` form so
	/// single links have predictable ids.
	pub fn key(&self, occurrence: usize) -> String {
		if occurrence == 0 {
			format!("{}->{}", self.source, self.target)
		} else {
			format!("{}->{}#{}", self.source, self.target, occurrence)
		}
	}
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// All nodes.
	pub nodes: Vec<GraphNode>,
	/// All links between them.
	pub links: Vec<GraphLink>,
}

/// Behavioral configuration for the graph view.
#[derive(Clone, Debug)]
pub struct GraphConfig {
	/// Curve used for links without an explicit override.
	pub link_curve: CurveType,
	/// Maximum parallel-edge deviation as a fraction of the chord length.
	pub parallel_spread: f64,
	/// Quadrant for self-loops without an explicit override.
	pub self_link_direction: SelfLinkDirection,
	/// Whether double-clicking a node collapses its subtree.
	pub collapsible: bool,
	/// Whether links are drawn with arrowheads.
	pub directed: bool,
	/// Base node radius in layout units, scaled by per-node size.
	pub node_radius: f64,
	/// Hit-test radius for clicking and dragging nodes.
	pub hit_radius: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			link_curve: CurveType::Straight,
			parallel_spread: 0.15,
			self_link_direction: SelfLinkDirection::TopRight,
			collapsible: true,
			directed: true,
			node_radius: 6.0,
			hit_radius: 12.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn link_tags_deserialize_with_defaults() {
		let json = r#"{
			"nodes": [{ "id": "a" }, { "id": "b" }],
			"links": [
				{ "source": "a", "target": "b" },
				{ "source": "b", "target": "a", "curve": "smoothCurve" },
				{ "source": "a", "target": "a", "curve": "no-such-curve", "selfDirection": "bottomLeft" }
			]
		}"#;
		let data: GraphData = serde_json::from_str(json).expect("valid payload");

		assert_eq!(data.links[0].curve, None);
		assert_eq!(data.links[1].curve, Some(CurveType::SmoothCurve));
		// unknown tag lands on the default instead of failing
		assert_eq!(data.links[2].curve, Some(CurveType::Straight));
		assert_eq!(
			data.links[2].self_direction,
			Some(SelfLinkDirection::BottomLeft)
		);
	}

	#[test]
	fn break_points_deserialize_as_points() {
		let json = r#"{ "source": "a", "target": "b", "breakPoints": [{ "x": 1.5, "y": -2 }] }"#;
		let link: GraphLink = serde_json::from_str(json).expect("valid link");
		assert_eq!(link.break_points, vec![Point::new(1.5, -2.0)]);
	}

	#[test]
	fn link_keys_disambiguate_parallel_bundles() {
		let link = GraphLink {
			source: "a".to_string(),
			target: "b".to_string(),
			curve: None,
			break_points: Vec::new(),
			self_direction: None,
		};
		assert_eq!(link.key(0), "a->b");
		assert_eq!(link.key(2), "a->b#2");
	}

	#[test]
	fn node_deserializes_with_optional_fields_absent() {
		let node: GraphNode = serde_json::from_str(r#"{ "id": "a" }"#).expect("valid node");
		assert_eq!(node.id, "a");
		assert!(node.label.is_none() && node.color.is_none() && node.group.is_none());
	}
}
