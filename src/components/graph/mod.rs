//! Interactive graph visualization component.
//!
//! Renders a force-directed graph as SVG with:
//! - Physics-based node positioning via force simulation
//! - Pan, zoom, and node dragging interactions
//! - Click selection of nodes and links with change notifications
//! - Configurable link curves, parallel-edge spreading, and self-loops
//! - Double-click collapsing of subtrees
//!
//! # Example
//!
//! ```ignore
//! use graph_view::{GraphView, GraphData, GraphNode, GraphLink};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "a".into(), label: Some("Node A".into()), .. },
//!         GraphNode { id: "b".into(), label: Some("Node B".into()), .. },
//!     ],
//!     links: vec![
//!         GraphLink { source: "a".into(), target: "b".into(), .. },
//!     ],
//! };
//!
//! view! { <GraphView data=data.into() fullscreen=true /> }
//! ```

pub mod collapse;
mod component;
pub mod geometry;
mod render;
pub mod selection;
mod state;
pub mod theme;
mod types;

pub use component::GraphView;
pub use geometry::{CurveType, Point, SelfLinkDirection};
pub use selection::{Selection, SelectionSnapshot};
pub use theme::Theme;
pub use types::{GraphConfig, GraphData, GraphLink, GraphNode};
