//! graph-view: Interactive force-directed graph visualization rendered as SVG.
//!
//! This crate provides a WASM-based graph visualization component with
//! physics-based layout, pan/zoom, node dragging, click selection with
//! change callbacks, and double-click subtree collapsing.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::graph::{
	CurveType, GraphConfig, GraphData, GraphLink, GraphNode, GraphView, Point, Selection,
	SelectionSnapshot, SelfLinkDirection, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-view: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"graph-view: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("graph-view: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads graph data from DOM and renders the interactive visualization.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	// Load graph data from the DOM
	let graph_data = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());

	let on_selection_change = Callback::new(|selection: SelectionSnapshot| {
		info!(
			"graph-view: selection changed: {} nodes, {} links",
			selection.nodes.len(),
			selection.links.len()
		);
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Graph View" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphView data=graph_signal fullscreen=true on_selection_change=on_selection_change />
			<div class="graph-overlay">
				<h1>"Graph View"</h1>
				<p class="subtitle">
					"Click to select nodes and links. Double-click to collapse a subtree. Scroll to zoom."
				</p>
			</div>
		</div>
	}
}
