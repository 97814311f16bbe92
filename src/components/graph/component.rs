//! Leptos component wrapping the SVG graph view.
//!
//! The component renders an `<svg>` element and wires up mouse/wheel event
//! handlers for node dragging, panning, zooming, click selection, and
//! double-click subtree collapsing. An animation loop runs via
//! `requestAnimationFrame`, advancing the physics simulation and rebuilding
//! the SVG scene each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, SvgsvgElement, WheelEvent, Window};

use super::render::{self, Scene};
use super::selection::SelectionSnapshot;
use super::state::GraphState;
use super::theme::Theme;
use super::types::{GraphConfig, GraphData};

/// Mouse travel below this many pixels counts as a click, not a drag.
const CLICK_SLOP: f64 = 4.0;

/// Bundles simulation state with behavioral and visual configuration.
struct GraphContext {
	state: GraphState,
	config: GraphConfig,
	theme: Theme,
	last_frame: f64,
}

/// Emits the selection snapshot to the callback if it changed since the
/// last notification.
fn notify(
	context: &Rc<RefCell<Option<GraphContext>>>,
	callback: Option<Callback<SelectionSnapshot>>,
) {
	let changed = context
		.borrow_mut()
		.as_mut()
		.and_then(|c| c.state.take_selection_change());
	if let (Some(snapshot), Some(callback)) = (changed, callback) {
		callback.run(snapshot);
	}
}

/// Link key carried on the event target's `data-key` attribute, if the
/// gesture ended on a link path.
fn clicked_link_key(ev: &MouseEvent) -> Option<String> {
	ev.target()?
		.dyn_into::<Element>()
		.ok()?
		.get_attribute("data-key")
}

/// Renders an interactive force-directed graph as SVG.
///
/// Pass graph data via the reactive `data` signal. The component sizes
/// itself to its parent container by default; set `fullscreen = true` to
/// fill the viewport and resize automatically with the window. Explicit
/// `width`/`height` override automatic sizing.
///
/// Clicking a node or a link toggles its selection; clicking the background
/// clears it. `on_selection_change` is invoked with a frozen snapshot
/// whenever the selection observably changes. Double-clicking a node
/// collapses or expands its subtree when the config allows it.
#[component]
pub fn GraphView(
	/// Graph nodes and links to lay out and render.
	#[prop(into)]
	data: Signal<GraphData>,
	/// Behavioral configuration. Defaults to [`GraphConfig::default`].
	#[prop(default = None)]
	config: Option<GraphConfig>,
	/// Visual theme. Defaults to [`Theme::default`].
	#[prop(default = None)]
	theme: Option<Theme>,
	/// Fill the viewport and track window resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Explicit width, overriding parent sizing.
	#[prop(default = None)]
	width: Option<f64>,
	/// Explicit height, overriding parent sizing.
	#[prop(default = None)]
	height: Option<f64>,
	/// Initial selection seeded at mount, without firing the callback.
	#[prop(default = None)]
	selected: Option<SelectionSnapshot>,
	/// Invoked with a snapshot whenever the selection changes.
	#[prop(optional, into)]
	on_selection_change: Option<Callback<SelectionSnapshot>>,
) -> impl IntoView {
	let svg_ref = NodeRef::<leptos::svg::Svg>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let scene = RwSignal::new(Scene::default());
	let size = RwSignal::new((800.0_f64, 600.0_f64));

	let config = config.unwrap_or_default();
	let theme = theme.unwrap_or_default();

	// Theme values baked into static parts of the view
	let background = theme.background.to_css();
	let label_color = theme.node.label_color.to_css();
	let label_size = theme.node.label_size;
	let arrow_fill = theme.link.stroke.to_css();
	let directed = config.directed;

	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(svg) = svg_ref.get() else {
			return;
		};
		let svg: SvgsvgElement = svg.unchecked_into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					svg.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					svg.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		size.set((w, h));

		let mut state = GraphState::new(&data.get(), w, h, &theme);
		if let Some(ref snapshot) = selected {
			state.seed_selection(snapshot);
		}
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			config: config.clone(),
			theme: theme.clone(),
			last_frame: js_sys::Date::now(),
		});

		if fullscreen {
			let context_resize = context_init.clone();
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				size.set((nw, nh));
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let now = js_sys::Date::now();
				let dt = ((now - c.last_frame) / 1000.0).clamp(0.001, 0.05);
				c.last_frame = now;
				if c.state.animation_running {
					c.state.tick(dt as f32);
				}
				scene.set(render::build_scene(&c.state, &c.config, &c.theme));
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let event_position = move |ev: &MouseEvent| {
		let svg: SvgsvgElement = svg_ref.get().unwrap().unchecked_into();
		let rect = svg.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = event_position(&ev);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some((idx, id)) = c.state.node_at_position(x, y, c.config.hit_radius) {
				c.state.drag.active = true;
				c.state.drag.node_idx = Some(idx);
				c.state.drag.node_id = Some(id);
				c.state.drag.start_x = x;
				c.state.drag.start_y = y;
				c.state.graph.visit_nodes(|node| {
					if node.index() == idx {
						c.state.drag.node_start_x = node.x();
						c.state.drag.node_start_y = node.y();
					}
				});
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = event_position(&ev);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.active {
				if let Some(idx) = c.state.drag.node_idx {
					let (dx, dy) = (
						(x - c.state.drag.start_x) / c.state.transform.k,
						(y - c.state.drag.start_y) / c.state.transform.k,
					);
					let (nx, ny) = (
						c.state.drag.node_start_x + dx as f32,
						c.state.drag.node_start_y + dy as f32,
					);
					c.state.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let (x, y) = event_position(&ev);

		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if c.state.drag.active {
				let travel = ((x - c.state.drag.start_x).powi(2)
					+ (y - c.state.drag.start_y).powi(2))
				.sqrt();
				if travel < CLICK_SLOP {
					if let Some(id) = c.state.drag.node_id.take() {
						c.state.selection.toggle_node(&id);
					}
				}
			} else if c.state.pan.active {
				let travel = ((x - c.state.pan.start_x).powi(2)
					+ (y - c.state.pan.start_y).powi(2))
				.sqrt();
				if travel < CLICK_SLOP {
					// released over a link path toggles it; bare background clears
					match clicked_link_key(&ev) {
						Some(key) => c.state.selection.toggle_link(&key),
						None => c.state.selection.clear(),
					}
				}
			}
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.drag.node_id = None;
			c.state.pan.active = false;
		}
		notify(&context_mu, on_selection_change);
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.drag.node_id = None;
			c.state.pan.active = false;
		}
	};

	let context_dc = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let (x, y) = event_position(&ev);

		if let Some(ref mut c) = *context_dc.borrow_mut() {
			if !c.config.collapsible {
				return;
			}
			if let Some((_, id)) = c.state.node_at_position(x, y, c.config.hit_radius) {
				c.state.toggle_collapse(&id);
			}
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let (x, y) = event_position(&ev);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.state.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		}
	};

	view! {
		<svg
			node_ref=svg_ref
			class="graph-view"
			width=move || size.get().0
			height=move || size.get().1
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: grab; user-select: none;"
		>
			<defs>
				<marker
					id="graph-view-arrow"
					viewBox="0 -4 8 8"
					refX="8"
					refY="0"
					markerWidth="8"
					markerHeight="8"
					orient="auto"
				>
					<path d="M0,-4L8,0L0,4" fill=arrow_fill />
				</marker>
			</defs>
			<rect width="100%" height="100%" fill=background />
			<g transform=move || scene.get().transform>
				{move || {
					scene
						.get()
						.links
						.into_iter()
						.map(|link| {
							let marker = directed.then_some("url(#graph-view-arrow)");
							view! {
								<path
									d=link.d
									stroke=link.stroke
									stroke-width=link.width
									fill="none"
									marker-end=marker
									data-key=link.key
									style="pointer-events: stroke; cursor: pointer;"
								/>
							}
						})
						.collect_view()
				}}
				{
					let label_color = label_color.clone();
					move || {
						let label_color = label_color.clone();
						scene
							.get()
							.nodes
							.into_iter()
							.map(move |node| {
								let label = node.label.as_ref().map(|label| {
									view! {
										<text
											x=node.x + node.radius + 4.0
											y=node.y + 3.0
											fill=label_color.clone()
											font-size=label_size
										>
											{label.clone()}
										</text>
									}
								});
								view! {
									<circle
										cx=node.x
										cy=node.y
										r=node.radius
										fill=node.fill
										stroke=node.stroke
										stroke-width=node.stroke_width
										stroke-dasharray=node.collapsed.then_some("3,2")
									/>
									{label}
								}
							})
							.collect_view()
					}
				}
			</g>
		</svg>
	}
}
