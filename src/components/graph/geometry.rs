//! SVG path geometry for graph links.
//!
//! Every link is rendered from a path description string computed here from
//! the current endpoint coordinates. The functions are pure: the same
//! geometry request always produces the same string, and unknown curve tags
//! fall back to a straight polyline rather than erroring.

use serde::Deserialize;

use super::types::GraphLink;

/// Deviations smaller than this are treated as zero (no synthetic break point).
const DEVIATION_EPSILON: f64 = 1e-5;

/// Self-loop arc radii, horizontal and vertical.
const SELF_LOOP_RX: f64 = 40.0;
const SELF_LOOP_RY: f64 = 30.0;

/// A point in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// Creates a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to another point.
	pub fn distance_to(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}

	fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

/// How a link's path is shaped between its points.
///
/// Tags are shared with the data layer; [`CurveType::from_tag`] accepts any
/// string and maps unknown values to [`CurveType::Straight`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CurveType {
	/// Polyline through all points.
	#[default]
	Straight,
	/// Circular arcs whose radius is the distance between consecutive points.
	SmoothCurve,
	/// Arcs with a fixed unit radius, yielding near semi-circular bulges.
	FullCurve,
	/// Catmull-Rom interpolation through all points.
	CatmullRom,
}

impl CurveType {
	/// Parses a curve tag, defaulting to `Straight` for anything unknown.
	pub fn from_tag(tag: &str) -> Self {
		match tag {
			"smoothCurve" => CurveType::SmoothCurve,
			"fullCurve" => CurveType::FullCurve,
			"catmullRom" => CurveType::CatmullRom,
			_ => CurveType::Straight,
		}
	}
}

impl From<String> for CurveType {
	fn from(tag: String) -> Self {
		CurveType::from_tag(&tag)
	}
}

/// Quadrant a self-loop fans out into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SelfLinkDirection {
	/// Loop above and to the left of the node.
	TopLeft,
	/// Loop above and to the right of the node (default).
	#[default]
	TopRight,
	/// Loop below and to the left.
	BottomLeft,
	/// Loop below and to the right.
	BottomRight,
}

impl SelfLinkDirection {
	/// Parses a direction tag, defaulting to `TopRight` for anything unknown.
	pub fn from_tag(tag: &str) -> Self {
		match tag {
			"topLeft" => SelfLinkDirection::TopLeft,
			"bottomLeft" => SelfLinkDirection::BottomLeft,
			"bottomRight" => SelfLinkDirection::BottomRight,
			_ => SelfLinkDirection::TopRight,
		}
	}
}

impl From<String> for SelfLinkDirection {
	fn from(tag: String) -> Self {
		SelfLinkDirection::from_tag(&tag)
	}
}

/// Bundle context for a link that shares its endpoint pair with others.
#[derive(Clone, Copy, Debug)]
pub struct ParallelEdges {
	/// Position of this link within the bundle, `0..count`.
	pub index: usize,
	/// Total links sharing the endpoint pair.
	pub count: usize,
	/// Maximum deviation as a fraction of the chord length.
	pub spread: f64,
}

/// Everything needed to compute one link's path string.
///
/// Built fresh each render pass from current node positions; never stored.
#[derive(Clone, Copy, Debug)]
pub struct LinkGeometry<'a> {
	/// Source node id.
	pub source_id: &'a str,
	/// Target node id.
	pub target_id: &'a str,
	/// Source node position.
	pub source: Point,
	/// Target node position.
	pub target: Point,
	/// Curve strategy.
	pub curve: CurveType,
	/// User-supplied intermediate points, if any.
	pub break_points: &'a [Point],
	/// Parallel-edge bundle context, if the link shares its endpoints.
	pub parallel: Option<ParallelEdges>,
	/// Quadrant for self-loops.
	pub self_direction: SelfLinkDirection,
}

/// Computes the SVG path `d` string for a link.
///
/// A genuine self-loop (same id *and* same coordinates) short-circuits to a
/// fixed elliptical arc. Otherwise the point sequence is source, break
/// points (or one synthesized parallel-deviation point), target, handed to
/// the configured curve strategy.
pub fn link_path(geom: &LinkGeometry<'_>) -> String {
	if geom.source_id == geom.target_id && geom.source == geom.target {
		return self_loop_path(geom.source, geom.self_direction);
	}

	let mut points = Vec::with_capacity(geom.break_points.len() + 2);
	points.push(geom.source);
	if geom.break_points.is_empty() {
		if let Some(par) = geom.parallel {
			if let Some(bp) = parallel_break_point(geom.source, geom.target, par) {
				points.push(bp);
			}
		}
	} else {
		points.extend_from_slice(geom.break_points);
	}
	points.push(geom.target);

	match geom.curve {
		CurveType::Straight => straight_path(&points),
		CurveType::SmoothCurve => arc_path(&points, false),
		CurveType::FullCurve => arc_path(&points, true),
		CurveType::CatmullRom => catmull_rom_path(&points),
	}
}

/// Fixed 40x30 elliptical arc looping out of a single point.
///
/// The endpoint is offset one unit into the requested quadrant; the sweep
/// flag flips across the vertical axis so the loop always bulges outward.
fn self_loop_path(p: Point, direction: SelfLinkDirection) -> String {
	let (dx, dy, sweep) = match direction {
		SelfLinkDirection::TopRight => (1.0, -1.0, 1),
		SelfLinkDirection::TopLeft => (-1.0, -1.0, 0),
		SelfLinkDirection::BottomRight => (1.0, 1.0, 0),
		SelfLinkDirection::BottomLeft => (-1.0, 1.0, 1),
	};
	format!(
		"M{},{}A{},{} 0 1,{} {},{}",
		p.x,
		p.y,
		SELF_LOOP_RX,
		SELF_LOOP_RY,
		sweep,
		p.x + dx,
		p.y + dy
	)
}

/// Synthesizes the deviation break point for one link of a parallel bundle.
///
/// Deviation indices are centered so that odd bundles keep their middle link
/// straight and even bundles straddle the chord symmetrically with no link
/// on it. Returns `None` when the deviation is effectively zero.
fn parallel_break_point(source: Point, target: Point, par: ParallelEdges) -> Option<Point> {
	let index = if par.count % 2 == 0 {
		par.index as f64 - (par.count / 2) as f64 + 0.5
	} else {
		par.index as f64 - ((par.count - 1) / 2) as f64
	};

	let (dx, dy) = (target.x - source.x, target.y - source.y);
	let length = (dx * dx + dy * dy).sqrt();
	if length < DEVIATION_EPSILON {
		return None;
	}

	let deviation = index * length * par.spread;
	if deviation.abs() < DEVIATION_EPSILON {
		return None;
	}

	let mid = source.midpoint(target);
	// Unit normal to the chord; deviation sign picks the side.
	let (nx, ny) = (-dy / length, dx / length);
	Some(Point::new(mid.x + nx * deviation, mid.y + ny * deviation))
}

fn straight_path(points: &[Point]) -> String {
	let mut d = format!("M{},{}", points[0].x, points[0].y);
	for p in &points[1..] {
		d.push_str(&format!("L{},{}", p.x, p.y));
	}
	d
}

/// Arc traversal shared by the smooth and full curve strategies.
///
/// `unit_radius` selects the fixed-radius degenerate form; otherwise each
/// arc's radius is the chord length to the previous point. Sweep is fixed
/// clockwise with no large-arc flag.
fn arc_path(points: &[Point], unit_radius: bool) -> String {
	let mut d = format!("M{},{}", points[0].x, points[0].y);
	for pair in points.windows(2) {
		let radius = if unit_radius {
			1.0
		} else {
			pair[0].distance_to(pair[1])
		};
		d.push_str(&format!(
			"A{},{} 0 0,1 {},{}",
			radius, radius, pair[1].x, pair[1].y
		));
	}
	d
}

fn catmull_rom_path(points: &[Point]) -> String {
	match points.len() {
		0..=2 => straight_path(points),
		3 => three_point_path(points[0], points[1], points[2])
			.unwrap_or_else(|| straight_path(points)),
		_ => spline_path(points),
	}
}

/// Two quadratic segments through the middle point with a continuous tangent.
///
/// Both control points lie on the line through `mid` parallel to the
/// endpoint-to-endpoint direction, each placed at its intersection with the
/// perpendicular bisector of the corresponding half-chord. Degenerate input
/// (coincident points) yields `None`.
fn three_point_path(start: Point, mid: Point, end: Point) -> Option<String> {
	let tangent = Point::new(end.x - start.x, end.y - start.y);
	let c1 = line_intersection(mid, tangent, start.midpoint(mid), normal_of(start, mid))?;
	let c2 = line_intersection(mid, tangent, mid.midpoint(end), normal_of(mid, end))?;
	Some(format!(
		"M{},{}Q{},{} {},{}Q{},{} {},{}",
		start.x, start.y, c1.x, c1.y, mid.x, mid.y, c2.x, c2.y, end.x, end.y
	))
}

/// Perpendicular of the chord from `a` to `b` (not normalized).
fn normal_of(a: Point, b: Point) -> Point {
	Point::new(-(b.y - a.y), b.x - a.x)
}

/// Intersection of the lines `p + t*d` and `q + s*e`, if not parallel.
fn line_intersection(p: Point, d: Point, q: Point, e: Point) -> Option<Point> {
	let denom = d.x * e.y - d.y * e.x;
	if denom.abs() < DEVIATION_EPSILON {
		return None;
	}
	let t = ((q.x - p.x) * e.y - (q.y - p.y) * e.x) / denom;
	Some(Point::new(p.x + t * d.x, p.y + t * d.y))
}

/// Centripetal Catmull-Rom through four or more points as cubic segments.
///
/// Chord-length parameterization with alpha 0.5; the first and last segments
/// use duplicated phantom endpoints. Coincident neighbors collapse the knot
/// correction terms instead of dividing by zero.
fn spline_path(points: &[Point]) -> String {
	const ALPHA: f64 = 0.5;

	let mut d = format!("M{},{}", points[0].x, points[0].y);
	let last = points.len() - 1;
	for i in 0..last {
		let p0 = points[i.saturating_sub(1)];
		let p1 = points[i];
		let p2 = points[i + 1];
		let p3 = points[(i + 2).min(last)];

		let t01 = p0.distance_to(p1).powf(ALPHA);
		let t12 = p1.distance_to(p2).powf(ALPHA);
		let t23 = p2.distance_to(p3).powf(ALPHA);

		let m1 = if t01 > DEVIATION_EPSILON && t12 > DEVIATION_EPSILON {
			Point::new(
				(p2.x - p1.x) + t12 * ((p1.x - p0.x) / t01 - (p2.x - p0.x) / (t01 + t12)),
				(p2.y - p1.y) + t12 * ((p1.y - p0.y) / t01 - (p2.y - p0.y) / (t01 + t12)),
			)
		} else {
			Point::new(p2.x - p1.x, p2.y - p1.y)
		};
		let m2 = if t23 > DEVIATION_EPSILON && t12 > DEVIATION_EPSILON {
			Point::new(
				(p2.x - p1.x) + t12 * ((p3.x - p2.x) / t23 - (p3.x - p1.x) / (t12 + t23)),
				(p2.y - p1.y) + t12 * ((p3.y - p2.y) / t23 - (p3.y - p1.y) / (t12 + t23)),
			)
		} else {
			Point::new(p2.x - p1.x, p2.y - p1.y)
		};

		let c1 = Point::new(p1.x + m1.x / 3.0, p1.y + m1.y / 3.0);
		let c2 = Point::new(p2.x - m2.x / 3.0, p2.y - m2.y / 3.0);
		d.push_str(&format!(
			"C{},{} {},{} {},{}",
			c1.x, c1.y, c2.x, c2.y, p2.x, p2.y
		));
	}
	d
}

/// Bundle position of a link among those sharing its endpoint pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelGroup {
	/// Position within the bundle, in input order.
	pub index: usize,
	/// Bundle size.
	pub count: usize,
}

/// Assigns each link its parallel-bundle index and count.
///
/// Links are grouped by unordered endpoint pair, so `a->b` and `b->a` fan
/// out together. Self-loops are never grouped; they keep a count of one.
pub fn parallel_groups(links: &[GraphLink]) -> Vec<ParallelGroup> {
	use std::collections::HashMap;

	let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
	for link in links {
		if link.source != link.target {
			*counts.entry(pair_key(link)).or_insert(0) += 1;
		}
	}

	let mut next: HashMap<(&str, &str), usize> = HashMap::new();
	links
		.iter()
		.map(|link| {
			if link.source == link.target {
				return ParallelGroup { index: 0, count: 1 };
			}
			let key = pair_key(link);
			let index = next.entry(key).or_insert(0);
			let group = ParallelGroup {
				index: *index,
				count: counts[&key],
			};
			*index += 1;
			group
		})
		.collect()
}

fn pair_key(link: &GraphLink) -> (&str, &str) {
	if link.source.as_str() <= link.target.as_str() {
		(link.source.as_str(), link.target.as_str())
	} else {
		(link.target.as_str(), link.source.as_str())
	}
}
