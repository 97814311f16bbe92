//! Visual theming for the graph view.
//!
//! Colors land in SVG attributes, so everything here ultimately renders to a
//! CSS color string.

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color from RGB channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with an explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with a different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white).
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string; hex when fully opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// CSS hex string, ignoring alpha.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// A curated color palette for nodes.
#[derive(Clone, Debug)]
pub struct NodePalette {
	/// Palette entries, cycled by index.
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Muted, harmonious palette - slate blues and teals (default)
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 160, 175), // Cadet blue
				Color::rgb(108, 142, 173), // Air force blue
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(143, 163, 180), // Cool gray
				Color::rgb(122, 153, 168), // Dusty blue
			],
		}
	}

	/// Cool teals and purples
	pub fn aurora() -> Self {
		Self {
			colors: vec![
				Color::rgb(100, 145, 135), // Eucalyptus
				Color::rgb(115, 135, 155), // Slate
				Color::rgb(130, 120, 150), // Wisteria
				Color::rgb(105, 140, 145), // Teal
				Color::rgb(120, 130, 160), // Periwinkle
				Color::rgb(125, 145, 140), // Sage
				Color::rgb(110, 125, 155), // Storm
				Color::rgb(135, 140, 150), // Pewter
			],
		}
	}

	/// Palette color for an index, wrapping past the end.
	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeTheme {
	/// Outline color for unselected nodes.
	pub stroke: Color,
	/// Outline width for unselected nodes.
	pub stroke_width: f64,
	/// Outline color for selected nodes.
	pub selected_stroke: Color,
	/// Outline width for selected nodes.
	pub selected_stroke_width: f64,
	/// Label text color.
	pub label_color: Color,
	/// Label font size in pixels.
	pub label_size: f64,
}

/// Link visual style.
#[derive(Clone, Debug)]
pub struct LinkTheme {
	/// Stroke for unselected links.
	pub stroke: Color,
	/// Stroke width for unselected links.
	pub width: f64,
	/// Stroke for selected links.
	pub selected_stroke: Color,
	/// Stroke width for selected links.
	pub selected_width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Theme name, for logging and debugging.
	pub name: &'static str,
	/// Background fill.
	pub background: Color,
	/// Node styling.
	pub node: NodeTheme,
	/// Link styling.
	pub link: LinkTheme,
	/// Node fill palette.
	pub palette: NodePalette,
}

impl Theme {
	/// Clean dark theme (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: Color::rgb(22, 27, 34),
			node: NodeTheme {
				stroke: Color::rgba(255, 255, 255, 0.15),
				stroke_width: 1.0,
				selected_stroke: Color::rgb(255, 255, 255),
				selected_stroke_width: 2.0,
				label_color: Color::rgba(255, 255, 255, 0.85),
				label_size: 10.0,
			},
			link: LinkTheme {
				stroke: Color::rgba(140, 160, 180, 0.5),
				width: 1.5,
				selected_stroke: Color::rgba(255, 255, 255, 0.9),
				selected_width: 2.5,
			},
			palette: NodePalette::slate(),
		}
	}

	/// Elegant dark theme with cooler hues
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: Color::rgb(18, 20, 28),
			node: NodeTheme {
				stroke: Color::rgba(255, 255, 255, 0.12),
				stroke_width: 1.0,
				selected_stroke: Color::rgb(220, 230, 255),
				selected_stroke_width: 2.0,
				label_color: Color::rgba(220, 230, 255, 0.85),
				label_size: 10.0,
			},
			link: LinkTheme {
				stroke: Color::rgba(100, 120, 150, 0.45),
				width: 1.5,
				selected_stroke: Color::rgba(220, 230, 255, 0.9),
				selected_width: 2.5,
			},
			palette: NodePalette::aurora(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
