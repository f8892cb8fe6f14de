//! Fixed colour tables and deterministic colour assignment.
//!
//! Colours are picked purely by position modulo table length, so the same ranked
//! order always gets the same colours.

use serde::{Serialize, Serializer};
use std::fmt;

/// An sRGB colour with straight alpha, rendered as a CSS `rgba()` string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same hue with the alpha channel replaced
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub const fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fill/border pair for one series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    pub fill: Rgba,
    pub border: Rgba,
}

const fn pair(r: u8, g: u8, b: u8) -> ColorPair {
    ColorPair {
        fill: Rgba::new(r, g, b, 0.8),
        border: Rgba::new(r, g, b, 1.0),
    }
}

/// Semi-transparent fills for per-category colouring
pub const CATEGORY_FILLS: [Rgba; 20] = [
    Rgba::new(99, 102, 241, 0.85),  // indigo
    Rgba::new(59, 130, 246, 0.85),  // blue
    Rgba::new(16, 185, 129, 0.85),  // emerald
    Rgba::new(245, 158, 11, 0.85),  // amber
    Rgba::new(239, 68, 68, 0.85),   // red
    Rgba::new(139, 92, 246, 0.85),  // violet
    Rgba::new(236, 72, 153, 0.85),  // pink
    Rgba::new(20, 184, 166, 0.85),  // teal
    Rgba::new(251, 146, 60, 0.85),  // orange
    Rgba::new(34, 197, 94, 0.85),   // green
    Rgba::new(168, 85, 247, 0.85),  // purple
    Rgba::new(14, 165, 233, 0.85),  // sky
    Rgba::new(217, 70, 239, 0.85),  // fuchsia
    Rgba::new(34, 211, 238, 0.85),  // cyan
    Rgba::new(244, 63, 94, 0.85),   // rose
    Rgba::new(52, 211, 153, 0.85),
    Rgba::new(251, 191, 36, 0.85),  // yellow
    Rgba::new(124, 58, 237, 0.85),
    Rgba::new(248, 113, 113, 0.85),
    Rgba::new(96, 165, 250, 0.85),
];

/// One pair per year series
pub const SERIES_COLORS: [ColorPair; 10] = [
    pair(99, 102, 241),
    pair(59, 130, 246),
    pair(16, 185, 129),
    pair(245, 158, 11),
    pair(239, 68, 68),
    pair(139, 92, 246),
    pair(236, 72, 153),
    pair(20, 184, 166),
    pair(251, 146, 60),
    pair(34, 197, 94),
];

/// Alpha used for the area under a line
pub const LINE_FILL_ALPHA: f64 = 0.2;

/// Colours by category position (simple mode)
#[derive(Debug, Clone, Copy)]
pub struct CategoryPalette {
    fills: &'static [Rgba],
}

impl CategoryPalette {
    pub fn enhanced() -> Self {
        Self { fills: &CATEGORY_FILLS }
    }

    pub fn fill(&self, index: usize) -> Rgba {
        self.fills[index % self.fills.len()]
    }

    /// Border is the fill hue at full opacity
    pub fn border(&self, index: usize) -> Rgba {
        self.fill(index).opaque()
    }

    pub fn assign_fills(&self, count: usize) -> Vec<Rgba> {
        (0..count).map(|i| self.fill(i)).collect()
    }

    pub fn assign_borders(&self, count: usize) -> Vec<Rgba> {
        (0..count).map(|i| self.border(i)).collect()
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self::enhanced()
    }
}

/// Colours by series position (year-pivot mode)
#[derive(Debug, Clone, Copy)]
pub struct SeriesPalette {
    pairs: &'static [ColorPair],
}

impl SeriesPalette {
    pub fn years() -> Self {
        Self { pairs: &SERIES_COLORS }
    }

    pub fn pair(&self, index: usize) -> ColorPair {
        self.pairs[index % self.pairs.len()]
    }
}

impl Default for SeriesPalette {
    fn default() -> Self {
        Self::years()
    }
}
