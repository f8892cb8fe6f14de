// Library exports for autochart

pub mod csv_reader;
pub mod data;
pub mod palette;

// Pipeline phases
pub mod ir;
pub mod resolve;
pub mod transform;
pub mod rank;
pub mod layout;
pub mod compiler;
pub mod recommend;
pub mod runtime;

pub use data::{Dataset, Record, Value};
pub use ir::{Chart, ChartDescriptor, ChartOutput, EmptyReason, LayoutHint, Series};
pub use runtime::{build_chart, ChartCache};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chart variant requested by the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
}

impl ChartKind {
    /// Pie and doughnut charts have no axes and draw one slice per label
    pub fn is_radial(&self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            "doughnut" => Ok(ChartKind::Doughnut),
            other => Err(anyhow!("Unknown chart kind '{}'", other)),
        }
    }
}

pub const DEFAULT_HEIGHT_PX: u32 = 300;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartConfig {
    #[serde(default, rename = "chartKind")]
    pub kind: ChartKind,
    #[serde(default = "default_height", rename = "displayHeightPx")]
    pub height_px: u32,
    #[serde(default, rename = "yearPivot")]
    pub year_pivot: bool,
}

fn default_height() -> u32 { DEFAULT_HEIGHT_PX }

impl ChartConfig {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_year_pivot(mut self, year_pivot: bool) -> Self {
        self.year_pivot = year_pivot;
        self
    }

    pub fn with_height(mut self, height_px: u32) -> Self {
        self.height_px = height_px;
        self
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            height_px: DEFAULT_HEIGHT_PX,
            year_pivot: false,
        }
    }
}
