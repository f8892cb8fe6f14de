use crate::palette::Rgba;
use crate::ChartKind;
use serde::Serialize;

// =============================================================================
// Phase 1: Resolution
// =============================================================================

/// Classification of a field on the representative record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Excluded,
    Label,
    Metric,
    Unused,
}

/// Result of inspecting the representative record
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFields {
    pub label_field: String,
    pub metric_field: String,
    /// Numeric fields in declaration order, exclusions removed
    pub numeric_fields: Vec<String>,
    /// String fields in declaration order, exclusions removed
    pub string_fields: Vec<String>,
}

impl ResolvedFields {
    pub fn role_of(&self, field: &str) -> FieldRole {
        if crate::resolve::is_excluded(field) {
            FieldRole::Excluded
        } else if field == self.label_field {
            FieldRole::Label
        } else if field == self.metric_field {
            FieldRole::Metric
        } else {
            FieldRole::Unused
        }
    }

    /// Human-facing name of the metric, e.g. `cases_reported` -> `CASES REPORTED`
    pub fn metric_display_name(&self) -> String {
        self.metric_field.replace('_', " ").to_uppercase()
    }
}

// =============================================================================
// Phase 2: Aggregation
// =============================================================================

/// The aggregation unit: all metric values sharing one key
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    /// Secondary dimension (year) in pivot mode
    pub secondary: Option<String>,
    pub values: Vec<f64>,
}

impl Group {
    pub fn new(label: String, secondary: Option<String>) -> Self {
        Self { label, secondary, values: Vec::new() }
    }

    /// Arithmetic mean; a single contributor yields its raw value
    pub fn mean(&self) -> f64 {
        match self.values.as_slice() {
            [] => 0.0,
            [only] => *only,
            values => values.iter().sum::<f64>() / values.len() as f64,
        }
    }
}

/// Year x label table of means, both axes sorted lexicographically
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub years: Vec<String>,
    pub labels: Vec<String>,
    /// `means[year_idx][label_idx]`
    pub means: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Aggregated {
    /// Groups in first-encountered order
    Simple(Vec<Group>),
    YearPivot(PivotTable),
}

// =============================================================================
// Phase 3: Ranking
// =============================================================================

/// Labels paired with their aggregated values, in display order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedCategories {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl RankedCategories {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// =============================================================================
// Phase 4: Descriptor
// =============================================================================

/// Either one colour for the whole series or one per data point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Single(Rgba),
    PerPoint(Vec<Rgba>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    pub border_width: u32,
    /// Fill the area under a line
    pub fill: bool,
    /// Curve smoothing factor, lines only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub fill_color: Paint,
    pub border_color: Paint,
    #[serde(flatten)]
    pub style: SeriesStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescriptor {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutHint {
    pub needs_horizontal_scroll: bool,
    /// Explicit pixel width when scrolling; `None` means natural responsive width
    pub container_width: Option<u32>,
    pub container_height: u32,
    pub needs_paged_legend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub descriptor: ChartDescriptor,
    pub layout: LayoutHint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyReason {
    EmptyDataset,
    NoMetricField,
}

/// Final result handed to the renderer. `Empty` is the "no data" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartOutput {
    Chart(Chart),
    Empty(EmptyReason),
}

impl ChartOutput {
    pub fn chart(&self) -> Option<&Chart> {
        match self {
            ChartOutput::Chart(chart) => Some(chart),
            ChartOutput::Empty(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartOutput::Empty(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_mean() {
        let mut group = Group::new("A".to_string(), None);
        group.values = vec![10.0, 20.0];
        assert_eq!(group.mean(), 15.0);
        group.values = vec![7.25];
        assert_eq!(group.mean(), 7.25);
    }

    #[test]
    fn test_metric_display_name() {
        let fields = ResolvedFields {
            label_field: "state".to_string(),
            metric_field: "power_consumption_gwh".to_string(),
            numeric_fields: vec![],
            string_fields: vec![],
        };
        assert_eq!(fields.metric_display_name(), "POWER CONSUMPTION GWH");
    }

    #[test]
    fn test_empty_sentinel_serialization() {
        let output = ChartOutput::Empty(EmptyReason::NoMetricField);
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(json, r#"{"empty":"noMetricField"}"#);
    }
}
