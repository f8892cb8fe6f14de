use crate::ir::{Group, RankedCategories};
use crate::ChartKind;

/// Maximum number of slices kept for pie and doughnut charts
pub const RADIAL_CATEGORY_CAP: usize = 10;

/// Order groups by mean, highest first, then apply the display cap for the chart kind
pub fn rank_groups(groups: &[Group], kind: ChartKind) -> RankedCategories {
    let mut ranked: Vec<(&str, f64)> = groups
        .iter()
        .map(|g| (g.label.as_str(), g.mean()))
        .collect();

    // Stable: ties keep first-encountered order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    if let Some(cap) = category_cap(kind) {
        if ranked.len() > cap {
            tracing::debug!(from = ranked.len(), to = cap, kind = %kind, "truncating categories");
            ranked.truncate(cap);
        }
    }

    let (labels, values) = ranked
        .into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .unzip();

    RankedCategories { labels, values }
}

/// Cap on category count, if the chart kind has one
pub fn category_cap(kind: ChartKind) -> Option<usize> {
    if kind.is_radial() {
        Some(RADIAL_CATEGORY_CAP)
    } else {
        None
    }
}
