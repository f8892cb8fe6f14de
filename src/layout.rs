use crate::ir::LayoutHint;
use crate::ChartKind;

/// Bar charts with more categories than this scroll horizontally
pub const SCROLL_THRESHOLD: usize = 15;
/// Minimum pixel width given to each bar category when scrolling
pub const MIN_CATEGORY_WIDTH: u32 = 40;
pub const MIN_CONTAINER_WIDTH: u32 = 800;
/// Pie/doughnut charts with more slices than this page their legend
pub const PAGED_LEGEND_THRESHOLD: usize = 8;

/// Decide scrolling and legend hints from the final label count
pub fn advise_layout(kind: ChartKind, label_count: usize, height_px: u32) -> LayoutHint {
    let mut hint = LayoutHint {
        needs_horizontal_scroll: false,
        container_width: None,
        container_height: height_px,
        needs_paged_legend: false,
    };

    match kind {
        ChartKind::Bar if label_count > SCROLL_THRESHOLD => {
            let width = (label_count as u32).saturating_mul(MIN_CATEGORY_WIDTH);
            hint.needs_horizontal_scroll = true;
            hint.container_width = Some(width.max(MIN_CONTAINER_WIDTH));
        }
        ChartKind::Pie | ChartKind::Doughnut if label_count > PAGED_LEGEND_THRESHOLD => {
            hint.needs_paged_legend = true;
        }
        _ => {}
    }

    tracing::debug!(
        kind = %kind,
        labels = label_count,
        scroll = hint.needs_horizontal_scroll,
        paged_legend = hint.needs_paged_legend,
        "layout advised"
    );
    hint
}

/// Axis tick label: `M` above a million, `K` above a thousand, literal otherwise
pub fn format_tick(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scroll_threshold() {
        let hint = advise_layout(ChartKind::Bar, 15, 300);
        assert!(!hint.needs_horizontal_scroll);
        assert_eq!(hint.container_width, None);

        let hint = advise_layout(ChartKind::Bar, 16, 300);
        assert!(hint.needs_horizontal_scroll);
        assert_eq!(hint.container_width, Some(800));

        let hint = advise_layout(ChartKind::Bar, 30, 300);
        assert_eq!(hint.container_width, Some(1200));
    }

    #[test]
    fn test_paged_legend() {
        assert!(!advise_layout(ChartKind::Pie, 8, 300).needs_paged_legend);
        assert!(advise_layout(ChartKind::Pie, 9, 300).needs_paged_legend);
        assert!(advise_layout(ChartKind::Doughnut, 10, 300).needs_paged_legend);
    }

    #[test]
    fn test_line_never_scrolls() {
        let hint = advise_layout(ChartKind::Line, 50, 420);
        assert!(!hint.needs_horizontal_scroll);
        assert!(!hint.needs_paged_legend);
        assert_eq!(hint.container_height, 420);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(2_500_000.0), "2.5M");
        assert_eq!(format_tick(1_000_000.0), "1.0M");
        assert_eq!(format_tick(12_345.0), "12.3K");
        assert_eq!(format_tick(999.0), "999");
        assert_eq!(format_tick(42.5), "42.5");
        assert_eq!(format_tick(-5000.0), "-5000");
    }
}
