use crate::ir::{ChartDescriptor, Paint, PivotTable, RankedCategories, ResolvedFields, Series, SeriesStyle};
use crate::palette::{CategoryPalette, ColorPair, SeriesPalette, LINE_FILL_ALPHA};
use crate::ChartKind;

pub const BORDER_WIDTH: u32 = 2;
/// Bezier smoothing for line series
pub const LINE_TENSION: f64 = 0.4;

// =============================================================================
// Simple mode: one series, one colour per category
// =============================================================================

/// Build the descriptor for ranked categories
pub fn compile_ranked(
    kind: ChartKind,
    fields: &ResolvedFields,
    ranked: RankedCategories,
    palette: CategoryPalette,
) -> ChartDescriptor {
    let name = fields.metric_display_name();
    let RankedCategories { labels, values } = ranked;

    let series = match kind {
        ChartKind::Bar => bar_series(name, values, palette),
        ChartKind::Line => line_series(name, values, palette),
        ChartKind::Pie | ChartKind::Doughnut => radial_series(name, values, palette),
    };

    ChartDescriptor {
        kind,
        labels,
        series: vec![series],
    }
}

fn bar_series(name: String, values: Vec<f64>, palette: CategoryPalette) -> Series {
    per_category_series(name, values, palette)
}

fn line_series(name: String, values: Vec<f64>, palette: CategoryPalette) -> Series {
    // A single line takes the first palette hue
    Series {
        name,
        values,
        fill_color: Paint::Single(palette.fill(0).with_alpha(LINE_FILL_ALPHA)),
        border_color: Paint::Single(palette.border(0)),
        style: line_style(),
    }
}

fn radial_series(name: String, values: Vec<f64>, palette: CategoryPalette) -> Series {
    per_category_series(name, values, palette)
}

/// One fill and one border per category, no area fill
fn per_category_series(name: String, values: Vec<f64>, palette: CategoryPalette) -> Series {
    let n = values.len();
    Series {
        name,
        values,
        fill_color: Paint::PerPoint(palette.assign_fills(n)),
        border_color: Paint::PerPoint(palette.assign_borders(n)),
        style: flat_style(),
    }
}

// =============================================================================
// Year-pivot mode: one series per year
// =============================================================================

/// Build the descriptor for a year x label table
pub fn compile_pivot(
    kind: ChartKind,
    fields: &ResolvedFields,
    table: PivotTable,
    palette: SeriesPalette,
) -> ChartDescriptor {
    let metric = fields.metric_display_name();
    let PivotTable { years, labels, means } = table;

    let series = years
        .into_iter()
        .zip(means)
        .enumerate()
        .map(|(idx, (year, values))| {
            let name = format!("{} - {}", year, metric);
            let colors = palette.pair(idx);
            match kind {
                ChartKind::Line => year_line_series(name, values, colors),
                ChartKind::Bar | ChartKind::Pie | ChartKind::Doughnut => {
                    year_flat_series(name, values, colors)
                }
            }
        })
        .collect();

    ChartDescriptor { kind, labels, series }
}

fn year_line_series(name: String, values: Vec<f64>, colors: ColorPair) -> Series {
    Series {
        name,
        values,
        fill_color: Paint::Single(colors.fill.with_alpha(LINE_FILL_ALPHA)),
        border_color: Paint::Single(colors.border),
        style: line_style(),
    }
}

fn year_flat_series(name: String, values: Vec<f64>, colors: ColorPair) -> Series {
    Series {
        name,
        values,
        fill_color: Paint::Single(colors.fill),
        border_color: Paint::Single(colors.border),
        style: flat_style(),
    }
}

fn flat_style() -> SeriesStyle {
    SeriesStyle {
        border_width: BORDER_WIDTH,
        fill: false,
        tension: None,
    }
}

fn line_style() -> SeriesStyle {
    SeriesStyle {
        border_width: BORDER_WIDTH,
        fill: true,
        tension: Some(LINE_TENSION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Rgba, CATEGORY_FILLS};

    fn make_fields() -> ResolvedFields {
        ResolvedFields {
            label_field: "state".to_string(),
            metric_field: "cases_reported".to_string(),
            numeric_fields: vec!["cases_reported".to_string()],
            string_fields: vec!["state".to_string()],
        }
    }

    fn make_ranked() -> RankedCategories {
        RankedCategories {
            labels: vec!["B".to_string(), "A".to_string()],
            values: vec![30.0, 15.0],
        }
    }

    #[test]
    fn test_bar_colours_per_category() {
        let desc = compile_ranked(ChartKind::Bar, &make_fields(), make_ranked(), CategoryPalette::enhanced());
        assert_eq!(desc.labels, vec!["B", "A"]);
        assert_eq!(desc.series.len(), 1);
        let series = &desc.series[0];
        assert_eq!(series.name, "CASES REPORTED");
        assert_eq!(series.fill_color, Paint::PerPoint(vec![CATEGORY_FILLS[0], CATEGORY_FILLS[1]]));
        assert_eq!(
            series.border_color,
            Paint::PerPoint(vec![CATEGORY_FILLS[0].opaque(), CATEGORY_FILLS[1].opaque()])
        );
        assert!(!series.style.fill);
        assert_eq!(series.style.tension, None);
    }

    #[test]
    fn test_line_is_smoothed_and_filled() {
        let desc = compile_ranked(ChartKind::Line, &make_fields(), make_ranked(), CategoryPalette::enhanced());
        let series = &desc.series[0];
        assert_eq!(series.fill_color, Paint::Single(Rgba::new(99, 102, 241, 0.2)));
        assert_eq!(series.border_color, Paint::Single(Rgba::new(99, 102, 241, 1.0)));
        assert!(series.style.fill);
        assert_eq!(series.style.tension, Some(0.4));
    }

    #[test]
    fn test_pivot_series_per_year() {
        let table = PivotTable {
            years: vec!["2020".to_string(), "2021".to_string()],
            labels: vec!["A".to_string(), "B".to_string()],
            means: vec![vec![15.0, 0.0], vec![5.0, 30.0]],
        };
        let desc = compile_pivot(ChartKind::Bar, &make_fields(), table, SeriesPalette::years());
        assert_eq!(desc.series.len(), 2);
        assert_eq!(desc.series[0].name, "2020 - CASES REPORTED");
        assert_eq!(desc.series[1].values, vec![5.0, 30.0]);
        assert_eq!(desc.series[1].fill_color, Paint::Single(SeriesPalette::years().pair(1).fill));
    }

    #[test]
    fn test_pivot_line_series_style() {
        let table = PivotTable {
            years: vec!["2020".to_string(), "2021".to_string()],
            labels: vec!["A".to_string(), "B".to_string()],
            means: vec![vec![15.0, 0.0], vec![5.0, 30.0]],
        };
        let desc = compile_pivot(ChartKind::Line, &make_fields(), table, SeriesPalette::years());
        let series = &desc.series[1];
        assert_eq!(series.name, "2021 - CASES REPORTED");
        assert_eq!(series.fill_color, Paint::Single(Rgba::new(59, 130, 246, 0.2)));
        assert_eq!(series.border_color, Paint::Single(Rgba::new(59, 130, 246, 1.0)));
        assert!(series.style.fill);
        assert_eq!(series.style.tension, Some(LINE_TENSION));
        assert_eq!(series.style.border_width, BORDER_WIDTH);
    }

    #[test]
    fn test_radial_matches_bar_colouring() {
        let bar = compile_ranked(ChartKind::Bar, &make_fields(), make_ranked(), CategoryPalette::enhanced());
        let pie = compile_ranked(ChartKind::Pie, &make_fields(), make_ranked(), CategoryPalette::enhanced());
        assert_eq!(bar.series, pie.series);
    }

    #[test]
    fn test_descriptor_json_shape() {
        let desc = compile_ranked(ChartKind::Line, &make_fields(), make_ranked(), CategoryPalette::enhanced());
        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["series"][0]["borderWidth"], 2);
        assert_eq!(json["series"][0]["fillColor"], "rgba(99, 102, 241, 0.2)");
        assert_eq!(json["series"][0]["tension"], 0.4);
    }
}
