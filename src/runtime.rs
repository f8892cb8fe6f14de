// Pipeline executor: dataset + config -> chart descriptor and layout hints

use std::sync::Arc;
use crate::compiler;
use crate::data::Dataset;
use crate::ir::{Aggregated, Chart, ChartOutput, EmptyReason};
use crate::layout::advise_layout;
use crate::palette::{CategoryPalette, SeriesPalette};
use crate::rank::rank_groups;
use crate::resolve::resolve_fields;
use crate::transform::aggregate;
use crate::{ChartConfig, ChartKind};

/// Run the whole pipeline. Never fails: degenerate input yields `ChartOutput::Empty`.
pub fn build_chart(data: &Dataset, config: &ChartConfig) -> ChartOutput {
    if data.is_empty() {
        tracing::debug!("empty dataset, returning sentinel");
        return ChartOutput::Empty(EmptyReason::EmptyDataset);
    }

    // 1. Resolve label/metric fields from the first record
    let Some(fields) = resolve_fields(data) else {
        tracing::debug!("no numeric field on representative record, returning sentinel");
        return ChartOutput::Empty(EmptyReason::NoMetricField);
    };

    // 2. Aggregate, 3. rank (simple mode only), 4. compile
    let descriptor = match aggregate(data, &fields, config.year_pivot) {
        Aggregated::Simple(groups) => {
            let ranked = rank_groups(&groups, config.kind);
            compiler::compile_ranked(config.kind, &fields, ranked, CategoryPalette::enhanced())
        }
        Aggregated::YearPivot(table) => {
            compiler::compile_pivot(config.kind, &fields, table, SeriesPalette::years())
        }
    };

    // 5. Layout from final cardinality
    let layout = advise_layout(config.kind, descriptor.labels.len(), config.height_px);

    ChartOutput::Chart(Chart { descriptor, layout })
}

/// Identity of one pipeline invocation, minus the display height
#[derive(Debug, Clone)]
struct Fingerprint {
    data: Arc<Dataset>,
    kind: ChartKind,
    year_pivot: bool,
}

impl Fingerprint {
    fn matches(&self, data: &Arc<Dataset>, config: &ChartConfig) -> bool {
        Arc::ptr_eq(&self.data, data) && self.kind == config.kind && self.year_pivot == config.year_pivot
    }
}

/// Single-slot memo over `build_chart`, keyed by dataset identity, chart kind and pivot flag.
///
/// Holding the `Arc` keeps the dataset alive, so pointer identity cannot be reused
/// by a different dataset while it is cached.
#[derive(Debug, Default)]
pub struct ChartCache {
    entry: Option<(Fingerprint, ChartOutput)>,
    hits: u64,
    misses: u64,
}

impl ChartCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached output when the fingerprint is unchanged, recompute otherwise
    pub fn get_or_build(&mut self, data: &Arc<Dataset>, config: &ChartConfig) -> ChartOutput {
        if let Some((fingerprint, output)) = &mut self.entry {
            if fingerprint.matches(data, config) {
                self.hits += 1;
                tracing::debug!(hits = self.hits, "chart cache hit");
                if let ChartOutput::Chart(chart) = output {
                    chart.layout.container_height = config.height_px;
                }
                return output.clone();
            }
        }

        self.misses += 1;
        tracing::debug!(misses = self.misses, "chart cache miss");
        let output = build_chart(data, config);
        let fingerprint = Fingerprint {
            data: Arc::clone(data),
            kind: config.kind,
            year_pivot: config.year_pivot,
        };
        self.entry = Some((fingerprint, output.clone()));
        output
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    fn make_data() -> Dataset {
        Dataset::new(vec![
            Record::new().with("state", "A").with("cases_reported", 10),
            Record::new().with("state", "B").with("cases_reported", 30),
            Record::new().with("state", "A").with("cases_reported", 20),
        ])
    }

    #[test]
    fn test_build_chart_ranks_and_averages() {
        let output = build_chart(&make_data(), &ChartConfig::default());
        let chart = output.chart().unwrap();
        assert_eq!(chart.descriptor.labels, vec!["B", "A"]);
        assert_eq!(chart.descriptor.series[0].values, vec![30.0, 15.0]);
        assert!(!chart.layout.needs_horizontal_scroll);
    }

    #[test]
    fn test_sentinels() {
        let config = ChartConfig::default();
        assert_eq!(
            build_chart(&Dataset::default(), &config),
            ChartOutput::Empty(EmptyReason::EmptyDataset)
        );
        let no_metric = Dataset::new(vec![Record::new().with("state", "A").with("id", 4)]);
        assert_eq!(
            build_chart(&no_metric, &config),
            ChartOutput::Empty(EmptyReason::NoMetricField)
        );
    }

    #[test]
    fn test_cache_hits_on_same_identity() {
        let data = Arc::new(make_data());
        let mut cache = ChartCache::new();
        let config = ChartConfig::new(ChartKind::Pie);

        let first = cache.get_or_build(&data, &config);
        let second = cache.get_or_build(&data, &config.clone().with_height(500));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(first.chart().unwrap().descriptor, second.chart().unwrap().descriptor);
        assert_eq!(second.chart().unwrap().layout.container_height, 500);
    }

    #[test]
    fn test_cache_misses_on_change() {
        let data = Arc::new(make_data());
        let equal_copy = Arc::new(make_data());
        let mut cache = ChartCache::new();
        let config = ChartConfig::default();

        cache.get_or_build(&data, &config);
        cache.get_or_build(&equal_copy, &config);
        cache.get_or_build(&equal_copy, &ChartConfig::new(ChartKind::Line));
        cache.get_or_build(&equal_copy, &ChartConfig::new(ChartKind::Line).with_year_pivot(true));
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 4);

        cache.invalidate();
        cache.get_or_build(&equal_copy, &ChartConfig::new(ChartKind::Line).with_year_pivot(true));
        assert_eq!(cache.misses(), 5);
    }
}
