use serde::Serialize;
use crate::data::Dataset;
use crate::ChartKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub recommended: ChartKind,
    pub alternatives: Vec<ChartKind>,
}

impl Recommendation {
    fn new(recommended: ChartKind, alternatives: &[ChartKind]) -> Self {
        Self {
            recommended,
            alternatives: alternatives.to_vec(),
        }
    }
}

/// Suggest a chart kind from the shape of the first record.
/// Unlike field resolution this looks at every field, excluded ones included.
pub fn recommend_chart_kind(data: &Dataset) -> Recommendation {
    use ChartKind::*;

    let Some(sample) = data.first() else {
        return Recommendation::new(Bar, &[Line, Pie]);
    };

    let numeric = sample.iter().filter(|(_, v)| v.is_number()).count();
    let categorical = sample.iter().filter(|(_, v)| v.is_text()).count();
    let temporal = sample.keys().any(|k| k == "date" || k == "year");

    if temporal && numeric > 0 {
        Recommendation::new(Line, &[Bar])
    } else if categorical == 1 && numeric == 1 {
        Recommendation::new(Bar, &[Pie, Doughnut])
    } else if numeric >= 2 {
        Recommendation::new(Line, &[Bar])
    } else {
        Recommendation::new(Bar, &[Pie, Line])
    }
}
