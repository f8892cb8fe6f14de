use std::collections::{BTreeMap, BTreeSet, HashMap};
use crate::data::{Dataset, Record, Value};
use crate::ir::{Aggregated, Group, PivotTable, ResolvedFields};

pub const YEAR_FIELD: &str = "year";
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Main entry point: group records and reduce each group to its mean.
///
/// Year-pivot mode needs both the caller's flag and at least one record carrying a year.
pub fn aggregate(data: &Dataset, fields: &ResolvedFields, year_pivot: bool) -> Aggregated {
    if year_pivot && has_year_data(data) {
        let table = pivot_by_year(data, fields);
        tracing::debug!(
            years = table.years.len(),
            labels = table.labels.len(),
            "aggregated in year-pivot mode"
        );
        Aggregated::YearPivot(table)
    } else {
        let groups = group_by_label(data, fields);
        tracing::debug!(groups = groups.len(), "aggregated in simple mode");
        Aggregated::Simple(groups)
    }
}

pub fn has_year_data(data: &Dataset) -> bool {
    data.records
        .iter()
        .any(|r| r.get(YEAR_FIELD).is_some_and(Value::is_truthy))
}

/// Label used when a record has no usable label value.
/// `index` is the record's 0-based position in the original dataset.
pub fn placeholder_label(index: usize) -> String {
    format!("Item {}", index + 1)
}

fn label_of(record: &Record, index: usize, label_field: &str) -> String {
    record
        .get(label_field)
        .and_then(Value::to_label)
        .unwrap_or_else(|| placeholder_label(index))
}

/// Missing, non-numeric and non-finite metric values all count as zero
fn metric_of(record: &Record, metric_field: &str) -> f64 {
    record
        .get(metric_field)
        .and_then(Value::as_number)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Any truthy `year` value keys a series, so `Bool(true)` becomes the year `"true"`
fn year_of(record: &Record) -> String {
    match record.get(YEAR_FIELD) {
        Some(v) if v.is_truthy() => v.to_string(),
        _ => UNKNOWN_YEAR.to_string(),
    }
}

/// Group records by stringified label, keeping first-encountered order
pub fn group_by_label(data: &Dataset, fields: &ResolvedFields) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (idx, record) in data.records.iter().enumerate() {
        let label = label_of(record, idx, &fields.label_field);
        let value = metric_of(record, &fields.metric_field);

        let pos = *positions.entry(label.clone()).or_insert_with(|| {
            groups.push(Group::new(label, None));
            groups.len() - 1
        });
        groups[pos].values.push(value);
    }

    groups
}

/// Two-level grouping by (year, label) into a dense table of means.
/// Combinations with no contributing record count as a single zero.
pub fn pivot_by_year(data: &Dataset, fields: &ResolvedFields) -> PivotTable {
    let mut cells: BTreeMap<(String, String), Group> = BTreeMap::new();
    let mut years = BTreeSet::new();
    let mut labels = BTreeSet::new();

    for (idx, record) in data.records.iter().enumerate() {
        let year = year_of(record);
        let label = label_of(record, idx, &fields.label_field);
        let value = metric_of(record, &fields.metric_field);

        years.insert(year.clone());
        labels.insert(label.clone());
        cells
            .entry((year.clone(), label.clone()))
            .or_insert_with(|| Group::new(label, Some(year)))
            .values
            .push(value);
    }

    let years: Vec<String> = years.into_iter().collect();
    let labels: Vec<String> = labels.into_iter().collect();

    let means = years
        .iter()
        .map(|year| {
            labels
                .iter()
                .map(|label| {
                    cells
                        .get(&(year.clone(), label.clone()))
                        .map(Group::mean)
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    PivotTable { years, labels, means }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_fields;

    fn make_data() -> Dataset {
        Dataset::new(vec![
            Record::new().with("state", "A").with("year", 2020).with("cases_reported", 10),
            Record::new().with("state", "B").with("year", 2021).with("cases_reported", 30),
            Record::new().with("state", "A").with("year", 2020).with("cases_reported", 20),
            Record::new().with("state", "A").with("year", 2021).with("cases_reported", 5),
        ])
    }

    #[test]
    fn test_simple_grouping_means() {
        let data = make_data();
        let fields = resolve_fields(&data).unwrap();
        let groups = group_by_label(&data, &fields);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "A");
        assert_eq!(groups[0].values, vec![10.0, 20.0, 5.0]);
        assert_eq!(groups[0].mean(), 35.0 / 3.0);
        assert_eq!(groups[1].label, "B");
        assert_eq!(groups[1].mean(), 30.0);
    }

    #[test]
    fn test_placeholder_uses_true_index() {
        // Identical records must not collapse onto the first one's position
        let data = Dataset::new(vec![
            Record::new().with("state", "X").with("deaths", 1),
            Record::new().with("state", Value::Null).with("deaths", 2),
            Record::new().with("state", Value::Null).with("deaths", 2),
            Record::new().with("state", "").with("deaths", 3),
        ]);
        let fields = resolve_fields(&data).unwrap();
        let labels: Vec<String> = group_by_label(&data, &fields)
            .into_iter()
            .map(|g| g.label)
            .collect();
        assert_eq!(labels, vec!["X", "Item 2", "Item 3", "Item 4"]);
    }

    #[test]
    fn test_missing_metric_defaults_to_zero() {
        let data = Dataset::new(vec![
            Record::new().with("state", "A").with("deaths", 8),
            Record::new().with("state", "A"),
            Record::new().with("state", "A").with("deaths", "n/a"),
        ]);
        let fields = resolve_fields(&data).unwrap();
        let groups = group_by_label(&data, &fields);
        assert_eq!(groups[0].values, vec![8.0, 0.0, 0.0]);
    }

    #[test]
    fn test_year_pivot_fills_missing_cells() {
        let data = make_data();
        let fields = resolve_fields(&data).unwrap();
        let table = pivot_by_year(&data, &fields);
        assert_eq!(table.years, vec!["2020", "2021"]);
        assert_eq!(table.labels, vec!["A", "B"]);
        assert_eq!(table.means[0], vec![15.0, 0.0]);
        assert_eq!(table.means[1], vec![5.0, 30.0]);
    }

    #[test]
    fn test_missing_year_is_unknown() {
        let data = Dataset::new(vec![
            Record::new().with("state", "A").with("year", "2019").with("deaths", 4),
            Record::new().with("state", "B").with("deaths", 6),
        ]);
        let fields = resolve_fields(&data).unwrap();
        let table = pivot_by_year(&data, &fields);
        assert_eq!(table.years, vec!["2019", "Unknown"]);
        assert_eq!(table.means[1], vec![0.0, 6.0]);
    }

    #[test]
    fn test_boolean_year_keys_by_truthiness() {
        let data = Dataset::new(vec![
            Record::new().with("state", "A").with("year", true).with("deaths", 4),
            Record::new().with("state", "B").with("year", false).with("deaths", 6),
        ]);
        let fields = resolve_fields(&data).unwrap();
        let table = pivot_by_year(&data, &fields);
        assert_eq!(table.years, vec!["Unknown", "true"]);
    }

    #[test]
    fn test_pivot_requires_year_data() {
        let data = Dataset::new(vec![
            Record::new().with("state", "A").with("deaths", 4),
            Record::new().with("state", "B").with("year", 0).with("deaths", 6),
        ]);
        let fields = resolve_fields(&data).unwrap();
        assert!(!has_year_data(&data));
        assert!(matches!(aggregate(&data, &fields, true), Aggregated::Simple(_)));
        assert!(matches!(aggregate(&make_data(), &fields, true), Aggregated::YearPivot(_)));
        assert!(matches!(aggregate(&make_data(), &fields, false), Aggregated::Simple(_)));
    }
}
