use crate::data::{Dataset, Record};
use crate::ir::ResolvedFields;

/// Fields that never act as the inferred label or metric
pub const EXCLUDED_FIELDS: [&str; 8] = [
    "_id",
    "id",
    "name",
    "title",
    "description",
    "category",
    "type",
    "date",
];

/// Metric fields preferred over declaration order, highest priority first
pub const METRIC_PRIORITY: [&str; 5] = [
    "cases_reported",
    "literacy_rate",
    "avg_aqi",
    "power_consumption_gwh",
    "deaths",
];

pub const PREFERRED_LABEL: &str = "state";

pub fn is_excluded(field: &str) -> bool {
    EXCLUDED_FIELDS.contains(&field)
}

/// Pick label and metric fields for the dataset.
/// Returns `None` if the dataset is empty or the first record has no usable numeric field.
pub fn resolve_fields(data: &Dataset) -> Option<ResolvedFields> {
    data.first().and_then(resolve_record)
}

/// Pick label and metric fields from a single representative record
pub fn resolve_record(record: &Record) -> Option<ResolvedFields> {
    let numeric_fields: Vec<String> = record
        .iter()
        .filter(|(k, v)| v.is_number() && !is_excluded(k))
        .map(|(k, _)| k.to_string())
        .collect();

    let string_fields: Vec<String> = record
        .iter()
        .filter(|(k, v)| v.is_text() && !is_excluded(k))
        .map(|(k, _)| k.to_string())
        .collect();

    let metric_field = METRIC_PRIORITY
        .iter()
        .find(|m| numeric_fields.iter().any(|f| f == *m))
        .map(|m| m.to_string())
        .or_else(|| numeric_fields.first().cloned())?;

    // Label: `state`, else first string field, else first field of any type
    let label_field = if string_fields.iter().any(|f| f == PREFERRED_LABEL) {
        PREFERRED_LABEL.to_string()
    } else if let Some(first) = string_fields.first() {
        first.clone()
    } else {
        // A metric exists, so the record has at least one field
        record.keys().next()?.to_string()
    };

    tracing::debug!(label = %label_field, metric = %metric_field, "resolved chart fields");

    Some(ResolvedFields {
        label_field,
        metric_field,
        numeric_fields,
        string_fields,
    })
}
