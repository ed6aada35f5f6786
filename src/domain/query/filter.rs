use crate::domain::entities::dataset::{Dataset, Record, View};
use crate::domain::entities::filter::{FilterCondition, FilterPredicate, FilterSet};

/// Finite float value of a cell, if it has one.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// True when every value of `column` is a finite number. Empty datasets are not numeric.
pub fn is_numeric(column: &str, dataset: &Dataset) -> bool {
    !dataset.is_empty()
        && dataset
            .records
            .iter()
            .all(|record| parse_number(record.value(column)).is_some())
}

pub fn numeric_columns(dataset: &Dataset) -> Vec<String> {
    dataset
        .headers
        .iter()
        .filter(|header| is_numeric(header, dataset))
        .cloned()
        .collect()
}

pub fn evaluate(record: &Record, column: &str, predicate: &FilterPredicate) -> bool {
    let cell = record.value(column);
    match predicate.condition {
        FilterCondition::Equals => cell.to_lowercase() == predicate.value.to_lowercase(),
        FilterCondition::Contains => cell
            .to_lowercase()
            .contains(&predicate.value.to_lowercase()),
        FilterCondition::GreaterThan => compare_numbers(cell, &predicate.value, |a, b| a > b),
        FilterCondition::LessThan => compare_numbers(cell, &predicate.value, |a, b| a < b),
    }
}

// Non-numeric operands behave like NaN: every comparison is false.
fn compare_numbers(cell: &str, operand: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (parse_number(cell), parse_number(operand)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

pub fn matches_filters(record: &Record, filters: &FilterSet) -> bool {
    filters
        .iter()
        .all(|(column, predicate)| evaluate(record, column, predicate))
}

pub fn matches_search(record: &Record, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record
        .values()
        .any(|value| value.to_lowercase().contains(&needle))
}

pub fn apply_filter_set(dataset: &Dataset, filters: &FilterSet) -> View {
    select(dataset, |record| matches_filters(record, filters))
}

pub fn apply_global_search(dataset: &Dataset, term: &str) -> View {
    select(dataset, |record| matches_search(record, term))
}

/// Column filters and global search combined with AND.
pub fn apply_query(dataset: &Dataset, filters: &FilterSet, term: &str) -> View {
    if term.is_empty() {
        return apply_filter_set(dataset, filters);
    }
    if filters.is_empty() {
        return apply_global_search(dataset, term);
    }
    select(dataset, |record| {
        matches_filters(record, filters) && matches_search(record, term)
    })
}

fn select(dataset: &Dataset, keep: impl Fn(&Record) -> bool) -> View {
    View::from_rows(
        dataset
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| keep(record))
            .map(|(idx, _)| idx)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Dataset {
        let headers = vec!["name".to_string(), "age".to_string()];
        let records = vec![
            [("name", "Bob"), ("age", "30")].into_iter().collect(),
            [("name", "Al"), ("age", "25")].into_iter().collect(),
            [("name", "Alice"), ("age", "n/a")].into_iter().collect(),
        ];
        Dataset::new(headers, records)
    }

    #[test]
    fn greater_than_keeps_larger_numbers() {
        let dataset = people();
        let filters = FilterSet::new().with(
            "age",
            FilterPredicate::new(FilterCondition::GreaterThan, "26"),
        );

        let view = apply_filter_set(&dataset, &filters);

        assert_eq!(view.rows(), &[0]);
    }

    #[test]
    fn numeric_comparison_with_text_is_false() {
        let dataset = people();
        let record = &dataset.records[2];

        assert!(!evaluate(
            record,
            "age",
            &FilterPredicate::new(FilterCondition::LessThan, "100")
        ));
        assert!(!evaluate(
            &dataset.records[0],
            "age",
            &FilterPredicate::new(FilterCondition::GreaterThan, "abc")
        ));
    }

    #[test]
    fn equals_and_contains_ignore_case() {
        let dataset = people();
        let equals = FilterSet::new().with(
            "name",
            FilterPredicate::new(FilterCondition::Equals, "bob"),
        );
        let contains = FilterSet::new().with(
            "name",
            FilterPredicate::new(FilterCondition::Contains, "AL"),
        );

        assert_eq!(apply_filter_set(&dataset, &equals).rows(), &[0]);
        assert_eq!(apply_filter_set(&dataset, &contains).rows(), &[1, 2]);
    }

    #[test]
    fn predicates_are_combined_with_and() {
        let dataset = people();
        let filters = FilterSet::new()
            .with(
                "name",
                FilterPredicate::new(FilterCondition::Contains, "al"),
            )
            .with(
                "age",
                FilterPredicate::new(FilterCondition::LessThan, "26"),
            );

        assert_eq!(apply_filter_set(&dataset, &filters).rows(), &[1]);
    }

    #[test]
    fn empty_search_keeps_everything() {
        let dataset = people();
        assert_eq!(apply_global_search(&dataset, "").len(), 3);
        assert_eq!(apply_global_search(&dataset, "N/A").rows(), &[2]);
    }

    #[test]
    fn search_composes_with_filters() {
        let dataset = people();
        let filters = FilterSet::new().with(
            "name",
            FilterPredicate::new(FilterCondition::Contains, "a"),
        );

        assert_eq!(apply_query(&dataset, &filters, "25").rows(), &[1]);
    }

    #[test]
    fn numeric_detection_requires_every_value() {
        let dataset = people();
        assert!(!is_numeric("age", &dataset));

        let mut trimmed = dataset.clone();
        trimmed.records.pop();
        assert!(is_numeric("age", &trimmed));
        assert_eq!(numeric_columns(&trimmed), vec!["age".to_string()]);
        assert!(!is_numeric("age", &Dataset::default()));
    }
}
