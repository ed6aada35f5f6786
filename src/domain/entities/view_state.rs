use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::entities::dataset::SortState;
use crate::domain::entities::filter::FilterSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartAxes {
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub y: Option<String>,
}

impl ChartAxes {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}

/// Everything that shapes the current view of a dataset, and the snapshot carried
/// by shareable links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    #[serde(default)]
    pub filters: FilterSet,
    #[serde(default)]
    pub hidden_columns: BTreeSet<String>,
    #[serde(default)]
    pub sort: SortState,
    #[serde(default)]
    pub chart: ChartAxes,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
}

impl ViewState {
    pub fn visible_columns(&self, headers: &[String]) -> Vec<String> {
        headers
            .iter()
            .filter(|header| !self.hidden_columns.contains(*header))
            .cloned()
            .collect()
    }

    /// Drops references to columns that are not part of `headers`.
    pub fn retain_columns(&mut self, headers: &[String]) {
        self.filters.retain_columns(headers);
        self.hidden_columns.retain(|column| headers.contains(column));
        if let Some(column) = &self.sort.column {
            if !headers.contains(column) {
                self.sort = SortState::default();
            }
        }
        if self.chart.x.as_ref().is_some_and(|x| !headers.contains(x)) {
            self.chart.x = None;
        }
        if self.chart.y.as_ref().is_some_and(|y| !headers.contains(y)) {
            self.chart.y = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::dataset::SortDirection;
    use crate::domain::entities::filter::{FilterCondition, FilterPredicate};

    #[test]
    fn serializes_filters_keyed_by_column() {
        let state = ViewState {
            filters: FilterSet::new().with(
                "age",
                FilterPredicate::new(FilterCondition::GreaterThan, "26"),
            ),
            ..ViewState::default()
        };

        let json = serde_json::to_value(&state).expect("state should serialize");

        assert_eq!(json["filters"]["age"]["condition"], "greater_than");
        assert_eq!(json["filters"]["age"]["value"], "26");
        assert!(json.get("search").is_none());
    }

    #[test]
    fn retain_columns_forgets_unknown_columns() {
        let mut state = ViewState {
            filters: FilterSet::new()
                .with("gone", FilterPredicate::new(FilterCondition::Equals, "x")),
            hidden_columns: ["gone".to_string(), "name".to_string()].into(),
            sort: SortState::by("gone", SortDirection::Desc),
            chart: ChartAxes::new("age", "gone"),
            search: String::new(),
        };

        state.retain_columns(&["name".to_string(), "age".to_string()]);

        assert!(state.filters.is_empty());
        assert_eq!(state.hidden_columns, ["name".to_string()].into());
        assert_eq!(state.sort, SortState::default());
        assert_eq!(state.chart.x.as_deref(), Some("age"));
        assert_eq!(state.chart.y, None);
    }
}
