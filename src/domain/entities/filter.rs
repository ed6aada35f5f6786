use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
}

impl FilterCondition {
    pub const ALL: [FilterCondition; 4] = [
        FilterCondition::Equals,
        FilterCondition::Contains,
        FilterCondition::GreaterThan,
        FilterCondition::LessThan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterCondition::Equals => "equals",
            FilterCondition::Contains => "contains",
            FilterCondition::GreaterThan => "greater_than",
            FilterCondition::LessThan => "less_than",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cond| cond.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterCondition::Equals => "=",
            FilterCondition::Contains => "contains",
            FilterCondition::GreaterThan => ">",
            FilterCondition::LessThan => "<",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub condition: FilterCondition,
    pub value: String,
}

impl FilterPredicate {
    pub fn new(condition: FilterCondition, value: impl Into<String>) -> Self {
        Self {
            condition,
            value: value.into(),
        }
    }
}

/// Active column predicates, at most one per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, FilterPredicate>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, predicate: FilterPredicate) -> Self {
        self.set(column, predicate);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, predicate: FilterPredicate) {
        self.0.insert(column.into(), predicate);
    }

    pub fn remove(&mut self, column: &str) -> Option<FilterPredicate> {
        self.0.remove(column)
    }

    pub fn get(&self, column: &str) -> Option<&FilterPredicate> {
        self.0.get(column)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterPredicate)> {
        self.0.iter()
    }

    /// Drops predicates on columns that are not in `headers`.
    pub fn retain_columns(&mut self, headers: &[String]) {
        self.0.retain(|column, _| headers.contains(column));
    }
}
