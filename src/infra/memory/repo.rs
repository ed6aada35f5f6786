use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::domain::entities::dataset::{Dataset, Record, View};
use crate::domain::entities::view_state::ViewState;
use crate::domain::error::ViewerError;
use crate::domain::query::filter::{apply_query, numeric_columns};
use crate::domain::query::page::Pagination;
use crate::domain::query::sort::apply_sort;
use crate::usecase::ports::repo::{DatasetRepository, DatasetSummary};

#[derive(Debug, Default)]
struct Store {
    dataset: Option<Dataset>,
    view: View,
}

#[derive(Debug, Default)]
pub struct MemoryRepo {
    store: RwLock<Store>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    // Every write completes before the guard drops, so a poisoned lock still holds
    // consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn summarize(dataset: &Dataset) -> DatasetSummary {
    DatasetSummary {
        headers: dataset.headers.clone(),
        row_count: dataset.len(),
    }
}

impl DatasetRepository for MemoryRepo {
    fn replace_dataset(&self, dataset: Dataset) -> DatasetSummary {
        let summary = summarize(&dataset);
        let mut store = self.write();
        store.view = View::all(&dataset);
        store.dataset = Some(dataset);
        summary
    }

    fn headers(&self) -> Vec<String> {
        self.read()
            .dataset
            .as_ref()
            .map(|dataset| dataset.headers.clone())
            .unwrap_or_default()
    }

    fn refresh_view(&self, state: &ViewState) -> Result<usize, ViewerError> {
        let mut store = self.write();
        let dataset = store.dataset.as_ref().ok_or(ViewerError::NoDataset)?;
        let filtered = apply_query(dataset, &state.filters, &state.search);
        let view = apply_sort(dataset, filtered, &state.sort);
        debug!(
            rows = view.len(),
            total = dataset.len(),
            filters = state.filters.len(),
            "refreshed view"
        );
        let len = view.len();
        store.view = view;
        Ok(len)
    }

    fn view_len(&self) -> usize {
        self.read().view.len()
    }

    fn view_page(&self, pagination: &Pagination) -> Vec<(usize, Record)> {
        let store = self.read();
        let Some(dataset) = store.dataset.as_ref() else {
            return Vec::new();
        };
        pagination
            .slice(store.view.rows())
            .iter()
            .filter_map(|idx| dataset.records.get(*idx).map(|record| (*idx, record.clone())))
            .collect()
    }

    fn view_records(&self) -> Vec<Record> {
        let store = self.read();
        match store.dataset.as_ref() {
            Some(dataset) => store.view.records(dataset).cloned().collect(),
            None => Vec::new(),
        }
    }

    fn update_cell(&self, row_idx: usize, column: &str, value: String) -> Result<(), ViewerError> {
        let mut store = self.write();
        let dataset = store.dataset.as_mut().ok_or(ViewerError::NoDataset)?;
        if !dataset.has_column(column) {
            return Err(ViewerError::UnknownColumn(column.to_string()));
        }
        let record = dataset
            .records
            .get_mut(row_idx)
            .ok_or(ViewerError::RowOutOfRange(row_idx))?;
        record.set(column, value);
        Ok(())
    }

    fn numeric_columns(&self) -> Vec<String> {
        self.read()
            .dataset
            .as_ref()
            .map(numeric_columns)
            .unwrap_or_default()
    }
}
