use crate::domain::entities::dataset::{Dataset, Record};
use crate::domain::entities::view_state::ViewState;
use crate::domain::error::ViewerError;
use crate::domain::query::page::Pagination;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Owner of the loaded dataset and of the current filtered, sorted view.
pub trait DatasetRepository: Send + Sync {
    /// Swaps in a new dataset. The view resets to every row in file order.
    fn replace_dataset(&self, dataset: Dataset) -> DatasetSummary;
    fn headers(&self) -> Vec<String>;

    /// Recomputes the view from filters, search and sort. Returns the view length.
    fn refresh_view(&self, state: &ViewState) -> Result<usize, ViewerError>;
    fn view_len(&self) -> usize;
    fn view_page(&self, pagination: &Pagination) -> Vec<(usize, Record)>;
    fn view_records(&self) -> Vec<Record>;

    fn update_cell(&self, row_idx: usize, column: &str, value: String) -> Result<(), ViewerError>;
    fn numeric_columns(&self) -> Vec<String>;
}
