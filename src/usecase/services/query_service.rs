use std::sync::Arc;

use crate::domain::entities::dataset::{PageResult, Record};
use crate::domain::entities::view_state::ViewState;
use crate::domain::error::ViewerError;
use crate::domain::query::page::Pagination;
use crate::usecase::ports::repo::DatasetRepository;

pub struct QueryService {
    repo: Arc<dyn DatasetRepository>,
}

impl QueryService {
    pub fn new(repo: Arc<dyn DatasetRepository>) -> Self {
        Self { repo }
    }

    pub fn refresh(&self, state: &ViewState) -> Result<usize, ViewerError> {
        self.repo.refresh_view(state)
    }

    pub fn view_len(&self) -> usize {
        self.repo.view_len()
    }

    pub fn query_page(&self, state: &ViewState, pagination: &Pagination) -> PageResult {
        let total_rows = self.repo.view_len();
        PageResult {
            columns: state.visible_columns(&self.repo.headers()),
            rows: self.repo.view_page(pagination),
            page: pagination.current(),
            total_pages: pagination.total_pages(total_rows),
            total_rows,
        }
    }

    pub fn view_records(&self) -> Vec<Record> {
        self.repo.view_records()
    }

    pub fn headers(&self) -> Vec<String> {
        self.repo.headers()
    }

    pub fn numeric_columns(&self) -> Vec<String> {
        self.repo.numeric_columns()
    }
}
