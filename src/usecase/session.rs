use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::ViewerConfig;
use crate::domain::entities::dataset::{PageResult, Record};
use crate::domain::entities::edit::CellEdit;
use crate::domain::entities::filter::FilterPredicate;
use crate::domain::entities::view_state::{ChartAxes, ViewState};
use crate::domain::error::ViewerError;
use crate::domain::query::page::Pagination;
use crate::infra::chart::scatter::{render_scatter_svg, scatter_points, ScatterOptions};
use crate::infra::memory::repo::MemoryRepo;
use crate::infra::share::token;
use crate::usecase::ports::repo::{DatasetRepository, DatasetSummary};
use crate::usecase::services::edit_service::EditService;
use crate::usecase::services::export_service::{ExportFile, ExportFormat, ExportService};
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::query_service::QueryService;

/// The application state: one loaded dataset, how it is being viewed, and the
/// services that act on it. Every mutation recomputes the view before returning.
pub struct ViewerSession {
    import_service: ImportService,
    query_service: QueryService,
    edit_service: EditService,
    export_service: ExportService,
    state: ViewState,
    pagination: Pagination,
    share_base_url: String,
    loaded: bool,
    shared_pending: bool,
}

impl ViewerSession {
    pub fn new(repo: Arc<dyn DatasetRepository>, config: &ViewerConfig) -> Self {
        Self {
            import_service: ImportService::new(repo.clone()),
            query_service: QueryService::new(repo.clone()),
            edit_service: EditService::new(repo.clone()),
            export_service: ExportService::new(repo),
            state: ViewState::default(),
            pagination: Pagination::new(config.page_size),
            share_base_url: config.share_base_url.clone(),
            loaded: false,
            shared_pending: false,
        }
    }

    pub fn in_memory(config: &ViewerConfig) -> Self {
        Self::new(Arc::new(MemoryRepo::new()), config)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn headers(&self) -> Vec<String> {
        self.query_service.headers()
    }

    pub fn numeric_columns(&self) -> Vec<String> {
        self.query_service.numeric_columns()
    }

    /// Replaces the dataset and starts from a fresh view, unless a shared view was
    /// applied before any data was loaded.
    pub fn load_csv(&mut self, text: &str) -> Result<DatasetSummary, ViewerError> {
        let summary = self.import_service.import_text(text)?;
        self.after_load(&summary)?;
        Ok(summary)
    }

    pub fn load_file(&mut self, path: &std::path::Path) -> Result<DatasetSummary> {
        let summary = self.import_service.import_file(path)?;
        self.after_load(&summary)?;
        Ok(summary)
    }

    fn after_load(&mut self, summary: &DatasetSummary) -> Result<(), ViewerError> {
        self.loaded = true;
        if std::mem::take(&mut self.shared_pending) {
            self.state.retain_columns(&summary.headers);
        } else {
            self.state = ViewState::default();
        }
        if !self.state.chart.is_complete() {
            self.state.chart = self.default_axes();
        }
        self.refresh_and_reset()
    }

    fn default_axes(&self) -> ChartAxes {
        let mut numeric = self.numeric_columns().into_iter();
        ChartAxes {
            x: numeric.next(),
            y: numeric.next(),
        }
    }

    fn refresh(&mut self) -> Result<(), ViewerError> {
        if !self.loaded {
            return Ok(());
        }
        let len = self.query_service.refresh(&self.state)?;
        self.pagination.clamp(len);
        Ok(())
    }

    fn refresh_and_reset(&mut self) -> Result<(), ViewerError> {
        self.pagination.reset();
        self.refresh()
    }

    pub fn set_filter(
        &mut self,
        column: impl Into<String>,
        predicate: FilterPredicate,
    ) -> Result<(), ViewerError> {
        let column = column.into();
        let value = predicate.value.trim();
        if value.is_empty() {
            self.state.filters.remove(&column);
        } else {
            let predicate = FilterPredicate::new(predicate.condition, value);
            self.state.filters.set(column, predicate);
        }
        self.refresh_and_reset()
    }

    pub fn clear_filter(&mut self, column: &str) -> Result<(), ViewerError> {
        self.state.filters.remove(column);
        self.refresh_and_reset()
    }

    pub fn clear_filters(&mut self) -> Result<(), ViewerError> {
        self.state.filters.clear();
        self.refresh_and_reset()
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> Result<(), ViewerError> {
        self.state.search = term.into();
        self.refresh_and_reset()
    }

    pub fn toggle_sort(&mut self, column: &str) -> Result<(), ViewerError> {
        self.state.sort.toggle(column);
        self.refresh()
    }

    /// Hides a visible column or shows a hidden one. Returns true when now hidden.
    pub fn toggle_column(&mut self, column: &str) -> bool {
        if self.state.hidden_columns.remove(column) {
            false
        } else {
            self.state.hidden_columns.insert(column.to_string());
            true
        }
    }

    pub fn set_chart_axes(&mut self, x: Option<String>, y: Option<String>) {
        self.state.chart = ChartAxes { x, y };
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.query_service.view_len();
        self.pagination.next(len)
    }

    pub fn prev_page(&mut self) -> bool {
        self.pagination.prev()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let len = self.query_service.view_len();
        self.pagination.go_to(page, len)
    }

    pub fn edit_cell(
        &mut self,
        row_idx: usize,
        column: &str,
        value: impl Into<String>,
    ) -> Result<(), ViewerError> {
        self.edit_service
            .apply_edit(CellEdit::new(row_idx, column, value))?;
        self.refresh()
    }

    pub fn current_page(&self) -> PageResult {
        self.query_service
            .query_page(&self.state, &self.pagination)
    }

    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        let (Some(x), Some(y)) = (&self.state.chart.x, &self.state.chart.y) else {
            return Vec::new();
        };
        let records = self.view_records();
        scatter_points(&records, x, y)
    }

    /// SVG scatter plot of the chart axes over the whole view, if both axes are set.
    pub fn chart_svg(&self) -> Option<Result<String>> {
        let (Some(x), Some(y)) = (&self.state.chart.x, &self.state.chart.y) else {
            return None;
        };
        let points = self.chart_points();
        Some(render_scatter_svg(&points, &ScatterOptions::new(x, y)))
    }

    fn view_records(&self) -> Vec<Record> {
        if !self.loaded {
            return Vec::new();
        }
        self.query_service.view_records()
    }

    pub fn export(&self, format: ExportFormat) -> Result<ExportFile> {
        if !self.loaded {
            return Err(ViewerError::NoDataset.into());
        }
        self.export_service.export(format, &self.state)
    }

    pub fn share_link(&self) -> String {
        token::share_link(&self.share_base_url, &self.state)
    }

    /// Restores a shared view from a link or bare token. An undecodable token leaves
    /// the current view as it was.
    pub fn apply_shared_link(&mut self, input: &str) -> Result<(), ViewerError> {
        let mut state = token::state_from_link(input)
            .inspect_err(|err| warn!(%err, "discarding shared view state"))?;
        if self.loaded {
            state.retain_columns(&self.headers());
        }
        self.shared_pending = !self.loaded;
        self.state = state;
        info!("applied shared view state");
        self.refresh_and_reset()
    }
}
