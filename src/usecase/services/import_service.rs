use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::domain::error::ViewerError;
use crate::infra::import::csv::load;
use crate::usecase::ports::repo::{DatasetRepository, DatasetSummary};

pub struct ImportService {
    repo: Arc<dyn DatasetRepository>,
}

impl ImportService {
    pub fn new(repo: Arc<dyn DatasetRepository>) -> Self {
        Self { repo }
    }

    /// Rejected text leaves the current dataset untouched.
    pub fn import_text(&self, text: &str) -> Result<DatasetSummary, ViewerError> {
        let dataset = load(text).inspect_err(|err| warn!(%err, "rejected csv upload"))?;
        let summary = self.repo.replace_dataset(dataset);
        info!(
            columns = summary.headers.len(),
            rows = summary.row_count,
            "loaded dataset"
        );
        Ok(summary)
    }

    pub fn import_file(&self, path: &Path) -> Result<DatasetSummary> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read csv: {}", path.display()))?;
        self.import_text(&text)
            .with_context(|| format!("failed to import csv: {}", path.display()))
    }
}
