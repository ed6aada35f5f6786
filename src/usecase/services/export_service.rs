use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::domain::entities::dataset::Record;
use crate::domain::entities::view_state::ViewState;
use crate::infra::export::{csv, json, xlsx};
use crate::usecase::ports::repo::DatasetRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Xlsx];

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "filtered_data.csv",
            ExportFormat::Json => "filtered_data.json",
            ExportFormat::Xlsx => "filtered_data.xlsx",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Xlsx => "Excel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ExportService {
    repo: Arc<dyn DatasetRepository>,
}

impl ExportService {
    pub fn new(repo: Arc<dyn DatasetRepository>) -> Self {
        Self { repo }
    }

    /// Every row of the current view, restricted to the visible columns.
    pub fn export(&self, format: ExportFormat, state: &ViewState) -> Result<ExportFile> {
        let headers = state.visible_columns(&self.repo.headers());
        let records: Vec<Record> = self
            .repo
            .view_records()
            .iter()
            .map(|record| record.project(&headers))
            .collect();

        let bytes = match format {
            ExportFormat::Csv => csv::serialize(&records, &headers).into_bytes(),
            ExportFormat::Json => json::to_json(&records)?.into_bytes(),
            ExportFormat::Xlsx => xlsx::to_xlsx(&records, &headers)?,
        };
        info!(
            format = format.extension(),
            rows = records.len(),
            columns = headers.len(),
            "exported view"
        );
        Ok(ExportFile {
            file_name: format.file_name(),
            bytes,
        })
    }
}
