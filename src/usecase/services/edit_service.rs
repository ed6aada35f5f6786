use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::edit::CellEdit;
use crate::domain::error::ViewerError;
use crate::usecase::ports::repo::DatasetRepository;

pub struct EditService {
    repo: Arc<dyn DatasetRepository>,
}

impl EditService {
    pub fn new(repo: Arc<dyn DatasetRepository>) -> Self {
        Self { repo }
    }

    pub fn apply_edit(&self, edit: CellEdit) -> Result<(), ViewerError> {
        debug!(row = edit.cell.row_idx, column = %edit.cell.column, "editing cell");
        self.repo
            .update_cell(edit.cell.row_idx, &edit.cell.column, edit.value)
    }
}
