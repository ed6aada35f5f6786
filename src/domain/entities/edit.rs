#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub row_idx: usize,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub cell: CellKey,
    pub value: String,
}

impl CellEdit {
    pub fn new(row_idx: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            cell: CellKey {
                row_idx,
                column: column.into(),
            },
            value: value.into(),
        }
    }
}
