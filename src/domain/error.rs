use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("CSV needs a header row and at least one data row (found {lines} line(s))")]
    TooFewLines { lines: usize },
    #[error("row {row} has {found} columns, header has {expected}")]
    ColumnCount {
        row: u64,
        found: usize,
        expected: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("malformed CSV: {0}")]
    MalformedInput(#[from] MalformedInput),
    #[error("shared view state could not be decoded: {0}")]
    StateDecode(String),
    #[error("no dataset loaded")]
    NoDataset,
    #[error("row {0} does not exist")]
    RowOutOfRange(usize),
    #[error("unknown column \"{0}\"")]
    UnknownColumn(String),
}
