use thiserror::Error;

pub type Result<T> = std::result::Result<T, CasError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CasError {
    #[error("cannot parse expression `{input}`: {cause}")]
    Parse { input: String, cause: String },
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("matrix rows have mismatched lengths (expected {expected}, found {found})")]
    RaggedMatrix { expected: usize, found: usize },
    #[error("matrix has no rows")]
    EmptyMatrix,
    #[error("determinant requires a square matrix, got {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },
    #[error("problem text is empty")]
    EmptyProblem,
}

impl CasError {
    pub fn parse(input: impl Into<String>, cause: impl Into<String>) -> Self {
        CasError::Parse {
            input: input.into(),
            cause: cause.into(),
        }
    }
}
