use thiserror::Error;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;

/// Failures raised by the statement writer and the record marshaller.
///
/// They travel wrapped inside [`Error`], use `downcast_ref::<SqlhError>()` to classify them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SqlhError {
    #[error("`{0}` is not a struct with named fields")]
    NotAStructType(String),

    #[error("Refusing to write an UPDATE without a WHERE clause")]
    MissingWhereClause,

    #[error("Column `{column}` has no inferable storage type, annotate it with `type = \"...\"`")]
    UnsupportedFieldType { column: String },

    #[error("Cannot convert {found} into {expected}")]
    FieldTypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("Expected {expected} columns but the row has {found}")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("The query returned no rows")]
    NoRows,

    #[error("The query returned more than one row")]
    MultipleRowsFound,
}
