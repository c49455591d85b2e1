//! Query validation errors

/// The operation a query requested on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sort,
    Filter,
    Group,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Sort => f.write_str("sort"),
            Operation::Filter => f.write_str("filter"),
            Operation::Group => f.write_str("group"),
        }
    }
}

/// Problems found by strict validation of a [`QueryState`](crate::query::QueryState).
///
/// Derivation itself never fails: a zero page is read as page 1 and a
/// disallowed operation is skipped. These errors exist for callers that want
/// to surface such input instead of silently normalizing it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Pages are 1-based.
    #[error("page must be at least 1")]
    ZeroPage,

    #[error("page size must be at least 1")]
    ZeroPageSize,

    /// The date label format contains an invalid strftime specifier.
    #[error("invalid date format '{format}'")]
    InvalidDateFormat { format: String },

    /// The query names a field that no descriptor declares.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// The field exists but does not allow the requested operation.
    #[error("field '{field}' does not allow {operation}")]
    NotAllowed { field: String, operation: Operation },
}

impl QueryError {
    /// Creates a new unknown field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Creates a new disallowed operation error.
    pub fn not_allowed(field: impl Into<String>, operation: Operation) -> Self {
        Self::NotAllowed {
            field: field.into(),
            operation,
        }
    }
}
