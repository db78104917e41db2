use crate::error::HttpError;

/// Errors that can occur in the data layer.
#[derive(Debug)]
pub enum DataError {
    /// The engine rejected the statement because of a table constraint
    /// (foreign key, unique, not-null or check).
    Constraint(String),
    Database(Box<dyn std::error::Error + Send + Sync>),
}

impl DataError {
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Database(Box::new(err))
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Constraint(msg) => write!(f, "Constraint violated: {msg}"),
            DataError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<super::query::QueryError> for DataError {
    fn from(err: super::query::QueryError) -> Self {
        DataError::database(err)
    }
}

impl From<DataError> for HttpError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Constraint(msg) => HttpError::Conflict(msg),
            DataError::Database(e) => HttpError::Internal(e.to_string()),
        }
    }
}

/// Extension trait for converting `sqlx::Error` into `DataError`.
pub trait SqlxErrorExt {
    fn into_data_error(self) -> DataError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_data_error(self) -> DataError {
        use sqlx::error::ErrorKind;

        let constraint = match &self {
            sqlx::Error::Database(db) => matches!(
                db.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::UniqueViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            )
            .then(|| db.message().to_string()),
            _ => None,
        };

        if let Some(msg) = constraint {
            return DataError::Constraint(msg);
        }
        DataError::database(self)
    }
}

pub type SqlxResult<T> = Result<T, DataError>;
