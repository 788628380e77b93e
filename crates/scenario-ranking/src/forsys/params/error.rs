use crate::forsys::repository::RepositoryError;

/// Failure raised while reading or assembling request parameters.
///
/// The first failing field aborts assembly; messages are surfaced to callers
/// verbatim.
#[derive(Debug, thiserror::Error)]
pub enum RequestParamsError {
    #[error("{0}")]
    InvalidEnumValue(String),
    #[error("{0}")]
    InvalidParameter(String),
    #[error("{0}")]
    MissingField(String),
    #[error("{0}")]
    EmptyList(String),
    #[error("{0}")]
    GeometryConstruction(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PermissionDenied(String),
    #[error("missing url parameter, {0}")]
    MissingParameter(&'static str),
    #[error("request is not associated with an authenticated user")]
    Unauthenticated,
    #[error("url parameter, {field}, is not valid JSON: {source}")]
    MalformedField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("planning records unavailable: {0}")]
    Repository(String),
}

impl From<RepositoryError> for RequestParamsError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound { record } => {
                Self::NotFound(format!("{record} matching query does not exist."))
            }
            RepositoryError::Unavailable(reason) => Self::Repository(reason),
        }
    }
}
