use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("CoerceError: {0}")]
    Coerce(#[from] CoerceError),
    #[error("JsonError: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raised only by the checked conversion layer (`Value::try_*` and the JSON
/// entry points). The lossy accessors never fail, they degrade to defaults.
#[derive(Error, Debug)]
pub enum CoerceError {
    #[error("expected a string, found {actual}")]
    NotAString { actual: &'static str },
    #[error("expected an integer, found {actual}")]
    NotAnInt { actual: &'static str },
    #[error("expected a boolean, found {actual}")]
    NotABool { actual: &'static str },
    #[error("expected a mapping, found {actual}")]
    NotAMapping { actual: &'static str },
}
