use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::Serialize;
use thiserror::Error;

/// Field-keyed validation failure. Every offending field carries one or
/// more messages; the whole operation is rejected before anything is
/// persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationError {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(|messages| messages.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(|key| key.as_str())
    }

    /* Ok if nothing was recorded, otherwise the collected errors. */
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .errors
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect::<Vec<String>>()
            .join("; ");
        write!(f, "{fields}")
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Error)]
#[error("{info}")]
pub struct QueryError {
    info: String,
}

impl QueryError {
    pub fn new(info: String) -> Self {
        Self { info }
    }
}

impl From<sqlx::Error> for QueryError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::RowNotFound => Self::new("Row not found".to_string()),
            sqlx::Error::PoolTimedOut => Self::new("Pool timed out".to_string()),
            sqlx::Error::PoolClosed => Self::new("Pool closed".to_string()),
            sqlx::Error::ColumnNotFound(e) => Self::new(format!("Column not found: {e}")),
            sqlx::Error::ColumnDecode { index, source } => {
                Self::new(format!("Column decode {index} ({source})"))
            }
            sqlx::Error::Database(e) => Self::new(format!("{e}")),
            e => Self::new(format!("{e}")),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Query(#[from] QueryError),
    #[error("{0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
}

impl Error {
    pub fn code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Query(_) => 500,
            Error::NotFound(_) => 404,
            Error::Unauthorized => 401,
        }
    }
}

impl warp::reject::Reject for Error {}
