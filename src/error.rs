use thiserror::Error;

/// Errors raised while talking to the member store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the credentials
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store rejected or failed a well-formed query
    #[error("Query error: {message}")]
    Query {
        /// SQLSTATE code reported by the server, when available
        code: Option<String>,
        message: String,
    },

    /// Anything else, e.g. a row that could not be decoded
    #[error("Unexpected store error: {0}")]
    Unexpected(String),
}

impl StoreError {
    /// Detail string exposed to API clients.
    ///
    /// Connection failures expose nothing; the detail only goes to the logs.
    pub fn client_details(&self) -> Option<String> {
        match self {
            StoreError::Connection(_) => None,
            StoreError::Query { code, message } => {
                Some(code.clone().unwrap_or_else(|| message.clone()))
            }
            StoreError::Unexpected(message) => Some(message.clone()),
        }
    }
}

/// Errors returned by the API handlers.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The `email` query parameter was missing or blank
    #[error("Email parameter is required.")]
    MissingEmail,

    /// The member store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
