use thiserror::Error;

/// HTTP error classification
#[derive(Error, Debug, Clone)]
pub enum HttpErrorKind {
    #[error("Client error: {message}")]
    Client { message: String },
    #[error("Server error: {message}")]
    Server { message: String },
}

/// Main crate error type
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Non-success HTTP status from the tracking API
    #[error("HTTP error (status {status}): {kind}")]
    Http { status: u16, kind: HttpErrorKind },

    /// Transport-level request failure (DNS, TLS, timeout, ...)
    #[error("Generic error: {0}")]
    GenericRequest(String),

    /// JSON parse error
    #[error("Json parse error: {0}")]
    JsonParse(String),

    /// Population table could not be opened or read
    #[error("Failed to read population table '{path}': {message}")]
    PopulationSource { path: String, message: String },

    /// Population column is not an integer
    #[error("Invalid population for state {state}: {value:?}")]
    InvalidPopulation { state: String, value: String },

    /// Population row uses the aggregate entry's key
    #[error("State code {0:?} is reserved for the nationwide aggregate")]
    ReservedStateCode(String),

    /// `dateChecked` could not be parsed
    #[error("Invalid timestamp {value:?} for state {state}: {message}")]
    InvalidTimestamp {
        state: String,
        value: String,
        message: String,
    },

    /// Snapshot references a state missing from the population table
    #[error("Unknown state code: {0}")]
    UnknownState(String),

    /// Config file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create an HTTP client error
    pub fn client_error(status: u16, message: String) -> Self {
        Error::Http {
            status,
            kind: HttpErrorKind::Client { message },
        }
    }

    /// Create an HTTP server error
    pub fn server_error(status: u16, message: String) -> Self {
        Error::Http {
            status,
            kind: HttpErrorKind::Server { message },
        }
    }

    /// Create a JSON parse error
    pub fn json_parse(msg: impl Into<String>) -> Self {
        Error::JsonParse(msg.into())
    }

    /// HTTP status code, if this error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
