use thiserror::Error;

/// Errors that can occur while finding or downloading an icon.
///
/// Every variant is terminal for the current lookup. Callers are expected to
/// log the error and carry on without an icon.
#[derive(Debug, Error)]
pub enum IconError {
    /// Network-level error (DNS, connection, TLS, timeout)
    #[error("icon: unable to download {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a 5xx status
    #[error("icon: unable to download {url}: status={status}")]
    ServerFailure { url: String, status: u16 },
    /// The response body could not be read to the end
    #[error("icon: unable to read response from {url}: {source}")]
    Read {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Response body exceeded the configured size limit
    #[error("icon: response from {url} exceeds {limit} bytes")]
    ResponseTooLarge { url: String, limit: usize },
    /// The downloaded or decoded icon has no bytes
    #[error("icon: icon is empty, source={location}")]
    EmptyContent { location: String },
    /// A URL could not be joined or resolved
    #[error("icon: {reason}: {url:?}")]
    MalformedUrl { url: String, reason: String },
    /// A `data:` URL could not be decoded into an image
    #[error("icon: invalid data URL {value:?}: {kind}")]
    MalformedDataUrl {
        value: String,
        #[source]
        kind: DataUrlError,
    },
    /// The HTML page could not be turned into a document
    #[error("icon: unable to read document: {0}")]
    Parse(String),
    /// The HTTP client could not be built (bad user agent, proxy URL, TLS setup)
    #[error("icon: unable to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl IconError {
    /// HTTP status carried by a server failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            IconError::ServerFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Why a `data:` URL was rejected.
#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("missing data: prefix")]
    MissingPrefix,
    #[error("no comma")]
    MissingComma,
    #[error("invalid media type {0:?}")]
    InvalidMediaType(String),
    #[error("unsupported encoding {0:?}")]
    UnsupportedEncoding(String),
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("invalid percent-encoding")]
    InvalidEscape,
}
