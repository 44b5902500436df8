use thiserror::Error;

/// Failure to retrieve a page. Nothing here is retried; callers decide.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("network error: {0}")]
    Network(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("charset error: {0}")]
    Charset(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConnectTimeout | Self::RequestTimeout)
    }

    /// Upstream HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_request() || err.is_connect() {
            Self::Network(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
