use thiserror::Error;

/// Point in the request lifecycle where a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Build,
    Send,
    ReadBody,
}

impl RequestStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestStage::Build => "build",
            RequestStage::Send => "send",
            RequestStage::ReadBody => "read-body",
        }
    }
}

/// Failure of a single request attempt. Client setup errors are not here;
/// they surface once at startup as `AppError::BuildClient`.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid HTTP method '{method}': {source}")]
    InvalidMethod {
        method: String,
        #[source]
        source: http::method::InvalidMethod,
    },
    #[error("Failed to build request: {source}")]
    BuildRequest {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request failed: {source}")]
    Send {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body: {source}")]
    ReadBody {
        #[source]
        source: reqwest::Error,
    },
}

impl HttpError {
    /// Stage a per-request failure belongs to.
    #[must_use]
    pub const fn stage(&self) -> RequestStage {
        match self {
            HttpError::InvalidMethod { .. } | HttpError::BuildRequest { .. } => {
                RequestStage::Build
            }
            HttpError::Send { .. } => RequestStage::Send,
            HttpError::ReadBody { .. } => RequestStage::ReadBody,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            HttpError::Send { source } | HttpError::ReadBody { source } => source.is_timeout(),
            HttpError::InvalidMethod { .. } | HttpError::BuildRequest { .. } => false,
        }
    }
}
