use thiserror::Error;

/// Failure reported by a [`Transport`](super::Transport).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request left but nothing came back (network down, CORS, timeout).
    #[error("no response received: {0}")]
    NoResponse(String),
    /// The request could not be built, e.g. an unparsable URL or body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// A request that could not be constructed. This is a bug at the call site,
/// never a remote failure, so it is the only error `ApiClient` returns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("request could not be built: {0}")]
    InvalidRequest(String),
    #[error("invalid request path {0:?}")]
    InvalidPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            TransportError::NoResponse("timeout".into()).to_string(),
            "no response received: timeout"
        );
        assert_eq!(
            ClientError::InvalidPath("datasets".into()).to_string(),
            "invalid request path \"datasets\""
        );
        let source: &dyn std::error::Error = &ClientError::InvalidRequest("bad body".into());
        assert_eq!(source.to_string(), "request could not be built: bad body");
    }
}
