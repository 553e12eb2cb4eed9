use http::Method;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type TokenReaderResult<T> = std::result::Result<T, TokenReaderError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid request : {0}")]
    Validation(#[from] ValidationError),
    #[error("request failed : {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {status} : {body}")]
    Provider { status: u16, body: String },
    #[error("response could not be decoded : {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response has no body")]
    MalformedResponse,
    #[error("invalid endpoint URL : {0}")]
    Config(#[from] url::ParseError),
    #[error("token acquisition failed : {0}")]
    TokenReader(#[from] TokenReaderError),
    #[error("I/O failed : {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status of a provider error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported request method {0}, only GET and POST are allowed.")]
    UnsupportedMethod(Method),
    #[error("user credentials are not set.")]
    MissingUserCredentials,
    #[error("authorization flow is {0}, expected {1}.")]
    InvalidFlowState(&'static str, &'static str),
}

#[derive(Error, Debug, Clone)]
pub enum TokenReaderError {
    #[error("response has malformed format: not found {0} in {1}")]
    TokenKeyNotFound(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_status() {
        let err = Error::Provider {
            status: 401,
            body: r#"{"errors":[{"code":32}]}"#.into(),
        };
        assert_eq!(err.status_code(), Some(401));
        assert!(err.is_unauthorized());
        assert_eq!(Error::MalformedResponse.status_code(), None);
    }
}
