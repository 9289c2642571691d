use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Unknown entity kind: {0}")]
    UnknownEntity(String),

    #[error("Cancelled by user")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::UnexpectedResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
