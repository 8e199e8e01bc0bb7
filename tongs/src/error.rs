use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("element '#{0}' not found")]
    MissingElement(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Shape(String),
}
