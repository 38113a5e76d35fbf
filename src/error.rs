use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("LINE_CHANNEL_TOKEN is not set")]
    MissingChannelToken,
    #[error("invalid LINE_MAX_LEN: {value}")]
    InvalidMaxLen { value: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
