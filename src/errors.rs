use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("File I/O Error: {0}")]
    Io(String),

    #[error("Image Decode Error: {0}")]
    Decode(String),

    #[error("HTTP Client Error: {0}")]
    Network(String),
}

// Allow conversion from std::io::Error to SnapError::Io
impl From<std::io::Error> for SnapError {
    fn from(err: std::io::Error) -> Self {
        SnapError::Io(err.to_string())
    }
}
