use std::fmt;

#[derive(Debug)]
pub enum IoError {
    /// File could not be read from disk.
    Read(String),
    /// Bytes could not be decoded as text with any attempted encoding.
    Decode(String),
    /// File could not be written.
    Write(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "read error: {msg}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
            Self::Write(msg) => write!(f, "write error: {msg}"),
        }
    }
}

impl std::error::Error for IoError {}
