use thiserror::Error;

/// Errors returned by telemetry decoding.
///
/// A truncated header is fatal to the decode attempt; no partial reading
/// is produced. Recoverable conditions are reported separately as
/// [`DecodeWarning`] values alongside a successful result.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("truncated header: need {needed} bytes, got {actual}")]
    TruncatedHeader { needed: usize, actual: usize },
}

/// Non-fatal conditions observed while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeWarning {
    #[error("trailing odd byte at offset {offset}: not a complete duration entry")]
    TrailingOddByte { offset: usize },
}
