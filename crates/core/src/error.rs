//! Error types for pdflex scanning.

use thiserror::Error;

/// Primary error type for PDF lexical scanning.
///
/// End of input is not represented here: it is an ordinary
/// [`TokenKind::EndOfStream`](crate::token::TokenKind::EndOfStream) token.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("malformed dictionary close at position {pos}: expected '>>', found {}", describe(.found))]
    MalformedDictionaryClose { pos: u64, found: Option<u8> },

    #[error("unterminated literal string starting at position {pos}")]
    UnterminatedString { pos: u64 },

    #[error("unterminated hex string starting at position {pos}")]
    UnterminatedHexString { pos: u64 },

    #[error("invalid seek to offset {offset}")]
    InvalidSeek { offset: i128 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PdfError {
    /// Offset of the lexeme that failed to scan, if the error is lexical.
    pub fn position(&self) -> Option<u64> {
        match self {
            Self::MalformedDictionaryClose { pos, .. }
            | Self::UnterminatedString { pos }
            | Self::UnterminatedHexString { pos } => Some(*pos),
            Self::InvalidSeek { .. } | Self::Io(_) => None,
        }
    }
}

fn describe(found: &Option<u8>) -> String {
    match *found {
        Some(b) if b.is_ascii_graphic() => format!("'{}'", b as char),
        Some(b) => format!("byte {b:#04x}"),
        None => "end of stream".to_string(),
    }
}

/// Convenience Result type alias for PdfError.
pub type Result<T> = std::result::Result<T, PdfError>;
