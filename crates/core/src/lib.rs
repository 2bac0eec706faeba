//! pdflex - low-level lexical scanner for PDF object syntax.
//!
//! Turns a seekable byte source into raw lexemes (numbers, strings, names,
//! comments, array and dictionary delimiters, keyword runs) for a
//! higher-level object parser to consume.
//!
//! ```
//! use pdflex_core::{TokenKind, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::from_slice(b"<< /Type /Page >>");
//! let token = tokenizer.next_token()?;
//! assert_eq!(token.kind(), TokenKind::StartDict);
//! assert_eq!(token.text(), b"<<");
//! # Ok::<(), pdflex_core::PdfError>(())
//! ```

pub mod error;
pub mod parser;
pub mod source;
pub mod token;

pub use parser::lexer;

pub use error::{PdfError, Result};
pub use parser::{Tokenizer, TokenizerOptions, Tokens};
pub use source::{ByteSource, ReaderSource, SliceSource};
pub use token::{Token, TokenKind};
