//! PDF lexical scanning.
//!
//! - `lexer`: byte-level tokenizer producing raw lexemes

pub mod lexer;

pub use lexer::{Tokenizer, TokenizerOptions, Tokens};
