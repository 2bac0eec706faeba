//! Token value types produced by the tokenizer.

use std::fmt;

/// Syntactic role of a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of `-+.0123456789`, not parsed.
    Number,
    /// Literal string `( ... )`, parentheses included.
    String,
    /// Hex string `< ... >`, angle brackets included.
    HexString,
    /// Name `/Foo`, slash included.
    Name,
    /// `%` up to (excluding) the end of line.
    Comment,
    StartArray,
    EndArray,
    StartDict,
    EndDict,
    /// Reserved for `N G R`; never produced by [`Tokenizer`](crate::lexer::Tokenizer).
    Ref,
    /// Reserved for `N G obj`; never produced by [`Tokenizer`](crate::lexer::Tokenizer).
    Obj,
    /// Reserved for `endobj`; never produced by [`Tokenizer`](crate::lexer::Tokenizer).
    EndObj,
    /// Keyword-like run (`obj`, `R`, `true`, operators, ...).
    Other,
    EndOfStream,
}

impl TokenKind {
    /// Stable upper-case label.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::HexString => "HEX_STRING",
            TokenKind::Name => "NAME",
            TokenKind::Comment => "COMMENT",
            TokenKind::StartArray => "START_ARRAY",
            TokenKind::EndArray => "END_ARRAY",
            TokenKind::StartDict => "START_DICT",
            TokenKind::EndDict => "END_DICT",
            TokenKind::Ref => "REF",
            TokenKind::Obj => "OBJ",
            TokenKind::EndObj => "END_OBJ",
            TokenKind::Other => "OTHER",
            TokenKind::EndOfStream => "END_OF_STREAM",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lexeme: where it starts, what it is, and its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    offset: u64,
    kind: TokenKind,
    text: Vec<u8>,
}

impl Token {
    pub fn new(offset: u64, kind: TokenKind, text: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            kind,
            text: text.into(),
        }
    }

    /// The text-less token returned once input is exhausted.
    pub fn end_of_stream(offset: u64) -> Self {
        Self {
            offset,
            kind: TokenKind::EndOfStream,
            text: Vec::new(),
        }
    }

    /// Offset of the first byte of the lexeme.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Raw bytes of the lexeme, delimiters included, escapes untouched.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn into_text(self) -> Vec<u8> {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset one past the last byte of the lexeme.
    pub fn end_offset(&self) -> u64 {
        self.offset + self.text.len() as u64
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.kind == TokenKind::EndOfStream
    }

    /// Decode the raw bytes as ISO-8859-1, one char per byte.
    pub fn text_latin1(&self) -> String {
        self.text.iter().map(|&b| char::from(b)).collect()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.offset)?;
        if !self.text.is_empty() {
            write!(f, " {:?}", self.text_latin1())?;
        }
        Ok(())
    }
}
