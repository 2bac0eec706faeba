//! Low-level PDF tokenizer.
//!
//! Splits a [`ByteSource`] into raw lexemes: numbers, literal and hex
//! strings, names, comments, array/dictionary delimiters and keyword-like
//! runs. Nothing is decoded. Escapes inside strings are kept verbatim and
//! numbers are left as text, so a higher-level object parser decides what
//! the bytes mean and may `seek` back to re-scan when it needs more than one
//! token of lookahead (`N G R` versus two plain numbers).

use crate::error::{PdfError, Result};
use crate::source::{ByteSource, SliceSource};
use crate::token::{Token, TokenKind};
use std::io::SeekFrom;
use std::iter::FusedIterator;
use tracing::{debug, trace};

const WHITESPACE: u8 = 0b001;
const DELIMITER: u8 = 0b010;
const NUMERIC: u8 = 0b100;

/// Per-byte class bits, indexed by byte value.
static CLASS_TABLE: [u8; 256] = build_class_table();

const fn build_class_table() -> [u8; 256] {
    let mut table = [0u8; 256];

    // Whitespace also terminates runs.
    let whitespace = [0x00, b'\t', b'\n', 0x0c, b'\r', b' '];
    let mut i = 0;
    while i < whitespace.len() {
        table[whitespace[i] as usize] |= WHITESPACE | DELIMITER;
        i += 1;
    }

    let delimiters = [b'%', b'(', b')', b'/', b'<', b'>', b'[', b']'];
    let mut i = 0;
    while i < delimiters.len() {
        table[delimiters[i] as usize] |= DELIMITER;
        i += 1;
    }

    let numeric = b"-+.0123456789";
    let mut i = 0;
    while i < numeric.len() {
        table[numeric[i] as usize] |= NUMERIC;
        i += 1;
    }

    table
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    CLASS_TABLE[b as usize] & WHITESPACE != 0
}

#[inline]
fn is_delimiter(b: u8) -> bool {
    CLASS_TABLE[b as usize] & DELIMITER != 0
}

#[inline]
fn is_numeric(b: u8) -> bool {
    CLASS_TABLE[b as usize] & NUMERIC != 0
}

/// Scanner settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Fail with [`PdfError::UnterminatedHexString`] when input ends inside
    /// a hex string. When unset, the partial `<...` run is returned as a
    /// `HexString` token.
    pub strict_hex_strings: bool,
}

impl TokenizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_hex_strings(mut self, strict: bool) -> Self {
        self.strict_hex_strings = strict;
        self
    }
}

/// Pull-based scanner over a byte source.
///
/// The tokenizer keeps no state between calls other than the cursor
/// position of its source, so seeking to an offset previously returned by
/// [`tell`](Self::tell) and scanning again reproduces the same tokens.
pub struct Tokenizer<S> {
    source: S,
    options: TokenizerOptions,
}

impl<'a> Tokenizer<SliceSource<'a>> {
    /// Tokenize an in-memory buffer.
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self::new(SliceSource::new(data))
    }
}

impl<S: ByteSource> Tokenizer<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, TokenizerOptions::default())
    }

    pub fn with_options(source: S, options: TokenizerOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> TokenizerOptions {
        self.options
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Move the underlying cursor; returns the new absolute position.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.source.seek(pos)
    }

    /// Current position of the underlying cursor.
    pub fn tell(&self) -> u64 {
        self.source.tell()
    }

    /// Scan the next token, comments included.
    ///
    /// Returns a [`TokenKind::EndOfStream`] token once the source is
    /// exhausted, and keeps returning it on further calls.
    pub fn next_token(&mut self) -> Result<Token> {
        let mut b = match self.source.read_one()? {
            Some(b) => b,
            None => return Ok(self.end_of_stream()),
        };
        while is_whitespace(b) {
            b = match self.source.read_one()? {
                Some(b) => b,
                None => return Ok(self.end_of_stream()),
            };
        }

        let start = self.source.tell().saturating_sub(1);
        let token = match b {
            b'[' => Token::new(start, TokenKind::StartArray, b"[".to_vec()),
            b']' => Token::new(start, TokenKind::EndArray, b"]".to_vec()),
            b'/' => self.scan_run(start, TokenKind::Name, b, is_delimiter)?,
            b'>' => self.scan_dict_close(start)?,
            b'%' => self.scan_comment(start)?,
            b'<' => self.scan_angle(start)?,
            b'(' => self.scan_literal_string(start)?,
            b if is_numeric(b) => self.scan_run(start, TokenKind::Number, b, |c| !is_numeric(c))?,
            // The lead byte is always consumed so a stray ')' still makes progress.
            b => self.scan_run(start, TokenKind::Other, b, is_delimiter)?,
        };

        trace!(
            offset = token.offset(),
            kind = %token.kind(),
            len = token.len(),
            "token"
        );
        Ok(token)
    }

    /// Scan the next token that is not a comment.
    pub fn next_non_comment_token(&mut self) -> Result<Token> {
        loop {
            let token = self.next_token()?;
            if token.kind() != TokenKind::Comment {
                return Ok(token);
            }
        }
    }

    /// Iterate over tokens until end of stream, comments included.
    pub fn tokens(&mut self) -> Tokens<'_, S> {
        Tokens::new(self, false)
    }

    /// Iterate over tokens until end of stream, skipping comments.
    pub fn non_comment_tokens(&mut self) -> Tokens<'_, S> {
        Tokens::new(self, true)
    }

    fn end_of_stream(&self) -> Token {
        Token::end_of_stream(self.source.tell())
    }

    /// Accumulate `lead` and following bytes until `stop` matches or input
    /// ends. The stopping byte is pushed back.
    fn scan_run(
        &mut self,
        start: u64,
        kind: TokenKind,
        lead: u8,
        stop: impl Fn(u8) -> bool,
    ) -> Result<Token> {
        let mut text = vec![lead];
        while let Some(b) = self.source.read_one()? {
            if stop(b) {
                self.source.step_back()?;
                break;
            }
            text.push(b);
        }
        Ok(Token::new(start, kind, text))
    }

    fn scan_dict_close(&mut self, start: u64) -> Result<Token> {
        match self.source.read_one()? {
            Some(b'>') => Ok(Token::new(start, TokenKind::EndDict, b">>".to_vec())),
            found => {
                debug!(pos = start, ?found, "'>' not followed by '>'");
                Err(PdfError::MalformedDictionaryClose { pos: start, found })
            }
        }
    }

    fn scan_comment(&mut self, start: u64) -> Result<Token> {
        let mut text = vec![b'%'];
        while let Some(b) = self.source.read_one()? {
            if b == b'\r' || b == b'\n' {
                self.source.step_back()?;
                break;
            }
            text.push(b);
        }
        Ok(Token::new(start, TokenKind::Comment, text))
    }

    /// `<<` opens a dictionary, anything else opens a hex string.
    fn scan_angle(&mut self, start: u64) -> Result<Token> {
        let mut text = vec![b'<'];
        match self.source.read_one()? {
            Some(b'<') => return Ok(Token::new(start, TokenKind::StartDict, b"<<".to_vec())),
            Some(b'>') => return Ok(Token::new(start, TokenKind::HexString, b"<>".to_vec())),
            Some(b) => text.push(b),
            None => return self.truncated_hex_string(start, text),
        }
        while let Some(b) = self.source.read_one()? {
            text.push(b);
            if b == b'>' {
                return Ok(Token::new(start, TokenKind::HexString, text));
            }
        }
        self.truncated_hex_string(start, text)
    }

    fn truncated_hex_string(&self, start: u64, text: Vec<u8>) -> Result<Token> {
        if self.options.strict_hex_strings {
            debug!(pos = start, "hex string reaches end of stream");
            return Err(PdfError::UnterminatedHexString { pos: start });
        }
        debug!(pos = start, len = text.len(), "returning truncated hex string");
        Ok(Token::new(start, TokenKind::HexString, text))
    }

    /// Balanced-parenthesis scan. A backslash takes the next byte verbatim.
    fn scan_literal_string(&mut self, start: u64) -> Result<Token> {
        let mut text = vec![b'('];
        let mut depth = 1usize;
        loop {
            let Some(b) = self.source.read_one()? else {
                return Err(Self::unterminated_string(start, depth));
            };
            text.push(b);
            match b {
                b'\\' => match self.source.read_one()? {
                    Some(escaped) => text.push(escaped),
                    None => return Err(Self::unterminated_string(start, depth)),
                },
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(Token::new(start, TokenKind::String, text));
                    }
                }
                _ => {}
            }
        }
    }

    fn unterminated_string(start: u64, depth: usize) -> PdfError {
        debug!(pos = start, depth, "literal string reaches end of stream");
        PdfError::UnterminatedString { pos: start }
    }
}

/// Iterator over the tokens of a [`Tokenizer`].
///
/// Stops before `EndOfStream`. A scan error is yielded once, after which
/// the iterator is exhausted.
pub struct Tokens<'t, S> {
    tokenizer: &'t mut Tokenizer<S>,
    skip_comments: bool,
    done: bool,
}

impl<'t, S: ByteSource> Tokens<'t, S> {
    fn new(tokenizer: &'t mut Tokenizer<S>, skip_comments: bool) -> Self {
        Self {
            tokenizer,
            skip_comments,
            done: false,
        }
    }
}

impl<S: ByteSource> Iterator for Tokens<'_, S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = if self.skip_comments {
            self.tokenizer.next_non_comment_token()
        } else {
            self.tokenizer.next_token()
        };
        match result {
            Ok(token) if token.is_end_of_stream() => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: ByteSource> FusedIterator for Tokens<'_, S> {}
