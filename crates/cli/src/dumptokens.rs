//! dumptokens - Dump the low-level token stream of PDF files
//!
//! A command line tool that prints every lexeme the tokenizer produces,
//! with its byte offset and kind, either as aligned text or as JSON lines.

use clap::{ArgAction, Parser};
use memmap2::Mmap;
use pdflex_core::{ByteSource, ReaderSource, SliceSource, Token, Tokenizer, TokenizerOptions};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Escape a raw lexeme for single-line text output.
fn escape(s: &[u8]) -> String {
    let mut result = String::with_capacity(s.len());
    for &byte in s {
        match byte {
            b'\\' => result.push_str("\\\\"),
            0x20..=0x7e => result.push(byte as char),
            _ => result.push_str(&format!("\\x{byte:02x}")),
        }
    }
    result
}

/// One token as written in `--json` mode.
#[derive(Serialize)]
struct TokenRecord<'a> {
    file: &'a str,
    offset: u64,
    kind: &'static str,
    /// Raw bytes decoded one-to-one as Latin-1.
    text: String,
}

impl<'a> TokenRecord<'a> {
    fn new(file: &'a str, token: &Token) -> Self {
        Self {
            file,
            offset: token.offset(),
            kind: token.kind().name(),
            text: token.text_latin1(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "dumptokens",
    version,
    about = "Dump the low-level token stream of PDF files"
)]
struct Args {
    /// One or more paths to PDF files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Skip comment tokens
    #[arg(short = 'c', long = "skip-comments", action = ArgAction::SetTrue)]
    skip_comments: bool,

    /// Byte offset to start scanning from
    #[arg(short = 's', long = "start", default_value_t = 0)]
    start: u64,

    /// Stop after this many tokens per file (0 means no limit)
    #[arg(short = 'n', long = "max-tokens", default_value_t = 0)]
    max_tokens: usize,

    /// Write one JSON object per token
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Treat a hex string cut off by end of file as an error
    #[arg(long = "strict-hex", action = ArgAction::SetTrue)]
    strict_hex: bool,

    /// Read through a buffered file handle instead of a memory map
    #[arg(long, action = ArgAction::SetTrue)]
    buffered: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Write the tokens of one source.
fn dumptokens<S: ByteSource, W: Write>(
    out: &mut W,
    mut tokenizer: Tokenizer<S>,
    name: &str,
    args: &Args,
) -> Result<usize, Box<dyn std::error::Error>> {
    if args.start > 0 {
        tokenizer.seek(SeekFrom::Start(args.start))?;
    }

    let mut count = 0;
    while args.max_tokens == 0 || count < args.max_tokens {
        let token = if args.skip_comments {
            tokenizer.next_non_comment_token()?
        } else {
            tokenizer.next_token()?
        };
        if token.is_end_of_stream() {
            break;
        }
        if args.json {
            serde_json::to_writer(&mut *out, &TokenRecord::new(name, &token))?;
            writeln!(out)?;
        } else {
            writeln!(
                out,
                "{:>10} {:<11} {}",
                token.offset(),
                token.kind().name(),
                escape(token.text())
            )?;
        }
        count += 1;
    }
    Ok(count)
}

fn dumpfile<W: Write>(
    out: &mut W,
    path: &Path,
    args: &Args,
) -> Result<usize, Box<dyn std::error::Error>> {
    let options = TokenizerOptions::new().strict_hex_strings(args.strict_hex);
    let name = path.to_string_lossy();
    let file = File::open(path)?;
    if args.buffered {
        let source = ReaderSource::new(file)?;
        dumptokens(out, Tokenizer::with_options(source, options), &name, args)
    } else {
        let mmap = unsafe { Mmap::map(&file) }?;
        let source = SliceSource::from_mmap(mmap);
        dumptokens(out, Tokenizer::with_options(source, options), &name, args)
    }
}

fn main() -> core::result::Result<(), Box<dyn core::error::Error>> {
    let args = Args::parse();
    init_logging(args.debug);

    // Open output
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)?;
        Box::new(BufWriter::new(file))
    };

    let multiple = args.files.len() > 1;
    for path in &args.files {
        if !path.exists() {
            eprintln!("Error: File not found: {}", path.display());
            std::process::exit(1);
        }
        if multiple && !args.json {
            writeln!(output, "==> {} <==", path.display())?;
        }

        match dumpfile(&mut output, path, &args) {
            Ok(count) => debug!(file = %path.display(), count, "dumped tokens"),
            Err(e) => {
                output.flush()?;
                eprintln!("Error: {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }

    output.flush()?;
    Ok(())
}
