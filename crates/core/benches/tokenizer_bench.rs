//! Benchmarks for PDF tokenization.
//!
//! These benchmarks target `Tokenizer::next_token()` over in-memory and
//! reader-backed sources.
//!
//! Benchmark groups:
//! - `tokenizer_tokenize`: Raw tokenization throughput at various scales
//! - `tokenizer_token_types`: Isolated benchmarks for specific token types
//! - `tokenizer_sources`: Same input through slice and buffered reader cursors

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::Cursor;

use pdflex_core::{ByteSource, ReaderSource, SliceSource, Tokenizer};

// =============================================================================
// Data Generation
// =============================================================================

/// Generate synthetic PDF object data with roughly N tokens.
fn generate_mixed_tokens(n: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(n * 12);

    let templates: &[&[u8]] = &[
        b"12 0 obj ",
        b"<< ",
        b"/Type /Page ",
        b"/Parent 3 0 R ",
        b"/MediaBox [0 0 612 792] ",
        b"/Title (Hello World) ",
        b"/ID [<48454C4C4F> <576F726C64>] ",
        b"% comment line\n",
        b">> ",
        b"endobj\n",
    ];

    let mut i = 0;
    while i < n {
        data.extend_from_slice(templates[i % templates.len()]);
        i += 1;
    }

    data
}

fn generate_number_tokens(n: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(n * 8);
    for i in 0..n {
        let value = match i % 4 {
            0 => format!("{} ", i % 1000),
            1 => format!("-{} ", i % 500),
            2 => format!("{}.{} ", i % 100, (i * 7) % 100),
            _ => format!(".{} ", (i % 99) + 1),
        };
        data.extend_from_slice(value.as_bytes());
    }
    data
}

fn generate_string_tokens(n: usize) -> Vec<u8> {
    let strings: &[&[u8]] = &[
        b"(Hello) ",
        b"(Line 1\\nLine 2) ",
        b"(Nested (parens) here) ",
        b"(Octal\\101\\102\\103) ",
        b"(Escaped \\(paren\\)) ",
        b"() ",
    ];
    let mut data = Vec::with_capacity(n * 16);
    for i in 0..n {
        data.extend_from_slice(strings[i % strings.len()]);
    }
    data
}

fn generate_hex_string_tokens(n: usize) -> Vec<u8> {
    let hex_strings: &[&[u8]] = &[
        b"<48454C4C4F> ",
        b"<00FF00FF> ",
        b"<0123456789ABCDEF> ",
        b"<> ",
        b"<4 8 4 5 4 C 4 C 4 F> ",
    ];
    let mut data = Vec::with_capacity(n * 14);
    for i in 0..n {
        data.extend_from_slice(hex_strings[i % hex_strings.len()]);
    }
    data
}

fn drain<S: ByteSource>(tokenizer: &mut Tokenizer<S>) -> usize {
    let mut count = 0usize;
    loop {
        let token = tokenizer.next_token().unwrap();
        if token.is_end_of_stream() {
            return count;
        }
        black_box(token);
        count += 1;
    }
}

fn count_tokens(data: &[u8]) -> usize {
    drain(&mut Tokenizer::from_slice(data))
}

// =============================================================================
// Benchmark Groups
// =============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer_tokenize");

    for target_tokens in [10_000usize, 100_000, 1_000_000] {
        let data = generate_mixed_tokens(target_tokens);
        let actual_tokens = count_tokens(&data);

        group.bench_with_input(
            BenchmarkId::new("mixed", actual_tokens),
            &data,
            |b, data| b.iter(|| drain(&mut Tokenizer::from_slice(black_box(data)))),
        );
    }

    group.finish();
}

fn bench_token_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer_token_types");
    let n = 100_000;

    let cases: [(&str, Vec<u8>); 3] = [
        ("numbers", generate_number_tokens(n)),
        ("strings", generate_string_tokens(n)),
        ("hex_strings", generate_hex_string_tokens(n)),
    ];
    for (name, data) in &cases {
        let actual = count_tokens(data);
        group.bench_with_input(BenchmarkId::new(*name, actual), data, |b, data| {
            b.iter(|| drain(&mut Tokenizer::from_slice(black_box(data))))
        });
    }

    group.finish();
}

fn bench_sources(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer_sources");
    let data = generate_mixed_tokens(100_000);

    group.bench_function("slice", |b| {
        b.iter(|| drain(&mut Tokenizer::new(SliceSource::new(black_box(&data)))))
    });
    group.bench_function("reader", |b| {
        b.iter(|| {
            let source = ReaderSource::new(Cursor::new(black_box(&data[..]))).unwrap();
            drain(&mut Tokenizer::new(source))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_token_types, bench_sources);
criterion_main!(benches);
