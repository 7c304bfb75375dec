//! Lexer benchmarks. Run with `cargo bench --package loreline-lex`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use loreline_lex::Lexer;

fn lexer_token_count(source: &str) -> usize {
    let mut lexer = Lexer::new(source);
    lexer.tokenize().unwrap().len()
}

fn bench_lexer_dialogue(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_dialogue");

    let source = "beat Start\n  Alice: Hello there, welcome to the shop.\n  Bob: Thanks for having me.\n";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("short_beat", |b| b.iter(|| lexer_token_count(black_box(source))));

    group.finish();
}

fn bench_lexer_unquoted_narration(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_unquoted");

    group.bench_function("narration_line", |b| {
        b.iter(|| lexer_token_count(black_box("beat A\n  The door creaks open slowly.\n")))
    });

    group.bench_function("quoted_line", |b| {
        b.iter(|| lexer_token_count(black_box("beat A\n  \"The door creaks open slowly.\"\n")))
    });

    group.finish();
}

fn bench_lexer_interpolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_interpolation");

    group.bench_function("simple_interpolation", |b| {
        b.iter(|| lexer_token_count(black_box("beat A\n  Hi $name, you have $count gold.\n")))
    });

    group.bench_function("braced_interpolation", |b| {
        b.iter(|| lexer_token_count(black_box("beat A\n  Total: ${price * quantity}\n")))
    });

    group.finish();
}

fn bench_lexer_nested_choices(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_choices");

    let source = r#"
        beat Crossroads
          choice
            Go north
              -> North
            Go south
              -> South
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("nested_choice", |b| b.iter(|| lexer_token_count(black_box(source))));

    group.finish();
}

fn bench_lexer_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_functions");

    group.bench_function("brace_function", |b| {
        b.iter(|| lexer_token_count(black_box("function roll(sides) { return random(sides) }")))
    });

    group.bench_function("external_stub", |b| {
        b.iter(|| lexer_token_count(black_box("function native_roll(sides)\nbeat Next\n")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_dialogue,
    bench_lexer_unquoted_narration,
    bench_lexer_interpolation,
    bench_lexer_nested_choices,
    bench_lexer_functions
);
criterion_main!(benches);
