//! AST benchmarks.
//!
//! Run with: `cargo bench --package loreline-ast`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use loreline_ast::ast::{Ast, BeatDecl, BlockStyle, DialogueStatement, Script, StringLiteral, StringPart};
use loreline_ast::node::NodeId;
use loreline_ast::style::{to_brace_style, to_plain_style};
use loreline_ast::visit::ParentIndex;
use loreline_lex::token::StringQuoting;
use loreline_util::span::Position;
use loreline_util::symbol::Symbol;

fn text_literal(text: &str) -> Ast {
    Ast::StringLiteral(Box::new(StringLiteral {
        id: NodeId::next(),
        position: Position::new(1, 1, 0, text.chars().count()),
        leading_comments: Vec::new(),
        trailing_comments: Vec::new(),
        quoting: StringQuoting::Unquoted,
        parts: vec![StringPart::Raw(text.to_string())],
    }))
}

fn dialogue_line() -> Ast {
    Ast::DialogueStatement(Box::new(DialogueStatement {
        id: NodeId::next(),
        position: Position::START,
        leading_comments: Vec::new(),
        trailing_comments: Vec::new(),
        character: Symbol::intern("Alice"),
        character_position: Position::START,
        content: Box::new(text_literal("Hello there, how are you doing today?")),
    }))
}

fn beat(name: &str, lines: usize) -> Ast {
    Ast::BeatDecl(Box::new(BeatDecl {
        id: NodeId::next(),
        position: Position::START,
        leading_comments: Vec::new(),
        trailing_comments: Vec::new(),
        name: Symbol::intern(name),
        style: BlockStyle::Plain,
        body: (0..lines).map(|_| dialogue_line()).collect(),
    }))
}

fn script(beats: usize, lines_per_beat: usize) -> Script {
    Script {
        id: NodeId::next(),
        position: Position::START,
        leading_comments: Vec::new(),
        trailing_comments: Vec::new(),
        body: (0..beats).map(|i| beat(&format!("Beat{i}"), lines_per_beat)).collect(),
    }
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("ast_traversal");
    let tree = script(50, 20);
    group.throughput(Throughput::Elements(1000));

    group.bench_function("each", |b| {
        b.iter(|| {
            let mut count = 0;
            tree.each(|_node, _parent| count += 1);
            black_box(count)
        })
    });

    group.bench_function("parent_index_build", |b| {
        let root = Ast::Script(Box::new(tree.clone()));
        b.iter(|| black_box(ParentIndex::build(&root)))
    });

    group.finish();
}

fn bench_style_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("ast_style_transforms");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("brace_then_plain", |b| {
        b.iter(|| {
            let mut root = Ast::Script(Box::new(script(50, 20)));
            to_brace_style(&mut root);
            to_plain_style(&mut root);
            black_box(root)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_traversal, bench_style_transforms);
criterion_main!(benches);
