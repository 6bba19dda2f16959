//! Benchmarks for tree and block rendering.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use richdoc_render::{BlockRenderer, Node, TreeRenderer, format_prose};
use serde_json::{Value, json};

/// Generate a tree-dialect document with `sections` heading/paragraph/list groups.
fn generate_tree(sections: usize) -> Value {
    let mut content = Vec::with_capacity(sections * 3);
    for i in 0..sections {
        content.push(json!({
            "type": "heading",
            "attrs": {"level": 2},
            "content": [{"type": "text", "text": format!("Section {i}")}]
        }));
        content.push(json!({
            "type": "paragraph",
            "content": [
                {"type": "text", "text": "Some <plain> text with "},
                {"type": "text", "text": "bold link", "marks": [
                    {"type": "bold"},
                    {"type": "link", "attrs": {"href": "https://example.com/?a=1&b=2"}}
                ]}
            ]
        }));
        content.push(json!({
            "type": "bulletList",
            "content": [
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "item"}]}
                ]}
            ]
        }));
    }
    json!({"type": "doc", "content": content})
}

/// Generate a block-dialect document with `count` blocks.
fn generate_blocks(count: usize) -> String {
    let blocks: Vec<Value> = (0..count)
        .map(|i| match i % 4 {
            0 => json!({"type": "header", "data": {"text": format!("Header {i}"), "level": 2}}),
            1 => json!({"type": "paragraph", "data": {"text": "Text with <b>inline</b> markup"}}),
            2 => json!({"type": "list", "data": {"style": "unordered", "items": ["a", "b", "c"]}}),
            _ => json!({"type": "code", "data": {"code": "let x = 1 < 2;", "language": "rust"}}),
        })
        .collect();
    json!({"blocks": blocks}).to_string()
}

fn bench_tree_varying_sizes(c: &mut Criterion) {
    let renderer = TreeRenderer::new();
    let mut group = c.benchmark_group("tree_render");

    for sections in [10, 100, 1000] {
        let doc = Node::from_value(&generate_tree(sections));
        group.throughput(Throughput::Elements(sections as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &doc, |b, doc| {
            b.iter(|| renderer.render(doc));
        });
    }

    group.finish();
}

fn bench_block_varying_sizes(c: &mut Criterion) {
    let renderer = BlockRenderer::new();
    let mut group = c.benchmark_group("block_render");

    for count in [10, 100, 1000] {
        let input = generate_blocks(count);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| renderer.render(input));
        });
    }

    group.finish();
}

fn bench_format_prose(c: &mut Criterion) {
    let prose = "Here is **bold** and *italic*.\n\n## Steps\n1. First\n2. Second\n\nUse `cargo`.\n"
        .repeat(50);

    c.bench_function("format_prose", |b| {
        b.iter(|| format_prose(&prose));
    });
}

criterion_group!(
    benches,
    bench_tree_varying_sizes,
    bench_block_varying_sizes,
    bench_format_prose
);
criterion_main!(benches);
