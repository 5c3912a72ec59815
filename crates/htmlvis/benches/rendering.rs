//! Benchmarks for document rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use htmlvis::{FormatRegistry, directive::parse_config, sgml::parse_annotations};

const CONFIG: &str = "tok\tspan\n\
pb_xml_id\ttable:title; style=\"pb\"\t\"%%value%%\"\n\
orig\tNULL\t\" \"\n\
norm\tspan:title\tvalue\n\
pos=N\ti";

/// Generate a document with `words` normalized words grouped into pages.
fn generate_document(words: usize, words_per_page: usize) -> String {
    let mut text = String::with_capacity(words * 120);
    text.push_str("<meta title=\"Bench\" language=\"Coptic\">\n");

    for i in 0..words {
        if i % words_per_page == 0 {
            if i > 0 {
                text.push_str("</pb_xml_id>\n");
            }
            text.push_str(&format!("<pb_xml_id pb_xml_id=\"p{i}\">\n"));
        }
        let pos = if i % 3 == 0 { "N" } else { "V" };
        text.push_str(&format!("<orig orig=\"w{i}\">\n"));
        text.push_str(&format!(
            "<norm xml:id=\"u{i}\" pos=\"{pos}\" lemma=\"l{i}\" norm=\"w{i}\">\n"
        ));
        text.push_str(&format!("w{i}\n</norm>\n</orig>\n"));
    }
    text.push_str("</pb_xml_id>\n");
    text
}

fn bench_parse_config(c: &mut Criterion) {
    c.bench_function("parse_config", |b| b.iter(|| parse_config(CONFIG)));
}

fn bench_parse_annotations(c: &mut Criterion) {
    let text = generate_document(500, 50);

    c.bench_function("parse_annotations_500_words", |b| {
        b.iter(|| parse_annotations(&text));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let mut registry = FormatRegistry::new();
    registry.register("norm", CONFIG, "").unwrap();

    let mut group = c.benchmark_group("render_by_size");

    for (words, per_page) in [(50, 10), (500, 50), (5000, 100)] {
        let text = generate_document(words, per_page);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("document", format!("{words}w")),
            &text,
            |b, text| b.iter(|| registry.render("norm", text)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_config,
    bench_parse_annotations,
    bench_render_varying_sizes
);
criterion_main!(benches);
