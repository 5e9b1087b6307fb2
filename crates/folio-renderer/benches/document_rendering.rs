//! Benchmarks for document rendering performance.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use folio_doc::{Document, InlineStyle};
use folio_renderer::{DocumentRenderer, extract_toc};

/// Build a document with `sections` headings, each followed by paragraphs.
fn generate_document(sections: usize, paragraphs_per_section: usize) -> Document {
    Document::build(|root| {
        root.heading(1, |h| {
            h.text("Document Title");
        });
        for i in 0..sections {
            root.heading(2, |h| {
                h.text(format!("Section {i}"));
            });
            for j in 0..paragraphs_per_section {
                root.paragraph(|p| {
                    p.text(format!("This is paragraph {j} in section {i}. It contains "));
                    p.styled(InlineStyle::new().bold(), |s| {
                        s.text("bold");
                    });
                    p.text(" and ");
                    p.styled(InlineStyle::new().italic().color("blue"), |s| {
                        s.text("italic");
                    });
                    p.text(" text.");
                });
            }
        }
    })
}

fn bench_render_simple(c: &mut Criterion) {
    let doc = Document::build(|root| {
        root.heading(1, |h| {
            h.text("Hello");
        });
        root.paragraph(|p| {
            p.text("Simple content.");
        });
    });
    let renderer = DocumentRenderer::new();

    c.bench_function("render_simple_document", |b| {
        b.iter(|| renderer.render(&doc));
    });
}

fn bench_extract_toc(c: &mut Criterion) {
    let doc = generate_document(50, 2);

    c.bench_function("extract_toc_50_headings", |b| {
        b.iter(|| extract_toc(&doc));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let renderer = DocumentRenderer::new();
    let mut group = c.benchmark_group("render_by_size");

    for (sections, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let doc = generate_document(sections, paragraphs);

        group.throughput(Throughput::Elements(doc.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("document", format!("{sections}h_{paragraphs}p")),
            &doc,
            |b, doc| b.iter(|| renderer.render(doc).view.to_html()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render_simple,
    bench_extract_toc,
    bench_render_varying_sizes
);
criterion_main!(benches);
