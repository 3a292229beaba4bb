//! Benchmarks for structure-trace parsing and HTML serialization.
//!
//! Run with: cargo bench
//!
//! The traces are synthetic but shaped like `pdfinfo -struct-text` output
//! for multi-page agendas.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a trace with `sections` sections of headings, paragraphs and
/// small tables.
fn create_test_trace(sections: usize) -> String {
    let mut trace = String::from("Document\n");

    for i in 0..sections {
        trace.push_str("  Sect\n");
        trace.push_str("    H2 (block):\n");
        trace.push_str("       /Placement /Block\n");
        trace.push_str(&format!("      \"Sak {}/24\"\n", i + 1));

        for p in 0..4 {
            trace.push_str("    P (block)\n");
            trace.push_str(&format!(
                "      \"Paragraph {} of section {} with enough text to look real.\"\n",
                p, i
            ));
            trace.push_str("      Span (inline)\n");
            trace.push_str("        \"emphasis\"\n");
        }

        trace.push_str("    Table (block)\n");
        for r in 0..3 {
            trace.push_str("      TR\n");
            for c in 0..3 {
                trace.push_str("        TD (block)\n");
                trace.push_str(&format!("          \"r{}c{}\"\n", r, c));
            }
        }
    }

    trace
}

const IMAGE_LISTING_HEADER: &str = "\
page   num  type   width height color comp bpc  enc interp  object ID x-ppi y-ppi size ratio
--------------------------------------------------------------------------------------------
";

fn create_image_listing(pages: usize) -> String {
    let mut listing = String::from(IMAGE_LISTING_HEADER);
    for page in 1..=pages {
        listing.push_str(&format!(
            "{:>4} {:>5} image    1700  2200  gray    1   1  ccitt  no {:>9}  0   200   200 31.6K 6.8%\n",
            page,
            page - 1,
            page * 5
        ));
    }
    listing
}

/// Benchmark building the tree at various sizes.
fn bench_tree_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("struct_trace");

    for sections in [1, 20, 200].iter() {
        let trace = create_test_trace(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| pdfstruct::parse_struct_trace(black_box(&trace)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark serializing a parsed tree.
fn bench_html_rendering(c: &mut Criterion) {
    let tree = pdfstruct::parse_struct_trace(&create_test_trace(200)).unwrap();
    let options = pdfstruct::HtmlOptions::default();

    c.bench_function("to_html_200_sections", |b| {
        b.iter(|| pdfstruct::render::to_html(black_box(&tree), &options));
    });
}

/// Benchmark the image listing parser and stats.
fn bench_image_stats(c: &mut Criterion) {
    let listing = create_image_listing(300);

    c.bench_function("image_stats_300_pages", |b| {
        b.iter(|| {
            let records = pdfstruct::parser::parse_image_list(black_box(&listing));
            pdfstruct::ImageStats::from_records(&records)
        });
    });
}

criterion_group!(
    benches,
    bench_tree_building,
    bench_html_rendering,
    bench_image_stats,
);
criterion_main!(benches);
