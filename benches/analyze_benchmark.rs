//! Benchmarks for layout analysis performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure the full pipeline on synthetic extracted pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relayout::{
    analyze_with_options, AnalyzeOptions, ExtractedDocument, ExtractedPage, PositionedTextItem,
};

/// Creates a synthetic extracted document with the given number of pages.
///
/// Each page carries forty lines of flowing text plus one aligned region
/// that detects as a table.
fn create_test_document(page_count: u32) -> ExtractedDocument {
    let mut pages = Vec::with_capacity(page_count as usize);

    for number in 1..=page_count {
        let mut page = ExtractedPage::new(number, 612.0, 792.0);

        for line in 0..40 {
            let y = 72.0 + line as f32 * 14.0;
            for word in 0..8 {
                page.items.push(PositionedTextItem {
                    text: format!("word{} ", word),
                    x: 72.0 + word as f32 * 58.0,
                    y,
                    width: 50.0,
                    height: 12.0,
                    font_name: "Helvetica".to_string(),
                    font_size: 12.0,
                    bold: None,
                    italic: None,
                    color: None,
                });
            }
        }

        for row in 0..5 {
            let y = 660.0 + row as f32 * 16.0;
            for column in 0..3 {
                page.items.push(PositionedTextItem {
                    text: format!("cell{}{}", row, column),
                    x: 72.0 + column as f32 * 150.0,
                    y,
                    width: 60.0,
                    height: 12.0,
                    font_name: "Helvetica".to_string(),
                    font_size: 12.0,
                    bold: None,
                    italic: None,
                    color: None,
                });
            }
        }

        pages.push(page);
    }

    ExtractedDocument::from_pages(pages)
}

fn bench_analyze_single_page(c: &mut Criterion) {
    let document = create_test_document(1);
    c.bench_function("analyze_1_page", |b| {
        b.iter(|| {
            let options = AnalyzeOptions::new().sequential();
            let _ = analyze_with_options(black_box(&document), &options);
        });
    });
}

fn bench_analyze_multi_page(c: &mut Criterion) {
    let document = create_test_document(20);

    c.bench_function("analyze_20_pages_sequential", |b| {
        b.iter(|| {
            let options = AnalyzeOptions::new().sequential();
            let _ = analyze_with_options(black_box(&document), &options);
        });
    });

    c.bench_function("analyze_20_pages_parallel", |b| {
        b.iter(|| {
            let options = AnalyzeOptions::new();
            let _ = analyze_with_options(black_box(&document), &options);
        });
    });
}

fn bench_analyze_without_tables(c: &mut Criterion) {
    let document = create_test_document(20);
    c.bench_function("analyze_20_pages_no_tables", |b| {
        b.iter(|| {
            let options = AnalyzeOptions::new().with_tables(false).sequential();
            let _ = analyze_with_options(black_box(&document), &options);
        });
    });
}

criterion_group!(
    benches,
    bench_analyze_single_page,
    bench_analyze_multi_page,
    bench_analyze_without_tables
);
criterion_main!(benches);
