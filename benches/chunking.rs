//! Benchmarks for article chunking and link insertion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use interlink::{
    chunk_article, insert_links_into_html, insert_links_into_markdown, ChunkOptions, LinkCatalog,
    LinkableArticle,
};

fn sample_article(size: usize) -> String {
    // Sections of German prose with the occasional catalog keyword
    let sentences = [
        "Eine gute Body Cam dokumentiert jeden Einsatz zuverlässig. ",
        "Die Akkulaufzeit entscheidet im Alltag über den Nutzen. ",
        "Im Test überzeugte vor allem die Dashcam mit Nachtsicht! ",
        "Welche Auflösung braucht man wirklich? ",
        "Datenschutz spielt bei der Überwachungskamera eine große Rolle. ",
    ];
    let mut text = String::with_capacity(size + 100);
    let mut i = 0;
    while text.len() < size {
        if i % 20 == 0 {
            text.push_str(&format!("\n\n## Abschnitt {}\n\n", i / 20 + 1));
        } else if i % 5 == 0 {
            text.push_str("\n\n");
        }
        text.push_str(sentences[i % sentences.len()]);
        i += 1;
    }
    text
}

fn catalog() -> LinkCatalog {
    (0..200)
        .map(|i| {
            LinkableArticle::new(
                format!("filler-{i}"),
                format!("Ratgeber {i}"),
                format!("ratgeber-{i}"),
                format!("Stichwort{i}"),
                "de",
            )
        })
        .chain([
            LinkableArticle::new("body", "Body Cam Ratgeber", "body-cam", "Body Cam", "de"),
            LinkableArticle::new("dash", "Dashcam Test", "dashcam-test", "Dashcam", "de"),
            LinkableArticle::new(
                "cctv",
                "Überwachungskamera Vergleich",
                "ueberwachungskamera",
                "Überwachungskamera",
                "de",
            ),
        ])
        .collect()
}

fn bench_chunk_article(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_article");
    let opts = ChunkOptions::default().with_max_chunk_size(2000);

    for size in [1_000, 10_000, 100_000] {
        let text = sample_article(size);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("sections", size), &text, |b, text| {
            b.iter(|| chunk_article(black_box(text), &opts))
        });
    }

    group.finish();
}

fn bench_linking(c: &mut Criterion) {
    let mut group = c.benchmark_group("linking");
    let catalog = catalog();

    for size in [1_000, 10_000, 100_000] {
        let text = sample_article(size);
        let html = format!("<article><p>{}</p></article>", text.replace("\n\n", "</p><p>"));
        let links = catalog.find_internal_links(&text, "current", "de", 5);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("find", size), &text, |b, text| {
            b.iter(|| catalog.find_internal_links(black_box(text), "current", "de", 5))
        });
        group.bench_with_input(BenchmarkId::new("html", size), &html, |b, html| {
            b.iter(|| insert_links_into_html(black_box(html), &links))
        });
        group.bench_with_input(BenchmarkId::new("markdown", size), &text, |b, text| {
            b.iter(|| insert_links_into_markdown(black_box(text), &links))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chunk_article, bench_linking);
criterion_main!(benches);
