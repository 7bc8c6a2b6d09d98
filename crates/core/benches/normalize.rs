use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use postgrab_core::{LinkEntity, PostReference, extract_embed_text, normalize_text, resolve_short_links};

const SHORT_POST: &str = "Just shipped   a new release!  \n\n\n\nNotes here https://t.co/notes https://t.co/media";

fn long_post() -> String {
    let paragraph = "Long-form posts can run to thousands of characters,   with  uneven spacing \t and links https://t.co/ext.\n\n\n";
    paragraph.repeat(40)
}

fn embed_html() -> String {
    let paragraph = r#"<p lang="en" dir="ltr">Hello <a href="https://t.co/x">world</a> &amp; friends<br>second line</p>"#;
    format!(r#"<blockquote class="twitter-tweet">{}&mdash; Alice (@alice)</blockquote>"#, paragraph.repeat(20))
}

fn bench_normalize(c: &mut Criterion) {
    let long = long_post();
    let mut group = c.benchmark_group("normalize_text");

    group.bench_with_input(BenchmarkId::new("short", "80B"), SHORT_POST, |b, text| {
        b.iter(|| normalize_text(black_box(text)))
    });

    group.bench_with_input(BenchmarkId::new("long", "4KB"), &long, |b, text| {
        b.iter(|| normalize_text(black_box(text)))
    });

    group.finish();
}

fn bench_short_links(c: &mut Criterion) {
    let entities = vec![
        LinkEntity::new("https://t.co/notes", "https://example.com/notes"),
        LinkEntity::new("https://t.co/ext", "https://x.com/bob/status/7"),
    ];
    let text = normalize_text(&long_post());

    c.bench_function("resolve_short_links", |b| {
        b.iter(|| resolve_short_links(black_box(&text), black_box(&entities)))
    });
}

fn bench_embed(c: &mut Criterion) {
    let html = embed_html();

    c.bench_function("extract_embed_text", |b| b.iter(|| extract_embed_text(black_box(&html))));
}

fn bench_reference(c: &mut Criterion) {
    c.bench_function("post_reference", |b| {
        b.iter(|| PostReference::parse(black_box("https://www.fxtwitter.com/alice/status/1234567890?s=20")))
    });
}

criterion_group!(benches, bench_normalize, bench_short_links, bench_embed, bench_reference);
criterion_main!(benches);
