use criterion::{criterion_group, criterion_main, Criterion};
use parserlib_bin::css3::parser_config::ParserOptions;
use parserlib_bin::css3::session::ParseSession;
use std::hint::black_box;

/// A stylesheet with a few hundred rules of the usual kinds
fn stylesheet(rules: usize) -> String {
    let mut css = String::from("@charset \"utf-8\";\n@import url(base.css) screen;\n");
    for i in 0..rules {
        css.push_str(&format!(
            ".item-{i} > a:hover, #nav li.active {{\n  color: #3{d}{d};\n  margin: 0 auto {i}px;\n  \
             border: 1px solid rgba(0, 0, 0, .{d});\n  transition: opacity .2s ease-in-out;\n}}\n",
            i = i,
            d = i % 10
        ));
        if i % 25 == 0 {
            css.push_str(&format!(
                "@media (min-width: {}px) {{ .col-{} {{ width: calc(100% - 2em); display: flex }} }}\n",
                300 + i,
                i
            ));
        }
    }
    css
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    group.significance_level(0.1).sample_size(50);

    let css = stylesheet(300);
    // the same document after typing in the middle of it
    let edited = css.replacen("margin: 0 auto 150px", "margin: 0 auto 151px", 1);

    group.bench_function("cold", |b| {
        b.iter(|| {
            let mut session = ParseSession::default();
            black_box(session.parse(&css, ParserOptions::default()).ok());
        })
    });

    let options = ParserOptions {
        reuse_cache: true,
        ..Default::default()
    };
    let mut session = ParseSession::default();
    group.bench_function("cached edit", |b| {
        b.iter(|| {
            black_box(session.parse(&css, options).ok());
            black_box(session.parse(&edited, options).ok());
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
