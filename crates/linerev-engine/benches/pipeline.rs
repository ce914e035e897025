use criterion::{Criterion, black_box, criterion_group, criterion_main};
use linerev_engine::{ReverseOptions, index_file, reverse_file_to};
use std::fmt::Write as _;
use std::fs;

fn sample_content(lines: usize) -> Vec<u8> {
    let mut content = String::new();
    for i in 0..lines {
        let letter = (b'A' + (i % 26) as u8) as char;
        let width = 900 + (i * 37) % 300;
        writeln!(content, "{i} - {}", letter.to_string().repeat(width)).unwrap();
    }
    content.into_bytes()
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");
    group.sample_size(20);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.txt");
    fs::write(&path, sample_content(1000)).unwrap();
    let options = ReverseOptions::default();

    group.bench_function("index_file", |b| {
        b.iter(|| {
            let table = index_file(black_box(&path), &options).unwrap();
            black_box(table);
        });
    });

    group.finish();
}

fn bench_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse");
    group.sample_size(20);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.txt");
    fs::write(&path, sample_content(1000)).unwrap();
    let dest = dir.path().join("reversed.txt");
    let options = ReverseOptions {
        on_collision: linerev_engine::CollisionPolicy::Overwrite,
        ..ReverseOptions::default()
    };

    group.bench_function("reverse_file_to", |b| {
        b.iter(|| {
            let written = reverse_file_to(&path, black_box(&dest), &options).unwrap();
            black_box(written);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_index, bench_reverse);
criterion_main!(benches);
