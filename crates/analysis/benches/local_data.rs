use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gdsims_analysis::data::{LocalData, Table};
use std::fmt::Write;
use std::path::Path;

fn local_text(patches: usize, frames: usize) -> String {
    let mut text = String::from("LocalData\nday patch WW WD DD WR RR DR\n");
    for frame in 0..frames {
        let day = frame * 30;
        for patch in 0..patches {
            let wd = (patch + frame) % 7;
            let _ = writeln!(text, "{day} {patch} 20 {wd} 1 3 0 2");
        }
    }
    text
}

fn bench_local_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_data");
    let path = Path::new("LocalData1run1.txt");

    for patches in [100, 1000] {
        let text = local_text(patches, 50);

        group.bench_with_input(BenchmarkId::new("parse", patches), &text, |b, text| {
            b.iter(|| Table::parse(black_box(text), path, 8).unwrap())
        });

        let table = Table::parse(&text, path, 8).unwrap();
        let local = LocalData::from_table(&table, path, patches).unwrap();
        group.bench_with_input(BenchmarkId::new("all_frames", patches), &local, |b, local| {
            b.iter(|| {
                for t in 0..local.frame_count() {
                    black_box(local.frame(t).unwrap());
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_local_data);
criterion_main!(benches);
