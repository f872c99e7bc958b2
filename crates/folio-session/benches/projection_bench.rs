//! Benchmarks for gallery and outline projection.
//!
//! Run with: cargo bench -p folio-session --bench projection_bench
//!
//! Both projections are rebuilt after every edit, so they must stay cheap on
//! large volumes.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use folio_core::{GroupSeed, LeafSeed};
use folio_session::{EditorSession, ResourceSettings, SessionConfig, outline, project};
use std::hint::black_box;

fn volume(leaves: usize) -> EditorSession {
    let seeds = (0..leaves).map(|i| LeafSeed::new(format!("fs-{i}"), format!("p. {}", i + 1))).collect();
    let chapters = (0..leaves / 20)
        .map(|c| {
            (c * 20..c * 20 + 10).fold(GroupSeed::new(format!("Chapter {}", c + 1)), |group, i| {
                group.leaf(format!("fs-{i}"))
            })
        })
        .collect();
    EditorSession::load(seeds, Some(chapters), ResourceSettings::default(), SessionConfig::default()).unwrap()
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("session/projection");

    for leaves in [100usize, 2000] {
        let session = volume(leaves);
        group.bench_with_input(BenchmarkId::new("gallery", leaves), &session, |b, s| {
            b.iter(|| black_box(project(s.tree(), s.selection(), s.clipboard())))
        });
        group.bench_with_input(BenchmarkId::new("outline", leaves), &session, |b, s| {
            b.iter(|| black_box(outline(s.tree(), s.selection())))
        });
        group.bench_with_input(BenchmarkId::new("state_hash", leaves), &session, |b, s| {
            b.iter(|| black_box(s.state_hash()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);
