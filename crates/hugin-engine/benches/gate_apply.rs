//! Benchmarks for statevector gate application.
//!
//! Run with: cargo bench -p hugin-engine

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hugin_engine::Statevector;
use hugin_engine::catalog;
use hugin_ir::StandardGate;

/// Benchmark single-qubit gate application across state sizes
fn bench_single_qubit(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_qubit");

    for num_qubits in &[4u32, 8, 12, 16, 20] {
        let h = catalog::matrix(&StandardGate::H);
        group.bench_with_input(
            BenchmarkId::new("h_gate", num_qubits),
            num_qubits,
            |b, &n| {
                let mut sv = Statevector::new(n).unwrap();
                b.iter(|| {
                    sv.apply_matrix(black_box(&h), black_box(&[0])).unwrap();
                });
            },
        );
    }

    group.finish();
}

/// Benchmark two-qubit gate application across state sizes
fn bench_two_qubit(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_qubit");

    for num_qubits in &[4u32, 8, 12, 16, 20] {
        let cx = catalog::matrix(&StandardGate::CX);
        group.bench_with_input(
            BenchmarkId::new("cx_gate", num_qubits),
            num_qubits,
            |b, &n| {
                let mut sv = Statevector::new(n).unwrap();
                b.iter(|| {
                    sv.apply_matrix(black_box(&cx), black_box(&[0, 1])).unwrap();
                });
            },
        );
    }

    group.finish();
}

/// Benchmark a full GHZ preparation on a mid-size register
fn bench_ghz_preparation(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_preparation");

    for num_qubits in &[8u32, 12, 16] {
        let h = catalog::matrix(&StandardGate::H);
        let cx = catalog::matrix(&StandardGate::CX);
        group.bench_with_input(
            BenchmarkId::new("prepare", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| {
                    let mut sv = Statevector::new(n).unwrap();
                    sv.apply_matrix(&h, &[0]).unwrap();
                    for i in 0..n as usize - 1 {
                        sv.apply_matrix(&cx, &[i, i + 1]).unwrap();
                    }
                    black_box(sv.total_probability())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_qubit,
    bench_two_qubit,
    bench_ghz_preparation,
);

criterion_main!(benches);
