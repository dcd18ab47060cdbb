//! Eigen-solver benchmarks
//!
//! Full symmetric decomposition and its two stages, plus the power
//! iteration variants, across small matrix sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nume_eigen::{
    complete_eigen_decomposition, householder_tridiagonalize, power_method, qr_eigen_solve,
    ConvergenceCriteria, Matrix, PowerMethodKind, Vector,
};
use std::hint::black_box;

const SIZES: [usize; 4] = [4, 8, 16, 32];

/// Create a symmetric positive definite matrix for benchmarking
fn create_spd_matrix(n: usize) -> Matrix<f64> {
    // Diagonally dominant with small symmetric perturbations
    let mut m = Matrix::zeros(n, n);

    for i in 0..n {
        if let Some(x) = m.get_mut(i, i) {
            *x = (n + i) as f64 + 1.0;
        }
    }

    for i in 0..n {
        for j in 0..i {
            let val = 0.1 * ((i + j) % 5) as f64 / (n as f64);
            if let Some(x) = m.get_mut(i, j) {
                *x = val;
            }
            if let Some(x) = m.get_mut(j, i) {
                *x = val;
            }
        }
    }

    m
}

fn bench_complete_decomposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete_eigen_decomposition");

    for n in SIZES {
        let matrix = create_spd_matrix(n);

        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |bench, matrix| {
            bench.iter(|| {
                let eigen = complete_eigen_decomposition(black_box(matrix), 1000, 1e-12)
                    .expect("decomposition should succeed");
                black_box(eigen);
            });
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("decomposition_stages");

    for n in SIZES {
        let matrix = create_spd_matrix(n);

        group.bench_with_input(
            BenchmarkId::new("householder", n),
            &matrix,
            |bench, matrix| {
                bench.iter(|| {
                    let result = householder_tridiagonalize(black_box(matrix))
                        .expect("tridiagonalization should succeed");
                    black_box(result);
                });
            },
        );

        let (q, t) = householder_tridiagonalize(&matrix)
            .expect("tridiagonalization should succeed")
            .into_parts();
        group.bench_with_input(BenchmarkId::new("qr", n), &(t, q), |bench, (t, q)| {
            bench.iter(|| {
                let eigen = qr_eigen_solve(black_box(t), black_box(q), 1000, 1e-12)
                    .expect("qr should succeed");
                black_box(eigen);
            });
        });
    }

    group.finish();
}

fn bench_power_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("power_methods");
    let criteria = ConvergenceCriteria::new(1e-10, 1000).expect("valid criteria");

    for n in SIZES {
        let matrix = create_spd_matrix(n);
        let guess = Vector::from_vec(vec![1.0; n]);
        let shift = n as f64 * 1.5 + 0.25;

        for (label, kind) in [
            ("regular", PowerMethodKind::Regular),
            ("inverse", PowerMethodKind::Inverse),
            ("nearest", PowerMethodKind::Nearest { shift }),
        ] {
            group.bench_with_input(BenchmarkId::new(label, n), &matrix, |bench, matrix| {
                bench.iter(|| {
                    let result = power_method(kind, black_box(matrix), &guess, &criteria)
                        .expect("power method should succeed");
                    black_box(result);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_complete_decomposition,
    bench_stages,
    bench_power_methods
);
criterion_main!(benches);
