//! Power Iteration Example
//!
//! Runs the four power-iteration variants on small matrices and prints the
//! estimates with their convergence data.
//!
//! Run with: cargo run --example power_methods
//! Set `NUME_LOG=debug` to see every iteration.

use nume_eigen::{power_method, ConvergenceCriteria, Matrix, PowerMethodKind, Vector};

fn main() {
    let level = match std::env::var("NUME_LOG").as_deref() {
        Ok("debug") => tracing::Level::DEBUG,
        Ok("info") => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .finish(),
    )
    .expect("subscriber installed once");

    println!("=== Nume-Eigen Power Methods Demo ===\n");

    // Example 1: dominant and smallest eigenvalue of a 2x2
    println!("1. Regular and inverse power on [[2, 3], [5, 4]]");
    println!("   Eigenvalues: 7 and -1");

    let m = Matrix::from_rows(&[vec![2.0, 3.0], vec![5.0, 4.0]]).expect("valid matrix");
    let guess = Vector::from_slice(&[1.0, 1.0]);
    let criteria = ConvergenceCriteria::default();

    for kind in [PowerMethodKind::Regular, PowerMethodKind::Inverse] {
        let result = power_method(kind, &m, &guess, &criteria).expect("power method");
        println!(
            "   {:?}: lambda={:.6}, v={:?}, iterations={}, converged={}",
            kind,
            result.eigenvalue,
            result.eigenvector.as_slice(),
            result.iterations,
            result.converged
        );
    }
    println!();

    // Example 2: shifted variants on a non-symmetric 3x3
    println!("2. Shifted power methods on a non-symmetric 3x3");
    println!("   Eigenvalues: 7, 5, -3; shift = 4");

    #[rustfmt::skip]
    let m = Matrix::from_rows(&[
        vec![2.0, 6.0, -3.0],
        vec![5.0, 3.0, -3.0],
        vec![5.0, -4.0, 4.0],
    ]).expect("valid matrix");
    let guess = Vector::from_slice(&[1.0, 0.0, 1.0]);
    let criteria = ConvergenceCriteria::new(1e-10, 200).expect("valid criteria");

    for kind in [
        PowerMethodKind::Farthest { shift: 4.0 },
        PowerMethodKind::Nearest { shift: 4.0 },
    ] {
        let result = power_method(kind, &m, &guess, &criteria).expect("power method");
        println!(
            "   {:?}: lambda={:.10}, relative_error={:.2e}, iterations={}",
            kind, result.eigenvalue, result.relative_error, result.iterations
        );
    }
    println!();

    // Example 3: an exhausted budget is reported, not raised
    println!("3. Iteration budget of 3 on a slowly converging matrix");
    let m = Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 0.95]]).expect("valid matrix");
    let tight = ConvergenceCriteria::new(1e-12, 3).expect("valid criteria");
    let result = power_method(
        PowerMethodKind::Regular,
        &m,
        &Vector::from_slice(&[1.0, 1.0]),
        &tight,
    )
    .expect("power method");
    println!(
        "   lambda={:.6}, relative_error={:.2e}, converged={}",
        result.eigenvalue, result.relative_error, result.converged
    );
    println!();

    // Example 4: validation
    println!("4. Zero initial guess");
    match power_method(
        PowerMethodKind::Regular,
        &m,
        &Vector::zeros(2),
        &ConvergenceCriteria::default(),
    ) {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   error: {}", e),
    }

    println!("\n=== Demo Complete ===");
}
