//! Symmetric Eigendecomposition Example
//!
//! Walks through Householder tridiagonalization and shifted QR iteration,
//! then checks the eigenpairs.
//!
//! Run with: cargo run --example symmetric_eigen

use nume_eigen::{
    complete_eigen_decomposition, householder_tridiagonalize, qr_eigen_solve, resolve_eigenvector,
    Matrix,
};

fn print_matrix(label: &str, m: &Matrix<f64>) {
    println!("   {}:", label);
    for row in m.to_rows() {
        let cells: Vec<String> = row.iter().map(|x| format!("{:9.5}", x)).collect();
        println!("     [{}]", cells.join(", "));
    }
}

fn main() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .expect("subscriber installed once");

    println!("=== Nume-Eigen Symmetric Decomposition Demo ===\n");

    #[rustfmt::skip]
    let a = Matrix::from_rows(&[
        vec![4.0, 1.0, -2.0, 2.0],
        vec![1.0, 2.0, 0.0, 1.0],
        vec![-2.0, 0.0, 3.0, -2.0],
        vec![2.0, 1.0, -2.0, -1.0],
    ]).expect("valid matrix");

    // Step 1: tridiagonal form
    println!("1. Householder tridiagonalization");
    let householder = householder_tridiagonalize(&a).expect("symmetric input");
    print_matrix("T", householder.tridiagonal());
    print_matrix("Q", householder.orthogonal());
    println!();

    // Step 2: shifted QR on T, seeded with Q
    println!("2. Shifted QR iteration");
    let eigen = qr_eigen_solve(
        householder.tridiagonal(),
        householder.orthogonal(),
        1000,
        1e-12,
    )
    .expect("tridiagonal input");
    println!("   Eigenvalues: {:?}", eigen.eigenvalues());
    println!(
        "   QR steps: {}, converged: {}",
        eigen.iterations(),
        eigen.converged()
    );
    println!();

    // Step 3: verify A*v = lambda*v
    println!("3. Verification: A*v = lambda*v");
    for (i, (lambda, v)) in eigen.iter().enumerate() {
        let av = a.matvec(&v).expect("matvec");
        let error = av.sub(&v.scale(lambda)).expect("same length").norm_l2();
        println!("   Eigenpair {}: lambda={:.6}, error={:.2e}", i, lambda, error);
    }
    println!();

    // Step 4: one call does both, sorted for display
    println!("4. complete_eigen_decomposition, sorted descending");
    let sorted = complete_eigen_decomposition(&a, 1000, 1e-12)
        .expect("decomposition")
        .sorted_descending();
    println!("   Eigenvalues: {:?}", sorted.eigenvalues());
    let reconstructed = sorted.reconstruct().expect("reconstruct");
    let diff = reconstructed.sub(&a).expect("same shape").frobenius_norm();
    println!("   ||V*D*V^T - A||_F = {:.2e}", diff);
    println!();

    // Step 5: eigenvector for an approximate eigenvalue
    println!("5. Eigenvector nearest to lambda = 2.3");
    let v = resolve_eigenvector(&a, 2.3).expect("symmetric input");
    println!("   v = {:?}", v.as_slice());

    println!("\n=== Demo Complete ===");
}
