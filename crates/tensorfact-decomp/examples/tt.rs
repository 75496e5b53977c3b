//! TT-SVD and TT rounding example
//!
//! This example factorizes dense tensors into tensor trains, does arithmetic
//! in TT format, and recompresses the result.
//!
//! Run with:
//! ```bash
//! cargo run --example tt
//! ```

use tensorfact_core::{arith, DenseND};
use tensorfact_decomp::{tt_round, tt_round_max_rank, tt_stats, tt_svd, tt_svd_max_rank};

fn main() -> anyhow::Result<()> {
    println!("{}", "=".repeat(80));
    println!("Tensor Train Factorization Example");
    println!("{}", "=".repeat(80));
    println!();

    // ========================================================================
    // Example 1: TT-SVD of a smooth function
    // ========================================================================
    println!("Example 1: TT-SVD to a relative tolerance (5D tensor)");
    println!("{}", "-".repeat(80));

    let shape = vec![10, 10, 10, 10, 10];
    let tensor = DenseND::<f64>::from_fn(&shape, |idx| {
        let s: f64 = idx.iter().map(|&i| i as f64 / 10.0).sum();
        (1.0 + s).recip()
    });
    let tolerance = 1e-6;

    println!("Tensor shape: {:?}", shape);
    println!("Tolerance: {}", tolerance);
    println!();

    let start = std::time::Instant::now();
    let tt = tt_svd(&shape, tensor.as_slice(), tolerance)?;
    let elapsed = start.elapsed();

    let stats = tt_stats(&tensor, &tt)?;
    println!("Results:");
    println!("  - Time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    println!("  - TT-ranks: {:?}", tt.ranks());
    println!("  - Core shapes:");
    for (i, core) in tt.cores().iter().enumerate() {
        println!("    Core {}: {:?}", i, core.shape());
    }
    println!("  - Parameters: {} (dense: {})", stats.num_parameters, stats.original_size);
    println!("  - Compression ratio: {:.2}x", stats.compression_ratio);
    println!("  - Relative error: {:.3e}", stats.relative_error);
    println!();

    // ========================================================================
    // Example 2: Fixed rank budget
    // ========================================================================
    println!("Example 2: TT-SVD with a rank budget (random 6D tensor)");
    println!("{}", "-".repeat(80));

    let shape_6d = vec![6, 6, 6, 6, 6, 6];
    let random = DenseND::<f64>::random_uniform(&shape_6d, 0.0, 1.0);

    for &max_rank in &[1, 4, 16] {
        let tt_r = tt_svd_max_rank(&shape_6d, random.as_slice(), max_rank)?;
        let stats = tt_stats(&random, &tt_r)?;
        println!(
            "  max rank {:>2}: ranks {:?}, compression {:>8.2}x, error {:.4}",
            max_rank,
            tt_r.ranks(),
            stats.compression_ratio,
            stats.relative_error
        );
    }
    println!();

    // ========================================================================
    // Example 3: Arithmetic then rounding
    // ========================================================================
    println!("Example 3: Rank growth under addition, then rounding");
    println!("{}", "-".repeat(80));

    let sum = arith::axpby(2.0, &tt, -1.0, &tt)?;
    println!("  - ranks of 2X - X: {:?}", sum.ranks());

    let rounded = tt_round(&sum, 1e-8)?;
    println!("  - after rounding:  {:?}", rounded.ranks());

    let diff = arith::sub(&rounded, &tt)?;
    println!("  - ||round(2X - X) - X|| / ||X|| = {:.3e}", diff.norm() / tt.norm());

    let capped = tt_round_max_rank(&tt, 2)?;
    let stats = tt_stats(&tensor, &capped)?;
    println!(
        "  - capped at rank 2: {:?}, error {:.3e}",
        capped.ranks(),
        stats.relative_error
    );
    println!();

    println!("{}", "=".repeat(80));
    Ok(())
}
