//! Benchmark suite for parallel payment summation
//!
//! Compares `sum_payments` across worker counts using the divan
//! benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use wallet_ledger::core::sum_payments;
use wallet_ledger::{Payment, PaymentStatus};

fn main() {
    divan::main();
}

fn payments(count: usize) -> Vec<Payment> {
    (0..count)
        .map(|index| Payment {
            id: format!("p-{}", index),
            account_id: 1,
            amount: (index % 1_000) as i64 + 1,
            category: "bench".to_string(),
            status: PaymentStatus::InProgress,
        })
        .collect()
}

/// Sum 1,000 payments
#[divan::bench(args = [0, 1, 2, 4, 8])]
fn sum_small(bencher: divan::Bencher, workers: usize) {
    let data = payments(1_000);
    bencher.bench_local(|| sum_payments(divan::black_box(&data), workers));
}

/// Sum 1,000,000 payments
#[divan::bench(args = [0, 1, 2, 4, 8])]
fn sum_large(bencher: divan::Bencher, workers: usize) {
    let data = payments(1_000_000);
    bencher.bench_local(|| sum_payments(divan::black_box(&data), workers));
}
