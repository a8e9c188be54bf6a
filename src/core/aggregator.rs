//! Parallel payment aggregation
//!
//! This module sums payment amounts with a one-shot fan-out/fan-in, in the
//! same partition, spawn-per-partition, join-all shape as a batch processor:
//! the payments are split into contiguous chunks, one worker thread sums
//! each chunk, and every worker adds its subtotal to a shared accumulator
//! behind a mutex. The caller blocks until all workers have finished.
//!
//! # Partitioning
//!
//! ```text
//! workers = max(1, requested)
//! chunk   = len / workers            (integer division)
//! chunks  = [0..chunk], [chunk..2*chunk], ..., [(workers-1)*chunk..len]
//! ```
//!
//! The remainder always lands in the last chunk. When there are more
//! workers than payments, every chunk but the last is empty and gets no
//! thread, so the number of threads never exceeds the number of payments.
//!
//! Amounts are added with wrapping arithmetic.

use crate::types::{Money, Payment};
use std::sync::{Mutex, PoisonError};
use std::thread;
use tracing::{debug, warn};

/// Split `payments` into `max(1, workers)` contiguous chunks
///
/// Chunks are produced lazily, so any worker count is accepted.
///
/// # Arguments
///
/// * `payments` - The payments to split
/// * `workers` - Requested number of chunks; zero is treated as one
///
/// # Returns
///
/// An iterator over exactly `max(1, workers)` slices that together cover
/// `payments` in order.
pub fn partition_payments(
    payments: &[Payment],
    workers: usize,
) -> impl ExactSizeIterator<Item = &[Payment]> + DoubleEndedIterator {
    let workers = workers.max(1);
    let chunk_size = payments.len() / workers;

    (0..workers).map(move |index| {
        let start = index * chunk_size;
        if index == workers - 1 {
            &payments[start..]
        } else {
            &payments[start..start + chunk_size]
        }
    })
}

/// Sum the amount of every payment using `workers` concurrent workers
///
/// Spawns one scoped thread per non-empty chunk from [`partition_payments`].
/// A chunk whose thread cannot be spawned is summed on the calling thread.
/// The result does not depend on `workers`.
///
/// # Panics
///
/// Propagates a panic from a worker thread.
pub fn sum_payments(payments: &[Payment], workers: usize) -> Money {
    let total = Mutex::new(0 as Money);

    // Empty chunks only ever precede the last one
    let chunks = partition_payments(payments, workers)
        .rev()
        .take_while(|chunk| !chunk.is_empty());

    debug!(payments = payments.len(), workers, "summing payments");

    thread::scope(|scope| {
        for chunk in chunks {
            let total = &total;
            let spawned = thread::Builder::new()
                .name("sum-payments".to_string())
                .spawn_scoped(scope, move || add_subtotal(total, chunk));

            if let Err(e) = spawned {
                warn!(chunk = chunk.len(), error = %e, "failed to spawn worker, summing inline");
                add_subtotal(total, chunk);
            }
        }
    });

    total.into_inner().unwrap_or_else(PoisonError::into_inner)
}

fn add_subtotal(total: &Mutex<Money>, chunk: &[Payment]) {
    let subtotal = chunk
        .iter()
        .fold(0 as Money, |sum, payment| sum.wrapping_add(payment.amount));
    let mut total = total.lock().unwrap_or_else(PoisonError::into_inner);
    *total = total.wrapping_add(subtotal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentStatus;
    use rstest::rstest;

    fn payments(amounts: &[Money]) -> Vec<Payment> {
        amounts
            .iter()
            .enumerate()
            .map(|(index, &amount)| Payment {
                id: format!("p-{}", index),
                account_id: 1,
                amount,
                category: "auto".to_string(),
                status: PaymentStatus::InProgress,
            })
            .collect()
    }

    fn chunk_amounts(data: &[Payment], workers: usize) -> Vec<Vec<Money>> {
        partition_payments(data, workers)
            .map(|chunk| chunk.iter().map(|payment| payment.amount).collect())
            .collect()
    }

    #[test]
    fn test_partition_remainder_goes_to_last_chunk() {
        let data = payments(&[100, 250, 50, 10, 5]);

        assert_eq!(
            chunk_amounts(&data, 3),
            vec![vec![100], vec![250], vec![50, 10, 5]]
        );
    }

    #[rstest]
    #[case::zero_workers(0, 1)]
    #[case::one_worker(1, 1)]
    #[case::more_workers_than_payments(8, 8)]
    fn test_partition_chunk_count(#[case] workers: usize, #[case] expected: usize) {
        let data = payments(&[1, 2, 3]);

        let chunks: Vec<&[Payment]> = partition_payments(&data, workers).collect();

        assert_eq!(chunks.len(), expected);
        let covered: usize = chunks.iter().map(|chunk| chunk.len()).sum();
        assert_eq!(covered, 3);
    }

    #[test]
    fn test_partition_more_workers_than_payments() {
        let data = payments(&[1, 2, 3]);

        let chunks: Vec<&[Payment]> = partition_payments(&data, 5).collect();

        assert!(chunks[..4].iter().all(|chunk| chunk.is_empty()));
        assert_eq!(chunks[4].len(), 3);
    }

    #[test]
    fn test_partition_empty() {
        let chunks: Vec<&[Payment]> = partition_payments(&[], 4).collect();
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|chunk| chunk.is_empty()));
    }

    #[rstest]
    #[case::zero_workers(&[100, 250, 50], 0, 400)]
    #[case::three_workers(&[100, 250, 50, 10, 5], 3, 415)]
    #[case::one_worker(&[100, 250, 50, 10, 5], 1, 415)]
    #[case::no_workers_same_data(&[100, 250, 50, 10, 5], 0, 415)]
    #[case::too_many_workers(&[100, 250, 50, 10, 5], 16, 415)]
    #[case::empty(&[], 4, 0)]
    fn test_sum_payments(#[case] amounts: &[Money], #[case] workers: usize, #[case] expected: Money) {
        let data = payments(amounts);
        assert_eq!(sum_payments(&data, workers), expected);
    }

    #[test]
    fn test_sum_is_independent_of_worker_count() {
        let amounts: Vec<Money> = (1..=1_000).collect();
        let data = payments(&amounts);
        let expected: Money = amounts.iter().sum();

        for workers in 0..=12 {
            assert_eq!(sum_payments(&data, workers), expected, "workers = {}", workers);
        }
    }

    #[test]
    fn test_partition_huge_worker_count_is_lazy() {
        let data = payments(&[5, 7]);

        let mut chunks = partition_payments(&data, usize::MAX);

        assert_eq!(chunks.len(), usize::MAX);
        assert!(chunks.next().unwrap().is_empty());
        assert_eq!(chunks.next_back().unwrap().len(), 2);
    }

    #[rstest]
    #[case::max(usize::MAX)]
    #[case::far_more_than_payments(1 << 40)]
    fn test_sum_huge_worker_count(#[case] workers: usize) {
        let data = payments(&[5, 7, 11]);
        assert_eq!(sum_payments(&data, workers), 23);
    }

    #[rstest]
    #[case::one_worker(1)]
    #[case::two_workers(2)]
    fn test_sum_wraps_on_overflow(#[case] workers: usize) {
        let data = payments(&[Money::MAX, 1]);
        assert_eq!(sum_payments(&data, workers), Money::MIN);
    }
}
