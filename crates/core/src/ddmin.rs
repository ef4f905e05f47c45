//! Generic delta-debugging minimization (ddmin).
//!
//! Given an ordered sequence of opaque elements and a test that reports
//! whether a sub-sequence still reproduces the condition under
//! investigation, [`ddmin`] returns an order-preserving sub-sequence that
//! still reproduces and is 1-minimal: at full granularity no single chunk
//! can be kept alone or removed without losing the condition. This is a
//! local fixed point, not a global optimum.
//!
//! The test is expected to be weakly deterministic and monotone in the
//! candidate; a flaky oracle yields a safe but possibly non-minimal
//! result. No retries are performed.
//!
//! Reference: Zeller/Hildebrandt, "Simplifying and Isolating
//! Failure-Inducing Input" (the classic ddmin with subset and complement
//! phases and granularity doubling).

use crate::outcome::Outcome;
use std::ops::Range;
use tracing::{debug, trace};

/// Minimizes `elements` down to a reproducing sub-sequence.
///
/// `min_granularity` bounds the chunk count from below (call sites use
/// 2 for line/char reduction and 1 for edit spans).
/// Values below 1 are treated as 1.
///
/// The caller must have verified `test(&elements) == Reproduced` before
/// invoking; the engine does not re-check the entry invariant. Verdicts
/// steer the search (`NotReproduced` and `Unknown` both reject a
/// reduction); a test error aborts the search and propagates.
pub fn ddmin<T, E, F>(elements: Vec<T>, min_granularity: usize, test: &mut F) -> Result<Vec<T>, E>
where
    T: Clone,
    F: FnMut(&[T]) -> Result<Outcome, E>,
{
    let min_granularity = min_granularity.max(1);
    let mut c = elements;
    let mut n = min_granularity;
    let mut probes = 0usize;

    'search: loop {
        if c.len() < n {
            debug!(kept = c.len(), probes, "ddmin: done (below granularity)");
            return Ok(c);
        }
        let chunks = partition(c.len(), n);

        // Subset phase: keep the first chunk that reproduces on its own.
        // A single chunk is the whole candidate, nothing to try.
        if chunks.len() > 1 {
            for chunk in &chunks {
                let subset = c[chunk.clone()].to_vec();
                probes += 1;
                if test(&subset)? == Outcome::Reproduced {
                    trace!(from = c.len(), to = subset.len(), "ddmin: reduced to subset");
                    c = subset;
                    n = n.saturating_sub(1).max(min_granularity);
                    continue 'search;
                }
            }
        }

        // Complement phase: drop the first chunk whose removal still
        // reproduces. With a single chunk this tests the empty candidate,
        // which is what the complement trick relies on.
        for chunk in &chunks {
            let mut complement = Vec::with_capacity(c.len() - chunk.len());
            complement.extend_from_slice(&c[..chunk.start]);
            complement.extend_from_slice(&c[chunk.end..]);
            probes += 1;
            if test(&complement)? == Outcome::Reproduced {
                trace!(from = c.len(), to = complement.len(), "ddmin: reduced to complement");
                c = complement;
                n = n.saturating_sub(1).max(min_granularity);
                continue 'search;
            }
        }

        // Neither phase made progress: refine or stop.
        if n < c.len() {
            n = (2 * n).min(c.len());
        } else {
            debug!(kept = c.len(), probes, "ddmin: done (1-minimal)");
            return Ok(c);
        }
    }
}

/// The complement trick: computes a minimal *exclusion* set.
///
/// `test` receives the elements that stay **applied** (the complement of
/// the sub-sequence the inner ddmin is probing), so the minimizer can be
/// reused in the "maximize application" direction without conflating the
/// two at call sites. The returned elements are the ones that must stay
/// unapplied for the condition to keep reproducing; subtract them from
/// the full set with [`minus`] and apply the remainder.
///
/// Entry invariant: applying nothing (the unmodified artifact) must
/// reproduce, which is exactly the session invariant the caller already
/// holds.
pub fn ddmin_complement<T, E, F>(
    elements: &[T],
    min_granularity: usize,
    test: &mut F,
) -> Result<Vec<T>, E>
where
    T: Clone + PartialEq,
    F: FnMut(&[T]) -> Result<Outcome, E>,
{
    let all = elements.to_vec();
    ddmin(all.clone(), min_granularity, &mut |excluded: &[T]| {
        let applied = minus(&all, excluded);
        test(&applied)
    })
}

/// Order-preserving set difference over plain equality.
pub fn minus<T: Clone + PartialEq>(set: &[T], sub: &[T]) -> Vec<T> {
    set.iter()
        .filter(|item| !sub.contains(item))
        .cloned()
        .collect()
}

/// Partitions `len` elements into at most `n` contiguous chunks of size
/// `ceil(len / n)`; the last chunk may be shorter. Order preserved.
fn partition(len: usize, n: usize) -> Vec<Range<usize>> {
    debug_assert!(n >= 1 && len >= n);
    let size = len.div_ceil(n);
    let mut chunks = Vec::with_capacity(n);
    let mut start = 0;
    while start < len {
        let end = (start + size).min(len);
        chunks.push(start..end);
        start = end;
    }
    chunks
}
