//! Random prime sampling.

use std::ops::RangeInclusive;

use num_bigint_dig::BigUint;
use rand::Rng;
use tracing::trace;

use crate::arith::is_prime;
use crate::error::RsaError;

fn draw_prime<R: Rng>(rng: &mut R, range: &RangeInclusive<u64>) -> Option<u64> {
    let candidate = rng.gen_range(range.clone());
    is_prime(&BigUint::from(candidate)).then_some(candidate)
}

/// Draws `(p, q)` pairs uniformly from `range` until both are prime and the
/// pair satisfies `accept`, giving up after `max_attempts` pair draws.
///
/// A rejected pair is discarded as a whole, so a first prime without any
/// acceptable partner never exhausts the budget on its own.
pub(crate) fn sample_prime_pair<R, F>(
    rng: &mut R,
    range: &RangeInclusive<u64>,
    max_attempts: usize,
    accept: F,
) -> Result<(u64, u64), RsaError>
where
    R: Rng,
    F: Fn(u64, u64) -> bool,
{
    if range.is_empty() {
        return Err(RsaError::KeyGenerationFailure(format!(
            "prime range {}..={} is empty",
            range.start(),
            range.end()
        )));
    }

    for attempt in 1..=max_attempts {
        let Some(p) = draw_prime(rng, range) else {
            continue;
        };
        let Some(q) = draw_prime(rng, range) else {
            continue;
        };
        if accept(p, q) {
            trace!(attempt, "drew prime pair");
            return Ok((p, q));
        }
    }

    Err(RsaError::KeyGenerationFailure(format!(
        "no usable prime pair in {}..={} after {max_attempts} draws",
        range.start(),
        range.end()
    )))
}
