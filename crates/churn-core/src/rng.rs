//! Deterministic, seedable pseudo-random source.
//!
//! [`Prng`] is a xorshift64* generator whose state is derived from a
//! 64-bit seed through one SplitMix64 step. The whole stream is a pure
//! function of the seed, which is what makes a run replayable: every
//! stochastic decision in the workspace draws from a single `Prng`.
//!
//! A seed of `0` means "unspecified" and is replaced by an entropy-derived
//! seed at seeding time. [`Prng::initial_seed`] reports the seed actually
//! in effect so the run can be reproduced later.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::kind::Distribution;

/// SplitMix64 increment (golden-ratio gamma).
const SPLITMIX_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;
/// Substituted when SplitMix64 maps a seed to the all-zero state,
/// which xorshift can never leave.
const ZERO_STATE_FALLBACK: u64 = 0x9e37_79b9_7f4a_7c15;
/// Output multiplier of xorshift64*.
const XORSHIFT_STAR_MUL: u64 = 2_685_821_657_736_338_717;
/// `2^-53`, scales a 53-bit integer into `[0, 1)`.
const UNIT_53: f64 = 1.0 / (1u64 << 53) as f64;
/// Tolerance under which a power-law exponent counts as exactly 1.
const ALPHA_ONE_EPS: f64 = 1e-8;

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(SPLITMIX_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// A fresh non-zero seed from wall-clock time mixed with OS entropy.
fn entropy_seed() -> u64 {
    loop {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let seed = nanos ^ rand::random::<u64>();
        if seed != 0 {
            return seed;
        }
    }
}

/// Seedable xorshift64* generator with the sampling primitives used by
/// the size and TTL generators.
#[derive(Clone, Debug)]
pub struct Prng {
    state: u64,
    seed: u64,
}

impl Prng {
    /// Create a generator seeded with `seed` (`0` = derive from entropy).
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0, seed: 0 };
        rng.seed(seed);
        rng
    }

    /// Reset the internal state from `seed` (`0` = derive from entropy).
    pub fn seed(&mut self, seed: u64) {
        let seed = if seed == 0 { entropy_seed() } else { seed };
        let state = splitmix64(seed);
        self.seed = seed;
        self.state = if state == 0 {
            ZERO_STATE_FALLBACK
        } else {
            state
        };
    }

    /// The seed in effect, after any `0 → entropy` substitution.
    pub fn initial_seed(&self) -> u64 {
        self.seed
    }

    /// Advance the xorshift64* state and return the scrambled output.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(XORSHIFT_STAR_MUL)
    }

    /// Uniform `f64` in `[0, 1)` built from the top 53 output bits.
    pub fn uniform01(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * UNIT_53
    }

    /// Uniform integer in the half-open range `[min, max)`.
    ///
    /// Returns `min` when `min == max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn uniform_int(&mut self, min: u64, max: u64) -> u64 {
        assert!(min <= max, "uniform_int: min ({min}) > max ({max})");
        min + ((max - min) as f64 * self.uniform01()) as u64
    }

    /// Uniform index in `[0, len)`.
    pub fn index(&mut self, len: usize) -> usize {
        self.uniform_int(0, len as u64) as usize
    }

    /// Exponential sample with rate `lambda`, truncated to an integer and
    /// clamped into `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `lambda` is zero or `min > max`.
    pub fn exponential(&mut self, min: u64, max: u64, lambda: f64) -> u64 {
        assert!(min <= max, "exponential: min ({min}) > max ({max})");
        assert!(lambda != 0.0, "exponential: lambda must be non-zero");
        let u = self.uniform01();
        let x = -(1.0 - u).ln() / lambda;
        (x as u64).clamp(min, max)
    }

    /// Bounded power-law sample with exponent `alpha` over `[min, max]`.
    ///
    /// Uses the log-uniform form when `alpha` is 1 (within `1e-8`) and the
    /// inverse CDF otherwise. The result is clamped to absorb rounding.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn powerlaw(&mut self, min: u64, max: u64, alpha: f64) -> u64 {
        assert!(min <= max, "powerlaw: min ({min}) > max ({max})");
        let u = self.uniform01();
        let (lo, hi) = (min as f64, max as f64);
        let x = if (alpha - 1.0).abs() < ALPHA_ONE_EPS {
            lo * (hi / lo).powf(u)
        } else {
            let e = 1.0 - alpha;
            let lo_e = lo.powf(e);
            let hi_e = hi.powf(e);
            (lo_e + u * (hi_e - lo_e)).powf(1.0 / e)
        };
        (x as u64).clamp(min, max)
    }

    /// Draw from `distribution` over `[min, max]` with parameter `param`
    /// (ignored for [`Distribution::Uniform`]).
    pub fn sample(&mut self, distribution: Distribution, min: u64, max: u64, param: f64) -> u64 {
        match distribution {
            Distribution::Uniform => self.uniform_int(min, max),
            Distribution::Exponential => self.exponential(min, max, param),
            Distribution::PowerLaw => self.powerlaw(min, max, param),
        }
    }

    /// Pick one of `items` with probability proportional to `weights`.
    ///
    /// An empty `weights` slice means uniform choice. Otherwise a vote is
    /// drawn in `[0, sum(weights))` and the first index whose running sum
    /// exceeds it wins; if every weight is zero, index 0 is returned.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty, if `weights` is non-empty and its
    /// length differs from `items`, or if the weights sum past `u64::MAX`.
    pub fn weighted_choice<T: Copy>(&mut self, items: &[T], weights: &[u64]) -> T {
        assert!(!items.is_empty(), "weighted_choice: no items to choose from");
        if weights.is_empty() {
            return items[self.index(items.len())];
        }
        assert_eq!(
            items.len(),
            weights.len(),
            "weighted_choice: {} items but {} weights",
            items.len(),
            weights.len()
        );

        let total = weights
            .iter()
            .try_fold(0u64, |acc, &w| acc.checked_add(w))
            .expect("weighted_choice: weight sum overflows u64");
        let vote = self.uniform_int(0, total);
        let mut acc = 0u64;
        let mut idx = 0;
        for (i, &w) in weights.iter().enumerate() {
            acc += w; // bounded by total
            if vote < acc {
                idx = i;
                break;
            }
        }
        items[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_42_first_output_is_pinned() {
        let mut rng = Prng::new(42);
        assert_eq!(rng.next_u64(), 3_580_622_183_945_639_842);
        assert_eq!(rng.next_u64(), 10_378_725_325_292_465_923);
        assert_eq!(rng.next_u64(), 8_967_075_514_996_744_559);
    }

    #[test]
    fn seed_42_uniform_int_regression() {
        let mut rng = Prng::new(42);
        let draws: Vec<u64> = (0..5).map(|_| rng.uniform_int(0, 100)).collect();
        assert_eq!(draws, vec![19, 56, 48, 27, 80]);
    }

    #[test]
    fn seed_7_uniform_int_regression() {
        let mut rng = Prng::new(7);
        let draws: Vec<u64> = (0..5).map(|_| rng.uniform_int(0, 100)).collect();
        assert_eq!(draws, vec![8, 25, 35, 55, 65]);
    }

    #[test]
    fn reseeding_restarts_the_stream() {
        let mut rng = Prng::new(42);
        let first: Vec<u64> = (0..8).map(|_| rng.next_u64()).collect();
        rng.seed(42);
        let second: Vec<u64> = (0..8).map(|_| rng.next_u64()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_seed_is_replaced() {
        let rng = Prng::new(0);
        assert_ne!(rng.initial_seed(), 0);
        assert_ne!(rng.state, 0);
    }

    #[test]
    fn explicit_seed_is_reported() {
        assert_eq!(Prng::new(1234).initial_seed(), 1234);
    }

    #[test]
    fn uniform01_in_unit_interval() {
        let mut rng = Prng::new(99);
        for _ in 0..10_000 {
            let u = rng.uniform01();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn uniform_int_empty_range_returns_min() {
        let mut rng = Prng::new(3);
        assert_eq!(rng.uniform_int(17, 17), 17);
    }

    #[test]
    #[should_panic(expected = "min (5) > max (4)")]
    fn uniform_int_inverted_range_panics() {
        Prng::new(3).uniform_int(5, 4);
    }

    #[test]
    #[should_panic(expected = "lambda must be non-zero")]
    fn exponential_zero_lambda_panics() {
        Prng::new(3).exponential(1, 10, 0.0);
    }

    #[test]
    fn exponential_clamps_into_bounds() {
        let mut rng = Prng::new(11);
        for _ in 0..5_000 {
            let x = rng.exponential(16, 4096, 0.001);
            assert!((16..=4096).contains(&x));
        }
    }

    #[test]
    fn powerlaw_alpha_one_uses_log_uniform() {
        let mut rng = Prng::new(5);
        for _ in 0..5_000 {
            let x = rng.powerlaw(16, 1 << 20, 1.0);
            assert!((16..=1 << 20).contains(&x));
        }
    }

    #[test]
    fn powerlaw_heavy_tail_skews_small() {
        let mut rng = Prng::new(8);
        let n = 20_000;
        let small = (0..n)
            .filter(|_| rng.powerlaw(16, 1 << 20, 2.0) < 1024)
            .count();
        // With alpha = 2 nearly all mass sits near the lower bound.
        assert!(small > n * 9 / 10, "only {small} of {n} below 1KiB");
    }

    #[test]
    fn sample_dispatches_uniform() {
        let mut a = Prng::new(21);
        let mut b = Prng::new(21);
        assert_eq!(
            a.sample(Distribution::Uniform, 10, 20, 0.0),
            b.uniform_int(10, 20)
        );
    }

    #[test]
    fn weighted_choice_uniform_weights_converge() {
        let mut rng = Prng::new(2024);
        let items = [10u64, 20, 30];
        let mut counts = [0usize; 3];
        let n = 100_000;
        for _ in 0..n {
            let v = rng.weighted_choice(&items, &[1, 1, 1]);
            counts[items.iter().position(|&i| i == v).unwrap()] += 1;
        }
        for c in counts {
            let frac = c as f64 / n as f64;
            assert!((frac - 1.0 / 3.0).abs() < 0.01, "fraction {frac}");
        }
    }

    #[test]
    fn weighted_choice_skewed_weights() {
        let mut rng = Prng::new(77);
        let items = ['a', 'b'];
        let n = 50_000;
        let a = (0..n)
            .filter(|_| rng.weighted_choice(&items, &[9, 1]) == 'a')
            .count();
        let frac = a as f64 / n as f64;
        assert!((frac - 0.9).abs() < 0.01, "fraction {frac}");
    }

    #[test]
    fn weighted_choice_all_zero_weights_picks_first() {
        let mut rng = Prng::new(1);
        for _ in 0..100 {
            assert_eq!(rng.weighted_choice(&[4u64, 5, 6], &[0, 0, 0]), 4);
        }
    }

    #[test]
    fn weighted_choice_empty_weights_is_uniform() {
        let mut rng = Prng::new(13);
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            let v = rng.weighted_choice(&[0usize, 1, 2, 3], &[]);
            seen[v] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    #[should_panic(expected = "3 items but 2 weights")]
    fn weighted_choice_length_mismatch_panics() {
        Prng::new(1).weighted_choice(&[1u64, 2, 3], &[1, 1]);
    }

    #[test]
    #[should_panic(expected = "weight sum overflows")]
    fn weighted_choice_overflowing_weights_panic() {
        Prng::new(1).weighted_choice(&[64u64, 128], &[u64::MAX, 1]);
    }

    #[test]
    fn weighted_choice_saturated_total() {
        let mut rng = Prng::new(9);
        for _ in 0..1_000 {
            assert_eq!(rng.weighted_choice(&[64u64, 128], &[u64::MAX, 0]), 64);
        }
    }

    #[test]
    #[should_panic(expected = "no items")]
    fn weighted_choice_empty_items_panics() {
        Prng::new(1).weighted_choice::<u64>(&[], &[]);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn uniform_int_stays_half_open(
                seed in 1u64..u64::MAX,
                min in 0u64..1_000_000,
                span in 1u64..1_000_000,
            ) {
                let mut rng = Prng::new(seed);
                for _ in 0..32 {
                    let x = rng.uniform_int(min, min + span);
                    prop_assert!(x >= min && x < min + span);
                }
            }

            #[test]
            fn zero_weight_entries_never_win(
                seed in 1u64..u64::MAX,
                weights in proptest::collection::vec(0u64..4, 1..12),
            ) {
                prop_assume!(weights.iter().any(|&w| w > 0));
                let items: Vec<usize> = (0..weights.len()).collect();
                let mut rng = Prng::new(seed);
                for _ in 0..64 {
                    let i = rng.weighted_choice(&items, &weights);
                    prop_assert!(weights[i] > 0);
                }
            }

            #[test]
            fn distributions_respect_bounds(
                seed in 1u64..u64::MAX,
                min in 1u64..10_000,
                span in 0u64..1_000_000,
                param in 0.1f64..3.0,
            ) {
                let max = min + span;
                let mut rng = Prng::new(seed);
                for dist in Distribution::ALL {
                    let x = rng.sample(dist, min, max, param);
                    prop_assert!(x >= min && x <= max);
                }
            }
        }
    }
}
