// Random values and primality
// Uniform random generation, Miller-Rabin testing, and prime search

use log::trace;
use rand::RngCore;

use super::{BigInt, DIGIT_BITS};

/// Default `log2Probability` for primality testing: the accepted odds of a
/// false positive are at most 2^-100.
pub const DEFAULT_CERTAINTY: usize = 100;

/// Small primes used for trial division before Miller-Rabin.
const TRIAL_PRIMES: [u32; 5] = [3, 5, 7, 11, 13];

impl BigInt {
    /// A uniformly distributed value in `[0, 2^bits)`.
    pub fn random<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> BigInt {
        if bits == 0 {
            return BigInt::zero();
        }
        let len = (bits + DIGIT_BITS - 1) / DIGIT_BITS;
        let mut digits = vec![0u32; len];
        for digit in digits.iter_mut() {
            *digit = rng.next_u32();
        }
        let top_bits = bits % DIGIT_BITS;
        if top_bits != 0 {
            digits[len - 1] &= (1u32 << top_bits) - 1;
        }
        BigInt::from_digits(digits, false)
    }

    /// Miller-Rabin probabilistic primality test with
    /// `ceil(log2_probability / 2)` witness rounds, after trial division by
    /// the small primes. A composite is accepted with probability at most
    /// `2^-log2_probability`.
    pub fn is_probable_prime<R: RngCore + ?Sized>(
        &self,
        log2_probability: usize,
        rng: &mut R,
    ) -> bool {
        if *self <= BigInt::one() {
            return false;
        }
        if *self <= BigInt::from(3u32) {
            return true;
        }
        if !self.is_odd() {
            return false;
        }
        for p in TRIAL_PRIMES {
            let p = BigInt::from(p);
            if *self == p {
                return true;
            }
            if (self % &p).is_zero() {
                return false;
            }
        }
        if *self <= BigInt::from(169u32) {
            return true;
        }

        let rounds = (log2_probability + 1) / 2;
        // self - 1 = 2^s * d with d odd
        let n_minus_one = self - &BigInt::one();
        let mut d = n_minus_one.clone();
        let mut s = 0usize;
        while !d.is_odd() {
            d >>= 1;
            s += 1;
        }
        let n_minus_three = self - &BigInt::from(3u32);
        let witness_bits = 2 + self.log2().unwrap_or(0);
        for _ in 0..rounds {
            // Witness uniform over [2, self - 2].
            let witness =
                &(&BigInt::random(witness_bits, rng) % &n_minus_three) + &BigInt::from(2u32);
            let mut x = witness.mod_pow_unsigned(&d, self);
            if x == BigInt::one() || x == n_minus_one {
                continue;
            }
            let mut j = 1;
            loop {
                if j >= s {
                    return false;
                }
                x = &(&x * &x) % self;
                if x == BigInt::one() {
                    return false;
                }
                if x == n_minus_one {
                    break;
                }
                j += 1;
            }
        }
        true
    }

    /// Search for a probable prime with the top and bottom bits set: odd
    /// candidates of the form `(random(bits - 2) << 1) | (1 << bits) | 1`
    /// are drawn from `gen_rng` until one passes the primality test, whose
    /// witnesses come from `test_rng`.
    pub fn make_probable_prime<G, T>(
        bits: usize,
        log2_probability: usize,
        gen_rng: &mut G,
        test_rng: &mut T,
    ) -> BigInt
    where
        G: RngCore + ?Sized,
        T: RngCore + ?Sized,
    {
        let bits = bits.max(3);
        let mut attempts = 0u64;
        loop {
            let candidate = (BigInt::random(bits - 2, gen_rng) << 1)
                | (BigInt::one() << bits)
                | BigInt::one();
            attempts += 1;
            trace!("prime search: testing candidate {attempts}");
            if candidate.is_probable_prime(log2_probability, test_rng) {
                trace!("prime search: accepted after {attempts} candidates");
                return candidate;
            }
        }
    }
}
