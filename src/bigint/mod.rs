// Arbitrary-precision signed integer
// Sign-magnitude representation over little-endian 32-bit digits

mod arith;
mod bits;
mod div;
mod fmt;
mod math;
mod prime;

use std::cmp::Ordering;

use crate::error::{Error, Result};

pub use prime::DEFAULT_CERTAINTY;

/// Number of value bits per magnitude digit.
pub(crate) const DIGIT_BITS: usize = 32;

/// A signed arbitrary-precision integer.
///
/// The magnitude is a little-endian sequence of 32-bit digits with the sign
/// carried separately. Every public operation leaves the value normalized:
/// at least one digit, no most-significant zero digit except for the single
/// digit of zero itself, and zero is never negative. Equality, ordering,
/// and hashing are all defined on that normalized form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigInt {
    negative: bool,
    digits: Vec<u32>,
}

impl BigInt {
    /// Zero.
    pub fn zero() -> Self {
        BigInt {
            negative: false,
            digits: vec![0],
        }
    }

    /// One.
    pub fn one() -> Self {
        BigInt {
            negative: false,
            digits: vec![1],
        }
    }

    pub(crate) fn with_capacity(len: usize, negative: bool) -> Self {
        BigInt {
            negative,
            digits: vec![0; len.max(1)],
        }
    }

    pub(crate) fn from_digits(digits: Vec<u32>, negative: bool) -> Self {
        let mut v = BigInt { negative, digits };
        v.normalize();
        v
    }

    /// Strip most-significant zero digits and canonicalize zero.
    pub(crate) fn normalize(&mut self) {
        if self.digits.is_empty() {
            self.digits.push(0);
        }
        while self.digits.len() > 1 && *self.digits.last().unwrap() == 0 {
            self.digits.pop();
        }
        if self.digits.len() == 1 && self.digits[0] == 0 {
            self.negative = false;
        }
    }

    pub fn is_zero(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == 0
    }

    pub fn is_odd(&self) -> bool {
        self.digits[0] & 1 == 1
    }

    /// -1, 0, or +1.
    pub fn sign(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Magnitude of this value.
    pub fn abs(&self) -> BigInt {
        BigInt {
            negative: false,
            digits: self.digits.clone(),
        }
    }

    pub(crate) fn negate_in_place(&mut self) {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
    }

    /// Digit at `index`, zero beyond the magnitude.
    pub(crate) fn digit(&self, index: usize) -> u32 {
        self.digits.get(index).copied().unwrap_or(0)
    }

    pub(crate) fn digit_len(&self) -> usize {
        self.digits.len()
    }

    /// Position of the most significant set bit; fails for values <= 0.
    pub fn log2(&self) -> Result<usize> {
        if self.sign() <= 0 {
            return Err(Error::Domain("can't take the log of a value <= 0"));
        }
        let top = *self.digits.last().unwrap();
        Ok((self.digits.len() - 1) * DIGIT_BITS + (31 - top.leading_zeros() as usize))
    }

    /// Low 64 bits of the magnitude with the sign applied, as the original
    /// narrowing conversion behaves.
    pub fn to_i64(&self) -> i64 {
        let mut v = self.digits[0] as u64;
        if self.digits.len() > 1 {
            v |= (self.digits[1] as u64) << 32;
        }
        if self.negative {
            (v as i64).wrapping_neg()
        } else {
            v as i64
        }
    }

    /// Magnitude-only comparison, ignoring signs.
    pub(crate) fn cmp_magnitude(&self, other: &BigInt) -> Ordering {
        if self.digits.len() != other.digits.len() {
            return self.digits.len().cmp(&other.digits.len());
        }
        for (a, b) in self.digits.iter().rev().zip(other.digits.iter().rev()) {
            if a != b {
                return a.cmp(b);
            }
        }
        Ordering::Equal
    }
}

impl Default for BigInt {
    fn default() -> Self {
        BigInt::zero()
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        let negative = value < 0;
        let magnitude = value.unsigned_abs();
        BigInt::from_digits(vec![magnitude as u32, (magnitude >> 32) as u32], negative)
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        BigInt::from_digits(vec![value as u32, (value >> 32) as u32], false)
    }
}

impl From<i32> for BigInt {
    fn from(value: i32) -> Self {
        BigInt::from(value as i64)
    }
}

impl From<u32> for BigInt {
    fn from(value: u32) -> Self {
        BigInt::from_digits(vec![value], false)
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign().cmp(&other.sign()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        let by_magnitude = self.cmp_magnitude(other);
        if self.negative {
            by_magnitude.reverse()
        } else {
            by_magnitude
        }
    }
}

impl std::ops::Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.negate_in_place();
        self
    }
}

impl std::ops::Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_canonical() {
        let z = BigInt::zero();
        assert!(z.is_zero());
        assert_eq!(z.sign(), 0);
        assert!(!z.is_negative());
        assert_eq!(z, BigInt::from(0i64));
        assert_eq!(-BigInt::zero(), BigInt::zero());
    }

    #[test]
    fn test_from_i64() {
        assert_eq!(BigInt::from(42i64).to_i64(), 42);
        assert_eq!(BigInt::from(-42i64).to_i64(), -42);
        assert_eq!(BigInt::from(i64::MAX).to_i64(), i64::MAX);
        assert_eq!(BigInt::from(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn test_normalize_strips_high_zeros() {
        let v = BigInt::from_digits(vec![7, 0, 0, 0], false);
        assert_eq!(v.digit_len(), 1);
        assert_eq!(v, BigInt::from(7u32));
    }

    #[test]
    fn test_ordering() {
        let neg_large = BigInt::parse("-123456789012345678901234567890");
        let neg_small = BigInt::from(-5i64);
        let zero = BigInt::zero();
        let pos_small = BigInt::from(5i64);
        let pos_large = BigInt::parse("123456789012345678901234567890");
        let mut values = vec![
            pos_large.clone(),
            neg_small.clone(),
            zero.clone(),
            neg_large.clone(),
            pos_small.clone(),
        ];
        values.sort();
        assert_eq!(values, vec![neg_large, neg_small, zero, pos_small, pos_large]);
    }

    #[test]
    fn test_ordering_same_length() {
        let a = BigInt::parse("0x100000001");
        let b = BigInt::parse("0x100000002");
        assert!(a < b);
        assert!(-a.clone() > -b.clone());
        assert!(a > BigInt::from(1u32));
    }

    #[test]
    fn test_sign() {
        assert_eq!(BigInt::from(-3i64).sign(), -1);
        assert_eq!(BigInt::from(3i64).sign(), 1);
        assert_eq!(BigInt::from(0i64).sign(), 0);
    }

    #[test]
    fn test_abs() {
        assert_eq!(BigInt::from(-3i64).abs(), BigInt::from(3i64));
        assert_eq!(BigInt::from(3i64).abs(), BigInt::from(3i64));
    }

    #[test]
    fn test_log2() {
        assert_eq!(BigInt::from(1u32).log2().unwrap(), 0);
        assert_eq!(BigInt::from(2u32).log2().unwrap(), 1);
        assert_eq!(BigInt::from(255u32).log2().unwrap(), 7);
        assert_eq!(BigInt::from(256u32).log2().unwrap(), 8);
        assert_eq!(BigInt::parse("0x100000000").log2().unwrap(), 32);
        assert!(BigInt::zero().log2().is_err());
        assert!(BigInt::from(-1i64).log2().is_err());
    }

    #[test]
    fn test_to_i64_truncates_high_digits() {
        let big = BigInt::parse("0x100000002DEADBEEF");
        // Only the low 64 bits survive.
        assert_eq!(big.to_i64(), 0x00000002DEADBEEFu64 as i64);
    }

    mod randomized {
        use rand::rngs::StdRng;
        use rand::{RngCore, SeedableRng};

        use super::*;

        fn signed(bits: usize, rng: &mut StdRng) -> BigInt {
            let v = BigInt::random(bits, rng);
            if rng.next_u32() & 1 == 1 {
                -v
            } else {
                v
            }
        }

        #[test]
        fn test_ring_identities() {
            let mut rng = StdRng::seed_from_u64(0xD1CE);
            for _ in 0..40 {
                let a = signed(220, &mut rng);
                let b = signed(150, &mut rng);
                let c = signed(90, &mut rng);
                assert_eq!(&a + &b, &b + &a);
                assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
                assert_eq!(&a + &BigInt::zero(), a);
                assert_eq!(&a + &(-&a), BigInt::zero());
                assert_eq!(&a * &b, &b * &a);
                assert_eq!(&a * &BigInt::one(), a);
                assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
            }
        }

        #[test]
        fn test_division_identities() {
            let mut rng = StdRng::seed_from_u64(0xFACE);
            for _ in 0..25 {
                let a = signed(300, &mut rng);
                let b = signed(120, &mut rng);
                if b.is_zero() {
                    continue;
                }
                let (q, r) = a.div_rem(&b).unwrap();
                assert_eq!(&(&q * &b) + &r, a);
                assert!(r.abs() < b.abs());
                if !r.is_zero() {
                    assert_eq!(r.sign(), a.sign());
                }
            }
        }

        #[test]
        fn test_shift_identities() {
            let mut rng = StdRng::seed_from_u64(0xBEEF);
            for _ in 0..25 {
                let a = BigInt::random(180, &mut rng);
                let k = (rng.next_u32() % 100) as usize;
                let pow2 = BigInt::one() << k;
                // a << k multiplies and a >> k floor-divides by 2^k.
                assert_eq!(&a << k, &a * &pow2);
                assert_eq!(&a >> k, &a / &pow2);
                let neg = -&a;
                assert_eq!((&neg << k) >> k, neg);
            }
        }

        #[test]
        fn test_bitwise_identities() {
            let mut rng = StdRng::seed_from_u64(0xB17);
            for _ in 0..25 {
                let a = signed(160, &mut rng);
                let b = signed(200, &mut rng);
                assert_eq!(!&a, &BigInt::from(-1i64) - &a);
                assert_eq!(&a & &a, a);
                assert_eq!(&a | &a, a);
                assert_eq!(&a ^ &a, BigInt::zero());
                // De Morgan over the two's-complement model.
                assert_eq!(!&(&a & &b), &!&a | &!&b);
            }
        }

        #[test]
        fn test_text_round_trips() {
            let mut rng = StdRng::seed_from_u64(0x7E57);
            for _ in 0..25 {
                let a = signed(250, &mut rng);
                assert_eq!(BigInt::parse(&a.to_string()), a);
                assert_eq!(format!("{a:#X}").parse::<BigInt>().unwrap(), a);
            }
        }

        #[test]
        fn test_gcd_recurrence_and_mod_pow() {
            let mut rng = StdRng::seed_from_u64(0x6CD);
            for _ in 0..10 {
                let a = BigInt::random(200, &mut rng);
                let b = BigInt::random(90, &mut rng);
                if b.is_zero() || (&a % &b).is_zero() {
                    continue;
                }
                assert_eq!(a.gcd(&b), b.gcd(&(&a % &b)));
                let e = BigInt::from(rng.next_u32() % 40);
                let m = BigInt::random(60, &mut rng);
                if m.abs() <= BigInt::one() {
                    continue;
                }
                assert_eq!(
                    a.mod_pow(&e, &m).unwrap(),
                    &a.pow(&e).unwrap() % &m
                );
            }
        }
    }
}
