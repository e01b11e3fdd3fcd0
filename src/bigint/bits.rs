// Shifts and bitwise operations
// Bit operations behave as if both operands were two's-complement values
// of unbounded width; negative operands are simulated with ripple carries
// over the sign-magnitude digits.

use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
    ShrAssign,
};

use super::arith::forward_binop;
use super::{BigInt, DIGIT_BITS};

impl BigInt {
    fn shl_digits(&mut self, shift: usize) {
        if shift == 0 || self.is_zero() {
            return;
        }
        let skip = shift / DIGIT_BITS;
        let intra = shift % DIGIT_BITS;
        let size = self.digits.len();
        let mut out = vec![0u32; skip + size + 1];
        if intra == 0 {
            out[skip..skip + size].copy_from_slice(&self.digits);
        } else {
            for j in 0..=size {
                let lo = if j > 0 {
                    self.digits[j - 1] >> (DIGIT_BITS - intra)
                } else {
                    0
                };
                let hi = if j < size { self.digits[j] << intra } else { 0 };
                out[skip + j] = lo | hi;
            }
        }
        self.digits = out;
        self.normalize();
    }

    fn shr_digits(&mut self, shift: usize) {
        if shift == 0 || self.is_zero() {
            return;
        }
        let skip = shift / DIGIT_BITS;
        let intra = shift % DIGIT_BITS;
        let size = self.digits.len();
        // An arithmetic shift of a negative value rounds toward negative
        // infinity whenever any discarded bit was set.
        let need_round = self.negative && {
            let mut any = self.digits[..skip.min(size)].iter().any(|&d| d != 0);
            if !any && intra > 0 && skip < size {
                any = self.digits[skip] & ((1u32 << intra) - 1) != 0;
            }
            any
        };
        if skip >= size {
            *self = if need_round {
                BigInt::from(-1i64)
            } else {
                BigInt::zero()
            };
            return;
        }
        let new_len = size - skip;
        let mut out = vec![0u32; new_len];
        for (i, slot) in out.iter_mut().enumerate() {
            let lo = self.digits[skip + i] >> intra;
            let hi = if intra > 0 && skip + i + 1 < size {
                self.digits[skip + i + 1] << (DIGIT_BITS - intra)
            } else {
                0
            };
            *slot = lo | hi;
        }
        self.digits = out;
        self.normalize();
        if need_round {
            *self -= BigInt::one();
        }
    }

    /// Shared loop for AND/OR/XOR: convert each operand digit to its
    /// two's-complement image, apply `op`, and convert the result back when
    /// it is conceptually negative.
    fn bitwise_assign(
        &mut self,
        r: &BigInt,
        new_size: usize,
        new_sign: bool,
        op: impl Fn(u32, u32) -> u32,
    ) {
        self.digits.resize(new_size, 0);
        let mut carry_a = self.negative;
        let mut carry_b = r.negative;
        let mut carry_result = new_sign;
        for i in 0..new_size {
            let mut a = self.digits[i];
            let mut b = r.digit(i);
            if self.negative {
                a = !a;
            }
            if r.negative {
                b = !b;
            }
            if carry_a {
                if a == u32::MAX {
                    a = 0;
                } else {
                    a += 1;
                    carry_a = false;
                }
            }
            if carry_b {
                if b == u32::MAX {
                    b = 0;
                } else {
                    b += 1;
                    carry_b = false;
                }
            }
            let mut result = op(a, b);
            if new_sign {
                result = !result;
            }
            if carry_result {
                if result == u32::MAX {
                    result = 0;
                } else {
                    result += 1;
                    carry_result = false;
                }
            }
            self.digits[i] = result;
        }
        self.negative = new_sign;
        self.normalize();
    }
}

impl ShlAssign<usize> for BigInt {
    fn shl_assign(&mut self, shift: usize) {
        self.shl_digits(shift);
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    fn shl(mut self, shift: usize) -> BigInt {
        self <<= shift;
        self
    }
}

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    fn shl(self, shift: usize) -> BigInt {
        self.clone() << shift
    }
}

impl ShrAssign<usize> for BigInt {
    fn shr_assign(&mut self, shift: usize) {
        self.shr_digits(shift);
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    fn shr(mut self, shift: usize) -> BigInt {
        self >>= shift;
        self
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    fn shr(self, shift: usize) -> BigInt {
        self.clone() >> shift
    }
}

impl BitAndAssign<&BigInt> for BigInt {
    fn bitand_assign(&mut self, rhs: &BigInt) {
        if self.is_zero() {
            return;
        }
        if rhs.is_zero() {
            *self = BigInt::zero();
            return;
        }
        let new_size = self.digits.len().max(rhs.digits.len());
        let new_sign = self.negative && rhs.negative;
        self.bitwise_assign(rhs, new_size, new_sign, |a, b| a & b);
    }
}

impl BitAndAssign<BigInt> for BigInt {
    fn bitand_assign(&mut self, rhs: BigInt) {
        *self &= &rhs;
    }
}

impl BitAnd<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitand(self, rhs: &BigInt) -> BigInt {
        let mut out = self.clone();
        out &= rhs;
        out
    }
}
forward_binop!(BitAnd, bitand);

impl BitOrAssign<&BigInt> for BigInt {
    fn bitor_assign(&mut self, rhs: &BigInt) {
        if rhs.is_zero() {
            return;
        }
        if self.is_zero() {
            *self = rhs.clone();
            return;
        }
        let new_size = self.digits.len().max(rhs.digits.len());
        let new_sign = self.negative || rhs.negative;
        self.bitwise_assign(rhs, new_size, new_sign, |a, b| a | b);
    }
}

impl BitOrAssign<BigInt> for BigInt {
    fn bitor_assign(&mut self, rhs: BigInt) {
        *self |= &rhs;
    }
}

impl BitOr<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitor(self, rhs: &BigInt) -> BigInt {
        let mut out = self.clone();
        out |= rhs;
        out
    }
}
forward_binop!(BitOr, bitor);

impl BitXorAssign<&BigInt> for BigInt {
    fn bitxor_assign(&mut self, rhs: &BigInt) {
        if rhs.is_zero() {
            return;
        }
        if self.is_zero() {
            *self = rhs.clone();
            return;
        }
        let new_size = self.digits.len().max(rhs.digits.len());
        let new_sign = self.negative ^ rhs.negative;
        self.bitwise_assign(rhs, new_size, new_sign, |a, b| a ^ b);
    }
}

impl BitXorAssign<BigInt> for BigInt {
    fn bitxor_assign(&mut self, rhs: BigInt) {
        *self ^= &rhs;
    }
}

impl BitXor<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitxor(self, rhs: &BigInt) -> BigInt {
        let mut out = self.clone();
        out ^= rhs;
        out
    }
}
forward_binop!(BitXor, bitxor);

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        BigInt::from(-1i64) - self
    }
}

impl Not for BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        !&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> BigInt {
        BigInt::parse(s)
    }

    #[test]
    fn test_shl_matches_doubling() {
        let a = n("123456789012345678901234567890");
        assert_eq!((&a << 1), &a + &a);
        assert_eq!(
            (&a << 13).to_string(),
            "1011358015589135801558913580154880"
        );
        assert_eq!((&a << 0), a);
        assert_eq!(BigInt::one() << 128, n("340282366920938463463374607431768211456"));
    }

    #[test]
    fn test_shr_positive() {
        let a = n("123456789012345678901234567890");
        assert_eq!((&a >> 13).to_string(), "15070408814983603381498360");
        assert_eq!(&a >> 200, BigInt::zero());
        assert_eq!(n("20") >> 2, n("5"));
    }

    #[test]
    fn test_shr_negative_floors() {
        assert_eq!(n("-5") >> 1, n("-3"));
        assert_eq!(n("-4") >> 1, n("-2"));
        assert_eq!(n("-1") >> 100, n("-1"));
        let a = n("-123456789012345678901234567890");
        assert_eq!((&a >> 13).to_string(), "-15070408814983603381498361");
        // -(2^40 + 1) >> 3 crosses a digit boundary.
        assert_eq!(n("-1099511627777") >> 3, n("-137438953473"));
    }

    #[test]
    fn test_shift_roundtrip() {
        let a = n("987654321098765432109876543210");
        assert_eq!((&a << 67) >> 67, a);
    }

    #[test]
    fn test_bitwise_small() {
        assert_eq!(n("-60") & n("-50"), n("-60"));
        assert_eq!(n("-60") | n("-50"), n("-50"));
        assert_eq!(n("-60") ^ n("-50"), n("10"));
        assert_eq!(n("-60") & n("50"), n("0"));
        assert_eq!(n("60") | n("-50"), n("-2"));
        assert_eq!(n("60") ^ n("-50"), n("-14"));
    }

    #[test]
    fn test_bitwise_large() {
        let a = n("123456789012345678901234567890");
        let b = n("987654321098765432109876543210");
        assert_eq!((&a & &b).to_string(), "1943960184490269435062782658");
        assert_eq!((&a | &b).to_string(), "1109167149926620841576048328442");
        assert_eq!((&a ^ &b).to_string(), "1107223189742130572140985545784");
        assert_eq!(
            (&(-a.clone()) & &b).to_string(),
            "985710360914275162674813760554"
        );
        assert_eq!(
            (&(-a.clone()) | &(-b.clone())).to_string(),
            "-1943960184490269435062782658"
        );
        assert_eq!(
            (&(-a.clone()) ^ &b).to_string(),
            "-1107223189742130572140985545788"
        );
    }

    #[test]
    fn test_bitwise_identities() {
        let a = n("-987654321098765432109876543210");
        assert_eq!(&a & &a, a);
        assert_eq!(&a | &a, a);
        assert_eq!(&a ^ &a, BigInt::zero());
    }

    #[test]
    fn test_not() {
        assert_eq!(!n("5"), n("-6"));
        assert_eq!(!n("-5"), n("4"));
        assert_eq!(!n("0"), n("-1"));
        let a = n("123456789012345678901234567890");
        assert_eq!(!&a, n("-123456789012345678901234567891"));
    }

    #[test]
    fn test_xor_width_extends_past_short_negative() {
        // The shorter negative operand sign-extends across the full width
        // of the longer one.
        assert_eq!(n("-1") ^ n("4294967296"), n("-4294967297"));
        assert_eq!(n("-1") & n("4294967296"), n("4294967296"));
    }

    #[test]
    fn test_and_clears_low_bits() {
        // Masking with ~1 clears only the low bit, as the exponentiation
        // loops rely on.
        let a = n("123456789012345678901234567891");
        assert_eq!(&a & &!BigInt::one(), n("123456789012345678901234567890"));
    }
}
