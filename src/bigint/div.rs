// Division and modulus
// Single-digit long division plus Newton-iteration reciprocal division
// for full-width divisors

use std::cmp::Ordering;
use std::ops::{Div, DivAssign, Rem, RemAssign};

use crate::error::{Error, Result};

use super::arith::forward_binop;
use super::{BigInt, DIGIT_BITS};

impl BigInt {
    /// Long division of a non-negative value by a single nonzero digit.
    /// Returns the quotient and the 32-bit remainder.
    pub fn divide_digit(&self, divisor: u32) -> Result<(BigInt, u32)> {
        if divisor == 0 {
            return Err(Error::Overflow("divide by zero"));
        }
        if self.is_zero() {
            return Ok((BigInt::zero(), 0));
        }
        if self.negative {
            return Err(Error::Domain(
                "single-digit division requires a non-negative dividend",
            ));
        }
        let mut quotient = self.digits.clone();
        let mut rem = 0u32;
        for j in (0..quotient.len()).rev() {
            let v = ((rem as u64) << DIGIT_BITS) | quotient[j] as u64;
            rem = (v % divisor as u64) as u32;
            quotient[j] = (v / divisor as u64) as u32;
        }
        Ok((BigInt::from_digits(quotient, false), rem))
    }

    /// Truncated division: the quotient sign is the XOR of the operand
    /// signs and the remainder carries the dividend's sign, with
    /// `0 <= |remainder| < |divisor|`.
    pub fn div_rem(&self, divisor: &BigInt) -> Result<(BigInt, BigInt)> {
        if divisor.is_zero() {
            return Err(Error::Overflow("divide by zero"));
        }
        match self.cmp_magnitude(divisor) {
            Ordering::Less => return Ok((BigInt::zero(), self.clone())),
            Ordering::Equal => {
                let quotient = if self.negative ^ divisor.negative {
                    BigInt::from(-1i64)
                } else {
                    BigInt::one()
                };
                return Ok((quotient, BigInt::zero()));
            }
            Ordering::Greater => {}
        }
        if divisor.digits.len() == 1 {
            let (mut quotient, rem) = self.abs().divide_digit(divisor.digits[0])?;
            if self.negative ^ divisor.negative {
                quotient.negate_in_place();
            }
            let mut remainder = BigInt::from(rem);
            if self.negative {
                remainder.negate_in_place();
            }
            return Ok((quotient, remainder));
        }

        // Newton iteration for a fixed-point reciprocal of the divisor.
        // With L the divisor's bit length, the divisor is scaled to S
        // fractional bits and x converges toward 2^(S+L) / |divisor| from
        // the 1.5 starting point. S carries 32 guard bits past whichever
        // is wider, the divisor or the quotient, so the corrected quotient
        // lands within one step of exact.
        let divisor_abs = divisor.abs();
        let dividend_abs = self.abs();
        let l = divisor_abs.log2()? + 1;
        let dividend_bits = dividend_abs.log2()? + 1;
        let s = DIGIT_BITS + l.max(dividend_bits - l);
        let scaled_divisor = &divisor_abs << (s - l);
        let one = BigInt::one() << s;
        let mut x = BigInt::from(3u32) << (s - 1);
        loop {
            let last_x = x.clone();
            let residual = &one - &((&scaled_divisor * &x) >> s);
            x = &x + &((&x * &residual) >> s);
            if (&last_x - &x).abs() <= BigInt::one() {
                break;
            }
        }

        let mut quotient = (&x * &dividend_abs) >> (l + s);
        let mut remainder = &dividend_abs - &(&quotient * &divisor_abs);
        while remainder.sign() < 0 {
            remainder += &divisor_abs;
            quotient -= BigInt::one();
        }
        while remainder >= divisor_abs {
            remainder -= &divisor_abs;
            quotient += BigInt::one();
        }
        if self.negative {
            remainder.negate_in_place();
        }
        if self.negative ^ divisor.negative {
            quotient.negate_in_place();
        }
        Ok((quotient, remainder))
    }
}

impl Div<&BigInt> for &BigInt {
    type Output = BigInt;

    /// Panics when `rhs` is zero; use [`BigInt::div_rem`] for the checked
    /// form.
    fn div(self, rhs: &BigInt) -> BigInt {
        match self.div_rem(rhs) {
            Ok((quotient, _)) => quotient,
            Err(e) => panic!("{e}"),
        }
    }
}
forward_binop!(Div, div);

impl Rem<&BigInt> for &BigInt {
    type Output = BigInt;

    /// Panics when `rhs` is zero; use [`BigInt::div_rem`] for the checked
    /// form.
    fn rem(self, rhs: &BigInt) -> BigInt {
        match self.div_rem(rhs) {
            Ok((_, remainder)) => remainder,
            Err(e) => panic!("{e}"),
        }
    }
}
forward_binop!(Rem, rem);

impl DivAssign<&BigInt> for BigInt {
    fn div_assign(&mut self, rhs: &BigInt) {
        *self = &*self / rhs;
    }
}

impl DivAssign<BigInt> for BigInt {
    fn div_assign(&mut self, rhs: BigInt) {
        *self = &*self / &rhs;
    }
}

impl RemAssign<&BigInt> for BigInt {
    fn rem_assign(&mut self, rhs: &BigInt) {
        *self = &*self % rhs;
    }
}

impl RemAssign<BigInt> for BigInt {
    fn rem_assign(&mut self, rhs: BigInt) {
        *self = &*self % &rhs;
    }
}
