// Number-theoretic utilities
// gcd, exponentiation, modular arithmetic, and integer square root

use crate::error::{Error, Result};

use super::BigInt;

impl BigInt {
    /// Euclidean greatest common divisor over the absolute values. Returns
    /// zero when either input is zero.
    pub fn gcd(&self, other: &BigInt) -> BigInt {
        if self.is_zero() || other.is_zero() {
            return BigInt::zero();
        }
        let mut a = self.abs();
        let mut b = other.abs();
        loop {
            let c = &a % &b;
            if c.is_zero() {
                return b;
            }
            a = b;
            b = c;
        }
    }

    /// Binary exponentiation. The exponent must be non-negative.
    pub fn pow(&self, exponent: &BigInt) -> Result<BigInt> {
        if exponent.sign() < 0 {
            return Err(Error::Domain("can't use pow with exponent < 0"));
        }
        let mut result = BigInt::one();
        let mut base = self.clone();
        let mut exp = exponent.clone();
        while !exp.is_zero() {
            if exp.is_odd() {
                result *= &base;
            }
            exp >>= 1;
            if !exp.is_zero() {
                base = &base * &base;
            }
        }
        Ok(result)
    }

    /// Modular exponentiation, reducing after every multiplication. The
    /// exponent must be non-negative; a modulus of magnitude <= 1 yields
    /// zero.
    pub fn mod_pow(&self, exponent: &BigInt, modulus: &BigInt) -> Result<BigInt> {
        if exponent.sign() < 0 {
            return Err(Error::Domain("can't use modPow with exponent < 0"));
        }
        Ok(self.mod_pow_unsigned(exponent, modulus))
    }

    /// `mod_pow` for exponents already known to be non-negative.
    pub(crate) fn mod_pow_unsigned(&self, exponent: &BigInt, modulus: &BigInt) -> BigInt {
        if modulus.abs() <= BigInt::one() {
            return BigInt::zero();
        }
        let mut base = self % modulus;
        let mut result = BigInt::one();
        let mut exp = exponent.clone();
        while !exp.is_zero() {
            if exp.is_odd() {
                result = &(&result * &base) % modulus;
            }
            exp >>= 1;
            if !exp.is_zero() {
                base = &(&base * &base) % modulus;
            }
        }
        result
    }

    /// Multiplicative inverse modulo `modulus` by the extended Euclidean
    /// algorithm, normalized into `[0, modulus)`. Fails when the values are
    /// not coprime.
    pub fn modular_inverse(&self, modulus: &BigInt) -> Result<BigInt> {
        let mut t = BigInt::zero();
        let mut new_t = BigInt::one();
        let mut r = modulus.clone();
        let mut new_r = self.clone();
        while !new_r.is_zero() {
            let quotient = &r / &new_r;
            let next_t = &t - &(&quotient * &new_t);
            t = new_t;
            new_t = next_t;
            let next_r = &r - &(&quotient * &new_r);
            r = new_r;
            new_r = next_r;
        }
        if r > BigInt::one() {
            return Err(Error::Domain("there is no inverse"));
        }
        if t.sign() < 0 {
            t += modulus;
        }
        Ok(t)
    }

    /// Integer square root by Newton iteration, exact: the result `x`
    /// satisfies `x*x <= self < (x+1)*(x+1)`. Fails for negative input.
    pub fn isqrt(&self) -> Result<BigInt> {
        if self.is_zero() {
            return Ok(BigInt::zero());
        }
        if self.negative {
            return Err(Error::Domain("can't use isqrt on negative numbers"));
        }
        // Work at 8 extra fractional bits so the iteration settles within
        // reach of the final correction.
        let mut scale = self.log2()?;
        scale -= scale % 2;
        let v_scale = scale + 8;
        let v = self << 8;
        let eps = BigInt::from(2u32);
        let mut x = BigInt::one() << v_scale;
        loop {
            let last_x = x.clone();
            x = &(&x + &(&(&v << v_scale) / &x)) >> 1;
            if (&x - &last_x).abs() <= eps {
                break;
            }
        }
        x >>= v_scale - scale / 2;
        while &x * &x > *self {
            x -= BigInt::one();
        }
        loop {
            let next = &x + &BigInt::one();
            if &next * &next > *self {
                break;
            }
            x = next;
        }
        Ok(x)
    }
}
