// Addition, subtraction, and multiplication
// Digit-wise carry/borrow arithmetic with schoolbook multiplication

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use super::BigInt;

macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl std::ops::$imp<BigInt> for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: BigInt) -> BigInt {
                (&self).$method(&rhs)
            }
        }
        impl std::ops::$imp<&BigInt> for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: &BigInt) -> BigInt {
                (&self).$method(rhs)
            }
        }
        impl std::ops::$imp<BigInt> for &BigInt {
            type Output = BigInt;
            fn $method(self, rhs: BigInt) -> BigInt {
                self.$method(&rhs)
            }
        }
    };
}
pub(crate) use forward_binop;

impl BigInt {
    /// Add `r` with its sign overridden to `r_negative`. The shared core of
    /// addition and subtraction.
    fn add_with_sign(&mut self, r: &BigInt, r_negative: bool) {
        if r.is_zero() {
            return;
        }
        if self.is_zero() {
            self.digits = r.digits.clone();
            self.negative = r_negative;
            return;
        }
        let rhs_len = r.digits.len();
        let len = self.digits.len().max(rhs_len) + 1;
        self.digits.resize(len, 0);
        if self.negative == r_negative {
            // Same sign: magnitude addition.
            let mut carry = 0u64;
            for i in 0..rhs_len {
                let sum = carry + self.digits[i] as u64 + r.digits[i] as u64;
                carry = sum >> 32;
                self.digits[i] = sum as u32;
            }
            let mut i = rhs_len;
            while i < len && carry != 0 {
                let sum = carry + self.digits[i] as u64;
                carry = sum >> 32;
                self.digits[i] = sum as u32;
                i += 1;
            }
        } else {
            // Mixed sign: magnitude subtraction. A borrow out of the top
            // digit means the true magnitude is the two's complement of the
            // buffer, with the opposite sign.
            let mut borrow = 0u64;
            for i in 0..rhs_len {
                let difference =
                    (1u64 << 32) - borrow + self.digits[i] as u64 - r.digits[i] as u64;
                borrow = 1 - (difference >> 32);
                self.digits[i] = difference as u32;
            }
            let mut i = rhs_len;
            while i < len && borrow != 0 {
                let difference = (1u64 << 32) - borrow + self.digits[i] as u64;
                borrow = 1 - (difference >> 32);
                self.digits[i] = difference as u32;
                i += 1;
            }
            if borrow != 0 {
                self.negative = !self.negative;
                let mut j = 0;
                while j < len && self.digits[j] == 0 {
                    j += 1;
                }
                if j < len {
                    self.digits[j] = self.digits[j].wrapping_neg();
                    j += 1;
                }
                while j < len {
                    self.digits[j] = !self.digits[j];
                    j += 1;
                }
            }
        }
        self.normalize();
    }

    fn mul_ref(&self, r: &BigInt) -> BigInt {
        // Iterate over the shorter operand.
        if self.digits.len() > r.digits.len() {
            return r.mul_ref(self);
        }
        let mut out = BigInt::with_capacity(
            self.digits.len() + r.digits.len() + 1,
            self.negative ^ r.negative,
        );
        for i in 0..self.digits.len() {
            let multiplier = self.digits[i] as u64;
            let mut carry = 0u32;
            for j in 0..r.digits.len() {
                let sum = multiplier * r.digits[j] as u64
                    + carry as u64
                    + out.digits[i + j] as u64;
                carry = (sum >> 32) as u32;
                out.digits[i + j] = sum as u32;
            }
            for j in (i + r.digits.len())..out.digits.len() {
                if carry == 0 {
                    break;
                }
                let sum = out.digits[j] as u64 + carry as u64;
                carry = (sum >> 32) as u32;
                out.digits[j] = sum as u32;
            }
        }
        out.normalize();
        out
    }

    /// Fast path for a single-digit multiplier; the result keeps the sign
    /// of `self`.
    pub(crate) fn mul_digit(&self, r: u32) -> BigInt {
        let mut out = BigInt::with_capacity(self.digits.len() + 1, self.negative);
        let multiplier = r as u64;
        let mut carry = 0u32;
        for j in 0..self.digits.len() {
            let sum = multiplier * self.digits[j] as u64 + carry as u64;
            carry = (sum >> 32) as u32;
            out.digits[j] = sum as u32;
        }
        out.digits[self.digits.len()] = carry;
        out.normalize();
        out
    }
}

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, rhs: &BigInt) -> BigInt {
        let mut out = self.clone();
        out += rhs;
        out
    }
}
forward_binop!(Add, add);

impl AddAssign<&BigInt> for BigInt {
    fn add_assign(&mut self, rhs: &BigInt) {
        let rhs_negative = rhs.negative;
        self.add_with_sign(rhs, rhs_negative);
    }
}

impl AddAssign<BigInt> for BigInt {
    fn add_assign(&mut self, rhs: BigInt) {
        *self += &rhs;
    }
}

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, rhs: &BigInt) -> BigInt {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}
forward_binop!(Sub, sub);

impl SubAssign<&BigInt> for BigInt {
    fn sub_assign(&mut self, rhs: &BigInt) {
        // a - b = a + (-b)
        let rhs_negative = !rhs.negative;
        self.add_with_sign(rhs, rhs_negative);
    }
}

impl SubAssign<BigInt> for BigInt {
    fn sub_assign(&mut self, rhs: BigInt) {
        *self -= &rhs;
    }
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, rhs: &BigInt) -> BigInt {
        self.mul_ref(rhs)
    }
}
forward_binop!(Mul, mul);

impl MulAssign<&BigInt> for BigInt {
    fn mul_assign(&mut self, rhs: &BigInt) {
        *self = self.mul_ref(rhs);
    }
}

impl MulAssign<BigInt> for BigInt {
    fn mul_assign(&mut self, rhs: BigInt) {
        *self = self.mul_ref(&rhs);
    }
}

impl Mul<u32> for &BigInt {
    type Output = BigInt;

    fn mul(self, rhs: u32) -> BigInt {
        self.mul_digit(rhs)
    }
}

impl Mul<u32> for BigInt {
    type Output = BigInt;

    fn mul(self, rhs: u32) -> BigInt {
        self.mul_digit(rhs)
    }
}

impl Mul<i32> for &BigInt {
    type Output = BigInt;

    fn mul(self, rhs: i32) -> BigInt {
        let mut out = self.mul_digit(rhs.unsigned_abs());
        if rhs < 0 {
            out.negate_in_place();
        }
        out
    }
}

impl Mul<i32> for BigInt {
    type Output = BigInt;

    fn mul(self, rhs: i32) -> BigInt {
        &self * rhs
    }
}
