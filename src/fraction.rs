// Exact rational numbers
// Reduced numerator/denominator pairs over BigInt

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::bigint::BigInt;
use crate::error::{Error, Result};

/// An exact rational number.
///
/// Always held in canonical form: the denominator is strictly positive,
/// `gcd(|n|, d) == 1`, the sign lives on the numerator, and zero is
/// uniquely `(0, 1)`. Every constructor and operation re-reduces.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    n: BigInt,
    d: BigInt,
}

impl Fraction {
    pub fn zero() -> Self {
        Fraction {
            n: BigInt::zero(),
            d: BigInt::one(),
        }
    }

    pub fn one() -> Self {
        Fraction {
            n: BigInt::one(),
            d: BigInt::one(),
        }
    }

    /// Construct from a numerator and denominator. A zero denominator is
    /// rejected; a negative one is normalized by flipping both signs.
    pub fn new(numerator: BigInt, denominator: BigInt) -> Result<Self> {
        if denominator.is_zero() {
            return Err(Error::Overflow("divide by zero"));
        }
        Ok(Fraction::make(numerator, denominator))
    }

    /// Internal constructor for denominators already known to be nonzero.
    fn make(numerator: BigInt, denominator: BigInt) -> Self {
        let mut f = Fraction {
            n: numerator,
            d: denominator,
        };
        f.reduce();
        f
    }

    fn reduce(&mut self) {
        if self.n.is_zero() {
            self.d = BigInt::one();
            return;
        }
        let divisor = self.n.gcd(&self.d);
        if divisor > BigInt::one() {
            self.n /= &divisor;
            self.d /= &divisor;
        }
        if self.d.sign() < 0 {
            self.n = -&self.n;
            self.d = -&self.d;
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.n
    }

    pub fn denominator(&self) -> &BigInt {
        &self.d
    }

    pub fn is_zero(&self) -> bool {
        self.n.is_zero()
    }

    pub fn sign(&self) -> i32 {
        self.n.sign()
    }

    pub fn abs(&self) -> Fraction {
        Fraction {
            n: self.n.abs(),
            d: self.d.clone(),
        }
    }

    /// Division with the zero check surfaced as an error.
    pub fn try_div(&self, rhs: &Fraction) -> Result<Fraction> {
        if rhs.n.is_zero() {
            return Err(Error::Overflow("divide by zero"));
        }
        Ok(Fraction::make(&self.n * &rhs.d, &self.d * &rhs.n))
    }

    /// Remainder with the zero check surfaced as an error. The result
    /// carries the dividend's sign, like the integer remainder.
    pub fn try_rem(&self, rhs: &Fraction) -> Result<Fraction> {
        if rhs.n.is_zero() {
            return Err(Error::Overflow("divide by zero"));
        }
        let a = &self.n * &rhs.d;
        let b = &rhs.n * &self.d;
        let d = &self.d * &rhs.d;
        Ok(Fraction::make(&a % &b, d))
    }

    /// Binary exponentiation on numerator and denominator independently;
    /// a negative exponent takes the reciprocal of the positive power.
    pub fn pow(&self, exponent: &BigInt) -> Result<Fraction> {
        if exponent.sign() < 0 {
            let inverse_exponent = -exponent;
            let positive = self.pow(&inverse_exponent)?;
            return Fraction::one().try_div(&positive);
        }
        let n = self.n.pow(exponent)?;
        let d = self.d.pow(exponent)?;
        Ok(Fraction::make(n, d))
    }

    /// Largest integer not above the value.
    pub fn floor(&self) -> BigInt {
        if self.sign() < 0 {
            return -(-self).ceil();
        }
        &self.n / &self.d
    }

    /// Smallest integer not below the value.
    pub fn ceil(&self) -> BigInt {
        if self.sign() < 0 {
            return -(-self).floor();
        }
        &(&self.n + &(&self.d - &BigInt::one())) / &self.d
    }

    /// Round to the nearest multiple of `1/denominator`, half away from
    /// negative infinity: `floor(self * denominator + 1/2) / denominator`.
    pub fn with_denominator(&self, denominator: &BigInt) -> Result<Fraction> {
        if denominator.sign() <= 0 {
            return Err(Error::Domain(
                "can't use setDenominator with denominator <= 0",
            ));
        }
        let rounded = self.scale_and_round(denominator);
        Ok(Fraction::make(rounded, denominator.clone()))
    }

    /// `floor(self * scale + 1/2)`.
    fn scale_and_round(&self, scale: &BigInt) -> BigInt {
        let scaled = Fraction::make(&self.n * scale, self.d.clone());
        let adjusted = &scaled + &Fraction::make(BigInt::one(), BigInt::from(2u32));
        adjusted.floor()
    }

    /// Square root as a fraction over `denominator`:
    /// `isqrt(floor(self * denominator^2 + 1/2)) / denominator`.
    pub fn sqrt(&self, denominator: &BigInt) -> Result<Fraction> {
        if denominator.sign() <= 0 {
            return Err(Error::Domain("can't use sqrt with denominator <= 0"));
        }
        if self.sign() < 0 {
            return Err(Error::Domain("can't use sqrt with v < 0"));
        }
        let rounded = self.scale_and_round(&(denominator * denominator));
        Ok(Fraction::make(rounded.isqrt()?, denominator.clone()))
    }

    /// Decimal expansion with exactly `fractional_digits` digits after the
    /// point, rounded half up; no point is printed for zero digits.
    pub fn to_decimal(&self, fractional_digits: usize) -> String {
        let mut pow10 = BigInt::one();
        for _ in 0..fractional_digits {
            pow10 = &pow10 * 10u32;
        }
        let rounded = self.scale_and_round(&pow10);
        let sign = if rounded.sign() < 0 { "-" } else { "" };
        let magnitude = rounded.abs();
        if fractional_digits == 0 {
            return format!("{sign}{magnitude}");
        }
        let int_part = &magnitude / &pow10;
        let frac_part = &magnitude % &pow10;
        let mut digits = frac_part.to_string();
        while digits.len() < fractional_digits {
            digits.insert(0, '0');
        }
        format!("{sign}{int_part}.{digits}")
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::zero()
    }
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Fraction {
            n: value,
            d: BigInt::one(),
        }
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::from(BigInt::from(value))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.d == BigInt::one() {
            write!(f, "{}", self.n)
        } else {
            write!(f, "{}/{}", self.n, self.d)
        }
    }
}

impl FromStr for Fraction {
    type Err = Error;

    /// `N` or `N/D` with strict integer components. A zero denominator is
    /// a parse error; a negative one is normalized.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            None => Ok(Fraction::from(s.parse::<BigInt>()?)),
            Some((numerator, denominator)) => {
                let n: BigInt = numerator.parse()?;
                let d: BigInt = denominator.parse()?;
                if d.is_zero() {
                    return Err(Error::Parse(format!("zero denominator in '{s}'")));
                }
                Ok(Fraction::make(n, d))
            }
        }
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross products order directly.
        (&self.n * &other.d).cmp(&(&other.n * &self.d))
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            n: -&self.n,
            d: self.d.clone(),
        }
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        -&self
    }
}

impl Add<&Fraction> for &Fraction {
    type Output = Fraction;

    fn add(self, rhs: &Fraction) -> Fraction {
        Fraction::make(
            &(&self.n * &rhs.d) + &(&rhs.n * &self.d),
            &self.d * &rhs.d,
        )
    }
}

impl Sub<&Fraction> for &Fraction {
    type Output = Fraction;

    fn sub(self, rhs: &Fraction) -> Fraction {
        Fraction::make(
            &(&self.n * &rhs.d) - &(&rhs.n * &self.d),
            &self.d * &rhs.d,
        )
    }
}

impl Mul<&Fraction> for &Fraction {
    type Output = Fraction;

    fn mul(self, rhs: &Fraction) -> Fraction {
        Fraction::make(&self.n * &rhs.n, &self.d * &rhs.d)
    }
}

impl Div<&Fraction> for &Fraction {
    type Output = Fraction;

    /// Panics on a zero divisor; use [`Fraction::try_div`] for the checked
    /// form.
    fn div(self, rhs: &Fraction) -> Fraction {
        match self.try_div(rhs) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Rem<&Fraction> for &Fraction {
    type Output = Fraction;

    /// Panics on a zero divisor; use [`Fraction::try_rem`] for the checked
    /// form.
    fn rem(self, rhs: &Fraction) -> Fraction {
        match self.try_rem(rhs) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

macro_rules! fraction_owned_ops {
    ($($imp:ident: $method:ident),*) => {$(
        impl $imp<Fraction> for Fraction {
            type Output = Fraction;
            fn $method(self, rhs: Fraction) -> Fraction {
                (&self).$method(&rhs)
            }
        }
    )*};
}
fraction_owned_ops!(Add: add, Sub: sub, Mul: mul, Div: div, Rem: rem);

impl AddAssign<&Fraction> for Fraction {
    fn add_assign(&mut self, rhs: &Fraction) {
        *self = &*self + rhs;
    }
}

impl SubAssign<&Fraction> for Fraction {
    fn sub_assign(&mut self, rhs: &Fraction) {
        *self = &*self - rhs;
    }
}

impl MulAssign<&Fraction> for Fraction {
    fn mul_assign(&mut self, rhs: &Fraction) {
        *self = &*self * rhs;
    }
}

impl DivAssign<&Fraction> for Fraction {
    fn div_assign(&mut self, rhs: &Fraction) {
        *self = &*self / rhs;
    }
}

impl RemAssign<&Fraction> for Fraction {
    fn rem_assign(&mut self, rhs: &Fraction) {
        *self = &*self % rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(s: &str) -> Fraction {
        s.parse().unwrap()
    }

    #[test]
    fn test_reduction() {
        let v = Fraction::new(BigInt::from(6i64), BigInt::from(-4i64)).unwrap();
        assert_eq!(v, f("-3/2"));
        assert_eq!(v.numerator().to_string(), "-3");
        assert_eq!(v.denominator().to_string(), "2");
        assert_eq!(Fraction::new(BigInt::zero(), BigInt::from(7i64)).unwrap(), Fraction::zero());
        assert!(Fraction::new(BigInt::one(), BigInt::zero()).is_err());
    }

    #[test]
    fn test_scaling_invariance() {
        assert_eq!(f("2/6"), f("1/3"));
        assert_eq!(f("300/900"), f("1/3"));
        assert_eq!(f("-2/-6"), f("1/3"));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(f("5").to_string(), "5");
        assert_eq!(f("-7/3").to_string(), "-7/3");
        assert_eq!(f("6/4").to_string(), "3/2");
        assert!("1/0".parse::<Fraction>().is_err());
        assert!("x/2".parse::<Fraction>().is_err());
        assert!("".parse::<Fraction>().is_err());
    }

    #[test]
    fn test_add_sub() {
        assert_eq!(f("1/3") + f("1/6"), f("1/2"));
        assert_eq!(f("1/2") - f("1/3"), f("1/6"));
        let v = f("-7/12");
        assert_eq!(&v - &v, Fraction::zero());
        assert_eq!(&v + &(-&v), Fraction::zero());
    }

    #[test]
    fn test_mul_div() {
        assert_eq!(f("2/3") * f("9/4"), f("3/2"));
        assert_eq!(f("2/3") / f("4/9"), f("3/2"));
        let g = f("-5/7");
        let h = f("3/11");
        assert_eq!((&g * &h).try_div(&h).unwrap(), g);
        assert_eq!(g.try_div(&h).unwrap() * h.clone(), g);
        assert!(g.try_div(&Fraction::zero()).is_err());
    }

    #[test]
    fn test_rem() {
        assert_eq!(f("7/2") % f("1/3"), f("1/6"));
        assert_eq!(f("-7/2") % f("1/3"), f("-1/6"));
        assert!(f("1/2").try_rem(&Fraction::zero()).is_err());
    }

    #[test]
    fn test_pow() {
        assert_eq!(f("2/3").pow(&BigInt::from(3i64)).unwrap(), f("8/27"));
        assert_eq!(f("2/3").pow(&BigInt::from(-2i64)).unwrap(), f("9/4"));
        assert_eq!(f("5/9").pow(&BigInt::zero()).unwrap(), Fraction::one());
        assert!(Fraction::zero().pow(&BigInt::from(-1i64)).is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(f("1/3") < f("1/2"));
        assert!(f("-1/3") > f("-1/2"));
        assert!(f("7/3") > f("2"));
        assert_eq!(f("4/6").cmp(&f("2/3")), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_floor_ceil() {
        assert_eq!(f("7/2").floor(), BigInt::from(3i64));
        assert_eq!(f("7/2").ceil(), BigInt::from(4i64));
        assert_eq!(f("-7/2").floor(), BigInt::from(-4i64));
        assert_eq!(f("-7/2").ceil(), BigInt::from(-3i64));
        assert_eq!(f("6").floor(), BigInt::from(6i64));
        assert_eq!(f("6").ceil(), BigInt::from(6i64));
    }

    #[test]
    fn test_with_denominator() {
        let rounded = f("2/3").with_denominator(&BigInt::from(1000i64)).unwrap();
        assert_eq!(rounded, f("667/1000"));
        // Exact halves round up.
        let half = f("1/2").with_denominator(&BigInt::one()).unwrap();
        assert_eq!(half, f("1"));
        assert!(f("1/2").with_denominator(&BigInt::zero()).is_err());
        assert!(f("1/2").with_denominator(&BigInt::from(-10i64)).is_err());
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(f("1/2").to_decimal(5), "0.50000");
        assert_eq!(f("1/3").to_decimal(6), "0.333333");
        assert_eq!(f("2/3").to_decimal(6), "0.666667");
        assert_eq!(f("-7/4").to_decimal(3), "-1.750");
        assert_eq!(f("7/2").to_decimal(0), "4");
        assert_eq!(f("-1/4").to_decimal(0), "0");
        assert_eq!(f("123").to_decimal(2), "123.00");
    }

    #[test]
    fn test_sqrt() {
        let scale = BigInt::from(10u32).pow(&BigInt::from(20i64)).unwrap();
        let root = f("2").sqrt(&scale).unwrap();
        assert_eq!(root.to_decimal(20), "1.41421356237309504880");
        let root = f("9/4").sqrt(&BigInt::from(100i64)).unwrap();
        assert_eq!(root, f("3/2"));
        assert!(f("-1").sqrt(&BigInt::one()).is_err());
        assert!(f("2").sqrt(&BigInt::zero()).is_err());
    }

    #[test]
    fn test_assign_ops() {
        let mut v = f("1/3");
        v += &f("1/6");
        assert_eq!(v, f("1/2"));
        v *= &f("4");
        assert_eq!(v, f("2"));
        v -= &f("1/2");
        assert_eq!(v, f("3/2"));
        v /= &f("3");
        assert_eq!(v, f("1/2"));
        v %= &f("1/3");
        assert_eq!(v, f("1/6"));
    }
}
