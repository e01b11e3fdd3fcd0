//! Arbitrary-precision signed integers, exact rational numbers, and a
//! textbook RSA implementation built on top of them.
//!
//! The integer kernel uses a sign-magnitude representation over 32-bit
//! digits with schoolbook multiplication, Newton-iteration division, and
//! Miller-Rabin primality testing. [`Fraction`] layers exact rationals
//! over it, and [`rsa`] provides key generation plus block-oriented
//! encrypting/decrypting streams.
//!
//! WARNING: the RSA layer pads blocks with 16 random low bytes rather
//! than OAEP or PKCS#1 v1.5. It is a study implementation and must not be
//! used to protect real data.

pub mod bigint;
pub mod error;
pub mod fraction;
pub mod rng;
pub mod rsa;

pub use bigint::BigInt;
pub use error::{Error, Result};
pub use fraction::Fraction;
