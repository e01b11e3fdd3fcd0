// RSA key generation
// Key pairs over the in-crate integers: two probable primes, e = 65537,
// d by modular inverse

use std::fmt;

use log::debug;
use rand::RngCore;

use crate::bigint::{BigInt, DEFAULT_CERTAINTY};
use crate::error::{Error, Result};

/// Keys are rejected outright when the exponent is trivial or the modulus
/// is below 2^120.
fn check_key(exponent: &BigInt, modulus: &BigInt) -> Result<()> {
    if *exponent <= BigInt::one() || *modulus < (BigInt::one() << 120) {
        return Err(Error::BadKey);
    }
    Ok(())
}

/// The public half of an RSA key pair: `(e, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionKey {
    exponent: BigInt,
    modulus: BigInt,
}

impl EncryptionKey {
    pub fn new(exponent: BigInt, modulus: BigInt) -> Result<Self> {
        check_key(&exponent, &modulus)?;
        Ok(EncryptionKey { exponent, modulus })
    }

    /// Parse from the wire format: two integer tokens, `exponent` then
    /// `modulus`, decimal or `0x` hex.
    pub fn from_tokens(exponent: &str, modulus: &str) -> Result<Self> {
        EncryptionKey::new(exponent.parse()?, modulus.parse()?)
    }

    /// Every message block must be strictly below this bound.
    pub fn max_input(&self) -> &BigInt {
        &self.modulus
    }

    pub fn encrypt(&self, v: &BigInt) -> BigInt {
        v.mod_pow_unsigned(&self.exponent, &self.modulus)
    }

    /// The same computation as [`EncryptionKey::encrypt`], named for its
    /// role when checking a signature made with the private key.
    pub fn decrypt_signature(&self, v: &BigInt) -> BigInt {
        self.encrypt(v)
    }
}

impl fmt::Display for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.exponent, self.modulus)
    }
}

/// The private half of an RSA key pair: `(d, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptionKey {
    exponent: BigInt,
    modulus: BigInt,
}

impl DecryptionKey {
    pub fn new(exponent: BigInt, modulus: BigInt) -> Result<Self> {
        check_key(&exponent, &modulus)?;
        Ok(DecryptionKey { exponent, modulus })
    }

    /// Parse from the wire format: two integer tokens, `exponent` then
    /// `modulus`, decimal or `0x` hex.
    pub fn from_tokens(exponent: &str, modulus: &str) -> Result<Self> {
        DecryptionKey::new(exponent.parse()?, modulus.parse()?)
    }

    /// Every ciphertext block must be strictly below this bound.
    pub fn max_input(&self) -> &BigInt {
        &self.modulus
    }

    pub fn decrypt(&self, v: &BigInt) -> BigInt {
        v.mod_pow_unsigned(&self.exponent, &self.modulus)
    }

    /// The same computation as [`DecryptionKey::decrypt`], named for its
    /// role when producing a signature.
    pub fn encrypt_signature(&self, v: &BigInt) -> BigInt {
        self.decrypt(v)
    }
}

impl fmt::Display for DecryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.exponent, self.modulus)
    }
}

/// A freshly generated `(e, d, n)` triple. The primes it was built from
/// are discarded once `n` and `phi` have been computed.
#[derive(Debug, Clone)]
pub struct KeyPair {
    e: BigInt,
    d: BigInt,
    n: BigInt,
}

impl KeyPair {
    /// Generate a key pair of at least `bit_count` total bits: two
    /// probable primes of `bit_count / 2` bits each, `n = u * v`,
    /// `d = e^-1 mod (u-1)(v-1)` with `e = 65537`. Prime candidates come
    /// from `gen_rng`; Miller-Rabin witnesses come from `test_rng`.
    pub fn generate<G, T>(bit_count: usize, gen_rng: &mut G, test_rng: &mut T) -> Result<KeyPair>
    where
        G: RngCore + ?Sized,
        T: RngCore + ?Sized,
    {
        let prime_bits = bit_count >> 1;
        if prime_bits < 128 {
            return Err(Error::Range("bitCount out of range"));
        }
        let e = BigInt::from(65537u32);
        loop {
            let u = BigInt::make_probable_prime(prime_bits, DEFAULT_CERTAINTY, gen_rng, test_rng);
            let v = BigInt::make_probable_prime(prime_bits, DEFAULT_CERTAINTY, gen_rng, test_rng);
            if u == v {
                continue;
            }
            let phi = &(&u - &BigInt::one()) * &(&v - &BigInt::one());
            match e.modular_inverse(&phi) {
                Ok(d) => {
                    return Ok(KeyPair { n: &u * &v, d, e });
                }
                Err(_) => {
                    // e divides phi for this prime pair; draw new primes.
                    debug!("65537 not invertible mod phi, regenerating primes");
                }
            }
        }
    }

    pub fn encryption_key(&self) -> EncryptionKey {
        EncryptionKey {
            exponent: self.e.clone(),
            modulus: self.n.clone(),
        }
    }

    pub fn decryption_key(&self) -> DecryptionKey {
        DecryptionKey {
            exponent: self.d.clone(),
            modulus: self.n.clone(),
        }
    }
}
