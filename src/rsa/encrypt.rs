// RSA encrypting stream
// Buffers plaintext into fixed-size blocks, packs each block into an
// integer with 128 bits of random padding, and writes hex ciphertext

use std::io::{self, Write};

use crate::bigint::BigInt;
use crate::error::{Error, Result};
use crate::rng;

use super::keygen::EncryptionKey;
use super::PADDING_LENGTH;

/// An `io::Write` adapter that encrypts everything written through it.
///
/// Each completed block is emitted as one `0x`-prefixed uppercase hex
/// integer followed by a single space. `flush` (and drop) encrypts any
/// buffered partial block, so the block framing depends on where flushes
/// land; the decrypted byte stream does not.
pub struct EncryptWriter<W: Write> {
    inner: Option<W>,
    key: EncryptionKey,
    buffer: Vec<u8>,
    block_len: usize,
}

impl<W: Write> EncryptWriter<W> {
    /// Wrap `inner`. Fails with a range error when the modulus is too
    /// small to leave room for a block beside the padding.
    pub fn new(key: EncryptionKey, inner: W) -> Result<Self> {
        let byte_len = key.max_input().log2()? / 8;
        if byte_len <= PADDING_LENGTH {
            return Err(Error::Range("modulus too small for stream encryption"));
        }
        let block_len = byte_len - PADDING_LENGTH;
        Ok(EncryptWriter {
            inner: Some(inner),
            key,
            buffer: Vec::with_capacity(block_len),
            block_len,
        })
    }

    fn encrypt_buffer(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let mut v = BigInt::from_ascii_bytes(&self.buffer);
        v <<= PADDING_LENGTH * 8;
        v |= BigInt::random(PADDING_LENGTH * 8, &mut rng::secure());
        let encrypted = self.key.encrypt(&v);
        if let Some(inner) = self.inner.as_mut() {
            write!(inner, "{encrypted:#X} ")?;
        }
        self.buffer.clear();
        Ok(())
    }

    /// Encrypt any buffered partial block, flush, and hand back the inner
    /// writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.encrypt_buffer()?;
        let mut inner = self
            .inner
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "writer already finished"))?;
        inner.flush()?;
        Ok(inner)
    }
}

impl<W: Write> Write for EncryptWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut rest = buf;
        while !rest.is_empty() {
            let take = (self.block_len - self.buffer.len()).min(rest.len());
            self.buffer.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
            if self.buffer.len() == self.block_len {
                self.encrypt_buffer()?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encrypt_buffer()?;
        match self.inner.as_mut() {
            Some(inner) => inner.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for EncryptWriter<W> {
    fn drop(&mut self) {
        // Best effort: a partial block still buffered at drop is encrypted
        // so the message is not silently truncated.
        let _ = self.encrypt_buffer();
        if let Some(inner) = self.inner.as_mut() {
            let _ = inner.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::keygen::test_fixtures::*;
    use super::*;

    fn public_key() -> EncryptionKey {
        EncryptionKey::from_tokens(TEST_PUBLIC_EXPONENT, TEST_MODULUS).unwrap()
    }

    #[test]
    fn test_block_size_follows_modulus() {
        // 254 usable bits: 31 bytes minus 16 bytes of padding.
        let writer = EncryptWriter::new(public_key(), Vec::new()).unwrap();
        assert_eq!(writer.block_len, 15);
    }

    #[test]
    fn test_small_modulus_rejected() {
        // Valid as a key, but no room beside the 16 padding bytes.
        let key = EncryptionKey::new(BigInt::from(65537u32), BigInt::one() << 121).unwrap();
        assert!(matches!(
            EncryptWriter::new(key, Vec::new()),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn test_output_format() {
        let mut writer = EncryptWriter::new(public_key(), Vec::new()).unwrap();
        writer.write_all(b"0123456789ABCDEF0123456789ABC").unwrap();
        let out = writer.finish().unwrap();
        let text = String::from_utf8(out).unwrap();
        // 29 bytes over 15-byte blocks: two ciphertext integers.
        assert!(text.ends_with(' '));
        let tokens: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(tokens.len(), 2);
        let bound = BigInt::parse(TEST_MODULUS);
        for token in tokens {
            assert!(token.starts_with("0x"));
            let value: BigInt = token.parse().unwrap();
            assert!(value.sign() >= 0 && value < bound);
        }
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        let writer = EncryptWriter::new(public_key(), Vec::new()).unwrap();
        let out = writer.finish().unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_flush_of_empty_buffer_is_noop() {
        let mut writer = EncryptWriter::new(public_key(), Vec::new()).unwrap();
        writer.write_all(b"abc").unwrap();
        writer.flush().unwrap();
        writer.flush().unwrap();
        let out = writer.finish().unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.split_whitespace().count(), 1);
    }

    #[test]
    fn test_padding_randomizes_ciphertext() {
        let encrypt_once = || {
            let mut writer = EncryptWriter::new(public_key(), Vec::new()).unwrap();
            writer.write_all(b"same plaintext").unwrap();
            writer.finish().unwrap()
        };
        // Identical plaintext almost surely encrypts differently.
        assert_ne!(encrypt_once(), encrypt_once());
    }
}
