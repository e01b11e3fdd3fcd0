// RSA decrypting stream
// Scans whitespace-separated ciphertext integers, decrypts each block,
// strips the padding, and exposes the recovered bytes as a reader

use std::io::{self, BufRead, Read};

use crate::bigint::BigInt;
use crate::error::{Error, Result};

use super::keygen::DecryptionKey;
use super::PADDING_LENGTH;

/// An `io::Read` adapter that decrypts a ciphertext integer stream.
///
/// A token that fails to parse, a value outside `[0, n)`, or a decrypted
/// block with a malformed bit length latches the reader closed: from then
/// on every read reports end of input. I/O errors from the underlying
/// stream propagate as errors instead.
pub struct DecryptReader<R: BufRead> {
    inner: R,
    key: DecryptionKey,
    buffer: Vec<u8>,
    pos: usize,
    good: bool,
}

impl<R: BufRead> DecryptReader<R> {
    /// Wrap `inner`. Fails with a range error when the modulus is too
    /// small to carry a block beside the padding.
    pub fn new(key: DecryptionKey, inner: R) -> Result<Self> {
        let byte_len = key.max_input().log2()? / 8;
        if byte_len <= PADDING_LENGTH {
            return Err(Error::Range("modulus too small for stream decryption"));
        }
        Ok(DecryptReader {
            inner,
            key,
            buffer: Vec::new(),
            pos: 0,
            good: true,
        })
    }

    /// Give back the wrapped stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Pull the next whitespace-separated token, or `None` at end of
    /// input.
    fn read_token(&mut self) -> io::Result<Option<String>> {
        let mut token = Vec::new();
        loop {
            let available = self.inner.fill_buf()?;
            if available.is_empty() {
                break;
            }
            let mut consumed = 0;
            let mut at_delimiter = false;
            for &b in available {
                if b.is_ascii_whitespace() {
                    if token.is_empty() {
                        consumed += 1;
                        continue;
                    }
                    at_delimiter = true;
                    break;
                }
                token.push(b);
                consumed += 1;
            }
            self.inner.consume(consumed);
            if at_delimiter {
                break;
            }
        }
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(String::from_utf8_lossy(&token).into_owned()))
        }
    }

    /// Decrypt the next ciphertext integer into the buffer. Returns false
    /// at end of input or once the reader has latched closed.
    fn decrypt_next(&mut self) -> io::Result<bool> {
        if !self.good {
            return Ok(false);
        }
        let token = match self.read_token()? {
            Some(token) => token,
            None => {
                self.good = false;
                return Ok(false);
            }
        };
        let value: BigInt = match token.parse() {
            Ok(value) => value,
            Err(_) => {
                self.good = false;
                return Ok(false);
            }
        };
        if value.sign() < 0 || value >= *self.key.max_input() {
            self.good = false;
            return Ok(false);
        }
        let mut decrypted = self.key.decrypt(&value);
        decrypted >>= PADDING_LENGTH * 8;
        match decrypted.to_ascii_bytes() {
            Ok(bytes) if !bytes.is_empty() => {
                self.buffer = bytes;
                self.pos = 0;
                Ok(true)
            }
            // A wrong key or corrupt block decrypts to a value whose bit
            // length is not byte aligned; treat the message as over.
            _ => {
                self.good = false;
                Ok(false)
            }
        }
    }
}

impl<R: BufRead> Read for DecryptReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        if self.pos >= self.buffer.len() && !self.decrypt_next()? {
            return Ok(0);
        }
        let take = (self.buffer.len() - self.pos).min(out.len());
        out[..take].copy_from_slice(&self.buffer[self.pos..self.pos + take]);
        self.pos += take;
        Ok(take)
    }
}
