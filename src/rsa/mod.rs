// RSA module - textbook keys and block streams
// Exports key types, key-pair generation, and the stream adapters

pub mod decrypt;
pub mod encrypt;
pub mod keygen;

pub use decrypt::DecryptReader;
pub use encrypt::EncryptWriter;
pub use keygen::{DecryptionKey, EncryptionKey, KeyPair};

/// Length in bytes of the random padding ORed into the low bits of every
/// plaintext block before encryption.
pub const PADDING_LENGTH: usize = 16;
