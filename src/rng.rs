// Random sources
// Process-wide secure and seeded generators with lazy initialization

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

// Seeded once from the wall clock, like the original engine seeding.
static SEEDED: Lazy<Mutex<StdRng>> = Lazy::new(|| {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    Mutex::new(StdRng::seed_from_u64(seed))
});

fn seeded_fill(dest: &mut [u8]) {
    match SEEDED.lock() {
        Ok(mut rng) => rng.fill_bytes(dest),
        // A poisoned lock means another thread panicked mid-fill; the
        // generator state is still usable for non-secure output.
        Err(poisoned) => poisoned.into_inner().fill_bytes(dest),
    }
}

/// Platform non-deterministic source. Falls back to the process-wide
/// seeded generator whenever the platform source reports failure.
///
/// Not suitable for concurrent use without external synchronization; the
/// fallback path serializes on the shared seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureRng;

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if OsRng.try_fill_bytes(dest).is_err() {
            seeded_fill(dest);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Deterministic process-wide generator, seeded from the clock at first
/// use. Used where cryptographic quality is not required (Miller–Rabin
/// witnesses).
#[derive(Debug, Default, Clone, Copy)]
pub struct SeededRng;

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        seeded_fill(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// The default secure source.
pub fn secure() -> SecureRng {
    SecureRng
}

/// The default non-secure source.
pub fn seeded() -> SeededRng {
    SeededRng
}
