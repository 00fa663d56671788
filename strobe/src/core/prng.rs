//! Strobe-based pseudo-random number generator.
#[cfg(feature = "std")]
use rand::Rng;

use super::{ops::DuplexOps, prp::PRP, strobe::Strobe};
use crate::error::Result;

/// Seed size used when drawing from the operating system.
#[cfg(feature = "std")]
type Seed = [u8; 32];

#[cfg(feature = "std")]
/// Generate a random seed.
fn random_seed() -> Seed {
    rand::thread_rng().gen()
}

/// Pseudo-random number generator backed by a keyed session.
///
/// Every request is one `PRF` operation on the session, so consecutive outputs are chained through
/// the transcript rather than through a counter.
#[derive(Clone)]
pub struct StrobeRng<F: PRP> {
    session: Strobe<F>,
}

impl<F: PRP> StrobeRng<F> {
    /// Derive a generator from a seed, domain-separated by `domain`.
    ///
    /// # Arguments
    /// * `domain` - Protocol label of the underlying session
    /// * `seed` - Secret seed, absorbed as key material
    pub fn from_seed(domain: &str, seed: &[u8]) -> Result<Self> {
        let mut session = Strobe::new(domain)?;
        session.key(seed)?;
        Ok(Self { session })
    }

    /// Seed a generator from the operating system's randomness.
    #[cfg(feature = "std")]
    pub fn from_entropy(domain: &str) -> Result<Self> {
        Self::from_seed(domain, &random_seed())
    }

    /// Mix additional key material into the generator.
    pub fn reseed(&mut self, entropy: &[u8]) -> Result<()> {
        self.session.key(entropy)
    }
}

impl<F: PRP> rand::RngCore for StrobeRng<F> {
    fn next_u32(&mut self) -> u32 {
        let mut v = [0_u8; 4];
        self.session.prf_into(&mut v);
        u32::from_le_bytes(v)
    }
    fn next_u64(&mut self) -> u64 {
        let mut v = [0_u8; 8];
        self.session.prf_into(&mut v);
        u64::from_le_bytes(v)
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.session.prf_into(dest);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl<F: PRP> rand::CryptoRng for StrobeRng<F> {}
