// Rust
use alloc::vec::Vec;

// Local
use super::{flags::Flags, prp::PRP, strobe::Strobe};
use crate::error::Result;

/// Named duplex operations.
///
/// Only [`DuplexOps::duplex`] has to be provided; every verb is one fixed flag combination on top
/// of it.
pub trait DuplexOps {
    /// Run one complete operation. See [`Strobe::duplex`].
    fn duplex(&mut self, op: Flags, data: &[u8], length: Option<usize>) -> Result<Vec<u8>>;

    /// Absorb associated data.
    fn ad(&mut self, data: &[u8]) -> Result<()> {
        self.duplex(Flags::AD, data, None).map(drop)
    }

    /// Absorb framing metadata.
    fn meta_ad(&mut self, data: &[u8]) -> Result<()> {
        self.duplex(Flags::META_AD, data, None).map(drop)
    }

    fn key(&mut self, key: &[u8]) -> Result<()> {
        self.duplex(Flags::KEY, key, None).map(drop)
    }

    /// Squeeze `n` pseudorandom bytes.
    fn prf(&mut self, n: usize) -> Result<Vec<u8>> {
        self.duplex(Flags::PRF, &[], Some(n))
    }

    fn send_clr(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.duplex(Flags::SEND_CLR, data, None)
    }

    fn recv_clr(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.duplex(Flags::RECV_CLR, data, None)
    }

    /// Encrypt `plaintext`, returning the ciphertext.
    fn send_enc(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.duplex(Flags::SEND_ENC, plaintext, None)
    }

    /// Decrypt `ciphertext`, returning the plaintext. Not authenticated until a MAC is checked.
    fn recv_enc(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.duplex(Flags::RECV_ENC, ciphertext, None)
    }

    /// Produce an `n`-byte MAC over the transcript so far.
    fn send_mac(&mut self, n: usize) -> Result<Vec<u8>> {
        self.duplex(Flags::SEND_MAC, &[], Some(n))
    }

    /// Check a received MAC.
    fn recv_mac(&mut self, tag: &[u8]) -> Result<()> {
        self.duplex(Flags::RECV_MAC, tag, None).map(drop)
    }

    /// Zero `n` bytes of state, preventing rollback of the transcript.
    fn ratchet(&mut self, n: usize) -> Result<()> {
        self.duplex(Flags::RATCHET, &[], Some(n)).map(drop)
    }
}

impl<F: PRP> DuplexOps for Strobe<F> {
    fn duplex(&mut self, op: Flags, data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
        Strobe::duplex(self, op, data, length)
    }
}
