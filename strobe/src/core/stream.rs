// Rust
use alloc::vec::Vec;

// Local
use super::{flags::Flags, prp::PRP, strobe::Strobe};
use crate::error::{Error, Result};

/// Incremental cursor over one duplex operation.
///
/// Holds the session mutably borrowed until [`DuplexStream::finish`] is called, so no other
/// operation can start in between. A stream dropped without finishing poisons its session.
pub struct DuplexStream<'a, F: PRP> {
    strobe: &'a mut Strobe<F>,
    op: Flags,
    /// Bytes still expected; `None` for an open-ended stream.
    remaining: Option<usize>,
    /// OR of every processed byte, for MAC verification.
    tally: u8,
    finished: bool,
}

impl<'a, F: PRP> DuplexStream<'a, F> {
    pub(crate) fn new(strobe: &'a mut Strobe<F>, op: Flags, remaining: Option<usize>) -> Self {
        Self {
            strobe,
            op,
            remaining,
            tally: 0,
            finished: false,
        }
    }

    /// Effective mode of the operation, steganography included.
    pub fn mode(&self) -> Flags {
        self.op
    }

    pub fn remaining(&self) -> Option<usize> {
        self.remaining
    }

    /// Process one byte.
    ///
    /// The returned byte is what the operation hands back to the caller; it is only meaningful for
    /// modes that yield output.
    pub fn push(&mut self, byte: u8) -> Result<u8> {
        if let Some(remaining) = self.remaining {
            ensure!(remaining > 0, Error::StreamExhausted);
            self.remaining = Some(remaining - 1);
        }
        let out = self.strobe.duplex_byte(self.op, byte)?;
        self.tally |= out;
        Ok(out)
    }

    /// Process a slice, returning the output for modes that yield any.
    pub fn feed(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut buf = data.to_vec();
        self.feed_in_place(&mut buf)?;
        if self.op.yields_output() {
            Ok(buf)
        } else {
            Ok(Vec::new())
        }
    }

    /// Process a slice, overwriting every byte with its processed value.
    pub fn feed_in_place(&mut self, data: &mut [u8]) -> Result<()> {
        for byte in data.iter_mut() {
            *byte = self.push(*byte)?;
        }
        Ok(())
    }

    /// Process `n` zero bytes, returning the output for modes that yield any.
    pub fn squeeze(&mut self, n: usize) -> Result<Vec<u8>> {
        self.feed(&vec![0; n])
    }

    /// Complete the operation.
    ///
    /// Fails if a bounded stream was not drained, or if a verifying mode saw a non-zero byte. Either
    /// failure leaves the session poisoned.
    pub fn finish(mut self) -> Result<()> {
        if let Some(remaining) = self.remaining {
            ensure!(remaining == 0, Error::StreamNotDrained(remaining));
        }
        ensure!(!self.op.verifies() || self.tally == 0, Error::AuthenticationFailed);
        self.finished = true;
        Ok(())
    }
}

impl<'a, F: PRP> Drop for DuplexStream<'a, F> {
    fn drop(&mut self) {
        if !self.finished {
            self.strobe.poisoned = true;
            tracing::warn!(
                label = %self.strobe.label(),
                mode = self.op.bits(),
                remaining = ?self.remaining,
                "duplex stream abandoned, session poisoned"
            );
        }
    }
}
