//! Merlin-style transcripts for non-interactive proofs.
//!
//! Every message is framed with its label and its length, so transcripts that differ only in how
//! bytes are split between messages never collide.
use alloc::vec::Vec;
use core::convert::TryFrom;

use crate::{
    core::{
        flags::Flags,
        ops::DuplexOps,
        prp::{keccak::KeccakF1600, PRP},
        strobe::Strobe,
    },
    error::{Error, Result},
};

/// Session label of every transcript.
const MERLIN_PROTOCOL_LABEL: &str = "Merlin v1.0";

/// A public-coin transcript on top of a session.
pub struct Transcript<F: PRP = KeccakF1600> {
    strobe: Strobe<F>,
}

impl<F: PRP> Transcript<F> {
    /// Start a transcript for the application protocol `app_label`.
    pub fn new(app_label: &[u8]) -> Result<Self> {
        let mut transcript = Self {
            strobe: Strobe::new(MERLIN_PROTOCOL_LABEL)?,
        };
        transcript.append_message(b"dom-sep", app_label)?;
        Ok(transcript)
    }

    /// Absorb a labelled message.
    pub fn append_message(&mut self, label: &[u8], message: &[u8]) -> Result<()> {
        self.frame(label, message.len())?;
        self.strobe.ad(message)
    }

    /// Absorb a labelled integer, little-endian.
    pub fn append_u64(&mut self, label: &[u8], x: u64) -> Result<()> {
        self.append_message(label, &x.to_le_bytes())
    }

    /// Squeeze `n` labelled challenge bytes, bound to everything absorbed so far.
    pub fn challenge_bytes(&mut self, label: &[u8], n: usize) -> Result<Vec<u8>> {
        self.frame(label, n)?;
        self.strobe.prf(n)
    }

    fn frame(&mut self, label: &[u8], length: usize) -> Result<()> {
        let length = match u32::try_from(length) {
            Ok(length) => length,
            Err(_) => bail!(Error::LengthTooLarge(length, 4)),
        };
        self.strobe.meta_ad(label)?;
        self.strobe.duplex_more(Flags::META_AD, &length.to_le_bytes(), None)?;
        Ok(())
    }
}

impl<F: PRP> Clone for Transcript<F> {
    fn clone(&self) -> Self {
        Self {
            strobe: self.strobe.fork(),
        }
    }
}
