//! Synthetic-IV authenticated encryption.
//!
//! The sender first runs the message and an inner MAC through its own session, then uses a fork of
//! the session taken beforehand to send the MAC as the IV and to encrypt the message under it. The
//! same message on the same transcript always gives the same ciphertext, and nothing is revealed
//! before the whole message has been authenticated.
use alloc::vec::Vec;

use crate::{
    core::{prp::PRP, strobe::Strobe},
    error::{Error, ErrorKind, Result},
};

use super::tags::{APP_CIPHERTEXT, SIV_MAC_INNER, SIV_MAC_OUTER, SIV_PT_INNER};

impl<F: PRP> Strobe<F> {
    /// Encrypt and authenticate `msg`.
    ///
    /// Wire format: `0x0E ‖ IV (16) ‖ 0x03 ‖ length (2, LE) ‖ ciphertext`.
    pub fn send_siv(&mut self, msg: &[u8]) -> Result<Vec<u8>> {
        let mut outer = self.fork();
        let inner = self.outbound(&SIV_PT_INNER, msg, None)?;
        let mac = self.outbound(&SIV_MAC_INNER, &[], None)?;

        let mut out = outer.outbound(&SIV_MAC_OUTER, &mac, None)?;
        out.extend(outer.outbound(&APP_CIPHERTEXT, &inner, None)?);
        Ok(out)
    }

    /// Decrypt and verify the output of [`Strobe::send_siv`].
    ///
    /// Any malformation of the envelope is reported as an authentication failure.
    pub fn recv_siv(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut outer = self.fork();
        let (mac, inner) = match open_envelope(&mut outer, ciphertext) {
            Ok(parts) => parts,
            Err(err) if err.kind() == ErrorKind::Protocol => {
                tracing::debug!(%err, "malformed SIV envelope");
                bail!(Error::AuthenticationFailed)
            }
            Err(err) => return Err(err),
        };

        let msg = self.inbound(&[SIV_PT_INNER], &inner, None)?;
        self.inbound(&[SIV_MAC_INNER], &mac, None)?;
        Ok(msg)
    }
}

/// Split the envelope into the IV and the decrypted inner message.
fn open_envelope<F: PRP>(outer: &mut Strobe<F>, ciphertext: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut input = ciphertext;
    let (_, mac) = outer.inbound_from(&[SIV_MAC_OUTER], &mut input, None)?;
    let (_, inner) = outer.inbound_from(&[APP_CIPHERTEXT], &mut input, None)?;
    ensure!(input.is_empty(), Error::TrailingInput(input.len()));
    Ok((mac, inner))
}
