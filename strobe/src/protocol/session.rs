//! Control-word verbs on a session.
use alloc::vec::Vec;

use crate::{
    core::{flags::Flags, prp::PRP, strobe::Strobe},
    error::{Error, Result},
};

use super::{codec::encode_length, control_word::ControlWord, framing, io::IStream};

impl<F: PRP> Strobe<F> {
    /// Send or inject `data` under a control word, returning whatever goes on the wire.
    ///
    /// The header (tag and length) is duplexed under the word's control mode, the payload under its
    /// data mode. The payload length is, in order of precedence, `length`, the word's fixed length,
    /// or the size of `data` when the word carries a length header.
    ///
    /// # Arguments
    /// * `cw` - Control word describing the field
    /// * `data` - Payload; must be empty when `length` is given
    /// * `length` - Payload length for modes that don't consume `data` (MACs, ratchets)
    pub fn outbound(&mut self, cw: &ControlWord, data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
        ensure!(length.is_none() || data.is_empty(), Error::ExplicitLengthWithData);
        let length = match length.or_else(|| cw.length()) {
            Some(length) => Some(length),
            None if cw.length_bytes() > 0 => Some(data.len()),
            None => None,
        };

        if let Some(length) = length {
            if cw.data_mode().reads_input() && !data.is_empty() {
                ensure!(length == data.len(), Error::DataLengthMismatch(length, data.len()));
            }
        }

        let mut header = cw.tag().to_vec();
        if let Some(length) = length.filter(|_| cw.length_bytes() > 0) {
            header.extend(encode_length(length, cw.length_bytes())?);
        }

        tracing::trace!(word = cw.name(), ?length, "outbound");
        let mut out = self.duplex(cw.control_mode(), &header, None)?;
        match self.duplex(cw.data_mode(), data, length) {
            Ok(payload) => {
                out.extend(payload);
                Ok(out)
            }
            Err(err) => Err(self.poison(err)),
        }
    }

    /// [`Strobe::outbound`] for words that put something on the wire.
    pub fn send(&mut self, cw: &ControlWord, data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
        ensure!(cw.is_transport(), Error::TransportRequired(cw.name()));
        self.outbound(cw, data, length)
    }

    /// [`Strobe::outbound`] for words that only affect the transcript.
    pub fn inject(&mut self, cw: &ControlWord, data: &[u8], length: Option<usize>) -> Result<()> {
        ensure!(!cw.is_transport(), Error::TransportForbidden(cw.name()));
        self.outbound(cw, data, length).map(drop)
    }

    /// Receive one field from `input`, which is left positioned after it.
    ///
    /// When the candidates frame their header on the wire, the header decides which candidate was
    /// sent and how long the payload is. Otherwise exactly one candidate is expected and its length
    /// must be known from `length` or from the word itself. A payload of unknown length takes the
    /// rest of the input.
    pub fn inbound_from<I>(
        &mut self,
        cws: &[ControlWord],
        input: &mut I,
        length: Option<usize>,
    ) -> Result<(ControlWord, Vec<u8>)>
    where
        I: IStream + ?Sized,
    {
        ensure!(!cws.is_empty(), Error::NoCandidates);
        let (cw, length) = if cws.iter().any(|cw| cw.control_mode().contains(Flags::TRANSPORT)) {
            let (cw, framed) = framing::recv_header(self, cws, input)?;
            match payload_length(&cw, framed, length) {
                Ok(length) => (cw, length),
                Err(err) => return Err(self.poison(err)),
            }
        } else {
            ensure!(cws.len() == 1, Error::AmbiguousCandidates);
            let cw = cws[0];
            let length = length.or_else(|| cw.length());
            let mut header = cw.tag().to_vec();
            if cw.length_bytes() > 0 {
                match length {
                    Some(length) => header.extend(encode_length(length, cw.length_bytes())?),
                    None => bail!(Error::UnknownLength(cw.name())),
                }
            }
            self.duplex(cw.control_mode(), &header, None)?;
            (cw, length)
        };

        match self.inbound_payload(&cw, input, length) {
            Ok(data) => Ok((cw, data)),
            Err(err) => Err(self.poison(err)),
        }
    }

    fn inbound_payload<I>(&mut self, cw: &ControlWord, input: &mut I, length: Option<usize>) -> Result<Vec<u8>>
    where
        I: IStream + ?Sized,
    {
        let mode = inbound_mode(cw);
        let payload: &[u8] = match (mode.reads_input(), length) {
            (false, _) => &[],
            (true, Some(length)) => input.try_advance(length)?,
            (true, None) => input.rest(),
        };
        tracing::trace!(word = cw.name(), ?length, "inbound");
        self.duplex(mode, payload, length)
    }

    /// Dual of [`Strobe::outbound`]: receive a single field that must span all of `data`.
    pub fn inbound(&mut self, cws: &[ControlWord], data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
        let mut input = data;
        let (_, out) = self.inbound_from(cws, &mut input, length)?;
        if !input.is_empty() {
            return Err(self.poison(Error::TrailingInput(input.len())));
        }
        Ok(out)
    }

    /// [`Strobe::inbound`] for words that travel on the wire.
    pub fn recv(&mut self, cws: &[ControlWord], data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
        if let Some(cw) = cws.iter().find(|cw| !cw.is_transport()) {
            bail!(Error::TransportRequired(cw.name()));
        }
        self.inbound(cws, data, length)
    }

    /// [`Strobe::inbound`] for words that never touch the wire, e.g. derived keys or hashes.
    pub fn extract(&mut self, cw: &ControlWord, length: Option<usize>) -> Result<Vec<u8>> {
        ensure!(!cw.is_transport(), Error::TransportForbidden(cw.name()));
        self.inbound(&[*cw], &[], length)
    }
}

/// Data mode of a received payload: the word's mode, turned inbound when it touches the transcript
/// or the wire.
fn inbound_mode(cw: &ControlWord) -> Flags {
    let mut mode = cw.data_mode();
    if mode.intersects(Flags::ABSORB | Flags::TRANSPORT) {
        mode |= Flags::INBOUND;
    }
    mode
}

/// Settle the payload length of a framed field.
///
/// A length read off the wire only sizes payloads that are read off the wire too; a payload made of
/// zero bytes must have its length fixed by the word or given by the caller.
fn payload_length(cw: &ControlWord, framed: Option<usize>, expected: Option<usize>) -> Result<Option<usize>> {
    match (framed, expected) {
        (Some(found), Some(expected)) => {
            ensure!(found == expected, Error::LengthMismatch { found, expected });
            Ok(Some(found))
        }
        (Some(_), None) if !inbound_mode(cw).reads_input() && cw.length().is_none() => {
            bail!(Error::UnknownLength(cw.name()))
        }
        (framed, expected) => Ok(framed.or(expected)),
    }
}
