//! Receive-side header parsing: find out which control word was sent, and with which length.
use alloc::vec::Vec;

use crate::{
    core::{flags::Flags, prp::PRP, strobe::Strobe},
    error::{Error, Result},
};

use super::{codec::decode_length, control_word::ControlWord, io::IStream};

/// Pull header bytes from `input` until exactly one candidate is left, then complete its header.
///
/// The header is processed under the control mode the candidates share, turned inbound. Returns the
/// winning word and the payload length it announces (or its fixed length).
pub(crate) fn recv_header<F, I>(
    strobe: &mut Strobe<F>,
    candidates: &[ControlWord],
    input: &mut I,
) -> Result<(ControlWord, Option<usize>)>
where
    F: PRP,
    I: IStream + ?Sized,
{
    let control_mode = match candidates.first() {
        Some(cw) => cw.control_mode(),
        None => bail!(Error::NoCandidates),
    };
    ensure!(
        candidates
            .iter()
            .all(|cw| cw.control_mode() == control_mode && cw.control_mode().contains(Flags::TRANSPORT)),
        Error::MixedFraming
    );

    let mut stream = strobe.begin(control_mode | Flags::INBOUND, None)?;
    let mut received = Vec::new();
    let mut possible: Vec<&ControlWord> = candidates.iter().collect();
    while possible.len() > 1 {
        let byte = input.try_advance(1)?[0];
        received.push(stream.push(byte)?);
        possible.retain(|cw| cw.can_begin_with(&received));
    }
    let cw = match possible.first() {
        Some(cw) => **cw,
        None => bail!(Error::NoMatchingControlWord(received.len())),
    };

    let extra = cw.header_len() - received.len();
    for byte in input.try_advance(extra)? {
        received.push(stream.push(*byte)?);
    }
    let (tag, encoded_length) = received.split_at(cw.tag().len());
    ensure!(tag == cw.tag(), Error::NoMatchingControlWord(received.len()));

    let length = if cw.length_bytes() > 0 {
        let found = decode_length(encoded_length)?;
        cw.check_length(found)?;
        Some(found)
    } else {
        cw.length()
    };
    stream.finish()?;

    tracing::debug!(word = cw.name(), ?length, "control word resolved");
    Ok((cw, length))
}
