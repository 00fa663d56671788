use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// Operation flags. Every duplex operation is one 6-bit combination of these.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// Inbound: data flows from the other party (or from the sponge) to the caller.
        const INBOUND = 1 << 0;
        /// Absorb the data into the transcript.
        const ABSORB = 1 << 1;
        /// Combine data with the sponge output.
        const CIPHER = 1 << 2;
        /// Data travels over the wire.
        const TRANSPORT = 1 << 3;
        /// Framing metadata rather than payload.
        const META = 1 << 4;
        /// Side-channel hardened key tree.
        const KEYTREE = 1 << 5;
    }
}

impl Flags {
    /// Absorb associated data.
    pub const AD: Self = Self::ABSORB;
    /// Absorb framing metadata.
    pub const META_AD: Self = Self::ABSORB.union(Self::META);
    /// Overwrite part of the state with key material.
    pub const KEY: Self = Self::ABSORB.union(Self::CIPHER);
    /// Squeeze pseudorandom output.
    pub const PRF: Self = Self::KEY.union(Self::INBOUND);
    pub const SEND_CLR: Self = Self::ABSORB.union(Self::TRANSPORT);
    pub const RECV_CLR: Self = Self::SEND_CLR.union(Self::INBOUND);
    pub const SEND_ENC: Self = Self::SEND_CLR.union(Self::CIPHER);
    pub const RECV_ENC: Self = Self::SEND_ENC.union(Self::INBOUND);
    pub const SEND_MAC: Self = Self::CIPHER.union(Self::TRANSPORT);
    pub const RECV_MAC: Self = Self::SEND_MAC.union(Self::INBOUND);
    /// Zero part of the state for forward secrecy.
    pub const RATCHET: Self = Self::CIPHER;

    /// Whether caller data is consumed, as opposed to zero bytes.
    pub const fn reads_input(self) -> bool {
        let inbound = self.contains(Self::INBOUND);
        (self.contains(Self::TRANSPORT) && inbound) || (self.contains(Self::ABSORB) && !inbound)
    }

    /// Whether the processed bytes are handed back to the caller.
    pub const fn yields_output(self) -> bool {
        let inbound = self.contains(Self::INBOUND);
        (self.contains(Self::ABSORB) && inbound) || (self.contains(Self::TRANSPORT) && !inbound)
    }

    /// Whether the processed bytes must all be zero (MAC check).
    pub const fn verifies(self) -> bool {
        self.contains(Self::INBOUND) && self.contains(Self::TRANSPORT) && !self.contains(Self::ABSORB)
    }
}

/// Which side of the conversation a session is on.
///
/// Assigned on the first transport operation: whoever sends first is the initiator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Initiator,
    Responder,
}

impl Role {
    pub(crate) fn from_first_transport(mode: Flags) -> Self {
        if mode.contains(Flags::INBOUND) {
            Role::Responder
        } else {
            Role::Initiator
        }
    }

    /// Bit XORed into every transport mode byte.
    pub(crate) fn bit(self) -> Flags {
        match self {
            Role::Initiator => Flags::empty(),
            Role::Responder => Flags::INBOUND,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Initiator => f.write_str("initiator"),
            Role::Responder => f.write_str("responder"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_operations_match_their_codes() {
        assert_eq!(Flags::AD.bits(), 0b00010);
        assert_eq!(Flags::KEY.bits(), 0b00110);
        assert_eq!(Flags::PRF.bits(), 0b00111);
        assert_eq!(Flags::SEND_CLR.bits(), 0b01010);
        assert_eq!(Flags::RECV_CLR.bits(), 0b01011);
        assert_eq!(Flags::SEND_ENC.bits(), 0b01110);
        assert_eq!(Flags::RECV_ENC.bits(), 0b01111);
        assert_eq!(Flags::SEND_MAC.bits(), 0b01100);
        assert_eq!(Flags::RECV_MAC.bits(), 0b01101);
        assert_eq!(Flags::RATCHET.bits(), 0b00100);
    }

    #[test]
    fn only_mac_receive_verifies() {
        let all = [
            Flags::AD,
            Flags::KEY,
            Flags::PRF,
            Flags::SEND_CLR,
            Flags::RECV_CLR,
            Flags::SEND_ENC,
            Flags::RECV_ENC,
            Flags::SEND_MAC,
            Flags::RATCHET,
        ];
        assert!(Flags::RECV_MAC.verifies());
        assert!(all.iter().all(|op| !op.verifies()));
    }

    #[test]
    fn output_and_input_directions() {
        assert!(Flags::SEND_ENC.reads_input() && Flags::SEND_ENC.yields_output());
        assert!(Flags::RECV_ENC.reads_input() && Flags::RECV_ENC.yields_output());
        assert!(!Flags::PRF.reads_input() && Flags::PRF.yields_output());
        assert!(Flags::KEY.reads_input() && !Flags::KEY.yields_output());
        assert!(!Flags::SEND_MAC.reads_input() && Flags::SEND_MAC.yields_output());
        assert!(!Flags::RATCHET.reads_input() && !Flags::RATCHET.yields_output());
    }
}
