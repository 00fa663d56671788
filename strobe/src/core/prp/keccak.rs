use generic_array::{typenum::U200, GenericArray};

use super::PRP;

/// The Keccak-f[1600] permutation over a 200-byte state
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeccakF1600;

impl PRP for KeccakF1600 {
    type StateSize = U200; // 1600 / 8

    fn transform(state: &mut GenericArray<u8, Self::StateSize>) {
        let mut lanes = [0_u64; 25];
        for (lane, bytes) in lanes.iter_mut().zip(state.chunks_exact(8)) {
            let mut le = [0_u8; 8];
            le.copy_from_slice(bytes);
            *lane = u64::from_le_bytes(le);
        }
        keccak::f1600(&mut lanes);
        for (bytes, lane) in state.chunks_exact_mut(8).zip(lanes.iter()) {
            bytes.copy_from_slice(&lane.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    /// SHA3-256 driven directly through the permutation (rate 136, domain bits 0x06).
    fn sha3_256(msg: &[u8]) -> [u8; 32] {
        const RATE: usize = 136;
        let mut state = GenericArray::default();
        let mut padded = msg.to_vec();
        padded.push(0x06);
        while padded.len() % RATE != 0 {
            padded.push(0);
        }
        *padded.last_mut().unwrap() |= 0x80;
        for block in padded.chunks(RATE) {
            for (s, b) in state.iter_mut().zip(block) {
                *s ^= b;
            }
            KeccakF1600::transform(&mut state);
        }
        let mut digest = [0_u8; 32];
        digest.copy_from_slice(&state[..32]);
        digest
    }

    #[test]
    fn matches_sha3_vectors() {
        assert_eq!(
            sha3_256(b""),
            hex!("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a")
        );
        assert_eq!(
            sha3_256(b"abc"),
            hex!("3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532")
        );
    }
}
