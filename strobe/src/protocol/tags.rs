//! Example control words.
//!
//! The framework is not tied to any of these definitions; they only show that a full TLS-like
//! protocol can be described with them. Real protocols use a very small subset.
//!
//! * `0x00..=0x0F`: symmetric cryptography
//! * `0x10..=0x1F`: key exchange and signatures
//! * `0x20..=0x2F`: headers and other metadata
use crate::{core::flags::Flags, error::Result};

use super::control_word::ControlWord;

const PLAINTEXT: Flags = Flags::SEND_CLR;
const ENCRYPT: Flags = Flags::SEND_ENC;
const MAC_TYPE: Flags = Flags::SEND_MAC;
const PRNG: Flags = Flags::KEY;
const KEY: Flags = Flags::KEY;

/// Unwrap a word built in constant context, turning a rejected definition into a build failure.
const fn must(word: Result<ControlWord>) -> ControlWord {
    match word {
        Ok(word) => word,
        Err(_) => panic!("invalid control word in the registry"),
    }
}

pub const SYM_SCHEME: ControlWord = must(ControlWord::builder("SYM_SCHEME", &[0x00], PLAINTEXT).length_bytes(2).build());
pub const SYM_KEY: ControlWord = must(ControlWord::builder("SYM_KEY", &[0x01], KEY).build());
pub const APP_PLAINTEXT: ControlWord =
    must(ControlWord::builder("APP_PLAINTEXT", &[0x02], PLAINTEXT).length_bytes(2).build());
pub const APP_CIPHERTEXT: ControlWord =
    must(ControlWord::builder("APP_CIPHERTEXT", &[0x03], ENCRYPT).length_bytes(2).build());
pub const NONCE: ControlWord = must(ControlWord::builder("NONCE", &[0x04], PLAINTEXT).length_bytes(2).build());
pub const AUTH_DATA: ControlWord = must(ControlWord::builder("AUTH_DATA", &[0x05], PLAINTEXT).length_bytes(2).build());
/// 16-byte MAC whose header is absorbed but not sent.
pub const MAC: ControlWord = must(
    ControlWord::builder("MAC", &[0x06], MAC_TYPE)
        .length_bytes(2)
        .length(16)
        .explicit(false)
        .build(),
);
/// MAC of at least 16 bytes with an encrypted header, for steganographic sessions.
pub const STEG_MAC: ControlWord = must(
    ControlWord::builder("STEG_MAC", &[0x06], MAC_TYPE)
        .length_bytes(2)
        .min_length(16)
        .control_mode(ENCRYPT.union(Flags::META))
        .build(),
);
pub const SIV_MAC_INNER: ControlWord = must(
    ControlWord::builder("SIV_MAC_INNER", &[0x06], MAC_TYPE)
        .length_bytes(2)
        .length(16)
        .explicit(false)
        .build(),
);
pub const HASH: ControlWord = must(
    ControlWord::builder("HASH", &[0x07], PRNG)
        .length_bytes(2)
        .explicit(false)
        .build(),
);
pub const SIV_PT_INNER: ControlWord = must(ControlWord::builder("SIV_PT_INNER", &[0x0D], PLAINTEXT).explicit(false).build());
pub const SIV_MAC_OUTER: ControlWord = must(ControlWord::builder("SIV_MAC_OUTER", &[0x0E], PLAINTEXT).length(16).build());
pub const RATCHET: ControlWord = must(ControlWord::builder("RATCHET", &[0x0F], Flags::RATCHET).length(32).build());

pub const KEM_SCHEME: ControlWord = must(ControlWord::builder("KEM_SCHEME", &[0x10], PLAINTEXT).length_bytes(2).build());
pub const PUBLIC_KEY: ControlWord = must(ControlWord::builder("PUBLIC_KEY", &[0x11], PLAINTEXT).length_bytes(2).build());
pub const KEM_EPH: ControlWord = must(ControlWord::builder("KEM_EPH", &[0x12], PLAINTEXT).length_bytes(2).build());
pub const KEM_RESULT: ControlWord = must(ControlWord::builder("KEM_RESULT", &[0x13], KEY).build());

pub const SIG_SCHEME: ControlWord = must(ControlWord::builder("SIG_SCHEME", &[0x18], PLAINTEXT).length_bytes(2).build());
pub const SIG_EPH: ControlWord = must(ControlWord::builder("SIG_EPH", &[0x19], PLAINTEXT).length_bytes(2).build());
pub const SIG_CHALLENGE: ControlWord = must(
    ControlWord::builder("SIG_CHALLENGE", &[0x1A], PRNG)
        .length_bytes(2)
        .explicit(false)
        .build(),
);
pub const SIG_RESPONSE: ControlWord = must(ControlWord::builder("SIG_RESPONSE", &[0x1B], ENCRYPT).length_bytes(2).build());

pub const HANDSHAKE: ControlWord = must(ControlWord::builder("HANDSHAKE", &[0x20], PLAINTEXT).length_bytes(2).build());
pub const VERSION: ControlWord = must(ControlWord::builder("VERSION", &[0x21], PLAINTEXT).length_bytes(2).build());
pub const CIPHERSUITE: ControlWord = must(ControlWord::builder("CIPHERSUITE", &[0x22], PLAINTEXT).length_bytes(2).build());
pub const META_PLAINTEXT: ControlWord =
    must(ControlWord::builder("META_PLAINTEXT", &[0x24], PLAINTEXT).length_bytes(2).build());
pub const META_CIPHERTEXT: ControlWord =
    must(ControlWord::builder("META_CIPHERTEXT", &[0x25], PLAINTEXT).length_bytes(2).build());
pub const CERTIFICATE: ControlWord = must(ControlWord::builder("CERTIFICATE", &[0x26], PLAINTEXT).length_bytes(2).build());
pub const ENCRYPTED_CERT: ControlWord =
    must(ControlWord::builder("ENCRYPTED_CERT", &[0x27], ENCRYPT).length_bytes(2).build());
pub const OVER: ControlWord = must(ControlWord::builder("OVER", &[0x2E], MAC_TYPE).length_bytes(2).build());
pub const CLOSE: ControlWord = must(ControlWord::builder("CLOSE", &[0x2F], MAC_TYPE).length_bytes(2).build());

/// Every word of the registry, in tag order.
pub const ALL: &[ControlWord] = &[
    SYM_SCHEME,
    SYM_KEY,
    APP_PLAINTEXT,
    APP_CIPHERTEXT,
    NONCE,
    AUTH_DATA,
    MAC,
    STEG_MAC,
    SIV_MAC_INNER,
    HASH,
    SIV_PT_INNER,
    SIV_MAC_OUTER,
    RATCHET,
    KEM_SCHEME,
    PUBLIC_KEY,
    KEM_EPH,
    KEM_RESULT,
    SIG_SCHEME,
    SIG_EPH,
    SIG_CHALLENGE,
    SIG_RESPONSE,
    HANDSHAKE,
    VERSION,
    CIPHERSUITE,
    META_PLAINTEXT,
    META_CIPHERTEXT,
    CERTIFICATE,
    ENCRYPTED_CERT,
    OVER,
    CLOSE,
];

/// Look a word of the registry up by name.
pub fn by_name(name: &str) -> Option<&'static ControlWord> {
    ALL.iter().find(|word| word.name() == name)
}
