//! # STROBE
//! A protocol framework built on a single duplex sponge. Hashing, authenticated encryption, MACs,
//! pseudorandom generation and key derivation are all expressed as operations on one [`Strobe`]
//! session, each operation being a combination of [`Flags`].
//!
//! On top of the raw duplex sits the control-word layer ([`protocol`]): tagged, length-framed
//! operations that can be composed into TLS-like protocols, including a misuse-resistant SIV
//! construction.
//!
//! ```
//! use strobe::{protocol::tags, DuplexOps, KeccakF1600, Strobe};
//!
//! # fn main() -> strobe::Result<()> {
//! let mut alice = Strobe::<KeccakF1600>::new("example")?;
//! let mut bob = Strobe::<KeccakF1600>::new("example")?;
//! alice.key(b"shared secret")?;
//! bob.key(b"shared secret")?;
//!
//! let wire = alice.send(&tags::APP_CIPHERTEXT, b"hello", None)?;
//! assert_eq!(bob.recv(&[tags::APP_CIPHERTEXT], &wire, None)?, b"hello");
//! # Ok(())
//! # }
//! ```

#![no_std]

// Sessions, control words and framing buffers live on the heap
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod error;
pub use error::{Error, ErrorKind, Result};

mod core;

/// Control words, framing and the SIV construction.
pub mod protocol;

/// Merlin-style transcripts.
pub mod transcript;

pub use crate::core::{
    config::Builder,
    flags::{Flags, Role},
    ops::DuplexOps,
    prng::StrobeRng,
    prp::{keccak::KeccakF1600, PRP},
    stream::DuplexStream,
    strobe::{Strobe, VERSION},
};
