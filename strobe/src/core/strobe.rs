// Rust
use alloc::{string::String, vec::Vec};
use core::{fmt, marker::PhantomData};

// 3rd-party
use generic_array::{typenum::Unsigned, GenericArray};

// Local
use super::{
    config::Builder,
    flags::{Flags, Role},
    prp::PRP,
    stream::DuplexStream,
};
use crate::error::{Error, Result};

/// Framework string absorbed by the initial domain-separation block.
pub const VERSION: &str = "STROBE v0.7";

/// Delimiter pad written right after the last byte of a block.
const PAD: u8 = 0x04;
/// Final pad bit, at the last byte of the over-rate.
const CSHAKE_PAD: u8 = 0x80;
/// Capacity reserved below the state width when no rate is configured.
const DEFAULT_CAPACITY: usize = 32;

type State<F> = GenericArray<u8, <F as PRP>::StateSize>;

/// A duplex sponge session.
///
/// Every cryptographic operation (hashing, encryption, MAC, key derivation) is one call to
/// [`Strobe::duplex`] with a combination of [`Flags`]. A session is exclusively owned; cloning it
/// forks the transcript into an independent copy.
pub struct Strobe<F: PRP> {
    /// Full permutation state.
    st: State<F>,

    /// Duplexing block size in bytes.
    rate: usize,

    /// Current position within the rate part of the state.
    pos: usize,

    /// Position of the last mode marker (plus one), XORed back in when the marker is closed.
    prev_mark: usize,

    /// Assigned on the first transport operation, never changed afterwards.
    role: Option<Role>,

    /// Upgrade transport operations to encrypted ones.
    steg: bool,

    label: String,

    /// Mode of the last operation, used to validate continuations.
    last_op: Option<Flags>,

    /// Set when an operation was abandoned halfway or failed verification.
    pub(crate) poisoned: bool,

    _prp: PhantomData<F>,
}

impl<F: PRP> Strobe<F> {
    /// Create a session with the default configuration.
    ///
    /// # Arguments
    /// * `label` - Protocol label, absorbed as the first operation
    pub fn new(label: &str) -> Result<Self> {
        Self::builder(label).build()
    }

    /// Start configuring a session.
    pub fn builder(label: &str) -> Builder<F> {
        Builder::new(label)
    }

    pub(crate) fn from_parts(label: String, role: Option<Role>, steg: bool, rate: Option<usize>) -> Result<Self> {
        let width = F::StateSize::USIZE;
        let rate = rate.unwrap_or_else(|| width.saturating_sub(DEFAULT_CAPACITY + 2));
        let domain_len = 4 + VERSION.len() + 2;
        ensure!(
            rate >= 2 && rate <= width.saturating_sub(2) && rate <= u8::MAX as usize - 2 && domain_len <= width,
            Error::InvalidRate(rate, width)
        );

        let mut strobe = Self {
            st: GenericArray::default(),
            rate,
            pos: 0,
            prev_mark: 0,
            role,
            steg,
            label,
            last_op: None,
            poisoned: false,
            _prp: PhantomData,
        };

        let mut domain = Vec::with_capacity(domain_len);
        domain.extend_from_slice(&[1, (rate + 2) as u8, 1, VERSION.len() as u8]);
        domain.extend_from_slice(VERSION.as_bytes());
        domain.extend_from_slice(&[1, 0]);
        strobe.st[..domain_len].copy_from_slice(&domain);
        F::transform(&mut strobe.st);

        let label = strobe.label.clone();
        strobe.duplex(Flags::META_AD, label.as_bytes(), None)?;
        tracing::debug!(label = %strobe.label, rate, steg, "initialized session");
        Ok(strobe)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rate(&self) -> usize {
        self.rate
    }

    /// Direction of the session, if a transport operation has fixed it yet.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_steganographic(&self) -> bool {
        self.steg
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Fork the session into an independent copy with the same transcript.
    pub fn fork(&self) -> Self {
        self.clone()
    }

    /// Encrypt every later transport operation, cleartext ones included.
    pub fn begin_steg(&mut self) {
        if !self.steg {
            tracing::debug!(label = %self.label, "steganography enabled");
        }
        self.steg = true;
    }

    /// Mark the session unusable after `err` interrupted a multi-step operation, and hand `err` back.
    pub(crate) fn poison(&mut self, err: Error) -> Error {
        if !self.poisoned {
            self.poisoned = true;
            tracing::warn!(label = %self.label, %err, "operation failed midway, session poisoned");
        }
        err
    }

    fn effective(&self, op: Flags) -> Flags {
        if self.steg && op.contains(Flags::TRANSPORT) {
            op | Flags::CIPHER
        } else {
            op
        }
    }

    /// Close the current block: apply the deferred mark and the pads, then permute.
    fn run_f(&mut self) {
        self.st[self.pos] ^= self.prev_mark as u8;
        self.st[self.pos + 1] ^= PAD;
        self.st[self.rate + 1] ^= CSHAKE_PAD;
        F::transform(&mut self.st);
        self.pos = 0;
        self.prev_mark = 0;
    }

    /// Write the marker and the operation byte that open a new operation.
    fn set_mode(&mut self, op: Flags) {
        self.st[self.pos] ^= self.prev_mark as u8;
        self.pos += 1;
        self.prev_mark = self.pos;
        if self.pos >= self.rate {
            self.run_f();
        }

        let mut mode = op;
        if op.contains(Flags::TRANSPORT) {
            let role = match self.role {
                Some(role) => role,
                None => {
                    let role = Role::from_first_transport(op);
                    tracing::debug!(label = %self.label, %role, "direction assigned");
                    self.role = Some(role);
                    role
                }
            };
            mode ^= role.bit();
        }

        self.st[self.pos] ^= mode.bits();
        self.pos += 1;
        if self.pos >= self.rate || op.intersects(Flags::CIPHER | Flags::KEYTREE) {
            self.run_f();
        }
    }

    /// Masks of the byte rule: (sponge-to-output, sponge-to-sponge).
    fn masks(op: Flags) -> (u8, u16) {
        let s2o: u8 = if op.contains(Flags::CIPHER) { 0xFF } else { 0 };
        let mut s2s: u16 = 0xFFFF;
        if op.contains(Flags::TRANSPORT) && !op.contains(Flags::INBOUND) {
            s2s ^= u16::from(s2o);
        }
        (s2o, s2s)
    }

    fn plain_byte(&mut self, op: Flags, byte: u8) -> u8 {
        let (s2o, s2s) = Self::masks(op);
        let out = byte ^ (self.st[self.pos] & s2o);
        self.st[self.pos] &= s2s as u8;
        self.st[self.pos] ^= out;
        self.pos += 1;
        if self.pos >= self.rate {
            self.run_f();
        }
        out
    }

    /// Process one byte two bits at a time, permuting after each step.
    fn keytree_byte(&mut self, op: Flags, byte: u8) -> Result<u8> {
        ensure!(self.pos == 0, Error::KeytreeMisaligned(self.pos));
        let (s2o, s2s) = Self::masks(op);
        let s2o = s2o >> 6;
        let s2s = (s2s >> 6) as u8;
        let mut out = byte;
        for bpos in (0..8_u32).step_by(2) {
            out ^= (self.st[0] & s2o) << bpos;
            self.st[0] &= s2s;
            self.st[0] ^= (out >> bpos) & 3;
            self.st[1] ^= PAD << 2;
            self.st[self.rate + 1] ^= CSHAKE_PAD;
            F::transform(&mut self.st);
        }
        Ok(out)
    }

    pub(crate) fn duplex_byte(&mut self, op: Flags, byte: u8) -> Result<u8> {
        if op.contains(Flags::KEYTREE) {
            self.keytree_byte(op, byte)
        } else {
            Ok(self.plain_byte(op, byte))
        }
    }

    /// Start a new operation and return a cursor over its bytes.
    ///
    /// # Arguments
    /// * `op` - Operation flags
    /// * `length` - Number of bytes the operation spans; `None` for an open-ended stream
    pub fn begin(&mut self, op: Flags, length: Option<usize>) -> Result<DuplexStream<'_, F>> {
        ensure!(!self.poisoned, Error::Poisoned);
        let op = self.effective(op);
        tracing::trace!(mode = op.bits(), ?length, "begin");
        self.set_mode(op);
        self.last_op = Some(op);
        Ok(DuplexStream::new(self, op, length))
    }

    /// Continue the previous operation without a new mode marker.
    pub fn resume(&mut self, op: Flags, length: Option<usize>) -> Result<DuplexStream<'_, F>> {
        ensure!(!self.poisoned, Error::Poisoned);
        let op = self.effective(op);
        ensure!(self.last_op == Some(op), Error::ContinuationMismatch);
        tracing::trace!(mode = op.bits(), ?length, "resume");
        Ok(DuplexStream::new(self, op, length))
    }

    /// Run one complete operation over a buffer.
    ///
    /// The caller's bytes are processed when the mode reads input and `data` is non-empty;
    /// otherwise `length` (or `data.len()`) zero bytes are. Returns the processed bytes for modes
    /// that yield output and an empty buffer for the rest.
    ///
    /// # Arguments
    /// * `op` - Operation flags
    /// * `data` - Caller bytes
    /// * `length` - Explicit length; must equal `data.len()` when the data is used
    pub fn duplex(&mut self, op: Flags, data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
        let mut buf = Self::select_input(op, data, length)?;
        let mut stream = self.begin(op, Some(buf.len()))?;
        stream.feed_in_place(&mut buf)?;
        stream.finish()?;
        Ok(Self::select_output(op, buf))
    }

    /// Like [`Strobe::duplex`], but extends the previous operation instead of starting a new one.
    pub fn duplex_more(&mut self, op: Flags, data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
        let mut buf = Self::select_input(op, data, length)?;
        let mut stream = self.resume(op, Some(buf.len()))?;
        stream.feed_in_place(&mut buf)?;
        stream.finish()?;
        Ok(Self::select_output(op, buf))
    }

    fn select_input(op: Flags, data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
        if op.reads_input() && !data.is_empty() {
            if let Some(length) = length {
                ensure!(length == data.len(), Error::DataLengthMismatch(length, data.len()));
            }
            Ok(data.to_vec())
        } else {
            Ok(vec![0; length.unwrap_or(data.len())])
        }
    }

    fn select_output(op: Flags, buf: Vec<u8>) -> Vec<u8> {
        if op.yields_output() {
            buf
        } else {
            Vec::new()
        }
    }

    /// Squeeze pseudorandom bytes straight into `out`.
    ///
    /// Only for sessions owned by the crate, which can never be poisoned.
    pub(crate) fn prf_into(&mut self, out: &mut [u8]) {
        let op = Flags::PRF;
        self.set_mode(op);
        self.last_op = Some(op);
        for byte in out.iter_mut() {
            *byte = self.plain_byte(op, 0);
        }
    }
}

impl<F: PRP> Clone for Strobe<F> {
    fn clone(&self) -> Self {
        Self {
            st: self.st.clone(),
            rate: self.rate,
            pos: self.pos,
            prev_mark: self.prev_mark,
            role: self.role,
            steg: self.steg,
            label: self.label.clone(),
            last_op: self.last_op,
            poisoned: self.poisoned,
            _prp: PhantomData,
        }
    }
}

impl<F: PRP> fmt::Debug for Strobe<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}|{}]",
            hex::encode(&self.st[..self.pos]),
            hex::encode(&self.st[self.pos..self.rate]),
            hex::encode(&self.st[self.rate..])
        )
    }
}

impl<F: PRP> fmt::Display for Strobe<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Some(role) => write!(f, "Strobe({}, dir={})", self.label, role),
            None => write!(f, "Strobe({}, dir=unset)", self.label),
        }
    }
}
