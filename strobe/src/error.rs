use displaydoc::Display;

pub type Result<T> = core::result::Result<T, Error>;

/// Log where a failure is raised, then return it.
macro_rules! bail {
    ($err:expr $(,)?) => {{
        let err: $crate::error::Error = $err;
        tracing::debug!(location = concat!(file!(), ":", line!()), kind = ?err.kind(), "{}", err);
        return Err(err);
    }};
}

macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            bail!($err)
        }
    };
}

/// Broad classes of failure. Callers usually only need to branch on these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A received MAC or ciphertext did not verify. The session must be discarded.
    Authentication,
    /// Malformed or ambiguous framing on the wire.
    Protocol,
    /// The API was driven in a way that can never be correct. Not attacker controlled.
    Usage,
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    //////////
    // Authentication
    //////////
    /// Integrity violation. Bad MAC
    AuthenticationFailed,

    //////////
    // Framing
    //////////
    /// None of the expected control words matches the {0} bytes received
    NoMatchingControlWord(usize),
    /// Received length {found} doesn't match expected length {expected}
    LengthMismatch { found: usize, expected: usize },
    /// Received length {found} less than expected min-length {min}
    LengthBelowMinimum { found: usize, min: usize },
    /// Received length {found} greater than expected max-length {max}
    LengthAboveMaximum { found: usize, max: usize },
    /// Explicit length set together with data
    ExplicitLengthWithData,
    /// Used send/recv on non-transport control word {0}; use inject/extract or outbound/inbound instead
    TransportRequired(&'static str),
    /// Used inject/extract on transport control word {0}; use send/recv or outbound/inbound instead
    TransportForbidden(&'static str),
    /// Candidate control words disagree on how their header is framed
    MixedFraming,
    /// Not enough input (expected: {0}, found: {1})
    TruncatedInput(usize, usize),
    /// Input has not been exhausted. Remaining: {0}
    TrailingInput(usize),
    /// Length header of {0} bytes does not fit the address space
    LengthOverflow(usize),

    //////////
    // Usage
    //////////
    /// No candidate control words given
    NoCandidates,
    /// Several candidate control words given but the header is not sent on the wire
    AmbiguousCandidates,
    /// Length of {0} payload is neither given nor fixed
    UnknownLength(&'static str),
    /// Cannot encode number {0} in {1} bytes
    LengthTooLarge(usize, usize),
    /// Size of data does not match explicit length (expected: {0}, found: {1})
    DataLengthMismatch(usize, usize),
    /// Key tree entered mid-block (offset {0})
    KeytreeMisaligned(usize),
    /// Continued operation does not match the previous one
    ContinuationMismatch,
    /// Duplex stream has not been drained. Remaining: {0}
    StreamNotDrained(usize),
    /// Duplex stream is already exhausted
    StreamExhausted,
    /// Session was left inconsistent by an unfinished or failed operation
    Poisoned,
    /// Invalid control word {0}: {1}
    InvalidControlWord(&'static str, &'static str),
    /// Invalid rate {0} for a {1}-byte permutation state
    InvalidRate(usize, usize),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            AuthenticationFailed => ErrorKind::Authentication,
            NoMatchingControlWord(_)
            | LengthMismatch { .. }
            | LengthBelowMinimum { .. }
            | LengthAboveMaximum { .. }
            | ExplicitLengthWithData
            | TransportRequired(_)
            | TransportForbidden(_)
            | MixedFraming
            | TruncatedInput(..)
            | TrailingInput(_)
            | LengthOverflow(_) => ErrorKind::Protocol,
            NoCandidates
            | AmbiguousCandidates
            | UnknownLength(_)
            | LengthTooLarge(..)
            | DataLengthMismatch(..)
            | KeytreeMisaligned(_)
            | ContinuationMismatch
            | StreamNotDrained(_)
            | StreamExhausted
            | Poisoned
            | InvalidControlWord(..)
            | InvalidRate(..) => ErrorKind::Usage,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
