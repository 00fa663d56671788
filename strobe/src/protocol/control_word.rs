use core::fmt;

use crate::{
    core::flags::Flags,
    error::{Error, Result},
};

use super::codec::fits;

/// Immutable descriptor of one protocol field: how its header and its payload are duplexed.
///
/// The header is the tag bytes followed by an optional little-endian length. Built through
/// [`ControlWord::builder`], which derives the defaults and rejects inconsistent words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlWord {
    name: &'static str,
    tag: &'static [u8],
    data_mode: Flags,
    control_mode: Flags,
    length_bytes: usize,
    length: Option<usize>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    explicit: bool,
}

/// Validating constructor for [`ControlWord`].
#[derive(Clone, Copy, Debug)]
pub struct ControlWordBuilder {
    name: &'static str,
    tag: &'static [u8],
    data_mode: Flags,
    control_mode: Option<Flags>,
    length_bytes: usize,
    length: Option<usize>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    explicit: Option<bool>,
}

impl ControlWord {
    /// Start describing a control word.
    ///
    /// # Arguments
    /// * `name` - Diagnostic name
    /// * `tag` - Wire identifier, possibly empty
    /// * `data_mode` - Operation applied to the payload
    pub const fn builder(name: &'static str, tag: &'static [u8], data_mode: Flags) -> ControlWordBuilder {
        ControlWordBuilder {
            name,
            tag,
            data_mode,
            control_mode: None,
            length_bytes: 0,
            length: None,
            min_length: None,
            max_length: None,
            explicit: None,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn tag(&self) -> &'static [u8] {
        self.tag
    }

    pub const fn data_mode(&self) -> Flags {
        self.data_mode
    }

    pub const fn control_mode(&self) -> Flags {
        self.control_mode
    }

    /// Width of the length header; 0 when no length is sent.
    pub const fn length_bytes(&self) -> usize {
        self.length_bytes
    }

    pub const fn length(&self) -> Option<usize> {
        self.length
    }

    pub const fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub const fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Whether the header was meant to travel on the wire.
    pub const fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Whether the header or the payload travels on the wire.
    pub const fn is_transport(&self) -> bool {
        self.data_mode.union(self.control_mode).contains(Flags::TRANSPORT)
    }

    /// Size of the header: tag plus length bytes.
    pub const fn header_len(&self) -> usize {
        self.tag.len() + self.length_bytes
    }

    /// Whether `received` can still be the start of this word's header.
    pub(crate) fn can_begin_with(&self, received: &[u8]) -> bool {
        if received.len() > self.header_len() {
            return false;
        }
        let n = received.len().min(self.tag.len());
        self.tag[..n] == received[..n]
    }

    /// Check a received length against the fixed, minimum and maximum constraints.
    pub(crate) fn check_length(&self, found: usize) -> Result<()> {
        if let Some(expected) = self.length {
            ensure!(found == expected, Error::LengthMismatch { found, expected });
        }
        if let Some(min) = self.min_length {
            ensure!(found >= min, Error::LengthBelowMinimum { found, min });
        }
        if let Some(max) = self.max_length {
            ensure!(found <= max, Error::LengthAboveMaximum { found, max });
        }
        Ok(())
    }
}

impl fmt::Display for ControlWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl ControlWordBuilder {
    /// Override the mode applied to the header.
    pub const fn control_mode(mut self, mode: Flags) -> Self {
        self.control_mode = Some(mode);
        self
    }

    /// Send the payload length in a little-endian header of `n` bytes.
    pub const fn length_bytes(mut self, n: usize) -> Self {
        self.length_bytes = n;
        self
    }

    /// Fix the payload length.
    pub const fn length(mut self, n: usize) -> Self {
        self.length = Some(n);
        self
    }

    pub const fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub const fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Override whether the header travels on the wire by default.
    pub const fn explicit(mut self, explicit: bool) -> Self {
        self.explicit = Some(explicit);
        self
    }

    /// Derive the defaults and validate the word.
    pub const fn build(self) -> Result<ControlWord> {
        let name = self.name;
        let explicit = match self.explicit {
            Some(explicit) => explicit,
            None => {
                (!self.tag.is_empty() || self.length_bytes > 0) && self.data_mode.contains(Flags::TRANSPORT)
            }
        };
        let control_mode = match self.control_mode {
            Some(mode) => mode,
            None if explicit => Flags::ABSORB.union(Flags::TRANSPORT).union(Flags::META),
            None => Flags::META_AD,
        };
        let mut length = self.length;
        if !self.data_mode.intersects(Flags::ABSORB.union(Flags::TRANSPORT))
            && self.length_bytes == 0
            && length.is_none()
        {
            length = Some(0);
        }

        if self.data_mode.contains(Flags::INBOUND) || control_mode.contains(Flags::INBOUND) {
            return Err(Error::InvalidControlWord(name, "modes are given in the outbound direction"));
        }
        if self.length_bytes > 8 {
            return Err(Error::InvalidControlWord(name, "length header wider than 8 bytes"));
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(Error::InvalidControlWord(name, "minimum length above maximum length"));
            }
        }
        if let Some(fixed) = length {
            if self.min_length.is_some() || self.max_length.is_some() {
                return Err(Error::InvalidControlWord(name, "fixed length combined with a length range"));
            }
            if self.length_bytes > 0 && !fits(fixed, self.length_bytes) {
                return Err(Error::InvalidControlWord(name, "fixed length does not fit the length header"));
            }
        }
        if let Some(max) = self.max_length {
            if self.length_bytes > 0 && !fits(max, self.length_bytes) {
                return Err(Error::InvalidControlWord(name, "maximum length does not fit the length header"));
            }
        }

        Ok(ControlWord {
            name,
            tag: self.tag,
            data_mode: self.data_mode,
            control_mode,
            length_bytes: self.length_bytes,
            length,
            min_length: self.min_length,
            max_length: self.max_length,
            explicit,
        })
    }
}
