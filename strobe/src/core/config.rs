// Rust
use alloc::string::{String, ToString};
use core::marker::PhantomData;

// Local
use super::{flags::Role, prp::PRP, strobe::Strobe};
use crate::error::Result;

/// Builder instance for a [`Strobe`] session
pub struct Builder<F> {
    /// Protocol label absorbed right after the framework string
    label: String,
    /// Direction, normally left to be decided by the first transport operation
    role: Option<Role>,
    /// Upgrade cleartext transport operations to encrypted ones
    steganography: bool,
    /// Duplexing block size, derived from the permutation width when unset
    rate: Option<usize>,
    _prp: PhantomData<F>,
}

impl<F> Builder<F> {
    /// Create a new session builder for the given protocol label
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            role: None,
            steganography: false,
            rate: None,
            _prp: PhantomData,
        }
    }

    /// Fix the direction up front instead of on the first transport operation
    ///
    /// # Arguments
    /// * `role` - Side of the conversation this session plays
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Send and receive cleartext operations encrypted
    pub fn with_steganography(mut self, steganography: bool) -> Self {
        self.steganography = steganography;
        self
    }

    /// Override the duplexing rate
    ///
    /// # Arguments
    /// * `rate` - Block size in bytes; `rate + 2` must fit in both the state and a byte
    pub fn with_rate(mut self, rate: usize) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Validate the configuration and run the initialization of the session
    pub fn build(self) -> Result<Strobe<F>>
    where
        F: PRP,
    {
        Strobe::from_parts(self.label, self.role, self.steganography, self.rate)
    }
}
