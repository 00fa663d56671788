//! Lightweight input cursor over received bytes.
use alloc::string::String;

use crate::error::{Error, Result};

/// Read
pub trait IStream {
    /// Try get n bytes from the stream, returning a slice to the buffer.
    fn try_advance(&mut self, n: usize) -> Result<&[u8]>;

    /// Everything not consumed yet, consuming it.
    fn rest(&mut self) -> &[u8];

    /// Number of bytes not consumed yet.
    fn remaining(&self) -> usize;

    /// Dump stream debug info.
    fn dump(&self) -> String;
}

impl<'b> IStream for &'b [u8] {
    fn try_advance(&mut self, n: usize) -> Result<&[u8]> {
        ensure!(n <= self.len(), Error::TruncatedInput(n, self.len()));
        let input: &'b [u8] = *self;
        let (head, tail) = input.split_at(n);
        *self = tail;
        Ok(head)
    }

    fn rest(&mut self) -> &[u8] {
        let input: &'b [u8] = *self;
        *self = &input[input.len()..];
        input
    }

    fn remaining(&self) -> usize {
        self.len()
    }

    fn dump(&self) -> String {
        hex::encode(self)
    }
}
