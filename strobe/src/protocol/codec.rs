//! Little-endian length headers.
use alloc::vec::Vec;
use core::convert::TryFrom;

use crate::error::{Error, Result};

/// Whether `value` can be written in `width` bytes.
pub(crate) const fn fits(value: usize, width: usize) -> bool {
    width >= 8 || (value as u64) >> (8 * width as u32) == 0
}

/// Encode `value` little-endian into exactly `width` bytes.
pub fn encode_length(value: usize, width: usize) -> Result<Vec<u8>> {
    ensure!(fits(value, width), Error::LengthTooLarge(value, width));
    let value = value as u64;
    Ok((0..width)
        .map(|i| if i < 8 { (value >> (8 * i)) as u8 } else { 0 })
        .collect())
}

/// Decode a little-endian length of any width.
pub fn decode_length(bytes: &[u8]) -> Result<usize> {
    let mut value: u64 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        if *byte == 0 {
            continue;
        }
        ensure!(i < 8, Error::LengthOverflow(bytes.len()));
        value |= u64::from(*byte) << (8 * i);
    }
    match usize::try_from(value) {
        Ok(value) => Ok(value),
        Err(_) => bail!(Error::LengthOverflow(bytes.len())),
    }
}
