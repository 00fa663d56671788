use generic_array::{ArrayLength, GenericArray};

pub(crate) mod keccak;

/// Pseudo-random permutation.
///
/// Actually, it may be non-bijective as the inverse transform is not used in sponge construction.
/// The permutation keeps no state of its own: the session owns the state buffer and hands it over
/// whenever a block is full.
#[allow(clippy::upper_case_acronyms)]
pub trait PRP {
    /// Size of the full permutation state in bytes.
    /// The duplexing rate and the capacity are both carved out of it.
    type StateSize: ArrayLength<u8>;

    /// Transform full state.
    fn transform(state: &mut GenericArray<u8, Self::StateSize>);
}
