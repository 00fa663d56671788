pub(crate) mod config;
pub(crate) mod flags;
pub(crate) mod ops;
pub(crate) mod prng;
pub(crate) mod prp;
pub(crate) mod stream;
pub(crate) mod strobe;
