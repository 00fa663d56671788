/// Duplex sessions, control words, SIV and transcripts.
pub use strobe;
