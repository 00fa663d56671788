mod codec;
pub use codec::{decode_length, encode_length};

mod control_word;
pub use control_word::{ControlWord, ControlWordBuilder};

mod framing;

mod io;
pub use io::IStream;

mod session;
mod siv;

pub mod tags;
