pub mod encoder;
pub mod writer;

pub use encoder::{Encodable, Encoder, HumanReadableEncoder, JsonEncoder};
pub use writer::{LineWriter, Writer};
