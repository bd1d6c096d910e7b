mod collection;
mod interval;
mod rect;
mod timestamp;

pub use collection::*;
pub use interval::*;
pub use rect::*;
pub use timestamp::*;
