mod optimized;
mod shared;

pub use optimized::{DigitStorage, SMALL_SIZE};
pub use shared::SharedBuffer;
