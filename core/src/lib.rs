//! Arbitrary-precision signed integers.
//!
//! [`BigInt`] keeps its magnitude in a [`DigitStorage`], which holds short
//! values inline and moves longer ones into a reference-counted
//! [`SharedBuffer`]. Clones share that buffer until one of them is written
//! to.
//!
//! ```
//! use bigint_core::BigInt;
//!
//! let a: BigInt = "340282366920938463463374607431768211456".parse().unwrap();
//! let b = BigInt::from(-7);
//! assert_eq!((&a / &b).to_string(), "-48611766702991209066196372490252601636");
//! assert_eq!((&a % &b).to_string(), "4");
//! ```

#![forbid(unsafe_code)]

mod error;
mod num;
mod storage;

pub use error::BigIntError;
pub use num::{BigInt, Sign};
pub use storage::{DigitStorage, SharedBuffer, SMALL_SIZE};
