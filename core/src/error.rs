use std::{error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BigIntError {
    DivideByZero,
    EmptyString,
    InvalidDigit { ch: char, index: usize },
    IndexOutOfBounds { index: usize, len: usize },
    OutOfRange,
}

impl fmt::Display for BigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivideByZero => write!(f, "division by zero"),
            Self::EmptyString => write!(f, "cannot parse integer from empty string"),
            Self::InvalidDigit { ch, index } => {
                write!(f, "expected a digit, found '{}' at index {}", ch, index)
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {} is out of bounds for length {}", index, len)
            }
            Self::OutOfRange => write!(f, "value does not fit in the target type"),
        }
    }
}

impl error::Error for BigIntError {}
