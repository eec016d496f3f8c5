use crate::error::BigIntError;
use crate::num::magnitude;
use crate::num::{BigInt, Sign};
use crate::storage::DigitStorage;
use std::fmt;
use std::str::FromStr;

/// Largest power of ten that fits in a limb, and its exponent.
const CHUNK_BASE: u32 = 1_000_000_000;
const CHUNK_DIGITS: usize = 9;

impl BigInt {
    /// Parses an optionally negative decimal integer, e.g. `"-1234"`.
    ///
    /// Leading zeros are accepted, and `"-0"` parses to zero. A leading `+`
    /// and surrounding whitespace are not.
    ///
    /// ```
    /// use bigint_core::{BigInt, BigIntError};
    ///
    /// assert_eq!(BigInt::parse("-007").unwrap(), BigInt::from(-7));
    /// assert_eq!(
    ///     BigInt::parse("12a"),
    ///     Err(BigIntError::InvalidDigit { ch: 'a', index: 2 })
    /// );
    /// ```
    pub fn parse(s: &str) -> Result<Self, BigIntError> {
        let (negative, digits, offset) = match s.strip_prefix('-') {
            Some(rest) => (true, rest, 1),
            None => (false, s, 0),
        };
        if digits.is_empty() {
            return Err(BigIntError::EmptyString);
        }
        if let Some((index, ch)) = digits.char_indices().find(|(_, ch)| !ch.is_ascii_digit()) {
            return Err(BigIntError::InvalidDigit {
                ch,
                index: index + offset,
            });
        }

        let mut mag = DigitStorage::from_elem(0, 1);
        for chunk in digits.as_bytes().chunks(CHUNK_DIGITS) {
            let mut value = 0_u32;
            let mut scale = 1_u32;
            for &b in chunk {
                value = value * 10 + u32::from(b - b'0');
                scale *= 10;
            }
            magnitude::mul_add_limb(&mut mag, scale, value);
        }
        Ok(Self::from_parts(Sign::from_negative(negative), mag))
    }

    fn fmt_magnitude(&self) -> Result<String, BigIntError> {
        let mut chunks = vec![];
        let mut rest = self.digits.clone();
        loop {
            let (q, r) = magnitude::div_rem_limb(rest.as_slice(), CHUNK_BASE)?;
            chunks.push(r);
            if magnitude::is_zero(q.as_slice()) {
                break;
            }
            rest = q;
        }

        let mut s = String::with_capacity(chunks.len() * CHUNK_DIGITS);
        let mut iter = chunks.iter().rev();
        if let Some(first) = iter.next() {
            s.push_str(&first.to_string());
        }
        for chunk in iter {
            s.push_str(&format!("{:09}", chunk));
        }
        Ok(s)
    }
}

impl FromStr for BigInt {
    type Err = BigIntError;

    fn from_str(s: &str) -> Result<Self, BigIntError> {
        Self::parse(s)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.fmt_magnitude().map_err(|_| fmt::Error)?;
        f.pad_integral(!self.is_negative(), "", &digits)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
