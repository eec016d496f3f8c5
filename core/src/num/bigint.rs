use crate::error::BigIntError;
use crate::num::magnitude::{self, LIMB_BITS};
use crate::num::Sign;
use crate::storage::DigitStorage;
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

/// An arbitrary-precision signed integer.
///
/// The magnitude is stored as base 2^32 limbs, least significant first, in a
/// [`DigitStorage`]: small values live inline, larger ones in a
/// copy-on-write buffer, so cloning a large `BigInt` is cheap until one of
/// the copies changes.
///
/// Every value is kept normalized: there are no leading zero limbs, and zero
/// is never negative.
///
/// ```
/// use bigint_core::BigInt;
///
/// let a: BigInt = "123456789123456789".parse().unwrap();
/// assert_eq!((a + 1i32).to_string(), "123456789123456790");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    pub(crate) sign: Sign,
    pub(crate) digits: DigitStorage,
}

impl BigInt {
    pub fn zero() -> Self {
        Self {
            sign: Sign::Positive,
            digits: DigitStorage::from_elem(0, 1),
        }
    }

    pub fn one() -> Self {
        Self {
            sign: Sign::Positive,
            digits: DigitStorage::from_elem(1, 1),
        }
    }

    /// Builds a value from a sign and little-endian limbs, normalizing both.
    ///
    /// ```
    /// use bigint_core::{BigInt, Sign};
    ///
    /// let n = BigInt::from_limbs(Sign::Negative, vec![0, 1, 0, 0]);
    /// assert_eq!(n, BigInt::from(-(1_i64 << 32)));
    /// assert_eq!(BigInt::from_limbs(Sign::Negative, Vec::<u32>::new()), BigInt::zero());
    /// ```
    pub fn from_limbs(sign: Sign, limbs: impl Into<DigitStorage>) -> Self {
        Self::from_parts(sign, limbs.into())
    }

    pub(crate) fn from_parts(sign: Sign, digits: DigitStorage) -> Self {
        let digits = magnitude::normalize(digits);
        let sign = if magnitude::is_zero(digits.as_slice()) {
            Sign::Positive
        } else {
            sign
        };
        Self { sign, digits }
    }

    fn from_u128_magnitude(sign: Sign, mut n: u128) -> Self {
        let mut digits = DigitStorage::new();
        loop {
            digits.push(magnitude::lo_wide(n));
            n >>= LIMB_BITS;
            if n == 0 {
                break;
            }
        }
        Self::from_parts(sign, digits)
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The normalized magnitude, least significant limb first.
    pub fn limbs(&self) -> &[u32] {
        self.digits.as_slice()
    }

    /// The storage backing the magnitude.
    pub fn digits(&self) -> &DigitStorage {
        &self.digits
    }

    pub fn is_zero(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == 0
    }

    pub fn is_negative(&self) -> bool {
        self.sign.is_negative()
    }

    /// Strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    /// `-1`, `0` or `1`.
    pub fn signum(&self) -> Self {
        if self.is_zero() {
            Self::zero()
        } else {
            Self::from_parts(self.sign, DigitStorage::from_elem(1, 1))
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            sign: Sign::Positive,
            digits: self.digits.clone(),
        }
    }

    /// Number of bits needed to represent the magnitude; zero for zero.
    pub fn bits(&self) -> u64 {
        let top = self.digits.last().unwrap_or(0);
        if top == 0 {
            return 0;
        }
        let len = u64::try_from(self.digits.len()).unwrap_or(u64::MAX);
        (len - 1) * 32 + u64::from(32 - top.leading_zeros())
    }

    /// Adds `rhs` with its sign replaced by `rhs_sign`, which covers both
    /// addition and subtraction.
    fn add_signed(&self, rhs: &Self, rhs_sign: Sign) -> Self {
        let a = self.limbs();
        let b = rhs.limbs();
        if self.sign == rhs_sign {
            return Self::from_parts(self.sign, magnitude::add_magnitudes(a, b));
        }
        match magnitude::cmp_magnitude(a, b) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => Self::from_parts(self.sign, magnitude::sub_magnitudes(a, b)),
            Ordering::Less => Self::from_parts(rhs_sign, magnitude::sub_magnitudes(b, a)),
        }
    }

    /// Truncating division, returning the quotient and the remainder. The
    /// quotient rounds toward zero and the remainder takes the sign of
    /// `self`, so `q * rhs + r == self`.
    ///
    /// ```
    /// use bigint_core::{BigInt, BigIntError};
    ///
    /// let (q, r) = BigInt::from(-7).div_rem(&BigInt::from(2)).unwrap();
    /// assert_eq!((q, r), (BigInt::from(-3), BigInt::from(-1)));
    /// assert_eq!(
    ///     BigInt::from(1).div_rem(&BigInt::zero()),
    ///     Err(BigIntError::DivideByZero)
    /// );
    /// ```
    pub fn div_rem(&self, rhs: &Self) -> Result<(Self, Self), BigIntError> {
        if rhs.is_zero() {
            return Err(BigIntError::DivideByZero);
        }
        let a = self.limbs();
        let b = rhs.limbs();
        let (q, r) = if b.len() == 1 {
            let (q, r) = magnitude::div_rem_limb(a, b[0])?;
            (q, DigitStorage::from_elem(r, 1))
        } else if a.len() < b.len() {
            (DigitStorage::from_elem(0, 1), self.digits.clone())
        } else {
            magnitude::div_rem_knuth(a, b)
        };
        Ok((
            Self::from_parts(Sign::sign_of_product(self.sign, rhs.sign), q),
            Self::from_parts(self.sign, r),
        ))
    }

    pub fn checked_div(&self, rhs: &Self) -> Result<Self, BigIntError> {
        Ok(self.div_rem(rhs)?.0)
    }

    pub fn checked_rem(&self, rhs: &Self) -> Result<Self, BigIntError> {
        Ok(self.div_rem(rhs)?.1)
    }
}

impl Default for BigInt {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::Positive, Sign::Negative) => Ordering::Greater,
            (Sign::Negative, Sign::Positive) => Ordering::Less,
            (Sign::Positive, Sign::Positive) => magnitude::cmp_magnitude(self.limbs(), other.limbs()),
            (Sign::Negative, Sign::Negative) => magnitude::cmp_magnitude(other.limbs(), self.limbs()),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                #[allow(clippy::as_conversions)]
                fn from(n: $t) -> Self {
                    Self::from_u128_magnitude(Sign::Positive, n as u128)
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                #[allow(clippy::as_conversions)]
                fn from(n: $t) -> Self {
                    let n = n as i128;
                    Self::from_u128_magnitude(Sign::from_negative(n < 0), n.unsigned_abs())
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

impl TryFrom<&BigInt> for u64 {
    type Error = BigIntError;

    fn try_from(n: &BigInt) -> Result<Self, BigIntError> {
        if n.is_negative() || n.digits.len() > 2 {
            return Err(BigIntError::OutOfRange);
        }
        let low = u64::from(n.digits[0]);
        let high = u64::from(n.digits.get(1).unwrap_or(0));
        Ok((high << LIMB_BITS) | low)
    }
}

impl TryFrom<&BigInt> for i64 {
    type Error = BigIntError;

    fn try_from(n: &BigInt) -> Result<Self, BigIntError> {
        let magnitude = u64::try_from(&n.abs())?;
        let value = if n.is_negative() {
            -i128::from(magnitude)
        } else {
            i128::from(magnitude)
        };
        i64::try_from(value).map_err(|_| BigIntError::OutOfRange)
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        if !self.is_zero() {
            self.sign = self.sign.flip();
        }
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, rhs: &BigInt) -> BigInt {
        self.add_signed(rhs, rhs.sign)
    }
}

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, rhs: &BigInt) -> BigInt {
        if rhs.is_zero() {
            return self.clone();
        }
        self.add_signed(rhs, rhs.sign.flip())
    }
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, rhs: &BigInt) -> BigInt {
        if self.is_zero() || rhs.is_zero() {
            return BigInt::zero();
        }
        BigInt::from_parts(
            Sign::sign_of_product(self.sign, rhs.sign),
            magnitude::mul_magnitudes(self.limbs(), rhs.limbs()),
        )
    }
}

impl Div<&BigInt> for &BigInt {
    type Output = BigInt;

    /// # Panics
    ///
    /// Panics if `rhs` is zero. Use [`BigInt::checked_div`] to handle that
    /// case instead.
    fn div(self, rhs: &BigInt) -> BigInt {
        match self.div_rem(rhs) {
            Ok((q, _)) => q,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Rem<&BigInt> for &BigInt {
    type Output = BigInt;

    /// # Panics
    ///
    /// Panics if `rhs` is zero. Use [`BigInt::checked_rem`] to handle that
    /// case instead.
    fn rem(self, rhs: &BigInt) -> BigInt {
        match self.div_rem(rhs) {
            Ok((_, r)) => r,
            Err(e) => panic!("{}", e),
        }
    }
}

forward_binop!(impl Add, add, AddAssign, add_assign);
forward_binop!(impl Sub, sub, SubAssign, sub_assign);
forward_binop!(impl Mul, mul, MulAssign, mul_assign);
forward_binop!(impl Div, div, DivAssign, div_assign);
forward_binop!(impl Rem, rem, RemAssign, rem_assign);

forward_scalar_binop!(impl Add, add, AddAssign, add_assign; i32, i64, u32, u64);
forward_scalar_binop!(impl Sub, sub, SubAssign, sub_assign; i32, i64, u32, u64);
forward_scalar_binop!(impl Mul, mul, MulAssign, mul_assign; i32, i64, u32, u64);
forward_scalar_binop!(impl Div, div, DivAssign, div_assign; i32, i64, u32, u64);
forward_scalar_binop!(impl Rem, rem, RemAssign, rem_assign; i32, i64, u32, u64);
