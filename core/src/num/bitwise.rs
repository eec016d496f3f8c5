//! Bitwise operators and shifts.
//!
//! Negative values behave as if stored in infinite-width two's complement,
//! like the primitive signed integers. Internally each operand is encoded in
//! two's complement at a common width with one extra guard limb, so the top
//! limb is pure sign extension; the result is decoded back to
//! sign-magnitude form.

use crate::num::magnitude::{self, LIMB_BITS};
use crate::num::{BigInt, Sign};
use crate::storage::DigitStorage;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::ops::{Shl, ShlAssign, Shr, ShrAssign};

/// Two's complement negation in place: invert every limb, then add one.
fn negate_in_place(limbs: &mut [u32]) {
    let mut carry = 1_u64;
    for limb in limbs {
        let cur = u64::from(!*limb) + carry;
        *limb = magnitude::lo(cur);
        carry = cur >> LIMB_BITS;
    }
}

/// Encodes `value` in two's complement, `len` limbs wide. `len` must exceed
/// the magnitude's length so the top limb holds only sign bits.
fn to_twos_complement(value: &BigInt, len: usize) -> DigitStorage {
    debug_assert!(len > value.digits.len());

    let mut limbs = value.digits.clone();
    limbs.resize(len);
    if value.is_negative() {
        negate_in_place(limbs.as_mut_slice());
    }
    limbs
}

fn from_twos_complement(mut limbs: DigitStorage, sign: Sign) -> BigInt {
    if sign.is_negative() {
        negate_in_place(limbs.as_mut_slice());
    }
    BigInt::from_parts(sign, limbs)
}

impl BigInt {
    fn bitwise(&self, other: &Self, op: impl Fn(u32, u32) -> u32) -> Self {
        let len = self.digits.len().max(other.digits.len()) + 1;
        let mut result = to_twos_complement(self, len);
        let rhs = to_twos_complement(other, len);
        for (x, y) in result.as_mut_slice().iter_mut().zip(rhs.iter()) {
            *x = op(*x, y);
        }
        let sign_bit = op(
            u32::from(self.is_negative()),
            u32::from(other.is_negative()),
        ) & 1;
        from_twos_complement(result, Sign::from_negative(sign_bit == 1))
    }

    /// Multiplies by `2^bits`.
    pub fn shl_bits(&self, bits: usize) -> Self {
        if bits == 0 || self.is_zero() {
            return self.clone();
        }
        Self::from_parts(self.sign, magnitude::shl_magnitude(self.limbs(), bits))
    }

    /// Arithmetic right shift: divides by `2^bits`, rounding toward negative
    /// infinity.
    ///
    /// ```
    /// use bigint_core::BigInt;
    ///
    /// assert_eq!(BigInt::from(-20).shr_bits(2), BigInt::from(-5));
    /// assert_eq!(BigInt::from(-21).shr_bits(2), BigInt::from(-6));
    /// ```
    pub fn shr_bits(&self, bits: usize) -> Self {
        if bits == 0 {
            return self.clone();
        }
        if !self.is_negative() {
            return Self::from_parts(Sign::Positive, magnitude::shr_magnitude(self.limbs(), bits));
        }

        let len = self.digits.len() + 1;
        let limb_shift = bits / LIMB_BITS;
        let bit_shift = bits % LIMB_BITS;
        if limb_shift >= len {
            return -Self::one();
        }

        let encoded = to_twos_complement(self, len);
        let src = encoded.as_slice();
        let mut shifted = DigitStorage::from_elem(0, len - limb_shift);
        for (i, out) in shifted.as_mut_slice().iter_mut().enumerate() {
            let cur = src[i + limb_shift];
            *out = if bit_shift == 0 {
                cur
            } else {
                // sign extension: everything above the top limb is ones
                let next = src.get(i + limb_shift + 1).copied().unwrap_or(u32::MAX);
                (cur >> bit_shift) | (next << (LIMB_BITS - bit_shift))
            };
        }
        from_twos_complement(shifted, Sign::Negative)
    }
}

impl BitAnd<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitand(self, rhs: &BigInt) -> BigInt {
        self.bitwise(rhs, |a, b| a & b)
    }
}

impl BitOr<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitor(self, rhs: &BigInt) -> BigInt {
        self.bitwise(rhs, |a, b| a | b)
    }
}

impl BitXor<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitxor(self, rhs: &BigInt) -> BigInt {
        self.bitwise(rhs, |a, b| a ^ b)
    }
}

forward_binop!(impl BitAnd, bitand, BitAndAssign, bitand_assign);
forward_binop!(impl BitOr, bitor, BitOrAssign, bitor_assign);
forward_binop!(impl BitXor, bitxor, BitXorAssign, bitxor_assign);

/// `!x == -x - 1`
impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        -self - BigInt::one()
    }
}

impl Not for BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        !&self
    }
}

macro_rules! impl_shift {
    (unsigned $($t:ty),*) => {
        $(
            impl Shl<$t> for &BigInt {
                type Output = BigInt;

                fn shl(self, rhs: $t) -> BigInt {
                    self.shl_bits(usize::try_from(rhs).unwrap_or(usize::MAX))
                }
            }

            impl Shr<$t> for &BigInt {
                type Output = BigInt;

                fn shr(self, rhs: $t) -> BigInt {
                    self.shr_bits(usize::try_from(rhs).unwrap_or(usize::MAX))
                }
            }
        )*
        impl_shift!(@forward $($t),*);
    };
    (signed $($t:ty),*) => {
        $(
            // a negative amount shifts the other way
            impl Shl<$t> for &BigInt {
                type Output = BigInt;

                fn shl(self, rhs: $t) -> BigInt {
                    let amount = usize::try_from(rhs.unsigned_abs()).unwrap_or(usize::MAX);
                    if rhs < 0 {
                        self.shr_bits(amount)
                    } else {
                        self.shl_bits(amount)
                    }
                }
            }

            impl Shr<$t> for &BigInt {
                type Output = BigInt;

                fn shr(self, rhs: $t) -> BigInt {
                    let amount = usize::try_from(rhs.unsigned_abs()).unwrap_or(usize::MAX);
                    if rhs < 0 {
                        self.shl_bits(amount)
                    } else {
                        self.shr_bits(amount)
                    }
                }
            }
        )*
        impl_shift!(@forward $($t),*);
    };
    (@forward $($t:ty),*) => {
        $(
            impl Shl<$t> for BigInt {
                type Output = BigInt;

                fn shl(self, rhs: $t) -> BigInt {
                    &self << rhs
                }
            }

            impl Shr<$t> for BigInt {
                type Output = BigInt;

                fn shr(self, rhs: $t) -> BigInt {
                    &self >> rhs
                }
            }

            impl ShlAssign<$t> for BigInt {
                fn shl_assign(&mut self, rhs: $t) {
                    *self = &*self << rhs;
                }
            }

            impl ShrAssign<$t> for BigInt {
                fn shr_assign(&mut self, rhs: $t) {
                    *self = &*self >> rhs;
                }
            }
        )*
    };
}

impl_shift!(unsigned u32, u64, usize);
impl_shift!(signed i32, i64, isize);
