//! Unsigned arithmetic over little-endian `u32` limb slices.
//!
//! Inputs are expected to be normalized (no most-significant zero limbs
//! unless the value is a single zero limb). Every function that returns a
//! `DigitStorage` returns it normalized.

use crate::error::BigIntError;
use crate::storage::{DigitStorage, SMALL_SIZE};
use std::cmp::Ordering;

pub(crate) const LIMB_BITS: usize = 32;

#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
pub(crate) const fn lo(n: u64) -> u32 {
    n as u32
}

#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
const fn hi(n: u64) -> u32 {
    (n >> 32) as u32
}

/// Lowest limb of a `u128`.
#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
pub(crate) const fn lo_wide(n: u128) -> u32 {
    n as u32
}

/// Trims leading zero limbs. Results short enough to fit inline are moved
/// out of the scratch buffer they were computed in.
pub(crate) fn normalize(mut limbs: DigitStorage) -> DigitStorage {
    if limbs.is_empty() {
        limbs.push(0);
    }
    limbs.trim_leading_zeros();
    if !limbs.is_inline() && limbs.len() <= SMALL_SIZE {
        return DigitStorage::from(limbs.as_slice());
    }
    limbs
}

pub(crate) fn is_zero(a: &[u32]) -> bool {
    a.iter().all(|&limb| limb == 0)
}

pub(crate) fn cmp_magnitude(a: &[u32], b: &[u32]) -> Ordering {
    debug_assert!(a.len() == 1 || a.last() != Some(&0));
    debug_assert!(b.len() == 1 || b.last() != Some(&0));

    match a.len().cmp(&b.len()) {
        Ordering::Equal => a.iter().rev().cmp(b.iter().rev()),
        other => other,
    }
}

pub(crate) fn add_magnitudes(a: &[u32], b: &[u32]) -> DigitStorage {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut result = DigitStorage::from_elem(0, long.len() + 1);
    let out = result.as_mut_slice();
    let mut carry = 0_u64;
    for (i, &limb) in long.iter().enumerate() {
        let other = short.get(i).copied().unwrap_or(0);
        let sum = u64::from(limb) + u64::from(other) + carry;
        out[i] = lo(sum);
        carry = u64::from(hi(sum));
    }
    out[long.len()] = lo(carry);
    normalize(result)
}

/// Computes `a - b`. Requires `a >= b`.
pub(crate) fn sub_magnitudes(a: &[u32], b: &[u32]) -> DigitStorage {
    debug_assert!(cmp_magnitude(a, b) != Ordering::Less);

    let mut result = DigitStorage::from_elem(0, a.len());
    let out = result.as_mut_slice();
    let mut borrow = 0_u64;
    for (i, &limb) in a.iter().enumerate() {
        let other = b.get(i).copied().unwrap_or(0);
        let diff = (1_u64 << LIMB_BITS) + u64::from(limb) - u64::from(other) - borrow;
        out[i] = lo(diff);
        borrow = 1 - u64::from(hi(diff));
    }
    debug_assert_eq!(borrow, 0);
    normalize(result)
}

pub(crate) fn mul_magnitudes(a: &[u32], b: &[u32]) -> DigitStorage {
    if is_zero(a) || is_zero(b) {
        return DigitStorage::from_elem(0, 1);
    }
    let mut result = DigitStorage::from_elem(0, a.len() + b.len());
    let out = result.as_mut_slice();
    for (i, &x) in a.iter().enumerate() {
        let mut carry = 0_u64;
        for (j, &y) in b.iter().enumerate() {
            // (2^32 - 1)^2 + 2 * (2^32 - 1) == 2^64 - 1, so this cannot overflow
            let cur = u64::from(out[i + j]) + u64::from(x) * u64::from(y) + carry;
            out[i + j] = lo(cur);
            carry = u64::from(hi(cur));
        }
        out[i + b.len()] = lo(carry);
    }
    normalize(result)
}

/// Writes `a * m` into `out`, which must be one limb longer than `a`.
fn mul_limb_into(a: &[u32], m: u32, out: &mut [u32]) {
    debug_assert_eq!(out.len(), a.len() + 1);

    let mut carry = 0_u64;
    for (o, &limb) in out.iter_mut().zip(a) {
        let cur = u64::from(limb) * u64::from(m) + carry;
        *o = lo(cur);
        carry = u64::from(hi(cur));
    }
    out[a.len()] = lo(carry);
}

/// Computes `digits = digits * mul + add` in place.
pub(crate) fn mul_add_limb(digits: &mut DigitStorage, mul: u32, add: u32) {
    let mut carry = u64::from(add);
    for limb in digits.as_mut_slice() {
        let cur = u64::from(*limb) * u64::from(mul) + carry;
        *limb = lo(cur);
        carry = u64::from(hi(cur));
    }
    if carry != 0 {
        digits.push(lo(carry));
    }
}

fn divide_by_limb(a: &[u32], divisor: u32) -> (DigitStorage, u32) {
    debug_assert!(divisor != 0);

    let mut quotient = DigitStorage::from_elem(0, a.len());
    let out = quotient.as_mut_slice();
    let divisor = u64::from(divisor);
    let mut rem = 0_u64;
    for i in (0..a.len()).rev() {
        let cur = (rem << LIMB_BITS) | u64::from(a[i]);
        out[i] = lo(cur / divisor);
        rem = cur % divisor;
    }
    (normalize(quotient), lo(rem))
}

/// Divides by a single limb, most significant limb first.
pub(crate) fn div_rem_limb(a: &[u32], divisor: u32) -> Result<(DigitStorage, u32), BigIntError> {
    if divisor == 0 {
        return Err(BigIntError::DivideByZero);
    }
    Ok(divide_by_limb(a, divisor))
}

/// Trial quotient digit for the window ending at `r[k + m]`, from the top
/// three limbs of the window and the top two limbs of the divisor.
fn trial(r: &[u32], k: usize, m: usize, d2: u64) -> u32 {
    let km = k + m;
    let r3 = (u128::from(r[km]) << (2 * LIMB_BITS))
        | (u128::from(r[km - 1]) << LIMB_BITS)
        | u128::from(r[km - 2]);
    u32::try_from(r3 / u128::from(d2)).unwrap_or(u32::MAX)
}

/// Whether `window < product`. Both hold exactly `m + 1` limbs.
fn smaller(window: &[u32], product: &[u32]) -> bool {
    debug_assert_eq!(window.len(), product.len());
    window.iter().rev().lt(product.iter().rev())
}

/// `window -= product` in place. The caller guarantees `window >= product`.
fn difference(window: &mut [u32], product: &[u32]) {
    let mut borrow = 0_u64;
    for (w, &p) in window.iter_mut().zip(product) {
        let diff = (1_u64 << LIMB_BITS) + u64::from(*w) - u64::from(p) - borrow;
        *w = lo(diff);
        borrow = 1 - u64::from(hi(diff));
    }
    debug_assert_eq!(borrow, 0);
}

/// Long division (Knuth, TAOCP vol. 2, 4.3.1, Algorithm D).
///
/// Requires `b.len() >= 2` and `a.len() >= b.len()`. Returns the quotient and
/// remainder magnitudes.
pub(crate) fn div_rem_knuth(a: &[u32], b: &[u32]) -> (DigitStorage, DigitStorage) {
    let n = a.len();
    let m = b.len();
    debug_assert!(m >= 2 && n >= m);

    // scale so the divisor's top limb is at least 2^31
    let f = lo((1_u64 << LIMB_BITS) / (u64::from(b[m - 1]) + 1));

    let mut r = DigitStorage::from_elem(0, n + 1);
    mul_limb_into(a, f, r.as_mut_slice());
    let mut scaled = DigitStorage::from_elem(0, m + 1);
    mul_limb_into(b, f, scaled.as_mut_slice());
    let d = &scaled.as_slice()[..m];
    debug_assert_eq!(scaled.last(), Some(0));
    debug_assert!(d[m - 1] >= 1 << (LIMB_BITS - 1));

    let d2 = (u64::from(d[m - 1]) << LIMB_BITS) | u64::from(d[m - 2]);
    let mut q = DigitStorage::from_elem(0, n - m + 1);
    let mut dq = DigitStorage::from_elem(0, m + 1);

    let rs = r.as_mut_slice();
    let qs = q.as_mut_slice();
    let dqs = dq.as_mut_slice();
    for k in (0..=n - m).rev() {
        let mut qt = trial(rs, k, m, d2);
        mul_limb_into(d, qt, dqs);
        while smaller(&rs[k..=k + m], dqs) {
            qt -= 1;
            mul_limb_into(d, qt, dqs);
        }
        difference(&mut rs[k..=k + m], dqs);
        qs[k] = qt;
    }

    // the remainder is what is left in the low m limbs, still scaled by f
    let (rem, unscale_rem) = divide_by_limb(&rs[..m], f);
    debug_assert_eq!(unscale_rem, 0);
    (normalize(q), rem)
}

pub(crate) fn shl_magnitude(a: &[u32], bits: usize) -> DigitStorage {
    if is_zero(a) {
        return DigitStorage::from_elem(0, 1);
    }
    let limb_shift = bits / LIMB_BITS;
    let bit_shift = bits % LIMB_BITS;
    let mut result = DigitStorage::from_elem(0, a.len() + limb_shift + 1);
    let out = result.as_mut_slice();
    if bit_shift == 0 {
        out[limb_shift..limb_shift + a.len()].copy_from_slice(a);
    } else {
        let mut carry = 0_u32;
        for (i, &limb) in a.iter().enumerate() {
            out[limb_shift + i] = (limb << bit_shift) | carry;
            carry = limb >> (LIMB_BITS - bit_shift);
        }
        out[limb_shift + a.len()] = carry;
    }
    normalize(result)
}

pub(crate) fn shr_magnitude(a: &[u32], bits: usize) -> DigitStorage {
    let limb_shift = bits / LIMB_BITS;
    let bit_shift = bits % LIMB_BITS;
    if limb_shift >= a.len() {
        return DigitStorage::from_elem(0, 1);
    }
    let src = &a[limb_shift..];
    let mut result = DigitStorage::from_elem(0, src.len());
    let out = result.as_mut_slice();
    for (i, o) in out.iter_mut().enumerate() {
        *o = if bit_shift == 0 {
            src[i]
        } else {
            let next = src.get(i + 1).copied().unwrap_or(0);
            (src[i] >> bit_shift) | (next << (LIMB_BITS - bit_shift))
        };
    }
    normalize(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limbs(storage: &DigitStorage) -> Vec<u32> {
        storage.as_slice().to_vec()
    }

    #[test]
    fn test_cmp_magnitude() {
        assert_eq!(cmp_magnitude(&[1], &[2]), Ordering::Less);
        assert_eq!(cmp_magnitude(&[0, 1], &[u32::MAX]), Ordering::Greater);
        assert_eq!(cmp_magnitude(&[5, 7], &[5, 7]), Ordering::Equal);
        assert_eq!(cmp_magnitude(&[6, 7], &[5, 8]), Ordering::Less);
    }

    #[test]
    fn test_add_carry_chain() {
        let sum = add_magnitudes(&[u32::MAX, u32::MAX], &[1]);
        assert_eq!(limbs(&sum), vec![0, 0, 1]);
    }

    #[test]
    fn test_add_stays_inline() {
        let sum = add_magnitudes(&[1, 2], &[3]);
        assert_eq!(limbs(&sum), vec![4, 2]);
        assert_eq!(sum.is_inline(), sum.len() <= SMALL_SIZE);
    }

    #[test]
    fn test_sub_borrow_chain() {
        let diff = sub_magnitudes(&[0, 0, 1], &[1]);
        assert_eq!(limbs(&diff), vec![u32::MAX, u32::MAX]);
        let zero = sub_magnitudes(&[5, 9], &[5, 9]);
        assert_eq!(limbs(&zero), vec![0]);
    }

    #[test]
    fn test_mul() {
        let product = mul_magnitudes(&[u32::MAX], &[u32::MAX]);
        // (2^32 - 1)^2 = 2^64 - 2^33 + 1
        assert_eq!(limbs(&product), vec![1, u32::MAX - 1]);
        assert_eq!(limbs(&mul_magnitudes(&[0], &[1, 2, 3])), vec![0]);
    }

    #[test]
    fn test_mul_add_limb() {
        let mut digits = DigitStorage::from(&[u32::MAX][..]);
        mul_add_limb(&mut digits, 2, 3);
        assert_eq!(limbs(&digits), vec![1, 2]);
    }

    #[test]
    fn test_div_rem_limb() {
        let (q, r) = div_rem_limb(&[0, 1], 3).unwrap();
        // 2^32 = 3 * 1431655765 + 1
        assert_eq!(limbs(&q), vec![1_431_655_765]);
        assert_eq!(r, 1);
        assert_eq!(div_rem_limb(&[5], 0), Err(BigIntError::DivideByZero));
    }

    #[test]
    fn test_knuth_exact() {
        // (2^64 + 5) * (2^32 + 7)
        let b = [7, 1];
        let expected_q = [5, 0, 1];
        let a = mul_magnitudes(&expected_q, &b);
        let (q, r) = div_rem_knuth(a.as_slice(), &b);
        assert_eq!(limbs(&q), expected_q.to_vec());
        assert_eq!(limbs(&r), vec![0]);
    }

    #[test]
    fn test_knuth_with_remainder() {
        let b = [0xdead_beef, 0x1234_5678, 0x9abc];
        let q0 = [0xffff_ffff, 0x0000_0001, 0xffff_0000, 0x42];
        let rem = [0x1111_1111, 0x0000_0002];
        let product = mul_magnitudes(&q0, &b);
        let a = add_magnitudes(product.as_slice(), &rem);
        let (q, r) = div_rem_knuth(a.as_slice(), &b);
        assert_eq!(limbs(&q), q0.to_vec());
        assert_eq!(limbs(&r), rem.to_vec());
    }

    #[test]
    fn test_knuth_needs_correction() {
        // scale factor is 1; the trial digit from the top limbs is 0x8000_0000,
        // one more than the true quotient, because b's low limb is ignored
        let b = [u32::MAX, 0, 0x8000_0000];
        let a = [0, 0, 0, 0x4000_0000];
        let (q, r) = div_rem_knuth(&a, &b);
        assert_eq!(limbs(&q), vec![0x7fff_ffff]);
        assert_eq!(limbs(&r), vec![0x7fff_ffff, 0x8000_0001, 0x7fff_ffff]);
        let back = add_magnitudes(mul_magnitudes(q.as_slice(), &b).as_slice(), r.as_slice());
        assert_eq!(limbs(&back), a.to_vec());
        assert_eq!(cmp_magnitude(r.as_slice(), &b), Ordering::Less);
    }

    #[test]
    fn test_knuth_smaller_dividend() {
        let (q, r) = div_rem_knuth(&[1, 2], &[1, 3]);
        assert_eq!(limbs(&q), vec![0]);
        assert_eq!(limbs(&r), vec![1, 2]);
    }

    #[test]
    fn test_shl() {
        assert_eq!(limbs(&shl_magnitude(&[5], 2)), vec![20]);
        assert_eq!(limbs(&shl_magnitude(&[1], 32)), vec![0, 1]);
        assert_eq!(limbs(&shl_magnitude(&[0x8000_0001], 1)), vec![2, 1]);
        assert_eq!(limbs(&shl_magnitude(&[3], 65)), vec![0, 0, 6]);
    }

    #[test]
    fn test_shl_zero_does_not_allocate_shift() {
        assert_eq!(limbs(&shl_magnitude(&[0], usize::MAX)), vec![0]);
    }

    #[test]
    fn test_shr() {
        assert_eq!(limbs(&shr_magnitude(&[20], 2)), vec![5]);
        assert_eq!(limbs(&shr_magnitude(&[0, 1], 1)), vec![0x8000_0000]);
        assert_eq!(limbs(&shr_magnitude(&[0, 0, 6], 65)), vec![3]);
        assert_eq!(limbs(&shr_magnitude(&[7], 40)), vec![0]);
    }

    #[test]
    fn test_normalize_moves_small_results_inline() {
        let scratch = DigitStorage::from(vec![9; SMALL_SIZE + 4]);
        let mut trimmed = scratch;
        for limb in trimmed.as_mut_slice().iter_mut().skip(1) {
            *limb = 0;
        }
        let result = normalize(trimmed);
        assert!(result.is_inline());
        assert_eq!(limbs(&result), vec![9]);
    }
}
