use crate::error::BigIntError;
use crate::storage::SharedBuffer;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::Index;

/// Number of limbs stored inline: as many as fit in the space of one
/// `SharedBuffer` handle.
pub const SMALL_SIZE: usize = mem::size_of::<SharedBuffer>() / mem::size_of::<u32>();

#[derive(Clone)]
enum Repr {
    // buf[len..] is always zero
    Inline { len: usize, buf: [u32; SMALL_SIZE] },
    Shared(SharedBuffer),
}

use Repr::{Inline, Shared};

/// A limb sequence with value semantics.
///
/// Up to `SMALL_SIZE` limbs live inline without allocating. Growing past
/// that moves the limbs into a `SharedBuffer`, after which clones share the
/// buffer until one of them is written to. Shrinking never moves limbs
/// back inline.
#[derive(Clone)]
pub struct DigitStorage {
    repr: Repr,
}

impl DigitStorage {
    pub fn new() -> Self {
        Self {
            repr: Inline {
                len: 0,
                buf: [0; SMALL_SIZE],
            },
        }
    }

    /// `len` copies of `value`.
    pub fn from_elem(value: u32, len: usize) -> Self {
        if len <= SMALL_SIZE {
            let mut buf = [0; SMALL_SIZE];
            for limb in &mut buf[..len] {
                *limb = value;
            }
            Self {
                repr: Inline { len, buf },
            }
        } else {
            Self {
                repr: Shared(SharedBuffer::from(vec![value; len])),
            }
        }
    }

    pub fn len(&self) -> usize {
        match &self.repr {
            Inline { len, .. } => *len,
            Shared(buffer) => buffer.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Inline { .. })
    }

    /// The shared buffer backing this storage, if it has been promoted.
    pub fn shared_buffer(&self) -> Option<&SharedBuffer> {
        match &self.repr {
            Inline { .. } => None,
            Shared(buffer) => Some(buffer),
        }
    }

    pub fn capacity(&self) -> usize {
        match &self.repr {
            Inline { .. } => SMALL_SIZE,
            Shared(buffer) => buffer.capacity(),
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        match &self.repr {
            Inline { len, buf } => &buf[..*len],
            Shared(buffer) => buffer.as_slice(),
        }
    }

    /// Mutable view of the limbs. A shared buffer is unshared first.
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        match &mut self.repr {
            Inline { len, buf } => &mut buf[..*len],
            Shared(buffer) => buffer.make_mut().as_mut_slice(),
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u32> + ExactSizeIterator + '_ {
        self.as_slice().iter().copied()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.as_slice().get(index).copied()
    }

    pub fn last(&self) -> Option<u32> {
        self.as_slice().last().copied()
    }

    pub fn set(&mut self, index: usize, value: u32) -> Result<(), BigIntError> {
        match &mut self.repr {
            Inline { len, buf } => {
                if index >= *len {
                    return Err(BigIntError::IndexOutOfBounds { index, len: *len });
                }
                buf[index] = value;
                Ok(())
            }
            Shared(buffer) => buffer.set(index, value),
        }
    }

    fn make_shared(&mut self) {
        if let Inline { len, buf } = self.repr {
            let mut vec = Vec::with_capacity(2 * SMALL_SIZE + 1);
            vec.extend_from_slice(&buf[..len]);
            self.repr = Shared(SharedBuffer::from(vec));
        }
    }

    pub fn push(&mut self, value: u32) {
        if self.is_inline() && self.len() == SMALL_SIZE {
            self.make_shared();
        }
        match &mut self.repr {
            Inline { len, buf } => {
                buf[*len] = value;
                *len += 1;
            }
            Shared(buffer) => buffer.push(value),
        }
    }

    pub fn pop(&mut self) -> Option<u32> {
        match &mut self.repr {
            Inline { len, buf } => {
                if *len == 0 {
                    return None;
                }
                *len -= 1;
                Some(mem::replace(&mut buf[*len], 0))
            }
            Shared(buffer) => buffer.pop(),
        }
    }

    /// New trailing limbs are zero.
    pub fn resize(&mut self, new_len: usize) {
        if new_len > SMALL_SIZE {
            self.make_shared();
        }
        match &mut self.repr {
            Inline { len, buf } => {
                for limb in &mut buf[new_len.min(*len)..] {
                    *limb = 0;
                }
                *len = new_len;
            }
            Shared(buffer) => buffer.resize(new_len),
        }
    }

    /// Drops most-significant zero limbs, keeping at least one limb.
    pub(crate) fn trim_leading_zeros(&mut self) {
        while self.len() > 1 && self.last() == Some(0) {
            self.pop();
        }
    }
}

impl Default for DigitStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&[u32]> for DigitStorage {
    fn from(slice: &[u32]) -> Self {
        if slice.len() <= SMALL_SIZE {
            let mut buf = [0; SMALL_SIZE];
            buf[..slice.len()].copy_from_slice(slice);
            Self {
                repr: Inline {
                    len: slice.len(),
                    buf,
                },
            }
        } else {
            Self {
                repr: Shared(SharedBuffer::from(slice)),
            }
        }
    }
}

impl From<Vec<u32>> for DigitStorage {
    fn from(vec: Vec<u32>) -> Self {
        if vec.len() <= SMALL_SIZE {
            Self::from(vec.as_slice())
        } else {
            Self {
                repr: Shared(SharedBuffer::from(vec)),
            }
        }
    }
}

impl FromIterator<u32> for DigitStorage {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut storage = Self::new();
        for limb in iter {
            storage.push(limb);
        }
        storage
    }
}

impl Index<usize> for DigitStorage {
    type Output = u32;

    fn index(&self, index: usize) -> &u32 {
        &self.as_slice()[index]
    }
}

impl PartialEq for DigitStorage {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for DigitStorage {}

impl Hash for DigitStorage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for DigitStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
