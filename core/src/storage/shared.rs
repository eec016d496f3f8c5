use crate::error::BigIntError;
use std::rc::Rc;

/// A reference-counted limb buffer.
///
/// Cloning a `SharedBuffer` retains another reference to the same
/// allocation; dropping one releases it. Every mutating method unshares
/// first, so a write through one handle is never observed through another.
/// Reads never copy.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct SharedBuffer {
    data: Rc<Vec<u32>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self {
            data: Rc::new(Vec::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Rc::new(Vec::with_capacity(capacity)),
        }
    }

    /// Number of handles currently pointing at this buffer.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.data)
    }

    pub fn is_shared(&self) -> bool {
        self.ref_count() > 1
    }

    /// Whether both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn as_slice(&self) -> &[u32] {
        self.data.as_slice()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.data.get(index).copied()
    }

    /// Detaches this handle from any other holders of the buffer by giving
    /// it a private copy. Does nothing if the buffer is already unique.
    pub fn unshare(&mut self) {
        Rc::make_mut(&mut self.data);
    }

    /// Unshares, then hands out the underlying vector for in-place mutation.
    pub fn make_mut(&mut self) -> &mut Vec<u32> {
        Rc::make_mut(&mut self.data)
    }

    pub fn set(&mut self, index: usize, value: u32) -> Result<(), BigIntError> {
        let len = self.len();
        if index >= len {
            return Err(BigIntError::IndexOutOfBounds { index, len });
        }
        self.make_mut()[index] = value;
        Ok(())
    }

    pub fn push(&mut self, value: u32) {
        self.make_mut().push(value);
    }

    pub fn pop(&mut self) -> Option<u32> {
        if self.is_empty() {
            return None;
        }
        self.make_mut().pop()
    }

    /// New entries are zero-filled.
    pub fn resize(&mut self, new_len: usize) {
        if new_len == self.len() {
            return;
        }
        self.make_mut().resize(new_len, 0);
    }
}

impl From<Vec<u32>> for SharedBuffer {
    fn from(vec: Vec<u32>) -> Self {
        Self { data: Rc::new(vec) }
    }
}

impl From<&[u32]> for SharedBuffer {
    fn from(slice: &[u32]) -> Self {
        Self::from(slice.to_vec())
    }
}
