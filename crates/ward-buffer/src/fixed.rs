//! Fixed-capacity, always-terminated byte buffer.

use std::borrow::Cow;
use std::fmt;

use ward_core::CopyError;

use crate::copy::{bounded_copy, truncating_copy};

/// What a [`FixedBuffer`] does with a source that does not fit.
///
/// Both policies report [`CopyError::CapacityExceeded`]; they differ only
/// in the state the buffer is left in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Leave the buffer unmodified.
    #[default]
    Reject,
    /// Keep the first `capacity - 1` bytes and terminate.
    Truncate,
}

/// A heap-allocated byte buffer whose capacity is fixed at construction.
///
/// The capacity includes one byte reserved for a `0` terminator, so a
/// buffer of capacity `C` holds at most `C - 1` payload bytes. Writes go
/// through [`bounded_copy`]/[`truncating_copy`] and can never extend past
/// the allocation.
#[derive(Clone, PartialEq, Eq)]
pub struct FixedBuffer {
    data: Box<[u8]>,
    len: usize,
}

impl FixedBuffer {
    /// Create an empty, zero-filled buffer of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Replace the contents with `src`.
    ///
    /// Returns the number of payload bytes now held.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError::CapacityExceeded`] when `src.len() >= capacity`.
    /// The buffer is then unmodified ([`OverflowPolicy::Reject`]) or holds
    /// the truncated prefix ([`OverflowPolicy::Truncate`]).
    pub fn copy_from(&mut self, src: &[u8], policy: OverflowPolicy) -> Result<usize, CopyError> {
        match policy {
            OverflowPolicy::Reject => {
                self.len = bounded_copy(&mut self.data, src)?;
                Ok(self.len)
            }
            OverflowPolicy::Truncate => match truncating_copy(&mut self.data, src) {
                Ok(n) => {
                    self.len = n;
                    Ok(n)
                }
                Err(err) => {
                    self.len = self.payload_capacity();
                    Err(err)
                }
            },
        }
    }

    /// The payload bytes, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// The payload bytes followed by the terminator.
    ///
    /// Empty for a zero-capacity buffer, which has no room for one.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if self.data.is_empty() {
            return &[];
        }
        &self.data[..=self.len]
    }

    /// The payload decoded as UTF-8, with invalid sequences replaced.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Number of payload bytes held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no payload.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity in bytes, terminator included.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Maximum payload length (`capacity - 1`, or 0 for an empty buffer).
    pub fn payload_capacity(&self) -> usize {
        self.data.len().saturating_sub(1)
    }

    /// Drop the payload, leaving an empty terminated buffer.
    pub fn clear(&mut self) {
        self.len = 0;
        if let Some(first) = self.data.first_mut() {
            *first = 0;
        }
    }
}

impl fmt::Debug for FixedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("contents", &self.to_string_lossy())
            .finish()
    }
}

impl fmt::Display for FixedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
