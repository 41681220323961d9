//! Slice-level bounded copies.
//!
//! Both functions treat `dest.len()` as the destination capacity and
//! reserve one byte for a `0` terminator. A source of `n` bytes fits
//! only when `n < capacity`.

use tracing::debug;
use ward_core::CopyError;

/// Copy `src` into `dest` followed by a `0` terminator.
///
/// Returns the number of payload bytes written (`src.len()`).
///
/// # Errors
///
/// Returns [`CopyError::CapacityExceeded`] when `src.len() >= dest.len()`.
/// `dest` is left untouched in that case.
pub fn bounded_copy(dest: &mut [u8], src: &[u8]) -> Result<usize, CopyError> {
    check_fits(dest.len(), src.len())?;
    write_terminated(dest, src);
    Ok(src.len())
}

/// Copy as much of `src` as fits into `dest`, always terminating.
///
/// On success behaves exactly like [`bounded_copy`].
///
/// # Errors
///
/// Returns [`CopyError::CapacityExceeded`] when `src.len() >= dest.len()`.
/// Before returning, the first `dest.len() - 1` bytes of `src` and a
/// terminator have been written. A zero-capacity `dest` is never written.
pub fn truncating_copy(dest: &mut [u8], src: &[u8]) -> Result<usize, CopyError> {
    match check_fits(dest.len(), src.len()) {
        Ok(()) => {
            write_terminated(dest, src);
            Ok(src.len())
        }
        Err(err) => {
            if let Some(room) = dest.len().checked_sub(1) {
                write_terminated(dest, &src[..room]);
            }
            Err(err)
        }
    }
}

fn check_fits(capacity: usize, source_len: usize) -> Result<(), CopyError> {
    if source_len < capacity {
        return Ok(());
    }
    debug!(source_len, capacity, "bounded copy rejected");
    Err(CopyError::CapacityExceeded {
        source_len,
        capacity,
    })
}

/// Caller guarantees `payload.len() < dest.len()`.
fn write_terminated(dest: &mut [u8], payload: &[u8]) {
    let n = payload.len();
    dest[..n].copy_from_slice(payload);
    dest[n] = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_that_fits_is_terminated() {
        let mut dest = [0xAAu8; 8];
        let n = bounded_copy(&mut dest, b"abc").unwrap();
        assert_eq!(n, 3);
        assert_eq!(&dest[..4], b"abc\0");
        // Bytes past the terminator are not touched.
        assert!(dest[4..].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn source_of_capacity_minus_one_fits_exactly() {
        let mut dest = [0xAAu8; 4];
        assert_eq!(bounded_copy(&mut dest, b"xyz").unwrap(), 3);
        assert_eq!(&dest, b"xyz\0");
    }

    #[test]
    fn source_equal_to_capacity_is_rejected() {
        let mut dest = [0xAAu8; 4];
        let err = bounded_copy(&mut dest, b"wxyz").unwrap_err();
        assert_eq!(
            err,
            CopyError::CapacityExceeded {
                source_len: 4,
                capacity: 4
            }
        );
        assert_eq!(dest, [0xAA; 4]);
    }

    #[test]
    fn zero_capacity_rejects_even_empty_source() {
        let mut dest: [u8; 0] = [];
        assert!(bounded_copy(&mut dest, b"").is_err());
        assert!(truncating_copy(&mut dest, b"abc").is_err());
    }

    #[test]
    fn empty_source_writes_only_terminator() {
        let mut dest = [0xAAu8; 3];
        assert_eq!(bounded_copy(&mut dest, b"").unwrap(), 0);
        assert_eq!(dest, [0, 0xAA, 0xAA]);
    }

    #[test]
    fn truncating_copy_fills_and_terminates() {
        let mut dest = [0xAAu8; 10];
        let err = truncating_copy(&mut dest, b"This is a very long string").unwrap_err();
        assert!(matches!(err, CopyError::CapacityExceeded { capacity: 10, .. }));
        assert_eq!(&dest, b"This is a\0");
    }

    #[test]
    fn truncating_copy_of_fitting_source_succeeds() {
        let mut dest = [0u8; 10];
        assert_eq!(truncating_copy(&mut dest, b"short").unwrap(), 5);
        assert_eq!(&dest[..6], b"short\0");
    }

    #[test]
    fn single_byte_destination_holds_only_terminator() {
        let mut dest = [0xAAu8; 1];
        assert!(truncating_copy(&mut dest, b"a").is_err());
        assert_eq!(dest, [0]);
    }
}
