//! Overflow-checked allocation sizing.
//!
//! A block size is always derived with checked arithmetic. A product that
//! would wrap is reported as [`SizeError::InvalidSize`] and never reaches
//! the allocator.

use ward_core::SizeError;

use crate::config::HeapConfig;

/// Compute `count * elem_size` in bytes.
///
/// # Errors
///
/// [`SizeError::InvalidSize`] if the product does not fit in `usize`.
pub fn checked_size(count: usize, elem_size: usize) -> Result<usize, SizeError> {
    count
        .checked_mul(elem_size)
        .ok_or(SizeError::InvalidSize {
            count: count as u64,
            elem_size: elem_size as u64,
        })
}

/// Compute a byte length from 32-bit signed operands.
///
/// The product is formed in `i32`, as a C `int len = n * size` would be,
/// but with a checked multiply instead of a silent wrap.
///
/// # Errors
///
/// - [`SizeError::NegativeSize`] if either operand is negative.
/// - [`SizeError::InvalidSize`] if the product overflows `i32`.
pub fn checked_size_i32(count: i32, elem_size: i32) -> Result<usize, SizeError> {
    for value in [count, elem_size] {
        if value < 0 {
            return Err(SizeError::NegativeSize {
                value: i64::from(value),
            });
        }
    }
    let product = count
        .checked_mul(elem_size)
        .ok_or(SizeError::InvalidSize {
            count: count.unsigned_abs().into(),
            elem_size: elem_size.unsigned_abs().into(),
        })?;
    usize::try_from(product).map_err(|_| SizeError::NegativeSize {
        value: i64::from(product),
    })
}

/// Compute a block size and check it against the config's block limit.
///
/// # Errors
///
/// [`SizeError::InvalidSize`] on overflow, [`SizeError::ExceedsLimit`]
/// when the size is above [`HeapConfig::max_block_bytes`].
pub fn block_size(count: usize, elem_size: usize, config: &HeapConfig) -> Result<usize, SizeError> {
    let bytes = checked_size(count, elem_size)?;
    if bytes > config.max_block_bytes {
        return Err(SizeError::ExceedsLimit {
            bytes,
            limit: config.max_block_bytes,
        });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_product() {
        assert_eq!(checked_size(20, 4), Ok(80));
        assert_eq!(checked_size(0, usize::MAX), Ok(0));
    }

    #[test]
    fn overflowing_product_is_invalid() {
        let err = checked_size(usize::MAX / 2 + 1, 2).unwrap_err();
        assert!(matches!(err, SizeError::InvalidSize { elem_size: 2, .. }));
    }

    #[test]
    fn i32_boundary_matches_c_int_wrap() {
        assert_eq!(checked_size_i32(2147, 1_000_000), Ok(2_147_000_000));
        assert_eq!(
            checked_size_i32(2148, 1_000_000),
            Err(SizeError::InvalidSize {
                count: 2148,
                elem_size: 1_000_000
            })
        );
    }

    #[test]
    fn negative_operands_rejected() {
        assert_eq!(
            checked_size_i32(-1, 10),
            Err(SizeError::NegativeSize { value: -1 })
        );
        assert_eq!(
            checked_size_i32(10, i32::MIN),
            Err(SizeError::NegativeSize {
                value: i64::from(i32::MIN)
            })
        );
    }

    #[test]
    fn block_size_enforces_limit() {
        let config = HeapConfig::new().with_max_block_bytes(64);
        assert_eq!(block_size(8, 8, &config), Ok(64));
        assert_eq!(
            block_size(9, 8, &config),
            Err(SizeError::ExceedsLimit {
                bytes: 72,
                limit: 64
            })
        );
    }

    #[test]
    fn block_size_reports_overflow_before_limit() {
        let config = HeapConfig::new();
        assert!(matches!(
            block_size(usize::MAX, 3, &config),
            Err(SizeError::InvalidSize { .. })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use ward_test_utils::strategies::size_operands;

        proptest! {
            #[test]
            fn checked_size_agrees_with_wide_product((count, elem) in size_operands()) {
                let wide = count as u128 * elem as u128;
                match checked_size(count, elem) {
                    Ok(bytes) => prop_assert_eq!(bytes as u128, wide),
                    Err(SizeError::InvalidSize { .. }) => prop_assert!(wide > usize::MAX as u128),
                    Err(other) => prop_assert!(false, "unexpected error {other}"),
                }
            }

            #[test]
            fn checked_size_i32_agrees_with_wide_product(count in 0i32.., elem in 0i32..) {
                let wide = i64::from(count) * i64::from(elem);
                match checked_size_i32(count, elem) {
                    Ok(bytes) => prop_assert_eq!(bytes as i64, wide),
                    Err(SizeError::InvalidSize { .. }) => prop_assert!(wide > i64::from(i32::MAX)),
                    Err(other) => prop_assert!(false, "unexpected error {other}"),
                }
            }
        }
    }
}
