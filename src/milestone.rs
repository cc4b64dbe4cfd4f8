use crate::error::{Error, Result};

/// Rounds `count` up to the next multiple of its leading power of ten:
/// 283 -> 300, 999 -> 1000.
///
/// Counts already on a round number (and 0) map to themselves; callers decide
/// how to present a zero distance.
pub fn next_milestone(count: i64) -> Result<u64> {
    let count = u64::try_from(count)
        .map_err(|_| Error::InvalidArgument(format!("count must be non-negative, got {count}")))?;

    let digits = count.checked_ilog10().map_or(1, |log| log + 1);
    let unit = 10u64.pow(digits - 1);

    Ok(count.div_ceil(unit) * unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_up_to_leading_digit() {
        assert_eq!(next_milestone(283).unwrap(), 300);
        assert_eq!(next_milestone(11).unwrap(), 20);
        assert_eq!(next_milestone(1_001).unwrap(), 2_000);
    }

    #[test]
    fn test_rolls_into_next_magnitude() {
        assert_eq!(next_milestone(999).unwrap(), 1_000);
        assert_eq!(next_milestone(95).unwrap(), 100);
    }

    #[test]
    fn test_round_numbers_map_to_themselves() {
        assert_eq!(next_milestone(100).unwrap(), 100);
        assert_eq!(next_milestone(7).unwrap(), 7);
        assert_eq!(next_milestone(0).unwrap(), 0);
    }

    #[test]
    fn test_never_below_count() {
        for count in 0..20_000i64 {
            assert!(next_milestone(count).unwrap() >= count as u64, "count {count}");
        }
        assert!(next_milestone(i64::MAX).unwrap() >= i64::MAX as u64);
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let err = next_milestone(-1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
