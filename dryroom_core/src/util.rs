//! Common time helpers for dryroom_core.

/// Number of seconds in one minute.
pub const SECS_PER_MIN: u32 = 60;
/// Number of seconds in one hour.
pub const SECS_PER_HOUR: u32 = 3_600;

/// Convert whole minutes to seconds, saturating at `u32::MAX`.
#[inline]
pub fn minutes_to_secs(minutes: u32) -> u32 {
    minutes.saturating_mul(SECS_PER_MIN)
}

/// Split seconds into `(hours, minutes, seconds)`. Hours are not wrapped at 24.
#[inline]
pub fn split_hms(total_s: u32) -> (u32, u32, u32) {
    (
        total_s / SECS_PER_HOUR,
        (total_s % SECS_PER_HOUR) / SECS_PER_MIN,
        total_s % SECS_PER_MIN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_saturate() {
        assert_eq!(minutes_to_secs(120), 7_200);
        assert_eq!(minutes_to_secs(u32::MAX), u32::MAX);
    }

    #[test]
    fn splits_hms() {
        assert_eq!(split_hms(0), (0, 0, 0));
        assert_eq!(split_hms(3_661), (1, 1, 1));
        assert_eq!(split_hms(90_000), (25, 0, 0));
    }
}
