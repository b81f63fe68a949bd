//! Segment planning: how many segments, and how long each one runs.

use super::SplitError;

/// Target size for one extracted segment. Comfortably under the 25 MiB
/// upstream ceiling so re-encoding overhead never pushes a segment over it.
pub const TARGET_SEGMENT_BYTES: u64 = 20 * 1024 * 1024;

/// Shortest segment worth extracting.
pub const MIN_SEGMENT_SECS: u64 = 60;

/// Longest segment allowed (10 minutes).
pub const MAX_SEGMENT_SECS: u64 = 600;

/// The plan for one split operation. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    pub total_duration_secs: f64,
    pub segment_duration_secs: u64,
    pub segment_count: u64,
}

impl SplitPlan {
    /// Compute a split plan from the probed duration and the source file size.
    ///
    /// Estimates bytes-per-second from the source, picks a segment duration
    /// that lands near [`TARGET_SEGMENT_BYTES`] per segment, clamps it into
    /// `[MIN_SEGMENT_SECS, MAX_SEGMENT_SECS]`, then divides the total duration
    /// into that many ceiling-rounded segments.
    ///
    /// # Errors
    /// - [`SplitError::UnknownDuration`] when the duration is non-positive or
    ///   non-finite (the probe soft-fails to 0.0 on any error).
    /// - [`SplitError::EmptySource`] when the file size is zero, which would
    ///   make the bytes-per-second estimate meaningless.
    pub fn compute(total_duration_secs: f64, total_size_bytes: u64) -> Result<Self, SplitError> {
        if !total_duration_secs.is_finite() || total_duration_secs <= 0.0 {
            return Err(SplitError::UnknownDuration);
        }
        if total_size_bytes == 0 {
            return Err(SplitError::EmptySource);
        }

        let raw_secs =
            (total_duration_secs * TARGET_SEGMENT_BYTES as f64 / total_size_bytes as f64).round();
        let segment_duration_secs = (raw_secs as u64).clamp(MIN_SEGMENT_SECS, MAX_SEGMENT_SECS);

        let segment_count = (total_duration_secs / segment_duration_secs as f64).ceil() as u64;
        // duration > 0 guarantees at least one segment
        debug_assert!(segment_count >= 1);

        Ok(Self {
            total_duration_secs,
            segment_duration_secs,
            segment_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_1000s_100mib() {
        // 20 MiB of a 100 MiB / 1000 s file is 200 s per segment
        let plan = SplitPlan::compute(1000.0, 100 * 1024 * 1024).unwrap();
        assert_eq!(plan.segment_duration_secs, 200);
        assert_eq!(plan.segment_count, 5);
    }

    #[test]
    fn test_plan_clamps_short_segments_up() {
        // Very dense file: raw estimate ~7 s, clamped to the 60 s floor
        let plan = SplitPlan::compute(100.0, 300 * 1024 * 1024).unwrap();
        assert_eq!(plan.segment_duration_secs, MIN_SEGMENT_SECS);
        assert_eq!(plan.segment_count, 2);
    }

    #[test]
    fn test_plan_clamps_long_segments_down() {
        // Very sparse file: raw estimate ~2330 s, clamped to the 600 s ceiling
        let plan = SplitPlan::compute(3600.0, 30 * 1024 * 1024 + 9 * 1024 * 1024).unwrap();
        assert_eq!(plan.segment_duration_secs, MAX_SEGMENT_SECS);
        assert_eq!(plan.segment_count, 6);
    }

    #[test]
    fn test_plan_count_matches_ceiling() {
        for (duration, size) in [
            (61.0, 30u64 * 1024 * 1024),
            (599.0, 26 * 1024 * 1024),
            (7200.0, 500 * 1024 * 1024),
            (90.5, 40 * 1024 * 1024),
        ] {
            let plan = SplitPlan::compute(duration, size).unwrap();
            assert!(
                (MIN_SEGMENT_SECS..=MAX_SEGMENT_SECS).contains(&plan.segment_duration_secs),
                "duration {} out of bounds",
                plan.segment_duration_secs
            );
            let expected = (duration / plan.segment_duration_secs as f64).ceil() as u64;
            assert_eq!(plan.segment_count, expected);
        }
    }

    #[test]
    fn test_plan_rejects_unknown_duration() {
        assert!(matches!(
            SplitPlan::compute(0.0, 1024),
            Err(SplitError::UnknownDuration)
        ));
        assert!(matches!(
            SplitPlan::compute(-5.0, 1024),
            Err(SplitError::UnknownDuration)
        ));
        assert!(matches!(
            SplitPlan::compute(f64::NAN, 1024),
            Err(SplitError::UnknownDuration)
        ));
    }

    #[test]
    fn test_plan_rejects_empty_source() {
        assert!(matches!(
            SplitPlan::compute(100.0, 0),
            Err(SplitError::EmptySource)
        ));
    }
}
