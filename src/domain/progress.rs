//! Course progress arithmetic.

/// Percentage of published course items the student has finished.
///
/// Returns 0 for a course with nothing published; the result is always in
/// `0..=100`.
pub fn overall_progress(completed: u64, published_total: u64) -> i32 {
    if published_total == 0 {
        return 0;
    }
    let percent = (100.0 * completed as f64 / published_total as f64).round();
    percent.clamp(0.0, 100.0) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchState {
    pub watch_time: i32,
    pub completed: bool,
}

/// Folds a new watch report into the stored one. Watch time only grows and
/// completion is sticky.
pub fn merge_watch(previous: Option<WatchState>, reported: WatchState) -> WatchState {
    let reported = WatchState {
        watch_time: reported.watch_time.max(0),
        ..reported
    };
    match previous {
        None => reported,
        Some(previous) => WatchState {
            watch_time: previous.watch_time.max(reported.watch_time),
            completed: previous.completed || reported.completed,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_course_is_zero() {
        assert_eq!(overall_progress(0, 0), 0);
        assert_eq!(overall_progress(3, 0), 0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(overall_progress(2, 3), 67);
        assert_eq!(overall_progress(1, 3), 33);
        assert_eq!(overall_progress(1, 8), 13);
        assert_eq!(overall_progress(3, 3), 100);
    }

    #[test]
    fn test_never_exceeds_hundred() {
        assert_eq!(overall_progress(5, 3), 100);
    }

    #[test]
    fn test_monotonic_in_completed_items() {
        let total = 7;
        let mut last = 0;
        for completed in 0..=total {
            let current = overall_progress(completed, total);
            assert!(current >= last);
            assert!((0..=100).contains(&current));
            last = current;
        }
    }

    #[test]
    fn test_watch_time_never_decreases() {
        let stored = WatchState {
            watch_time: 120,
            completed: false,
        };
        let merged = merge_watch(
            Some(stored),
            WatchState {
                watch_time: 30,
                completed: false,
            },
        );
        assert_eq!(merged.watch_time, 120);

        let merged = merge_watch(
            Some(stored),
            WatchState {
                watch_time: 300,
                completed: false,
            },
        );
        assert_eq!(merged.watch_time, 300);
    }

    #[test]
    fn test_completion_is_sticky() {
        let stored = WatchState {
            watch_time: 600,
            completed: true,
        };
        let merged = merge_watch(
            Some(stored),
            WatchState {
                watch_time: 10,
                completed: false,
            },
        );
        assert!(merged.completed);
        assert_eq!(merged.watch_time, 600);
    }

    #[test]
    fn test_first_report_clamps_negative_time() {
        let merged = merge_watch(
            None,
            WatchState {
                watch_time: -5,
                completed: true,
            },
        );
        assert_eq!(
            merged,
            WatchState {
                watch_time: 0,
                completed: true
            }
        );
    }
}
