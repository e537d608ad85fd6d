use std::time::{Duration, Instant};

use crate::constants::DOUBLE_CLICK_MS;

/// Recognizes double-clicks: a second press on the same target within
/// `DOUBLE_CLICK_MS` of the first.
#[derive(Debug, Clone)]
pub struct ClickTracker<T: PartialEq> {
    last: Option<(T, Instant)>,
    window: Duration,
}

impl<T: PartialEq> Default for ClickTracker<T> {
    fn default() -> Self {
        Self {
            last: None,
            window: Duration::from_millis(DOUBLE_CLICK_MS),
        }
    }
}

impl<T: PartialEq> ClickTracker<T> {
    /// Record a press on `target` at `now`. Returns true if it completes a
    /// double-click; the pair is then consumed so a third press starts over.
    pub fn press(&mut self, target: T, now: Instant) -> bool {
        let double = self.last.as_ref().is_some_and(|(previous, at)| {
            *previous == target && now.saturating_duration_since(*at) <= self.window
        });
        self.last = if double { None } else { Some((target, now)) };
        double
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_press_within_window_is_double() {
        let mut clicks = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!clicks.press("About Me", t0));
        assert!(clicks.press("About Me", t0 + Duration::from_millis(300)));
        assert!(!clicks.press("About Me", t0 + Duration::from_millis(400)));
    }

    #[test]
    fn slow_or_different_presses_are_single() {
        let mut clicks = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!clicks.press(1, t0));
        assert!(!clicks.press(1, t0 + Duration::from_millis(DOUBLE_CLICK_MS + 1)));
        assert!(!clicks.press(2, t0 + Duration::from_millis(DOUBLE_CLICK_MS + 50)));
    }
}
