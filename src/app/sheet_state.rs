//! Show/hide animation state for a modal bottom sheet.
//!
//! The sheet only has two resting values, hidden and expanded. Transitions are
//! time based and advanced by the host loop through [`SheetState::tick`]; the
//! tick that lands on the target returns it, which is the only "animation
//! finished" signal the controller observes.

use std::time::{Duration, Instant};

pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(220);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetValue {
    Hidden,
    Expanded,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: f32,
    to: SheetValue,
    started_at: Instant,
}

#[derive(Debug, Clone)]
pub struct SheetState {
    current: SheetValue,
    fraction: f32,
    transition: Option<Transition>,
    duration: Duration,
}

impl SheetState {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: SheetValue::Hidden,
            fraction: 0.0,
            transition: None,
            duration,
        }
    }

    /// Settled value. Stays at the old value until a transition completes.
    pub fn current_value(&self) -> SheetValue {
        self.current
    }

    /// Value being animated towards, or the settled value when idle
    pub fn target_value(&self) -> SheetValue {
        self.transition.map_or(self.current, |transition| transition.to)
    }

    /// True unless the sheet has settled hidden. A sheet still sliding, in
    /// either direction, is on screen.
    pub fn is_visible(&self) -> bool {
        self.current != SheetValue::Hidden || self.transition.is_some() || self.fraction > 0.0
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// 0.0 fully hidden, 1.0 fully expanded
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn show(&mut self, now: Instant) {
        self.animate_to(SheetValue::Expanded, now);
    }

    pub fn hide(&mut self, now: Instant) {
        self.animate_to(SheetValue::Hidden, now);
    }

    /// Jumps to a value without animating, cancelling any transition.
    pub fn snap_to(&mut self, value: SheetValue) {
        self.transition = None;
        self.current = value;
        self.fraction = resting_fraction(value);
    }

    /// Advances the running transition. Returns the new settled value on the
    /// tick that completes it.
    pub fn tick(&mut self, now: Instant) -> Option<SheetValue> {
        let transition = self.transition?;
        let elapsed = now.saturating_duration_since(transition.started_at);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let to = resting_fraction(transition.to);
        self.fraction = transition.from + (to - transition.from) * ease_out_cubic(progress);

        if progress >= 1.0 {
            self.snap_to(transition.to);
            return Some(transition.to);
        }
        None
    }

    fn animate_to(&mut self, value: SheetValue, now: Instant) {
        if self.target_value() == value && (self.is_animating() || self.current == value) {
            return;
        }
        self.transition = Some(Transition {
            from: self.fraction,
            to: value,
            started_at: now,
        });
    }
}

impl Default for SheetState {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION)
    }
}

fn resting_fraction(value: SheetValue) -> f32 {
    match value {
        SheetValue::Hidden => 0.0,
        SheetValue::Expanded => 1.0,
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_settles_after_duration() {
        let start = Instant::now();
        let mut state = SheetState::new(Duration::from_millis(100));
        state.show(start);
        assert!(state.is_visible());
        assert_eq!(state.current_value(), SheetValue::Hidden);

        assert_eq!(state.tick(start + Duration::from_millis(50)), None);
        assert!(state.fraction() > 0.5);
        assert_eq!(
            state.tick(start + Duration::from_millis(100)),
            Some(SheetValue::Expanded)
        );
        assert!((state.fraction() - 1.0).abs() < f32::EPSILON);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_hide_stays_visible_until_settled() {
        let start = Instant::now();
        let mut state = SheetState::new(Duration::from_millis(100));
        state.snap_to(SheetValue::Expanded);
        state.hide(start);
        assert!(state.is_visible());
        assert_eq!(state.target_value(), SheetValue::Hidden);

        assert_eq!(state.tick(start + Duration::from_millis(30)), None);
        assert!(state.is_visible());
        assert_eq!(
            state.tick(start + Duration::from_millis(200)),
            Some(SheetValue::Hidden)
        );
        assert!(!state.is_visible());
        assert_eq!(state.tick(start + Duration::from_millis(300)), None);
    }

    #[test]
    fn test_show_during_hide_reverses_from_current_fraction() {
        let start = Instant::now();
        let mut state = SheetState::new(Duration::from_millis(100));
        state.snap_to(SheetValue::Expanded);
        state.hide(start);
        state.tick(start + Duration::from_millis(20));
        let midway = state.fraction();
        state.show(start + Duration::from_millis(20));
        assert_eq!(state.target_value(), SheetValue::Expanded);
        state.tick(start + Duration::from_millis(20));
        assert!((state.fraction() - midway).abs() < 0.001);
    }

    #[test]
    fn test_hide_before_show_settles_stays_visible() {
        let start = Instant::now();
        let mut state = SheetState::new(Duration::from_millis(100));
        state.show(start);
        state.tick(start + Duration::from_millis(50));
        assert_eq!(state.current_value(), SheetValue::Hidden);

        state.hide(start + Duration::from_millis(50));
        assert!(state.is_visible());
        assert_eq!(state.target_value(), SheetValue::Hidden);
        assert_eq!(state.tick(start + Duration::from_millis(60)), None);
        assert!(state.is_visible());
        assert!(state.fraction() > 0.0);

        assert_eq!(
            state.tick(start + Duration::from_millis(150)),
            Some(SheetValue::Hidden)
        );
        assert!(!state.is_visible());
    }

    #[test]
    fn test_zero_duration_settles_on_first_tick() {
        let start = Instant::now();
        let mut state = SheetState::new(Duration::ZERO);
        state.show(start);
        assert_eq!(state.tick(start), Some(SheetValue::Expanded));
    }

    #[test]
    fn test_repeated_show_does_not_restart() {
        let start = Instant::now();
        let mut state = SheetState::new(Duration::from_millis(100));
        state.show(start);
        state.show(start + Duration::from_millis(90));
        assert_eq!(
            state.tick(start + Duration::from_millis(100)),
            Some(SheetValue::Expanded)
        );
    }
}
