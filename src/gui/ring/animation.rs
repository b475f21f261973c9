use super::ANIMATION_DURATION;
use std::time::Duration;
use strum::Display as StrumDisplay;

/// Layer property an animation drives. Only stroke completion is ever animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum AnimatedProperty {
    #[strum(serialize = "strokeEnd")]
    StrokeCompletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingCurve {
    #[default]
    Linear,
}

impl TimingCurve {
    /// Maps linear time progress in `[0, 1]` to value progress.
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
        }
    }
}

/// Declarative description of a stroke reveal. The ring only builds these; whoever paints the
/// layer owns the clock and asks for [`StrokeAnimation::value_at`] on every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeAnimation {
    pub property: AnimatedProperty,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub timing: TimingCurve,
}

impl StrokeAnimation {
    pub fn reveal(to: f64) -> Self {
        Self {
            property: AnimatedProperty::StrokeCompletion,
            from: 0.0,
            to,
            duration: ANIMATION_DURATION,
            timing: TimingCurve::Linear,
        }
    }

    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if self.is_finished(elapsed) {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.timing.apply(t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_descriptor() {
        let animation = StrokeAnimation::reveal(0.4);
        assert_eq!(animation.property, AnimatedProperty::StrokeCompletion);
        assert_eq!(animation.property.to_string(), "strokeEnd");
        assert_eq!(animation.from, 0.0);
        assert_eq!(animation.to, 0.4);
        assert_eq!(animation.duration, Duration::from_secs(2));
        assert_eq!(animation.timing, TimingCurve::Linear);
    }

    #[test]
    fn test_linear_interpolation() {
        let animation = StrokeAnimation::reveal(0.8);
        assert_eq!(animation.value_at(Duration::ZERO), 0.0);
        assert!((animation.value_at(Duration::from_millis(500)) - 0.2).abs() < 1e-12);
        assert!((animation.value_at(Duration::from_secs(1)) - 0.4).abs() < 1e-12);
        assert!((animation.value_at(Duration::from_millis(1500)) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_holds_target_after_duration() {
        let animation = StrokeAnimation::reveal(0.01);
        assert!(!animation.is_finished(Duration::from_millis(1999)));
        assert!(animation.is_finished(Duration::from_secs(2)));
        assert_eq!(animation.value_at(Duration::from_secs(2)), 0.01);
        assert_eq!(animation.value_at(Duration::from_secs(60)), 0.01);
    }
}
