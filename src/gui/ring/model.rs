use super::animation::StrokeAnimation;
use super::geometry::{ArcSpan, Bounds, RingGeometry};
use super::label::{LabelUpdate, ProgressLabel};
use super::location::ArcStartLocation;
use super::{DEFAULT_ARC_WIDTH, MAX_PROGRESS, MIN_ANIMATED_FRACTION};
use crate::config::RingConfig;
use palette::Srgba;
use std::time::Duration;

/// One stroked arc: where, how much of the circle, how thick and in which color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub geometry: RingGeometry,
    pub span: ArcSpan,
    pub width: f64,
    pub color: Srgba<f64>,
}

/// Foreground arc whose stroke is revealed over time.
///
/// `path` always covers the full turn from the start angle; the animation drives how much of it
/// is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedStroke {
    pub path: ArcStroke,
    pub animation: StrokeAnimation,
}

impl AnimatedStroke {
    pub fn visible_at(&self, elapsed: Duration) -> ArcStroke {
        ArcStroke {
            span: self.path.span.truncated(self.animation.value_at(elapsed)),
            ..self.path
        }
    }

    /// The span left on screen once the reveal has finished.
    pub fn target_span(&self) -> ArcSpan {
        self.path.span.truncated(self.animation.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Foreground {
    Static(ArcStroke),
    Animated(AnimatedStroke),
}

/// Everything one redraw of the ring produces, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct RingFrame {
    pub bounds: Bounds,
    pub background: ArcStroke,
    pub foreground: Foreground,
    pub label: LabelUpdate,
}

pub struct ProgressRing {
    ring_background_color: Srgba<f64>,
    ring_foreground_color: Srgba<f64>,
    label_color: Srgba<f64>,
    foreground_arc_width: f64,
    background_arc_width: f64,
    arc_margin: f64,
    animate_progress: bool,
    display_progress_textually: bool,
    progress_value: u8,
    arc_start_location: ArcStartLocation,
    animate_fraction: f64, // always within [0, 1]
    needs_display: bool,
}

impl Default for ProgressRing {
    fn default() -> Self {
        Self {
            ring_background_color: Srgba::new(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 1.0),
            ring_foreground_color: Srgba::new(0.0, 1.0, 0.0, 1.0),
            label_color: Srgba::new(0.0, 0.0, 0.0, 1.0),
            foreground_arc_width: DEFAULT_ARC_WIDTH,
            background_arc_width: DEFAULT_ARC_WIDTH,
            arc_margin: 0.0,
            animate_progress: false,
            display_progress_textually: false,
            progress_value: 0,
            arc_start_location: ArcStartLocation::Top,
            animate_fraction: 0.0,
            needs_display: true,
        }
    }
}

impl ProgressRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RingConfig) -> Self {
        let mut ring = Self::default();
        ring.apply_config(config);
        ring
    }

    pub fn apply_config(&mut self, config: &RingConfig) {
        self.set_ring_background_color(*config.background_color);
        self.set_ring_foreground_color(*config.foreground_color);
        self.set_label_color(*config.label_color);
        self.set_foreground_arc_width(config.foreground_arc_width);
        self.set_background_arc_width(config.background_arc_width);
        self.set_arc_margin(config.arc_margin);
        self.set_animate_progress(config.animate_progress);
        self.set_display_progress_textually(config.display_progress_textually);
        self.set_arc_start_location(config.arc_start_location);
        self.set_progress(config.progress);
    }

    pub fn set_progress(&mut self, value: i64) {
        let value = value.clamp(0, MAX_PROGRESS as i64) as u8;
        self.progress_value = value;
        self.animate_fraction = value as f64 / MAX_PROGRESS as f64;
        self.set_needs_display();
    }

    pub fn progress(&self) -> u8 {
        self.progress_value
    }

    pub fn animate_fraction(&self) -> f64 {
        self.animate_fraction
    }

    /// Unknown codes fall back to [`ArcStartLocation::Top`].
    pub fn set_arc_start_location(&mut self, code: i64) {
        self.arc_start_location = ArcStartLocation::from_code(code);
        self.set_needs_display();
    }

    pub fn arc_start_location(&self) -> ArcStartLocation {
        self.arc_start_location
    }

    pub fn set_ring_background_color(&mut self, color: Srgba<f64>) {
        self.ring_background_color = color;
        self.set_needs_display();
    }

    pub fn set_ring_foreground_color(&mut self, color: Srgba<f64>) {
        self.ring_foreground_color = color;
        self.set_needs_display();
    }

    pub fn set_label_color(&mut self, color: Srgba<f64>) {
        self.label_color = color;
        self.set_needs_display();
    }

    pub fn set_foreground_arc_width(&mut self, width: f64) {
        self.foreground_arc_width = width;
        self.set_needs_display();
    }

    pub fn set_background_arc_width(&mut self, width: f64) {
        self.background_arc_width = width;
        self.set_needs_display();
    }

    pub fn set_arc_margin(&mut self, margin: f64) {
        self.arc_margin = margin;
        self.set_needs_display();
    }

    pub fn set_animate_progress(&mut self, animate: bool) {
        self.animate_progress = animate;
        self.set_needs_display();
    }

    pub fn animate_progress(&self) -> bool {
        self.animate_progress
    }

    pub fn set_display_progress_textually(&mut self, display: bool) {
        self.display_progress_textually = display;
        self.set_needs_display();
    }

    pub fn display_progress_textually(&self) -> bool {
        self.display_progress_textually
    }

    pub fn set_needs_display(&mut self) {
        self.needs_display = true;
    }

    /// Returns whether a redraw was requested since the last call, and clears the request.
    pub fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.needs_display)
    }

    pub fn geometry(&self, bounds: Bounds) -> RingGeometry {
        RingGeometry::calculate(
            bounds,
            self.arc_margin,
            self.foreground_arc_width,
            self.background_arc_width,
        )
    }

    /// Computes the complete frame for `bounds` from the current configuration.
    pub fn render(&self, bounds: Bounds) -> RingFrame {
        let geometry = self.geometry(bounds);

        let background = ArcStroke {
            geometry,
            span: ArcSpan::full_circle(),
            width: self.background_arc_width,
            color: self.ring_background_color,
        };

        let (foreground, label_fraction) = if self.animate_progress {
            self.animated_foreground(geometry)
        } else {
            (self.static_foreground(geometry), self.animate_fraction)
        };

        log::debug!(
            "Rendering ring at {}% from {} (animated: {})",
            self.progress_value,
            self.arc_start_location,
            self.animate_progress
        );

        RingFrame {
            bounds,
            background,
            foreground,
            label: self.label_update(bounds, label_fraction),
        }
    }

    fn static_foreground(&self, geometry: RingGeometry) -> Foreground {
        Foreground::Static(ArcStroke {
            geometry,
            span: ArcSpan::from_location(self.arc_start_location, self.animate_fraction),
            width: self.foreground_arc_width,
            color: self.ring_foreground_color,
        })
    }

    fn animated_foreground(&self, geometry: RingGeometry) -> (Foreground, f64) {
        let target = if self.animate_fraction == 0.0 {
            MIN_ANIMATED_FRACTION
        } else {
            self.animate_fraction
        };

        let path = ArcStroke {
            geometry,
            span: ArcSpan::from_location(self.arc_start_location, 1.0),
            width: self.foreground_arc_width,
            color: self.ring_foreground_color,
        };

        let foreground = Foreground::Animated(AnimatedStroke {
            path,
            animation: StrokeAnimation::reveal(target),
        });
        (foreground, target)
    }

    fn label_update(&self, bounds: Bounds, fraction: f64) -> LabelUpdate {
        if self.display_progress_textually {
            LabelUpdate::Show(ProgressLabel::new(bounds, fraction, self.label_color))
        } else {
            LabelUpdate::Hide
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::ring::AnimatedProperty;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn bounds() -> Bounds {
        Bounds::new(200.0, 200.0)
    }

    fn assert_span(span: ArcSpan, start: f64, end: f64) {
        assert!((span.start - start).abs() < EPS, "start {} != {}", span.start, start);
        assert!((span.end - end).abs() < EPS, "end {} != {}", span.end, end);
    }

    #[test]
    fn test_set_progress_clamps() {
        let mut ring = ProgressRing::new();
        let cases = [
            (-50, 0),
            (-1, 0),
            (0, 0),
            (1, 1),
            (42, 42),
            (100, 100),
            (101, 100),
            (i64::MAX, 100),
            (i64::MIN, 0),
        ];

        for (input, expected) in cases {
            ring.set_progress(input);
            assert_eq!(ring.progress(), expected);
            assert_eq!(ring.animate_fraction(), expected as f64 / 100.0);
            assert!((0.0..=1.0).contains(&ring.animate_fraction()));
        }
    }

    #[test]
    fn test_set_arc_start_location_normalizes() {
        let mut ring = ProgressRing::new();
        for code in 0..=3 {
            ring.set_arc_start_location(code);
            assert_eq!(ring.arc_start_location().code() as i64, code);
        }
        for code in [-3, 4, 9, 1000] {
            ring.set_arc_start_location(2);
            ring.set_arc_start_location(code);
            assert_eq!(ring.arc_start_location(), ArcStartLocation::Top);
        }
    }

    #[test]
    fn test_setters_request_display() {
        let mut ring = ProgressRing::new();
        assert!(ring.take_needs_display());
        assert!(!ring.take_needs_display());

        ring.set_progress(10);
        assert!(ring.take_needs_display());

        ring.set_arc_start_location(7);
        assert!(ring.take_needs_display());

        ring.set_label_color(Srgba::new(1.0, 0.0, 0.0, 1.0));
        assert!(ring.take_needs_display());
        assert!(!ring.take_needs_display());
    }

    #[test]
    fn test_background_is_full_circle_for_every_configuration() {
        let mut ring = ProgressRing::new();
        for animate in [false, true] {
            for code in 0..4 {
                for progress in [0, 33, 100] {
                    ring.set_animate_progress(animate);
                    ring.set_arc_start_location(code);
                    ring.set_progress(progress);
                    let frame = ring.render(bounds());
                    assert_span(frame.background.span, 0.0, 2.0 * PI);
                }
            }
        }
    }

    #[test]
    fn test_static_render_at_three_quarters() {
        let mut ring = ProgressRing::new();
        ring.set_progress(75);
        ring.set_animate_progress(false);
        ring.set_arc_start_location(0);
        ring.set_display_progress_textually(true);

        let frame = ring.render(bounds());

        let Foreground::Static(stroke) = frame.foreground else {
            panic!("expected a static foreground");
        };
        assert_span(stroke.span, -PI / 2.0, -PI / 2.0 + 1.5 * PI);
        assert_eq!(stroke.width, DEFAULT_ARC_WIDTH);
        assert_eq!(frame.label.label().map(ProgressLabel::text).as_deref(), Some("75%"));
    }

    #[test]
    fn test_static_render_at_zero_draws_nothing() {
        let ring = ProgressRing::new();
        let frame = ring.render(bounds());

        let Foreground::Static(stroke) = frame.foreground else {
            panic!("expected a static foreground");
        };
        assert_eq!(stroke.span.sweep(), 0.0);
        assert_eq!(frame.label, LabelUpdate::Hide);
    }

    #[test]
    fn test_animated_render_at_zero_shows_sliver() {
        let mut ring = ProgressRing::new();
        ring.set_progress(0);
        ring.set_animate_progress(true);
        ring.set_arc_start_location(1);
        ring.set_display_progress_textually(true);

        let frame = ring.render(bounds());

        let Foreground::Animated(animated) = frame.foreground else {
            panic!("expected an animated foreground");
        };
        assert_eq!(animated.animation.property, AnimatedProperty::StrokeCompletion);
        assert_eq!(animated.animation.from, 0.0);
        assert_eq!(animated.animation.to, 0.01);
        assert_eq!(animated.animation.duration, Duration::from_secs(2));
        assert_span(animated.path.span, 0.0, 2.0 * PI);
        assert_span(animated.target_span(), 0.0, 0.02 * PI);
        assert_eq!(frame.label.label().map(ProgressLabel::text).as_deref(), Some("1%"));
    }

    #[test]
    fn test_animated_render_reveals_over_time() {
        let mut ring = ProgressRing::new();
        ring.set_progress(50);
        ring.set_animate_progress(true);

        let Foreground::Animated(animated) = ring.render(bounds()).foreground else {
            panic!("expected an animated foreground");
        };

        assert_eq!(animated.animation.to, 0.5);
        assert_span(animated.visible_at(Duration::ZERO).span, -PI / 2.0, -PI / 2.0);
        assert_span(animated.visible_at(Duration::from_secs(1)).span, -PI / 2.0, 0.0);
        assert_span(animated.visible_at(Duration::from_secs(5)).span, -PI / 2.0, PI / 2.0);
    }

    #[test]
    fn test_arcs_share_geometry() {
        let mut ring = ProgressRing::new();
        ring.set_foreground_arc_width(12.0);
        ring.set_background_arc_width(4.0);
        ring.set_progress(60);

        let frame = ring.render(Bounds::new(300.0, 100.0));
        let Foreground::Static(stroke) = frame.foreground else {
            panic!("expected a static foreground");
        };

        assert_eq!(frame.background.geometry, stroke.geometry);
        assert_eq!(stroke.geometry.radius, 144.0);
        assert_eq!(frame.background.width, 4.0);
        assert_eq!(stroke.width, 12.0);
    }
}
