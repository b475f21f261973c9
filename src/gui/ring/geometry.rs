use super::FULL_TURN;
use super::location::ArcStartLocation;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the area the ring is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// A `width` x `height` box centered in these bounds.
    pub fn centered_rect(&self, width: f64, height: f64) -> Rect {
        let center = self.center();
        Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Clockwise angular span in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub start: f64,
    pub end: f64,
}

impl ArcSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The background ring always runs the whole circle from angle zero.
    pub fn full_circle() -> Self {
        Self::new(0.0, FULL_TURN)
    }

    pub fn from_location(location: ArcStartLocation, fraction: f64) -> Self {
        Self::new(location.start_angle(), location.end_angle(fraction))
    }

    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    /// Leading part of the span covering `completion` of its length.
    pub fn truncated(&self, completion: f64) -> Self {
        Self::new(self.start, self.start + self.sweep() * completion.clamp(0.0, 1.0))
    }
}

/// Center and radius shared by the background and foreground arcs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center: Point,
    pub radius: f64,
}

impl RingGeometry {
    /// The diameter follows the larger bounds dimension, and the radius is pulled in by half of
    /// the wider stroke so that stroke stays inside that diameter.
    pub fn calculate(
        bounds: Bounds,
        margin: f64,
        foreground_width: f64,
        background_width: f64,
    ) -> Self {
        let diameter = (bounds.width - margin).max(bounds.height - margin);
        let radius = diameter / 2.0 - foreground_width.max(background_width) / 2.0;

        Self {
            center: bounds.center(),
            radius,
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.radius > 0.0 && self.radius.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_geometry_square_bounds() {
        let geometry = RingGeometry::calculate(Bounds::new(100.0, 100.0), 0.0, 8.0, 8.0);
        assert_eq!(geometry.center, Point::new(50.0, 50.0));
        assert_eq!(geometry.radius, 46.0);
    }

    #[test]
    fn test_geometry_uses_larger_dimension_and_wider_stroke() {
        let geometry = RingGeometry::calculate(Bounds::new(200.0, 100.0), 0.0, 4.0, 12.0);
        assert_eq!(geometry.center, Point::new(100.0, 50.0));
        assert_eq!(geometry.radius, 94.0);

        let geometry = RingGeometry::calculate(Bounds::new(80.0, 120.0), 0.0, 10.0, 2.0);
        assert_eq!(geometry.radius, 55.0);
    }

    #[test]
    fn test_geometry_margin_shrinks_diameter() {
        let geometry = RingGeometry::calculate(Bounds::new(100.0, 100.0), 20.0, 8.0, 8.0);
        assert_eq!(geometry.radius, 36.0);
    }

    #[test]
    fn test_degenerate_geometry_is_not_drawable() {
        let geometry = RingGeometry::calculate(Bounds::new(6.0, 6.0), 0.0, 8.0, 8.0);
        assert!(!geometry.is_drawable());
        assert!(RingGeometry::calculate(Bounds::new(20.0, 20.0), 0.0, 8.0, 8.0).is_drawable());
    }

    #[test]
    fn test_full_circle_span() {
        let span = ArcSpan::full_circle();
        assert_eq!(span.start, 0.0);
        assert!((span.end - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_truncated_span() {
        let span = ArcSpan::from_location(ArcStartLocation::Right, 1.0);
        let visible = span.truncated(0.01);
        assert_eq!(visible.start, 0.0);
        assert!((visible.end - 0.02 * PI).abs() < 1e-12);
        assert_eq!(span.truncated(2.0), span);
        assert_eq!(span.truncated(-1.0).sweep(), 0.0);
    }

    #[test]
    fn test_centered_rect() {
        let rect = Bounds::new(300.0, 200.0).centered_rect(120.0, 68.0);
        assert_eq!(rect, Rect::new(90.0, 66.0, 120.0, 68.0));
        assert_eq!(rect.center(), Point::new(150.0, 100.0));
    }
}
