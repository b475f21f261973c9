use std::f64::consts::PI;
use std::time::Duration;

pub mod animation;
pub mod compositor;
pub mod geometry;
pub mod label;
pub mod location;
pub mod model;
pub mod view;

pub use animation::{AnimatedProperty, StrokeAnimation, TimingCurve};
pub use compositor::{AnimationPolicy, Compositor};
pub use geometry::{ArcSpan, Bounds, Point, Rect, RingGeometry};
pub use label::{LabelUpdate, ProgressLabel};
pub use location::ArcStartLocation;
pub use model::{AnimatedStroke, ArcStroke, Foreground, ProgressRing, RingFrame};

pub const FULL_TURN: f64 = 2.0 * PI;
pub const MAX_PROGRESS: u8 = 100;
pub const DEFAULT_ARC_WIDTH: f64 = 8.0;
pub const MIN_ANIMATED_FRACTION: f64 = 0.01; // sliver shown for "started, nothing done"
pub const ANIMATION_DURATION: Duration = Duration::from_secs(2);
pub const LABEL_WIDTH: f64 = 120.0;
pub const LABEL_HEIGHT: f64 = 68.0;
pub const NUMERAL_FONT_SIZE: f64 = 16.0;
pub const SUFFIX_FONT_SIZE: f64 = 14.0;
pub const LABEL_FONT_FACE: &str = "Sans";
