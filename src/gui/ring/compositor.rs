use super::geometry::Bounds;
use super::label::{LabelUpdate, ProgressLabel};
use super::model::{AnimatedStroke, ArcStroke, Foreground, RingFrame};
use super::view;
use cairo::Context;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::Instant;
use strum::{Display as StrumDisplay, EnumString};

/// What happens to animated layers from earlier frames when a new frame is committed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AnimationPolicy {
    /// Every animated frame adds a layer and nothing is ever removed.
    #[default]
    Stack,
    /// Only the newest animated layer survives; a static frame clears them all.
    Replace,
}

#[derive(Debug, Clone, Copy)]
struct Layer {
    stroke: AnimatedStroke,
    started: Instant,
}

impl Layer {
    fn visible_at(&self, now: Instant) -> ArcStroke {
        self.stroke.visible_at(now.saturating_duration_since(self.started))
    }

    fn is_animating(&self, now: Instant) -> bool {
        !self
            .stroke
            .animation
            .is_finished(now.saturating_duration_since(self.started))
    }
}

/// Retained paint state for one ring.
///
/// Frames from [`crate::gui::ring::ProgressRing::render`] are committed here, animated
/// foregrounds become layers with their own start time, and [`Compositor::draw`] paints the
/// whole stack at a given instant.
#[derive(Default)]
pub struct Compositor {
    policy: AnimationPolicy,
    bounds: Option<Bounds>,
    background: Option<ArcStroke>,
    foreground: Option<ArcStroke>,
    layers: Vec<Layer>,
    label: Option<ProgressLabel>,
    label_hidden: bool,
}

impl Compositor {
    pub fn new(policy: AnimationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn set_policy(&mut self, policy: AnimationPolicy) {
        self.policy = policy;
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn label(&self) -> Option<&ProgressLabel> {
        self.label.as_ref().filter(|_| !self.label_hidden)
    }

    pub fn commit(&mut self, frame: RingFrame, now: Instant) {
        self.bounds = Some(frame.bounds);
        self.background = Some(frame.background);

        match frame.foreground {
            Foreground::Static(stroke) => {
                self.foreground = Some(stroke);
                if self.policy == AnimationPolicy::Replace {
                    self.layers.clear();
                }
            }
            Foreground::Animated(stroke) => {
                self.foreground = None;
                if self.policy == AnimationPolicy::Replace {
                    self.layers.clear();
                }
                self.layers.push(Layer {
                    stroke,
                    started: now,
                });
            }
        }

        match frame.label {
            LabelUpdate::Show(label) => {
                self.label = Some(label);
                self.label_hidden = false;
            }
            LabelUpdate::Hide => self.label_hidden = true,
        }

        log::debug!(
            "Committed ring frame ({} animated layers, policy {})",
            self.layers.len(),
            self.policy
        );
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.layers.iter().any(|layer| layer.is_animating(now))
    }

    /// Strokes in paint order as they look at `now`.
    pub fn strokes_at(&self, now: Instant) -> Vec<ArcStroke> {
        self.background
            .iter()
            .chain(self.foreground.iter())
            .copied()
            .chain(self.layers.iter().map(|layer| layer.visible_at(now)))
            .collect()
    }

    pub fn draw(&self, cr: &Context, now: Instant) -> Result<(), cairo::Error> {
        for stroke in self.strokes_at(now) {
            view::draw_arc(cr, &stroke)?;
        }
        if let Some(label) = self.label() {
            view::draw_label(cr, label)?;
        }
        Ok(())
    }
}
