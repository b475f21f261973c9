use super::geometry::{Bounds, Rect};
use super::{LABEL_HEIGHT, LABEL_WIDTH, NUMERAL_FONT_SIZE, SUFFIX_FONT_SIZE};
use palette::Srgba;

const SUFFIX: &str = "%";

/// Whole percent shown for `fraction`, truncated towards zero.
///
/// Fractions come from integer percentages divided by 100, so `f * 100` may land a hair under
/// the integer it came from (0.29 * 100 = 28.999...). Values within rounding noise of an integer
/// snap to it before truncating.
pub fn percent(fraction: f64) -> u32 {
    let scaled = (fraction * 100.0).max(0.0);
    let nearest = scaled.round();
    let whole = if (scaled - nearest).abs() < 1e-9 {
        nearest
    } else {
        scaled.floor()
    };
    whole as u32
}

/// Fixed-size text box centered on the ring, numeral drawn larger than the `%` glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressLabel {
    pub frame: Rect,
    pub color: Srgba<f64>,
    pub numeral: String,
    pub numeral_size: f64,
    pub suffix_size: f64,
}

impl ProgressLabel {
    pub fn new(bounds: Bounds, fraction: f64, color: Srgba<f64>) -> Self {
        Self {
            frame: bounds.centered_rect(LABEL_WIDTH, LABEL_HEIGHT),
            color,
            numeral: percent(fraction).to_string(),
            numeral_size: NUMERAL_FONT_SIZE,
            suffix_size: SUFFIX_FONT_SIZE,
        }
    }

    pub fn suffix(&self) -> &'static str {
        SUFFIX
    }

    pub fn text(&self) -> String {
        format!("{}{}", self.numeral, SUFFIX)
    }
}

/// What a frame asks of the label. Hiding leaves the previous label in place, just invisible.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelUpdate {
    Hide,
    Show(ProgressLabel),
}

impl LabelUpdate {
    pub fn label(&self) -> Option<&ProgressLabel> {
        match self {
            Self::Hide => None,
            Self::Show(label) => Some(label),
        }
    }
}
