use super::FULL_TURN;
use strum::{Display as StrumDisplay, EnumIter, EnumString, FromRepr};

/// Compass anchor the foreground arc sweeps from.
///
/// Hosts hand in raw integer codes; [`ArcStartLocation::from_code`] is the only way in from
/// those, and anything outside `0..=3` lands on [`ArcStartLocation::Top`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, EnumIter, FromRepr, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum ArcStartLocation {
    #[default]
    #[strum(to_string = "Top", serialize = "t")]
    Top = 0,
    #[strum(to_string = "Right", serialize = "r")]
    Right = 1,
    #[strum(to_string = "Bottom", serialize = "b")]
    Bottom = 2,
    #[strum(to_string = "Left", serialize = "l")]
    Left = 3,
}

impl ArcStartLocation {
    pub fn from_code(code: i64) -> Self {
        u8::try_from(code)
            .ok()
            .and_then(Self::from_repr)
            .unwrap_or_default()
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Angle in radians, increasing clockwise in y-down device space.
    pub fn start_angle(&self) -> f64 {
        match self {
            Self::Top => -FULL_TURN / 4.0,
            Self::Right => 0.0,
            Self::Bottom => -3.0 * FULL_TURN / 4.0,
            Self::Left => -FULL_TURN / 2.0,
        }
    }

    pub fn end_angle(&self, fraction: f64) -> f64 {
        self.start_angle() + FULL_TURN * fraction
    }
}
