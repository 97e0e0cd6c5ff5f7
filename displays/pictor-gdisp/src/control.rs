//! Display control channel
//!
//! Power and orientation follow the same state machine: a request equal to
//! the current value is a no-op, anything else runs the port hook and then
//! commits the new value. Orientation changes between the portrait and
//! landscape families also swap the logical width and height.

use crate::types::{DisplayState, Orientation, PowerMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw code: power mode
pub const CONTROL_POWER: u16 = 0;
/// Raw code: orientation
pub const CONTROL_ORIENTATION: u16 = 1;
/// Raw code: backlight level (0-100)
pub const CONTROL_BACKLIGHT: u16 = 2;
/// Raw code: contrast level (0-100)
pub const CONTROL_CONTRAST: u16 = 3;
/// First port-specific raw code
pub const CONTROL_LLD: u16 = 1000;

/// Highest backlight or contrast level
pub const MAX_LEVEL: u8 = 100;

/// A control request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Control {
    Power(PowerMode),
    Orientation(Orientation),
    /// Backlight level, 0-100; larger values are ignored
    Backlight(u8),
    /// Contrast level, 0-100; larger values are ignored
    Contrast(u8),
    /// Port-specific request, forwarded untouched
    Driver { code: u16, value: u32 },
}

impl Control {
    /// Decode a raw `(what, value)` pair
    ///
    /// Returns `None` for unrecognized codes and out-of-range values; callers
    /// ignore those.
    pub fn from_raw(what: u16, value: u32) -> Option<Self> {
        match what {
            CONTROL_POWER => PowerMode::from_u32(value).map(Control::Power),
            CONTROL_ORIENTATION => Orientation::from_u32(value).map(Control::Orientation),
            CONTROL_BACKLIGHT => percent(value).map(Control::Backlight),
            CONTROL_CONTRAST => percent(value).map(Control::Contrast),
            code if code >= CONTROL_LLD => Some(Control::Driver { code, value }),
            _ => None,
        }
    }
}

/// Decode a 0-100 level
fn percent(value: u32) -> Option<u8> {
    u8::try_from(value).ok().filter(|&v| v <= MAX_LEVEL)
}

impl DisplayState {
    /// Process a control request and return the next state
    ///
    /// Returns `self` unchanged for requests that match the current state,
    /// out-of-range levels and port-specific requests.
    pub fn transition(self, control: Control) -> Self {
        match control {
            Control::Power(power) => Self { power, ..self },
            Control::Orientation(orientation) => {
                let (width, height) = if orientation.is_landscape() != self.orientation.is_landscape() {
                    (self.height, self.width)
                } else {
                    (self.width, self.height)
                };
                Self {
                    width,
                    height,
                    orientation,
                    ..self
                }
            }
            Control::Backlight(level) if level <= MAX_LEVEL => Self {
                backlight: level,
                ..self
            },
            Control::Contrast(level) if level <= MAX_LEVEL => Self {
                contrast: level,
                ..self
            },
            Control::Backlight(_) | Control::Contrast(_) | Control::Driver { .. } => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_to_landscape_swaps() {
        let state = DisplayState::new(240, 320);
        let next = state.transition(Control::Orientation(Orientation::Landscape));
        assert_eq!((next.width, next.height), (320, 240));
        assert_eq!(next.orientation, Orientation::Landscape);
    }

    #[test]
    fn test_same_family_keeps_dimensions() {
        let state = DisplayState::new(240, 320);
        let next = state.transition(Control::Orientation(Orientation::PortraitInverted));
        assert_eq!((next.width, next.height), (240, 320));

        let landscape = state.transition(Control::Orientation(Orientation::Landscape));
        let inverted = landscape.transition(Control::Orientation(Orientation::LandscapeInverted));
        assert_eq!((inverted.width, inverted.height), (320, 240));
    }

    #[test]
    fn test_round_trip_restores_dimensions() {
        let state = DisplayState::new(240, 320);
        let back = state
            .transition(Control::Orientation(Orientation::Landscape))
            .transition(Control::Orientation(Orientation::Portrait));
        assert_eq!(back, state);
    }

    #[test]
    fn test_same_value_is_identity() {
        let state = DisplayState::new(240, 320);
        assert_eq!(state.transition(Control::Power(PowerMode::On)), state);
        assert_eq!(state.transition(Control::Orientation(Orientation::Portrait)), state);
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(
            Control::from_raw(CONTROL_POWER, 2),
            Some(Control::Power(PowerMode::Sleep))
        );
        assert_eq!(
            Control::from_raw(CONTROL_ORIENTATION, 1),
            Some(Control::Orientation(Orientation::Landscape))
        );
        assert_eq!(Control::from_raw(CONTROL_BACKLIGHT, 100), Some(Control::Backlight(100)));
        assert_eq!(Control::from_raw(CONTROL_CONTRAST, 0), Some(Control::Contrast(0)));
        assert_eq!(
            Control::from_raw(1001, 42),
            Some(Control::Driver { code: 1001, value: 42 })
        );
    }

    #[test]
    fn test_from_raw_unrecognized() {
        assert_eq!(Control::from_raw(CONTROL_POWER, 9), None);
        assert_eq!(Control::from_raw(CONTROL_ORIENTATION, 4), None);
        assert_eq!(Control::from_raw(4, 0), None);
        assert_eq!(Control::from_raw(999, 0), None);
        assert_eq!(Control::from_raw(CONTROL_BACKLIGHT, 101), None);
        assert_eq!(Control::from_raw(CONTROL_CONTRAST, 256 + 50), None);
    }

    #[test]
    fn test_out_of_range_level_ignored() {
        let state = DisplayState::new(240, 320);
        assert_eq!(state.transition(Control::Backlight(101)), state);
        assert_eq!(state.transition(Control::Contrast(255)), state);
        assert_eq!(state.transition(Control::Backlight(0)).backlight, 0);
    }
}
