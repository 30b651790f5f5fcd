//! Errors that may occur when setting up a virtual joystick

use bevy::reflect::Reflect;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// The widgets a virtual joystick needs in order to draw itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Reflect, Serialize, Deserialize)]
pub enum JoystickWidget {
    /// The bounding element that represents the travel range
    #[display(fmt = "area")]
    Area,
    /// The movable element that follows the finger
    #[display(fmt = "thumb")]
    Thumb,
}

/// The joystick could not be set up, and will not process any input.
///
/// These errors are only produced at initialization.
/// Once a joystick is running, every per-frame condition is handled without failing.
#[derive(Debug, Clone, Copy, PartialEq, Display, Error)]
pub enum JoystickError {
    /// The configured radius was zero, negative or not finite
    #[display(fmt = "joystick radius must be a finite positive number, got {}", _0)]
    InvalidRadius(#[error(not(source))] f32),
    /// A required widget reference was not provided
    #[display(fmt = "joystick is missing its {} widget", _0)]
    MissingWidget(#[error(not(source))] JoystickWidget),
}

/// References to the two widgets a joystick drives
///
/// `W` is whatever the host uses to refer to a widget, such as an [`Entity`](bevy::ecs::entity::Entity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickWidgets<W> {
    /// The area widget
    pub area: Option<W>,
    /// The thumb widget, which should be a child of the area
    pub thumb: Option<W>,
}

// Deriving default induces an undesired bound on the generic
impl<W> Default for JoystickWidgets<W> {
    fn default() -> Self {
        Self {
            area: None,
            thumb: None,
        }
    }
}

impl<W> JoystickWidgets<W> {
    /// Returns the `(area, thumb)` pair, or the first missing widget.
    pub fn resolve(self) -> Result<(W, W), JoystickError> {
        let area = self
            .area
            .ok_or(JoystickError::MissingWidget(JoystickWidget::Area))?;
        let thumb = self
            .thumb
            .ok_or(JoystickError::MissingWidget(JoystickWidget::Thumb))?;

        Ok((area, thumb))
    }
}
