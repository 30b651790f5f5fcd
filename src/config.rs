//! Settings that shape how a [`VirtualJoystick`](crate::controller::VirtualJoystick) responds to input.

use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

use crate::errors::JoystickError;

/// Configuration of a single on-screen joystick.
///
/// These values are read once, when the controller is initialized,
/// and stay fixed for the rest of its life.
///
/// ```rust
/// use leafwing_virtual_joystick::prelude::*;
///
/// let config = JoystickConfig::default().with_radius(120.0).with_dynamic_thumb(true);
///
/// assert_eq!(config.radius, 120.0);
/// assert!(config.dynamic_thumb);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[must_use]
pub struct JoystickConfig {
    /// How far, in logical screen units, the thumb may travel from the center of the area.
    ///
    /// Displacements larger than this are reported as a unit-length drag vector.
    pub radius: f32,

    /// If `true`, the area jumps to wherever the user first touches,
    /// rather than staying at its laid-out position.
    pub dynamic_thumb: bool,

    /// Treat input as touch input even on platforms that do not report touch support.
    ///
    /// This is useful when testing a mobile build through a remote touch device.
    pub force_touch_input: bool,
}

impl JoystickConfig {
    /// The radius used by [`JoystickConfig::default`].
    pub const DEFAULT_RADIUS: f32 = 90.0;

    /// Sets the travel radius of the thumb.
    #[inline]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Enables or disables the dynamic thumb.
    #[inline]
    pub fn with_dynamic_thumb(mut self, dynamic_thumb: bool) -> Self {
        self.dynamic_thumb = dynamic_thumb;
        self
    }

    /// Enables or disables forced touch input.
    #[inline]
    pub fn with_forced_touch_input(mut self, force_touch_input: bool) -> Self {
        self.force_touch_input = force_touch_input;
        self
    }

    /// Checks that the radius is a finite, strictly positive number.
    pub fn validate(&self) -> Result<(), JoystickError> {
        if self.radius.is_finite() && self.radius > 0.0 {
            Ok(())
        } else {
            Err(JoystickError::InvalidRadius(self.radius))
        }
    }
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
            dynamic_thumb: false,
            force_touch_input: false,
        }
    }
}
