//! Clamping and normalization of joystick displacements

use bevy::math::Vec2;

/// A circular region limiting how far the thumb may travel from the center of the area,
/// which also maps raw drag offsets into the unit circle.
///
/// ```rust
/// use bevy::math::Vec2;
/// use leafwing_virtual_joystick::displacement::ThumbBounds;
///
/// let bounds = ThumbBounds::new(90.0);
///
/// // Offsets inside the circle are left alone...
/// assert_eq!(bounds.clamp(Vec2::new(0.0, 45.0)), Vec2::new(0.0, 45.0));
/// // ...while longer ones are shortened, keeping their direction.
/// assert_eq!(bounds.clamp(Vec2::new(0.0, 180.0)), Vec2::new(0.0, 90.0));
///
/// assert_eq!(bounds.normalize(Vec2::new(0.0, 45.0)), Vec2::new(0.0, 0.5));
/// assert_eq!(bounds.normalize(Vec2::new(0.0, 180.0)), Vec2::new(0.0, 1.0));
/// ```
///
/// The radius can only be set through [`ThumbBounds::new`], so it is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct ThumbBounds {
    radius: f32,
}

impl ThumbBounds {
    /// Creates a [`ThumbBounds`] with the given radius.
    ///
    /// # Requirements
    ///
    /// - `radius` > `0.0`.
    ///
    /// # Panics
    ///
    /// Panics if the requirements aren't met.
    /// Use [`JoystickConfig::validate`](crate::config::JoystickConfig::validate) to check user-provided values first.
    #[inline]
    pub fn new(radius: f32) -> Self {
        assert!(radius > 0.0);
        Self { radius }
    }

    /// Returns the radius of the bounds.
    #[must_use]
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Is the `offset` within the bounds?
    #[must_use]
    #[inline]
    pub fn contains(&self, offset: Vec2) -> bool {
        offset.length() <= self.radius
    }

    /// Shortens `offset` to the radius if it is longer, preserving its direction.
    ///
    /// A zero offset stays zero.
    #[must_use]
    #[inline]
    pub fn clamp(&self, offset: Vec2) -> Vec2 {
        offset.clamp_length_max(self.radius)
    }

    /// Maps a raw drag offset into the unit circle.
    ///
    /// Offsets within the radius are divided by it, producing a magnitude in `[0, 1]`.
    /// Offsets beyond it are normalized to exactly unit length.
    #[must_use]
    pub fn normalize(&self, offset: Vec2) -> Vec2 {
        if self.contains(offset) {
            offset / self.radius
        } else {
            offset.normalize_or_zero()
        }
    }
}

impl Default for ThumbBounds {
    fn default() -> Self {
        Self::new(crate::config::JoystickConfig::DEFAULT_RADIUS)
    }
}
