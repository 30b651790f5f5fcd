//! Coordinate spaces and the conversions between them.
//!
//! Three spaces are involved:
//!
//! - **device space**: raw pixels, as reported by the pointer source, with the origin in the bottom-left corner and `y` pointing up.
//! - **logical space**: the UI system's own units, sharing the device space's bottom-left origin, scaled uniformly per axis.
//! - **widget space**: logical units measured from the top-left corner of a parent widget, with `y` pointing down.
//!
//! Screen rectangles reported by the layout system use a top-left origin,
//! so they must be flipped before they can be compared against pointer positions.

use bevy::math::{Rect, Vec2};
use bevy::reflect::Reflect;

/// The position and size of a widget, relative to the top-left corner of its parent
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct WidgetRect {
    /// Offset of the widget's top-left corner from its parent's top-left corner
    pub position: Vec2,
    /// Width and height of the widget
    pub size: Vec2,
}

impl WidgetRect {
    /// Creates a new [`WidgetRect`].
    #[inline]
    #[must_use]
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// The center of the widget, in its parent's space.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    /// Moves the widget so that its center lies at `point`.
    #[inline]
    #[must_use]
    pub fn centered_on(self, point: Vec2) -> Self {
        Self {
            position: point - self.size / 2.0,
            size: self.size,
        }
    }

    /// Moves the widget to the middle of a parent of the given size.
    #[inline]
    #[must_use]
    pub fn centered_within(self, parent_size: Vec2) -> Self {
        self.centered_on(parent_size / 2.0)
    }
}

/// Everything the joystick needs to know about the screen and its widgets for one frame
///
/// This is gathered fresh every frame, as the viewport may be resized at any time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct JoystickGeometry {
    /// The joystick's root panel in device space, with a top-left origin
    pub screen_rect: Rect,
    /// The area widget, relative to the panel
    pub area: WidgetRect,
    /// The thumb widget, relative to the area
    pub thumb: WidgetRect,
    /// The size of the device screen, in pixels
    pub device_screen_size: Vec2,
    /// The size of the screen in the UI system's logical units
    pub logical_screen_size: Vec2,
}

impl JoystickGeometry {
    /// Converts a device space point into logical space.
    ///
    /// See [`to_logical_space`].
    #[inline]
    #[must_use]
    pub fn to_logical_space(&self, point: Vec2) -> Vec2 {
        to_logical_space(point, self.device_screen_size, self.logical_screen_size)
    }

    /// The joystick's root panel in logical space, with a top-left origin.
    #[must_use]
    pub fn panel_logical_rect(&self) -> Rect {
        let min = scale(
            self.screen_rect.min,
            self.device_screen_size,
            self.logical_screen_size,
        );
        let max = scale(
            self.screen_rect.max,
            self.device_screen_size,
            self.logical_screen_size,
        );

        Rect::from_corners(min, max)
    }

    /// Converts a logical space point into the panel's widget space.
    ///
    /// The vertical axis is inverted: logical space grows upwards, widget space grows downwards.
    #[must_use]
    pub fn to_panel_space(&self, logical_point: Vec2) -> Vec2 {
        let panel = self.panel_logical_rect();

        Vec2::new(
            logical_point.x - panel.min.x,
            (self.logical_screen_size.y - logical_point.y) - panel.min.y,
        )
    }

    /// Converts a point in the panel's widget space back into logical space.
    ///
    /// This is the inverse of [`JoystickGeometry::to_panel_space`].
    #[must_use]
    pub fn panel_to_logical_space(&self, panel_point: Vec2) -> Vec2 {
        let panel = self.panel_logical_rect();

        Vec2::new(
            panel_point.x + panel.min.x,
            self.logical_screen_size.y - (panel_point.y + panel.min.y),
        )
    }

    /// Is the device space `point` inside the joystick's root panel?
    ///
    /// See [`hit_test`].
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        hit_test(point, self.screen_rect, self.device_screen_size)
    }
}

/// Converts a point from device space into logical space.
///
/// Each axis is scaled independently by `logical_size / device_size`.
/// Both spaces share the same origin, so no flip is performed.
/// An axis with a zero device size is left unscaled.
///
/// ```rust
/// use bevy::math::Vec2;
/// use leafwing_virtual_joystick::geometry::to_logical_space;
///
/// let device = Vec2::new(2000.0, 1000.0);
/// let logical = Vec2::new(1000.0, 500.0);
///
/// assert_eq!(
///     to_logical_space(Vec2::new(300.0, 40.0), device, logical),
///     Vec2::new(150.0, 20.0)
/// );
/// ```
#[inline]
#[must_use]
pub fn to_logical_space(point: Vec2, device_size: Vec2, logical_size: Vec2) -> Vec2 {
    scale(point, device_size, logical_size)
}

/// Is the device space `point` (bottom-left origin) inside `screen_rect` (top-left origin)?
///
/// The rectangle is flipped vertically before testing. Edges count as inside.
///
/// ```rust
/// use bevy::math::{Rect, Vec2};
/// use leafwing_virtual_joystick::geometry::hit_test;
///
/// let screen = Vec2::new(800.0, 600.0);
/// // A panel hugging the bottom-left corner of the screen
/// let panel = Rect::new(0.0, 400.0, 200.0, 600.0);
///
/// assert!(hit_test(Vec2::new(100.0, 100.0), panel, screen));
/// assert!(!hit_test(Vec2::new(100.0, 500.0), panel, screen));
/// ```
#[must_use]
pub fn hit_test(point: Vec2, screen_rect: Rect, device_size: Vec2) -> bool {
    let flipped = Rect::new(
        screen_rect.min.x,
        device_size.y - screen_rect.max.y,
        screen_rect.max.x,
        device_size.y - screen_rect.min.y,
    );

    flipped.contains(point)
}

fn scale(point: Vec2, from: Vec2, to: Vec2) -> Vec2 {
    Vec2::new(scale_axis(point.x, from.x, to.x), scale_axis(point.y, from.y, to.y))
}

fn scale_axis(value: f32, from: f32, to: f32) -> f32 {
    if from == 0.0 {
        value
    } else {
        value * to / from
    }
}
