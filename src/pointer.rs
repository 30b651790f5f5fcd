//! Raw pointer input, and the strategies that turn it into [`PointerSample`]s.
//!
//! Touch screens report many independent contacts, each with its own phase.
//! Mice report a single pointer with button states instead.
//! An [`InputStrategy`] is picked once, when a joystick is initialized,
//! and hides that difference from the rest of the crate.

use bevy::math::Vec2;
use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// Identifies the pointer that is driving a joystick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum PointerId {
    /// A physical contact point, stable across frames for the same finger
    Touch(u64),
    /// The mouse cursor
    Mouse,
}

/// Where a pointer is in its press-and-release cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum PointerPhase {
    /// The pointer was pressed this frame
    Began,
    /// The pointer is held and moved this frame
    Moved,
    /// The pointer is held but did not move
    Stationary,
    /// The pointer was released this frame
    Ended,
    /// The platform took the pointer away, e.g. because a system gesture started
    Canceled,
}

impl PointerPhase {
    /// Is the pointer still down?
    #[inline]
    #[must_use]
    pub fn is_held(&self) -> bool {
        matches!(self, Self::Began | Self::Moved | Self::Stationary)
    }

    /// Has the pointer let go this frame?
    #[inline]
    #[must_use]
    pub fn is_released(&self) -> bool {
        matches!(self, Self::Ended | Self::Canceled)
    }
}

/// A single pointer as seen during one frame
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct PointerSample {
    /// Which pointer this is
    pub id: PointerId,
    /// Position in device space, with a bottom-left origin
    pub position: Vec2,
    /// What the pointer did this frame
    pub phase: PointerPhase,
}

impl PointerSample {
    /// Creates a sample for the touch with the given `id`.
    #[inline]
    #[must_use]
    pub fn touch(id: u64, position: Vec2, phase: PointerPhase) -> Self {
        Self {
            id: PointerId::Touch(id),
            position,
            phase,
        }
    }
}

/// The state of the primary mouse button during one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
pub struct MouseSample {
    /// The button went down this frame
    pub just_pressed: bool,
    /// The button is down
    pub pressed: bool,
    /// The button went up this frame
    pub just_released: bool,
    /// Cursor position in device space, with a bottom-left origin
    ///
    /// This is `None` when the cursor is outside of the window.
    pub position: Option<Vec2>,
}

/// All raw pointer input seen during one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerInput {
    /// Active touches, in the order the platform reports them
    pub touches: Vec<PointerSample>,
    /// The primary mouse button and cursor
    pub mouse: MouseSample,
}

/// Converts raw [`PointerInput`] into the samples a joystick considers
pub trait InputStrategy: Send + Sync + std::fmt::Debug {
    /// Returns the candidate pointers for this frame, in polling order.
    fn samples(&self, input: &PointerInput) -> Vec<PointerSample>;
}

/// Reads every active touch, ignoring the mouse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchStrategy;

impl InputStrategy for TouchStrategy {
    fn samples(&self, input: &PointerInput) -> Vec<PointerSample> {
        input.touches.clone()
    }
}

/// Reads the primary mouse button as a single pointer, ignoring touches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseStrategy;

impl InputStrategy for MouseStrategy {
    fn samples(&self, input: &PointerInput) -> Vec<PointerSample> {
        let mouse = input.mouse;
        let Some(position) = mouse.position else {
            // Releasing the button outside of the window must still end the drag
            return if mouse.just_released {
                vec![PointerSample {
                    id: PointerId::Mouse,
                    position: Vec2::ZERO,
                    phase: PointerPhase::Ended,
                }]
            } else {
                Vec::new()
            };
        };

        let phase = if mouse.just_released {
            PointerPhase::Ended
        } else if mouse.just_pressed {
            PointerPhase::Began
        } else if mouse.pressed {
            PointerPhase::Moved
        } else {
            return Vec::new();
        };

        vec![PointerSample {
            id: PointerId::Mouse,
            position,
            phase,
        }]
    }
}

/// Picks the [`InputStrategy`] for a joystick.
///
/// Touch input is used when the platform supports it, or when `force_touch_input` is set.
#[must_use]
pub fn select_strategy(supports_touch: bool, force_touch_input: bool) -> Box<dyn InputStrategy> {
    if supports_touch || force_touch_input {
        Box::new(TouchStrategy)
    } else {
        Box::new(MouseStrategy)
    }
}
