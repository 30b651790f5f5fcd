#![forbid(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod controller;
pub mod displacement;
pub mod errors;
pub mod events;
pub mod geometry;
mod input_mocking;
pub mod ownership;
pub mod plugin;
pub mod pointer;
pub mod systems;

// Re-export this at the root level
pub use input_mocking::MockTouch;

/// Everything you need to get started
pub mod prelude {
    pub use crate::config::JoystickConfig;
    pub use crate::controller::{FrameInput, JoystickEffects, SessionState, VirtualJoystick};
    pub use crate::errors::{JoystickError, JoystickWidget, JoystickWidgets};
    pub use crate::events::{
        JoystickEvent, JoystickEventKind, JoystickEventMessage, JoystickListeners, ListenerHandle,
    };
    pub use crate::geometry::{JoystickGeometry, WidgetRect};
    pub use crate::pointer::{MouseSample, PointerId, PointerInput, PointerPhase, PointerSample};

    pub use crate::plugin::{
        JoystickDisabled, JoystickLayout, TouchSupport, VirtualJoystickNode,
        VirtualJoystickPlugin, VirtualJoystickSystem,
    };
}
